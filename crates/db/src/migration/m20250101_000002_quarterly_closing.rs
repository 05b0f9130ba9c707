//! Quarterly closing schema: quarters and schedule items.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();
        db.execute_unprepared(QUARTERS_SQL).await?;
        db.execute_unprepared(SCHEDULE_ITEMS_SQL).await?;
        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();
        db.execute_unprepared(
            r"
            DROP TABLE IF EXISTS schedule_items CASCADE;
            DROP TABLE IF EXISTS quarters CASCADE;
            DROP TYPE IF EXISTS schedule_status;
            ",
        )
        .await?;
        Ok(())
    }
}

const QUARTERS_SQL: &str = r"
CREATE TABLE quarters (
    id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
    year INTEGER NOT NULL,
    quarter SMALLINT NOT NULL,
    start_date DATE NOT NULL,
    end_date DATE NOT NULL,
    created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    -- Guards concurrent find-or-create of the same quarter
    CONSTRAINT uq_quarters_year_quarter UNIQUE (year, quarter),
    CONSTRAINT chk_quarter_number CHECK (quarter BETWEEN 1 AND 4),
    CONSTRAINT chk_quarter_span CHECK (start_date <= end_date)
);
";

const SCHEDULE_ITEMS_SQL: &str = r"
CREATE TYPE schedule_status AS ENUM ('planned', 'confirmed');

CREATE TABLE schedule_items (
    id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
    quarter_id UUID NOT NULL REFERENCES quarters(id) ON DELETE CASCADE,
    subsidiary_id UUID NOT NULL REFERENCES subsidiaries(id) ON DELETE CASCADE,
    category VARCHAR(50) NOT NULL,
    planned_date DATE NOT NULL,
    confirmed_date DATE,
    status schedule_status NOT NULL DEFAULT 'planned',
    created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    CONSTRAINT uq_schedule_cell_category UNIQUE (quarter_id, subsidiary_id, category, planned_date),
    CONSTRAINT chk_schedule_category CHECK (category IN (
        'employee-jd', 'preliminary-sales', 'sales-detail', 'lease-detail', 'ar-detail',
        'inventory-detail', 'sga-detail', 'demo-detail', 'pkg'
    )),
    CONSTRAINT chk_schedule_confirmation CHECK ((status = 'confirmed') = (confirmed_date IS NOT NULL))
);

CREATE INDEX idx_schedule_items_quarter ON schedule_items(quarter_id, subsidiary_id);
";
