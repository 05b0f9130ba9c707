//! Initial schema: subsidiaries, quarterly financial data and issues.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();
        db.execute_unprepared(ENUMS_SQL).await?;
        db.execute_unprepared(SUBSIDIARIES_SQL).await?;
        db.execute_unprepared(FINANCIAL_DATA_SQL).await?;
        db.execute_unprepared(ISSUES_SQL).await?;
        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();
        db.execute_unprepared(
            r"
            DROP TABLE IF EXISTS issues CASCADE;
            DROP TABLE IF EXISTS financial_data CASCADE;
            DROP TABLE IF EXISTS subsidiaries CASCADE;
            DROP TYPE IF EXISTS issue_status;
            DROP TYPE IF EXISTS subsidiary_region;
            ",
        )
        .await?;
        Ok(())
    }
}

const ENUMS_SQL: &str = r"
CREATE TYPE subsidiary_region AS ENUM ('Americas', 'Europe', 'Asia-Pacific');
CREATE TYPE issue_status AS ENUM ('확인 중', '완료');
";

const SUBSIDIARIES_SQL: &str = r"
CREATE TABLE subsidiaries (
    id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
    name VARCHAR(200) NOT NULL,
    code VARCHAR(20) NOT NULL UNIQUE,
    country VARCHAR(100) NOT NULL,
    city VARCHAR(100) NOT NULL,
    latitude DOUBLE PRECISION NOT NULL,
    longitude DOUBLE PRECISION NOT NULL,
    region subsidiary_region NOT NULL,
    created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    CONSTRAINT chk_latitude CHECK (latitude BETWEEN -90 AND 90),
    CONSTRAINT chk_longitude CHECK (longitude BETWEEN -180 AND 180)
);

CREATE INDEX idx_subsidiaries_name ON subsidiaries(name);
";

const FINANCIAL_DATA_SQL: &str = r"
CREATE TABLE financial_data (
    id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
    subsidiary_id UUID NOT NULL REFERENCES subsidiaries(id) ON DELETE CASCADE,
    fiscal_year INTEGER NOT NULL,
    quarter SMALLINT NOT NULL,
    revenue NUMERIC(20, 2) NOT NULL,
    operating_profit NUMERIC(20, 2),
    target_revenue NUMERIC(20, 2),
    created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    CONSTRAINT uq_financial_period UNIQUE (subsidiary_id, fiscal_year, quarter),
    CONSTRAINT chk_financial_quarter CHECK (quarter BETWEEN 1 AND 4)
);

-- Latest-period lookups
CREATE INDEX idx_financial_period ON financial_data(fiscal_year DESC, quarter DESC);
";

const ISSUES_SQL: &str = r"
CREATE TABLE issues (
    id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
    title VARCHAR(200) NOT NULL,
    category VARCHAR(50) NOT NULL,
    entity_id UUID NOT NULL REFERENCES subsidiaries(id) ON DELETE CASCADE,
    description TEXT NOT NULL,
    response TEXT,
    status issue_status NOT NULL DEFAULT '확인 중',
    created_by VARCHAR(100) NOT NULL,
    created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    completed_at TIMESTAMPTZ,
    CONSTRAINT chk_issue_category CHECK (category IN (
        'Tax', 'Lease', 'Closing', 'System', 'Audit', 'Depreciation', 'Labor SG&A',
        'Accrual', 'PKG', 'Inventory', 'Bad debt', 'Allowance', 'FS', 'Others'
    )),
    CONSTRAINT chk_issue_completed CHECK ((status = '완료') = (completed_at IS NOT NULL))
);

CREATE INDEX idx_issues_created ON issues(created_at DESC);
CREATE INDEX idx_issues_entity ON issues(entity_id);
";
