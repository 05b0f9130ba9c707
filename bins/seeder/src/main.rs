//! Database seeder for Meridian development and testing.
//!
//! Seeds the group's subsidiaries (including the `HQ` fallback entity used by
//! AI drafting) and four quarters of financial results for local development.
//!
//! Usage: cargo run --bin seeder

use meridian_core::subsidiary::Region;
use meridian_db::repositories::{NewFinancialData, NewSubsidiary};
use meridian_db::{FinancialRepository, SubsidiaryRepository};
use rust_decimal::Decimal;

/// Code, name, country, city, latitude, longitude, region.
const SUBSIDIARIES: [(&str, &str, &str, &str, f64, f64, Region); 8] = [
    ("HQ", "Acme HQ", "South Korea", "Seoul", 37.5665, 126.978, Region::AsiaPacific),
    ("US", "Acme US", "United States", "New York", 40.7128, -74.006, Region::Americas),
    ("MX", "Acme Mexico", "Mexico", "Monterrey", 25.6866, -100.3161, Region::Americas),
    ("DE", "Acme Germany", "Germany", "Frankfurt", 50.1109, 8.6821, Region::Europe),
    ("UK", "Acme UK", "United Kingdom", "London", 51.5074, -0.1278, Region::Europe),
    ("JP", "Acme Japan", "Japan", "Tokyo", 35.6762, 139.6503, Region::AsiaPacific),
    ("VN", "Acme Vietnam", "Vietnam", "Hanoi", 21.0278, 105.8342, Region::AsiaPacific),
    ("AU", "Acme Australia", "Australia", "Sydney", -33.8688, 151.2093, Region::AsiaPacific),
];

/// Quarterly revenue baseline per code, in 억원.
const BASE_REVENUE_EOK: [(&str, i64); 8] = [
    ("HQ", 1_250),
    ("US", 820),
    ("MX", 310),
    ("DE", 540),
    ("UK", 430),
    ("JP", 610),
    ("VN", 270),
    ("AU", 350),
];

const SEED_YEAR: i32 = 2024;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let database_url = std::env::var("DATABASE_URL")
        .map_err(|_| anyhow::anyhow!("DATABASE_URL must be set in environment"))?;

    println!("Connecting to database...");
    let db = meridian_db::connect(&database_url).await?;

    println!("Seeding subsidiaries...");
    seed_subsidiaries(&SubsidiaryRepository::new(db.clone())).await?;

    println!("Seeding financial data...");
    seed_financial_data(
        &SubsidiaryRepository::new(db.clone()),
        &FinancialRepository::new(db),
    )
    .await?;

    println!("Seeding complete!");
    Ok(())
}

async fn seed_subsidiaries(repo: &SubsidiaryRepository) -> anyhow::Result<()> {
    let mut inserted = 0;
    for (code, name, country, city, latitude, longitude, region) in SUBSIDIARIES {
        if repo.find_by_code(code).await?.is_some() {
            println!("  {code} already exists, skipping...");
            continue;
        }
        repo.create(NewSubsidiary {
            name: name.to_string(),
            code: code.to_string(),
            country: country.to_string(),
            city: city.to_string(),
            latitude,
            longitude,
            region,
        })
        .await?;
        inserted += 1;
    }
    println!("  Inserted {inserted} subsidiaries");
    Ok(())
}

async fn seed_financial_data(
    subsidiaries: &SubsidiaryRepository,
    financials: &FinancialRepository,
) -> anyhow::Result<()> {
    let eok = Decimal::from(100_000_000_i64);
    let mut written = 0;

    for (code, base) in BASE_REVENUE_EOK {
        let Some(subsidiary) = subsidiaries.find_by_code(code).await? else {
            eprintln!("  {code} not found, skipping financial data");
            continue;
        };

        for quarter in 1..=4_u8 {
            // +4% per quarter, margin between 7% and 13%, target 5% above Q1 pace
            let growth = Decimal::from(100 + 4 * i64::from(quarter - 1)) / Decimal::ONE_HUNDRED;
            let revenue = (Decimal::from(base) * growth * eok).round_dp(0);
            let margin = Decimal::from(7 + (base + i64::from(quarter)) % 7) / Decimal::ONE_HUNDRED;
            let target = (Decimal::from(base) * Decimal::new(105, 2) * eok).round_dp(0);

            financials
                .upsert(NewFinancialData {
                    subsidiary_id: subsidiary.id,
                    fiscal_year: SEED_YEAR,
                    quarter,
                    revenue,
                    operating_profit: Some((revenue * margin).round_dp(0)),
                    target_revenue: Some(target),
                })
                .await?;
            written += 1;
        }
    }

    println!("  Wrote {written} financial records ({SEED_YEAR} Q1-Q4)");
    Ok(())
}
