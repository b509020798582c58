//! Database seeder for Forgeboard development and testing.
//!
//! Seeds the settings row, one account per role, and a fiscal year of
//! sample orders and production batches.
//!
//! Usage: cargo run --bin seeder

use std::sync::Arc;

use chrono::{Duration, NaiveDate, Utc};
use forgeboard_core::auth::UserRole;
use forgeboard_core::records::{CreateOrderInput, CreateProductionBatchInput, OverCostReason};
use forgeboard_core::settings::Settings;
use forgeboard_db::repositories::CreateUserInput;
use forgeboard_db::{OrderRepository, ProductionRepository, SettingsRepository, UserRepository};
use forgeboard_shared::AppConfig;
use forgeboard_shared::types::UserId;
use rust_decimal::Decimal;
use sea_orm::{DatabaseConnection, EntityTrait, PaginatorTrait};

use forgeboard_db::entities::{orders, production_batches, settings};

/// Password for every seeded account.
const DEV_PASSWORD: &str = "forgeboard-dev";

/// Seeded accounts: email, name, role.
const DEV_USERS: [(&str, &str, UserRole); 3] = [
    ("sales@forgeboard.dev", "Sam Sales", UserRole::Sales),
    ("production@forgeboard.dev", "Pat Production", UserRole::Production),
    ("director@forgeboard.dev", "Dana Director", UserRole::Director),
];

const OVER_COST_REASONS: [&str; 4] = ["Material price", "Rush freight", "Rework labour", "Glass breakage"];

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let config = AppConfig::load()?;

    println!("Connecting to database...");
    let db = Arc::new(forgeboard_db::connect_with(&config.database).await?);

    println!("Seeding settings...");
    seed_settings(&db).await?;

    println!("Seeding users...");
    let sales_rep = seed_users(&db).await?;

    let settings = SettingsRepository::new(Arc::clone(&db)).get().await?;
    let fiscal_year = settings.calendar()?.current_fiscal_year()?;
    let today = Utc::now().date_naive();
    let end = today.min(fiscal_year.end_date);

    println!("Seeding orders for {}...", fiscal_year.label);
    seed_orders(&db, fiscal_year.start_date, end, sales_rep).await?;

    println!("Seeding production batches for {}...", fiscal_year.label);
    seed_batches(&db, fiscal_year.start_date, end).await?;

    println!("Seeding complete!");
    Ok(())
}

/// Writes default settings unless a row exists.
async fn seed_settings(db: &Arc<DatabaseConnection>) -> anyhow::Result<()> {
    if settings::Entity::find().count(db.as_ref()).await? > 0 {
        println!("  Settings already exist, skipping...");
        return Ok(());
    }

    SettingsRepository::new(Arc::clone(db))
        .save(&Settings::default())
        .await?;
    println!("  Created default settings");
    Ok(())
}

/// Creates one account per role; returns the sales rep's ID.
async fn seed_users(db: &Arc<DatabaseConnection>) -> anyhow::Result<Option<UserId>> {
    let repo = UserRepository::new(Arc::clone(db));
    let mut sales_rep = None;

    for (email, full_name, role) in DEV_USERS {
        let user = if let Some(existing) = repo.find_by_email(email).await? {
            println!("  {email} already exists, skipping...");
            existing
        } else {
            let created = repo
                .create(&CreateUserInput {
                    email: email.to_string(),
                    full_name: full_name.to_string(),
                    password: DEV_PASSWORD.to_string(),
                    role,
                })
                .await?;
            println!("  Created {role} user: {email}");
            created
        };

        if role == UserRole::Sales {
            sales_rep = Some(UserId::new(user.id));
        }
    }

    Ok(sales_rep)
}

/// Two orders a week from `start` to `end`, unless orders exist.
async fn seed_orders(
    db: &Arc<DatabaseConnection>,
    start: NaiveDate,
    end: NaiveDate,
    sales_rep: Option<UserId>,
) -> anyhow::Result<()> {
    if orders::Entity::find().count(db.as_ref()).await? > 0 {
        println!("  Orders already exist, skipping...");
        return Ok(());
    }

    let repo = OrderRepository::new(Arc::clone(db));
    let mut count = 0_i64;
    let mut date = start;
    while date <= end {
        let boxes_qty = i32::try_from(count % 4 + 1)?;
        let boxes = Decimal::from(boxes_qty);
        let rrp_total = boxes * Decimal::from(1400);
        let discount = Decimal::from(count % 3 * 50) * boxes;
        let install_revenue = if count % 2 == 0 {
            boxes * Decimal::from(150)
        } else {
            Decimal::ZERO
        };

        repo.create(&CreateOrderInput {
            date,
            reference: Some(format!("JOB-{:04}", count + 1)),
            sales_rep_id: sales_rep,
            boxes_qty,
            rrp_total,
            net_total: rrp_total - discount,
            build_cost_total: boxes * Decimal::from(700),
            install_revenue,
            extras_revenue: Decimal::from(count % 5 * 20),
            notes: None,
        })
        .await?;

        count += 1;
        date += Duration::days(if count % 2 == 0 { 4 } else { 3 });
    }

    println!("  Created {count} orders");
    Ok(())
}

/// One batch a week from `start` to `end`, unless batches exist.
async fn seed_batches(db: &Arc<DatabaseConnection>, start: NaiveDate, end: NaiveDate) -> anyhow::Result<()> {
    if production_batches::Entity::find().count(db.as_ref()).await? > 0 {
        println!("  Production batches already exist, skipping...");
        return Ok(());
    }

    let repo = ProductionRepository::new(Arc::clone(db));
    let mut count = 0_usize;
    let mut date = start;
    while date <= end {
        let boxes_over_cost = i32::try_from(count % 3)?;
        let over_cost_reasons = if boxes_over_cost > 0 {
            vec![OverCostReason {
                reason: OVER_COST_REASONS[count % OVER_COST_REASONS.len()].to_string(),
                boxes: boxes_over_cost,
            }]
        } else {
            Vec::new()
        };

        repo.create(&CreateProductionBatchInput {
            date,
            boxes_built: 4 + i32::try_from(count % 3)?,
            boxes_over_cost,
            over_cost_reasons,
            rework_boxes: i32::from(count % 5 == 0),
            notes: None,
        })
        .await?;

        count += 1;
        date += Duration::days(7);
    }

    println!("  Created {count} production batches");
    Ok(())
}
