//! Regenerate the forecast tables
//!
//! Wipes provinces, forecasts and nearby links, then synthesizes every
//! region for every slot of the configured seed window.

use sqlx::postgres::PgPoolOptions;
use std::time::Instant;

use shared::{region_fields, Region};
use weather_dashboard_backend::{
    init_tracing,
    services::{SeedPlan, SeedService},
    Config,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = Config::load()?;
    init_tracing(&config.logging);

    let plan = SeedPlan {
        start_date: config.seed.start_date,
        end_date: config.seed.end_date,
        schedule: config.dashboard.schedule()?,
        local: config.dashboard.local_offset()?,
        batch_size: config.seed.batch_size,
    };

    let db = PgPoolOptions::new()
        .max_connections(config.database.max_connections)
        .connect(&config.database.url)
        .await?;
    sqlx::migrate!("./migrations").run(&db).await?;

    for region in Region::ALL {
        let fields: Vec<&str> = region_fields(region).iter().map(|f| f.as_str()).collect();
        tracing::info!(region = region.name_th(), fields = ?fields, "Region field set");
    }

    tracing::info!(
        start = %plan.start_date,
        end = %plan.end_date,
        slots = ?plan.schedule.hours(),
        "Seeding forecasts"
    );
    let started = Instant::now();
    let summary = SeedService::new(db).run(&plan).await?;

    println!(
        "Seeded {} provinces, {} forecasts over {} days ({} nearby links) in {:.1}s",
        summary.provinces,
        summary.forecasts,
        summary.days,
        summary.nearby_links,
        started.elapsed().as_secs_f64()
    );
    Ok(())
}
