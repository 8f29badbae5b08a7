use bag_planner::{
    config::{self, database},
    core::{
        cache::{self, SqliteCache},
        identity::IdentityProvider,
        planner::{self, BagSource, Scaling},
        report,
    },
    errors::Result,
    models::Locale,
};
use dotenvy::dotenv;
use std::env;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    // 1. Initialize tracing (as early as possible)
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // 2. Load .env file
    dotenv().ok(); // env vars can be set externally
    info!("Attempted to load .env file.");

    // 3. Planner settings and seed catalog
    let settings = config::planner::load_default_config()
        .inspect_err(|e| error!("Failed to load config.toml: {}", e))?;

    // 4. Catalog database
    database::ensure_sqlite_dir(&database::get_database_url())?;
    let db = database::create_connection().await?;
    database::create_tables(&db)
        .await
        .inspect(|_| info!("Catalog tables ready."))
        .inspect_err(|e| error!("Failed to create catalog tables: {}", e))?;
    config::planner::seed_catalog(&db, &settings).await?;

    // 5. Client-local cache
    let cache_url = database::get_local_cache_url();
    database::ensure_sqlite_dir(&cache_url)?;
    let local = SqliteCache::open(&cache_url).await?;

    // 6. Identity
    let account = config::users::configured_account();
    let mut identity = config::users::local_identity(account.as_ref());
    if let Some(account) = &account {
        if let Err(e) = identity.sign_in(&account.email, &account.password).await {
            warn!("Configured account could not sign in: {}", e);
        }
    } else {
        info!("No PLANNER_USER_EMAIL configured, running signed out.");
    }

    // 7. Restore the bag being edited
    let composition = cache::restore_composition(&local).await?;

    if !cache::has_seen_tour(&local).await? {
        info!(
            "Welcome! Add catalog items to the bag, set a budget or a target bag count, \
             and the procurement plan shows what to buy in bulk."
        );
        cache::mark_tour_completed(&local).await?;
    }

    if let Some(stats) = planner::dashboard_stats(&db, &identity, &composition).await? {
        info!(
            "{} catalog items, {} saved bags, {} lines in the current bag",
            stats.total_items, stats.saved_bags, stats.lines_in_bag
        );
    }

    // 8. Report
    let locale = match env::var("PLANNER_LOCALE").as_deref() {
        Ok("ar") => Locale::Ar,
        _ => Locale::En,
    };
    println!("{}", report::format_bag(&composition, locale));

    let scaling = if composition.total_budget > 0.0 {
        Scaling::Budget
    } else {
        Scaling::Target
    };
    match planner::plan_procurement(
        BagSource::Current(&composition),
        scaling,
        composition.total_budget,
        settings.transport_capacity_kg,
    ) {
        Some(plan) => println!(
            "\n{}",
            report::format_plan(&plan, composition.total_budget, locale)
        ),
        None => info!("Nothing to plan yet: the bag is empty or no bags fit the budget."),
    }

    cache::persist_composition(&local, &composition).await?;
    Ok(())
}
