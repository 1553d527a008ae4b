use chrono::Utc;
use dotenvy::dotenv;
use std::env;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;
use wedding_bookings::{
    api,
    config::{self, database},
    errors::{Error, Result},
};

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    // 1. Initialize tracing (as early as possible)
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // 2. Load .env file; env vars can also be set externally
    dotenv().ok();

    // 3. Load the application configuration
    let app_config = config::load_default_config()
        .inspect_err(|e| error!("Failed to load configuration: {}", e))?;

    // 4. Connect and make sure the schema exists
    let db = database::create_connection()
        .await
        .inspect_err(|e| error!("Failed to connect to database: {}", e))?;
    database::create_tables(&db).await?;
    info!("Database initialized successfully.");

    // 5. Print the dashboard of the requested couple
    let couple_id = env::args().nth(1).ok_or_else(|| Error::Config {
        message: "usage: wedding-bookings <couple-id>".to_string(),
    })?;

    let dashboard = api::couple_dashboard(&db, &couple_id, &app_config, Utc::now()).await?;
    println!("{}", serde_json::to_string_pretty(&dashboard)?);

    Ok(())
}
