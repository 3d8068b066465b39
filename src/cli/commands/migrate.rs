use anyhow::Context;
use serde_json::json;

use crate::cli::OutputFormat;
use crate::config;
use crate::database::DatabaseManager;

pub async fn handle(output_format: OutputFormat) -> anyhow::Result<()> {
    let pool = DatabaseManager::connect(&config::config().database)
        .await
        .context("failed to connect to database")?;

    DatabaseManager::migrate(&pool).await?;
    pool.close().await;

    match output_format {
        OutputFormat::Json => println!("{}", json!({ "migrated": true })),
        OutputFormat::Text => println!("Migrations applied"),
    }
    Ok(())
}
