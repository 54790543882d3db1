//! Empty the `responses` table and reset its id sequence.
//!
//! Prints `OK deleted=<n>` with the number of rows that existed beforehand.
//! A missing table is treated as empty.

use std::process::ExitCode;

use survey_api::telemetry;
use survey_db::maintenance::clear_responses;
use survey_db::DatabaseConfig;

#[tokio::main]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();
    telemetry::init_tracing();

    let pool = match DatabaseConfig::from_env().and_then(|config| survey_db::create_pool(&config)) {
        Ok(pool) => pool,
        Err(err) => {
            tracing::error!(error = %err, "Invalid database configuration");
            return ExitCode::FAILURE;
        }
    };

    let result = clear_responses(&pool).await;
    pool.close().await;

    match result {
        Ok(deleted) => {
            println!("OK deleted={deleted}");
            ExitCode::SUCCESS
        }
        Err(err) => {
            tracing::error!(error = %err, "Failed to reset responses table");
            ExitCode::FAILURE
        }
    }
}
