use std::env;

use dotenvy::dotenv;
use tokio::net::TcpListener;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use hr_payroll::api::{AppState, create_router};
use hr_payroll::config::ConfigLoader;

const DEFAULT_CONFIG_DIR: &str = "./config";
const DEFAULT_BIND: &str = "127.0.0.1:3000";

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    dotenv().ok();

    let config_dir = env::var("HR_PAYROLL_CONFIG").unwrap_or_else(|_| DEFAULT_CONFIG_DIR.to_string());
    let bind = env::var("HR_PAYROLL_BIND").unwrap_or_else(|_| DEFAULT_BIND.to_string());

    let config = ConfigLoader::load(&config_dir)
        .inspect_err(|e| error!("Failed to load configuration: {}", e))?;
    info!(
        config_dir = %config_dir,
        overtime_rate = %config.policy().overtime_rate,
        deduction_rate = %config.policy().deduction_rate,
        "Loaded payroll policy"
    );

    let app = create_router(AppState::new(config));
    let listener = TcpListener::bind(&bind)
        .await
        .inspect_err(|e| error!("Failed to bind {}: {}", bind, e))?;
    info!(address = %bind, "HR payroll server listening");

    axum::serve(listener, app).await?;
    Ok(())
}
