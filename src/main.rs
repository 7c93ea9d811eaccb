//! HTTP server for the Cashflow Engine.
//!
//! Settings are read from the environment:
//!
//! - `CASHFLOW_CONFIG_DIR`: configuration directory (default `./config/gb`)
//! - `CASHFLOW_BIND_ADDR`: listen address (default `127.0.0.1:3000`)
//! - `CASHFLOW_CRON_SECRET`: bearer token for `/cron/reminders`
//! - `CASHFLOW_RECORDS_FILE`: JSON array of recurring records for reminders

use std::env;
use std::error::Error;
use std::sync::Once;

use cashflow_engine::api::{AppState, create_router};
use cashflow_engine::config::ConfigLoader;
use cashflow_engine::reminders::InMemoryRepository;
use tokio::net::TcpListener;
use tracing::{info, warn};

const DEFAULT_CONFIG_DIR: &str = "./config/gb";
const DEFAULT_BIND_ADDR: &str = "127.0.0.1:3000";

static TRACING_INIT: Once = Once::new();

fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{EnvFilter, fmt};

        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new("cashflow_engine=info"));

        fmt().with_env_filter(filter).init();
    });
}

struct Settings {
    config_dir: String,
    bind_addr: String,
    cron_secret: Option<String>,
    records_file: Option<String>,
}

impl Settings {
    fn from_env() -> Self {
        Self {
            config_dir: env::var("CASHFLOW_CONFIG_DIR").unwrap_or_else(|_| DEFAULT_CONFIG_DIR.to_string()),
            bind_addr: env::var("CASHFLOW_BIND_ADDR").unwrap_or_else(|_| DEFAULT_BIND_ADDR.to_string()),
            cron_secret: env::var("CASHFLOW_CRON_SECRET").ok().filter(|s| !s.is_empty()),
            records_file: env::var("CASHFLOW_RECORDS_FILE").ok().filter(|s| !s.is_empty()),
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    init_tracing();
    let settings = Settings::from_env();

    let config = ConfigLoader::load(&settings.config_dir)?;
    info!(
        config_dir = %settings.config_dir,
        jurisdiction = config.calendar().jurisdiction(),
        holidays = config.calendar().len(),
        "Configuration loaded"
    );

    let mut state = AppState::new(config);

    if let Some(path) = &settings.records_file {
        let repository = InMemoryRepository::from_json_file(path)?;
        info!(records_file = %path, "Loaded recurring records");
        state = state.with_records(repository);
    }

    match settings.cron_secret {
        Some(secret) => state = state.with_cron_secret(secret),
        None => warn!("CASHFLOW_CRON_SECRET not set; /cron/reminders will reject every request"),
    }

    let listener = TcpListener::bind(settings.bind_addr.as_str()).await?;
    info!(bind_addr = %settings.bind_addr, "Cashflow Engine listening");

    axum::serve(listener, create_router(state)).await?;
    Ok(())
}
