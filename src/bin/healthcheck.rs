//! Standalone health probe.
//!
//! Connects to the configured storage backend the same way the API server does, prints a
//! report and exits 0 when healthy, 1 otherwise. Suitable for container health checks.

use chrono::{SecondsFormat, Utc};
use person_rest_api::app::{check_storage, StorageHealth};
use person_rest_api::infra::config::Settings;
use person_rest_api::storage;

fn usage_and_exit() -> ! {
    eprintln!(
        "Usage: cargo run --bin healthcheck\n\
         \n\
         Reads the same env vars as the API server:\n\
           STORAGE_BACKEND, DATABASE_URL, DATABASE_MAX_CONNECTIONS, APP_NAME, APP_VERSION\n"
    );
    std::process::exit(2);
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args: Vec<String> = std::env::args().skip(1).collect();
    if args.iter().any(|a| a == "-h" || a == "--help") {
        usage_and_exit();
    }

    let settings = Settings::from_env()?;

    println!("Running healthcheck...");
    println!("{}", "-".repeat(50));

    let health = match storage::connect(&settings).await {
        Ok(store) => check_storage(store.as_ref()).await,
        Err(e) => StorageHealth {
            healthy: false,
            backend: settings.storage.as_str(),
            error: Some(format!("{:#}", e)),
        },
    };

    println!("Status: {}", health.status().to_uppercase());
    println!("Service: {}", settings.app_name);
    println!("Version: {}", settings.app_version);
    println!(
        "Timestamp: {}",
        Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
    );
    println!();
    println!("Database Status: {}", health.status());
    println!("Database Connection: {}", health.connection());
    println!("Backend: {}", health.backend);
    if let Some(err) = &health.error {
        println!("Error: {}", err);
    }
    println!("{}", "-".repeat(50));

    if health.healthy {
        println!("All systems healthy");
        Ok(())
    } else {
        println!("System unhealthy");
        std::process::exit(1);
    }
}
