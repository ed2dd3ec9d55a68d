//! openmrs: interactive OpenMRS patient-management client.

use std::process::ExitCode;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use openmrs_client::{Config, OpenMrsClient, Shell};

#[tokio::main]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();

    // Initialize tracing on stderr; stdout belongs to the menu
    let filter = tracing_subscriber::EnvFilter::new(
        std::env::var("RUST_LOG").unwrap_or_else(|_| "warn,openmrs_client=info".into()),
    );
    let fmt = tracing_subscriber::fmt::layer().with_writer(std::io::stderr);
    let registry = tracing_subscriber::registry().with(filter);
    if std::env::var("OPENMRS_LOG_FORMAT").is_ok_and(|f| f.eq_ignore_ascii_case("json")) {
        registry.with(fmt.json()).init();
    } else {
        registry.with(fmt).init();
    }

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            tracing::error!(error = %e, "Invalid configuration");
            return ExitCode::FAILURE;
        }
    };
    tracing::info!(base_url = %config.base_url, "Connecting to OpenMRS");

    let client = match OpenMrsClient::new(config) {
        Ok(client) => client,
        Err(e) => {
            tracing::error!(error = %e, "Failed to create HTTP client");
            return ExitCode::FAILURE;
        }
    };

    let stdin = std::io::stdin();
    let mut shell = Shell::new(client, stdin.lock(), std::io::stdout());
    match shell.run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, "Shell exited with an error");
            ExitCode::FAILURE
        }
    }
}
