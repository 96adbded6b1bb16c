use std::sync::Arc;

use anyhow::{Context, Result};
use tokio::io::BufReader;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use prep_client::app::{build_auth, run};
use prep_client::config::ClientConfig;
use prep_client::shell::Shell;
use prep_client::storage::{FileStorage, LocalStorage};

#[tokio::main]
async fn main() -> Result<()> {
    let config = ClientConfig::from_env();

    // Logs go to stderr so they never interleave with screen output.
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!(
                "prep_client={},prep={}",
                config.rust_log, config.rust_log
            ))
        }))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let storage: Arc<dyn LocalStorage> = Arc::new(
        FileStorage::open(config.storage_path.clone())
            .with_context(|| format!("Failed to open {}", config.storage_path.display()))?,
    );
    let auth = build_auth(&config, Arc::clone(&storage))?;

    let mut shell = Shell::new(storage, auth);
    run(
        &mut shell,
        BufReader::new(tokio::io::stdin()),
        &mut tokio::io::stdout(),
    )
    .await
}
