//! Deadline Cache - interactive shell
//!
//! Reads cache commands from stdin and writes JSON replies to stdout.

use tokio::io::{self, BufReader};
use tokio::{runtime, signal};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use deadline_cache::{Config, Session, SharedCache};

/// Main entry point for the cache shell.
///
/// # Startup Sequence
/// 1. Initialize tracing subscriber for logging (stderr)
/// 2. Load configuration from environment variables
/// 3. Create an empty shared cache
/// 4. Run the session until `quit`, end of input or Ctrl+C / SIGTERM
///
/// The runtime is built by hand so it can be shut down without waiting on a
/// stdin read that is still blocked in the blocking pool.
fn main() -> anyhow::Result<()> {
    // Defaults to "info" level, can be overridden with RUST_LOG env var
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "deadline_cache=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = Config::from_env();
    info!(
        "Configuration loaded: prompt={:?}, stats_on_exit={}",
        config.prompt, config.stats_on_exit
    );

    let runtime = runtime::Builder::new_multi_thread().enable_all().build()?;

    let result = runtime.block_on(async {
        let session = Session::new(SharedCache::new(), config);
        let stdin = BufReader::new(io::stdin());
        session
            .run_until(stdin, io::stdout(), shutdown_signal())
            .await
    });

    runtime.shutdown_background();
    info!("Session closed");
    result
}

/// Waits for a shutdown signal (Ctrl+C or SIGTERM).
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = signal::ctrl_c().await {
            warn!("Failed to listen for Ctrl+C: {}", err);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(err) => {
                warn!("Failed to install SIGTERM handler: {}", err);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, shutting down...");
        }
        _ = terminate => {
            info!("Received SIGTERM, shutting down...");
        }
    }
}
