use pvc_cabinets_api::config::Config;
use pvc_cabinets_api::db::Database;
use pvc_cabinets_api::delivery::{EmailSender, HttpEmailSender, LogEmailSender};
use pvc_cabinets_api::handlers::AppState;
use pvc_cabinets_api::routes::router;
use pvc_cabinets_api::storage::{LogSubmissionStore, PgSubmissionStore, SubmissionStore};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

async fn shutdown_signal() {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{signal, SignalKind};
        match (
            signal(SignalKind::terminate()),
            signal(SignalKind::interrupt()),
        ) {
            (Ok(mut sigterm), Ok(mut sigint)) => {
                tokio::select! {
                    _ = sigterm.recv() => {}
                    _ = sigint.recv() => {}
                }
            }
            _ => {
                tracing::warn!("Could not register signal handlers, falling back to Ctrl-C");
                let _ = tokio::signal::ctrl_c().await;
            }
        }
    }
    #[cfg(not(unix))]
    {
        let _ = tokio::signal::ctrl_c().await;
    }
    tracing::info!("Shutdown signal received");
}

/// Main entry point for the application.
///
/// This function initializes the application, including:
/// - Logging and tracing.
/// - Configuration loading.
/// - Submission store (Postgres when configured).
/// - Email sender (mail API when configured).
/// - HTTP routes and middleware (CORS, body limit, tracing).
///
/// It then starts the Axum server.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "pvc_cabinets_api=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = Config::from_env()?;

    let store: Arc<dyn SubmissionStore> = match &config.database_url {
        Some(url) => {
            let db = Database::new(url).await?;
            tracing::info!("✓ Database connection pool established");
            Arc::new(PgSubmissionStore::new(db.pool))
        }
        None => Arc::new(LogSubmissionStore),
    };

    let email_sender: Arc<dyn EmailSender> = match (&config.mail_api_url, &config.mail_api_key) {
        (Some(url), Some(key)) => {
            let sender = HttpEmailSender::new(url.clone(), key.clone())?;
            tracing::info!("✓ Mail API client initialized: {}", url);
            Arc::new(sender)
        }
        _ => Arc::new(LogEmailSender),
    };

    let port = config.port;
    let app = router(Arc::new(AppState::new(config, email_sender, store)));

    // Start server
    let addr = format!("0.0.0.0:{}", port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Server listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}
