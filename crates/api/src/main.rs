use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use nextif_api::config::ServerConfig;
use nextif_api::notifications::NotificationDispatcher;
use nextif_api::router::build_app_router;
use nextif_api::state::AppState;
use nextif_events::{EmailConfig, EventBus, Mailer, NoopMailer, SmtpMailer};

fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "nextif_api=debug,tower_http=debug".into());
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}

/// Pick the outbound mailer: real SMTP when configured, a logging no-op
/// otherwise, so development never needs a mail server.
fn build_mailer() -> Arc<dyn Mailer> {
    match EmailConfig::from_env() {
        Some(email_config) => {
            tracing::info!(host = %email_config.smtp_host, "SMTP mailer configured");
            Arc::new(SmtpMailer::new(email_config))
        }
        None => {
            tracing::warn!("SMTP_HOST not set, notification emails will be dropped");
            Arc::new(NoopMailer)
        }
    }
}

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    init_tracing();

    let config = ServerConfig::from_env();
    tracing::info!(host = %config.host, port = %config.port, "Configuration loaded");

    // Database: connect, probe, migrate. Any failure here is fatal.
    let database_url = std::env::var("DATABASE_URL").expect("DATABASE_URL is not set");
    let pool = nextif_db::create_pool(&database_url)
        .await
        .expect("Could not open the database pool");
    nextif_db::health_check(&pool)
        .await
        .expect("Database probe failed at startup");
    nextif_db::run_migrations(&pool)
        .await
        .expect("Migrations did not apply cleanly");
    tracing::info!("Database ready, migrations applied");

    // Side-effect pipeline: handlers publish onto the bus, the dispatcher
    // turns events into inbox rows and emails off the request path.
    let event_bus = Arc::new(EventBus::default());
    let dispatcher = NotificationDispatcher::new(pool.clone(), build_mailer());
    let dispatcher_handle = tokio::spawn(dispatcher.run(event_bus.subscribe()));
    tracing::info!("Notification dispatcher started");

    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
        event_bus: Arc::clone(&event_bus),
    };
    let app = build_app_router(state, &config);

    let addr = SocketAddr::new(
        config.host.parse().expect("HOST is not a valid IP address"),
        config.port,
    );
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Could not bind the listen address");
    tracing::info!(%addr, "Server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("Server exited with an error");

    // Connections are drained. Dropping the bus closes the broadcast
    // channel, which tells the dispatcher to finish its queue and exit;
    // give it a bounded window rather than waiting forever.
    tracing::info!("Server stopped accepting connections, draining dispatcher");
    drop(event_bus);
    let _ = tokio::time::timeout(
        Duration::from_secs(config.shutdown_timeout_secs),
        dispatcher_handle,
    )
    .await;

    tracing::info!("Shutdown complete");
}

/// Resolve when the process is told to stop: SIGINT from a terminal, or
/// SIGTERM from a process manager.
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("SIGINT handler could not be installed");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("SIGTERM handler could not be installed")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            tracing::info!("Received SIGINT, shutting down");
        }
        () = terminate => {
            tracing::info!("Received SIGTERM, shutting down");
        }
    }
}
