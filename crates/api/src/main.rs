use std::net::SocketAddr;
use std::sync::Arc;

use inkwell_api::config::{ServerConfig, StorageBackend};
use inkwell_api::router::build_app_router;
use inkwell_api::state::AppState;
use inkwell_db::Repositories;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

const DEFAULT_LOG_FILTER: &str = "inkwell_api=debug,inkwell_db=debug,tower_http=debug";

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    init_tracing();

    let config = ServerConfig::from_env();
    tracing::info!(
        host = %config.host,
        port = config.port,
        storage = ?config.storage,
        cors_origins = ?config.cors_origins,
        "Configuration loaded"
    );

    let repos = match config.storage {
        StorageBackend::Postgres => open_postgres().await,
        StorageBackend::Memory => {
            tracing::warn!("STORAGE=memory: all data is dropped when the process exits");
            Repositories::in_memory()
        }
    };

    let addr = SocketAddr::new(
        config.host.parse().expect("HOST must be an IP address"),
        config.port,
    );
    let state = AppState {
        config: Arc::new(config.clone()),
        repos,
    };
    let app = build_app_router(state, &config);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind listener");
    tracing::info!(%addr, "Inkwell API listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("Server error");

    tracing::info!("Server stopped");
}

/// `RUST_LOG` overrides the default filter. `LOG_FORMAT=json` switches to
/// one JSON object per line.
fn init_tracing() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));
    let json = std::env::var("LOG_FORMAT").is_ok_and(|format| format.eq_ignore_ascii_case("json"));

    let registry = tracing_subscriber::registry().with(filter);
    if json {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }
}

/// Pool, connectivity probe and migrations for `STORAGE=postgres`.
async fn open_postgres() -> Repositories {
    let url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set");

    let pool = inkwell_db::create_pool(&url)
        .await
        .expect("Failed to connect to database");
    inkwell_db::health_check(&pool)
        .await
        .expect("Database is not answering");
    inkwell_db::run_migrations(&pool)
        .await
        .expect("Failed to run database migrations");
    tracing::info!("Database ready, migrations applied");

    Repositories::postgres(pool)
}

/// Resolves on Ctrl-C, or SIGTERM on unix.
async fn shutdown_signal() {
    let interrupt = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to listen for Ctrl-C");
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{signal, SignalKind};
        signal(SignalKind::terminate())
            .expect("Failed to listen for SIGTERM")
            .recv()
            .await;
    };
    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    let received = tokio::select! {
        () = interrupt => "SIGINT",
        () = terminate => "SIGTERM",
    };
    tracing::info!(signal = received, "Shutting down");
}
