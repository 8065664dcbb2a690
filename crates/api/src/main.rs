use std::net::SocketAddr;
use std::sync::Arc;

use marquee_api::config::{LogFormat, ServerConfig, StoreBackend};
use marquee_api::movies::MovieService;
use marquee_api::router::build_app_router;
use marquee_api::state::AppState;
use marquee_db::memory::{MemoryAnnotationRepo, MemoryMovieRepo};
use marquee_db::repositories::{PgAnnotationRepo, PgMovieRepo};
use marquee_db::{AnnotationRepository, DbPool, MovieRepository, UserAnnotationStore};
use marquee_tmdb::{CatalogClient, TmdbApi, TmdbConfig};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    // --- Configuration ---
    let config = ServerConfig::from_env();

    // --- Tracing ---
    let (text_layer, json_layer) = match config.log_format {
        LogFormat::Text => (Some(tracing_subscriber::fmt::layer()), None),
        LogFormat::Json => (None, Some(tracing_subscriber::fmt::layer().json())),
    };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "marquee_api=debug,marquee_db=debug,marquee_tmdb=debug,tower_http=debug".into()
            }),
        )
        .with(text_layer)
        .with(json_layer)
        .init();

    tracing::info!(
        host = %config.host,
        port = %config.port,
        backend = ?config.store.backend,
        "Loaded server configuration"
    );

    // --- Store ---
    let (pool, movie_repo, annotation_repo) = match config.store.backend {
        StoreBackend::Postgres => {
            let pool = connect_database(&config).await;
            let movies: Arc<dyn MovieRepository> = Arc::new(PgMovieRepo::new(pool.clone()));
            let annotations: Arc<dyn AnnotationRepository> =
                Arc::new(PgAnnotationRepo::new(pool.clone()));
            (Some(pool), movies, annotations)
        }
        StoreBackend::Memory => {
            tracing::warn!("In-memory store selected; nothing will be persisted");
            let movies: Arc<dyn MovieRepository> = Arc::new(MemoryMovieRepo::new());
            let annotations: Arc<dyn AnnotationRepository> = Arc::new(MemoryAnnotationRepo::new());
            (None, movies, annotations)
        }
    };

    // --- Catalog ---
    let catalog: Arc<dyn CatalogClient> = Arc::new(
        TmdbApi::new(TmdbConfig::from_env()).expect("Failed to build catalog client"),
    );
    tracing::info!("Catalog client ready");

    // --- App state ---
    let annotations = UserAnnotationStore::new(annotation_repo);
    let service = MovieService::new(catalog, movie_repo, annotations);
    let state = AppState::new(config.clone(), service);

    // --- Router ---
    let app = build_app_router(state, &config);

    // --- Start server ---
    let addr = SocketAddr::new(
        config.host.parse().expect("Invalid HOST address"),
        config.port,
    );
    tracing::info!(%addr, "Starting server");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind to address");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("Server error");

    // --- Post-shutdown cleanup ---
    tracing::info!("Server stopped accepting connections, cleaning up");

    if let Some(pool) = pool {
        pool.close().await;
        tracing::info!("Database pool closed");
    }

    tracing::info!("Graceful shutdown complete");
}

/// Connect, verify, and migrate the PostgreSQL store.
async fn connect_database(config: &ServerConfig) -> DbPool {
    let database_url = config
        .store
        .database_url
        .as_deref()
        .expect("DATABASE_URL must be set");

    let pool = marquee_db::create_pool(database_url, config.store.max_connections)
        .await
        .expect("Failed to connect to database");
    tracing::info!("Database connection pool created");

    marquee_db::health_check(&pool)
        .await
        .expect("Database health check failed");
    tracing::info!("Database health check passed");

    marquee_db::run_migrations(&pool)
        .await
        .expect("Failed to run database migrations");
    tracing::info!("Database migrations applied");

    pool
}

/// Wait for a termination signal to initiate graceful shutdown.
///
/// Handles both SIGINT (Ctrl-C) and SIGTERM (on Unix).
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl-C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => tracing::info!("Received SIGINT, starting graceful shutdown"),
        () = terminate => tracing::info!("Received SIGTERM, starting graceful shutdown"),
    }
}
