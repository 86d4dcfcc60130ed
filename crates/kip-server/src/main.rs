//! KIP Kuliah Support Server
//!
//! Student registration lookup and a public question board. Records live in
//! SQLite when it is reachable; otherwise, and whenever a query fails, they
//! are served from an in-memory store seeded with the same data.

mod settings;
mod handlers;
mod services;
mod storage;

use anyhow::{Context, Result};
use axum::{
    routing::{delete, get, put},
    Router,
};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{error, info, warn};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use settings::ServerConfig;
use services::{DiscussionBoard, StudentLookup};
use storage::{Database, FallbackResolver, MemoryStore, Store};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub resolver: Arc<FallbackResolver>,
    pub students: Arc<StudentLookup>,
    pub discussions: Arc<DiscussionBoard>,
}

impl AppState {
    pub fn new(resolver: Arc<FallbackResolver>) -> Self {
        Self {
            students: Arc::new(StudentLookup::new(resolver.clone())),
            discussions: Arc::new(DiscussionBoard::new(resolver.clone())),
            resolver,
        }
    }
}

#[tokio::main]
async fn main() {
    // Set up panic hook to log crashes
    std::panic::set_hook(Box::new(|info| {
        let location = info
            .location()
            .map(|l| format!("{}:{}", l.file(), l.line()));
        let payload = if let Some(s) = info.payload().downcast_ref::<&str>() {
            s.to_string()
        } else if let Some(s) = info.payload().downcast_ref::<String>() {
            s.clone()
        } else {
            "Unknown panic".to_string()
        };
        eprintln!("[PANIC] at {:?}: {}", location, payload);
        tracing::error!("PANIC at {:?}: {}", location, payload);
    }));

    // Initialize tracing
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .finish();
    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("[FATAL] Failed to initialize logging: {}", e);
        std::process::exit(1);
    }

    info!("Starting KIP Kuliah server v{}", env!("CARGO_PKG_VERSION"));

    if let Err(e) = run_server().await {
        error!("Server failed: {:#}", e);
        std::process::exit(1);
    }
}

async fn run_server() -> Result<()> {
    let config = ServerConfig::load().context("Failed to load configuration")?;
    info!(
        "Config loaded: bind={}, db={}",
        config.bind_address, config.database_url
    );

    let database = connect_database(&config).await;
    let primary = match &database {
        Some(db) => Store::Connected(db.clone()),
        None => Store::Unavailable,
    };

    let memory = Arc::new(MemoryStore::new());
    info!(
        "In-memory store ready: {} students, {} discussions",
        memory.student_count(),
        memory.discussion_count()
    );

    let state = AppState::new(Arc::new(FallbackResolver::new(primary, memory)));
    let app = build_router(state);

    let addr: SocketAddr = config
        .bind_address
        .parse()
        .context("Failed to parse bind address")?;
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .context("Failed to bind to address")?;
    info!("Server is running on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    if let Some(db) = database {
        db.close().await;
    }
    info!("Server stopped");

    Ok(())
}

/// Connect once. Any failure leaves the process on the in-memory store for
/// its whole lifetime.
async fn connect_database(config: &ServerConfig) -> Option<Arc<Database>> {
    if !config.persistence_enabled() {
        warn!("No database URL configured, using in-memory store");
        return None;
    }

    let db = match Database::connect(
        &config.database_url,
        config.connect_timeout(),
        config.create_if_missing,
    )
    .await
    {
        Ok(db) => db,
        Err(e) => {
            warn!("Database connection failed, using in-memory store: {}", e);
            return None;
        }
    };

    if let Err(e) = db.bootstrap().await {
        warn!("Database seeding failed, using in-memory store: {}", e);
        db.close().await;
        return None;
    }

    Some(Arc::new(db))
}

fn build_router(state: AppState) -> Router {
    Router::new()
        .nest("/api", api_routes())
        .fallback(handlers::not_found)
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(handlers::health))
        .route("/student", get(handlers::students::list))
        .route("/student/:student_id", get(handlers::students::status))
        .route(
            "/discussion",
            get(handlers::discussions::list).post(handlers::discussions::create),
        )
        .route("/discussion/:id", delete(handlers::discussions::delete))
        .route("/discussion/:id/answer", put(handlers::discussions::answer))
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!("Failed to listen for Ctrl-C: {}", e);
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                error!("Failed to listen for SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
    info!("Shutdown signal received");
}
