use std::future::Future;
use std::net::{SocketAddr, TcpListener};
use std::sync::Arc;

use axum::routing::{get, put};
use axum::Router;
use http::Method;
use log::{error, info, warn};
use tokio::signal;
use tower_http::cors::{Any, CorsLayer};

use crate::config::{Config, StoreKind};
use crate::error::ServiceError;
use crate::routes;
use crate::store::{LinkStore, MemoryLinkStore, PgLinkStore};

pub type SharedStore = Arc<dyn LinkStore>;

pub fn router(store: SharedStore) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers(Any);

    Router::new()
        .route("/", get(routes::liveness))
        .route(
            "/api/links",
            get(routes::list_links).post(routes::create_link),
        )
        .route(
            "/api/links/:id",
            put(routes::update_link).delete(routes::delete_link),
        )
        .layer(cors)
        .with_state(store)
}

/// Serves the API on an already bound listener until `shutdown` resolves.
pub async fn serve<F>(
    store: SharedStore,
    listener: TcpListener,
    shutdown: F,
) -> Result<(), hyper::Error>
where
    F: Future<Output = ()>,
{
    if let Ok(addr) = listener.local_addr() {
        info!("Server running on {addr}");
    }

    axum::Server::from_tcp(listener)?
        .serve(router(store).into_make_service_with_connect_info::<SocketAddr>())
        .with_graceful_shutdown(shutdown)
        .await
}

pub async fn connect_store(config: &Config) -> Result<SharedStore, ServiceError> {
    match config.store {
        StoreKind::Memory => {
            warn!("Using the in-memory link store, links will not survive a restart");
            Ok(Arc::new(MemoryLinkStore::new()))
        }
        StoreKind::Postgres => {
            let store =
                PgLinkStore::connect(&config.database_url, config.max_db_connections).await?;
            info!("Database connected");
            store.migrate().await?;
            info!("Schema ready");
            Ok(Arc::new(store))
        }
    }
}

pub async fn run(config: Config) -> Result<(), ServiceError> {
    let store = connect_store(&config).await?;

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    let listener = TcpListener::bind(addr).map_err(ServiceError::Bind)?;

    serve(store, listener, shutdown_signal()).await?;
    Ok(())
}

async fn shutdown_signal() {
    let interrupt = async {
        if let Err(err) = signal::ctrl_c().await {
            error!("failed to listen for SIGINT: {err}");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut term) => {
                term.recv().await;
            }
            Err(err) => {
                error!("failed to listen for SIGTERM: {err}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = interrupt => {},
        _ = terminate => {},
    }

    info!("Shutting down gracefully...");
}
