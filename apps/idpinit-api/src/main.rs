//! idpinit API
//!
//! Serves the unsolicited (IdP-initiated) SAML 2.0 SSO endpoint and hands
//! synthesized requests to the configured login flow.

mod config;
mod logging;
mod openapi;

use axum::{routing::get, Json, Router};
use config::Config;
use idpinit_api_saml::{
    unsolicited_router, CachingMetadataResolver, InMemoryServiceRegistry, LoginRedirectInitiator,
    SecureRandom, UnsolicitedSsoConfig, UnsolicitedSsoState,
};
use openapi::openapi_routes;
use serde::Serialize;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::signal;
use tower_http::trace::TraceLayer;
use tracing::info;

#[tokio::main]
async fn main() {
    // Load configuration (fail-fast on missing required values)
    let config = match Config::from_env() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    };

    logging::init_logging(&config.rust_log);

    info!(
        version = env!("CARGO_PKG_VERSION"),
        host = %config.host,
        port = config.port,
        "Starting idpinit API"
    );

    // Fail fast if the OS entropy source is unusable
    if let Err(e) = SecureRandom::global().self_check() {
        tracing::error!("FATAL: Secure random source unavailable: {e}");
        std::process::exit(1);
    }

    let services_json = match tokio::fs::read_to_string(&config.services_file).await {
        Ok(s) => s,
        Err(e) => {
            tracing::error!(
                path = %config.services_file.display(),
                "Failed to read service registrations: {e}"
            );
            std::process::exit(1);
        }
    };
    let registry = match InMemoryServiceRegistry::from_json(&services_json) {
        Ok(r) => r,
        Err(e) => {
            tracing::error!(
                path = %config.services_file.display(),
                "Invalid service registrations: {e}"
            );
            std::process::exit(1);
        }
    };
    info!(services = registry.len().await, "Service registry loaded");

    let state = UnsolicitedSsoState::new(
        Arc::new(registry),
        Arc::new(CachingMetadataResolver::new(&config.metadata_cache)),
        Arc::new(LoginRedirectInitiator::new(config.login_url.clone())),
    );

    let app = build_app(state, &UnsolicitedSsoConfig::default());

    let addr: SocketAddr = match format!("{}:{}", config.host, config.port).parse() {
        Ok(a) => a,
        Err(e) => {
            tracing::error!("Invalid bind address '{}:{}': {e}", config.host, config.port);
            std::process::exit(1);
        }
    };

    info!(%addr, "Server listening");

    let listener = match tokio::net::TcpListener::bind(addr).await {
        Ok(l) => l,
        Err(e) => {
            tracing::error!("Failed to bind to address {addr}: {e}");
            std::process::exit(1);
        }
    };

    if let Err(e) = axum::serve(listener, app.into_make_service())
        .with_graceful_shutdown(shutdown_signal())
        .await
    {
        tracing::error!("Server error: {e}");
        std::process::exit(1);
    }

    info!("Server shutdown complete");
}

#[derive(Debug, Serialize)]
struct HealthResponse {
    status: &'static str,
    version: &'static str,
}

async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}

fn build_app(state: UnsolicitedSsoState, sso_config: &UnsolicitedSsoConfig) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .merge(unsolicited_router(state, sso_config))
        .merge(openapi_routes())
        .layer(TraceLayer::new_for_http())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {e}");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            info!("Received Ctrl+C, initiating graceful shutdown");
        }
        () = terminate => {
            info!("Received SIGTERM, initiating graceful shutdown");
        }
    }
}
