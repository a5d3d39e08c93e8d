//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create Axum Router with all handlers
//! - Wire up middleware (tracing, request timeout)
//! - Build the shared downstream clients and services
//! - Bind server to listener with graceful shutdown

use std::time::Duration;

use axum::routing::{get, post};
use axum::Router;
use tokio::net::TcpListener;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use crate::clients::{FabricClient, ProgressionClient, SystemIdMapperClient, UserClient};
use crate::config::BffConfig;
use crate::http::handlers;
use crate::services::{AuditService, CaseService, FabricService, ProgressionService, UserService};

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub user: UserService,
    pub case: CaseService,
    pub progression: ProgressionService,
    pub audit: AuditService,
    pub fabric: FabricService,
}

impl AppState {
    /// Build the downstream clients (sharing one connection pool with
    /// the configured per-call timeout) and the services over them.
    pub fn from_config(config: &BffConfig) -> Result<Self, reqwest::Error> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeouts.downstream_secs))
            .build()?;

        let user_client = UserClient::new(http.clone(), &config.cqrs);
        let mapper_client = SystemIdMapperClient::new(http.clone(), &config.cqrs);
        let progression_client = ProgressionClient::new(http.clone(), &config.cqrs);
        let fabric_client = FabricClient::new(http, config.fabric.clone());

        Ok(Self {
            user: UserService::new(user_client.clone()),
            case: CaseService::new(mapper_client.clone()),
            progression: ProgressionService::new(progression_client),
            audit: AuditService::new(user_client, mapper_client),
            fabric: FabricService::new(fabric_client),
        })
    }
}

/// HTTP server for the audit BFF.
pub struct HttpServer {
    router: Router,
    config: BffConfig,
}

impl HttpServer {
    /// Create a new HTTP server with the given configuration.
    pub fn new(config: BffConfig) -> Result<Self, reqwest::Error> {
        let state = AppState::from_config(&config)?;
        let router = Self::build_router(&config, state);
        Ok(Self { router, config })
    }

    /// Build the Axum router with all middleware layers.
    fn build_router(config: &BffConfig, state: AppState) -> Router {
        Router::new()
            .route("/audit/run", post(handlers::audit::run_report))
            .route("/case/urn", get(handlers::case::get_case_id))
            .route("/case/id", get(handlers::case::get_case_urn))
            .route("/material/id", get(handlers::material::get_material))
            .route("/user/email", get(handlers::user::get_users_by_email))
            .route("/user/id", get(handlers::user::get_users_by_id))
            .route("/fabric/capacities", get(handlers::fabric::list_capacities))
            .route(
                "/fabric/capacities/{capacity_name}",
                get(handlers::fabric::get_capacity).delete(handlers::fabric::delete_capacity),
            )
            .route(
                "/fabric/pipeline/execute",
                post(handlers::fabric::execute_pipeline),
            )
            .with_state(state)
            .layer(TimeoutLayer::new(Duration::from_secs(
                config.timeouts.request_secs,
            )))
            .layer(TraceLayer::new_for_http())
    }

    /// Run the server, accepting connections on the given listener.
    pub async fn run(self, listener: TcpListener) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(address = %addr, "HTTP server starting");

        axum::serve(listener, self.router)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }

    /// Get a reference to the config.
    pub fn config(&self) -> &BffConfig {
        &self.config
    }
}

/// Wait for shutdown signal (Ctrl+C).
async fn shutdown_signal() {
    tokio::signal::ctrl_c()
        .await
        .expect("Failed to install Ctrl+C handler");
    tracing::info!("Shutdown signal received");
}
