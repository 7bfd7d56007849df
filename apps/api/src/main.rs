//! Identity gateway API composition root.

#![forbid(unsafe_code)]

mod dto;
mod error;
mod handlers;
mod state;

use std::env;
use std::net::{IpAddr, SocketAddr};
use std::str::FromStr;
use std::sync::Arc;

use axum::Router;
use axum::http::header::CONTENT_TYPE;
use axum::http::{HeaderValue, Method};
use axum::routing::{get, post};
use idgate_application::IdentityGateway;
use idgate_core::GatewayError;
use idgate_infrastructure::{HttpProviderClient, ProviderConfig};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();
    init_tracing();

    let frontend_url =
        env::var("FRONTEND_URL").unwrap_or_else(|_| "http://localhost:3000".to_owned());
    let api_host = env::var("API_HOST").unwrap_or_else(|_| "127.0.0.1".to_owned());
    let api_port = env::var("API_PORT")
        .ok()
        .and_then(|value| value.parse::<u16>().ok())
        .unwrap_or(3001);

    // Local-dev defaults; production deployments must override every
    // credential-bearing value.
    let provider_config = ProviderConfig {
        base_url: env_or("PROVIDER_BASE_URL", "http://localhost:8080"),
        realm: env_or("PROVIDER_REALM", "demo"),
        admin_realm: env_or("PROVIDER_ADMIN_REALM", "master"),
        admin_client_id: env_or("PROVIDER_ADMIN_CLIENT_ID", "admin-cli"),
        admin_username: env_or("PROVIDER_ADMIN_USERNAME", "admin"),
        admin_password: env_or("PROVIDER_ADMIN_PASSWORD", "admin"),
    };

    let provider = Arc::new(HttpProviderClient::new(
        reqwest::Client::new(),
        provider_config,
    )?);
    let app_state = AppState {
        gateway: IdentityGateway::new(provider),
    };

    let cors_layer = CorsLayer::new()
        .allow_origin(
            HeaderValue::from_str(&frontend_url)
                .map_err(|error| GatewayError::Validation(format!("invalid FRONTEND_URL: {error}")))?,
        )
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([CONTENT_TYPE]);

    let app = Router::new()
        .route("/health", get(handlers::health_handler))
        .route("/identity/login", post(handlers::login_handler))
        .route("/identity/register", post(handlers::register_handler))
        .route("/identity/roles", post(handlers::create_role_handler))
        .route(
            "/identity/role-assignments",
            post(handlers::assign_role_handler),
        )
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer)
        .with_state(app_state);

    let host = IpAddr::from_str(&api_host).map_err(|error| {
        GatewayError::Validation(format!("invalid API_HOST '{api_host}': {error}"))
    })?;
    let address = SocketAddr::from((host, api_port));

    let listener = tokio::net::TcpListener::bind(address).await?;

    info!(%address, "idgate-api listening");

    axum::serve(listener, app).await?;

    Ok(())
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .compact()
        .init();
}

fn env_or(name: &str, default: &str) -> String {
    env::var(name)
        .ok()
        .filter(|value| !value.trim().is_empty())
        .unwrap_or_else(|| default.to_owned())
}
