use std::sync::Arc;

use axum::{
    http::{HeaderValue, Method},
    routing::get,
    Json, Router,
};
use tower_http::{
    compression::CompressionLayer,
    cors::{AllowOrigin, Any, CorsLayer},
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};
use utoipa::OpenApi;

use crate::{config::Config, main_lib::AppState, models};

pub mod access;
pub mod health;
pub mod reference_data;
pub mod transactions;
pub mod wallets;

#[derive(OpenApi)]
#[openapi(components(schemas(
    models::Wallet,
    models::NewWallet,
    models::WalletUpdate,
    models::BalanceHistoryEntry,
    models::WalletAccess,
    models::NewInvitation,
    models::Transaction,
    models::NewTransaction,
    models::TransactionUpdate,
    models::Asset,
    models::EconomicIndex,
)))]
struct ApiDoc;

async fn openapi() -> Json<utoipa::openapi::OpenApi> {
    let mut doc = ApiDoc::openapi();
    doc.info.title = "Keibo".to_string();
    doc.info.version = env!("CARGO_PKG_VERSION").to_string();
    Json(doc)
}

fn cors_layer(config: &Config) -> CorsLayer {
    let origin = if config.cors_allow_origins.iter().any(|o| o == "*") {
        AllowOrigin::any()
    } else {
        let origins: Vec<HeaderValue> = config
            .cors_allow_origins
            .iter()
            .filter_map(|o| match o.parse() {
                Ok(value) => Some(value),
                Err(_) => {
                    tracing::warn!("Ignoring invalid CORS origin '{}'", o);
                    None
                }
            })
            .collect();
        AllowOrigin::list(origins)
    };

    CorsLayer::new()
        .allow_origin(origin)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::PATCH,
            Method::DELETE,
        ])
        .allow_headers(Any)
}

pub fn app_router(state: Arc<AppState>, config: &Config) -> Router {
    let api = Router::new()
        .merge(health::router())
        .merge(wallets::router())
        .merge(access::router())
        .merge(transactions::router())
        .merge(reference_data::router())
        .route("/openapi.json", get(openapi));

    Router::new()
        .nest("/api/v1", api)
        .layer(CompressionLayer::new())
        .layer(TimeoutLayer::new(config.request_timeout))
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer(config))
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
        .with_state(state)
}
