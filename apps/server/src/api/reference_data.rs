use std::sync::Arc;

use axum::{
    extract::{Path, State},
    routing::get,
    Json, Router,
};

use crate::{
    auth::Caller,
    error::ApiResult,
    main_lib::AppState,
    models::{Asset, EconomicIndex},
};

async fn list_assets(
    _caller: Caller,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<Vec<Asset>>> {
    let assets = state.asset_service.list_assets()?;
    Ok(Json(assets.into_iter().map(Asset::from).collect()))
}

async fn get_asset(
    _caller: Caller,
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<Asset>> {
    let asset = state.asset_service.get_asset(&id)?;
    Ok(Json(asset.into()))
}

async fn list_economic_indices(
    _caller: Caller,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<Vec<EconomicIndex>>> {
    let indices = state.economic_index_service.list_indices()?;
    Ok(Json(indices.into_iter().map(EconomicIndex::from).collect()))
}

async fn get_economic_index(
    _caller: Caller,
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<EconomicIndex>> {
    let index = state.economic_index_service.get_index(&id)?;
    Ok(Json(index.into()))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/assets", get(list_assets))
        .route("/assets/{id}", get(get_asset))
        .route("/economic-indices", get(list_economic_indices))
        .route("/economic-indices/{id}", get(get_economic_index))
}
