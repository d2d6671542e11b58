use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde::Deserialize;

use crate::{
    auth::Caller,
    error::ApiResult,
    main_lib::AppState,
    models::{BalanceHistoryEntry, NewWallet, Wallet, WalletUpdate},
};

#[derive(Debug, Default, Deserialize)]
struct RoleFilter {
    role: Option<i32>,
    range: Option<i32>,
}

fn list_for(state: &AppState, caller: &Caller, filter: RoleFilter) -> ApiResult<Json<Vec<Wallet>>> {
    let views = state
        .wallet_service
        .list_wallets_for(caller.id(), filter.role, filter.range)?;
    Ok(Json(views.into_iter().map(Wallet::from).collect()))
}

async fn list_wallets(
    caller: Caller,
    State(state): State<Arc<AppState>>,
    Query(filter): Query<RoleFilter>,
) -> ApiResult<Json<Vec<Wallet>>> {
    list_for(&state, &caller, filter)
}

async fn list_wallets_by_role(
    caller: Caller,
    Path(role): Path<i32>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<Vec<Wallet>>> {
    list_for(
        &state,
        &caller,
        RoleFilter {
            role: Some(role),
            range: None,
        },
    )
}

async fn list_wallets_by_role_range(
    caller: Caller,
    Path((role, range)): Path<(i32, i32)>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<Vec<Wallet>>> {
    list_for(
        &state,
        &caller,
        RoleFilter {
            role: Some(role),
            range: Some(range),
        },
    )
}

async fn create_wallet(
    caller: Caller,
    State(state): State<Arc<AppState>>,
    Json(payload): Json<NewWallet>,
) -> ApiResult<(StatusCode, Json<Wallet>)> {
    let view = state
        .wallet_service
        .create_wallet(payload.into(), caller.id())
        .await?;
    Ok((StatusCode::CREATED, Json(view.into())))
}

async fn get_wallet(
    caller: Caller,
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<Wallet>> {
    let view = state.wallet_service.get_wallet(&id, caller.id())?;
    Ok(Json(view.into()))
}

async fn update_wallet(
    caller: Caller,
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
    Json(payload): Json<WalletUpdate>,
) -> ApiResult<Json<Wallet>> {
    let view = state
        .wallet_service
        .update_wallet(&id, caller.id(), payload.into())
        .await?;
    Ok(Json(view.into()))
}

async fn delete_wallet(
    caller: Caller,
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<StatusCode> {
    state.wallet_service.delete_wallet(&id, caller.id()).await?;
    Ok(StatusCode::NO_CONTENT)
}

async fn get_balance_history(
    caller: Caller,
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<Vec<BalanceHistoryEntry>>> {
    let history = state.wallet_service.get_balance_history(&id, caller.id())?;
    Ok(Json(
        history.into_iter().map(BalanceHistoryEntry::from).collect(),
    ))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/wallets", get(list_wallets).post(create_wallet))
        .route("/wallets/role/{role}", get(list_wallets_by_role))
        .route("/wallets/role/{role}/{range}", get(list_wallets_by_role_range))
        .route(
            "/wallets/{id}",
            get(get_wallet).put(update_wallet).delete(delete_wallet),
        )
        .route("/wallets/{id}/balance-history", get(get_balance_history))
}
