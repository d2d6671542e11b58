use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{delete, get, post},
    Json, Router,
};
use keibo_core::access::NewInvitation as CoreInvitation;

use crate::{
    auth::Caller,
    error::ApiResult,
    main_lib::AppState,
    models::{NewInvitation, WalletAccess},
};

async fn list_members(
    caller: Caller,
    Path(wallet_id): Path<String>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<Vec<WalletAccess>>> {
    let members = state.access_service.list_members(&wallet_id, caller.id())?;
    Ok(Json(members.into_iter().map(WalletAccess::from).collect()))
}

async fn invite_user(
    caller: Caller,
    Path(wallet_id): Path<String>,
    State(state): State<Arc<AppState>>,
    Json(payload): Json<NewInvitation>,
) -> ApiResult<(StatusCode, Json<WalletAccess>)> {
    let invitation = CoreInvitation::try_from(payload)?;
    let access = state
        .access_service
        .invite_user(&wallet_id, caller.id(), invitation)
        .await?;
    Ok((StatusCode::CREATED, Json(access.into())))
}

async fn revoke_access(
    caller: Caller,
    Path((wallet_id, user_id)): Path<(String, String)>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<StatusCode> {
    state
        .access_service
        .revoke_access(&wallet_id, caller.id(), &user_id)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

async fn list_invitations(
    caller: Caller,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<Vec<WalletAccess>>> {
    let pending = state.access_service.list_invitations(caller.id())?;
    Ok(Json(pending.into_iter().map(WalletAccess::from).collect()))
}

async fn accept_invitation(
    caller: Caller,
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<WalletAccess>> {
    let access = state
        .access_service
        .accept_invitation(&id, caller.id())
        .await?;
    Ok(Json(access.into()))
}

async fn decline_invitation(
    caller: Caller,
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<StatusCode> {
    state
        .access_service
        .decline_invitation(&id, caller.id())
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/wallets/{id}/members", get(list_members))
        .route("/wallets/{id}/members/{user_id}", delete(revoke_access))
        .route("/wallets/{id}/invitations", post(invite_user))
        .route("/invitations", get(list_invitations))
        .route("/invitations/{id}", delete(decline_invitation))
        .route("/invitations/{id}/accept", post(accept_invitation))
}
