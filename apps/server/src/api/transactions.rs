use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use keibo_core::transactions::TransactionFilter;
use serde::Deserialize;

use crate::{
    auth::Caller,
    error::ApiResult,
    main_lib::AppState,
    models::{NewTransaction, Transaction, TransactionUpdate},
};

#[derive(Debug, Default, Deserialize)]
struct CreateQuery {
    /// Record history only; balances stay as they are.
    #[serde(default)]
    retro: bool,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ListQuery {
    wallet_id: Option<String>,
    category: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct CategoryQuery {
    category: Option<String>,
}

fn to_dtos(transactions: Vec<keibo_core::transactions::Transaction>) -> Json<Vec<Transaction>> {
    Json(transactions.into_iter().map(Transaction::from).collect())
}

async fn list_transactions(
    caller: Caller,
    State(state): State<Arc<AppState>>,
    Query(query): Query<ListQuery>,
) -> ApiResult<Json<Vec<Transaction>>> {
    let filter = TransactionFilter {
        wallet_id: query.wallet_id,
        category: query.category,
    };
    let transactions = state
        .transaction_service
        .list_transactions(caller.id(), filter)?;
    Ok(to_dtos(transactions))
}

async fn list_wallet_transactions(
    caller: Caller,
    Path(wallet_id): Path<String>,
    State(state): State<Arc<AppState>>,
    Query(query): Query<CategoryQuery>,
) -> ApiResult<Json<Vec<Transaction>>> {
    let filter = TransactionFilter {
        wallet_id: Some(wallet_id),
        category: query.category,
    };
    let transactions = state
        .transaction_service
        .list_transactions(caller.id(), filter)?;
    Ok(to_dtos(transactions))
}

async fn create_transaction(
    caller: Caller,
    State(state): State<Arc<AppState>>,
    Query(query): Query<CreateQuery>,
    Json(payload): Json<NewTransaction>,
) -> ApiResult<(StatusCode, Json<Transaction>)> {
    let transaction = state
        .transaction_service
        .create_transaction(caller.id(), payload.into(), query.retro)
        .await?;
    Ok((StatusCode::CREATED, Json(transaction.into())))
}

async fn get_transaction(
    caller: Caller,
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<Transaction>> {
    let transaction = state.transaction_service.get_transaction(caller.id(), &id)?;
    Ok(Json(transaction.into()))
}

async fn update_transaction(
    caller: Caller,
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
    Json(payload): Json<TransactionUpdate>,
) -> ApiResult<Json<Transaction>> {
    let transaction = state
        .transaction_service
        .update_transaction(caller.id(), &id, payload.into())
        .await?;
    Ok(Json(transaction.into()))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route(
            "/transactions",
            get(list_transactions).post(create_transaction),
        )
        .route(
            "/transactions/{id}",
            get(get_transaction).patch(update_transaction),
        )
        .route("/wallets/{id}/transactions", get(list_wallet_transactions))
}
