use std::sync::Arc;

use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

use keibo_core::{
    access::{AccessService, AccessServiceTrait},
    assets::{AssetService, AssetServiceTrait},
    economic_indices::{EconomicIndexService, EconomicIndexServiceTrait},
    ingestion::ReferenceDataPipeline,
    transactions::{TransactionService, TransactionServiceTrait},
    wallets::{WalletService, WalletServiceTrait},
};
use keibo_storage_sqlite::{
    access::AccessRepository,
    assets::AssetRepository,
    db::{self, DbPool},
    economic_indices::EconomicIndexRepository,
    transactions::TransactionRepository,
    wallets::WalletRepository,
};

use crate::{auth::AuthManager, config::Config};

pub struct AppState {
    pub pool: Arc<DbPool>,
    pub db_path: String,
    pub wallet_service: Arc<dyn WalletServiceTrait>,
    pub access_service: Arc<dyn AccessServiceTrait>,
    pub transaction_service: Arc<dyn TransactionServiceTrait>,
    pub asset_service: Arc<dyn AssetServiceTrait>,
    pub economic_index_service: Arc<dyn EconomicIndexServiceTrait>,
    pub pipeline: Arc<ReferenceDataPipeline>,
    pub auth: Arc<AuthManager>,
}

pub fn init_tracing() {
    let log_format = std::env::var("KEIBO_LOG_FORMAT").unwrap_or_else(|_| "text".to_string());
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let registry = tracing_subscriber::registry().with(filter);

    if log_format.eq_ignore_ascii_case("json") {
        registry
            .with(fmt::layer().json().with_current_span(false))
            .init();
    } else {
        registry
            .with(fmt::layer().with_target(true).with_line_number(true))
            .init();
    }
}

pub async fn build_state(config: &Config) -> anyhow::Result<Arc<AppState>> {
    let db_path = db::init(&config.db_path)?;
    tracing::info!("Database path in use: {}", db_path);

    let pool = db::create_pool(&db_path)?;
    db::run_migrations(&pool)?;
    let writer = db::spawn_writer((*pool).clone());

    let asset_repository = Arc::new(AssetRepository::new(pool.clone(), writer.clone()));
    let index_repository = Arc::new(EconomicIndexRepository::new(pool.clone(), writer.clone()));
    let wallet_repository = Arc::new(WalletRepository::new(pool.clone(), writer.clone()));
    let access_repository = Arc::new(AccessRepository::new(pool.clone(), writer.clone()));
    let transaction_repository =
        Arc::new(TransactionRepository::new(pool.clone(), writer.clone()));

    let asset_service: Arc<dyn AssetServiceTrait> =
        Arc::new(AssetService::new(asset_repository.clone()));
    let economic_index_service: Arc<dyn EconomicIndexServiceTrait> =
        Arc::new(EconomicIndexService::new(index_repository));

    let wallet_service: Arc<dyn WalletServiceTrait> = Arc::new(WalletService::new(
        wallet_repository.clone(),
        access_repository.clone(),
        asset_repository,
    ));
    let access_service: Arc<dyn AccessServiceTrait> = Arc::new(AccessService::new(
        access_repository.clone(),
        wallet_repository.clone(),
    ));
    let transaction_service: Arc<dyn TransactionServiceTrait> =
        Arc::new(TransactionService::new(
            transaction_repository,
            wallet_repository,
            access_repository,
        ));

    let pipeline = Arc::new(ReferenceDataPipeline::new(
        &config.ingestion,
        asset_service.clone(),
        economic_index_service.clone(),
    ));

    let auth = Arc::new(AuthManager::new(&config.jwt_secret)?);

    Ok(Arc::new(AppState {
        pool,
        db_path,
        wallet_service,
        access_service,
        transaction_service,
        asset_service,
        economic_index_service,
        pipeline,
        auth,
    }))
}
