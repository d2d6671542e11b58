use async_trait::async_trait;
use log::{debug, info};
use std::collections::HashMap;
use std::sync::Arc;

use super::wallet_names::random_wallet_name;
use super::wallets_model::{BalanceHistoryEntry, NewWallet, Wallet, WalletUpdate, WalletView};
use super::wallets_traits::{WalletRepositoryTrait, WalletServiceTrait};
use crate::access::{
    require_exact_role, require_read, require_role, role_band, AccessRepositoryTrait, Role,
    UPDATE_WALLET_MIN_ROLE,
};
use crate::assets::{Asset, AssetRepositoryTrait};
use crate::errors::{Error, Result};

/// Service for managing wallets on behalf of an authenticated caller
pub struct WalletService {
    repository: Arc<dyn WalletRepositoryTrait>,
    access_repository: Arc<dyn AccessRepositoryTrait>,
    asset_repository: Arc<dyn AssetRepositoryTrait>,
}

impl WalletService {
    pub fn new(
        repository: Arc<dyn WalletRepositoryTrait>,
        access_repository: Arc<dyn AccessRepositoryTrait>,
        asset_repository: Arc<dyn AssetRepositoryTrait>,
    ) -> Self {
        Self {
            repository,
            access_repository,
            asset_repository,
        }
    }

    fn load(&self, wallet_id: &str) -> Result<Wallet> {
        self.repository
            .get_by_id(wallet_id)?
            .ok_or_else(|| Error::NotFound(format!("Wallet '{}'", wallet_id)))
    }

    fn view(&self, wallet: Wallet, role: Option<Role>) -> Result<WalletView> {
        let asset = self.asset_repository.get_by_id(&wallet.asset_id)?;
        Ok(WalletView::new(wallet, role, asset.as_ref()))
    }
}

#[async_trait]
impl WalletServiceTrait for WalletService {
    fn list_wallets_for(
        &self,
        user_id: &str,
        role: Option<i32>,
        range: Option<i32>,
    ) -> Result<Vec<WalletView>> {
        let band = match role {
            Some(r) => {
                Role::try_from(r)?;
                role_band(r, range)
            }
            None => Role::Viewer.as_i32()..=Role::Owner.as_i32(),
        };

        let wallets = self.repository.list_for_user(user_id, band)?;

        let asset_ids: Vec<String> = wallets.iter().map(|(w, _)| w.asset_id.clone()).collect();
        let assets: HashMap<String, Asset> = self
            .asset_repository
            .list_by_ids(&asset_ids)?
            .into_iter()
            .map(|a| (a.id.clone(), a))
            .collect();

        Ok(wallets
            .into_iter()
            .map(|(wallet, role)| {
                let asset = assets.get(&wallet.asset_id);
                WalletView::new(wallet, Some(role), asset)
            })
            .collect())
    }

    async fn create_wallet(&self, new_wallet: NewWallet, creator: &str) -> Result<WalletView> {
        let mut new_wallet = new_wallet.normalized()?;
        if new_wallet.name.is_none() {
            new_wallet.name = Some(random_wallet_name());
        }
        debug!(
            "Creating wallet for {} in asset {}",
            creator, new_wallet.asset_id
        );

        let wallet = self
            .repository
            .create_with_owner(new_wallet, creator)
            .await?;
        info!("User {} created wallet {}", creator, wallet.id);
        self.view(wallet, Some(Role::Owner))
    }

    fn get_wallet(&self, wallet_id: &str, caller: &str) -> Result<WalletView> {
        let wallet = self.load(wallet_id)?;
        let role = self.access_repository.get_role(wallet_id, caller)?;
        require_read(&wallet, role, "view this wallet")?;
        self.view(wallet, role)
    }

    async fn update_wallet(
        &self,
        wallet_id: &str,
        caller: &str,
        update: WalletUpdate,
    ) -> Result<WalletView> {
        self.load(wallet_id)?;
        let role = require_role(
            self.access_repository.get_role(wallet_id, caller)?,
            UPDATE_WALLET_MIN_ROLE,
            "update this wallet",
        )?;
        let update = update.normalized()?;

        let wallet = self.repository.update(wallet_id, update).await?;
        debug!("User {} updated wallet {}", caller, wallet_id);
        self.view(wallet, Some(role))
    }

    async fn delete_wallet(&self, wallet_id: &str, caller: &str) -> Result<()> {
        self.load(wallet_id)?;
        require_exact_role(
            self.access_repository.get_role(wallet_id, caller)?,
            Role::Owner,
            "delete this wallet",
        )?;

        self.repository.delete(wallet_id).await?;
        info!("User {} deleted wallet {}", caller, wallet_id);
        Ok(())
    }

    fn get_balance_history(
        &self,
        wallet_id: &str,
        caller: &str,
    ) -> Result<Vec<BalanceHistoryEntry>> {
        let wallet = self.load(wallet_id)?;
        let role = self.access_repository.get_role(wallet_id, caller)?;
        require_read(&wallet, role, "view this wallet's history")?;
        self.repository.list_balance_history(wallet_id)
    }
}
