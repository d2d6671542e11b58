use async_trait::async_trait;
use log::{debug, info};
use std::sync::Arc;

use super::access_guard::{require_role, INVITE_MIN_ROLE, REVOKE_MIN_ROLE};
use super::access_model::{AccessStatus, NewInvitation, Role, WalletAccess};
use super::access_traits::{AccessRepositoryTrait, AccessServiceTrait};
use crate::errors::{Error, Result};
use crate::wallets::WalletRepositoryTrait;

/// Service for wallet membership: invitations, grants and revocation
pub struct AccessService {
    repository: Arc<dyn AccessRepositoryTrait>,
    wallet_repository: Arc<dyn WalletRepositoryTrait>,
}

impl AccessService {
    pub fn new(
        repository: Arc<dyn AccessRepositoryTrait>,
        wallet_repository: Arc<dyn WalletRepositoryTrait>,
    ) -> Self {
        Self {
            repository,
            wallet_repository,
        }
    }

    fn ensure_wallet_exists(&self, wallet_id: &str) -> Result<()> {
        self.wallet_repository
            .get_by_id(wallet_id)?
            .map(|_| ())
            .ok_or_else(|| Error::NotFound(format!("Wallet '{}'", wallet_id)))
    }

    fn own_invitation(&self, access_id: &str, caller: &str) -> Result<WalletAccess> {
        let record = self
            .repository
            .get_by_id(access_id)?
            .ok_or_else(|| Error::NotFound(format!("Invitation '{}'", access_id)))?;
        if record.user_id != caller {
            return Err(Error::PermissionDenied(
                "Invitation belongs to another user".to_string(),
            ));
        }
        if record.status.is_granted() {
            return Err(Error::ConstraintViolation(
                "Invitation was already accepted".to_string(),
            ));
        }
        Ok(record)
    }
}

#[async_trait]
impl AccessServiceTrait for AccessService {
    fn role_of(&self, wallet_id: &str, user_id: &str) -> Result<Option<Role>> {
        self.repository.get_role(wallet_id, user_id)
    }

    async fn invite_user(
        &self,
        wallet_id: &str,
        caller: &str,
        invitation: NewInvitation,
    ) -> Result<WalletAccess> {
        invitation.validate()?;
        self.ensure_wallet_exists(wallet_id)?;

        let caller_role = require_role(
            self.repository.get_role(wallet_id, caller)?,
            INVITE_MIN_ROLE,
            "invite users to this wallet",
        )?;
        if invitation.role > caller_role {
            return Err(Error::PermissionDenied(format!(
                "Not allowed to invite with role {}",
                invitation.role
            )));
        }
        if self
            .repository
            .find(wallet_id, &invitation.user_id)?
            .is_some()
        {
            return Err(Error::ConstraintViolation(format!(
                "User '{}' already has access or a pending invitation",
                invitation.user_id
            )));
        }

        let record = self
            .repository
            .create_invitation(wallet_id, invitation)
            .await?;
        info!(
            "User {} invited {} to wallet {} as {}",
            caller, record.user_id, wallet_id, record.role
        );
        Ok(record)
    }

    async fn accept_invitation(&self, access_id: &str, caller: &str) -> Result<WalletAccess> {
        self.own_invitation(access_id, caller)?;
        let record = self.repository.accept(access_id).await?;
        info!(
            "User {} joined wallet {} as {}",
            caller, record.wallet_id, record.role
        );
        Ok(record)
    }

    async fn decline_invitation(&self, access_id: &str, caller: &str) -> Result<()> {
        let record = self.own_invitation(access_id, caller)?;
        self.repository.delete(&record.id).await?;
        debug!("User {} declined invitation {}", caller, access_id);
        Ok(())
    }

    fn list_invitations(&self, caller: &str) -> Result<Vec<WalletAccess>> {
        self.repository.list_pending_for_user(caller)
    }

    fn list_members(&self, wallet_id: &str, caller: &str) -> Result<Vec<WalletAccess>> {
        self.ensure_wallet_exists(wallet_id)?;
        require_role(
            self.repository.get_role(wallet_id, caller)?,
            Role::Viewer,
            "list members of this wallet",
        )?;
        self.repository.list_for_wallet(wallet_id)
    }

    async fn revoke_access(&self, wallet_id: &str, caller: &str, user_id: &str) -> Result<()> {
        self.ensure_wallet_exists(wallet_id)?;
        let target = self
            .repository
            .find(wallet_id, user_id)?
            .ok_or_else(|| Error::NotFound(format!("Member '{}'", user_id)))?;

        if caller != user_id {
            let caller_role = require_role(
                self.repository.get_role(wallet_id, caller)?,
                REVOKE_MIN_ROLE,
                "revoke access on this wallet",
            )?;
            if target.role == Role::Owner && caller_role != Role::Owner {
                return Err(Error::PermissionDenied(
                    "Not allowed to revoke an owner".to_string(),
                ));
            }
        }

        self.repository.delete(&target.id).await?;
        let what = match target.status {
            AccessStatus::Granted { .. } => "grant",
            AccessStatus::Pending { .. } => "invitation",
        };
        info!(
            "User {} removed {}'s {} on wallet {}",
            caller, user_id, what, wallet_id
        );
        Ok(())
    }
}
