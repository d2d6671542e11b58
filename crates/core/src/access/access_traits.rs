//! Access repository and service traits.

use async_trait::async_trait;

use super::access_model::{NewInvitation, Role, WalletAccess};
use crate::errors::Result;

/// Persistence of wallet access records, granted and pending alike.
#[async_trait]
pub trait AccessRepositoryTrait: Send + Sync {
    fn get_by_id(&self, access_id: &str) -> Result<Option<WalletAccess>>;

    /// The record pairing `user_id` with `wallet_id`, whatever its status.
    fn find(&self, wallet_id: &str, user_id: &str) -> Result<Option<WalletAccess>>;

    /// The caller's granted role on a wallet. Pending records yield `None`.
    fn get_role(&self, wallet_id: &str, user_id: &str) -> Result<Option<Role>>;

    /// Granted roles of a user, keyed by wallet id.
    fn list_roles_for_user(&self, user_id: &str) -> Result<Vec<(String, Role)>>;

    fn list_for_wallet(&self, wallet_id: &str) -> Result<Vec<WalletAccess>>;
    fn list_pending_for_user(&self, user_id: &str) -> Result<Vec<WalletAccess>>;

    async fn create_invitation(
        &self,
        wallet_id: &str,
        invitation: NewInvitation,
    ) -> Result<WalletAccess>;

    /// Flips a pending record to granted and stamps `granted_at`.
    async fn accept(&self, access_id: &str) -> Result<WalletAccess>;

    async fn delete(&self, access_id: &str) -> Result<usize>;
}

/// Membership operations, each gated by the caller's role.
#[async_trait]
pub trait AccessServiceTrait: Send + Sync {
    fn role_of(&self, wallet_id: &str, user_id: &str) -> Result<Option<Role>>;

    async fn invite_user(
        &self,
        wallet_id: &str,
        caller: &str,
        invitation: NewInvitation,
    ) -> Result<WalletAccess>;

    async fn accept_invitation(&self, access_id: &str, caller: &str) -> Result<WalletAccess>;
    async fn decline_invitation(&self, access_id: &str, caller: &str) -> Result<()>;
    fn list_invitations(&self, caller: &str) -> Result<Vec<WalletAccess>>;
    fn list_members(&self, wallet_id: &str, caller: &str) -> Result<Vec<WalletAccess>>;
    async fn revoke_access(&self, wallet_id: &str, caller: &str, user_id: &str) -> Result<()>;
}
