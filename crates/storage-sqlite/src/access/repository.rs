use async_trait::async_trait;
use chrono::Utc;
use diesel::prelude::*;
use diesel::sqlite::SqliteConnection;
use std::sync::Arc;

use keibo_core::access::{AccessRepositoryTrait, NewInvitation, Role, WalletAccess};
use keibo_core::{Error, Result};

use super::model::{role_from_db, WalletAccessDB, STATUS_GRANTED, STATUS_PENDING};
use crate::db::{get_connection, DbPool, WriteHandle};
use crate::errors::IntoCore;
use crate::schema::wallet_access;

/// Repository for wallet grants and pending invitations
pub struct AccessRepository {
    pool: Arc<DbPool>,
    writer: WriteHandle,
}

impl AccessRepository {
    pub fn new(pool: Arc<DbPool>, writer: WriteHandle) -> Self {
        Self { pool, writer }
    }
}

fn find_access(conn: &mut SqliteConnection, access_id: &str) -> Result<Option<WalletAccessDB>> {
    wallet_access::table
        .find(access_id)
        .select(WalletAccessDB::as_select())
        .first::<WalletAccessDB>(conn)
        .optional()
        .into_core()
}

#[async_trait]
impl AccessRepositoryTrait for AccessRepository {
    fn get_by_id(&self, access_id: &str) -> Result<Option<WalletAccess>> {
        let mut conn = get_connection(&self.pool)?;
        Ok(find_access(&mut conn, access_id)?.map(WalletAccess::from))
    }

    fn find(&self, wallet_id: &str, user_id: &str) -> Result<Option<WalletAccess>> {
        let mut conn = get_connection(&self.pool)?;
        let row = wallet_access::table
            .filter(wallet_access::wallet_id.eq(wallet_id))
            .filter(wallet_access::user_id.eq(user_id))
            .select(WalletAccessDB::as_select())
            .first::<WalletAccessDB>(&mut conn)
            .optional()
            .into_core()?;
        Ok(row.map(WalletAccess::from))
    }

    fn get_role(&self, wallet_id: &str, user_id: &str) -> Result<Option<Role>> {
        let mut conn = get_connection(&self.pool)?;
        let role = wallet_access::table
            .filter(wallet_access::wallet_id.eq(wallet_id))
            .filter(wallet_access::user_id.eq(user_id))
            .filter(wallet_access::status.eq(STATUS_GRANTED))
            .select(wallet_access::role)
            .first::<i32>(&mut conn)
            .optional()
            .into_core()?;
        Ok(role.map(role_from_db))
    }

    fn list_roles_for_user(&self, user_id: &str) -> Result<Vec<(String, Role)>> {
        let mut conn = get_connection(&self.pool)?;
        let rows = wallet_access::table
            .filter(wallet_access::user_id.eq(user_id))
            .filter(wallet_access::status.eq(STATUS_GRANTED))
            .select((wallet_access::wallet_id, wallet_access::role))
            .load::<(String, i32)>(&mut conn)
            .into_core()?;
        Ok(rows
            .into_iter()
            .map(|(wallet_id, role)| (wallet_id, role_from_db(role)))
            .collect())
    }

    fn list_for_wallet(&self, wallet_id: &str) -> Result<Vec<WalletAccess>> {
        let mut conn = get_connection(&self.pool)?;
        let rows = wallet_access::table
            .filter(wallet_access::wallet_id.eq(wallet_id))
            .select(WalletAccessDB::as_select())
            .order((wallet_access::role.desc(), wallet_access::created_at.asc()))
            .load::<WalletAccessDB>(&mut conn)
            .into_core()?;
        Ok(rows.into_iter().map(WalletAccess::from).collect())
    }

    fn list_pending_for_user(&self, user_id: &str) -> Result<Vec<WalletAccess>> {
        let mut conn = get_connection(&self.pool)?;
        let rows = wallet_access::table
            .filter(wallet_access::user_id.eq(user_id))
            .filter(wallet_access::status.eq(STATUS_PENDING))
            .select(WalletAccessDB::as_select())
            .order(wallet_access::created_at.desc())
            .load::<WalletAccessDB>(&mut conn)
            .into_core()?;
        Ok(rows.into_iter().map(WalletAccess::from).collect())
    }

    async fn create_invitation(
        &self,
        wallet_id: &str,
        invitation: NewInvitation,
    ) -> Result<WalletAccess> {
        let access_db = WalletAccessDB::pending(
            wallet_id,
            &invitation.user_id,
            invitation.role,
            Utc::now().naive_utc(),
        );

        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<WalletAccess> {
                diesel::insert_into(wallet_access::table)
                    .values(&access_db)
                    .execute(conn)
                    .into_core()?;
                Ok(access_db.into())
            })
            .await
    }

    async fn accept(&self, access_id: &str) -> Result<WalletAccess> {
        let access_id = access_id.to_string();

        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<WalletAccess> {
                let now = Utc::now().naive_utc();
                let affected = diesel::update(wallet_access::table.find(&access_id))
                    .set((
                        wallet_access::status.eq(STATUS_GRANTED),
                        wallet_access::granted_at.eq(Some(now)),
                    ))
                    .execute(conn)
                    .into_core()?;
                if affected == 0 {
                    return Err(Error::NotFound(format!("Invitation '{}'", access_id)));
                }
                find_access(conn, &access_id)?
                    .map(WalletAccess::from)
                    .ok_or_else(|| Error::NotFound(format!("Invitation '{}'", access_id)))
            })
            .await
    }

    async fn delete(&self, access_id: &str) -> Result<usize> {
        let access_id = access_id.to_string();

        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<usize> {
                diesel::delete(wallet_access::table.find(&access_id))
                    .execute(conn)
                    .into_core()
            })
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::setup_db;
    use crate::wallets::WalletRepository;
    use keibo_core::access::AccessStatus;
    use keibo_core::wallets::{NewWallet, WalletRepositoryTrait};

    async fn seeded() -> (AccessRepository, String, tempfile::TempDir) {
        let (pool, writer, dir) = setup_db().await;
        let wallets = WalletRepository::new(pool.clone(), writer.clone());
        let wallet = wallets
            .create_with_owner(
                NewWallet {
                    name: Some("Shared".to_string()),
                    asset_id: "eur".to_string(),
                    ..Default::default()
                },
                "alice",
            )
            .await
            .unwrap();
        (AccessRepository::new(pool, writer), wallet.id, dir)
    }

    #[tokio::test]
    async fn test_invitation_is_not_a_grant_until_accepted() {
        let (repo, wallet_id, _dir) = seeded().await;

        let invite = repo
            .create_invitation(
                &wallet_id,
                NewInvitation {
                    user_id: "bob".to_string(),
                    role: Role::Editor,
                },
            )
            .await
            .unwrap();

        assert!(matches!(invite.status, AccessStatus::Pending { .. }));
        assert_eq!(repo.get_role(&wallet_id, "bob").unwrap(), None);
        assert_eq!(repo.list_pending_for_user("bob").unwrap().len(), 1);

        let accepted = repo.accept(&invite.id).await.unwrap();

        assert!(matches!(accepted.status, AccessStatus::Granted { .. }));
        assert_eq!(repo.get_role(&wallet_id, "bob").unwrap(), Some(Role::Editor));
        assert!(repo.list_pending_for_user("bob").unwrap().is_empty());
        assert_eq!(repo.list_roles_for_user("bob").unwrap(), vec![(wallet_id.clone(), Role::Editor)]);
    }

    #[tokio::test]
    async fn test_duplicate_pair_is_rejected() {
        let (repo, wallet_id, _dir) = seeded().await;

        let result = repo
            .create_invitation(
                &wallet_id,
                NewInvitation {
                    user_id: "alice".to_string(),
                    role: Role::Viewer,
                },
            )
            .await;

        assert!(matches!(result, Err(Error::Database(_))));
        assert_eq!(repo.list_for_wallet(&wallet_id).unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_accept_unknown_invitation() {
        let (repo, _wallet_id, _dir) = seeded().await;

        let result = repo.accept("missing").await;

        assert!(matches!(result, Err(Error::NotFound(_))));
    }

    #[tokio::test]
    async fn test_delete_access() {
        let (repo, wallet_id, _dir) = seeded().await;
        let owner = repo.find(&wallet_id, "alice").unwrap().unwrap();

        assert_eq!(repo.delete(&owner.id).await.unwrap(), 1);
        assert!(repo.find(&wallet_id, "alice").unwrap().is_none());
        assert_eq!(repo.delete(&owner.id).await.unwrap(), 0);
    }
}
