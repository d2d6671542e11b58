use chrono::NaiveDateTime;
use diesel::prelude::*;
use log::warn;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use keibo_core::access::{AccessStatus, Role, WalletAccess};

pub const STATUS_GRANTED: &str = "GRANTED";
pub const STATUS_PENDING: &str = "PENDING";

/// Database model for wallet access records. One table holds grants and
/// pending invitations; `status` tells them apart.
#[derive(
    Queryable, Identifiable, Insertable, Selectable, PartialEq, Serialize, Deserialize, Debug, Clone,
)]
#[diesel(table_name = crate::schema::wallet_access)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct WalletAccessDB {
    pub id: String,
    pub wallet_id: String,
    pub user_id: String,
    pub role: i32,
    pub status: String,
    pub created_at: NaiveDateTime,
    pub granted_at: Option<NaiveDateTime>,
}

impl WalletAccessDB {
    pub fn granted(wallet_id: &str, user_id: &str, role: Role, now: NaiveDateTime) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            wallet_id: wallet_id.to_string(),
            user_id: user_id.to_string(),
            role: role.as_i32(),
            status: STATUS_GRANTED.to_string(),
            created_at: now,
            granted_at: Some(now),
        }
    }

    pub fn pending(wallet_id: &str, user_id: &str, role: Role, now: NaiveDateTime) -> Self {
        Self {
            status: STATUS_PENDING.to_string(),
            granted_at: None,
            ..Self::granted(wallet_id, user_id, role, now)
        }
    }
}

/// Maps a stored role number. Out-of-range values fall back to the least
/// privileged role.
pub fn role_from_db(role: i32) -> Role {
    Role::try_from(role).unwrap_or_else(|_| {
        warn!("Unknown role {} in wallet_access, reading as viewer", role);
        Role::Viewer
    })
}

impl From<WalletAccessDB> for WalletAccess {
    fn from(db: WalletAccessDB) -> Self {
        let status = match (db.status.as_str(), db.granted_at) {
            (STATUS_GRANTED, Some(granted_at)) => AccessStatus::Granted { granted_at },
            (STATUS_GRANTED, None) => AccessStatus::Granted {
                granted_at: db.created_at,
            },
            _ => AccessStatus::Pending {
                created_at: db.created_at,
            },
        };
        Self {
            role: role_from_db(db.role),
            id: db.id,
            wallet_id: db.wallet_id,
            user_id: db.user_id,
            status,
        }
    }
}
