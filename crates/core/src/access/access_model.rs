//! Access grant domain models.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::RangeInclusive;

use crate::errors::{Error, Result};

/// Ordered permission scale on a wallet. Higher roles include every
/// permission of the lower ones.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "i32", into = "i32")]
pub enum Role {
    Viewer = 1,
    Editor = 2,
    Manager = 3,
    Owner = 4,
}

impl Role {
    pub const fn as_i32(&self) -> i32 {
        *self as i32
    }

    pub const fn label(&self) -> &'static str {
        match self {
            Role::Viewer => "viewer",
            Role::Editor => "editor",
            Role::Manager => "manager",
            Role::Owner => "owner",
        }
    }
}

impl TryFrom<i32> for Role {
    type Error = Error;

    fn try_from(value: i32) -> Result<Self> {
        match value {
            1 => Ok(Role::Viewer),
            2 => Ok(Role::Editor),
            3 => Ok(Role::Manager),
            4 => Ok(Role::Owner),
            other => Err(Error::invalid_input(format!(
                "Role must be between 1 and 4, got {}",
                other
            ))),
        }
    }
}

impl From<Role> for i32 {
    fn from(role: Role) -> Self {
        role.as_i32()
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Inclusive role window for filtered wallet listings.
///
/// No range (or zero) matches `role` exactly; a negative range reaches
/// down, a positive one reaches up.
pub fn role_band(role: i32, range: Option<i32>) -> RangeInclusive<i32> {
    match range {
        None | Some(0) => role..=role,
        Some(r) if r < 0 => role.saturating_add(r)..=role,
        Some(r) => role..=role.saturating_add(r),
    }
}

/// Whether an access record confers permissions yet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AccessStatus {
    Granted {
        #[serde(rename = "grantedAt")]
        granted_at: NaiveDateTime,
    },
    Pending {
        #[serde(rename = "createdAt")]
        created_at: NaiveDateTime,
    },
}

impl AccessStatus {
    pub const fn as_db_str(&self) -> &'static str {
        match self {
            AccessStatus::Granted { .. } => "GRANTED",
            AccessStatus::Pending { .. } => "PENDING",
        }
    }

    pub fn is_granted(&self) -> bool {
        matches!(self, AccessStatus::Granted { .. })
    }
}

/// A user's grant on a wallet, or an invitation to one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WalletAccess {
    pub id: String,
    pub wallet_id: String,
    pub user_id: String,
    pub role: Role,
    #[serde(flatten)]
    pub status: AccessStatus,
}

impl WalletAccess {
    /// The role this record grants right now. Pending invitations grant nothing.
    pub fn effective_role(&self) -> Option<Role> {
        self.status.is_granted().then_some(self.role)
    }
}

/// Input model for inviting a user onto a wallet.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewInvitation {
    pub user_id: String,
    pub role: Role,
}

impl NewInvitation {
    pub fn validate(&self) -> Result<()> {
        if self.user_id.trim().is_empty() {
            return Err(Error::invalid_input("Invited user id cannot be empty"));
        }
        Ok(())
    }
}
