//! Role thresholds and the checks built on them.
//!
//! Denials are always `Error::PermissionDenied` with a message naming the
//! action, never the caller's actual role.

use super::access_model::Role;
use crate::errors::{Error, Result};
use crate::wallets::Wallet;

pub const UPDATE_WALLET_MIN_ROLE: Role = Role::Manager;
pub const WRITE_TRANSACTION_MIN_ROLE: Role = Role::Editor;
pub const INVITE_MIN_ROLE: Role = Role::Manager;
pub const REVOKE_MIN_ROLE: Role = Role::Manager;

fn denied(action: &str) -> Error {
    Error::PermissionDenied(format!("Not allowed to {}", action))
}

/// Passes when the caller holds at least `min`.
pub fn require_role(granted: Option<Role>, min: Role, action: &str) -> Result<Role> {
    match granted {
        Some(role) if role >= min => Ok(role),
        _ => Err(denied(action)),
    }
}

/// Passes only when the caller holds exactly `role`.
pub fn require_exact_role(granted: Option<Role>, role: Role, action: &str) -> Result<Role> {
    match granted {
        Some(r) if r == role => Ok(r),
        _ => Err(denied(action)),
    }
}

/// Public wallets are readable by anyone; others need a grant.
pub fn can_read_wallet(wallet: &Wallet, granted: Option<Role>) -> bool {
    wallet.is_public || granted.is_some()
}

pub fn require_read(wallet: &Wallet, granted: Option<Role>, action: &str) -> Result<()> {
    if can_read_wallet(wallet, granted) {
        Ok(())
    } else {
        Err(denied(action))
    }
}
