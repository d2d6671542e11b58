//! Access module - role-bearing wallet grants, invitations and the guard
//! every wallet and transaction operation goes through.

mod access_guard;
mod access_model;
mod access_service;
mod access_traits;


#[cfg(test)]
mod access_service_tests;

pub use access_guard::{
    can_read_wallet, require_exact_role, require_read, require_role, INVITE_MIN_ROLE,
    REVOKE_MIN_ROLE, UPDATE_WALLET_MIN_ROLE, WRITE_TRANSACTION_MIN_ROLE,
};
pub use access_model::{role_band, AccessStatus, NewInvitation, Role, WalletAccess};
pub use access_service::AccessService;
pub use access_traits::{AccessRepositoryTrait, AccessServiceTrait};
