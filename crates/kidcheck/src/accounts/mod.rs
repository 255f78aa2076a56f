//! Parent and staff accounts: registration, credential checks, and the `/api/auth` routes.

pub mod directory;
pub mod domain;
pub(crate) mod password;
pub mod router;

#[cfg(test)]
mod tests;

pub use directory::{AccountDirectory, DirectoryError};
pub use domain::{Account, AccountId, AccountKind, AccountProfile, Registration};
pub use router::{account_router, LoginPayload, RegisterPayload};
