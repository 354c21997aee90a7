//! # docvault-auth
//!
//! Authentication for DocVault: Argon2id password hashing, a
//! composition-based password policy, a ledger-gated token authority
//! and the session service that ties them together.
//!
//! A token is valid only while its ledger entry exists; checking an
//! expired token revokes it, so expiry is enforced by the authority
//! rather than by the JWT library.

pub mod password;
pub mod session;
pub mod token;

pub use password::{PasswordHasher, PasswordPolicy};
pub use session::AuthSessionService;
pub use token::{Claims, TokenAuthority};
