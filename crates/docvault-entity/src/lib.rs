//! # docvault-entity
//!
//! Domain entity models for DocVault: users, access tokens, documents,
//! and the document listing filter.

pub mod document;
pub mod token;
pub mod user;

pub use document::{Document, DocumentFilter, DocumentPayload, NewDocument};
pub use token::AccessToken;
pub use user::User;
