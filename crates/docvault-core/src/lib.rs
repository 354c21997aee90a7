//! # docvault-core
//!
//! Core crate for DocVault. Contains the blob-store trait, configuration
//! schemas, the per-operation timeout helper, and the unified error system.
//!
//! This crate has **no** internal dependencies on other DocVault crates.

pub mod config;
pub mod error;
pub mod result;
pub mod timeout;
pub mod traits;

pub use error::{AppError, ErrorKind};
pub use result::AppResult;
