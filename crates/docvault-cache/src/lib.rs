//! # docvault-cache
//!
//! In-process read-through cache for DocVault, built on
//! [moka](https://crates.io/crates/moka).
//!
//! The cache is typed: each [`ResultCache`] instance stores one value
//! type, so callers get their values back without any downcasting and
//! a type mismatch is a compile error rather than a runtime surprise.

pub mod keys;
pub mod store;

pub use store::ResultCache;
