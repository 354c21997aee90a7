//! # docvault-database
//!
//! Ledger trait definitions plus their PostgreSQL and in-memory
//! implementations. The ledgers (users, tokens, documents) are the
//! authoritative record sets that define ground truth independent of
//! any cache.

pub mod connection;
pub mod ledger;
pub mod memory;
pub mod migration;
pub mod postgres;

pub use connection::DatabasePool;
pub use ledger::{DocumentLedger, TokenLedger, UserLedger};
