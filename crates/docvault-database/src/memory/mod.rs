//! In-memory ledger implementations.
//!
//! Used by tests and single-node deployments that do not need a
//! database. Concurrency safety comes from dashmap; there is no
//! cross-entry locking, matching the Postgres backends.

pub mod documents;
pub mod tokens;
pub mod users;

pub use documents::MemoryDocumentLedger;
pub use tokens::MemoryTokenLedger;
pub use users::MemoryUserLedger;
