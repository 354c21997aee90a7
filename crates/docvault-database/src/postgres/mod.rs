//! PostgreSQL ledger implementations.

pub mod documents;
pub mod tokens;
pub mod users;

pub use documents::PgDocumentLedger;
pub use tokens::PgTokenLedger;
pub use users::PgUserLedger;
