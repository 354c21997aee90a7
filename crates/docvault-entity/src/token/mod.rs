//! Access token ledger entry.

pub mod model;

pub use model::AccessToken;
