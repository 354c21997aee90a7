//! Document entity and listing filter.

pub mod filter;
pub mod model;

pub use filter::DocumentFilter;
pub use model::{Document, DocumentPayload, NewDocument};
