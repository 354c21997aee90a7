//! Document catalog operations.

pub mod service;

pub use service::DocumentCatalog;
