//! # docvault-service
//!
//! The document catalog: the consistency layer that keeps the document
//! ledger, the blob store and the read-through cache in step. The
//! ledger is authoritative; the cache only ever reflects what a ledger
//! read returned, and every ledger write invalidates the matching
//! cache entry.

pub mod document;

pub use document::DocumentCatalog;
