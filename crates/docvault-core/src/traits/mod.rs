//! Trait seams implemented by the storage crate.

pub mod blob;

pub use blob::BlobStore;
