//! # docvault-storage
//!
//! Blob storage backends for DocVault. Currently one backend exists,
//! the local filesystem; the [`BlobStore`] trait in `docvault-core`
//! is the seam where others would plug in.
//!
//! [`BlobStore`]: docvault_core::traits::blob::BlobStore

pub mod local;

pub use local::LocalBlobStore;
