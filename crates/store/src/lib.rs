//! Document store backends
//!
//! The core treats persistence as a narrow collaborator behind the store
//! traits. This crate ships the in-memory implementation used by the server
//! and by tests; a hosted document database would slot in behind the same
//! traits.

pub mod memory;

pub use memory::InMemoryStore;

use thiserror::Error;

/// Store errors
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Document not found: {0}")]
    NotFound(String),

    #[error("Write failed: {0}")]
    WriteFailed(String),
}

impl From<StoreError> for qualify_core::Error {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound(id) => qualify_core::Error::NotFound(id),
            StoreError::WriteFailed(msg) => qualify_core::Error::Store(msg),
        }
    }
}
