//! Session store
//!
//! This module owns the cached login session. No other component touches
//! the underlying storage; everything goes through the [`SessionStore`]
//! trait. Two drivers exist:
//! - File store (default) - one JSON file under the configured directory
//! - In-memory store - for tests and throwaway runs
//!
//! There is deliberately no delete operation: expiry is a read-time check,
//! and an expired session stays stored until the next login overwrites it.

pub mod file;
pub mod memory;

use std::sync::Arc;

use crate::config::{SessionStoreConfig, StoreDriver};
use crate::models::Session;

pub use file::FileSessionStore;
pub use memory::MemorySessionStore;

/// Storage key for the cached session, kept from the original application
pub const STORAGE_KEY: &str = "user";

/// Error type for session store writes
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("failed to serialize session: {0}")]
    Serialize(#[from] serde_json::Error),
    #[error("failed to persist session: {0}")]
    Io(#[from] std::io::Error),
}

/// Injected capability for reading and writing the cached session.
///
/// Reads never fail: unset or malformed storage yields `None` so a corrupt
/// cache can never take a page down with it.
pub trait SessionStore: Send + Sync {
    /// Read the stored session, if any well-formed one exists
    fn read(&self) -> Option<Session>;

    /// Serialize and store the session, overwriting any prior value
    fn write(&self, session: &Session) -> Result<(), StoreError>;
}

/// Create a session store based on configuration
pub fn create_store(config: &SessionStoreConfig) -> Arc<dyn SessionStore> {
    match config.driver {
        StoreDriver::File => Arc::new(FileSessionStore::new(&config.path)),
        StoreDriver::Memory => Arc::new(MemorySessionStore::default()),
    }
}
