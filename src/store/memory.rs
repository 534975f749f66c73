//! In-memory session store

use std::sync::Mutex;

use crate::models::Session;
use crate::store::{SessionStore, StoreError};

/// Session store holding the session in process memory.
///
/// Used by tests and by runs that should not leave state behind.
#[derive(Default)]
pub struct MemorySessionStore {
    slot: Mutex<Option<Session>>,
}

impl SessionStore for MemorySessionStore {
    fn read(&self) -> Option<Session> {
        self.slot.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }

    fn write(&self, session: &Session) -> Result<(), StoreError> {
        *self.slot.lock().unwrap_or_else(|e| e.into_inner()) = Some(session.clone());
        Ok(())
    }
}
