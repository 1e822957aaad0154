use parking_lot::Mutex;

use super::{SessionError, SessionStore};
use crate::config::SecureString;

/// Process-local session store. Nothing survives a restart.
#[derive(Default)]
pub struct MemorySessionStore {
    token: Mutex<Option<SecureString>>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_token(token: &str) -> Self {
        Self {
            token: Mutex::new(Some(SecureString::from(token))),
        }
    }
}

impl SessionStore for MemorySessionStore {
    fn save(&self, token: &SecureString) -> Result<(), SessionError> {
        *self.token.lock() = Some(token.clone());
        Ok(())
    }

    fn read(&self) -> Option<SecureString> {
        self.token.lock().clone().filter(|t| !t.is_empty())
    }

    fn clear(&self) -> Result<(), SessionError> {
        self.token.lock().take();
        Ok(())
    }
}
