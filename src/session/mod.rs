//! Session token persistence.
//!
//! A session is a single opaque token. It is created by a successful login
//! and destroyed by logout or by the server rejecting it. There is no local
//! expiry tracking: a stale token is only discovered when a request using it
//! comes back 401.

mod file;
mod memory;

pub use file::FileSessionStore;
pub use memory::MemorySessionStore;

use std::path::PathBuf;

use thiserror::Error;

use crate::config::SecureString;

/// Key under which the token is persisted.
pub const TOKEN_KEY: &str = "token";

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("Failed to access session file '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to serialize session: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Storage for the session token.
///
/// Injected into the reconciler so tests can substitute an in-memory store.
pub trait SessionStore: Send + Sync {
    /// Persist `token`, replacing any previous one.
    fn save(&self, token: &SecureString) -> Result<(), SessionError>;

    /// Current token, if one is stored.
    fn read(&self) -> Option<SecureString>;

    /// Remove the stored token. Clearing an empty store is not an error.
    fn clear(&self) -> Result<(), SessionError>;

    fn has_token(&self) -> bool {
        self.read().is_some()
    }
}
