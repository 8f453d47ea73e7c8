use crate::error::SessionError;
use std::io::ErrorKind;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

/// Durable slot for the one bearer token of this client.
///
/// Nothing here knows about expiry. A stale token is only noticed when the
/// server rejects it.
pub trait SessionStore: Send + Sync {
    fn load(&self) -> Result<Option<String>, SessionError>;
    fn save(&self, token: &str) -> Result<(), SessionError>;
    fn clear(&self) -> Result<(), SessionError>;
}

/// Token kept in a single file, by default `$XDG_DATA_HOME/lifeplan/session`.
#[derive(Debug, Clone)]
pub struct FileSessionStore {
    path: PathBuf,
}

impl FileSessionStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &PathBuf {
        &self.path
    }
}

impl SessionStore for FileSessionStore {
    fn load(&self) -> Result<Option<String>, SessionError> {
        match fs_err::read_to_string(&self.path) {
            Ok(value) if value.is_empty() => Ok(None),
            Ok(value) => Ok(Some(value)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(SessionError::Read(e)),
        }
    }

    fn save(&self, token: &str) -> Result<(), SessionError> {
        if let Some(parent) = self.path.parent() {
            fs_err::create_dir_all(parent).map_err(SessionError::Write)?;
        }
        fs_err::write(&self.path, token.as_bytes()).map_err(SessionError::Write)
    }

    fn clear(&self) -> Result<(), SessionError> {
        match fs_err::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(SessionError::Write(e)),
        }
    }
}

/// In-process store. Clones share the slot, so a client rebuilt over a clone
/// sees what the previous one left behind.
#[derive(Debug, Clone, Default)]
pub struct MemorySessionStore {
    slot: Arc<Mutex<Option<String>>>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_token(token: &str) -> Self {
        Self {
            slot: Arc::new(Mutex::new(Some(token.to_string()))),
        }
    }

    fn slot(&self) -> std::sync::MutexGuard<'_, Option<String>> {
        self.slot.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl SessionStore for MemorySessionStore {
    fn load(&self) -> Result<Option<String>, SessionError> {
        Ok(self.slot().clone())
    }

    fn save(&self, token: &str) -> Result<(), SessionError> {
        *self.slot() = Some(token.to_string());
        Ok(())
    }

    fn clear(&self) -> Result<(), SessionError> {
        *self.slot() = None;
        Ok(())
    }
}
