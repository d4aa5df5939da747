//! Session cache persisted as one JSON file in a capability-scoped directory.

use std::io;
use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};

use cap_std::{ambient_authority, fs::Dir};
use tracing::debug;

use crate::domain::Account;
use crate::domain::ports::{SessionCache, SessionCacheError};

/// Name of the file holding the cached account.
pub const SESSION_FILE: &str = "session.json";

static TEMP_COUNTER: AtomicU64 = AtomicU64::new(0);

/// [`SessionCache`] writing the account to `<dir>/session.json`.
///
/// Writes go to a temporary sibling first and are renamed into place, so a
/// crash never leaves a half-written entry behind.
#[derive(Debug)]
pub struct JsonFileSessionCache {
    dir: Dir,
}

fn io_error(err: &io::Error) -> SessionCacheError {
    SessionCacheError::io(err.to_string())
}

impl JsonFileSessionCache {
    /// Open (creating if needed) the session directory at `path`.
    ///
    /// # Errors
    /// Returns [`SessionCacheError::Io`] when the directory cannot be created
    /// or opened.
    pub fn open(path: &Path) -> Result<Self, SessionCacheError> {
        Dir::create_ambient_dir_all(path, ambient_authority()).map_err(|err| io_error(&err))?;
        let dir = Dir::open_ambient_dir(path, ambient_authority()).map_err(|err| io_error(&err))?;
        debug!(path = %path.display(), "session directory opened");
        Ok(Self { dir })
    }

    /// Wrap an already opened directory.
    #[must_use]
    pub fn from_dir(dir: Dir) -> Self {
        Self { dir }
    }
}

impl SessionCache for JsonFileSessionCache {
    fn load(&self) -> Result<Option<Account>, SessionCacheError> {
        let contents = match self.dir.read_to_string(SESSION_FILE) {
            Ok(contents) => contents,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(err) => return Err(io_error(&err)),
        };
        serde_json::from_str(&contents)
            .map(Some)
            .map_err(|err| SessionCacheError::corrupt(err.to_string()))
    }

    fn store(&self, account: &Account) -> Result<(), SessionCacheError> {
        let contents = serde_json::to_vec_pretty(account)
            .map_err(|err| SessionCacheError::io(err.to_string()))?;
        let counter = TEMP_COUNTER.fetch_add(1, Ordering::Relaxed);
        let tmp_name = format!(".{SESSION_FILE}.tmp.{}.{counter}", std::process::id());

        if let Err(err) = self.dir.write(&tmp_name, &contents) {
            drop(self.dir.remove_file(&tmp_name));
            return Err(io_error(&err));
        }
        if let Err(err) = self.dir.rename(&tmp_name, &self.dir, SESSION_FILE) {
            drop(self.dir.remove_file(&tmp_name));
            return Err(io_error(&err));
        }
        Ok(())
    }

    fn clear(&self) -> Result<(), SessionCacheError> {
        match self.dir.remove_file(SESSION_FILE) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(io_error(&err)),
        }
    }
}
