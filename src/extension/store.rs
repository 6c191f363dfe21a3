//! Persistent local storage for the extension worker.
//!
//! Holds the anonymous free-check counter, the signed-in user's token and
//! profile fields, and the per-ASIN analysis cache. The whole state lives in
//! one JSON file that is rewritten atomically (temp file + rename) whenever a
//! persisted field changes.
//!
//! All read-modify-write sequences go through [`ExtensionStore::transaction`],
//! which holds the store lock for the whole closure. Two concurrent analyses
//! therefore cannot both observe the last free check as available.

use std::collections::BTreeMap;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tempfile::NamedTempFile;
use tracing::{debug, warn};

use crate::config;
use crate::error::Result;

/// Everything the worker keeps between messages.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoreState {
    #[serde(default)]
    pub free_checks_used: u32,
    #[serde(default)]
    pub user_token: Option<String>,
    #[serde(default)]
    pub user_email: Option<String>,
    #[serde(default)]
    pub user_name: Option<String>,
    #[serde(default)]
    pub checks_remaining: Option<i64>,
    /// Raw analysis JSON keyed by upper-case ASIN.
    #[serde(default)]
    pub analysis_cache: BTreeMap<String, Value>,
    /// Anonymous analyses currently in flight. Never persisted.
    #[serde(skip)]
    pub free_checks_reserved: u32,
}

impl StoreState {
    pub fn is_logged_in(&self) -> bool {
        self.user_token.is_some()
    }

    /// Free checks left, counting in-flight reservations as spent.
    pub fn free_checks_available(&self) -> u32 {
        config::FREE_CHECKS_LIMIT
            .saturating_sub(self.free_checks_used.saturating_add(self.free_checks_reserved))
    }

    pub fn free_checks_remaining(&self) -> u32 {
        config::FREE_CHECKS_LIMIT.saturating_sub(self.free_checks_used)
    }

    /// Equality over the fields that are written to disk.
    fn same_persisted(&self, other: &StoreState) -> bool {
        self.free_checks_used == other.free_checks_used
            && self.user_token == other.user_token
            && self.user_email == other.user_email
            && self.user_name == other.user_name
            && self.checks_remaining == other.checks_remaining
            && self.analysis_cache == other.analysis_cache
    }
}

pub struct ExtensionStore {
    path: Option<PathBuf>,
    state: Mutex<StoreState>,
}

impl ExtensionStore {
    /// Open (or create) the store file inside `dir`.
    ///
    /// If `dir` is `None`, the platform cache directory is used. A corrupt
    /// store file is discarded and the store starts from defaults.
    pub fn open(dir: Option<PathBuf>) -> Result<Self> {
        let dir = dir.unwrap_or_else(config::default_store_dir);
        fs::create_dir_all(&dir)?;
        let path = dir.join(config::STORE_FILE);

        let state = if path.exists() {
            let contents = fs::read_to_string(&path)?;
            match serde_json::from_str::<StoreState>(&contents) {
                Ok(state) => state,
                Err(e) => {
                    warn!(path = %path.display(), error = %e, "corrupt extension store -- resetting");
                    let _ = fs::remove_file(&path);
                    StoreState::default()
                }
            }
        } else {
            StoreState::default()
        };
        debug!(path = %path.display(), cached = state.analysis_cache.len(), "opened extension store");

        Ok(Self {
            path: Some(path),
            state: Mutex::new(state),
        })
    }

    /// A store that lives only as long as this value.
    pub fn in_memory() -> Self {
        Self {
            path: None,
            state: Mutex::new(StoreState::default()),
        }
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    fn lock(&self) -> MutexGuard<'_, StoreState> {
        self.state.lock().unwrap_or_else(|p| p.into_inner())
    }

    /// A copy of the current state.
    pub fn snapshot(&self) -> StoreState {
        self.lock().clone()
    }

    /// Read from the state without writing anything back.
    pub fn inspect<T>(&self, f: impl FnOnce(&StoreState) -> T) -> T {
        f(&self.lock())
    }

    /// Atomically read, modify and persist the state.
    ///
    /// The closure runs under the store lock and its changes are always
    /// installed in memory. The file is rewritten only when a persisted
    /// field changed. A failed write is returned as an error; the in-memory
    /// state stays authoritative and the next successful write brings the
    /// file back in line.
    pub fn transaction<T>(&self, f: impl FnOnce(&mut StoreState) -> T) -> Result<T> {
        let mut guard = self.lock();
        let mut working = guard.clone();
        let out = f(&mut working);
        let dirty = !working.same_persisted(&guard);
        *guard = working;
        if dirty {
            self.persist(&guard)?;
        }
        Ok(out)
    }

    /// Restore install-time defaults: no token, zero checks used, empty cache.
    pub fn reset(&self) -> Result<()> {
        self.transaction(|state| *state = StoreState::default())
    }

    fn persist(&self, state: &StoreState) -> Result<()> {
        let Some(path) = &self.path else {
            return Ok(());
        };
        let dir = path.parent().unwrap_or_else(|| Path::new("."));
        let mut tmp = NamedTempFile::new_in(dir)?;
        serde_json::to_writer(&mut tmp, state)?;
        tmp.flush()?;
        tmp.persist(path).map_err(|e| e.error)?;
        debug!(path = %path.display(), "persisted extension store");
        Ok(())
    }
}
