//! Persisted subscriber preferences.
//!
//! A small record (subscriber email plus a UI collapse flag) that must
//! survive restarts. Every mutation writes the full record through to the
//! backing storage; construction rehydrates from storage, falling back to
//! defaults when the stored value is absent, corrupt, or an older shape.
//!
//! The storage backend is injected so tests (and any embedding without a
//! writable data dir) can run against [`MemoryStorage`].

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Mutex;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::warn;

/// Storage key the record is persisted under.
pub const STORAGE_KEY: &str = "signals-subscription";

// ---------------------------------------------------------------------------
// Storage backends
// ---------------------------------------------------------------------------

/// Durable key-value storage, string-valued.
///
/// Reads are infallible by design: any read problem is treated the same as an
/// absent key, so a damaged store can never prevent startup.
pub trait StorageBackend: Send + Sync {
    /// Returns the stored value for `key`, or `None` if absent/unreadable.
    fn load(&self, key: &str) -> Option<String>;

    /// Stores `value` under `key`, replacing any previous value.
    fn save(&self, key: &str, value: &str) -> Result<()>;
}

/// File-backed storage: one JSON file per key under a data directory.
pub struct FileStorage {
    dir: PathBuf,
}

impl FileStorage {
    /// Storage rooted at the platform data directory (e.g.
    /// `~/.local/share/sigdash` on Linux).
    pub fn new() -> Result<Self> {
        let base = dirs::data_dir().context("no platform data directory available")?;
        Ok(Self { dir: base.join("sigdash") })
    }

    /// Storage rooted at an explicit directory.
    pub fn with_dir(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

impl StorageBackend for FileStorage {
    fn load(&self, key: &str) -> Option<String> {
        std::fs::read_to_string(self.path_for(key)).ok()
    }

    fn save(&self, key: &str, value: &str) -> Result<()> {
        std::fs::create_dir_all(&self.dir)
            .with_context(|| format!("creating storage dir {}", self.dir.display()))?;
        std::fs::write(self.path_for(key), value)
            .with_context(|| format!("writing storage key '{key}'"))
    }
}

/// In-memory storage for tests; contents are lost on drop.
#[derive(Default)]
pub struct MemoryStorage {
    entries: Mutex<HashMap<String, String>>,
}

impl StorageBackend for MemoryStorage {
    fn load(&self, key: &str) -> Option<String> {
        self.entries.lock().ok()?.get(key).cloned()
    }

    fn save(&self, key: &str, value: &str) -> Result<()> {
        self.entries
            .lock()
            .map_err(|_| anyhow::anyhow!("storage mutex poisoned"))?
            .insert(key.to_string(), value.to_string());
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Preference record
// ---------------------------------------------------------------------------

/// The persisted record.
///
/// Fields default individually so older stored shapes (historically just
/// `{"email": ...}`) still decode; unknown future fields are ignored.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PreferenceRecord {
    /// Subscriber email; `None` until subscribed, cleared on unsubscribe.
    pub email: Option<String>,
    /// Whether the subscription card is collapsed in the UI.
    pub is_minimized: bool,
}

// ---------------------------------------------------------------------------
// Store
// ---------------------------------------------------------------------------

/// Mutable, write-through view over the persisted [`PreferenceRecord`].
///
/// Single-writer, last-write-wins: only one context is assumed to hold the
/// store at a time, so there is no cross-context merge logic.
pub struct SubscriptionStore {
    record: PreferenceRecord,
    backend: Box<dyn StorageBackend>,
}

impl SubscriptionStore {
    /// Build the store, rehydrating from `backend` synchronously.
    pub fn new(backend: Box<dyn StorageBackend>) -> Self {
        let record = backend
            .load(STORAGE_KEY)
            .and_then(|raw| match serde_json::from_str(&raw) {
                Ok(record) => Some(record),
                Err(e) => {
                    warn!("stored preferences unreadable, using defaults: {e}");
                    None
                }
            })
            .unwrap_or_default();
        Self { record, backend }
    }

    pub fn email(&self) -> Option<&str> {
        self.record.email.as_deref()
    }

    pub fn is_minimized(&self) -> bool {
        self.record.is_minimized
    }

    /// Replace the stored email; `None` clears it (unsubscribe/reset).
    pub fn set_email(&mut self, email: Option<String>) -> Result<()> {
        self.record.email = email;
        self.persist()
    }

    /// Toggle the UI collapse flag.
    pub fn set_is_minimized(&mut self, value: bool) -> Result<()> {
        self.record.is_minimized = value;
        self.persist()
    }

    /// Serialize the full record and write it through, no batching.
    fn persist(&self) -> Result<()> {
        let raw = serde_json::to_string(&self.record)?;
        self.backend.save(STORAGE_KEY, &raw)
    }
}
