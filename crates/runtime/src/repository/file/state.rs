//! File-based UserStore implementation.

use std::collections::BTreeMap;
use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use gacha_core::UserGachaState;

use crate::repository::{RepositoryError, Result, UserStore};

/// Whole store document: user id → state.
type StoreDocument = BTreeMap<String, UserGachaState>;

/// File-based implementation of UserStore.
///
/// Keeps every user in a single JSON document:
///
/// ```text
/// { "<user id>": { "collected": [10000, 10002], "total_count": 17 }, ... }
/// ```
///
/// Every operation reads the full document and, when it changes anything,
/// rewrites it through a temp file and an atomic rename. A mutex serializes
/// all operations on the instance, including the write that establishes a
/// default record on first lookup.
pub struct FileUserStore {
    path: PathBuf,
    lock: Mutex<()>,
}

impl FileUserStore {
    /// Open (or create) a store at `path`.
    ///
    /// A missing file is initialized to an empty mapping. Existing content is
    /// validated eagerly so corruption surfaces before the first draw.
    pub fn new(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| RepositoryError::io(parent, e))?;
        }

        let store = Self {
            path,
            lock: Mutex::new(()),
        };

        if store.path.exists() {
            store.read_document()?;
        } else {
            store.write_document(&StoreDocument::new())?;
            tracing::debug!("Initialized empty user store at {}", store.path.display());
        }

        Ok(store)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_document(&self) -> Result<StoreDocument> {
        let json = match fs::read_to_string(&self.path) {
            Ok(json) => json,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(StoreDocument::new()),
            Err(e) => return Err(RepositoryError::io(&self.path, e)),
        };

        serde_json::from_str(&json).map_err(|e| RepositoryError::CorruptedData {
            path: self.path.clone(),
            reason: e.to_string(),
        })
    }

    fn write_document(&self, document: &StoreDocument) -> Result<()> {
        let temp_path = self.path.with_extension("json.tmp");

        let json =
            serde_json::to_string(document).map_err(|e| RepositoryError::Json(e.to_string()))?;
        let mut file = fs::File::create(&temp_path).map_err(|e| RepositoryError::io(&temp_path, e))?;
        file.write_all(json.as_bytes())
            .and_then(|()| file.sync_all())
            .map_err(|e| RepositoryError::io(&temp_path, e))?;
        drop(file);

        // Atomic rename
        fs::rename(&temp_path, &self.path).map_err(|e| RepositoryError::io(&self.path, e))?;

        Ok(())
    }
}

impl UserStore for FileUserStore {
    fn load(&self, user_id: &str) -> Result<UserGachaState> {
        let _guard = self.lock.lock().map_err(|_| RepositoryError::LockPoisoned)?;

        let mut document = self.read_document()?;
        if let Some(state) = document.get(user_id) {
            tracing::debug!("Loaded gacha state for user {}", user_id);
            return Ok(state.clone());
        }

        let state = UserGachaState::default();
        document.insert(user_id.to_string(), state.clone());
        self.write_document(&document)?;
        tracing::debug!("Created default gacha state for user {}", user_id);

        Ok(state)
    }

    fn save(&self, user_id: &str, state: &UserGachaState) -> Result<()> {
        let _guard = self.lock.lock().map_err(|_| RepositoryError::LockPoisoned)?;

        let mut document = self.read_document()?;
        document.insert(user_id.to_string(), state.clone());
        self.write_document(&document)?;

        tracing::debug!(
            "Saved gacha state for user {} ({} collected, pity {})",
            user_id,
            state.collected.len(),
            state.pulls_since_top_pickup
        );

        Ok(())
    }
}
