use std::collections::BTreeMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use parking_lot::Mutex;

use super::TokenStore;
use crate::utils::error::ClientError;

/// Token store backed by a JSON object of named slots, the on-disk
/// counterpart of browser local storage. Other slots in the file are left
/// untouched.
#[derive(Debug)]
pub struct FileTokenStore {
    path: PathBuf,
    slot: String,
    io: Mutex<()>,
}

type Slots = BTreeMap<String, String>;

impl FileTokenStore {
    pub fn new(path: impl Into<PathBuf>, slot: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            slot: slot.into(),
            io: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_slots(&self) -> Result<Slots, ClientError> {
        match fs::read(&self.path) {
            Ok(bytes) if bytes.iter().all(u8::is_ascii_whitespace) => Ok(Slots::new()),
            Ok(bytes) => Ok(serde_json::from_slice(&bytes)?),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(Slots::new()),
            Err(e) => Err(e.into()),
        }
    }

    /// Slots to rewrite. A file that no longer parses is replaced rather
    /// than locking the user out; the flag says it must be rewritten.
    fn slots_for_update(&self) -> Result<(Slots, bool), ClientError> {
        match self.read_slots() {
            Ok(slots) => Ok((slots, false)),
            Err(ClientError::StorageFormat(e)) => {
                tracing::warn!(path = %self.path.display(), error = %e, "Session file is corrupt, replacing it");
                Ok((Slots::new(), true))
            }
            Err(e) => Err(e),
        }
    }

    fn write_slots(&self, slots: &Slots) -> Result<(), ClientError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        let tmp = self.path.with_extension("tmp");
        fs::write(&tmp, serde_json::to_vec_pretty(slots)?)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}

impl TokenStore for FileTokenStore {
    fn load(&self) -> Result<Option<String>, ClientError> {
        let _guard = self.io.lock();
        Ok(self.read_slots()?.remove(&self.slot))
    }

    fn save(&self, token: &str) -> Result<(), ClientError> {
        let _guard = self.io.lock();
        let (mut slots, _) = self.slots_for_update()?;
        slots.insert(self.slot.clone(), token.to_string());
        self.write_slots(&slots)?;
        tracing::debug!(path = %self.path.display(), slot = %self.slot, "Token persisted");
        Ok(())
    }

    fn remove(&self) -> Result<(), ClientError> {
        let _guard = self.io.lock();
        let (mut slots, corrupt) = self.slots_for_update()?;
        if slots.remove(&self.slot).is_some() || corrupt {
            self.write_slots(&slots)?;
            tracing::debug!(path = %self.path.display(), slot = %self.slot, "Token removed");
        }
        Ok(())
    }
}
