use std::fs;
use std::path::{Path, PathBuf};

use serde::{Serialize, de::DeserializeOwned};
use tracing::{debug, warn};

use crate::common::error::AppError;
use crate::domain::{
    config::BillingConfig, device::Device, fleet::Fleet, history::History,
    history::HistoryRecord, workspace::Workspace,
};

/// Blob names carried over from the original tool's storage keys.
pub const PRINTERS_FILE: &str = "printers_v4.json";
pub const HISTORY_FILE: &str = "agl_history_v1.json";
pub const CONFIG_FILE: &str = "config.json";

/// Durable mirror of the workspace: one JSON file per blob, rewritten
/// wholesale after every mutating command. Loads are tolerant (a missing or
/// unreadable blob falls back to its default); writes are surfaced as errors
/// rather than silently lost.
pub struct Store {
    dir: PathBuf,
}

impl Store {
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self, AppError> {
        let dir = dir.into();
        fs::create_dir_all(&dir).map_err(|source| AppError::Store {
            path: dir.display().to_string(),
            source,
        })?;
        Ok(Self { dir })
    }

    pub fn load(&self) -> Result<Workspace, AppError> {
        let devices: Vec<Device> = self.load_blob(PRINTERS_FILE);
        let records: Vec<HistoryRecord> = self.load_blob(HISTORY_FILE);
        let config: BillingConfig = self.load_blob(CONFIG_FILE);

        Ok(Workspace {
            fleet: Fleet::from_devices(devices),
            history: History::from_records(records),
            config,
        })
    }

    pub fn save(&self, workspace: &Workspace) -> Result<(), AppError> {
        self.save_blob(PRINTERS_FILE, &workspace.fleet.devices())?;
        self.save_blob(HISTORY_FILE, &workspace.history.records())?;
        self.save_blob(CONFIG_FILE, &workspace.config)?;
        Ok(())
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path(&self, file: &str) -> PathBuf {
        self.dir.join(file)
    }

    // A blob that is missing or fails to parse yields the default, so a
    // damaged store never blocks startup.
    fn load_blob<T: DeserializeOwned + Default>(&self, file: &str) -> T {
        let path = self.path(file);
        let raw = match fs::read_to_string(&path) {
            Ok(raw) => raw,
            Err(err) => {
                if err.kind() != std::io::ErrorKind::NotFound {
                    warn!(path = %path.display(), %err, "unreadable store blob, using default");
                }
                return T::default();
            }
        };
        match serde_json::from_str(&raw) {
            Ok(value) => value,
            Err(err) => {
                warn!(path = %path.display(), %err, "malformed store blob, using default");
                T::default()
            }
        }
    }

    fn save_blob<T: Serialize>(&self, file: &str, value: &T) -> Result<(), AppError> {
        let path = self.path(file);
        let json = serde_json::to_string_pretty(value)?;
        fs::write(&path, json).map_err(|source| AppError::Store {
            path: path.display().to_string(),
            source,
        })?;
        debug!(path = %path.display(), "store blob written");
        Ok(())
    }
}
