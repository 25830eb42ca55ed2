use crate::domain::model::LedgerState;
use crate::domain::ports::LedgerStore;
use crate::utils::error::{Result, SuiteError};
use std::cell::RefCell;
use std::fs;
use std::path::{Path, PathBuf};

/// Ledger kept as pretty-printed JSON on local disk.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn persistence_error(&self, message: impl std::fmt::Display) -> SuiteError {
        SuiteError::persistence(self.path.display().to_string(), message.to_string())
    }
}

impl LedgerStore for JsonFileStore {
    fn load(&self) -> Result<Option<LedgerState>> {
        if !self.path.exists() {
            return Ok(None);
        }

        let content = fs::read_to_string(&self.path).map_err(|e| self.persistence_error(e))?;
        let state = serde_json::from_str(&content).map_err(|e| self.persistence_error(e))?;
        Ok(Some(state))
    }

    fn save(&self, state: &LedgerState) -> Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| self.persistence_error(e))?;
        }

        let json = serde_json::to_string_pretty(state)?;
        fs::write(&self.path, json).map_err(|e| self.persistence_error(e))?;
        tracing::debug!("saved ledger to {}", self.path.display());
        Ok(())
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}

/// Volatile store: survives for the life of the value only.
#[derive(Debug, Default)]
pub struct MemoryStore {
    saved: RefCell<Option<LedgerState>>,
    saves: RefCell<usize>,
}

impl MemoryStore {
    pub fn with_state(state: LedgerState) -> Self {
        Self {
            saved: RefCell::new(Some(state)),
            saves: RefCell::new(0),
        }
    }

    pub fn snapshot(&self) -> Option<LedgerState> {
        self.saved.borrow().clone()
    }

    pub fn save_count(&self) -> usize {
        *self.saves.borrow()
    }
}

impl LedgerStore for MemoryStore {
    fn load(&self) -> Result<Option<LedgerState>> {
        Ok(self.snapshot())
    }

    fn save(&self, state: &LedgerState) -> Result<()> {
        *self.saved.borrow_mut() = Some(state.clone());
        *self.saves.borrow_mut() += 1;
        Ok(())
    }

    fn describe(&self) -> String {
        "memory".to_string()
    }
}
