use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{Res, config};

/// Process-wide state persisted between invocations.
///
/// Only the CLI reads and writes it; the curation logic never consults it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AppState {
    #[serde(default)]
    pub last_monthly_run_utc: Option<DateTime<Utc>>,
}

pub struct StateManager {
    path: PathBuf,
    state: AppState,
}

impl StateManager {
    pub fn new() -> Self {
        Self::at(Self::default_path())
    }

    pub fn at(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            state: AppState::default(),
        }
    }

    /// Reads the whole state file. A missing file yields the default state.
    pub async fn load(mut self) -> Res<Self> {
        if !self.path.exists() {
            return Ok(self);
        }

        let json = async_fs::read_to_string(&self.path).await?;
        self.state = serde_json::from_str(&json)?;
        Ok(self)
    }

    /// Writes the whole state file.
    pub async fn persist(&self) -> Res<()> {
        if let Some(parent) = self.path.parent() {
            async_fs::create_dir_all(parent).await?;
        }

        let json = serde_json::to_string_pretty(&self.state)?;
        async_fs::write(&self.path, json).await?;
        Ok(())
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn record_monthly_run(&mut self, at: DateTime<Utc>) -> &mut Self {
        self.state.last_monthly_run_utc = Some(at);
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn default_path() -> PathBuf {
        let mut path = config::data_dir();
        path.push("state.json");
        path
    }
}

impl Default for StateManager {
    fn default() -> Self {
        Self::new()
    }
}
