use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::NaiveDate;
use tracing::{debug, info};

use super::Store;
use crate::models::RejectedAd;

/// JSON file-based store for local runs, one file per (run date, team)
pub struct JsonStore {
    base_path: PathBuf,
}

impl JsonStore {
    pub fn new(base_path: impl AsRef<Path>) -> Result<Self> {
        let base_path = base_path.as_ref().to_path_buf();
        fs::create_dir_all(&base_path)
            .with_context(|| format!("Failed to create store directory: {}", base_path.display()))?;

        info!(path = %base_path.display(), "Initialized JSON store");

        Ok(Self { base_path })
    }

    fn run_path(&self, run_date: NaiveDate, team: &str) -> PathBuf {
        self.base_path.join(format!("{run_date}_{team}.json"))
    }
}

impl Store for JsonStore {
    fn save(&self, run_date: NaiveDate, team: &str, records: &[RejectedAd]) -> Result<()> {
        let path = self.run_path(run_date, team);

        let mut existing = load_records(&path)?;
        existing.extend(records.iter().cloned());

        let content = serde_json::to_string_pretty(&existing)?;
        fs::write(&path, content)
            .with_context(|| format!("Failed to write store file: {}", path.display()))?;

        debug!(%run_date, team, appended = records.len(), "Saved rejected ads");

        Ok(())
    }

    fn query(&self, run_date: NaiveDate, team: &str) -> Result<Vec<RejectedAd>> {
        load_records(&self.run_path(run_date, team))
    }
}

fn load_records(path: &Path) -> Result<Vec<RejectedAd>> {
    if !path.exists() {
        return Ok(Vec::new());
    }

    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read store file: {}", path.display()))?;

    serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse store file: {}", path.display()))
}
