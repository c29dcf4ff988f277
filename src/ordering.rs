use std::collections::HashMap;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::config::Config;

/// Resolves the fixed brand ordering a team's input files are processed in.
///
/// The mapping is injected at construction so tests and alternative
/// deployments can substitute their own tables.
pub struct TeamOrderResolver {
    orders: HashMap<String, Vec<String>>,
}

impl TeamOrderResolver {
    pub fn new(orders: HashMap<String, Vec<String>>) -> Self {
        Self { orders }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.teams.clone())
    }

    /// Brand order for a team; unknown teams get an empty order
    pub fn order_for(&self, team: &str) -> &[String] {
        self.orders.get(team).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Sort input files by the team's brand order, matching the
    /// `_{brand}.csv` file-name convention.
    ///
    /// Files matching no configured brand are excluded from the result and
    /// logged. A team without a configured order keeps the input order.
    pub fn sort_files(&self, team: &str, files: &[PathBuf]) -> Vec<PathBuf> {
        let order = self.order_for(team);
        if order.is_empty() {
            debug!(team, "No brand order configured, keeping input order");
            return files.to_vec();
        }

        let mut sorted = Vec::new();
        for brand in order {
            let suffix = format!("_{brand}.csv");
            for file in files {
                if matches_suffix(file, &suffix) {
                    sorted.push(file.clone());
                }
            }
        }

        for file in files {
            if !sorted.contains(file) {
                warn!(
                    file = %file.display(),
                    team,
                    "File matches no configured brand, excluded from this run"
                );
            }
        }

        sorted
    }
}

fn matches_suffix(path: &Path, suffix: &str) -> bool {
    path.file_name()
        .and_then(|name| name.to_str())
        .map_or(false, |name| name.ends_with(suffix))
}
