use std::path::PathBuf;

use anyhow::Result;
use chrono::NaiveDate;
use tracing::info;

use crate::aggregate::aggregate;
use crate::config::Config;
use crate::export::{filter_rejected, parse_export};
use crate::models::{CampaignGroups, RejectedAd, ReportLayout};
use crate::ordering::TeamOrderResolver;
use crate::report::{report_file_name, write_report};

/// Outcome of one report run
pub struct RunOutcome {
    pub groups: CampaignGroups,
    /// Records to hand to the persistence collaborator
    pub records: Vec<RejectedAd>,
    pub report_path: PathBuf,
}

/// Drives one report run: order input files, parse and filter each one,
/// aggregate by campaign and write the report.
pub struct Pipeline {
    resolver: TeamOrderResolver,
    layout: ReportLayout,
    output_dir: PathBuf,
    file_suffix: String,
}

impl Pipeline {
    pub fn new(
        resolver: TeamOrderResolver,
        layout: ReportLayout,
        output_dir: PathBuf,
        file_suffix: String,
    ) -> Self {
        Self {
            resolver,
            layout,
            output_dir,
            file_suffix,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(
            TeamOrderResolver::from_config(config),
            config.report.layout,
            config.report.output_dir.clone(),
            config.report.file_suffix.clone(),
        )
    }

    /// Process a batch of export files for a team.
    ///
    /// Any file failing to parse aborts the whole run; a partial report would
    /// be misleading.
    pub fn run(&self, team: &str, files: &[PathBuf], run_date: NaiveDate) -> Result<RunOutcome> {
        info!(team, files = files.len(), %run_date, "Starting report run");

        let ordered = self.resolver.sort_files(team, files);

        let mut rows = Vec::new();
        for file in &ordered {
            let parsed = parse_export(file)?;
            rows.extend(filter_rejected(parsed));
        }

        let groups = aggregate(&rows);
        let records = groups.records();

        let report_path = self
            .output_dir
            .join(report_file_name(run_date, &self.file_suffix));
        write_report(&groups, self.layout, &report_path)?;

        info!(
            campaigns = groups.len(),
            records = records.len(),
            report = %report_path.display(),
            "Report run complete"
        );

        Ok(RunOutcome {
            groups,
            records,
            report_path,
        })
    }
}
