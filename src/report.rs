use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use tracing::info;

use crate::models::{CampaignGroups, ReportLayout};

/// Default descriptive part of the report file name
pub const DEFAULT_FILE_SUFFIX: &str = "구글 리젝 체크";

/// Report file name for a run date, e.g. "0806 구글 리젝 체크.txt"
pub fn report_file_name(date: NaiveDate, suffix: &str) -> String {
    format!("{} {}.txt", date.format("%m%d"), suffix)
}

/// Render the grouped structure to the report text.
///
/// Each campaign is a name line followed by one line per entry. The grouped
/// layout ends every campaign with a blank line; the flat layout uses the
/// blank line as a separator between campaigns only.
pub fn render(groups: &CampaignGroups, layout: ReportLayout) -> String {
    let mut out = String::new();
    let last = groups.len().saturating_sub(1);

    for (index, (campaign, entries)) in groups.iter().enumerate() {
        out.push_str(campaign);
        out.push('\n');
        for entry in entries {
            out.push_str(&entry.render());
            out.push('\n');
        }
        if layout == ReportLayout::Grouped || index != last {
            out.push('\n');
        }
    }

    out
}

/// Write the report as UTF-8 text, overwriting any previous run's file
pub fn write_report(groups: &CampaignGroups, layout: ReportLayout, path: &Path) -> Result<()> {
    let content = render(groups, layout);

    fs::write(path, content)
        .with_context(|| format!("Failed to write report: {}", path.display()))?;

    info!(path = %path.display(), campaigns = groups.len(), "Report written");

    Ok(())
}
