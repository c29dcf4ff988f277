use std::collections::HashSet;

use clap::ValueEnum;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// One data row of an export file, kept only while the file is parsed
#[derive(Debug, Clone)]
pub struct ExportRow {
    pub ad_name: String,
    pub ad_type: String,
    pub campaign: String,
    /// Approval status, present only when the export carries the column
    pub status: Option<String>,
    /// Raw policy field with `;`-delimited reason clauses
    pub policy: String,
}

/// A rejected ad with its normalized, joined rejection reasons
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RejectionEntry {
    pub ad_name: String,
    pub reasons: String,
}

impl RejectionEntry {
    pub fn new(ad_name: impl Into<String>, reasons: impl Into<String>) -> Self {
        Self {
            ad_name: ad_name.into(),
            reasons: reasons.into(),
        }
    }

    /// Report line for this entry
    pub fn render(&self) -> String {
        format!("{}({})", self.ad_name, self.reasons)
    }
}

/// Rejected ads grouped by campaign, campaigns in first-seen order
#[derive(Debug, Clone, Default)]
pub struct CampaignGroups {
    groups: IndexMap<String, Vec<RejectionEntry>>,
}

impl CampaignGroups {
    /// Append an entry to a campaign, creating the campaign on first sight
    pub fn push(&mut self, campaign: String, entry: RejectionEntry) {
        self.groups.entry(campaign).or_default().push(entry);
    }

    /// Drop repeated entries per campaign, keeping the first occurrence
    pub fn dedup(&mut self) {
        for entries in self.groups.values_mut() {
            let mut seen = HashSet::new();
            entries.retain(|entry| seen.insert(entry.clone()));
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Vec<RejectionEntry>)> {
        self.groups.iter()
    }

    pub fn get(&self, campaign: &str) -> Option<&[RejectionEntry]> {
        self.groups.get(campaign).map(Vec::as_slice)
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Flatten to the records persisted for a run
    pub fn records(&self) -> Vec<RejectedAd> {
        self.groups
            .iter()
            .flat_map(|(campaign, entries)| {
                entries.iter().map(move |entry| RejectedAd {
                    campaign: campaign.clone(),
                    ad_name: entry.ad_name.clone(),
                    reasons: entry.reasons.clone(),
                })
            })
            .collect()
    }
}

/// One persisted rejected-ad record; run date and team are keys of the
/// save/query interface, not part of the record
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RejectedAd {
    pub campaign: String,
    pub ad_name: String,
    pub reasons: String,
}

/// Day-over-day diff of two persisted rejection sets
#[derive(Debug, Clone, Default)]
pub struct ComparisonResult {
    /// Present today, absent the prior day
    pub new: Vec<RejectedAd>,
    /// Present the prior day, absent today
    pub resolved: Vec<RejectedAd>,
}

/// Report layout choice
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ReportLayout {
    /// Blank line between campaigns only
    Flat,
    /// Blank line after every campaign, the last one included
    #[default]
    Grouped,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_entry() {
        let entry = RejectionEntry::new("ad_a", "클릭베이트");
        assert_eq!(entry.render(), "ad_a(클릭베이트)");

        let empty = RejectionEntry::new("ad_b", "");
        assert_eq!(empty.render(), "ad_b()");
    }

    #[test]
    fn test_stable_dedup() {
        let mut groups = CampaignGroups::default();
        for name in ["a", "b", "a", "c", "b"] {
            groups.push("캠페인1".to_string(), RejectionEntry::new(name, "r"));
        }
        groups.dedup();

        let entries = groups.get("캠페인1").unwrap();
        let names: Vec<&str> = entries.iter().map(|e| e.ad_name.as_str()).collect();
        assert_eq!(names, vec!["a", "b", "c"]);
    }

    #[test]
    fn test_dedup_keeps_distinct_reasons() {
        let mut groups = CampaignGroups::default();
        groups.push("c".to_string(), RejectionEntry::new("a", "r1"));
        groups.push("c".to_string(), RejectionEntry::new("a", "r2"));
        groups.dedup();

        assert_eq!(groups.get("c").unwrap().len(), 2);
    }

    #[test]
    fn test_records_flatten_in_order() {
        let mut groups = CampaignGroups::default();
        groups.push("c2".to_string(), RejectionEntry::new("a", "r1"));
        groups.push("c1".to_string(), RejectionEntry::new("b", "r2"));
        groups.push("c2".to_string(), RejectionEntry::new("c", "r3"));

        let records = groups.records();
        assert_eq!(records.len(), 3);
        assert_eq!(records[0].campaign, "c2");
        assert_eq!(records[1].ad_name, "c");
        assert_eq!(records[2].campaign, "c1");
    }
}
