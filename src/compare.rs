use std::collections::HashSet;

use crate::models::{ComparisonResult, RejectedAd};

/// Diff two persisted rejection sets for a team.
///
/// `new` holds records present today and absent the prior day, `resolved` the
/// opposite direction. Identity is the whole (campaign, ad name, reasons)
/// record; the output order is unspecified.
pub fn compare(today: &[RejectedAd], yesterday: &[RejectedAd]) -> ComparisonResult {
    let today_set: HashSet<&RejectedAd> = today.iter().collect();
    let yesterday_set: HashSet<&RejectedAd> = yesterday.iter().collect();

    ComparisonResult {
        new: today_set
            .difference(&yesterday_set)
            .map(|record| (*record).clone())
            .collect(),
        resolved: yesterday_set
            .difference(&today_set)
            .map(|record| (*record).clone())
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(campaign: &str, ad_name: &str, reasons: &str) -> RejectedAd {
        RejectedAd {
            campaign: campaign.to_string(),
            ad_name: ad_name.to_string(),
            reasons: reasons.to_string(),
        }
    }

    fn as_set(records: &[RejectedAd]) -> HashSet<RejectedAd> {
        records.iter().cloned().collect()
    }

    #[test]
    fn test_empty_inputs_yield_empty_result() {
        let result = compare(&[], &[]);
        assert!(result.new.is_empty());
        assert!(result.resolved.is_empty());
    }

    #[test]
    fn test_today_only_record_is_new() {
        let today = vec![record("c1", "a1", "r1")];
        let result = compare(&today, &[]);

        assert_eq!(as_set(&result.new), as_set(&today));
        assert!(result.resolved.is_empty());
    }

    #[test]
    fn test_yesterday_only_record_is_resolved() {
        let yesterday = vec![record("c1", "a1", "r1")];
        let result = compare(&[], &yesterday);

        assert!(result.new.is_empty());
        assert_eq!(as_set(&result.resolved), as_set(&yesterday));
    }

    #[test]
    fn test_overlap_appears_in_neither_direction() {
        let shared = record("c1", "a1", "r1");
        let today = vec![shared.clone(), record("c1", "a2", "r2")];
        let yesterday = vec![shared, record("c2", "a3", "r3")];

        let result = compare(&today, &yesterday);
        assert_eq!(as_set(&result.new), as_set(&[record("c1", "a2", "r2")]));
        assert_eq!(as_set(&result.resolved), as_set(&[record("c2", "a3", "r3")]));
    }

    #[test]
    fn test_changed_reasons_count_as_new_and_resolved() {
        // The reasons string is part of the identity
        let today = vec![record("c1", "a1", "클릭베이트")];
        let yesterday = vec![record("c1", "a1", "일부 제한됨")];

        let result = compare(&today, &yesterday);
        assert_eq!(result.new.len(), 1);
        assert_eq!(result.resolved.len(), 1);
    }
}
