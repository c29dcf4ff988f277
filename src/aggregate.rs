use crate::models::{CampaignGroups, ExportRow, RejectionEntry};
use crate::normalize::normalize_reason;

/// Clauses carrying this marker describe policies the ad did not violate
const NO_RESTRICTION: &str = "(제한 없음)";

/// Group filtered rows by campaign, in input order, and deduplicate each
/// campaign's entries keeping the first occurrence.
pub fn aggregate(rows: &[ExportRow]) -> CampaignGroups {
    let mut groups = CampaignGroups::default();

    for row in rows {
        let entry = RejectionEntry::new(row.ad_name.clone(), joined_reasons(&row.policy));
        groups.push(row.campaign.clone(), entry);
    }

    groups.dedup();
    groups
}

/// Split a policy field on `;`, drop no-restriction clauses, normalize the
/// survivors and join them with ", ". An empty result is allowed.
fn joined_reasons(policy: &str) -> String {
    policy
        .split(';')
        .filter(|clause| !clause.contains(NO_RESTRICTION))
        .map(normalize_reason)
        .collect::<Vec<_>>()
        .join(", ")
}
