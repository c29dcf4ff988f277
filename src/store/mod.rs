pub mod json;
pub mod postgres;

pub use json::JsonStore;
pub use postgres::PostgresStore;

use anyhow::Result;
use chrono::NaiveDate;

use crate::models::RejectedAd;

/// Trait for rejected-ad persistence backends.
///
/// Records are appended per run and queried back by run date and team; no
/// uniqueness constraint is assumed beyond what callers enforce.
pub trait Store: Send + Sync {
    /// Append the records observed on one run
    fn save(&self, run_date: NaiveDate, team: &str, records: &[RejectedAd]) -> Result<()>;

    /// Load the records persisted for a run date and team
    fn query(&self, run_date: NaiveDate, team: &str) -> Result<Vec<RejectedAd>>;
}
