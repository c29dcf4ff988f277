pub mod aggregate;
pub mod compare;
pub mod config;
pub mod export;
pub mod models;
pub mod normalize;
pub mod ordering;
pub mod pipeline;
pub mod report;
pub mod store;

pub use aggregate::aggregate;
pub use compare::compare;
pub use config::Config;
pub use export::{filter_rejected, parse_export, ExportError};
pub use models::*;
pub use normalize::normalize_reason;
pub use ordering::TeamOrderResolver;
pub use pipeline::{Pipeline, RunOutcome};
pub use report::{render, report_file_name, write_report};
pub use store::{JsonStore, PostgresStore, Store};
