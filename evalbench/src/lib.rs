//! Evaluation harness aggregating classification records into accuracy tables.

pub mod percentage;
pub mod record;
pub mod render;
pub mod report;

pub use percentage::Percentage;
pub use record::{EvaluationRecord, FailedExample};
pub use render::{render_listing, render_report, render_stats};
pub use report::{ClassTotals, EvaluationReport, StatsRow};
