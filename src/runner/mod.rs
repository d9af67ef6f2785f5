//! Scenario execution, outcome bookkeeping, and reporting.
mod execute;
mod filter;
mod outcome;
mod report;
mod summary;


pub use execute::{RunOptions, Runner};
pub use filter::{ScenarioFilter, TagFilter};
pub use outcome::{
    FeatureResult, RunReport, ScenarioResult, ScenarioStatus, StepResult, StepStatus, Tally,
};
pub use report::write_report;
pub use summary::summary_lines;
