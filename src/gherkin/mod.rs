//! Gherkin feature files: model, parser, and discovery.
mod discover;
mod parse;
mod types;


pub use discover::{discover_feature_files, load_features};
pub use parse::parse_feature;
pub use types::{Background, DataTable, Feature, Scenario, Step, StepKeyword};
