use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum FeatureError {
    #[error("Feature path '{path}' does not exist.")]
    PathMissing { path: PathBuf },
    #[error("Failed to read feature '{path}': {source}")]
    ReadFeature {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to list feature directory '{path}': {source}")]
    ReadDir {
        path: PathBuf,
        #[source]
        source: walkdir::Error,
    },
    #[error("No .feature files found under '{path}'.")]
    NoFeatures { path: PathBuf },
    #[error("{path}: missing 'Feature:' header.")]
    MissingFeature { path: PathBuf },
    #[error("{path}:{line}: a file may only declare one 'Feature:'.")]
    DuplicateFeature { path: PathBuf, line: usize },
    #[error("{path}:{line}: 'Background:' must come before any scenario.")]
    LateBackground { path: PathBuf, line: usize },
    #[error("{path}:{line}: step '{text}' is not inside a scenario or background.")]
    StepOutsideScenario {
        path: PathBuf,
        line: usize,
        text: String,
    },
    #[error("{path}:{line}: table row is not attached to a step.")]
    TableOutsideStep { path: PathBuf, line: usize },
    #[error("{path}:{line}: table row has {found} cells, expected {expected}.")]
    RaggedTable {
        path: PathBuf,
        line: usize,
        expected: usize,
        found: usize,
    },
    #[error("{path}:{line}: unterminated table row '{text}'.")]
    UnterminatedRow {
        path: PathBuf,
        line: usize,
        text: String,
    },
    #[error("{path}:{line}: tags are not followed by a feature or scenario.")]
    DanglingTags { path: PathBuf, line: usize },
    #[error("{path}:{line}: unexpected line '{text}'.")]
    UnexpectedLine {
        path: PathBuf,
        line: usize,
        text: String,
    },
}
