use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::error::FeatureError;

use super::parse::parse_feature;
use super::types::Feature;

const FEATURE_EXTENSION: &str = "feature";

/// Lists feature files under `path`, sorted. A file path is returned as-is.
/// Symlinked directories are not descended into.
///
/// # Errors
///
/// Returns an error when the path does not exist, a directory cannot be read,
/// or a directory contains no `.feature` files.
pub fn discover_feature_files(path: &Path) -> Result<Vec<PathBuf>, FeatureError> {
    if !path.exists() {
        return Err(FeatureError::PathMissing {
            path: path.to_path_buf(),
        });
    }
    if path.is_file() {
        return Ok(vec![path.to_path_buf()]);
    }

    let mut files = Vec::new();
    collect_feature_files(path, &mut files)?;
    if files.is_empty() {
        return Err(FeatureError::NoFeatures {
            path: path.to_path_buf(),
        });
    }
    files.sort();
    Ok(files)
}

fn collect_feature_files(dir: &Path, files: &mut Vec<PathBuf>) -> Result<(), FeatureError> {
    for entry in WalkDir::new(dir).follow_links(false) {
        let entry = entry.map_err(|err| FeatureError::ReadDir {
            path: err.path().unwrap_or(dir).to_path_buf(),
            source: err,
        })?;
        if entry.file_type().is_dir() {
            continue;
        }
        if entry
            .path()
            .extension()
            .is_some_and(|ext| ext == FEATURE_EXTENSION)
        {
            files.push(entry.into_path());
        }
    }
    Ok(())
}

/// Discovers and parses every feature file under `path`.
///
/// # Errors
///
/// Returns the first discovery, read, or parse error.
pub fn load_features(path: &Path) -> Result<Vec<Feature>, FeatureError> {
    let mut features = Vec::new();
    for file in discover_feature_files(path)? {
        let source = std::fs::read_to_string(&file).map_err(|err| FeatureError::ReadFeature {
            path: file.clone(),
            source: err,
        })?;
        let feature = parse_feature(&file, &source)?;
        tracing::debug!(
            "Loaded feature '{}' ({} scenarios) from {}",
            feature.name,
            feature.scenarios.len(),
            file.display()
        );
        features.push(feature);
    }
    Ok(features)
}
