use std::path::Path;

use serde::Serialize;

use crate::error::ReportError;

use super::outcome::{RunReport, Tally};

#[derive(Serialize)]
struct ReportDocument<'report> {
    tool: &'static str,
    version: &'static str,
    scenarios: Tally,
    steps: Tally,
    #[serde(flatten)]
    run: &'report RunReport,
}

/// Writes the run as pretty-printed JSON, creating parent directories.
///
/// # Errors
///
/// Returns an error if the report cannot be serialized or written.
pub async fn write_report(path: &Path, report: &RunReport) -> Result<(), ReportError> {
    let document = ReportDocument {
        tool: env!("CARGO_PKG_NAME"),
        version: env!("CARGO_PKG_VERSION"),
        scenarios: report.scenario_tally(),
        steps: report.step_tally(),
        run: report,
    };
    let payload =
        serde_json::to_string_pretty(&document).map_err(|err| ReportError::Serialize { source: err })?;

    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        tokio::fs::create_dir_all(parent)
            .await
            .map_err(|err| ReportError::CreateDir {
                path: parent.to_path_buf(),
                source: err,
            })?;
    }
    tokio::fs::write(path, payload)
        .await
        .map_err(|err| ReportError::Write {
            path: path.to_path_buf(),
            source: err,
        })?;
    tracing::info!("Wrote report to {}", path.display());
    Ok(())
}
