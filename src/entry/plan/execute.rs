use tracing::info;

use crate::error::{AppError, AppResult, ValidationError};
use crate::gherkin::load_features;
use crate::runner::{Runner, summary_lines, write_report};
use crate::steps::StepRegistry;

use super::types::{FeatureRun, RunPlan};

pub(crate) async fn execute_plan(plan: RunPlan) -> AppResult<()> {
    match plan {
        RunPlan::ListSteps => list_steps(),
        RunPlan::Features(run) => run_features(run).await,
    }
}

fn list_steps() -> AppResult<()> {
    let registry = StepRegistry::new().map_err(AppError::step)?;
    for phrase in registry.phrases() {
        println!("{}", phrase);
    }
    Ok(())
}

async fn run_features(run: FeatureRun) -> AppResult<()> {
    let features = load_features(&run.features).map_err(AppError::feature)?;
    info!(
        "Loaded {} feature file(s) from {}",
        features.len(),
        run.features.display()
    );

    let registry = StepRegistry::new().map_err(AppError::step)?;
    let runner = Runner::new(registry, run.settings, run.credentials, run.options);
    let report = runner.run(&features, &run.filter).await;

    println!();
    for line in summary_lines(&report) {
        println!("{}", line);
    }

    if let Some(path) = run.report.as_deref() {
        write_report(path, &report)
            .await
            .map_err(AppError::report)?;
    }

    let tally = report.scenario_tally();
    if tally.total() == 0 {
        return Err(AppError::validation(ValidationError::NoScenariosMatched));
    }
    if !report.is_success() {
        return Err(AppError::validation(ValidationError::ScenariosFailed {
            failed: tally.failed,
            undefined: tally.undefined,
        }));
    }
    Ok(())
}
