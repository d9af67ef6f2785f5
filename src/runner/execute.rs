use std::time::Instant;

use chrono::Utc;
use tracing::{debug, info, warn};

use crate::gherkin::{Feature, Scenario, Step};
use crate::http::{ClientSettings, Credentials};
use crate::steps::{StepLookup, StepRegistry, World};

use super::filter::ScenarioFilter;
use super::outcome::{
    FeatureResult, RunReport, ScenarioResult, ScenarioStatus, StepResult, StepStatus,
};

#[derive(Debug, Clone, Copy, Default)]
pub struct RunOptions {
    /// Match steps against definitions without sending requests.
    pub dry_run: bool,
    /// Stop after the first failed scenario.
    pub stop_on_failure: bool,
}

/// Runs scenarios one after another, each against a fresh `World`.
#[derive(Debug)]
pub struct Runner {
    registry: StepRegistry,
    settings: ClientSettings,
    credentials: Option<Credentials>,
    options: RunOptions,
}

impl Runner {
    #[must_use]
    pub const fn new(
        registry: StepRegistry,
        settings: ClientSettings,
        credentials: Option<Credentials>,
        options: RunOptions,
    ) -> Self {
        Self {
            registry,
            settings,
            credentials,
            options,
        }
    }

    pub async fn run(&self, features: &[Feature], filter: &ScenarioFilter) -> RunReport {
        let started_at = Utc::now();
        let started = Instant::now();
        let mut results = Vec::with_capacity(features.len());
        let mut stopped = false;

        for feature in features {
            if stopped {
                break;
            }
            let selected: Vec<&Scenario> = feature
                .scenarios
                .iter()
                .filter(|scenario| filter.matches(feature, scenario))
                .collect();
            if selected.is_empty() {
                debug!("Skipping feature '{}': no scenarios selected", feature.name);
                continue;
            }

            info!("Feature: {}", feature.name);
            let mut scenarios = Vec::with_capacity(selected.len());
            for scenario in selected {
                let result = self.run_scenario(feature, scenario).await;
                let failed = result.status == ScenarioStatus::Failed;
                scenarios.push(result);
                if failed && self.options.stop_on_failure {
                    warn!("Stopping after first failed scenario");
                    stopped = true;
                    break;
                }
            }

            results.push(FeatureResult {
                name: feature.name.clone(),
                path: feature.path.display().to_string(),
                scenarios,
            });
        }

        RunReport {
            started_at,
            finished_at: Utc::now(),
            duration_ms: elapsed_ms(started),
            dry_run: self.options.dry_run,
            features: results,
        }
    }

    async fn run_scenario(&self, feature: &Feature, scenario: &Scenario) -> ScenarioResult {
        info!("Scenario: {}", scenario.name);
        let started = Instant::now();
        let mut world = World::new(self.settings.clone(), self.credentials.clone());
        let mut halted = false;
        let mut steps = Vec::new();

        for step in feature.background_steps().iter().chain(&scenario.steps) {
            let result = self.run_step(&mut world, step, halted).await;
            if matches!(result.status, StepStatus::Failed | StepStatus::Undefined) {
                halted = true;
            }
            steps.push(result);
        }

        let mut tags = feature.tags.clone();
        tags.extend(scenario.tags.iter().cloned());
        ScenarioResult::new(
            scenario.name.clone(),
            scenario.line,
            tags,
            steps,
            elapsed_ms(started),
        )
    }

    async fn run_step(&self, world: &mut World, step: &Step, halted: bool) -> StepResult {
        let started = Instant::now();
        let (status, message) = match self.registry.lookup(&step.text) {
            StepLookup::Undefined => (StepStatus::Undefined, None),
            StepLookup::Matched(_) | StepLookup::Ambiguous(_) if halted => {
                (StepStatus::Skipped, None)
            }
            StepLookup::Ambiguous(phrases) => (
                StepStatus::Failed,
                Some(format!("Ambiguous step, matches: {}", phrases.join(" | "))),
            ),
            StepLookup::Matched(_) if self.options.dry_run => (StepStatus::Skipped, None),
            StepLookup::Matched(found) => {
                match world
                    .execute(found.kind, &found.args, step.table.as_ref())
                    .await
                {
                    Ok(()) => (StepStatus::Passed, None),
                    Err(err) => (StepStatus::Failed, Some(err.to_string())),
                }
            }
        };

        match status {
            StepStatus::Passed => debug!("  passed: {}", step.display()),
            StepStatus::Skipped => debug!("  skipped: {}", step.display()),
            StepStatus::Undefined => warn!("  undefined: {} (line {})", step.display(), step.line),
            StepStatus::Failed => warn!(
                "  failed: {} (line {}): {}",
                step.display(),
                step.line,
                message.as_deref().unwrap_or_default()
            ),
        }

        StepResult {
            keyword: step.keyword.as_str(),
            text: step.text.clone(),
            line: step.line,
            status,
            message,
            duration_ms: elapsed_ms(started),
        }
    }
}

fn elapsed_ms(started: Instant) -> u64 {
    u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX)
}
