use chrono::{DateTime, Utc};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StepStatus {
    Passed,
    Failed,
    Skipped,
    Undefined,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ScenarioStatus {
    Passed,
    Failed,
    Skipped,
    Undefined,
}

#[derive(Debug, Clone, Serialize)]
pub struct StepResult {
    pub keyword: &'static str,
    pub text: String,
    pub line: usize,
    pub status: StepStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    pub duration_ms: u64,
}

impl StepResult {
    #[must_use]
    pub fn display(&self) -> String {
        format!("{} {}", self.keyword, self.text)
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ScenarioResult {
    pub name: String,
    pub line: usize,
    pub tags: Vec<String>,
    pub status: ScenarioStatus,
    pub steps: Vec<StepResult>,
    pub duration_ms: u64,
}

impl ScenarioResult {
    #[must_use]
    pub fn new(
        name: String,
        line: usize,
        tags: Vec<String>,
        steps: Vec<StepResult>,
        duration_ms: u64,
    ) -> Self {
        let status = scenario_status(&steps);
        Self {
            name,
            line,
            tags,
            status,
            steps,
            duration_ms,
        }
    }

    /// The step that stopped the scenario, if one failed.
    #[must_use]
    pub fn failed_step(&self) -> Option<&StepResult> {
        self.steps
            .iter()
            .find(|step| step.status == StepStatus::Failed)
    }
}

fn scenario_status(steps: &[StepResult]) -> ScenarioStatus {
    let any = |status: StepStatus| steps.iter().any(|step| step.status == status);
    if any(StepStatus::Failed) {
        ScenarioStatus::Failed
    } else if any(StepStatus::Undefined) {
        ScenarioStatus::Undefined
    } else if any(StepStatus::Skipped) {
        ScenarioStatus::Skipped
    } else {
        ScenarioStatus::Passed
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct FeatureResult {
    pub name: String,
    pub path: String,
    pub scenarios: Vec<ScenarioResult>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Tally {
    pub passed: usize,
    pub failed: usize,
    pub skipped: usize,
    pub undefined: usize,
}

impl Tally {
    #[must_use]
    pub const fn total(&self) -> usize {
        self.passed
            .saturating_add(self.failed)
            .saturating_add(self.skipped)
            .saturating_add(self.undefined)
    }

    fn count_scenario(&mut self, status: ScenarioStatus) {
        let slot = match status {
            ScenarioStatus::Passed => &mut self.passed,
            ScenarioStatus::Failed => &mut self.failed,
            ScenarioStatus::Skipped => &mut self.skipped,
            ScenarioStatus::Undefined => &mut self.undefined,
        };
        *slot = slot.saturating_add(1);
    }

    fn count_step(&mut self, status: StepStatus) {
        let slot = match status {
            StepStatus::Passed => &mut self.passed,
            StepStatus::Failed => &mut self.failed,
            StepStatus::Skipped => &mut self.skipped,
            StepStatus::Undefined => &mut self.undefined,
        };
        *slot = slot.saturating_add(1);
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct RunReport {
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    pub duration_ms: u64,
    pub dry_run: bool,
    pub features: Vec<FeatureResult>,
}

impl RunReport {
    pub fn scenarios(&self) -> impl Iterator<Item = (&FeatureResult, &ScenarioResult)> {
        self.features.iter().flat_map(|feature| {
            feature
                .scenarios
                .iter()
                .map(move |scenario| (feature, scenario))
        })
    }

    #[must_use]
    pub fn scenario_tally(&self) -> Tally {
        let mut tally = Tally::default();
        for (_, scenario) in self.scenarios() {
            tally.count_scenario(scenario.status);
        }
        tally
    }

    #[must_use]
    pub fn step_tally(&self) -> Tally {
        let mut tally = Tally::default();
        for (_, scenario) in self.scenarios() {
            for step in &scenario.steps {
                tally.count_step(step.status);
            }
        }
        tally
    }

    /// True when nothing failed and every step had a definition.
    #[must_use]
    pub fn is_success(&self) -> bool {
        let tally = self.scenario_tally();
        tally.failed == 0 && tally.undefined == 0
    }
}
