use std::path::PathBuf;

use crate::http::{ClientSettings, Credentials};
use crate::runner::{RunOptions, ScenarioFilter};

/// Everything a feature run needs once CLI, environment and config are merged.
pub(in crate::entry) struct FeatureRun {
    pub(super) features: PathBuf,
    pub(super) settings: ClientSettings,
    pub(super) credentials: Option<Credentials>,
    pub(super) filter: ScenarioFilter,
    pub(super) options: RunOptions,
    pub(super) report: Option<PathBuf>,
}

pub(in crate::entry) enum RunPlan {
    ListSteps,
    Features(FeatureRun),
}
