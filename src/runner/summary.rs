use super::outcome::{RunReport, ScenarioStatus, StepStatus, Tally};

/// Console summary printed after a run.
#[must_use]
pub fn summary_lines(report: &RunReport) -> Vec<String> {
    let mut lines = Vec::new();

    let failures: Vec<String> = report
        .scenarios()
        .filter(|(_, scenario)| scenario.status == ScenarioStatus::Failed)
        .filter_map(|(feature, scenario)| {
            let step = scenario.failed_step()?;
            Some(format!(
                "  {}:{}  {}\n    {}",
                feature.path,
                step.line,
                step.display(),
                step.message.as_deref().unwrap_or("failed")
            ))
        })
        .collect();
    if !failures.is_empty() {
        lines.push("--- Failed steps:".to_owned());
        lines.extend(failures);
        lines.push(String::new());
    }

    let undefined: Vec<String> = report
        .scenarios()
        .flat_map(|(feature, scenario)| {
            scenario
                .steps
                .iter()
                .filter(|step| step.status == StepStatus::Undefined)
                .map(move |step| format!("  {}:{}  {}", feature.path, step.line, step.display()))
        })
        .collect();
    if !undefined.is_empty() {
        lines.push("--- Undefined steps (run `hubcheck list-steps` for phrases):".to_owned());
        lines.extend(undefined);
        lines.push(String::new());
    }

    lines.push(tally_line(report.scenario_tally(), "scenario", "scenarios"));
    lines.push(tally_line(report.step_tally(), "step", "steps"));
    lines.push(format_duration_ms(report.duration_ms));
    if report.dry_run {
        lines.push("(dry run: no requests were sent)".to_owned());
    }
    lines
}

fn tally_line(tally: Tally, singular: &str, plural: &str) -> String {
    let total = tally.total();
    if total == 0 {
        return format!("No {}", plural);
    }
    let noun = if total == 1 { singular } else { plural };
    let parts: Vec<String> = [
        (tally.passed, "passed"),
        (tally.failed, "failed"),
        (tally.skipped, "skipped"),
        (tally.undefined, "undefined"),
    ]
    .iter()
    .filter(|(count, _)| *count > 0)
    .map(|(count, label)| format!("{} {}", count, label))
    .collect();
    format!("{} {} ({})", total, noun, parts.join(", "))
}

fn format_duration_ms(duration_ms: u64) -> String {
    let minutes = duration_ms / 60_000;
    let seconds = (duration_ms % 60_000) / 1_000;
    let millis = duration_ms % 1_000;
    format!("{}m{}.{:03}s", minutes, seconds, millis)
}
