use std::path::Path;

use crate::error::FeatureError;

use super::types::{Background, DataTable, Feature, Scenario, Step, StepKeyword};

const SCENARIO_HEADERS: [&str; 2] = ["Scenario:", "Example:"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    Preamble,
    Feature,
    Background,
    Scenario,
}

struct ParseState<'path> {
    path: &'path Path,
    feature: Option<Feature>,
    section: Section,
    pending_tags: Vec<String>,
    pending_tags_line: usize,
}

/// Parses the text of one `.feature` file.
///
/// # Errors
///
/// Returns an error with the file path and line number when the text does
/// not follow the supported Gherkin subset.
pub fn parse_feature(path: &Path, source: &str) -> Result<Feature, FeatureError> {
    let mut state = ParseState {
        path,
        feature: None,
        section: Section::Preamble,
        pending_tags: Vec::new(),
        pending_tags_line: 0,
    };

    for (index, raw) in source.lines().enumerate() {
        let line = raw.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        state.consume(line, index.saturating_add(1))?;
    }

    state.finish()
}

impl ParseState<'_> {
    fn consume(&mut self, line: &str, line_no: usize) -> Result<(), FeatureError> {
        if line.starts_with('@') {
            return self.push_tags(line, line_no);
        }
        if let Some(rest) = line.strip_prefix("Feature:") {
            return self.start_feature(rest.trim(), line_no);
        }
        if let Some(name) = scenario_name(line) {
            return self.start_scenario(name, line_no);
        }

        self.reject_pending_tags()?;

        if line.starts_with("Background:") {
            return self.start_background(line_no);
        }
        if line.starts_with('|') {
            return self.push_table_row(line, line_no);
        }
        if self.section == Section::Feature {
            return self.push_text(line, line_no);
        }
        if let Some((keyword, text)) = split_step(line) {
            return self.push_step(keyword, text, line_no);
        }
        self.push_text(line, line_no)
    }

    fn push_tags(&mut self, line: &str, line_no: usize) -> Result<(), FeatureError> {
        for token in line.split_whitespace() {
            if token.starts_with('#') {
                break;
            }
            match token.strip_prefix('@') {
                Some(tag) if !tag.is_empty() => self.pending_tags.push(tag.to_owned()),
                Some(_) | None => {
                    return Err(FeatureError::UnexpectedLine {
                        path: self.path.to_path_buf(),
                        line: line_no,
                        text: line.to_owned(),
                    });
                }
            }
        }
        if self.pending_tags_line == 0 {
            self.pending_tags_line = line_no;
        }
        Ok(())
    }

    fn reject_pending_tags(&self) -> Result<(), FeatureError> {
        if self.pending_tags.is_empty() {
            return Ok(());
        }
        Err(FeatureError::DanglingTags {
            path: self.path.to_path_buf(),
            line: self.pending_tags_line,
        })
    }

    fn take_tags(&mut self) -> Vec<String> {
        self.pending_tags_line = 0;
        std::mem::take(&mut self.pending_tags)
    }

    fn start_feature(&mut self, name: &str, line_no: usize) -> Result<(), FeatureError> {
        if self.feature.is_some() {
            return Err(FeatureError::DuplicateFeature {
                path: self.path.to_path_buf(),
                line: line_no,
            });
        }
        let tags = self.take_tags();
        self.feature = Some(Feature {
            name: name.to_owned(),
            description: Vec::new(),
            tags,
            background: None,
            scenarios: Vec::new(),
            path: self.path.to_path_buf(),
            line: line_no,
        });
        self.section = Section::Feature;
        Ok(())
    }

    fn start_background(&mut self, line_no: usize) -> Result<(), FeatureError> {
        let path = self.path;
        let feature = self.feature_mut()?;
        if !feature.scenarios.is_empty() || feature.background.is_some() {
            return Err(FeatureError::LateBackground {
                path: path.to_path_buf(),
                line: line_no,
            });
        }
        feature.background = Some(Background {
            steps: Vec::new(),
            line: line_no,
        });
        self.section = Section::Background;
        Ok(())
    }

    fn start_scenario(&mut self, name: &str, line_no: usize) -> Result<(), FeatureError> {
        let tags = self.take_tags();
        let feature = self.feature_mut()?;
        feature.scenarios.push(Scenario {
            name: name.to_owned(),
            tags,
            description: Vec::new(),
            steps: Vec::new(),
            line: line_no,
        });
        self.section = Section::Scenario;
        Ok(())
    }

    fn push_step(
        &mut self,
        keyword: StepKeyword,
        text: &str,
        line_no: usize,
    ) -> Result<(), FeatureError> {
        let path = self.path;
        let Some(steps) = self.current_steps_mut() else {
            return Err(FeatureError::StepOutsideScenario {
                path: path.to_path_buf(),
                line: line_no,
                text: text.to_owned(),
            });
        };
        steps.push(Step {
            keyword,
            text: text.to_owned(),
            table: None,
            line: line_no,
        });
        Ok(())
    }

    fn push_table_row(&mut self, line: &str, line_no: usize) -> Result<(), FeatureError> {
        let path = self.path;
        let Some(cells) = split_row(line) else {
            return Err(FeatureError::UnterminatedRow {
                path: path.to_path_buf(),
                line: line_no,
                text: line.to_owned(),
            });
        };
        let Some(step) = self
            .current_steps_mut()
            .and_then(|steps| steps.last_mut())
        else {
            return Err(FeatureError::TableOutsideStep {
                path: path.to_path_buf(),
                line: line_no,
            });
        };

        let table = step.table.get_or_insert_with(DataTable::default);
        if let Some(expected) = table.width()
            && expected != cells.len()
        {
            return Err(FeatureError::RaggedTable {
                path: path.to_path_buf(),
                line: line_no,
                expected,
                found: cells.len(),
            });
        }
        table.push_row(cells);
        Ok(())
    }

    fn push_text(&mut self, line: &str, line_no: usize) -> Result<(), FeatureError> {
        let section = self.section;
        let unexpected = || FeatureError::UnexpectedLine {
            path: self.path.to_path_buf(),
            line: line_no,
            text: line.to_owned(),
        };
        let Some(feature) = self.feature.as_mut() else {
            return Err(unexpected());
        };
        match section {
            Section::Feature => {
                feature.description.push(line.to_owned());
                Ok(())
            }
            Section::Scenario => match feature.scenarios.last_mut() {
                Some(scenario) if scenario.steps.is_empty() => {
                    scenario.description.push(line.to_owned());
                    Ok(())
                }
                Some(_) | None => Err(unexpected()),
            },
            Section::Preamble | Section::Background => Err(unexpected()),
        }
    }

    fn current_steps_mut(&mut self) -> Option<&mut Vec<Step>> {
        let feature = self.feature.as_mut()?;
        match self.section {
            Section::Background => feature
                .background
                .as_mut()
                .map(|background| &mut background.steps),
            Section::Scenario => feature
                .scenarios
                .last_mut()
                .map(|scenario| &mut scenario.steps),
            Section::Preamble | Section::Feature => None,
        }
    }

    fn feature_mut(&mut self) -> Result<&mut Feature, FeatureError> {
        let path = self.path;
        self.feature
            .as_mut()
            .ok_or_else(|| FeatureError::MissingFeature {
                path: path.to_path_buf(),
            })
    }

    fn finish(self) -> Result<Feature, FeatureError> {
        self.reject_pending_tags()?;
        self.feature.ok_or_else(|| FeatureError::MissingFeature {
            path: self.path.to_path_buf(),
        })
    }
}

fn scenario_name(line: &str) -> Option<&str> {
    SCENARIO_HEADERS
        .iter()
        .find_map(|header| line.strip_prefix(header))
        .map(str::trim)
}

fn split_step(line: &str) -> Option<(StepKeyword, &str)> {
    StepKeyword::ALL.iter().find_map(|(word, keyword)| {
        let rest = line.strip_prefix(word)?;
        if !rest.starts_with(char::is_whitespace) {
            return None;
        }
        let text = rest.trim();
        if text.is_empty() {
            None
        } else {
            Some((*keyword, text))
        }
    })
}

/// Splits `| a | b |` into trimmed cells. `\|`, `\\`, and `\n` are escapes.
fn split_row(line: &str) -> Option<Vec<String>> {
    let inner = line.strip_prefix('|')?;
    let mut cells = Vec::new();
    let mut current = String::new();
    let mut chars = inner.chars();

    while let Some(ch) = chars.next() {
        match ch {
            '\\' => match chars.next() {
                Some('|') => current.push('|'),
                Some('\\') => current.push('\\'),
                Some('n') => current.push('\n'),
                Some(other) => {
                    current.push('\\');
                    current.push(other);
                }
                None => current.push('\\'),
            },
            '|' => {
                cells.push(current.trim().to_owned());
                current.clear();
            }
            other => current.push(other),
        }
    }

    if cells.is_empty() || !current.trim().is_empty() {
        return None;
    }
    Some(cells)
}
