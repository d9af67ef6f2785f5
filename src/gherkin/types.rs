use std::path::PathBuf;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepKeyword {
    Given,
    When,
    Then,
    And,
    But,
    Star,
}

impl StepKeyword {
    pub(crate) const ALL: [(&'static str, StepKeyword); 6] = [
        ("Given", StepKeyword::Given),
        ("When", StepKeyword::When),
        ("Then", StepKeyword::Then),
        ("And", StepKeyword::And),
        ("But", StepKeyword::But),
        ("*", StepKeyword::Star),
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            StepKeyword::Given => "Given",
            StepKeyword::When => "When",
            StepKeyword::Then => "Then",
            StepKeyword::And => "And",
            StepKeyword::But => "But",
            StepKeyword::Star => "*",
        }
    }
}

/// Rows of a pipe table attached to a step. The first row is usually a header.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DataTable {
    rows: Vec<Vec<String>>,
}

impl DataTable {
    #[must_use]
    pub const fn new(rows: Vec<Vec<String>>) -> Self {
        Self { rows }
    }

    #[must_use]
    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    /// Rows after the header row.
    #[must_use]
    pub fn body(&self) -> &[Vec<String>] {
        self.rows.get(1..).unwrap_or(&[])
    }

    #[must_use]
    pub fn width(&self) -> Option<usize> {
        self.rows.first().map(Vec::len)
    }

    pub(crate) fn push_row(&mut self, row: Vec<String>) {
        self.rows.push(row);
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Step {
    pub keyword: StepKeyword,
    pub text: String,
    pub table: Option<DataTable>,
    pub line: usize,
}

impl Step {
    #[must_use]
    pub fn display(&self) -> String {
        format!("{} {}", self.keyword.as_str(), self.text)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Background {
    pub steps: Vec<Step>,
    pub line: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Scenario {
    pub name: String,
    pub tags: Vec<String>,
    pub description: Vec<String>,
    pub steps: Vec<Step>,
    pub line: usize,
}

impl Scenario {
    #[must_use]
    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|candidate| candidate == tag)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Feature {
    pub name: String,
    pub description: Vec<String>,
    pub tags: Vec<String>,
    pub background: Option<Background>,
    pub scenarios: Vec<Scenario>,
    pub path: PathBuf,
    pub line: usize,
}

impl Feature {
    #[must_use]
    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|candidate| candidate == tag)
    }

    /// Background steps, or an empty slice when the feature has none.
    #[must_use]
    pub fn background_steps(&self) -> &[Step] {
        match self.background.as_ref() {
            Some(background) => &background.steps,
            None => &[],
        }
    }
}
