use crate::error::StepError;

use super::definitions::StepKind;
use super::pattern::StepPattern;

/// A step text resolved to its definition and placeholder values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepMatch {
    pub kind: StepKind,
    pub args: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StepLookup {
    Matched(StepMatch),
    Undefined,
    Ambiguous(Vec<&'static str>),
}

#[derive(Debug, Clone)]
pub struct StepRegistry {
    definitions: Vec<(StepKind, StepPattern)>,
}

impl StepRegistry {
    /// Compiles every built-in step phrase.
    ///
    /// # Errors
    ///
    /// Returns an error when a phrase fails to compile.
    pub fn new() -> Result<Self, StepError> {
        let mut definitions = Vec::with_capacity(StepKind::ALL.len());
        for kind in StepKind::ALL {
            definitions.push((kind, StepPattern::new(kind.phrase())?));
        }
        Ok(Self { definitions })
    }

    /// Finds the single definition matching `text`.
    #[must_use]
    pub fn lookup(&self, text: &str) -> StepLookup {
        let mut found: Vec<StepMatch> = Vec::new();
        for (kind, pattern) in &self.definitions {
            if let Some(args) = pattern.captures(text) {
                found.push(StepMatch { kind: *kind, args });
            }
        }

        if found.len() > 1 {
            return StepLookup::Ambiguous(found.iter().map(|hit| hit.kind.phrase()).collect());
        }
        found
            .pop()
            .map_or(StepLookup::Undefined, StepLookup::Matched)
    }

    #[must_use]
    pub fn phrases(&self) -> Vec<&'static str> {
        self.definitions
            .iter()
            .map(|(_, pattern)| pattern.phrase())
            .collect()
    }
}
