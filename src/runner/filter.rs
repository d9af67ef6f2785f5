use crate::error::ValidationError;
use crate::gherkin::{Feature, Scenario};

/// `@tag` (or `tag`) selects; `~@tag` excludes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TagFilter {
    Include(String),
    Exclude(String),
}

impl std::str::FromStr for TagFilter {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value = s.trim();
        if value.is_empty() {
            return Err(ValidationError::EmptyTag);
        }
        let (exclude, rest) = match value.strip_prefix('~') {
            Some(rest) => (true, rest),
            None => (false, value),
        };
        let name = rest.strip_prefix('@').unwrap_or(rest);
        if name.is_empty() || name.chars().any(|ch| ch.is_whitespace() || ch == '@') {
            return Err(ValidationError::InvalidTag {
                value: s.to_owned(),
            });
        }
        if exclude {
            Ok(TagFilter::Exclude(name.to_owned()))
        } else {
            Ok(TagFilter::Include(name.to_owned()))
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct ScenarioFilter {
    pub name: Option<String>,
    pub tags: Vec<TagFilter>,
}

impl ScenarioFilter {
    /// A scenario inherits its feature's tags. Exclusions win over inclusions;
    /// with any inclusion present, at least one must be carried.
    #[must_use]
    pub fn matches(&self, feature: &Feature, scenario: &Scenario) -> bool {
        if let Some(name) = self.name.as_deref()
            && !scenario.name.contains(name)
        {
            return false;
        }

        let carries = |tag: &str| feature.has_tag(tag) || scenario.has_tag(tag);
        let mut wants_include = false;
        let mut included = false;
        for filter in &self.tags {
            match filter {
                TagFilter::Exclude(tag) => {
                    if carries(tag.as_str()) {
                        return false;
                    }
                }
                TagFilter::Include(tag) => {
                    wants_include = true;
                    included = included || carries(tag.as_str());
                }
            }
        }
        !wants_include || included
    }
}
