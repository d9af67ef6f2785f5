use regex::Regex;

use crate::error::StepError;

/// A step phrase such as `I search for :query`.
///
/// `:name` placeholders match a double-quoted string, a single-quoted string,
/// or one bare token. A parenthesised suffix like `result(s)` is optional.
/// Literal words match case-insensitively.
#[derive(Debug, Clone)]
pub struct StepPattern {
    phrase: &'static str,
    regex: Regex,
    placeholders: usize,
}

const PLACEHOLDER: &str = r#"(?:"([^"]*)"|'([^']*)'|(\S+))"#;
const GROUPS_PER_PLACEHOLDER: usize = 3;

impl StepPattern {
    /// Compiles a phrase into a matcher.
    ///
    /// # Errors
    ///
    /// Returns an error when the generated expression does not compile.
    pub fn new(phrase: &'static str) -> Result<Self, StepError> {
        let (source, placeholders) = translate(phrase);
        let regex = Regex::new(&source).map_err(|err| StepError::InvalidPattern {
            phrase,
            source: err,
        })?;
        Ok(Self {
            phrase,
            regex,
            placeholders,
        })
    }

    #[must_use]
    pub const fn phrase(&self) -> &'static str {
        self.phrase
    }

    /// Returns placeholder values in order, or `None` when the text does not match.
    #[must_use]
    pub fn captures(&self, text: &str) -> Option<Vec<String>> {
        let caps = self.regex.captures(text.trim())?;
        let mut values = Vec::with_capacity(self.placeholders);
        for index in 0..self.placeholders {
            let first = index
                .saturating_mul(GROUPS_PER_PLACEHOLDER)
                .saturating_add(1);
            let value = (first..first.saturating_add(GROUPS_PER_PLACEHOLDER))
                .find_map(|group| caps.get(group))
                .map(|found| found.as_str().to_owned())
                .unwrap_or_default();
            values.push(value);
        }
        Some(values)
    }
}

fn translate(phrase: &str) -> (String, usize) {
    let mut source = String::from("(?i)^");
    let mut literal = String::new();
    let mut placeholders = 0usize;
    let mut chars = phrase.chars().peekable();

    while let Some(ch) = chars.next() {
        match ch {
            ':' if chars.peek().is_some_and(|next| next.is_ascii_alphabetic()) => {
                while chars
                    .peek()
                    .is_some_and(|next| next.is_ascii_alphanumeric() || *next == '_')
                {
                    chars.next();
                }
                flush_literal(&mut source, &mut literal);
                source.push_str(PLACEHOLDER);
                placeholders = placeholders.saturating_add(1);
            }
            '(' => {
                let mut optional = String::new();
                for inner in chars.by_ref() {
                    if inner == ')' {
                        break;
                    }
                    optional.push(inner);
                }
                flush_literal(&mut source, &mut literal);
                source.push_str("(?:");
                source.push_str(&regex::escape(&optional));
                source.push_str(")?");
            }
            other => literal.push(other),
        }
    }
    flush_literal(&mut source, &mut literal);
    source.push('$');
    (source, placeholders)
}

fn flush_literal(source: &mut String, literal: &mut String) {
    if literal.is_empty() {
        return;
    }
    source.push_str(&regex::escape(literal));
    literal.clear();
}
