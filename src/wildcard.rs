use regex_automata::meta::{BuildError, Regex};
use std::fmt;
use thiserror::Error;

const MAX_PATTERN_LENGTH: usize = 4_096;

/// Errors produced while compiling a glob into a matcher.
#[derive(Debug, Error)]
pub enum PatternError {
    #[error("failed to compile wildcard pattern")]
    Build(#[source] Box<BuildError>),
    #[error("wildcard pattern length {length} exceeds maximum allowed {max}")]
    TooLong { length: usize, max: usize },
}

/// A compiled glob where `*` matches any run of characters and every other
/// character matches itself. The whole candidate has to match.
#[derive(Clone)]
pub struct Wildcard {
    source: String,
    regex: Regex,
}

impl Wildcard {
    pub fn new<S: Into<String>>(pattern: S) -> Result<Self, PatternError> {
        let source = pattern.into();
        if source.len() > MAX_PATTERN_LENGTH {
            return Err(PatternError::TooLong {
                length: source.len(),
                max: MAX_PATTERN_LENGTH,
            });
        }

        let regex = Regex::new(&glob_to_regex(&source))
            .map_err(|err| PatternError::Build(Box::new(err)))?;

        Ok(Self { source, regex })
    }

    pub fn as_str(&self) -> &str {
        &self.source
    }

    pub fn matches(&self, candidate: &str) -> bool {
        if self.source == candidate {
            return true;
        }
        self.regex.is_match(candidate)
    }
}

impl fmt::Debug for Wildcard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Wildcard").field(&self.source).finish()
    }
}

impl PartialEq for Wildcard {
    fn eq(&self, other: &Self) -> bool {
        self.source == other.source
    }
}

impl Eq for Wildcard {}

fn glob_to_regex(pattern: &str) -> String {
    let mut out = String::with_capacity(pattern.len() * 2 + 4);
    out.push_str(r"\A");
    for ch in pattern.chars() {
        if ch == '*' {
            out.push_str("(?s:.*)");
            continue;
        }
        if is_meta_character(ch) {
            out.push('\\');
        }
        out.push(ch);
    }
    out.push_str(r"\z");
    out
}

fn is_meta_character(ch: char) -> bool {
    matches!(
        ch,
        '\\' | '.'
            | '+'
            | '*'
            | '?'
            | '('
            | ')'
            | '|'
            | '['
            | ']'
            | '{'
            | '}'
            | '^'
            | '$'
            | '#'
            | '&'
            | '-'
            | '~'
    )
}

#[cfg(test)]
#[path = "wildcard_test.rs"]
mod wildcard_test;
