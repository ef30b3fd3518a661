use crate::context::RequestUri;
use crate::options::{ConfigError, field};
use crate::util::{normalize_lower, trim_slashes};
use crate::wildcard::Wildcard;
use indexmap::IndexMap;
use serde_json::Value;

const ROOT: &str = "/";

/// Glob path patterns deciding which requests pass through the CORS flow.
///
/// Patterns are looked up by virtual host first; the default list applies
/// to hosts without an entry of their own.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PathRules {
    defaults: Vec<Wildcard>,
    hosts: IndexMap<String, Vec<Wildcard>>,
}

impl PathRules {
    /// Rules with only default patterns.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Pattern`] when a pattern cannot be compiled.
    pub fn new<I, S>(defaults: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Ok(Self {
            defaults: compile(defaults)?,
            hosts: IndexMap::new(),
        })
    }

    /// Adds (or replaces) the patterns used for `host`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Pattern`] when a pattern cannot be compiled.
    pub fn with_host<I, S>(mut self, host: &str, patterns: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.hosts.insert(normalize_lower(host), compile(patterns)?);
        Ok(self)
    }

    /// Reads the `paths` configuration value.
    ///
    /// An array holds default patterns. An object maps hosts to arrays of
    /// patterns; string values in it are default patterns. `null` means no
    /// path is handled.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] naming `paths` when the value has another shape.
    pub fn from_value(value: &Value) -> Result<Self, ConfigError> {
        match value {
            Value::Null => Ok(Self::default()),
            Value::Array(entries) => Self::new(string_entries(entries)?),
            Value::Object(map) => {
                let mut defaults = Vec::new();
                let mut rules = Self::default();
                for (key, entry) in map {
                    match entry {
                        Value::String(pattern) => defaults.push(pattern.as_str()),
                        Value::Array(entries) => {
                            rules = rules.with_host(key, string_entries(entries)?)?;
                        }
                        _ => return Err(ConfigError::NotArrayLike { field: field::PATHS }),
                    }
                }
                rules.defaults = compile(defaults)?;
                Ok(rules)
            }
            _ => Err(ConfigError::NotArrayLike { field: field::PATHS }),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.defaults.is_empty() && self.hosts.is_empty()
    }

    /// Patterns that apply to `host`.
    pub fn patterns_for(&self, host: &str) -> &[Wildcard] {
        self.hosts
            .get(&normalize_lower(host))
            .unwrap_or(&self.defaults)
    }

    /// True when a pattern matches either the full URI or its trimmed path.
    pub fn matches(&self, uri: &RequestUri) -> bool {
        let patterns = self.patterns_for(&uri.host);
        if patterns.is_empty() {
            return false;
        }

        let full = uri.to_string();
        let path = match trim_slashes(&uri.path) {
            "" => ROOT,
            trimmed => trimmed,
        };

        patterns
            .iter()
            .any(|pattern| pattern.matches(&full) || pattern.matches(path))
    }
}

fn compile<I, S>(patterns: I) -> Result<Vec<Wildcard>, ConfigError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    patterns
        .into_iter()
        .map(|pattern| {
            let pattern = pattern.as_ref();
            let normalized = if pattern == ROOT {
                pattern
            } else {
                trim_slashes(pattern)
            };
            Wildcard::new(normalized).map_err(|source| ConfigError::Pattern {
                field: field::PATHS,
                pattern: pattern.to_string(),
                source,
            })
        })
        .collect()
}

fn string_entries(entries: &[Value]) -> Result<Vec<&str>, ConfigError> {
    entries
        .iter()
        .enumerate()
        .map(|(index, entry)| {
            entry.as_str().ok_or(ConfigError::InvalidEntry {
                field: field::PATHS,
                index,
            })
        })
        .collect()
}

#[cfg(test)]
#[path = "paths_test.rs"]
mod paths_test;
