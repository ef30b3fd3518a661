use crate::wildcard::PatternError;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

pub(crate) mod field {
    pub const ALLOWED_ORIGINS: &str = "allowed_origins";
    pub const ALLOWED_ORIGINS_PATTERNS: &str = "allowed_origins_patterns";
    pub const ALLOWED_HEADERS: &str = "allowed_headers";
    pub const EXPOSED_HEADERS: &str = "exposed_headers";
    pub const ALLOWED_METHODS: &str = "allowed_methods";
    pub const PATHS: &str = "paths";
}

/// Raw CORS configuration as it arrives from a configuration source.
///
/// List-valued keys are kept as untyped JSON values so that a wrongly shaped
/// entry is reported as a [`ConfigError`] naming the key, instead of being
/// silently coerced. Validation happens in [`crate::PolicyConfig::from_options`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CorsOptions {
    pub allowed_origins: Value,
    pub allowed_origins_patterns: Value,
    pub supports_credentials: bool,
    pub allowed_headers: Value,
    pub exposed_headers: Value,
    pub allowed_methods: Value,
    /// `None` (an explicit `null`) omits `Access-Control-Max-Age`.
    pub max_age: Option<i64>,
}

impl Default for CorsOptions {
    fn default() -> Self {
        Self {
            allowed_origins: Value::Array(Vec::new()),
            allowed_origins_patterns: Value::Array(Vec::new()),
            supports_credentials: false,
            allowed_headers: Value::Array(Vec::new()),
            exposed_headers: Value::Array(Vec::new()),
            allowed_methods: Value::Array(Vec::new()),
            max_age: Some(0),
        }
    }
}

impl CorsOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_json_str(input: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(input)?)
    }

    pub fn from_value(value: Value) -> Result<Self, ConfigError> {
        Ok(serde_json::from_value(value)?)
    }

    pub fn allowed_origins<I, S>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.allowed_origins = string_array(values);
        self
    }

    pub fn allowed_origins_patterns<I, S>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.allowed_origins_patterns = string_array(values);
        self
    }

    pub fn supports_credentials(mut self, enabled: bool) -> Self {
        self.supports_credentials = enabled;
        self
    }

    pub fn allowed_headers<I, S>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.allowed_headers = string_array(values);
        self
    }

    pub fn exposed_headers<I, S>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.exposed_headers = string_array(values);
        self
    }

    pub fn allowed_methods<I, S>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.allowed_methods = string_array(values);
        self
    }

    pub fn max_age(mut self, seconds: i64) -> Self {
        self.max_age = Some(seconds);
        self
    }

    pub fn without_max_age(mut self) -> Self {
        self.max_age = None;
        self
    }
}

/// Configuration shape errors. Raised once, while building a policy.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cors option `{field}` must be an array")]
    NotArrayLike { field: &'static str },
    #[error("cors option `{field}` has a non-string entry at index {index}")]
    InvalidEntry { field: &'static str, index: usize },
    #[error("cors option `{field}` contains an invalid wildcard pattern `{pattern}`")]
    Pattern {
        field: &'static str,
        pattern: String,
        #[source]
        source: PatternError,
    },
    #[error("failed to parse cors configuration")]
    Parse(#[from] serde_json::Error),
}

impl ConfigError {
    /// Name of the configuration key that failed validation, if any.
    pub fn field(&self) -> Option<&'static str> {
        match self {
            ConfigError::NotArrayLike { field }
            | ConfigError::InvalidEntry { field, .. }
            | ConfigError::Pattern { field, .. } => Some(*field),
            ConfigError::Parse(_) => None,
        }
    }
}

fn string_array<I, S>(values: I) -> Value
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    Value::Array(
        values
            .into_iter()
            .map(|value| Value::String(value.into()))
            .collect(),
    )
}

pub(crate) fn ensure_array<'v>(
    field: &'static str,
    value: &'v Value,
) -> Result<&'v [Value], ConfigError> {
    match value {
        Value::Array(entries) => Ok(entries),
        _ => Err(ConfigError::NotArrayLike { field }),
    }
}

/// `exposed_headers` also accepts `false`, meaning "expose nothing".
pub(crate) fn ensure_exposed_array(value: &Value) -> Result<&[Value], ConfigError> {
    match value {
        Value::Bool(false) => Ok(&[]),
        other => ensure_array(field::EXPOSED_HEADERS, other),
    }
}

pub(crate) fn string_entries(
    field: &'static str,
    entries: &[Value],
) -> Result<Vec<String>, ConfigError> {
    entries
        .iter()
        .enumerate()
        .map(|(index, entry)| match entry {
            Value::String(value) => Ok(value.clone()),
            _ => Err(ConfigError::InvalidEntry { field, index }),
        })
        .collect()
}

#[cfg(test)]
#[path = "options_test.rs"]
mod options_test;
