use crate::allowed_headers::AllowedHeaders;
use crate::allowed_methods::AllowedMethods;
use crate::constants::WILDCARD;
use crate::exposed_headers::ExposedHeaders;
use crate::options::{
    ConfigError, CorsOptions, ensure_array, ensure_exposed_array, field, string_entries,
};
use crate::origin::{AllowedOrigins, OriginList};
use crate::wildcard::Wildcard;
use tracing::{debug, warn};

/// Validated, immutable CORS policy.
///
/// Built once from [`CorsOptions`] and shared for the life of the process.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PolicyConfig {
    allowed_origins: AllowedOrigins,
    supports_credentials: bool,
    allowed_headers: AllowedHeaders,
    exposed_headers: ExposedHeaders,
    allowed_methods: AllowedMethods,
    max_age: Option<i64>,
}

impl PolicyConfig {
    /// Validates the shape of every list and normalizes it.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] naming the first offending key. Keys are checked
    /// in the order `exposed_headers`, `allowed_origins`,
    /// `allowed_origins_patterns`, `allowed_headers`, `allowed_methods`.
    pub fn from_options(options: CorsOptions) -> Result<Self, ConfigError> {
        let exposed = ensure_exposed_array(&options.exposed_headers)?;
        let origins = ensure_array(field::ALLOWED_ORIGINS, &options.allowed_origins)?;
        let seeded_patterns = ensure_array(
            field::ALLOWED_ORIGINS_PATTERNS,
            &options.allowed_origins_patterns,
        )?;
        let headers = ensure_array(field::ALLOWED_HEADERS, &options.allowed_headers)?;
        let methods = ensure_array(field::ALLOWED_METHODS, &options.allowed_methods)?;

        let exposed = string_entries(field::EXPOSED_HEADERS, exposed)?;
        let origins = string_entries(field::ALLOWED_ORIGINS, origins)?;
        let seeded_patterns = string_entries(field::ALLOWED_ORIGINS_PATTERNS, seeded_patterns)?;
        let headers = string_entries(field::ALLOWED_HEADERS, headers)?;
        let methods = string_entries(field::ALLOWED_METHODS, methods)?;

        let allowed_origins = normalize_origins(origins, seeded_patterns)?;

        let allowed_headers = if contains_wildcard(&headers) {
            AllowedHeaders::Any
        } else {
            AllowedHeaders::list(headers)
        };

        let allowed_methods = if contains_wildcard(&methods) {
            AllowedMethods::Any
        } else {
            AllowedMethods::list(methods)
        };

        let policy = Self {
            allowed_origins,
            supports_credentials: options.supports_credentials,
            allowed_headers,
            exposed_headers: ExposedHeaders::list(exposed),
            allowed_methods,
            max_age: options.max_age,
        };
        policy.log_summary();
        Ok(policy)
    }

    pub fn allowed_origins(&self) -> &AllowedOrigins {
        &self.allowed_origins
    }

    pub fn supports_credentials(&self) -> bool {
        self.supports_credentials
    }

    pub fn allowed_headers(&self) -> &AllowedHeaders {
        &self.allowed_headers
    }

    pub fn exposed_headers(&self) -> &ExposedHeaders {
        &self.exposed_headers
    }

    pub fn allowed_methods(&self) -> &AllowedMethods {
        &self.allowed_methods
    }

    pub fn max_age(&self) -> Option<i64> {
        self.max_age
    }

    fn log_summary(&self) {
        match &self.allowed_origins {
            AllowedOrigins::Any => debug!(
                credentials = self.supports_credentials,
                "cors policy built for any origin"
            ),
            AllowedOrigins::List(list) => debug!(
                exact = list.exact().len(),
                patterns = list.patterns().len(),
                credentials = self.supports_credentials,
                "cors policy built for listed origins"
            ),
        }

        if self.supports_credentials {
            if self.allowed_origins.is_any() {
                warn!("credentials are enabled while every origin is allowed; request origins will be echoed");
            } else if let Some(origin) = self.allowed_origins.single_origin() {
                warn!(
                    origin,
                    "credentials are enabled with a single fixed origin; responses will not vary on Origin"
                );
            }
        }
    }
}

impl TryFrom<CorsOptions> for PolicyConfig {
    type Error = ConfigError;

    fn try_from(options: CorsOptions) -> Result<Self, Self::Error> {
        Self::from_options(options)
    }
}

fn contains_wildcard(values: &[String]) -> bool {
    values.iter().any(|value| value == WILDCARD)
}

fn normalize_origins(
    origins: Vec<String>,
    seeded_patterns: Vec<String>,
) -> Result<AllowedOrigins, ConfigError> {
    if contains_wildcard(&origins) {
        return Ok(AllowedOrigins::Any);
    }

    let mut patterns = compile_patterns(field::ALLOWED_ORIGINS_PATTERNS, seeded_patterns)?;
    let (globbed, exact): (Vec<String>, Vec<String>) =
        origins.into_iter().partition(|origin| origin.contains('*'));
    patterns.extend(compile_patterns(field::ALLOWED_ORIGINS, globbed)?);

    Ok(AllowedOrigins::List(OriginList::new(exact, patterns)))
}

fn compile_patterns(
    field: &'static str,
    values: Vec<String>,
) -> Result<Vec<Wildcard>, ConfigError> {
    let mut patterns: Vec<Wildcard> = Vec::with_capacity(values.len());
    for value in values {
        if patterns.iter().any(|existing| existing.as_str() == value) {
            continue;
        }
        let pattern = Wildcard::new(value.clone()).map_err(|source| ConfigError::Pattern {
            field,
            pattern: value,
            source,
        })?;
        patterns.push(pattern);
    }
    Ok(patterns)
}

#[cfg(test)]
#[path = "policy_test.rs"]
mod policy_test;
