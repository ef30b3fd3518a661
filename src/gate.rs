use crate::constants::{header, method};
use crate::context::CorsRequest;
use crate::cors::CorsEngine;
use crate::headers::{ResponseHeaders, vary_header};
use crate::options::{ConfigError, CorsOptions};
use crate::paths::PathRules;
use crate::result::CorsDecision;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::Arc;
use tracing::trace;

/// A complete CORS configuration document: the policy keys plus `paths`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CorsSettings {
    #[serde(default)]
    pub paths: Value,
    #[serde(flatten)]
    pub options: CorsOptions,
}

impl CorsSettings {
    pub fn from_json_str(input: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(input)?)
    }
}

/// Decides per request whether the engine runs, and runs it.
///
/// Both the engine and the path rules are handed in by the caller; the gate
/// keeps no other state and can be cloned freely across workers.
#[derive(Debug, Clone)]
pub struct CorsGate {
    engine: Arc<CorsEngine>,
    paths: PathRules,
}

impl CorsGate {
    pub fn new(engine: Arc<CorsEngine>, paths: PathRules) -> Self {
        Self { engine, paths }
    }

    /// # Errors
    ///
    /// Returns [`ConfigError`] when either the policy keys or `paths` are
    /// malformed. The policy is validated first.
    pub fn from_settings(settings: CorsSettings) -> Result<Self, ConfigError> {
        let engine = CorsEngine::from_options(settings.options)?;
        let paths = PathRules::from_value(&settings.paths)?;
        Ok(Self::new(Arc::new(engine), paths))
    }

    pub fn engine(&self) -> &CorsEngine {
        &self.engine
    }

    pub fn paths(&self) -> &PathRules {
        &self.paths
    }

    pub fn should_run<Q>(&self, request: &Q) -> bool
    where
        Q: CorsRequest + ?Sized,
    {
        self.paths.matches(&request.uri())
    }

    /// Runs a request through the CORS flow.
    ///
    /// `response` is the scratch response the handler's output will be built
    /// on; it is only written to for [`CorsDecision::Actual`].
    pub fn process<Q, R>(&self, request: &Q, response: &mut R) -> CorsDecision
    where
        Q: CorsRequest + ?Sized,
        R: ResponseHeaders + ?Sized,
    {
        if !self.should_run(request) {
            trace!(method = request.method(), "path outside cors paths");
            return CorsDecision::NotApplicable;
        }

        if self.engine.is_preflight_request(request) {
            return CorsDecision::Preflight(self.engine.handle_preflight_request(request));
        }

        if request.method() == method::OPTIONS {
            vary_header(response, header::ACCESS_CONTROL_REQUEST_METHOD);
        }

        self.add_headers(request, response);
        CorsDecision::Actual
    }

    /// Adds actual-request headers unless an allow-origin header is already set.
    pub fn add_headers<Q, R>(&self, request: &Q, response: &mut R)
    where
        Q: CorsRequest + ?Sized,
        R: ResponseHeaders + ?Sized,
    {
        if !response.has_header(header::ACCESS_CONTROL_ALLOW_ORIGIN) {
            self.engine.add_actual_request_headers(response, request);
        }
    }

    /// For responses produced outside the normal flow, such as error pages.
    pub fn on_request_handled<Q, R>(&self, request: &Q, response: &mut R)
    where
        Q: CorsRequest + ?Sized,
        R: ResponseHeaders + ?Sized,
    {
        if self.should_run(request) {
            self.add_headers(request, response);
        }
    }
}

#[cfg(test)]
#[path = "gate_test.rs"]
mod gate_test;
