use crate::constants::{PREFLIGHT_STATUS, header, method};
use crate::context::CorsRequest;
use crate::header_builder::HeaderBuilder;
use crate::headers::{Headers, ResponseHeaders, vary_header};
use crate::options::{ConfigError, CorsOptions};
use crate::policy::PolicyConfig;
use crate::result::PreflightResponse;
use tracing::trace;

/// Stateless CORS policy evaluator.
///
/// Every operation reads the immutable [`PolicyConfig`] and mutates only the
/// response handed in, so one engine can serve any number of threads.
#[derive(Debug, Clone)]
pub struct CorsEngine {
    policy: PolicyConfig,
}

impl CorsEngine {
    pub fn new(policy: PolicyConfig) -> Self {
        Self { policy }
    }

    /// # Errors
    ///
    /// Returns [`ConfigError`] when the options have the wrong shape.
    pub fn from_options(options: CorsOptions) -> Result<Self, ConfigError> {
        PolicyConfig::from_options(options).map(Self::new)
    }

    pub fn policy(&self) -> &PolicyConfig {
        &self.policy
    }

    /// A request is a CORS request when it carries an `Origin` header at all.
    pub fn is_cors_request<Q>(&self, request: &Q) -> bool
    where
        Q: CorsRequest + ?Sized,
    {
        request.has_header(header::ORIGIN)
    }

    pub fn is_preflight_request<Q>(&self, request: &Q) -> bool
    where
        Q: CorsRequest + ?Sized,
    {
        request.method() == method::OPTIONS
            && request.has_header(header::ACCESS_CONTROL_REQUEST_METHOD)
    }

    pub fn is_origin_allowed<Q>(&self, request: &Q) -> bool
    where
        Q: CorsRequest + ?Sized,
    {
        let origins = self.policy.allowed_origins();
        if origins.is_any() {
            return true;
        }
        match request.origin() {
            Some(origin) => origins.allows(Some(origin.as_ref())),
            None => false,
        }
    }

    /// Builds the 204 response for a preflight request.
    ///
    /// The result always varies on `Access-Control-Request-Method`, whether or
    /// not the methods list is reflected.
    pub fn handle_preflight_request<Q>(&self, request: &Q) -> PreflightResponse
    where
        Q: CorsRequest + ?Sized,
    {
        let mut response = PreflightResponse {
            status: PREFLIGHT_STATUS,
            headers: Headers::with_capacity(8),
        };
        self.add_preflight_headers(&mut response.headers, request);
        vary_header(&mut response.headers, header::ACCESS_CONTROL_REQUEST_METHOD);
        trace!(
            allowed = response.headers.contains(header::ACCESS_CONTROL_ALLOW_ORIGIN),
            "handled cors preflight request"
        );
        response
    }

    pub fn add_preflight_headers<R, Q>(&self, response: &mut R, request: &Q)
    where
        R: ResponseHeaders + ?Sized,
        Q: CorsRequest + ?Sized,
    {
        let builder = HeaderBuilder::new(&self.policy);
        builder.configure_allowed_origin(response, request);

        if response.has_header(header::ACCESS_CONTROL_ALLOW_ORIGIN) {
            builder.configure_allow_credentials(response);
            builder.configure_allowed_methods(response, request);
            builder.configure_allowed_headers(response, request);
            builder.configure_max_age(response);
        }
    }

    pub fn add_actual_request_headers<R, Q>(&self, response: &mut R, request: &Q)
    where
        R: ResponseHeaders + ?Sized,
        Q: CorsRequest + ?Sized,
    {
        let builder = HeaderBuilder::new(&self.policy);
        builder.configure_allowed_origin(response, request);

        if response.has_header(header::ACCESS_CONTROL_ALLOW_ORIGIN) {
            builder.configure_allow_credentials(response);
            builder.configure_exposed_headers(response);
        }
    }

    /// Adds `name` to the `Vary` line of `response` unless already listed.
    pub fn vary_header<R>(&self, response: &mut R, name: &str)
    where
        R: ResponseHeaders + ?Sized,
    {
        vary_header(response, name);
    }
}

impl From<PolicyConfig> for CorsEngine {
    fn from(policy: PolicyConfig) -> Self {
        Self::new(policy)
    }
}

#[cfg(test)]
#[path = "cors_test.rs"]
mod cors_test;
