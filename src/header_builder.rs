use crate::allowed_headers::AllowedHeaders;
use crate::allowed_methods::AllowedMethods;
use crate::constants::{WILDCARD, header};
use crate::context::CorsRequest;
use crate::headers::{ResponseHeaders, vary_header};
use crate::policy::PolicyConfig;
use crate::util::normalize_upper;
use tracing::trace;

/// Writes individual CORS headers onto a response according to a policy.
pub(crate) struct HeaderBuilder<'a> {
    policy: &'a PolicyConfig,
}

impl<'a> HeaderBuilder<'a> {
    pub(crate) fn new(policy: &'a PolicyConfig) -> Self {
        Self { policy }
    }

    pub(crate) fn configure_allowed_origin<R, Q>(&self, response: &mut R, request: &Q)
    where
        R: ResponseHeaders + ?Sized,
        Q: CorsRequest + ?Sized,
    {
        let origins = self.policy.allowed_origins();

        if origins.is_any() && !self.policy.supports_credentials() {
            response.set_header(header::ACCESS_CONTROL_ALLOW_ORIGIN, WILDCARD.to_string());
            return;
        }

        if let Some(origin) = origins.single_origin() {
            response.set_header(header::ACCESS_CONTROL_ALLOW_ORIGIN, origin.to_string());
            return;
        }

        if let Some(origin) = request.origin() {
            if origins.allows(Some(origin.as_ref())) {
                response.set_header(header::ACCESS_CONTROL_ALLOW_ORIGIN, origin.into_owned());
            } else {
                trace!(origin = %origin, "origin not allowed by cors policy");
            }
        }

        vary_header(response, header::ORIGIN);
    }

    pub(crate) fn configure_allowed_methods<R, Q>(&self, response: &mut R, request: &Q)
    where
        R: ResponseHeaders + ?Sized,
        Q: CorsRequest + ?Sized,
    {
        let methods = self.policy.allowed_methods();
        let value = match methods {
            AllowedMethods::Any => {
                vary_header(response, header::ACCESS_CONTROL_REQUEST_METHOD);
                request
                    .header(header::ACCESS_CONTROL_REQUEST_METHOD)
                    .map(|method| normalize_upper(&method))
                    .unwrap_or_default()
            }
            AllowedMethods::List(_) => methods.header_value().unwrap_or_default(),
        };

        response.set_header(header::ACCESS_CONTROL_ALLOW_METHODS, value);
    }

    pub(crate) fn configure_allowed_headers<R, Q>(&self, response: &mut R, request: &Q)
    where
        R: ResponseHeaders + ?Sized,
        Q: CorsRequest + ?Sized,
    {
        let headers = self.policy.allowed_headers();
        let value = match headers {
            AllowedHeaders::Any => {
                vary_header(response, header::ACCESS_CONTROL_REQUEST_HEADERS);
                request
                    .header(header::ACCESS_CONTROL_REQUEST_HEADERS)
                    .map(|line| line.into_owned())
                    .unwrap_or_default()
            }
            AllowedHeaders::List(_) => headers.header_value().unwrap_or_default(),
        };

        response.set_header(header::ACCESS_CONTROL_ALLOW_HEADERS, value);
    }

    pub(crate) fn configure_allow_credentials<R>(&self, response: &mut R)
    where
        R: ResponseHeaders + ?Sized,
    {
        if self.policy.supports_credentials() {
            response.set_header(header::ACCESS_CONTROL_ALLOW_CREDENTIALS, "true".to_string());
        }
    }

    pub(crate) fn configure_exposed_headers<R>(&self, response: &mut R)
    where
        R: ResponseHeaders + ?Sized,
    {
        if let Some(value) = self.policy.exposed_headers().header_value() {
            response.set_header(header::ACCESS_CONTROL_EXPOSE_HEADERS, value);
        }
    }

    pub(crate) fn configure_max_age<R>(&self, response: &mut R)
    where
        R: ResponseHeaders + ?Sized,
    {
        if let Some(seconds) = self.policy.max_age() {
            response.set_header(header::ACCESS_CONTROL_MAX_AGE, seconds.to_string());
        }
    }
}

#[cfg(test)]
#[path = "header_builder_test.rs"]
mod header_builder_test;
