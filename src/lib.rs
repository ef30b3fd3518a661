//! CORS policy evaluation: origin matching, preflight detection and
//! `Vary`-aware response header assembly.
//!
//! A [`PolicyConfig`] is validated once from [`CorsOptions`], wrapped in a
//! [`CorsEngine`] and shared between requests. [`CorsGate`] adds the per-host
//! path rules that decide whether the engine runs at all.

mod allowed_headers;
mod allowed_methods;
pub mod constants;
mod context;
mod cors;
mod exposed_headers;
mod gate;
mod header_builder;
mod headers;
#[cfg(feature = "http")]
mod http_interop;
mod options;
mod origin;
mod paths;
mod policy;
mod result;
mod util;
mod wildcard;

pub use allowed_headers::AllowedHeaders;
pub use allowed_methods::AllowedMethods;
pub use context::{CorsRequest, RequestContext, RequestUri};
pub use cors::CorsEngine;
pub use exposed_headers::ExposedHeaders;
pub use gate::{CorsGate, CorsSettings};
pub use headers::{Headers, ResponseHeaders, vary_header};
pub use options::{ConfigError, CorsOptions};
pub use origin::{AllowedOrigins, OriginList};
pub use paths::PathRules;
pub use policy::PolicyConfig;
pub use result::{CorsDecision, PreflightResponse};
#[doc(hidden)]
pub use util::{normalize_lower, normalize_upper};
pub use wildcard::{PatternError, Wildcard};
