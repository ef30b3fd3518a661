use crate::headers::Headers;

/// Short-circuit response for a preflight request. It never carries a body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreflightResponse {
    pub status: u16,
    pub headers: Headers,
}

/// Outcome of running a request through the [`crate::CorsGate`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CorsDecision {
    /// Answer the request with this response; do not call the handler.
    Preflight(PreflightResponse),
    /// CORS headers were written to the response; continue to the handler.
    Actual,
    /// The request path is outside the CORS paths; the response is untouched.
    NotApplicable,
}
