use cors_engine_rs::constants::{header, method};
use cors_engine_rs::{
    CorsEngine, CorsGate, CorsOptions, Headers, PathRules, PreflightResponse, RequestContext,
};
use std::sync::Arc;

pub const DEFAULT_URI: &str = "http://localhost/api/ping";

#[derive(Default)]
pub struct EngineBuilder {
    options: CorsOptions,
}

impl EngineBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn origins<I, S>(mut self, origins: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.options = self.options.allowed_origins(origins);
        self
    }

    pub fn origin_patterns<I, S>(mut self, patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.options = self.options.allowed_origins_patterns(patterns);
        self
    }

    pub fn credentials(mut self, enabled: bool) -> Self {
        self.options = self.options.supports_credentials(enabled);
        self
    }

    pub fn allowed_headers<I, S>(mut self, headers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.options = self.options.allowed_headers(headers);
        self
    }

    pub fn exposed_headers<I, S>(mut self, headers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.options = self.options.exposed_headers(headers);
        self
    }

    pub fn methods<I, S>(mut self, methods: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.options = self.options.allowed_methods(methods);
        self
    }

    pub fn max_age(mut self, seconds: i64) -> Self {
        self.options = self.options.max_age(seconds);
        self
    }

    pub fn without_max_age(mut self) -> Self {
        self.options = self.options.without_max_age();
        self
    }

    pub fn options(self) -> CorsOptions {
        self.options
    }

    pub fn build(self) -> CorsEngine {
        CorsEngine::from_options(self.options).expect("valid CORS configuration")
    }

    pub fn gate(self, paths: &[&str]) -> CorsGate {
        let rules = PathRules::new(paths.iter().copied()).expect("valid path rules");
        CorsGate::new(Arc::new(self.build()), rules)
    }
}

pub struct ActualRequestBuilder {
    method: String,
    uri: String,
    origin: Option<String>,
    headers: Vec<(String, String)>,
}

impl ActualRequestBuilder {
    pub fn new() -> Self {
        Self {
            method: method::GET.into(),
            uri: DEFAULT_URI.into(),
            origin: None,
            headers: Vec::new(),
        }
    }

    pub fn method(mut self, method: impl Into<String>) -> Self {
        self.method = method.into();
        self
    }

    pub fn uri(mut self, uri: impl Into<String>) -> Self {
        self.uri = uri.into();
        self
    }

    pub fn origin(mut self, origin: impl Into<String>) -> Self {
        self.origin = Some(origin.into());
        self
    }

    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    pub fn context(self) -> RequestContext {
        let ActualRequestBuilder {
            method,
            uri,
            origin,
            headers,
        } = self;

        let mut ctx = RequestContext::new(method, &uri);
        if let Some(origin) = origin {
            ctx = ctx.with_header(header::ORIGIN, origin);
        }
        for (name, value) in headers {
            ctx = ctx.with_header(name, value);
        }
        ctx
    }

    pub fn check(self, engine: &CorsEngine) -> Headers {
        let ctx = self.context();
        let mut response = Headers::new();
        engine.add_actual_request_headers(&mut response, &ctx);
        response
    }
}

#[derive(Default)]
pub struct PreflightRequestBuilder {
    uri: Option<String>,
    origin: Option<String>,
    request_method: Option<String>,
    request_headers: Option<String>,
}

impl PreflightRequestBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn uri(mut self, uri: impl Into<String>) -> Self {
        self.uri = Some(uri.into());
        self
    }

    pub fn origin(mut self, origin: impl Into<String>) -> Self {
        self.origin = Some(origin.into());
        self
    }

    pub fn request_method(mut self, method: impl Into<String>) -> Self {
        self.request_method = Some(method.into());
        self
    }

    pub fn request_headers(mut self, headers: impl Into<String>) -> Self {
        self.request_headers = Some(headers.into());
        self
    }

    pub fn context(self) -> RequestContext {
        let PreflightRequestBuilder {
            uri,
            origin,
            request_method,
            request_headers,
        } = self;

        let mut ctx = RequestContext::new(method::OPTIONS, uri.as_deref().unwrap_or(DEFAULT_URI));
        if let Some(origin) = origin {
            ctx = ctx.with_header(header::ORIGIN, origin);
        }
        if let Some(request_method) = request_method {
            ctx = ctx.with_header(header::ACCESS_CONTROL_REQUEST_METHOD, request_method);
        }
        if let Some(request_headers) = request_headers {
            ctx = ctx.with_header(header::ACCESS_CONTROL_REQUEST_HEADERS, request_headers);
        }
        ctx
    }

    pub fn check(self, engine: &CorsEngine) -> PreflightResponse {
        let ctx = self.context();
        engine.handle_preflight_request(&ctx)
    }
}

pub fn engine() -> EngineBuilder {
    EngineBuilder::new()
}

/// The configuration most integration scenarios start from.
pub fn reference_engine() -> EngineBuilder {
    engine()
        .origins(["http://127.0.0.1"])
        .allowed_headers(["X-Custom-1", "X-Custom-2"])
        .methods([method::GET, method::POST])
}

pub fn actual_request() -> ActualRequestBuilder {
    ActualRequestBuilder::new()
}

pub fn preflight_request() -> PreflightRequestBuilder {
    PreflightRequestBuilder::new()
}
