use crate::constants::header;
use crate::headers::Headers;
use std::borrow::Cow;
use std::fmt;

/// Read-only view of an incoming request.
pub trait CorsRequest {
    fn method(&self) -> &str;

    /// Case-insensitive lookup. Repeated headers are joined with `", "`.
    fn header(&self, name: &str) -> Option<Cow<'_, str>>;

    fn has_header(&self, name: &str) -> bool {
        self.header(name).is_some()
    }

    fn uri(&self) -> RequestUri;

    fn origin(&self) -> Option<Cow<'_, str>> {
        self.header(header::ORIGIN)
    }
}

/// Target of a request, split the way the path gate consumes it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestUri {
    pub scheme: Option<String>,
    pub host: String,
    pub port: Option<u16>,
    pub path: String,
    pub query: Option<String>,
}

impl RequestUri {
    pub fn new(host: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            host: host.into(),
            path: path.into(),
            ..Self::default()
        }
    }

    /// Lenient parse of an absolute (`http://host:port/path?query`) or
    /// origin-form (`/path?query`) target. Fragments are dropped.
    pub fn parse(value: &str) -> Self {
        let value = value.split('#').next().unwrap_or_default();
        let (rest, query) = match value.split_once('?') {
            Some((rest, query)) => (rest, Some(query.to_string())),
            None => (value, None),
        };

        let Some((scheme, rest)) = rest.split_once("://") else {
            return Self {
                path: rest.to_string(),
                query,
                ..Self::default()
            };
        };

        let (authority, path) = match rest.find('/') {
            Some(idx) => rest.split_at(idx),
            None => (rest, ""),
        };
        let (host, port) = split_authority(authority);

        Self {
            scheme: Some(scheme.to_string()),
            host: host.to_string(),
            port,
            path: path.to_string(),
            query,
        }
    }

    pub fn with_scheme(mut self, scheme: impl Into<String>) -> Self {
        self.scheme = Some(scheme.into());
        self
    }

    pub fn with_port(mut self, port: u16) -> Self {
        self.port = Some(port);
        self
    }

    pub fn with_query(mut self, query: impl Into<String>) -> Self {
        self.query = Some(query.into());
        self
    }
}

/// Splits `host[:port]`, keeping bracketed IPv6 literals intact.
pub(crate) fn split_authority(authority: &str) -> (&str, Option<u16>) {
    let authority = authority
        .rsplit_once('@')
        .map_or(authority, |(_, host)| host);

    let port_sep = if authority.starts_with('[') {
        authority
            .find(']')
            .and_then(|end| authority[end..].find(':').map(|idx| end + idx))
    } else {
        authority.rfind(':')
    };

    match port_sep {
        Some(idx) => match authority[idx + 1..].parse::<u16>() {
            Ok(port) => (&authority[..idx], Some(port)),
            Err(_) => (authority, None),
        },
        None => (authority, None),
    }
}

impl fmt::Display for RequestUri {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(scheme) = &self.scheme {
            write!(f, "{scheme}:")?;
        }
        if !self.host.is_empty() {
            write!(f, "//{}", self.host)?;
            if let Some(port) = self.port {
                write!(f, ":{port}")?;
            }
            if !self.path.is_empty() && !self.path.starts_with('/') {
                f.write_str("/")?;
            }
        }
        f.write_str(&self.path)?;
        if let Some(query) = &self.query {
            write!(f, "?{query}")?;
        }
        Ok(())
    }
}

/// Owned request snapshot for callers that do not use the `http` crate.
#[derive(Debug, Clone, Default)]
pub struct RequestContext {
    method: String,
    uri: RequestUri,
    headers: Headers,
}

impl RequestContext {
    pub fn new(method: impl Into<String>, uri: &str) -> Self {
        Self {
            method: method.into(),
            uri: RequestUri::parse(uri),
            headers: Headers::new(),
        }
    }

    pub fn with_uri(mut self, uri: RequestUri) -> Self {
        self.uri = uri;
        self
    }

    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.append(name, value);
        self
    }

    pub fn headers(&self) -> &Headers {
        &self.headers
    }
}

impl CorsRequest for RequestContext {
    fn method(&self) -> &str {
        &self.method
    }

    fn header(&self, name: &str) -> Option<Cow<'_, str>> {
        match self.headers.get_all(name) {
            [] => None,
            [single] => Some(Cow::Borrowed(single.as_str())),
            many => Some(Cow::Owned(many.join(crate::constants::LIST_SEPARATOR))),
        }
    }

    fn uri(&self) -> RequestUri {
        let mut uri = self.uri.clone();
        if uri.host.is_empty()
            && let Some(host) = self.headers.get(header::HOST)
        {
            let (host, port) = split_authority(host);
            uri.host = host.to_string();
            uri.port = uri.port.or(port);
        }
        uri
    }
}

#[cfg(test)]
#[path = "context_test.rs"]
mod context_test;
