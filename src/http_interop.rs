//! Adapters for the [`http`] crate's request and response types.

use crate::constants::{LIST_SEPARATOR, header};
use crate::context::{CorsRequest, RequestUri, split_authority};
use crate::headers::ResponseHeaders;
use crate::result::PreflightResponse;
use http::header::{HeaderMap, HeaderName, HeaderValue};
use http::{Request, Response, StatusCode, Uri, request::Parts};
use std::borrow::Cow;
use tracing::warn;

fn header_line<'a>(headers: &'a HeaderMap, name: &str) -> Option<Cow<'a, str>> {
    let mut values = headers
        .get_all(name)
        .iter()
        .filter_map(|value| value.to_str().ok());
    let first = values.next()?;
    let Some(second) = values.next() else {
        return Some(Cow::Borrowed(first));
    };

    let mut line = format!("{first}{LIST_SEPARATOR}{second}");
    for value in values {
        line.push_str(LIST_SEPARATOR);
        line.push_str(value);
    }
    Some(Cow::Owned(line))
}

fn request_uri(uri: &Uri, headers: &HeaderMap) -> RequestUri {
    let mut target = RequestUri {
        scheme: uri.scheme_str().map(str::to_string),
        host: uri.host().unwrap_or_default().to_string(),
        port: uri.port_u16(),
        path: uri.path().to_string(),
        query: uri.query().map(str::to_string),
    };

    if target.host.is_empty()
        && let Some(host) = headers
            .get(header::HOST)
            .and_then(|value| value.to_str().ok())
    {
        let (host, port) = split_authority(host);
        target.host = host.to_string();
        target.port = target.port.or(port);
    }

    target
}

impl From<&Uri> for RequestUri {
    fn from(uri: &Uri) -> Self {
        request_uri(uri, &HeaderMap::new())
    }
}

impl CorsRequest for Parts {
    fn method(&self) -> &str {
        self.method.as_str()
    }

    fn header(&self, name: &str) -> Option<Cow<'_, str>> {
        header_line(&self.headers, name)
    }

    fn has_header(&self, name: &str) -> bool {
        self.headers.contains_key(name)
    }

    fn uri(&self) -> RequestUri {
        request_uri(&self.uri, &self.headers)
    }
}

impl<B> CorsRequest for Request<B> {
    fn method(&self) -> &str {
        Request::method(self).as_str()
    }

    fn header(&self, name: &str) -> Option<Cow<'_, str>> {
        header_line(self.headers(), name)
    }

    fn has_header(&self, name: &str) -> bool {
        self.headers().contains_key(name)
    }

    fn uri(&self) -> RequestUri {
        request_uri(Request::uri(self), self.headers())
    }
}

impl ResponseHeaders for HeaderMap {
    fn set_header(&mut self, name: &str, value: String) {
        let Ok(header_name) = HeaderName::from_bytes(name.as_bytes()) else {
            warn!(header = name, "skipping cors header with invalid name");
            return;
        };
        match HeaderValue::try_from(value) {
            Ok(header_value) => {
                self.insert(header_name, header_value);
            }
            Err(_) => warn!(header = name, "skipping cors header with invalid value"),
        }
    }

    fn has_header(&self, name: &str) -> bool {
        self.contains_key(name)
    }

    fn header_line(&self, name: &str) -> Option<String> {
        header_line(self, name).map(Cow::into_owned)
    }
}

impl<B> ResponseHeaders for Response<B> {
    fn set_header(&mut self, name: &str, value: String) {
        self.headers_mut().set_header(name, value);
    }

    fn has_header(&self, name: &str) -> bool {
        self.headers().contains_key(name)
    }

    fn header_line(&self, name: &str) -> Option<String> {
        ResponseHeaders::header_line(self.headers(), name)
    }
}

impl PreflightResponse {
    /// Converts into an empty-bodied [`http::Response`].
    pub fn into_response<B: Default>(self) -> Response<B> {
        let mut response = Response::new(B::default());
        *response.status_mut() =
            StatusCode::from_u16(self.status).unwrap_or(StatusCode::NO_CONTENT);
        for (name, value) in self.headers.iter() {
            response.headers_mut().set_header(name, value);
        }
        response
    }
}

#[cfg(test)]
#[path = "http_interop_test.rs"]
mod http_interop_test;
