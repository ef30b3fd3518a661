use crate::constants::LIST_SEPARATOR;
use crate::util::normalize_lower;
use indexmap::IndexSet;

/// Configuration for the `Access-Control-Allow-Headers` response value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AllowedHeaders {
    /// Reflects the request's `Access-Control-Request-Headers` verbatim.
    Any,
    /// Lower-cased, deduplicated allow-list.
    List(IndexSet<String>),
}

impl Default for AllowedHeaders {
    fn default() -> Self {
        AllowedHeaders::List(IndexSet::new())
    }
}

impl AllowedHeaders {
    pub fn list<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::List(
            values
                .into_iter()
                .map(|value| normalize_lower(&value.into()))
                .collect(),
        )
    }

    pub fn any() -> Self {
        Self::Any
    }

    /// The static header line, `None` when the request value is reflected.
    pub fn header_value(&self) -> Option<String> {
        match self {
            Self::Any => None,
            Self::List(values) => Some(join(values)),
        }
    }
}

pub(crate) fn join(values: &IndexSet<String>) -> String {
    values
        .iter()
        .map(String::as_str)
        .collect::<Vec<_>>()
        .join(LIST_SEPARATOR)
}

#[cfg(test)]
#[path = "allowed_headers_test.rs"]
mod allowed_headers_test;
