use crate::allowed_headers::join;
use crate::util::normalize_upper;
use indexmap::IndexSet;

/// Configuration for the `Access-Control-Allow-Methods` response header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AllowedMethods {
    /// Reflects the request's `Access-Control-Request-Method`, upper-cased.
    Any,
    /// Upper-cased, deduplicated allow-list.
    List(IndexSet<String>),
}

impl AllowedMethods {
    pub fn list<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::List(
            values
                .into_iter()
                .map(|value| normalize_upper(&value.into()))
                .collect(),
        )
    }

    pub fn any() -> Self {
        Self::Any
    }

    pub fn header_value(&self) -> Option<String> {
        match self {
            AllowedMethods::Any => None,
            AllowedMethods::List(values) => Some(join(values)),
        }
    }
}

impl Default for AllowedMethods {
    fn default() -> Self {
        Self::List(IndexSet::new())
    }
}

#[cfg(test)]
#[path = "allowed_methods_test.rs"]
mod allowed_methods_test;
