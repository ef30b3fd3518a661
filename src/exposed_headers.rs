use crate::allowed_headers::join;
use indexmap::IndexSet;
use std::ops::Deref;

/// Headers advertised through `Access-Control-Expose-Headers`.
///
/// Names keep the case they were configured with.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct ExposedHeaders {
    values: IndexSet<String>,
}

impl ExposedHeaders {
    pub fn list<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            values: values.into_iter().map(Into::into).collect(),
        }
    }

    /// `None` when nothing is exposed and the header should be omitted.
    pub fn header_value(&self) -> Option<String> {
        if self.values.is_empty() {
            None
        } else {
            Some(join(&self.values))
        }
    }
}

impl Deref for ExposedHeaders {
    type Target = IndexSet<String>;

    fn deref(&self) -> &Self::Target {
        &self.values
    }
}

#[cfg(test)]
#[path = "exposed_headers_test.rs"]
mod exposed_headers_test;
