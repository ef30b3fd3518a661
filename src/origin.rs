use crate::wildcard::Wildcard;
use indexmap::IndexSet;

/// Which request origins the policy accepts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AllowedOrigins {
    /// A literal `*` was configured: every origin is accepted.
    Any,
    List(OriginList),
}

/// Configured origins split into ordinal exact matches and glob patterns.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OriginList {
    exact: IndexSet<String>,
    patterns: Vec<Wildcard>,
}

impl OriginList {
    pub fn new<I, S>(exact: I, patterns: Vec<Wildcard>) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            exact: exact.into_iter().map(Into::into).collect(),
            patterns,
        }
    }

    pub fn exact(&self) -> &IndexSet<String> {
        &self.exact
    }

    pub fn patterns(&self) -> &[Wildcard] {
        &self.patterns
    }

    pub fn matches(&self, origin: &str) -> bool {
        self.exact.contains(origin) || self.patterns.iter().any(|pattern| pattern.matches(origin))
    }
}

impl AllowedOrigins {
    pub fn any() -> Self {
        Self::Any
    }

    pub fn is_any(&self) -> bool {
        matches!(self, Self::Any)
    }

    /// The only origin that can ever be echoed: no patterns and exactly one
    /// exact entry.
    pub fn single_origin(&self) -> Option<&str> {
        match self {
            Self::List(list) if list.patterns.is_empty() && list.exact.len() == 1 => {
                list.exact.first().map(String::as_str)
            }
            _ => None,
        }
    }

    /// `None` stands for a request without an `Origin` header.
    pub fn allows(&self, origin: Option<&str>) -> bool {
        match (self, origin) {
            (Self::Any, _) => true,
            (Self::List(_), None) => false,
            (Self::List(list), Some(origin)) => list.matches(origin),
        }
    }
}

impl Default for AllowedOrigins {
    fn default() -> Self {
        Self::List(OriginList::default())
    }
}

#[cfg(test)]
#[path = "origin_test.rs"]
mod origin_test;
