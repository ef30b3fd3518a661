use crate::constants::{LIST_SEPARATOR, header};
use crate::util::normalize_lower;
use indexmap::IndexMap;

/// Write access to the headers of an outgoing response.
///
/// The engine only ever sets whole header lines and reads them back, so this
/// is all a response container has to offer. Implementations are expected to
/// be owned by the request being served; the engine takes them by `&mut`.
pub trait ResponseHeaders {
    /// Replaces every value of `name` with `value`.
    fn set_header(&mut self, name: &str, value: String);

    /// Case-insensitive presence test.
    fn has_header(&self, name: &str) -> bool;

    /// All values of `name` joined with `", "`, or `None` when absent.
    fn header_line(&self, name: &str) -> Option<String>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct HeaderEntry {
    name: String,
    values: Vec<String>,
}

/// Case-insensitive, insertion-ordered header multi-map.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Headers {
    entries: IndexMap<String, HeaderEntry>,
}

impl Headers {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: IndexMap::with_capacity(capacity),
        }
    }

    /// Replaces any existing values. The name keeps the spelling of its first
    /// insertion.
    pub fn set<N, V>(&mut self, name: N, value: V)
    where
        N: Into<String>,
        V: Into<String>,
    {
        let name = name.into();
        let key = normalize_lower(&name);
        let value = value.into();
        match self.entries.get_mut(&key) {
            Some(entry) => entry.values = vec![value],
            None => {
                self.entries.insert(
                    key,
                    HeaderEntry {
                        name,
                        values: vec![value],
                    },
                );
            }
        }
    }

    pub fn append<N, V>(&mut self, name: N, value: V)
    where
        N: Into<String>,
        V: Into<String>,
    {
        let name = name.into();
        let key = normalize_lower(&name);
        self.entries
            .entry(key)
            .or_insert_with(|| HeaderEntry {
                name,
                values: Vec::new(),
            })
            .values
            .push(value.into());
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries
            .get(&normalize_lower(name))
            .and_then(|entry| entry.values.first())
            .map(String::as_str)
    }

    pub fn get_all(&self, name: &str) -> &[String] {
        self.entries
            .get(&normalize_lower(name))
            .map(|entry| entry.values.as_slice())
            .unwrap_or_default()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(&normalize_lower(name))
    }

    pub fn remove(&mut self, name: &str) -> Option<Vec<String>> {
        self.entries
            .shift_remove(&normalize_lower(name))
            .map(|entry| entry.values)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates `(name, line)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, String)> + '_ {
        self.entries
            .values()
            .map(|entry| (entry.name.as_str(), entry.values.join(LIST_SEPARATOR)))
    }
}

impl<N, V> FromIterator<(N, V)> for Headers
where
    N: Into<String>,
    V: Into<String>,
{
    fn from_iter<T: IntoIterator<Item = (N, V)>>(iter: T) -> Self {
        let mut headers = Headers::new();
        for (name, value) in iter {
            headers.append(name, value);
        }
        headers
    }
}

impl ResponseHeaders for Headers {
    fn set_header(&mut self, name: &str, value: String) {
        self.set(name, value);
    }

    fn has_header(&self, name: &str) -> bool {
        self.contains(name)
    }

    fn header_line(&self, name: &str) -> Option<String> {
        self.entries
            .get(&normalize_lower(name))
            .map(|entry| entry.values.join(LIST_SEPARATOR))
    }
}

/// Adds `name` to the response's `Vary` line unless it is already listed.
///
/// Existing members are found by splitting on `", "` and comparing ordinally,
/// so the line keeps its original order and spelling.
pub fn vary_header<R>(response: &mut R, name: &str)
where
    R: ResponseHeaders + ?Sized,
{
    let Some(current) = response.header_line(header::VARY) else {
        response.set_header(header::VARY, name.to_string());
        return;
    };

    if current.split(LIST_SEPARATOR).any(|entry| entry == name) {
        return;
    }

    response.set_header(header::VARY, format!("{current}{LIST_SEPARATOR}{name}"));
}

#[cfg(test)]
#[path = "headers_test.rs"]
mod headers_test;
