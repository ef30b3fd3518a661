#[doc(hidden)]
pub fn normalize_lower(value: &str) -> String {
    if value.is_ascii() {
        let mut owned = value.to_owned();
        owned.make_ascii_lowercase();
        owned
    } else {
        value.to_lowercase()
    }
}

#[doc(hidden)]
pub fn normalize_upper(value: &str) -> String {
    if value.is_ascii() {
        let mut owned = value.to_owned();
        owned.make_ascii_uppercase();
        owned
    } else {
        value.to_uppercase()
    }
}

pub(crate) fn trim_slashes(value: &str) -> &str {
    value.trim_matches('/')
}

#[cfg(test)]
#[path = "util_test.rs"]
mod util_test;
