//! Directive serialization shared by the policy headers.
//!
//! Content-Security-Policy and Public-Key-Pins are both a sequence of
//! `; `-terminated directives. [`DirectiveWriter`] produces that shape and
//! [`DirectiveTable`] keeps the ordered, de-duplicated set of CSP directives
//! that feeds it.

mod value;

pub use value::{DirectiveValue, QUOTED_KEYWORDS, quote_keyword};

use indexmap::IndexMap;
use std::fmt::Display;

/// Directive whose value is rendered as `1`/`0` from the truthiness of the input.
pub const UPGRADE_INSECURE_REQUESTS: &str = "upgrade-insecure-requests";

/// Normalize a word-joined option name (`connectSrc`) to a directive name (`connect-src`).
///
/// A `-` is inserted before every uppercase letter unless it is the first
/// character or already follows a `-`, then the whole name is lowercased.
/// Names that are already dash-cased pass through unchanged.
pub fn dash_case(name: &str) -> String {
    let mut out = String::with_capacity(name.len() + 4);
    let mut prev: Option<char> = None;

    for ch in name.chars() {
        if ch.is_ascii_uppercase() && prev.is_some_and(|p| p != '-') {
            out.push('-');
        }
        out.push(ch.to_ascii_lowercase());
        prev = Some(ch);
    }

    out
}

/// Appends `; `-terminated directives to a header value.
#[derive(Debug, Default)]
pub struct DirectiveWriter {
    buf: String,
}

impl DirectiveWriter {
    pub fn new() -> Self {
        Self::default()
    }

    /// `name; `
    pub fn flag(&mut self, name: &str) -> &mut Self {
        self.buf.push_str(name);
        self.buf.push_str("; ");
        self
    }

    /// `name value; `
    pub fn named(&mut self, name: &str, value: &str) -> &mut Self {
        self.buf.push_str(name);
        self.buf.push(' ');
        self.buf.push_str(value);
        self.buf.push_str("; ");
        self
    }

    /// `name=value; `
    pub fn assign(&mut self, name: &str, value: impl Display) -> &mut Self {
        self.buf.push_str(&format!("{}={}; ", name, value));
        self
    }

    /// `name="value"; `
    pub fn assign_quoted(&mut self, name: &str, value: &str) -> &mut Self {
        self.buf.push_str(&format!("{}=\"{}\"; ", name, value));
        self
    }

    pub fn finish(self) -> String {
        self.buf
    }
}

/// Ordered table of dash-cased directive names to rendered values.
///
/// The first insertion of a name wins; later insertions of the same
/// normalized name are ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DirectiveTable {
    entries: IndexMap<String, String>,
}

impl DirectiveTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Normalize `name`, render `value` and append the directive.
    ///
    /// Returns `false` when a directive with the same normalized name was
    /// already present.
    pub fn insert(&mut self, name: &str, value: &DirectiveValue) -> bool {
        let name = dash_case(name);
        if self.entries.contains_key(&name) {
            return false;
        }

        let rendered = if name == UPGRADE_INSECURE_REQUESTS {
            String::from(if value.is_truthy() { "1" } else { "0" })
        } else {
            value.render()
        };

        self.entries.insert(name, rendered);
        true
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries.get(name).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Serialize as `name value; name value; ` in insertion order.
    pub fn serialize(&self) -> String {
        let mut writer = DirectiveWriter::new();
        for (name, value) in self.iter() {
            writer.named(name, value);
        }
        writer.finish()
    }
}

impl<'a, V> FromIterator<(&'a str, V)> for DirectiveTable
where
    V: Into<DirectiveValue>,
{
    fn from_iter<I: IntoIterator<Item = (&'a str, V)>>(iter: I) -> Self {
        let mut table = Self::new();
        for (name, value) in iter {
            table.insert(name, &value.into());
        }
        table
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dash_case() {
        assert_eq!(dash_case("connectSrc"), "connect-src");
        assert_eq!(dash_case("upgradeInsecureRequests"), "upgrade-insecure-requests");
        assert_eq!(dash_case("sandbox"), "sandbox");
        assert_eq!(dash_case("script-src"), "script-src");
        assert_eq!(dash_case("ConnectSrc"), "connect-src");
        assert_eq!(dash_case("report-Uri"), "report-uri");
    }

    #[test]
    fn test_dash_case_only_touches_ascii() {
        assert_eq!(dash_case("fontÄSrc"), "fontÄ-src");
        assert_eq!(dash_case("Ärger"), "Ärger");
    }

    #[test]
    fn test_writer_shapes() {
        let mut writer = DirectiveWriter::new();
        writer
            .assign_quoted("pin-sha256", "AAA=")
            .assign("max-age", 1000)
            .flag("includeSubdomains")
            .named("connect-src", "'self'");
        assert_eq!(
            writer.finish(),
            "pin-sha256=\"AAA=\"; max-age=1000; includeSubdomains; connect-src 'self'; "
        );
    }

    #[test]
    fn test_table_keeps_insertion_order() {
        let table: DirectiveTable = [
            ("scriptSrc", DirectiveValue::from(["self"])),
            ("defaultSrc", DirectiveValue::from(["none"])),
            ("imgSrc", DirectiveValue::from(["*"])),
        ]
        .into_iter()
        .collect();

        assert_eq!(
            table.serialize(),
            "script-src 'self'; default-src 'none'; img-src *; "
        );
    }

    #[test]
    fn test_table_first_insert_wins() {
        let mut table = DirectiveTable::new();
        assert!(table.insert("connectSrc", &DirectiveValue::from(["self"])));
        assert!(!table.insert("connect-src", &DirectiveValue::from(["none"])));
        assert_eq!(table.len(), 1);
        assert_eq!(table.get("connect-src"), Some("'self'"));
    }

    #[test]
    fn test_upgrade_insecure_requests_renders_switch() {
        let mut table = DirectiveTable::new();
        table.insert("upgradeInsecureRequests", &DirectiveValue::from(true));
        assert_eq!(table.serialize(), "upgrade-insecure-requests 1; ");

        let mut table = DirectiveTable::new();
        table.insert("upgradeInsecureRequests", &DirectiveValue::from(false));
        assert_eq!(table.serialize(), "upgrade-insecure-requests 0; ");
    }

    #[test]
    fn test_empty_table_serializes_empty() {
        assert!(DirectiveTable::new().is_empty());
        assert_eq!(DirectiveTable::new().serialize(), "");
    }
}
