//! YAML front matter with typed accessors.
//!
//! Front matter is the optional YAML block at the very top of a document,
//! delimited by `---` lines. Queries read it through forgiving accessors that
//! fall back to a default instead of failing on a missing or mistyped key.

use crate::error::{Result, VaultError};
use serde_yaml::{Mapping, Value};

const DELIMITER: &str = "---";

/// Parsed front matter of a single document.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FrontMatter(Mapping);

impl FrontMatter {
    /// Creates empty front matter.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses a YAML block. An empty block yields empty front matter.
    pub fn parse(document: &str, yaml: &str) -> Result<Self> {
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }
        let value: Value =
            serde_yaml::from_str(yaml).map_err(|source| VaultError::FrontMatter {
                document: document.to_string(),
                source,
            })?;
        match value {
            Value::Null => Ok(Self::default()),
            Value::Mapping(mapping) => Ok(Self(mapping)),
            _ => Err(VaultError::FrontMatterShape(document.to_string())),
        }
    }

    /// Splits raw document text into its front matter block and body.
    ///
    /// Text without an opening `---` line has no front matter. An opening
    /// delimiter without a closing one is treated as body text.
    pub fn split(content: &str) -> (Option<&str>, &str) {
        let content = content.strip_prefix('\u{feff}').unwrap_or(content);
        let Some(rest) = content
            .strip_prefix(DELIMITER)
            .and_then(|rest| rest.strip_prefix('\n').or_else(|| rest.strip_prefix("\r\n")))
        else {
            return (None, content);
        };

        let mut offset = 0;
        for line in rest.split_inclusive('\n') {
            if line.trim_end() == DELIMITER {
                let yaml = &rest[..offset];
                let body = &rest[offset + line.len()..];
                return (Some(yaml), body);
            }
            offset += line.len();
        }
        (None, content)
    }

    /// Returns the raw value for a key.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// Returns true if the key is present.
    pub fn contains(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    /// Returns true if there are no keys.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Reads a scalar as a string.
    pub fn string(&self, key: &str, default: &str) -> String {
        match self.get(key) {
            Some(Value::String(s)) => s.clone(),
            Some(Value::Number(n)) => n.to_string(),
            Some(Value::Bool(b)) => b.to_string(),
            _ => default.to_string(),
        }
    }

    /// Reads a boolean. Accepts YAML booleans and the usual textual spellings.
    pub fn bool(&self, key: &str, default: bool) -> bool {
        match self.get(key) {
            Some(Value::Bool(b)) => *b,
            Some(Value::String(s)) => match s.trim().to_lowercase().as_str() {
                "true" | "yes" | "on" => true,
                "false" | "no" | "off" => false,
                _ => default,
            },
            _ => default,
        }
    }

    /// Reads an integer.
    pub fn integer(&self, key: &str, default: i64) -> i64 {
        match self.get(key) {
            Some(Value::Number(n)) => n.as_i64().unwrap_or(default),
            Some(Value::String(s)) => s.trim().parse().unwrap_or(default),
            _ => default,
        }
    }

    /// Reads a list of strings. A single string counts as a one-element list.
    pub fn list_of_strings(&self, key: &str) -> Vec<String> {
        match self.get(key) {
            Some(Value::Sequence(items)) => items
                .iter()
                .filter_map(|item| match item {
                    Value::String(s) => Some(s.clone()),
                    Value::Number(n) => Some(n.to_string()),
                    _ => None,
                })
                .collect(),
            Some(Value::String(s)) => vec![s.clone()],
            _ => Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_front_matter() {
        let content = "---\ninclude-in-graph: true\n---\n# Meeting\n";
        let (yaml, body) = FrontMatter::split(content);
        assert_eq!(yaml, Some("include-in-graph: true\n"));
        assert_eq!(body, "# Meeting\n");
    }

    #[test]
    fn test_split_without_front_matter() {
        let (yaml, body) = FrontMatter::split("# Just text\n---\n");
        assert!(yaml.is_none());
        assert_eq!(body, "# Just text\n---\n");
    }

    #[test]
    fn test_unterminated_block_is_body() {
        let (yaml, body) = FrontMatter::split("---\ntitle: x\n");
        assert!(yaml.is_none());
        assert_eq!(body, "---\ntitle: x\n");
    }

    #[test]
    fn test_typed_accessors() {
        let fm = FrontMatter::parse(
            "doc",
            "status: green\ninclude-in-graph: yes\npriority: 3\ntags: [a, b]\n",
        )
        .unwrap();

        assert_eq!(fm.string("status", "unknown"), "green");
        assert_eq!(fm.string("missing", "unknown"), "unknown");
        assert!(fm.bool("include-in-graph", false));
        assert!(!fm.bool("missing", false));
        assert_eq!(fm.integer("priority", 0), 3);
        assert_eq!(fm.list_of_strings("tags"), vec!["a", "b"]);
    }

    #[test]
    fn test_quoted_boolean() {
        let fm = FrontMatter::parse("doc", "include-in-graph: \"true\"").unwrap();
        assert!(fm.bool("include-in-graph", false));
    }

    #[test]
    fn test_non_mapping_is_rejected() {
        let err = FrontMatter::parse("doc", "- a\n- b\n").unwrap_err();
        assert!(matches!(err, VaultError::FrontMatterShape(_)));
    }
}
