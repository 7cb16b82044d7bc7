//! Variable-name templates.

use crate::error::{GroundingError, Result};
use regex::Regex;
use std::fmt;

/// A declared variable name that may contain wildcards.
///
/// - `*` matches any (possibly empty) substring
/// - `{slot}` matches a non-empty substring
///
/// Names without either are literal and compare by equality.
///
/// # Examples
///
/// ```
/// use u_anchor::rules::Template;
///
/// let t = Template::new("a_{role}").unwrap();
/// assert!(t.is_underspecified());
/// assert!(t.matches("a_m"));
/// assert!(!t.matches("a_"));
/// assert_eq!(t.slots(), vec!["role"]);
/// ```
#[derive(Debug, Clone)]
pub struct Template {
    raw: String,
    pattern: Option<Regex>,
    slots: Vec<String>,
}

impl Template {
    /// Compiles a template.
    pub fn new(raw: impl Into<String>) -> Result<Self> {
        let raw = raw.into();
        if !Self::has_wildcards(&raw) {
            return Ok(Self {
                raw,
                pattern: None,
                slots: Vec::new(),
            });
        }

        let mut regex = String::from("^");
        let mut slots = Vec::new();
        let mut rest = raw.as_str();
        while let Some(pos) = rest.find(['*', '{']) {
            regex.push_str(&regex::escape(&rest[..pos]));
            if rest[pos..].starts_with('*') {
                regex.push_str(".*");
                rest = &rest[pos + 1..];
                continue;
            }
            let close = rest[pos..].find('}').ok_or_else(|| GroundingError::InvalidTemplate {
                pattern: raw.clone(),
                reason: "unclosed '{'".into(),
            })?;
            let slot = &rest[pos + 1..pos + close];
            if slot.is_empty() {
                return Err(GroundingError::InvalidTemplate {
                    pattern: raw.clone(),
                    reason: "empty slot name".into(),
                });
            }
            slots.push(slot.to_string());
            regex.push_str(".+");
            rest = &rest[pos + close + 1..];
        }
        regex.push_str(&regex::escape(rest));
        regex.push('$');

        let pattern = Regex::new(&regex).map_err(|e| GroundingError::InvalidTemplate {
            pattern: raw.clone(),
            reason: e.to_string(),
        })?;
        Ok(Self {
            raw,
            pattern: Some(pattern),
            slots,
        })
    }

    /// Whether `name` contains template syntax.
    pub fn has_wildcards(name: &str) -> bool {
        name.contains(['*', '{'])
    }

    /// Whether this template contains wildcards or slots.
    pub fn is_underspecified(&self) -> bool {
        self.pattern.is_some()
    }

    /// Whether `name` matches the template.
    pub fn matches(&self, name: &str) -> bool {
        match &self.pattern {
            Some(re) => re.is_match(name),
            None => self.raw == name,
        }
    }

    /// Slot names, in order of appearance.
    pub fn slots(&self) -> Vec<&str> {
        self.slots.iter().map(String::as_str).collect()
    }

    /// The template as written.
    pub fn as_str(&self) -> &str {
        &self.raw
    }
}

impl fmt::Display for Template {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}
