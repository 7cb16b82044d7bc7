//! Variable values.

use std::fmt;

/// A concrete value held by a state variable.
///
/// Values are totally ordered and hashable so they can be stored in
/// ordered sets, which keeps every aggregate built from them deterministic.
///
/// [`Value::None`] is the distinguished "unspecified" value. It is used as
/// the placeholder output of utility rules whose effects are action
/// templates rather than concrete values.
///
/// # Examples
///
/// ```
/// use u_anchor::domain::Value;
///
/// assert_eq!(Value::parse("true"), Value::Bool(true));
/// assert_eq!(Value::parse("42"), Value::Int(42));
/// assert_eq!(Value::parse("None"), Value::None);
/// assert_eq!(Value::parse("greet"), Value::from("greet"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Value {
    /// Unspecified / empty value.
    #[default]
    None,
    /// Boolean value.
    Bool(bool),
    /// Integer value.
    Int(i64),
    /// String value.
    Str(String),
}

impl Value {
    /// Parses a raw string into the most specific value it denotes.
    ///
    /// `"None"` and the empty string map to [`Value::None`], `"true"` and
    /// `"false"` to booleans, integer literals to [`Value::Int`]; anything
    /// else is kept as a string. Text wrapped in double quotes is always a
    /// string, with the outer quotes removed.
    pub fn parse(raw: &str) -> Self {
        let trimmed = raw.trim();
        if let Some(inner) = strip_quotes(trimmed) {
            return Value::Str(inner.to_string());
        }
        match trimmed {
            "" | "None" => Value::None,
            "true" => Value::Bool(true),
            "false" => Value::Bool(false),
            _ => trimmed
                .parse::<i64>()
                .map(Value::Int)
                .unwrap_or_else(|_| Value::Str(trimmed.to_string())),
        }
    }

    /// Whether this is the unspecified value.
    pub fn is_none(&self) -> bool {
        matches!(self, Value::None)
    }

    /// Returns the string payload, if this is a string value.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s),
            _ => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::None => f.write_str("None"),
            Value::Bool(b) => write!(f, "{b}"),
            Value::Int(i) => write!(f, "{i}"),
            Value::Str(s) if needs_quotes(s) => write!(f, "\"{s}\""),
            Value::Str(s) => f.write_str(s),
        }
    }
}

fn strip_quotes(text: &str) -> Option<&str> {
    text.strip_prefix('"')?.strip_suffix('"')
}

/// Whether `s` would not parse back to the same string unquoted.
fn needs_quotes(s: &str) -> bool {
    s.trim() != s
        || matches!(s, "" | "None" | "true" | "false")
        || s.parse::<i64>().is_ok()
        || strip_quotes(s).is_some()
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Str(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Str(s)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Value::Int(i)
    }
}

impl From<i32> for Value {
    fn from(i: i32) -> Self {
        Value::Int(i64::from(i))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_literals() {
        assert_eq!(Value::parse(""), Value::None);
        assert_eq!(Value::parse("None"), Value::None);
        assert_eq!(Value::parse("false"), Value::Bool(false));
        assert_eq!(Value::parse("-7"), Value::Int(-7));
        assert_eq!(Value::parse(" hello "), Value::Str("hello".into()));
    }

    #[test]
    fn test_display_roundtrips_parse() {
        for v in [
            Value::None,
            Value::Bool(true),
            Value::Int(3),
            Value::from("farewell"),
            Value::from("42"),
            Value::from("None"),
            Value::from("true"),
            Value::from(""),
            Value::from(" x"),
            Value::from("\"quoted\""),
            Value::from("\""),
        ] {
            assert_eq!(Value::parse(&v.to_string()), v);
        }
    }

    #[test]
    fn test_ambiguous_strings_are_quoted() {
        assert_eq!(Value::from("42").to_string(), "\"42\"");
        assert_eq!(Value::Int(42).to_string(), "42");
        assert_eq!(Value::from("greet").to_string(), "greet");
        assert_eq!(Value::parse("\"None\""), Value::from("None"));
    }

    #[test]
    fn test_ordering_is_total() {
        let mut values = vec![
            Value::from("b"),
            Value::Int(2),
            Value::None,
            Value::Bool(true),
            Value::from("a"),
        ];
        values.sort();
        assert_eq!(values[0], Value::None);
        assert_eq!(values[4], Value::from("b"));
    }

    #[test]
    fn test_accessors() {
        assert!(Value::default().is_none());
        assert_eq!(Value::from("x").as_str(), Some("x"));
        assert_eq!(Value::Int(1).as_str(), None);
    }
}
