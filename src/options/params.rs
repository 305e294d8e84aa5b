//! Parsed option values.

use std::collections::BTreeMap;

use serde::Serialize;

/// Value of a single parsed option.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum ParamValue {
    /// Explicitly unset.
    Null,
    /// Boolean flag.
    Bool(bool),
    /// Single value.
    Str(String),
    /// Repeated option.
    List(Vec<String>),
}

impl ParamValue {
    /// Whether the value counts as "set" for flag checks.
    pub fn is_truthy(&self) -> bool {
        match self {
            Self::Null => false,
            Self::Bool(b) => *b,
            Self::Str(s) => !s.is_empty() && s != "0",
            Self::List(items) => !items.is_empty(),
        }
    }

    /// Get as string slice for single values.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Str(s) => Some(s),
            _ => None,
        }
    }
}

impl From<bool> for ParamValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<&str> for ParamValue {
    fn from(value: &str) -> Self {
        Self::Str(value.to_string())
    }
}

impl From<String> for ParamValue {
    fn from(value: String) -> Self {
        Self::Str(value)
    }
}

impl From<Vec<String>> for ParamValue {
    fn from(value: Vec<String>) -> Self {
        Self::List(value)
    }
}

/// Option name to value mapping produced by a parse.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Params(BTreeMap<String, ParamValue>);

impl Params {
    /// Create an empty set of params.
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up a value.
    pub fn get(&self, name: &str) -> Option<&ParamValue> {
        self.0.get(name)
    }

    /// Look up a single string value.
    pub fn get_str(&self, name: &str) -> Option<&str> {
        self.0.get(name).and_then(ParamValue::as_str)
    }

    /// Whether `name` is present and truthy.
    pub fn is_set(&self, name: &str) -> bool {
        self.0.get(name).is_some_and(ParamValue::is_truthy)
    }

    /// Set a value, replacing any previous one.
    pub fn set(&mut self, name: &str, value: impl Into<ParamValue>) {
        self.0.insert(name.to_string(), value.into());
    }

    /// Overlay `extra` on top of these params. Values in `extra` win.
    pub fn merge(&mut self, extra: &Params) {
        for (name, value) in &extra.0 {
            self.0.insert(name.clone(), value.clone());
        }
    }

    /// Builder-style `set`.
    pub fn with(mut self, name: &str, value: impl Into<ParamValue>) -> Self {
        self.set(name, value);
        self
    }

    /// Iterate over all values in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &ParamValue)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Number of params.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Check if no params are present.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truthiness() {
        assert!(ParamValue::Bool(true).is_truthy());
        assert!(!ParamValue::Bool(false).is_truthy());
        assert!(!ParamValue::Null.is_truthy());
        assert!(ParamValue::from("yes").is_truthy());
        assert!(!ParamValue::from("0").is_truthy());
        assert!(!ParamValue::from("").is_truthy());
        assert!(!ParamValue::List(vec![]).is_truthy());
    }

    #[test]
    fn merge_prefers_extra() {
        let mut params = Params::new().with("quiet", false).with("name", "parsed");
        let extra = Params::new().with("name", "override").with("requested", true);
        params.merge(&extra);

        assert_eq!(params.get_str("name"), Some("override"));
        assert!(params.is_set("requested"));
        assert!(!params.is_set("quiet"));
        assert_eq!(params.len(), 3);
    }

    #[test]
    fn missing_param_is_not_set() {
        let params = Params::new();
        assert!(!params.is_set("help"));
        assert!(params.get("help").is_none());
        assert!(params.is_empty());
    }

    #[test]
    fn serializes_as_plain_map() {
        let params = Params::new()
            .with("force", true)
            .with("connection", "default")
            .with("unset", ParamValue::Null);
        let json = serde_json::to_string(&params).unwrap();
        assert_eq!(json, r#"{"connection":"default","force":true,"unset":null}"#);
    }
}
