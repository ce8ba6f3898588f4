use std::collections::BTreeMap;

/// A single request parameter value, prior to wire encoding.
///
/// The server protocol only understands strings, so every variant is
/// reduced to one by [`ParamValue::to_wire`]: record objects become their
/// ids, lists become comma-joined strings, and booleans become `1`/`0`.
#[derive(Debug, Clone, PartialEq)]
pub enum ParamValue {
    /// Text value, passed through as-is (always valid UTF-8)
    Text(String),
    /// Integer value
    Int(i64),
    /// Floating point value
    Float(f64),
    /// Boolean value, encoded as `1` or `0`
    Bool(bool),
    /// The id extracted from a record object (None when the object has no id)
    Record(Option<String>),
    /// A sequence of values, comma-joined after element-wise encoding
    List(Vec<ParamValue>),
}

impl ParamValue {
    /// Encode this value as its wire string
    pub fn to_wire(&self) -> String {
        match self {
            ParamValue::Text(text) => text.clone(),
            ParamValue::Int(value) => value.to_string(),
            ParamValue::Float(value) => value.to_string(),
            ParamValue::Bool(value) => {
                if *value {
                    "1".to_string()
                } else {
                    "0".to_string()
                }
            }
            ParamValue::Record(id) => id.clone().unwrap_or_default(),
            ParamValue::List(items) => items
                .iter()
                .map(|item| item.to_wire())
                .collect::<Vec<_>>()
                .join(","),
        }
    }
}

impl From<&str> for ParamValue {
    fn from(value: &str) -> Self {
        ParamValue::Text(value.to_string())
    }
}

impl From<String> for ParamValue {
    fn from(value: String) -> Self {
        ParamValue::Text(value)
    }
}

impl From<i64> for ParamValue {
    fn from(value: i64) -> Self {
        ParamValue::Int(value)
    }
}

impl From<i32> for ParamValue {
    fn from(value: i32) -> Self {
        ParamValue::Int(value as i64)
    }
}

impl From<u32> for ParamValue {
    fn from(value: u32) -> Self {
        ParamValue::Int(value as i64)
    }
}

impl From<f64> for ParamValue {
    fn from(value: f64) -> Self {
        ParamValue::Float(value)
    }
}

impl From<bool> for ParamValue {
    fn from(value: bool) -> Self {
        ParamValue::Bool(value)
    }
}

impl<T: Into<ParamValue>> From<Vec<T>> for ParamValue {
    fn from(values: Vec<T>) -> Self {
        ParamValue::List(values.into_iter().map(Into::into).collect())
    }
}

/// Request parameters as an ordered name/value collection.
///
/// Keys are kept sorted so that request signing and the constructed URLs
/// are deterministic.
#[derive(Debug, Clone, Default)]
pub struct Params(BTreeMap<String, ParamValue>);

impl Params {
    /// Create an empty parameter set
    pub fn new() -> Self {
        Params(BTreeMap::new())
    }

    /// Set a parameter, replacing any previous value for the same name
    pub fn set(mut self, name: impl Into<String>, value: impl Into<ParamValue>) -> Self {
        self.0.insert(name.into(), value.into());
        self
    }

    /// Check whether no parameters are set
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate over parameters in name order
    pub fn iter(&self) -> impl Iterator<Item = (&String, &ParamValue)> {
        self.0.iter()
    }

    /// Encode every parameter to its wire string.
    ///
    /// This never fails and never mutates the input; unknown-typed values
    /// cannot occur because [`ParamValue`] is a closed set.
    pub fn to_wire(&self) -> BTreeMap<String, String> {
        self.0
            .iter()
            .map(|(name, value)| (name.clone(), value.to_wire()))
            .collect()
    }
}

impl FromIterator<(String, ParamValue)> for Params {
    fn from_iter<I: IntoIterator<Item = (String, ParamValue)>>(iter: I) -> Self {
        Params(iter.into_iter().collect())
    }
}
