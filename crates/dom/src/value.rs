use std::collections::BTreeMap;

/// Property value carried by DOM nodes (style, attributes, event payloads).
#[derive(Clone, Debug, Default, PartialEq)]
pub enum DomValue {
    #[default]
    Null,
    Bool(bool),
    Number(f64),
    String(String),
    Array(Vec<DomValue>),
    Object(BTreeMap<String, DomValue>),
}

impl DomValue {
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Number(number) => Some(*number),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(string) => Some(string),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(value) => Some(*value),
            _ => None,
        }
    }

    pub fn as_object(&self) -> Option<&BTreeMap<String, DomValue>> {
        match self {
            Self::Object(map) => Some(map),
            _ => None,
        }
    }
}

impl From<f64> for DomValue {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<bool> for DomValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<&str> for DomValue {
    fn from(value: &str) -> Self {
        Self::String(value.to_owned())
    }
}

impl From<String> for DomValue {
    fn from(value: String) -> Self {
        Self::String(value)
    }
}

/// Ordered property map used for style and attribute sets.
pub type PropertyMap = BTreeMap<String, DomValue>;
