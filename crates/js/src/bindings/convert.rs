//! Conversions between script values and DOM property values.

use dom::{DomEvent, DomValue};

use super::values::JSValue;

impl From<&DomValue> for JSValue {
    fn from(value: &DomValue) -> Self {
        match value {
            DomValue::Null => JSValue::Null,
            DomValue::Bool(value) => JSValue::Boolean(*value),
            DomValue::Number(number) => JSValue::Number(*number),
            DomValue::String(string) => JSValue::String(string.clone()),
            DomValue::Array(items) => JSValue::Array(items.iter().map(JSValue::from).collect()),
            DomValue::Object(map) => {
                JSValue::Object(map.iter().map(|(key, value)| (key.clone(), JSValue::from(value))).collect())
            }
        }
    }
}

/// Functions and `undefined` have no property form and become `null`.
impl From<&JSValue> for DomValue {
    fn from(value: &JSValue) -> Self {
        match value {
            JSValue::Undefined | JSValue::Null | JSValue::Function(_) => DomValue::Null,
            JSValue::Boolean(value) => DomValue::Bool(*value),
            JSValue::Number(number) => DomValue::Number(*number),
            JSValue::String(string) => DomValue::String(string.clone()),
            JSValue::Array(items) => DomValue::Array(items.iter().map(DomValue::from).collect()),
            JSValue::Object(map) => {
                DomValue::Object(map.iter().map(|(key, value)| (key.clone(), DomValue::from(value))).collect())
            }
        }
    }
}

/// Event object handed to script listeners: `{ type, target, data }`.
pub fn event_to_js(event: &DomEvent) -> JSValue {
    JSValue::Object(
        [
            ("type".to_owned(), JSValue::String(event.name.clone())),
            ("target".to_owned(), JSValue::Number(f64::from(event.target))),
            ("data".to_owned(), JSValue::from(&event.data)),
        ]
        .into_iter()
        .collect(),
    )
}
