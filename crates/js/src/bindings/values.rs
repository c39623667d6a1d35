use std::collections::BTreeMap;
use std::error::Error;
use std::fmt::{Debug, Display, Formatter, Result as FmtResult};
use std::sync::Arc;

/// An engine-agnostic representation of JavaScript values.
#[derive(Clone, Debug)]
pub enum JSValue {
    /// The `undefined` value.
    Undefined,
    /// The `null` value.
    Null,
    /// A boolean primitive.
    Boolean(bool),
    /// A number (IEEE 754 double precision).
    Number(f64),
    /// A string value (UTF-8).
    String(String),
    /// An array of values.
    Array(Vec<JSValue>),
    /// A plain object with string keys.
    Object(BTreeMap<String, JSValue>),
    /// A callable value.
    Function(JSFunction),
}

impl JSValue {
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            JSValue::Number(number) => Some(*number),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            JSValue::String(string) => Some(string),
            _ => None,
        }
    }

    pub fn get(&self, key: &str) -> Option<&JSValue> {
        match self {
            JSValue::Object(map) => map.get(key),
            _ => None,
        }
    }

    /// Short type name used in error messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            JSValue::Undefined => "undefined",
            JSValue::Null => "null",
            JSValue::Boolean(_) => "boolean",
            JSValue::Number(_) => "number",
            JSValue::String(_) => "string",
            JSValue::Array(_) => "array",
            JSValue::Object(_) => "object",
            JSValue::Function(_) => "function",
        }
    }
}

/// Signature of a host-visible script function.
pub type JSFunctionFn = dyn Fn(Vec<JSValue>) -> Result<JSValue, JSError> + Send + Sync + 'static;

/// Handle to a script callable. Clones share the same function.
#[derive(Clone)]
pub struct JSFunction(Arc<JSFunctionFn>);

impl JSFunction {
    pub fn new(function: impl Fn(Vec<JSValue>) -> Result<JSValue, JSError> + Send + Sync + 'static) -> Self {
        JSFunction(Arc::new(function))
    }

    pub fn call(&self, arguments: Vec<JSValue>) -> Result<JSValue, JSError> {
        (self.0)(arguments)
    }

    pub fn same_function(&self, other: &JSFunction) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl Debug for JSFunction {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str("JSFunction")
    }
}

/// Error type used by host callbacks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JSError {
    /// A type error (for example, wrong argument types).
    TypeError(String),
    /// An internal error not exposed to user code in detail.
    InternalError(String),
}

impl Display for JSError {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            JSError::TypeError(message) => write!(f, "TypeError: {}", message),
            JSError::InternalError(message) => write!(f, "InternalError: {}", message),
        }
    }
}

impl Error for JSError {}
