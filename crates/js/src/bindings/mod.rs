//! Engine-agnostic class definitions the bridge installs into a script
//! context.
//!
//! An [`InstanceDefine`] describes a script class backed by a native `T`: a
//! constructor plus named methods receiving the native instance. Engine
//! adapters walk these tables; nothing here depends on a particular engine.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

mod convert;
mod values;
pub use convert::event_to_js;
pub use values::{JSError, JSFunction, JSFunctionFn, JSValue};

/// Constructor of the native object behind a script class.
pub type ConstructorFn<T> = dyn Fn(Vec<JSValue>) -> Result<Arc<T>, JSError> + Send + Sync + 'static;

/// A method of a script class, called with the native instance.
pub type InstanceFn<T> = dyn Fn(&T, Vec<JSValue>) -> Result<JSValue, JSError> + Send + Sync + 'static;

/// A script class backed by native `T` instances.
pub struct InstanceDefine<T> {
    /// Class name as seen from script.
    pub name: String,
    pub constructor: Arc<ConstructorFn<T>>,
    /// Methods keyed by name.
    pub functions: BTreeMap<String, Arc<InstanceFn<T>>>,
}

impl<T> InstanceDefine<T> {
    pub fn new(name: &str, constructor: Arc<ConstructorFn<T>>) -> Self {
        Self { name: name.to_string(), constructor, functions: BTreeMap::new() }
    }

    /// Register a method.
    pub fn with_fn(mut self, name: &str, function: Arc<InstanceFn<T>>) -> Self {
        self.functions.insert(name.to_string(), function);
        self
    }

    /// Run the constructor.
    pub fn construct(&self, arguments: Vec<JSValue>) -> Result<Arc<T>, JSError> {
        (self.constructor)(arguments)
    }

    /// Call method `name` on `instance`.
    pub fn call(&self, instance: &T, name: &str, arguments: Vec<JSValue>) -> Result<JSValue, JSError> {
        let function = self
            .functions
            .get(name)
            .ok_or_else(|| JSError::TypeError(format!("{}.{} is not a function", self.name, name)))?;
        function(instance, arguments)
    }

    pub fn has_fn(&self, name: &str) -> bool {
        self.functions.contains_key(name)
    }
}

impl<T> fmt::Debug for InstanceDefine<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InstanceDefine")
            .field("name", &self.name)
            .field("functions", &self.functions.keys().collect::<Vec<_>>())
            .finish()
    }
}
