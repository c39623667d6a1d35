//! Scripting bridge for the DOM core.
//!
//! Engine adapters install the classes defined here (`SceneBuilder`,
//! `ScreenBuilder`) into a script context. Script calls are validated and
//! decoded into native DOM values at this boundary; the DOM crate never sees
//! raw script values.

pub mod bindings;
pub use bindings::{InstanceDefine, InstanceFn, JSError, JSFunction, JSValue, event_to_js};

mod decoder;
pub use decoder::{NodeDecoder, ObjectNodeDecoder};

mod listener;
pub use listener::listener_info_from_args;

mod modules;
pub use modules::{register_scene_builder, register_screen_builder};
