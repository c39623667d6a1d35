use std::sync::{Arc, Weak};

use dom::{Scope, ScreenBuilder};

use super::builder_class;
use crate::bindings::InstanceDefine;
use crate::decoder::NodeDecoder;

/// Define the `ScreenBuilder` class: `Create`, `Update`, `Delete` and
/// `Build`. Listener registration goes through `SceneBuilder`.
pub fn register_screen_builder(
    weak_scope: &Weak<Scope>,
    decoder: Arc<dyn NodeDecoder>,
) -> Arc<InstanceDefine<ScreenBuilder>> {
    Arc::new(builder_class("ScreenBuilder", weak_scope, &decoder))
}
