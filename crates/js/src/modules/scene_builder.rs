use std::sync::{Arc, Weak};

use dom::{SceneBuilder, Scope};

use super::builder_class;
use crate::bindings::{InstanceDefine, InstanceFn, JSError, JSValue};
use crate::decoder::NodeDecoder;
use crate::listener::listener_info_from_args;

/// Define the `SceneBuilder` class: `Create`, `Update`, `Delete`,
/// `AddEventListener`, `RemoveEventListener` and `Build`.
pub fn register_scene_builder(
    weak_scope: &Weak<Scope>,
    decoder: Arc<dyn NodeDecoder>,
) -> Arc<InstanceDefine<SceneBuilder>> {
    let class = builder_class("SceneBuilder", weak_scope, &decoder)
        .with_fn("AddEventListener", listener_fn(weak_scope, true))
        .with_fn("RemoveEventListener", listener_fn(weak_scope, false));
    Arc::new(class)
}

fn listener_fn(weak_scope: &Weak<Scope>, add: bool) -> Arc<InstanceFn<SceneBuilder>> {
    let weak_scope = Weak::clone(weak_scope);
    Arc::new(move |builder: &SceneBuilder, arguments: Vec<JSValue>| -> Result<JSValue, JSError> {
        if weak_scope.upgrade().is_none() {
            return Ok(JSValue::Undefined);
        }
        let mut info = listener_info_from_args(&arguments)?;
        if add {
            builder.add_event_listener(&weak_scope, info);
        } else {
            info.callback = None;
            builder.remove_event_listener(&weak_scope, info);
        }
        Ok(JSValue::Undefined)
    })
}
