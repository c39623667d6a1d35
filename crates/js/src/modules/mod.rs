//! Script classes wrapping the DOM builders.

mod scene_builder;
mod screen_builder;

pub use scene_builder::register_scene_builder;
pub use screen_builder::register_screen_builder;

use std::sync::{Arc, Weak};

use dom::{SceneBuilder, Scope};

use crate::bindings::{InstanceDefine, InstanceFn, JSError, JSValue};
use crate::decoder::NodeDecoder;

#[derive(Clone, Copy)]
enum Mutation {
    Create,
    Update,
    Delete,
}

fn first_argument(arguments: Vec<JSValue>, function: &str) -> Result<JSValue, JSError> {
    arguments
        .into_iter()
        .next()
        .ok_or_else(|| JSError::TypeError(format!("{function} expects a node array")))
}

fn mutation_fn(
    weak_scope: &Weak<Scope>,
    decoder: &Arc<dyn NodeDecoder>,
    mutation: Mutation,
) -> Arc<InstanceFn<SceneBuilder>> {
    let weak_scope = Weak::clone(weak_scope);
    let decoder = Arc::clone(decoder);
    Arc::new(move |builder: &SceneBuilder, arguments: Vec<JSValue>| -> Result<JSValue, JSError> {
        let Some(scope) = weak_scope.upgrade() else {
            return Ok(JSValue::Undefined);
        };
        let name = match mutation {
            Mutation::Create => "Create",
            Mutation::Update => "Update",
            Mutation::Delete => "Delete",
        };
        let nodes = decoder.decode(&first_argument(arguments, name)?)?;
        let dom_manager = scope.dom_manager();
        match mutation {
            Mutation::Create => builder.create(&dom_manager, nodes),
            Mutation::Update => builder.update(&dom_manager, nodes),
            Mutation::Delete => builder.delete(&dom_manager, nodes),
        }
        Ok(JSValue::Undefined)
    })
}

fn build_fn(weak_scope: &Weak<Scope>) -> Arc<InstanceFn<SceneBuilder>> {
    let weak_scope = Weak::clone(weak_scope);
    Arc::new(move |builder: &SceneBuilder, _arguments: Vec<JSValue>| -> Result<JSValue, JSError> {
        let Some(scope) = weak_scope.upgrade() else {
            return Ok(JSValue::Undefined);
        };
        let weak_dom_manager = scope.dom_manager();
        let scene = builder.build(&weak_dom_manager);
        if let Some(dom_manager) = weak_dom_manager.upgrade() {
            dom_manager.post_task(move || scene.build());
        }
        Ok(JSValue::Undefined)
    })
}

/// Class with the mutation functions and `Build` shared by both builders.
fn builder_class(name: &str, weak_scope: &Weak<Scope>, decoder: &Arc<dyn NodeDecoder>) -> InstanceDefine<SceneBuilder> {
    let constructor = |_arguments: Vec<JSValue>| -> Result<Arc<SceneBuilder>, JSError> { Ok(Arc::new(SceneBuilder::new())) };
    InstanceDefine::new(name, Arc::new(constructor))
        .with_fn("Create", mutation_fn(weak_scope, decoder, Mutation::Create))
        .with_fn("Update", mutation_fn(weak_scope, decoder, Mutation::Update))
        .with_fn("Delete", mutation_fn(weak_scope, decoder, Mutation::Delete))
        .with_fn("Build", build_fn(weak_scope))
}
