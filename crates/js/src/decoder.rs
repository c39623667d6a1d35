//! Turning script node descriptors into [`DomNode`]s.

use dom::{DomNode, DomValue, PropertyMap};

use crate::bindings::{JSError, JSValue};
use crate::listener::dom_id;

/// Converts the argument of `Create`/`Update`/`Delete` into node values.
pub trait NodeDecoder: Send + Sync {
    fn decode(&self, value: &JSValue) -> Result<Vec<DomNode>, JSError>;
}

/// Decodes arrays of plain objects shaped like
/// `{ id, pId, index, name, tagName, props: { style: {..}, ..attributes } }`.
///
/// `id` is required. A missing `pId` means the root (0) and a missing or
/// negative `index` appends.
#[derive(Debug, Default, Clone, Copy)]
pub struct ObjectNodeDecoder;

impl NodeDecoder for ObjectNodeDecoder {
    fn decode(&self, value: &JSValue) -> Result<Vec<DomNode>, JSError> {
        let JSValue::Array(items) = value else {
            return Err(JSError::TypeError(format!("expected an array of nodes, got {}", value.type_name())));
        };
        items.iter().map(decode_node).collect()
    }
}

fn decode_node(value: &JSValue) -> Result<DomNode, JSError> {
    if !matches!(value, JSValue::Object(_)) {
        return Err(JSError::TypeError(format!("expected a node object, got {}", value.type_name())));
    }
    let id = value
        .get("id")
        .ok_or_else(|| JSError::TypeError("node descriptor is missing `id`".to_owned()))
        .and_then(dom_id)?;
    let pid = value.get("pId").map(dom_id).transpose()?.unwrap_or(0);
    let mut node = DomNode::new(id, pid, value.get("name").and_then(JSValue::as_str).unwrap_or_default());
    if let Some(tag_name) = value.get("tagName").and_then(JSValue::as_str) {
        node.tag_name = tag_name.to_owned();
    }
    node.index = value
        .get("index")
        .and_then(JSValue::as_f64)
        .filter(|index| *index >= 0.0 && index.fract() == 0.0)
        .map(|index| index as usize);

    if let Some(JSValue::Object(props)) = value.get("props") {
        for (key, prop) in props {
            if key == "style" {
                node.style = property_map(prop)?;
            } else {
                node.attributes.insert(key.clone(), DomValue::from(prop));
            }
        }
    }
    Ok(node)
}

fn property_map(value: &JSValue) -> Result<PropertyMap, JSError> {
    match value {
        JSValue::Object(map) => Ok(map.iter().map(|(key, value)| (key.clone(), DomValue::from(value))).collect()),
        JSValue::Undefined | JSValue::Null => Ok(PropertyMap::new()),
        other => Err(JSError::TypeError(format!("style must be an object, got {}", other.type_name()))),
    }
}
