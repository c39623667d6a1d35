use std::sync::Arc;

use dom::{DomEvent, EventListenerInfo};
use log::warn;

use crate::bindings::{JSError, JSFunction, JSValue, event_to_js};

/// Parse `(domId, eventName[, callback])` listener arguments.
///
/// Callers must pass two or three arguments; other arities are a bridge bug
/// and trip a debug assertion. Wrong argument types are reported as
/// `TypeError`.
pub fn listener_info_from_args(arguments: &[JSValue]) -> Result<EventListenerInfo, JSError> {
    debug_assert!(
        arguments.len() == 2 || arguments.len() == 3,
        "listener registration takes 2 or 3 arguments, got {}",
        arguments.len()
    );
    let [id, name, rest @ ..] = arguments else {
        return Err(JSError::TypeError(format!(
            "expected (domId, eventName[, callback]), got {} argument(s)",
            arguments.len()
        )));
    };
    if rest.len() > 1 {
        return Err(JSError::TypeError(format!("expected at most 3 arguments, got {}", arguments.len())));
    }

    let dom_id = dom_id(id)?;
    let event_name = name
        .as_str()
        .ok_or_else(|| JSError::TypeError(format!("event name must be a string, got {}", name.type_name())))?;
    let mut info = EventListenerInfo::new(dom_id, event_name);
    if let Some(callback) = rest.first() {
        let JSValue::Function(function) = callback else {
            return Err(JSError::TypeError(format!("listener must be a function, got {}", callback.type_name())));
        };
        info = info.with_callback(event_callback(function.clone()));
    }
    Ok(info)
}

/// Numeric node id: a non-negative integer that fits in `u32`.
pub(crate) fn dom_id(value: &JSValue) -> Result<u32, JSError> {
    match value.as_f64() {
        Some(number) if number.fract() == 0.0 && (0.0..=f64::from(u32::MAX)).contains(&number) => {
            Ok(number as u32)
        }
        _ => Err(JSError::TypeError(format!("node id must be a non-negative integer, got {value:?}"))),
    }
}

/// Wrap a script function as a DOM listener. Errors thrown by the script are
/// logged and swallowed.
fn event_callback(function: JSFunction) -> dom::EventCallback {
    Arc::new(move |event: &DomEvent| {
        if let Err(err) = function.call(vec![event_to_js(event)]) {
            warn!("Listener for {} on node {} failed: {err}", event.name, event.target);
        }
    })
}
