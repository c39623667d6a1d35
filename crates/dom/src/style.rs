//! Mapping from script-side style keys onto [`LayoutNode`] setters.
//!
//! Keys are the camelCase names the script layer sends. Keys without a
//! layout meaning (colors, opacity, ...) are left for the renderer and ignored
//! here.

use layouter::{
    Direction, Display, Edge, FlexAlign, FlexDirection, FlexWrap, LayoutNode, Overflow, PositionType,
};
use log::warn;

use crate::value::{DomValue, PropertyMap};

/// Apply every layout-relevant entry of `style`.
pub fn apply_layout_style(layout: &LayoutNode, style: &PropertyMap) {
    for (key, value) in style {
        apply_layout_property(layout, key, Some(value));
    }
}

/// Apply one style entry. `None` (or a `null` value) restores the default.
/// Returns whether the key is a layout property.
pub fn apply_layout_property(layout: &LayoutNode, key: &str, value: Option<&DomValue>) -> bool {
    let value = value.filter(|value| !value.is_null());
    let points = value.map_or(f32::NAN, points);

    match key {
        "width" => layout.set_width(points),
        "height" => layout.set_height(points),
        "minWidth" => layout.set_min_width(points),
        "minHeight" => layout.set_min_height(points),
        "maxWidth" => layout.set_max_width(points),
        "maxHeight" => layout.set_max_height(points),
        "flex" => match value {
            Some(_) => layout.set_flex(points),
            None => {
                layout.set_flex_grow(0.0);
                layout.set_flex_shrink(1.0);
                layout.set_flex_basis(f32::NAN);
            }
        },
        "flexGrow" => layout.set_flex_grow(or_default(points, 0.0)),
        "flexShrink" => layout.set_flex_shrink(or_default(points, 1.0)),
        "flexBasis" => layout.set_flex_basis(points),
        "flexDirection" => layout.set_flex_direction(keyword(key, value, FlexDirection::from_keyword)),
        "flexWrap" => layout.set_flex_wrap(keyword(key, value, FlexWrap::from_keyword)),
        "justifyContent" => layout.set_justify_content(keyword(key, value, FlexAlign::from_keyword)),
        "alignItems" => layout.set_align_items(keyword(key, value, FlexAlign::from_keyword)),
        "alignSelf" => layout.set_align_self(keyword(key, value, FlexAlign::from_keyword)),
        "alignContent" => layout.set_align_content(keyword(key, value, FlexAlign::from_keyword)),
        "position" => layout.set_position_type(keyword(key, value, PositionType::from_keyword)),
        "display" => layout.set_display(keyword(key, value, Display::from_keyword)),
        "overflow" => layout.set_overflow(keyword(key, value, Overflow::from_keyword)),
        "direction" => layout.set_direction(keyword(key, value, Direction::from_keyword)),
        _ => {
            if let Some(edge) = edge_key(key, "") {
                layout.set_position(edge, points);
            } else if let Some(edge) = edge_key(key, "margin") {
                if value.and_then(DomValue::as_str) == Some("auto") {
                    layout.set_margin_auto(edge);
                } else {
                    layout.set_margin(edge, points);
                }
            } else if let Some(edge) = edge_key(key, "padding") {
                layout.set_padding(edge, points);
            } else if let Some(edge) = border_key(key) {
                layout.set_border(edge, points);
            } else {
                return false;
            }
        }
    }
    true
}

/// Numeric style value in points; `"auto"` and non-numeric strings are NaN.
fn points(value: &DomValue) -> f32 {
    match value {
        DomValue::Number(number) => *number as f32,
        DomValue::String(text) => text.trim().trim_end_matches("px").parse().unwrap_or(f32::NAN),
        _ => f32::NAN,
    }
}

fn or_default(points: f32, default: f32) -> f32 {
    if points.is_nan() { default } else { points }
}

fn keyword<T: Default>(key: &str, value: Option<&DomValue>, parse: fn(&str) -> Option<T>) -> T {
    let Some(value) = value else { return T::default() };
    match value.as_str().and_then(parse) {
        Some(parsed) => parsed,
        None => {
            warn!("Ignoring unsupported value {value:?} for style {key}");
            T::default()
        }
    }
}

/// Match `prefix`, `prefixLeft`, ... and the bare inset keys (`left`, ...)
/// when `prefix` is empty.
fn edge_key(key: &str, prefix: &str) -> Option<Edge> {
    if prefix.is_empty() {
        return match key {
            "left" => Some(Edge::Left),
            "top" => Some(Edge::Top),
            "right" => Some(Edge::Right),
            "bottom" => Some(Edge::Bottom),
            "start" => Some(Edge::Start),
            "end" => Some(Edge::End),
            _ => None,
        };
    }
    edge_suffix(key.strip_prefix(prefix)?)
}

fn border_key(key: &str) -> Option<Edge> {
    edge_suffix(key.strip_prefix("border")?.strip_suffix("Width")?)
}

fn edge_suffix(suffix: &str) -> Option<Edge> {
    match suffix {
        "" => Some(Edge::All),
        "Left" => Some(Edge::Left),
        "Top" => Some(Edge::Top),
        "Right" => Some(Edge::Right),
        "Bottom" => Some(Edge::Bottom),
        "Start" => Some(Edge::Start),
        "End" => Some(Edge::End),
        "Horizontal" => Some(Edge::Horizontal),
        "Vertical" => Some(Edge::Vertical),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn edge_keys_parse() {
        assert_eq!(edge_key("marginHorizontal", "margin"), Some(Edge::Horizontal));
        assert_eq!(edge_key("padding", "padding"), Some(Edge::All));
        assert_eq!(edge_key("paddingColor", "padding"), None);
        assert_eq!(border_key("borderTopWidth"), Some(Edge::Top));
        assert_eq!(border_key("borderWidth"), Some(Edge::All));
        assert_eq!(border_key("borderColor"), None);
        assert_eq!(edge_key("top", ""), Some(Edge::Top));
    }

    #[test]
    fn points_accept_numbers_and_pixel_strings() {
        assert_eq!(points(&DomValue::Number(12.0)), 12.0);
        assert_eq!(points(&DomValue::from("8px")), 8.0);
        assert!(points(&DomValue::from("auto")).is_nan());
        assert!(points(&DomValue::Bool(true)).is_nan());
    }
}
