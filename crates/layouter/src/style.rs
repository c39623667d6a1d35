//! Layout style vocabulary and its mapping onto the flex engine.
//!
//! The enums mirror the keywords the script layer sends in style maps;
//! `from_keyword` parses those keywords and the `to_*` helpers translate
//! into `taffy` style values.

use taffy::style as ts;
use taffy::{Dimension, LengthPercentage, LengthPercentageAuto, Rect};

/// Base writing direction used to resolve the horizontal flow.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Direction {
    /// Take the direction of the parent (or of the layout call for a root).
    #[default]
    Inherit,
    Ltr,
    Rtl,
}

impl Direction {
    pub fn from_keyword(keyword: &str) -> Option<Self> {
        match keyword {
            "inherit" => Some(Self::Inherit),
            "ltr" => Some(Self::Ltr),
            "rtl" => Some(Self::Rtl),
            _ => None,
        }
    }

    /// Resolve `Inherit` against the parent's resolved direction.
    pub fn resolve(self, parent: Self) -> Self {
        match self {
            Self::Inherit => match parent {
                Self::Inherit => Self::Ltr,
                resolved => resolved,
            },
            resolved => resolved,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FlexDirection {
    #[default]
    Row,
    RowReverse,
    Column,
    ColumnReverse,
}

impl FlexDirection {
    pub fn from_keyword(keyword: &str) -> Option<Self> {
        match keyword {
            "row" => Some(Self::Row),
            "row-reverse" => Some(Self::RowReverse),
            "column" => Some(Self::Column),
            "column-reverse" => Some(Self::ColumnReverse),
            _ => None,
        }
    }

    pub(crate) fn to_taffy(self) -> ts::FlexDirection {
        match self {
            Self::Row => ts::FlexDirection::Row,
            Self::RowReverse => ts::FlexDirection::RowReverse,
            Self::Column => ts::FlexDirection::Column,
            Self::ColumnReverse => ts::FlexDirection::ColumnReverse,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FlexWrap {
    #[default]
    NoWrap,
    Wrap,
    WrapReverse,
}

impl FlexWrap {
    pub fn from_keyword(keyword: &str) -> Option<Self> {
        match keyword {
            "nowrap" => Some(Self::NoWrap),
            "wrap" => Some(Self::Wrap),
            "wrap-reverse" => Some(Self::WrapReverse),
            _ => None,
        }
    }

    pub(crate) fn to_taffy(self) -> ts::FlexWrap {
        match self {
            Self::NoWrap => ts::FlexWrap::NoWrap,
            Self::Wrap => ts::FlexWrap::Wrap,
            Self::WrapReverse => ts::FlexWrap::WrapReverse,
        }
    }
}

/// Alignment keyword shared by justify-content, align-items, align-self and
/// align-content. Not every keyword is meaningful for every property; the
/// conversions return `None` (engine default) for the ones that are not.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FlexAlign {
    #[default]
    Auto,
    FlexStart,
    Center,
    FlexEnd,
    Stretch,
    Baseline,
    SpaceBetween,
    SpaceAround,
    SpaceEvenly,
}

impl FlexAlign {
    pub fn from_keyword(keyword: &str) -> Option<Self> {
        match keyword {
            "auto" => Some(Self::Auto),
            "flex-start" | "start" => Some(Self::FlexStart),
            "center" => Some(Self::Center),
            "flex-end" | "end" => Some(Self::FlexEnd),
            "stretch" => Some(Self::Stretch),
            "baseline" => Some(Self::Baseline),
            "space-between" => Some(Self::SpaceBetween),
            "space-around" => Some(Self::SpaceAround),
            "space-evenly" => Some(Self::SpaceEvenly),
            _ => None,
        }
    }

    pub(crate) fn to_justify_content(self) -> Option<ts::JustifyContent> {
        match self {
            Self::FlexStart => Some(ts::JustifyContent::FlexStart),
            Self::Center => Some(ts::JustifyContent::Center),
            Self::FlexEnd => Some(ts::JustifyContent::FlexEnd),
            Self::Stretch => Some(ts::JustifyContent::Stretch),
            Self::SpaceBetween => Some(ts::JustifyContent::SpaceBetween),
            Self::SpaceAround => Some(ts::JustifyContent::SpaceAround),
            Self::SpaceEvenly => Some(ts::JustifyContent::SpaceEvenly),
            Self::Auto | Self::Baseline => None,
        }
    }

    pub(crate) fn to_align_items(self) -> Option<ts::AlignItems> {
        match self {
            Self::FlexStart => Some(ts::AlignItems::FlexStart),
            Self::Center => Some(ts::AlignItems::Center),
            Self::FlexEnd => Some(ts::AlignItems::FlexEnd),
            Self::Stretch => Some(ts::AlignItems::Stretch),
            Self::Baseline => Some(ts::AlignItems::Baseline),
            Self::Auto | Self::SpaceBetween | Self::SpaceAround | Self::SpaceEvenly => None,
        }
    }

    pub(crate) fn to_align_content(self) -> Option<ts::AlignContent> {
        match self {
            Self::FlexStart => Some(ts::AlignContent::FlexStart),
            Self::Center => Some(ts::AlignContent::Center),
            Self::FlexEnd => Some(ts::AlignContent::FlexEnd),
            Self::Stretch => Some(ts::AlignContent::Stretch),
            Self::SpaceBetween => Some(ts::AlignContent::SpaceBetween),
            Self::SpaceAround => Some(ts::AlignContent::SpaceAround),
            Self::SpaceEvenly => Some(ts::AlignContent::SpaceEvenly),
            Self::Auto | Self::Baseline => None,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PositionType {
    #[default]
    Relative,
    Absolute,
}

impl PositionType {
    pub fn from_keyword(keyword: &str) -> Option<Self> {
        match keyword {
            "relative" => Some(Self::Relative),
            "absolute" => Some(Self::Absolute),
            _ => None,
        }
    }

    pub(crate) fn to_taffy(self) -> ts::Position {
        match self {
            Self::Relative => ts::Position::Relative,
            Self::Absolute => ts::Position::Absolute,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Display {
    #[default]
    Flex,
    None,
}

impl Display {
    pub fn from_keyword(keyword: &str) -> Option<Self> {
        match keyword {
            "flex" => Some(Self::Flex),
            "none" => Some(Self::None),
            _ => None,
        }
    }

    pub(crate) fn to_taffy(self) -> ts::Display {
        match self {
            Self::Flex => ts::Display::Flex,
            Self::None => ts::Display::None,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Overflow {
    #[default]
    Visible,
    Hidden,
    Scroll,
}

impl Overflow {
    pub fn from_keyword(keyword: &str) -> Option<Self> {
        match keyword {
            "visible" => Some(Self::Visible),
            "hidden" => Some(Self::Hidden),
            "scroll" => Some(Self::Scroll),
            _ => None,
        }
    }

    pub(crate) fn to_taffy(self) -> ts::Overflow {
        match self {
            Self::Visible => ts::Overflow::Visible,
            Self::Hidden => ts::Overflow::Hidden,
            Self::Scroll => ts::Overflow::Scroll,
        }
    }
}

/// Tag distinguishing plain boxes from measured text leaves.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum NodeType {
    #[default]
    Default,
    Text,
}

/// Box edge addressed by the margin/padding/border/position setters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Edge {
    Left,
    Top,
    Right,
    Bottom,
    Start,
    End,
    Horizontal,
    Vertical,
    All,
}

impl Edge {
    /// Write `value` into the physical edges of `rect` this edge covers.
    /// `Start`/`End` depend on the direction and are kept in [`LogicalEdges`].
    pub(crate) fn assign<T: Copy>(self, rect: &mut Rect<T>, value: T) {
        match self {
            Self::Left => rect.left = value,
            Self::Top => rect.top = value,
            Self::Right => rect.right = value,
            Self::Bottom => rect.bottom = value,
            Self::Horizontal => {
                rect.left = value;
                rect.right = value;
            }
            Self::Vertical => {
                rect.top = value;
                rect.bottom = value;
            }
            Self::All => {
                rect.left = value;
                rect.top = value;
                rect.right = value;
                rect.bottom = value;
            }
            Self::Start | Self::End => {}
        }
    }

    /// The physical side a `Start`/`End` edge lands on under `direction`.
    pub fn physical(self, direction: Direction) -> Self {
        match (self, direction) {
            (Self::Start, Direction::Rtl) => Self::Right,
            (Self::Start, _) => Self::Left,
            (Self::End, Direction::Rtl) => Self::Left,
            (Self::End, _) => Self::Right,
            (edge, _) => edge,
        }
    }
}

/// `start`/`end` values of one box property. They override the physical
/// side they resolve to.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct LogicalEdges<T> {
    pub(crate) start: Option<T>,
    pub(crate) end: Option<T>,
}

impl<T> Default for LogicalEdges<T> {
    fn default() -> Self {
        Self { start: None, end: None }
    }
}

impl<T: Copy> LogicalEdges<T> {
    /// Route a setter call: physical edges go to `rect`, `Start`/`End` are
    /// recorded here. `value` of `None` clears a logical side and writes
    /// `unset` to physical ones.
    pub(crate) fn set(&mut self, rect: &mut Rect<T>, edge: Edge, value: Option<T>, unset: T) {
        match edge {
            Edge::Start => self.start = value,
            Edge::End => self.end = value,
            physical => physical.assign(rect, value.unwrap_or(unset)),
        }
    }

    /// Overwrite the physical sides of `rect` the logical values land on.
    pub(crate) fn resolve_into(&self, rect: &mut Rect<T>, direction: Direction) {
        let (start, end) = match direction {
            Direction::Rtl => (&mut rect.right, &mut rect.left),
            _ => (&mut rect.left, &mut rect.right),
        };
        if let Some(value) = self.start {
            *start = value;
        }
        if let Some(value) = self.end {
            *end = value;
        }
    }
}

/// Direction-relative edges of a node, kept beside its physical style.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub(crate) struct LogicalStyle {
    pub(crate) margin: LogicalEdges<LengthPercentageAuto>,
    pub(crate) padding: LogicalEdges<LengthPercentage>,
    pub(crate) border: LogicalEdges<LengthPercentage>,
    pub(crate) inset: LogicalEdges<LengthPercentageAuto>,
}

/// Exchange the left and right values of `rect`.
pub(crate) fn swap_sides<T>(rect: &mut Rect<T>) {
    std::mem::swap(&mut rect.left, &mut rect.right);
}

/// NaN means "unset" throughout the setter API.
pub(crate) fn dimension(value: f32) -> Dimension {
    if value.is_nan() { Dimension::Auto } else { Dimension::Length(value) }
}

pub(crate) fn length_auto(value: f32) -> LengthPercentageAuto {
    if value.is_nan() {
        LengthPercentageAuto::Auto
    } else {
        LengthPercentageAuto::Length(value)
    }
}

pub(crate) fn length(value: f32) -> LengthPercentage {
    LengthPercentage::Length(if value.is_nan() { 0.0 } else { value })
}

/// Points value of a margin, treating `auto` and percentages as zero.
pub(crate) fn fixed_margin(value: LengthPercentageAuto) -> f32 {
    match value {
        LengthPercentageAuto::Length(points) => points,
        LengthPercentageAuto::Percent(_) | LengthPercentageAuto::Auto => 0.0,
    }
}
