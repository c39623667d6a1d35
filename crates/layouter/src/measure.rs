//! Measurement callbacks for leaves whose size comes from content (text,
//! images) rather than from style.

use taffy::{AvailableSpace, Size};

use crate::geometry::LayoutSize;

/// How a measured axis is constrained.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MeasureMode {
    /// No constraint; the paired value is NaN.
    Undefined,
    /// The axis must be exactly the paired value.
    Exactly,
    /// The axis may be at most the paired value.
    AtMost,
}

/// Constraints handed to a measurement callback.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MeasureInput {
    pub width: f32,
    pub width_mode: MeasureMode,
    pub height: f32,
    pub height_mode: MeasureMode,
}

impl MeasureInput {
    pub(crate) fn from_taffy(known: Size<Option<f32>>, available: Size<AvailableSpace>) -> Self {
        let (width, width_mode) = axis(known.width, available.width);
        let (height, height_mode) = axis(known.height, available.height);
        Self { width, width_mode, height, height_mode }
    }
}

fn axis(known: Option<f32>, available: AvailableSpace) -> (f32, MeasureMode) {
    match (known, available) {
        (Some(points), _) => (points, MeasureMode::Exactly),
        (None, AvailableSpace::Definite(points)) => (points, MeasureMode::AtMost),
        (None, AvailableSpace::MinContent | AvailableSpace::MaxContent) => {
            (f32::NAN, MeasureMode::Undefined)
        }
    }
}

/// Callback computing the content size of a leaf under the given constraints.
pub type MeasureFunction = Box<dyn FnMut(MeasureInput) -> LayoutSize + Send>;
