//! Geometry produced by a layout pass.

use crate::style::{Direction, Edge};

/// Resolved per-edge values of a box (margin, padding or border).
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Edges {
    pub left: f32,
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
}

impl Edges {
    pub(crate) fn from_rect(rect: taffy::Rect<f32>) -> Self {
        Self {
            left: rect.left,
            top: rect.top,
            right: rect.right,
            bottom: rect.bottom,
        }
    }

    /// The same edges seen from the other horizontal side.
    pub(crate) fn mirrored(self) -> Self {
        Self { left: self.right, right: self.left, ..self }
    }

    /// Value for a single edge.
    ///
    /// `Start`/`End` resolve to a physical side under `direction`. The
    /// compound edges return the total along their axis (`All` sums all four).
    pub fn get(&self, edge: Edge, direction: Direction) -> f32 {
        match edge.physical(direction) {
            Edge::Left => self.left,
            Edge::Top => self.top,
            Edge::Right => self.right,
            Edge::Bottom => self.bottom,
            Edge::Horizontal => self.left + self.right,
            Edge::Vertical => self.top + self.bottom,
            Edge::All => self.left + self.top + self.right + self.bottom,
            Edge::Start | Edge::End => 0.0,
        }
    }
}

/// A width/height pair, also returned by measurement callbacks.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct LayoutSize {
    pub width: f32,
    pub height: f32,
}

impl LayoutSize {
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}

/// The resolved box of a node after a layout pass, relative to its parent.
///
/// `right` and `bottom` are offsets from the parent's trailing edges, so
/// `left + width + right` equals the parent width.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct LayoutResult {
    pub left: f32,
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
    pub width: f32,
    pub height: f32,
    pub margin: Edges,
    pub padding: Edges,
    pub border: Edges,
    pub had_overflow: bool,
    pub direction: Direction,
}
