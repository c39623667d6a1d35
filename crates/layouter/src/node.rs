use std::fmt;

use anyhow::{Result, anyhow};
use log::{trace, warn};
use taffy::{
    AvailableSpace, Dimension, LengthPercentage, LengthPercentageAuto, NodeId, Point, Size, Style,
    TaffyTree, TraversePartialTree,
};

use crate::geometry::{Edges, LayoutResult, LayoutSize};
use crate::measure::{MeasureFunction, MeasureInput};
use crate::style::{
    self, Direction, Display, Edge, FlexAlign, FlexDirection, FlexWrap, LogicalStyle, NodeType,
    Overflow, PositionType,
};
use crate::{LayoutEngine, NodeContext};

/// Rounding slack when comparing content extents against the node box.
const OVERFLOW_EPSILON: f32 = 0.01;

/// A single flexbox node.
///
/// The node owns its engine handle: dropping it (or calling
/// [`deallocate`](Self::deallocate)) removes the engine node exactly once.
/// Children are linked by handle; the engine keeps the non-owning parent
/// back-reference.
pub struct LayoutNode {
    engine: LayoutEngine,
    handle: Option<NodeId>,
}

impl LayoutNode {
    /// Allocate a fresh, dirty leaf in `engine`.
    pub fn new(engine: &LayoutEngine) -> Result<Self> {
        let handle = engine
            .lock()
            .new_leaf_with_context(Style::default(), NodeContext::fresh())?;
        Ok(Self { engine: engine.clone(), handle: Some(handle) })
    }

    pub fn engine(&self) -> &LayoutEngine {
        &self.engine
    }

    /// Whether the engine handle is still held.
    pub fn is_allocated(&self) -> bool {
        self.handle.is_some()
    }

    pub fn set_direction(&self, direction: Direction) {
        self.update_context(|context| {
            let changed = context.direction != direction;
            context.direction = direction;
            changed
        });
    }

    pub fn set_width(&self, width: f32) {
        self.update_style(|s, _| s.size.width = style::dimension(width));
    }

    pub fn set_height(&self, height: f32) {
        self.update_style(|s, _| s.size.height = style::dimension(height));
    }

    /// Install a measurement callback. Fails on nodes that already have
    /// children: measured nodes are leaves.
    pub fn set_measure_function(&self, measure: MeasureFunction) -> bool {
        let Some(handle) = self.handle else { return false };
        let mut tree = self.engine.lock();
        if tree.child_count(handle) > 0 {
            warn!("Refusing measure function on layout node {handle:?} with children");
            return false;
        }
        let Some(context) = tree.get_node_context_mut(handle) else { return false };
        context.measure = Some(measure);
        mark_dirty_upwards(&mut tree, handle);
        if let Err(err) = tree.mark_dirty(handle) {
            warn!("mark_dirty failed: {err}");
        }
        true
    }

    /// `flex` shorthand: a positive value grows (from a zero basis when the
    /// basis is auto) and never shrinks, a negative value only shrinks.
    pub fn set_flex(&self, flex: f32) {
        self.update_style(|s, _| {
            if flex > 0.0 {
                s.flex_grow = flex;
                s.flex_shrink = 0.0;
                if s.flex_basis == Dimension::Auto {
                    s.flex_basis = Dimension::Length(0.0);
                }
            } else if flex < 0.0 {
                s.flex_grow = 0.0;
                s.flex_shrink = -flex;
            } else {
                s.flex_grow = 0.0;
                s.flex_shrink = 0.0;
            }
        });
    }

    pub fn set_flex_grow(&self, flex_grow: f32) {
        self.update_style(|s, _| s.flex_grow = flex_grow);
    }

    pub fn set_flex_shrink(&self, flex_shrink: f32) {
        self.update_style(|s, _| s.flex_shrink = flex_shrink);
    }

    /// NaN resets the basis to `auto`.
    pub fn set_flex_basis(&self, flex_basis: f32) {
        self.update_style(|s, _| s.flex_basis = style::dimension(flex_basis));
    }

    pub fn set_flex_direction(&self, flex_direction: FlexDirection) {
        self.update_style(|s, _| s.flex_direction = flex_direction.to_taffy());
    }

    pub fn set_position_type(&self, position_type: PositionType) {
        self.update_style(|s, _| s.position = position_type.to_taffy());
    }

    /// Inset for the given edge; NaN clears it.
    pub fn set_position(&self, edge: Edge, position: f32) {
        let value = (!position.is_nan()).then_some(LengthPercentageAuto::Length(position));
        self.update_style(|s, logical| {
            logical.inset.set(&mut s.inset, edge, value, LengthPercentageAuto::Auto);
        });
    }

    pub fn set_margin(&self, edge: Edge, margin: f32) {
        let value = (!margin.is_nan()).then_some(LengthPercentageAuto::Length(margin));
        self.update_style(|s, logical| {
            logical.margin.set(&mut s.margin, edge, value, LengthPercentageAuto::Length(0.0));
        });
    }

    pub fn set_margin_auto(&self, edge: Edge) {
        self.update_style(|s, logical| {
            logical
                .margin
                .set(&mut s.margin, edge, Some(LengthPercentageAuto::Auto), LengthPercentageAuto::Auto);
        });
    }

    pub fn set_padding(&self, edge: Edge, padding: f32) {
        let value = (!padding.is_nan()).then_some(LengthPercentage::Length(padding));
        self.update_style(|s, logical| {
            logical.padding.set(&mut s.padding, edge, value, style::length(padding));
        });
    }

    pub fn set_border(&self, edge: Edge, border: f32) {
        let value = (!border.is_nan()).then_some(LengthPercentage::Length(border));
        self.update_style(|s, logical| {
            logical.border.set(&mut s.border, edge, value, style::length(border));
        });
    }

    pub fn set_flex_wrap(&self, wrap: FlexWrap) {
        self.update_style(|s, _| s.flex_wrap = wrap.to_taffy());
    }

    pub fn set_justify_content(&self, justify: FlexAlign) {
        self.update_style(|s, _| s.justify_content = justify.to_justify_content());
    }

    pub fn set_align_content(&self, align_content: FlexAlign) {
        self.update_style(|s, _| s.align_content = align_content.to_align_content());
    }

    pub fn set_align_items(&self, align_items: FlexAlign) {
        self.update_style(|s, _| s.align_items = align_items.to_align_items());
    }

    pub fn set_align_self(&self, align_self: FlexAlign) {
        self.update_style(|s, _| s.align_self = align_self.to_align_items());
    }

    pub fn set_display(&self, display: Display) {
        self.update_style(|s, _| s.display = display.to_taffy());
    }

    pub fn set_max_width(&self, max_width: f32) {
        self.update_style(|s, _| s.max_size.width = style::dimension(max_width));
    }

    pub fn set_max_height(&self, max_height: f32) {
        self.update_style(|s, _| s.max_size.height = style::dimension(max_height));
    }

    pub fn set_min_width(&self, min_width: f32) {
        self.update_style(|s, _| s.min_size.width = style::dimension(min_width));
    }

    pub fn set_min_height(&self, min_height: f32) {
        self.update_style(|s, _| s.min_size.height = style::dimension(min_height));
    }

    pub fn set_node_type(&self, node_type: NodeType) {
        self.update_context(|context| {
            let changed = context.node_type != node_type;
            context.node_type = node_type;
            changed
        });
    }

    pub fn set_overflow(&self, overflow: Overflow) {
        let value = overflow.to_taffy();
        self.update_style(|s, _| s.overflow = Point { x: value, y: value });
    }

    pub fn node_type(&self) -> NodeType {
        self.read_context(|context| context.node_type).unwrap_or_default()
    }

    /// Geometry from the last layout pass covering this node.
    pub fn layout_result(&self) -> LayoutResult {
        self.read_context(|context| context.result).unwrap_or_default()
    }

    pub fn left(&self) -> f32 {
        self.layout_result().left
    }

    pub fn top(&self) -> f32 {
        self.layout_result().top
    }

    pub fn right(&self) -> f32 {
        self.layout_result().right
    }

    pub fn bottom(&self) -> f32 {
        self.layout_result().bottom
    }

    pub fn width(&self) -> f32 {
        self.layout_result().width
    }

    pub fn height(&self) -> f32 {
        self.layout_result().height
    }

    /// Resolved margin on `edge`; `Start`/`End` follow the node's direction.
    pub fn margin(&self, edge: Edge) -> f32 {
        let result = self.layout_result();
        result.margin.get(edge, result.direction)
    }

    pub fn padding(&self, edge: Edge) -> f32 {
        let result = self.layout_result();
        result.padding.get(edge, result.direction)
    }

    pub fn border(&self, edge: Edge) -> f32 {
        let result = self.layout_result();
        result.border.get(edge, result.direction)
    }

    /// Whether the last pass left content extending past this node's box.
    pub fn had_overflow(&self) -> bool {
        self.layout_result().had_overflow
    }

    pub fn child_count(&self) -> usize {
        self.handle.map_or(0, |handle| self.engine.lock().child_count(handle))
    }

    /// Link `child` at `index`. `index == child_count()` appends; a larger
    /// index, a child that already has a parent, a measured parent or a
    /// child from another engine all fail without touching the tree.
    pub fn insert_child(&self, child: &LayoutNode, index: usize) -> bool {
        let (Some(parent), Some(child_handle)) = (self.handle, child.handle) else {
            return false;
        };
        if !self.engine.same_engine(&child.engine) {
            warn!("Cannot link layout nodes from different engines");
            return false;
        }
        let mut tree = self.engine.lock();
        if index > tree.child_count(parent) {
            trace!("insert_child index {index} out of range for {parent:?}");
            return false;
        }
        if tree.parent(child_handle).is_some() {
            trace!("insert_child: {child_handle:?} is already attached");
            return false;
        }
        let measured = tree
            .get_node_context(parent)
            .is_some_and(|context| context.measure.is_some());
        if measured {
            warn!("Cannot add a child to measured layout node {parent:?}");
            return false;
        }
        match tree.insert_child_at_index(parent, index, child_handle) {
            Ok(()) => {
                mark_dirty_upwards(&mut tree, parent);
                true
            }
            Err(err) => {
                warn!("insert_child failed: {err}");
                false
            }
        }
    }

    /// Unlink `child`. Fails and leaves the children untouched when `child`
    /// is not one of them.
    pub fn remove_child(&self, child: &LayoutNode) -> bool {
        let (Some(parent), Some(child_handle)) = (self.handle, child.handle) else {
            return false;
        };
        if !self.engine.same_engine(&child.engine) {
            return false;
        }
        let mut tree = self.engine.lock();
        if tree.parent(child_handle) != Some(parent) {
            return false;
        }
        match tree.remove_child(parent, child_handle) {
            Ok(_) => {
                mark_dirty_upwards(&mut tree, parent);
                true
            }
            Err(err) => {
                warn!("remove_child failed: {err}");
                false
            }
        }
    }

    pub fn has_new_layout(&self) -> bool {
        self.read_context(|context| context.has_new_layout).unwrap_or(false)
    }

    pub fn set_has_new_layout(&self, has_new_layout: bool) {
        let Some(handle) = self.handle else { return };
        if let Some(context) = self.engine.lock().get_node_context_mut(handle) {
            context.has_new_layout = has_new_layout;
        }
    }

    /// Force this node and its ancestors to be recomputed.
    pub fn mark_dirty(&self) {
        let Some(handle) = self.handle else { return };
        let mut tree = self.engine.lock();
        mark_dirty_upwards(&mut tree, handle);
        if let Err(err) = tree.mark_dirty(handle) {
            warn!("mark_dirty failed: {err}");
        }
    }

    pub fn is_dirty(&self) -> bool {
        self.read_context(|context| context.dirty).unwrap_or(true)
    }

    /// Lay out the subtree rooted here inside a `parent_width` x
    /// `parent_height` box (NaN leaves an axis unconstrained).
    ///
    /// A root without an explicit width or height fills the parent box minus
    /// its own margins on that axis. Right-to-left subtrees are laid out
    /// left-to-right with their horizontal edges swapped, then mirrored back.
    /// Every covered node gets a fresh [`LayoutResult`], a cleared dirty flag,
    /// and `has_new_layout` set iff its result differs from the previous pass.
    pub fn do_layout(&self, parent_width: f32, parent_height: f32, direction: Direction) -> Result<()> {
        let root = self
            .handle
            .ok_or_else(|| anyhow!("layout requested on a deallocated node"))?;
        let _span = tracing::debug_span!("do_layout", ?root, parent_width, parent_height).entered();
        let mut tree = self.engine.lock();
        apply_engine_styles(&mut tree, root, LayoutSize::new(parent_width, parent_height), direction)?;

        let available = Size {
            width: available_space(parent_width),
            height: available_space(parent_height),
        };
        tree.compute_layout_with_measure(
            root,
            available,
            |known, space, _node, context: Option<&mut NodeContext>, _style| {
                match context.and_then(|context| context.measure.as_mut()) {
                    Some(measure) => {
                        let measured = measure(MeasureInput::from_taffy(known, space));
                        Size {
                            width: known.width.unwrap_or(measured.width),
                            height: known.height.unwrap_or(measured.height),
                        }
                    }
                    None => Size {
                        width: known.width.unwrap_or(0.0),
                        height: known.height.unwrap_or(0.0),
                    },
                }
            },
        )?;

        let parent = LayoutSize::new(parent_width, parent_height);
        let updated = publish_results(&mut tree, root, parent, direction)?;
        trace!("Layout pass from {root:?} updated {updated} node(s)");
        Ok(())
    }

    /// Drop computed geometry and mark the node dirty, keeping its style.
    /// Returns false once the node has been deallocated.
    pub fn reset(&self) -> bool {
        let Some(handle) = self.handle else { return false };
        let mut tree = self.engine.lock();
        if let Some(context) = tree.get_node_context_mut(handle) {
            context.result = LayoutResult::default();
            context.computed = false;
            context.has_new_layout = false;
        }
        mark_dirty_upwards(&mut tree, handle);
        if let Err(err) = tree.mark_dirty(handle) {
            warn!("reset failed to dirty {handle:?}: {err}");
        }
        true
    }

    /// Release the engine node. Safe to call repeatedly; `Drop` calls it too.
    pub fn deallocate(&mut self) {
        let Some(handle) = self.handle.take() else { return };
        let mut tree = self.engine.lock();
        if let Some(parent) = tree.parent(handle) {
            mark_dirty_upwards(&mut tree, parent);
        }
        if let Err(err) = tree.remove(handle) {
            warn!("Failed to release layout node {handle:?}: {err}");
        }
    }

    pub(crate) fn handle(&self) -> Option<NodeId> {
        self.handle
    }

    fn update_style(&self, apply: impl FnOnce(&mut Style, &mut LogicalStyle)) {
        let Some(handle) = self.handle else {
            warn!("Style update on a deallocated layout node");
            return;
        };
        let mut tree = self.engine.lock();
        let Some(context) = tree.get_node_context_mut(handle) else { return };
        let mut next = context.style.clone();
        let mut logical = context.logical;
        apply(&mut next, &mut logical);
        if next == context.style && logical == context.logical {
            return;
        }
        context.style = next;
        context.logical = logical;
        mark_dirty_upwards(&mut tree, handle);
    }

    fn update_context(&self, apply: impl FnOnce(&mut NodeContext) -> bool) {
        let Some(handle) = self.handle else { return };
        let mut tree = self.engine.lock();
        let changed = tree.get_node_context_mut(handle).is_some_and(apply);
        if changed {
            mark_dirty_upwards(&mut tree, handle);
            if let Err(err) = tree.mark_dirty(handle) {
                warn!("mark_dirty failed: {err}");
            }
        }
    }

    fn read_context<T>(&self, read: impl FnOnce(&NodeContext) -> T) -> Option<T> {
        let handle = self.handle?;
        self.engine.lock().get_node_context(handle).map(read)
    }
}

impl Drop for LayoutNode {
    fn drop(&mut self) {
        self.deallocate();
    }
}

impl fmt::Debug for LayoutNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LayoutNode").field("handle", &self.handle).finish_non_exhaustive()
    }
}

fn available_space(points: f32) -> AvailableSpace {
    if points.is_finite() {
        AvailableSpace::Definite(points)
    } else {
        AvailableSpace::MaxContent
    }
}

fn mark_dirty_upwards(tree: &mut TaffyTree<NodeContext>, node: NodeId) {
    let mut current = Some(node);
    while let Some(id) = current {
        if let Some(context) = tree.get_node_context_mut(id) {
            context.dirty = true;
        }
        current = tree.parent(id);
    }
}

/// Derive the engine style of every node under `root` from its own style.
///
/// `Start`/`End` edges resolve against the node's direction. Margins and
/// insets are swapped left to right when the containing flow is
/// right-to-left, padding and border when the node's own flow is. The root
/// additionally takes its auto sizes from `root_parent`. Styles are only
/// written back when they changed, so clean subtrees keep their cache.
fn apply_engine_styles(
    tree: &mut TaffyTree<NodeContext>,
    root: NodeId,
    root_parent: LayoutSize,
    base_direction: Direction,
) -> Result<()> {
    let mut stack = vec![(root, base_direction.resolve(Direction::Ltr))];
    while let Some((node, containing)) = stack.pop() {
        let Some(context) = tree.get_node_context(node) else { continue };
        let direction = context.direction.resolve(containing);
        let logical = context.logical;
        let mut resolved = context.style.clone();

        logical.margin.resolve_into(&mut resolved.margin, direction);
        logical.inset.resolve_into(&mut resolved.inset, direction);
        logical.padding.resolve_into(&mut resolved.padding, direction);
        logical.border.resolve_into(&mut resolved.border, direction);
        if containing == Direction::Rtl {
            style::swap_sides(&mut resolved.margin);
            style::swap_sides(&mut resolved.inset);
        }
        if direction == Direction::Rtl {
            style::swap_sides(&mut resolved.padding);
            style::swap_sides(&mut resolved.border);
        }

        if node == root {
            if resolved.size.width == Dimension::Auto && root_parent.width.is_finite() {
                let margins = style::fixed_margin(resolved.margin.left) + style::fixed_margin(resolved.margin.right);
                resolved.size.width = Dimension::Length((root_parent.width - margins).max(0.0));
            }
            if resolved.size.height == Dimension::Auto && root_parent.height.is_finite() {
                let margins = style::fixed_margin(resolved.margin.top) + style::fixed_margin(resolved.margin.bottom);
                resolved.size.height = Dimension::Length((root_parent.height - margins).max(0.0));
            }
        }

        if *tree.style(node)? != resolved {
            tree.set_style(node, resolved)?;
        }
        for child in tree.children(node)? {
            stack.push((child, direction));
        }
    }
    Ok(())
}

/// Copy engine output into each node's context, mirroring horizontal
/// positions and edges under right-to-left flow. Returns how many nodes
/// changed.
fn publish_results(
    tree: &mut TaffyTree<NodeContext>,
    root: NodeId,
    root_parent: LayoutSize,
    base_direction: Direction,
) -> Result<usize> {
    let mut changed = 0;
    let mut stack = vec![(root, root_parent, base_direction.resolve(Direction::Ltr))];
    while let Some((node, parent, parent_direction)) = stack.pop() {
        let layout = *tree.layout(node)?;
        let own_direction = tree
            .get_node_context(node)
            .map_or(Direction::Inherit, |context| context.direction);
        let direction = own_direction.resolve(parent_direction);

        let width = layout.size.width;
        let height = layout.size.height;
        let left = match parent_direction {
            Direction::Rtl if parent.width.is_finite() => parent.width - layout.location.x - width,
            _ => layout.location.x,
        };
        let top = layout.location.y;
        let mut margin = Edges::from_rect(layout.margin);
        if parent_direction == Direction::Rtl {
            margin = margin.mirrored();
        }
        let mut padding = Edges::from_rect(layout.padding);
        let mut border = Edges::from_rect(layout.border);
        if direction == Direction::Rtl {
            padding = padding.mirrored();
            border = border.mirrored();
        }
        let result = LayoutResult {
            left,
            top,
            right: trailing(parent.width, left, width),
            bottom: trailing(parent.height, top, height),
            width,
            height,
            margin,
            padding,
            border,
            had_overflow: layout.content_size.width > width + OVERFLOW_EPSILON
                || layout.content_size.height > height + OVERFLOW_EPSILON,
            direction,
        };

        if let Some(context) = tree.get_node_context_mut(node) {
            context.has_new_layout = !context.computed || context.result != result;
            if context.has_new_layout {
                changed += 1;
            }
            context.result = result;
            context.computed = true;
            context.dirty = false;
        }

        let size = LayoutSize::new(width, height);
        for child in tree.children(node)? {
            stack.push((child, size, direction));
        }
    }
    Ok(changed)
}

fn trailing(parent_extent: f32, leading: f32, extent: f32) -> f32 {
    if parent_extent.is_finite() { parent_extent - leading - extent } else { 0.0 }
}
