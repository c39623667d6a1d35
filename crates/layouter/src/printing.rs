use std::fmt::{self, Write as _};

use log::debug;
use taffy::{NodeId, TaffyTree};

use crate::{LayoutNode, NodeContext};

impl LayoutNode {
    /// Render the subtree rooted here, one node per line, indented by depth.
    pub fn dump(&self) -> String {
        let mut out = String::new();
        let Some(handle) = self.handle() else {
            out.push_str("<deallocated>\n");
            return out;
        };
        let tree = self.engine().lock();
        if write_node(&tree, handle, &mut out, 0).is_err() {
            out.push_str("<format error>\n");
        }
        out
    }

    /// Log the subtree dump at debug level.
    pub fn print(&self) {
        debug!("LAYOUT\n{}", self.dump());
    }
}

fn write_indent(out: &mut String, depth: usize) -> fmt::Result {
    for _ in 0..depth {
        out.write_str("  ")?;
    }
    Ok(())
}

fn write_node(tree: &TaffyTree<NodeContext>, node: NodeId, out: &mut String, depth: usize) -> fmt::Result {
    write_indent(out, depth)?;
    match tree.get_node_context(node) {
        Some(context) => {
            let r = context.result;
            write!(
                out,
                "<node left={} top={} width={} height={}",
                r.left, r.top, r.width, r.height
            )?;
            if context.measure.is_some() {
                out.write_str(" measured")?;
            }
            if context.dirty {
                out.write_str(" dirty")?;
            }
            if r.had_overflow {
                out.write_str(" overflow")?;
            }
        }
        None => out.write_str("<node")?,
    }
    let children = tree.children(node).unwrap_or_default();
    if children.is_empty() {
        return out.write_str(" />\n");
    }
    out.write_str(">\n")?;
    for child in children {
        write_node(tree, child, out, depth + 1)?;
    }
    write_indent(out, depth)?;
    out.write_str("</node>\n")
}
