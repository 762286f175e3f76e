// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Indented text rendering of a pipe tree.

use crate::graph::PipeGraph;
use crate::keys::TreeIndex;
use crate::tree::{PipeTree, TreeNode};

/// Renders the tree with box-drawing connectors, one node per line.
///
/// Children appear in their current order, so call this after
/// [`PipeTree::sort_children_by_load`] for a heaviest-first listing.
pub fn render_tree(tree: &PipeTree, graph: &PipeGraph) -> String {
    let mut out = String::new();
    let Some(root) = tree.root() else {
        return out;
    };

    out.push_str(&describe(root, graph));
    out.push('\n');

    // (index, prefix for this line, is last sibling)
    let mut stack: Vec<(TreeIndex, String, bool)> = Vec::new();
    push_children(&mut stack, root, "");

    while let Some((idx, prefix, last)) = stack.pop() {
        let Some(node) = tree.node(idx) else {
            continue;
        };
        let connector = if last { "└─ " } else { "├─ " };
        out.push_str(&prefix);
        out.push_str(connector);
        out.push_str(&describe(node, graph));
        out.push('\n');

        let child_prefix = format!("{prefix}{}", if last { "   " } else { "│  " });
        push_children(&mut stack, node, &child_prefix);
    }

    out
}

fn push_children(stack: &mut Vec<(TreeIndex, String, bool)>, node: &TreeNode, prefix: &str) {
    let count = node.children.len();
    for (i, &child) in node.children.iter().enumerate().rev() {
        stack.push((child, prefix.to_string(), i + 1 == count));
    }
}

fn describe(node: &TreeNode, graph: &PipeGraph) -> String {
    let label = match node.handle(graph) {
        Some(handle) => handle.to_string(),
        None => format!("node {}", node.node),
    };
    let load_kind = if node.is_demand_bearing() {
        "load"
    } else {
        "cumulative load"
    };
    format!(
        "{} {} [{}] depth {}, {} children, {} {:.2}",
        node.role.marker(),
        label,
        node.role.label(),
        node.depth,
        node.children.len(),
        load_kind,
        node.aggregated_load
    )
}
