//! Tree flattening and text outline rendering
//!
//! Both the text outline and the terminal viewer draw the AST as a list of
//! rows, one per visible node, in depth-first order. Each row carries the
//! guide string (`│   `, `├── `, `└── `) that connects it to its ancestors.

use crate::parser::ast::{Node, NodeType};
use rustc_hash::FxHashSet;

/// Child indices leading from the root to a node. The root is `[]`.
pub type NodePath = Vec<usize>;

/// One visible line of a rendered tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeRow {
    pub path: NodePath,
    pub depth: usize,
    pub guide: String,
    pub label: String,
    pub node_type: NodeType,
    pub has_children: bool,
    pub collapsed: bool,
}

/// Flatten `root` into rows. Descendants of any path in `collapsed` are
/// skipped, the collapsed node itself is still listed.
pub fn flatten(root: &Node, collapsed: &FxHashSet<NodePath>) -> Vec<TreeRow> {
    let mut rows = Vec::with_capacity(root.size());
    let mut path = Vec::new();
    flatten_into(root, collapsed, &mut path, "", "", &mut rows);
    rows
}

fn flatten_into(
    node: &Node,
    collapsed: &FxHashSet<NodePath>,
    path: &mut NodePath,
    guide: &str,
    child_guide: &str,
    rows: &mut Vec<TreeRow>,
) {
    let children = node.children();
    let is_collapsed = !children.is_empty() && collapsed.contains(path.as_slice());

    rows.push(TreeRow {
        path: path.clone(),
        depth: path.len(),
        guide: guide.to_string(),
        label: node.label(),
        node_type: node.node_type(),
        has_children: !children.is_empty(),
        collapsed: is_collapsed,
    });

    if is_collapsed {
        return;
    }

    let last = children.len().saturating_sub(1);
    for (i, child) in children.into_iter().enumerate() {
        let (connector, continuation) = if i == last {
            ("└── ", "    ")
        } else {
            ("├── ", "│   ")
        };
        path.push(i);
        flatten_into(
            child,
            collapsed,
            path,
            &format!("{}{}", child_guide, connector),
            &format!("{}{}", child_guide, continuation),
            rows,
        );
        path.pop();
    }
}

/// Every path in the tree that has children, for "collapse all".
pub fn branch_paths(root: &Node) -> FxHashSet<NodePath> {
    flatten(root, &FxHashSet::default())
        .into_iter()
        .filter(|row| row.has_children)
        .map(|row| row.path)
        .collect()
}

/// Render the whole tree as an indented outline, one node per line.
pub fn outline(root: &Node) -> String {
    flatten(root, &FxHashSet::default())
        .iter()
        .map(|row| format!("{}{}", row.guide, row.label))
        .collect::<Vec<_>>()
        .join("\n")
}
