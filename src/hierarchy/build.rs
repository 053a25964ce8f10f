// Hierarchy builder: RawNode -> TreeNode
//
// - depth assigned top-down (root = 0)
// - value accumulated bottom-up: leaves keep their declared value (0 if absent),
//   internal nodes take the sum of their children and drop any declared value
// - children sorted by `order` with a stable sort, so equal keys keep input order
// - every node carries its key path: names joined by '/', root excluded

use std::cmp::Ordering;

use super::error::{InvalidTreeError, InvalidTreeKind};
use super::raw::RawNode;

/// Deepest level a tree may reach (root = 0). Every tree walk recurses once
/// per level, so the limit also bounds stack use.
pub const MAX_DEPTH: usize = 128;

#[derive(Debug, Clone, PartialEq)]
pub enum NodeKind {
    Leaf,
    Internal { children: Vec<TreeNode> },
}

#[derive(Debug, Clone, PartialEq)]
pub struct TreeNode {
    pub name: String,
    pub color: String,
    pub order: f64,
    pub depth: usize,
    /// Accumulated weight of the subtree.
    pub value: f64,
    /// Stable key: names from the first ring down. Empty for the root.
    pub path: String,
    pub kind: NodeKind,
}

impl TreeNode {
    pub fn children(&self) -> &[TreeNode] {
        match &self.kind {
            NodeKind::Leaf => &[],
            NodeKind::Internal { children } => children,
        }
    }

    pub fn is_leaf(&self) -> bool {
        matches!(self.kind, NodeKind::Leaf)
    }

    /// Longest distance from this node down to a leaf.
    pub fn height(&self) -> usize {
        self.children()
            .iter()
            .map(|c| c.height() + 1)
            .max()
            .unwrap_or(0)
    }

    pub fn count(&self) -> usize {
        1 + self.children().iter().map(TreeNode::count).sum::<usize>()
    }
}

pub fn build(raw: &RawNode) -> Result<TreeNode, InvalidTreeError> {
    let tree = build_node(raw, 0, None)?;
    log::debug!(
        "built hierarchy: {} nodes, height {}, total value {}",
        tree.count(),
        tree.height(),
        tree.value
    );
    Ok(tree)
}

fn child_path(parent: Option<&str>, name: &str) -> String {
    match parent {
        None => String::new(),
        Some("") => name.to_string(),
        Some(p) => format!("{}/{}", p, name),
    }
}

fn build_node(raw: &RawNode, depth: usize, parent_path: Option<&str>) -> Result<TreeNode, InvalidTreeError> {
    let path = child_path(parent_path, &raw.name);
    // Errors name the root too, even though it has no key of its own.
    let err_path = if path.is_empty() { raw.name.as_str() } else { path.as_str() };

    if depth > MAX_DEPTH {
        return Err(InvalidTreeError::new(
            InvalidTreeKind::TooDeep,
            err_path,
            format!("tree is nested deeper than {} levels", MAX_DEPTH),
        ));
    }
    if !raw.order.is_finite() {
        return Err(InvalidTreeError::new(
            InvalidTreeKind::NonFiniteOrder,
            err_path,
            format!("order {} is not a finite number", raw.order),
        ));
    }
    if let Some(v) = raw.value {
        if !v.is_finite() {
            return Err(InvalidTreeError::new(
                InvalidTreeKind::NonFiniteValue,
                err_path,
                format!("value {} is not a finite number", v),
            ));
        }
        if v < 0.0 {
            return Err(InvalidTreeError::new(
                InvalidTreeKind::NegativeValue,
                err_path,
                format!("value {} is negative", v),
            ));
        }
    }

    if raw.children.is_empty() {
        return Ok(TreeNode {
            name: raw.name.clone(),
            color: raw.color.clone(),
            order: raw.order,
            depth,
            value: raw.value.unwrap_or(0.0),
            path,
            kind: NodeKind::Leaf,
        });
    }

    if let Some(v) = raw.value.filter(|v| *v != 0.0) {
        log::debug!("'{}': declared value {} replaced by sum of children", err_path, v);
    }

    let mut children = raw
        .children
        .iter()
        .map(|c| build_node(c, depth + 1, Some(path.as_str())))
        .collect::<Result<Vec<_>, _>>()?;

    // sort_by is stable
    children.sort_by(|a, b| a.order.partial_cmp(&b.order).unwrap_or(Ordering::Equal));

    let value: f64 = children.iter().map(|c| c.value).sum();
    if !value.is_finite() {
        return Err(InvalidTreeError::new(
            InvalidTreeKind::NonFiniteValue,
            err_path,
            "sum of child values overflows",
        ));
    }

    Ok(TreeNode {
        name: raw.name.clone(),
        color: raw.color.clone(),
        order: raw.order,
        depth,
        value,
        path,
        kind: NodeKind::Internal { children },
    })
}
