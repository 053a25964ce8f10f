// Radial partition layout for a built hierarchy.
//
// Goals:
// - Deterministic: identical trees give bit-identical angles and radii
// - Angular width proportional to accumulated value
// - Children tile their parent's span contiguously, in sibling order
// - Radial extent depends on depth only
//
// Output:
// - LayoutNode tree mirroring the input, root spanning the full angular budget.

use std::f64::consts::TAU;

use serde::{Deserialize, Serialize};

mod partition;

pub use partition::partition;

/// How the chart radius is divided into rings.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RadialScale {
    /// One ring per level of the tree actually present: `radius / (height + 1)`.
    FitHeight,
    /// At least this many rings: `radius / max(rings, height + 1)`. A taller
    /// tree widens the budget so every level stays within the radius.
    Rings(usize),
}

#[derive(Debug, Clone, PartialEq)]
pub struct LayoutConfig {
    /// Angle covered by the root, in radians.
    pub angular_budget: f64,
    /// Outer radius of the chart.
    pub radius: f64,
    pub radial_scale: RadialScale,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            angular_budget: TAU,
            radius: 200.0,
            radial_scale: RadialScale::FitHeight,
        }
    }
}

impl LayoutConfig {
    /// Ring thickness for a tree of the given height.
    pub fn ring_step(&self, height: usize) -> f64 {
        let rings = match self.radial_scale {
            RadialScale::FitHeight => height + 1,
            RadialScale::Rings(n) => n.max(height + 1),
        };
        self.radius / rings as f64
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct LayoutNode {
    pub name: String,
    pub color: String,
    pub path: String,
    pub depth: usize,
    pub value: f64,
    pub angle_start: f64,
    pub angle_end: f64,
    pub radius_inner: f64,
    pub radius_outer: f64,
    pub children: Vec<LayoutNode>,
}

impl LayoutNode {
    pub fn angle_span(&self) -> f64 {
        self.angle_end - self.angle_start
    }

    pub fn mid_angle(&self) -> f64 {
        (self.angle_start + self.angle_end) / 2.0
    }

    pub fn mid_radius(&self) -> f64 {
        (self.radius_inner + self.radius_outer) / 2.0
    }

    /// Pre-order traversal: parent before children, siblings in sorted order.
    pub fn descendants(&self) -> Vec<&LayoutNode> {
        fn dfs<'a>(node: &'a LayoutNode, out: &mut Vec<&'a LayoutNode>) {
            out.push(node);
            for c in &node.children {
                dfs(c, out);
            }
        }
        let mut out = Vec::new();
        dfs(self, &mut out);
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ring_step_fit_height() {
        let cfg = LayoutConfig::default();
        assert_eq!(cfg.ring_step(3), 50.0);
        assert_eq!(cfg.ring_step(0), 200.0);
    }

    #[test]
    fn test_ring_step_fixed_rings() {
        let cfg = LayoutConfig {
            radial_scale: RadialScale::Rings(8),
            ..Default::default()
        };
        assert_eq!(cfg.ring_step(1), 25.0);
        // taller than the budget
        assert_eq!(cfg.ring_step(9), 20.0);

        let zero = LayoutConfig {
            radial_scale: RadialScale::Rings(0),
            ..Default::default()
        };
        assert_eq!(zero.ring_step(4), 40.0);
    }

    #[test]
    fn test_descendants_pre_order() {
        let leaf = |name: &str| LayoutNode {
            name: name.to_string(),
            color: String::new(),
            path: name.to_string(),
            depth: 1,
            value: 0.0,
            angle_start: 0.0,
            angle_end: 0.0,
            radius_inner: 0.0,
            radius_outer: 0.0,
            children: Vec::new(),
        };
        let mut a = leaf("a");
        a.children.push(leaf("a1"));
        let mut root = leaf("root");
        root.children = vec![a, leaf("b")];

        let order: Vec<&str> = root.descendants().iter().map(|n| n.name.as_str()).collect();
        assert_eq!(order, vec!["root", "a", "a1", "b"]);
    }
}
