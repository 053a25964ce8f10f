use crate::hierarchy::TreeNode;

use super::{LayoutConfig, LayoutNode};

/// Assign every node an angular span proportional to its value and a ring
/// determined by its depth. The root covers `[0, cfg.angular_budget]`.
pub fn partition(tree: &TreeNode, cfg: &LayoutConfig) -> LayoutNode {
    let step = cfg.ring_step(tree.height());
    let root = assign_spans(tree, 0.0, cfg.angular_budget, step);
    log::debug!(
        "partitioned {} nodes into rings of {} over {} rad",
        tree.count(),
        step,
        cfg.angular_budget
    );
    root
}

/// Recursively distribute `[start, end]` among the children of `node`.
fn assign_spans(node: &TreeNode, start: f64, end: f64, step: f64) -> LayoutNode {
    let children = node.children();

    let span = end - start;

    // The last weighted child closes exactly on the parent's end, absorbing
    // rounding drift. Zero-valued children after it sit on `end`.
    let last_weighted = children.iter().rposition(|c| c.value > 0.0);

    let mut placed = Vec::with_capacity(children.len());
    let mut current_angle = start;
    for (i, child) in children.iter().enumerate() {
        // Share of the parent as a ratio <= 1, so tiny totals cannot overflow.
        // Zero-valued parents collapse all children onto `start`.
        let child_end = if Some(i) == last_weighted {
            end
        } else if node.value > 0.0 {
            (current_angle + span * (child.value / node.value)).min(end)
        } else {
            current_angle
        };
        placed.push(assign_spans(child, current_angle, child_end, step));
        current_angle = child_end;
    }

    LayoutNode {
        name: node.name.clone(),
        color: node.color.clone(),
        path: node.path.clone(),
        depth: node.depth,
        value: node.value,
        angle_start: start,
        angle_end: end,
        radius_inner: node.depth as f64 * step,
        radius_outer: (node.depth + 1) as f64 * step,
        children: placed,
    }
}

#[cfg(test)]
mod tests {
    use std::f64::consts::{PI, TAU};

    use super::*;
    use crate::hierarchy::{build, RawNode};
    use crate::layout::RadialScale;

    const TOL: f64 = 1e-9;

    fn layout(raw: &RawNode) -> LayoutNode {
        partition(&build(raw).unwrap(), &LayoutConfig::default())
    }

    fn sample() -> RawNode {
        RawNode::internal("root", 0.0, vec![
            RawNode::internal("a", 0.0, vec![
                RawNode::leaf("a1", 1.0, 0.0),
                RawNode::leaf("a2", 2.5, 1.0),
                RawNode::leaf("a3", 0.0, 2.0),
            ]),
            RawNode::leaf("b", 7.0, 1.0),
            RawNode::internal("c", 2.0, vec![
                RawNode::leaf("c1", 0.3, 0.0),
                RawNode::internal("c2", 1.0, vec![RawNode::leaf("c2x", 1.7, 0.0)]),
            ]),
        ])
    }

    #[test]
    fn test_two_children_scenario() {
        let raw = RawNode::internal("root", 0.0, vec![
            RawNode::leaf("A", 30.0, 0.0),
            RawNode::leaf("B", 10.0, 1.0),
        ]);
        let root = layout(&raw);
        let (a, b) = (&root.children[0], &root.children[1]);

        assert_eq!(root.angle_start, 0.0);
        assert_eq!(root.angle_end, TAU);
        assert_eq!(a.angle_start, 0.0);
        assert!((a.angle_end - 1.5 * PI).abs() < TOL);
        assert_eq!(b.angle_start, a.angle_end);
        assert_eq!(b.angle_end, TAU);
    }

    #[test]
    fn test_children_conserve_and_tile_parent_span() {
        let root = layout(&sample());
        for node in root.descendants() {
            if node.children.is_empty() {
                continue;
            }
            let total: f64 = node.children.iter().map(LayoutNode::angle_span).sum();
            assert!((total - node.angle_span()).abs() < TOL, "span mismatch at '{}'", node.name);

            assert_eq!(node.children[0].angle_start, node.angle_start);
            assert_eq!(node.children.last().unwrap().angle_end, node.angle_end);
            for pair in node.children.windows(2) {
                assert_eq!(pair[0].angle_end, pair[1].angle_start);
                assert!(pair[0].angle_start <= pair[0].angle_end);
            }
        }
    }

    #[test]
    fn test_sibling_spans_proportional_to_value() {
        let root = layout(&sample());
        let a = &root.children[0];
        let b = &root.children[1];
        let ratio = a.angle_span() / b.angle_span();
        assert!((ratio - a.value / b.value).abs() < TOL);
        assert!((a.children[0].angle_span() / a.children[1].angle_span() - 1.0 / 2.5).abs() < TOL);
    }

    #[test]
    fn test_zero_value_child_has_zero_width() {
        let root = layout(&sample());
        let a3 = &root.children[0].children[2];
        assert_eq!(a3.name, "a3");
        assert_eq!(a3.angle_start, a3.angle_end);
    }

    #[test]
    fn test_zero_valued_parent_collapses_children() {
        let raw = RawNode::internal("root", 0.0, vec![
            RawNode::leaf("solid", 4.0, 0.0),
            RawNode::internal("hollow", 1.0, vec![
                RawNode::leaf("x", 0.0, 0.0),
                RawNode::leaf("y", 0.0, 1.0),
            ]),
        ]);
        let root = layout(&raw);
        let hollow = &root.children[1];
        assert_eq!(hollow.angle_span(), 0.0);
        for c in &hollow.children {
            assert_eq!(c.angle_start, hollow.angle_start);
            assert_eq!(c.angle_end, hollow.angle_start);
        }
    }

    #[test]
    fn test_zero_total_value() {
        let raw = RawNode::internal("root", 0.0, vec![
            RawNode::leaf("x", 0.0, 0.0),
            RawNode::leaf("y", 0.0, 1.0),
        ]);
        let root = layout(&raw);
        assert_eq!(root.angle_span(), TAU);
        for c in &root.children {
            assert_eq!(c.angle_start, 0.0);
            assert_eq!(c.angle_end, 0.0);
        }
    }

    #[test]
    fn test_radius_depends_on_depth_only() {
        // height 3 → step 50
        let root = layout(&sample());
        for node in root.descendants() {
            assert_eq!(node.radius_inner, node.depth as f64 * 50.0);
            assert_eq!(node.radius_outer, (node.depth + 1) as f64 * 50.0);
            assert!(node.radius_inner < node.radius_outer);
            assert!(node.radius_outer <= 200.0);
        }
        let c2 = &root.children[2].children[1];
        assert_eq!(c2.depth, 2);
        assert_eq!(c2.radius_inner, 100.0);
        assert_eq!(c2.radius_outer, 150.0);
    }

    #[test]
    fn test_fixed_rings_scale() {
        let cfg = LayoutConfig {
            radial_scale: RadialScale::Rings(4),
            ..Default::default()
        };
        let raw = RawNode::internal("root", 0.0, vec![RawNode::leaf("x", 1.0, 0.0)]);
        let root = partition(&build(&raw).unwrap(), &cfg);
        assert_eq!(root.children[0].radius_inner, 50.0);
        assert_eq!(root.children[0].radius_outer, 100.0);
    }

    #[test]
    fn test_rings_widen_to_fit_tall_tree() {
        let cfg = LayoutConfig {
            radial_scale: RadialScale::Rings(2),
            ..Default::default()
        };
        // height 3 needs four rings
        let root = partition(&build(&sample()).unwrap(), &cfg);
        for node in root.descendants() {
            assert!(node.radius_outer <= 200.0, "'{}' outside the radius", node.name);
            assert!(node.radius_inner < node.radius_outer);
        }
    }

    #[test]
    fn test_tiny_values_stay_bounded() {
        let raw = RawNode::internal("root", 0.0, vec![
            RawNode::leaf("x", 5e-324, 0.0),
            RawNode::leaf("y", 5e-324, 1.0),
            RawNode::leaf("z", 1e-320, 2.0),
        ]);
        let root = layout(&raw);
        for node in root.descendants() {
            assert!(node.angle_start.is_finite() && node.angle_end.is_finite());
            assert!(0.0 <= node.angle_start && node.angle_end <= TAU);
        }
        assert_eq!(root.children[2].angle_end, TAU);
    }

    #[test]
    fn test_custom_angular_budget() {
        let cfg = LayoutConfig {
            angular_budget: PI,
            ..Default::default()
        };
        let raw = RawNode::internal("root", 0.0, vec![
            RawNode::leaf("x", 1.0, 0.0),
            RawNode::leaf("y", 1.0, 1.0),
        ]);
        let root = partition(&build(&raw).unwrap(), &cfg);
        assert!((root.children[0].angle_end - PI / 2.0).abs() < TOL);
        assert_eq!(root.children[1].angle_end, PI);
    }

    #[test]
    fn test_partition_is_deterministic() {
        let first = layout(&sample());
        let second = layout(&sample());
        let a: Vec<[u64; 4]> = first
            .descendants()
            .iter()
            .map(|n| [n.angle_start.to_bits(), n.angle_end.to_bits(), n.radius_inner.to_bits(), n.radius_outer.to_bits()])
            .collect();
        let b: Vec<[u64; 4]> = second
            .descendants()
            .iter()
            .map(|n| [n.angle_start.to_bits(), n.angle_end.to_bits(), n.radius_inner.to_bits(), n.radius_outer.to_bits()])
            .collect();
        assert_eq!(a, b);
    }
}
