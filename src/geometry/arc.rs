use serde::Serialize;

use crate::layout::LayoutNode;

use super::path::arc_path;

/// Style inputs shared by every arc of one draw.
#[derive(Debug, Clone, PartialEq)]
pub struct ArcStyle {
    /// Upper bound on the pad angle between slices (radians).
    pub max_pad_angle: f64,
    /// Subtracted from the outer radius to separate rings.
    pub ring_gap: f64,
    /// Opacity of the first ring, 0 to 100.
    pub inner_opacity: f64,
}

impl Default for ArcStyle {
    fn default() -> Self {
        Self {
            max_pad_angle: 0.005,
            ring_gap: 1.0,
            inner_opacity: 100.0,
        }
    }
}

/// Everything needed to draw one ring segment. Angles are radians measured
/// clockwise from 12 o'clock.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ArcDescriptor {
    pub start_angle: f64,
    pub end_angle: f64,
    pub pad_angle: f64,
    pub pad_radius: f64,
    pub inner_radius: f64,
    pub outer_radius: f64,
    pub fill_color: String,
    pub fill_opacity: f64,
}

impl ArcDescriptor {
    /// SVG path data for this segment, centered on the origin.
    pub fn to_path(&self) -> String {
        arc_path(self)
    }
}

/// Arc for one laid-out node. The root (depth 0) is never drawn.
pub fn to_arc(node: &LayoutNode, radial_scale_max: f64, style: &ArcStyle) -> Option<ArcDescriptor> {
    if node.depth == 0 {
        return None;
    }

    let pad_angle = (node.angle_span() / 4.0).min(style.max_pad_angle);
    // Rings thinner than the gap keep zero thickness instead of inverting.
    let outer_radius = (node.radius_outer - style.ring_gap).max(node.radius_inner);
    let fill_opacity = if node.depth == 1 {
        style.inner_opacity.clamp(0.0, 100.0) / 100.0
    } else {
        1.0
    };

    Some(ArcDescriptor {
        start_angle: node.angle_start,
        end_angle: node.angle_end,
        pad_angle,
        pad_radius: radial_scale_max / 2.0,
        inner_radius: node.radius_inner,
        outer_radius,
        fill_color: node.color.clone(),
        fill_opacity,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn node(depth: usize, start: f64, end: f64) -> LayoutNode {
        LayoutNode {
            name: "n".to_string(),
            color: "#ff8800".to_string(),
            path: "n".to_string(),
            depth,
            value: 1.0,
            angle_start: start,
            angle_end: end,
            radius_inner: depth as f64 * 50.0,
            radius_outer: (depth + 1) as f64 * 50.0,
            children: Vec::new(),
        }
    }

    #[test]
    fn test_root_has_no_arc() {
        assert!(to_arc(&node(0, 0.0, 1.0), 200.0, &ArcStyle::default()).is_none());
    }

    #[test]
    fn test_arc_fields() {
        let arc = to_arc(&node(2, 1.0, 2.0), 200.0, &ArcStyle::default()).unwrap();
        assert_eq!(arc.start_angle, 1.0);
        assert_eq!(arc.end_angle, 2.0);
        assert_eq!(arc.pad_angle, 0.005);
        assert_eq!(arc.pad_radius, 100.0);
        assert_eq!(arc.inner_radius, 100.0);
        assert_eq!(arc.outer_radius, 149.0);
        assert_eq!(arc.fill_color, "#ff8800");
        assert_eq!(arc.fill_opacity, 1.0);
    }

    #[test]
    fn test_pad_angle_limited_to_quarter_span() {
        let arc = to_arc(&node(1, 0.0, 0.001), 200.0, &ArcStyle::default()).unwrap();
        assert_eq!(arc.pad_angle, 0.00025);
    }

    #[test]
    fn test_zero_width_slice_has_zero_pad() {
        let arc = to_arc(&node(1, 0.7, 0.7), 200.0, &ArcStyle::default()).unwrap();
        assert_eq!(arc.pad_angle, 0.0);
    }

    #[test]
    fn test_first_ring_opacity() {
        let style = ArcStyle {
            inner_opacity: 40.0,
            ..Default::default()
        };
        assert_eq!(to_arc(&node(1, 0.0, 1.0), 200.0, &style).unwrap().fill_opacity, 0.4);
        assert_eq!(to_arc(&node(2, 0.0, 1.0), 200.0, &style).unwrap().fill_opacity, 1.0);
    }

    #[test]
    fn test_opacity_is_clamped() {
        let style = ArcStyle {
            inner_opacity: 250.0,
            ..Default::default()
        };
        assert_eq!(to_arc(&node(1, 0.0, 1.0), 200.0, &style).unwrap().fill_opacity, 1.0);
    }

    #[test]
    fn test_thin_ring_does_not_invert() {
        let mut n = node(1, 0.0, 1.0);
        n.radius_inner = 10.0;
        n.radius_outer = 10.5;
        let arc = to_arc(&n, 200.0, &ArcStyle::default()).unwrap();
        assert_eq!(arc.outer_radius, 10.0);
    }
}
