use std::f64::consts::PI;

use serde::{Deserialize, Serialize};

use crate::layout::LayoutNode;

/// Label orientation policy.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Orientation {
    /// Text follows the slice direction, flipped past 180° to stay readable.
    Rotate,
    /// Text stays upright.
    Straight,
}

impl Orientation {
    pub fn from_rotate_flag(rotate_text: bool) -> Self {
        if rotate_text { Orientation::Rotate } else { Orientation::Straight }
    }
}

/// `rotate(rotation_degrees_1) translate(translate_radius, 0) rotate(rotation_degrees_2)`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LabelTransform {
    pub rotation_degrees_1: f64,
    pub translate_radius: f64,
    pub rotation_degrees_2: f64,
    pub text: String,
}

impl LabelTransform {
    pub fn to_svg_transform(&self) -> String {
        format!(
            "rotate({}) translate({},0) rotate({})",
            self.rotation_degrees_1, self.translate_radius, self.rotation_degrees_2
        )
    }
}

/// Label anchor for one node, or None if the node is the root or its arc at
/// mid radius is not longer than `min_arc_length`.
pub fn to_label(node: &LayoutNode, orientation: Orientation, min_arc_length: f64) -> Option<LabelTransform> {
    if node.depth == 0 {
        return None;
    }

    let mid_radius = node.mid_radius();
    if mid_radius * node.angle_span() <= min_arc_length {
        return None;
    }

    let mid_deg = node.mid_angle() * 180.0 / PI;
    let rotation_degrees_2 = match orientation {
        Orientation::Rotate => {
            if mid_deg < 180.0 { 0.0 } else { 180.0 }
        }
        Orientation::Straight => -(mid_deg - 90.0),
    };

    Some(LabelTransform {
        rotation_degrees_1: mid_deg - 90.0,
        translate_radius: mid_radius,
        rotation_degrees_2,
        text: node.name.clone(),
    })
}
