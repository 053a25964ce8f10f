//! Draw instructions for the rendering layer.
//!
//! These structs are serialized to JSON and handed to the browser, which
//! joins `arcs` and `labels` by `key` onto its drawing surface.

use serde::Serialize;

use crate::geometry::{ArcDescriptor, LabelTransform};
use crate::hierarchy::InvalidTreeError;

/// One ring segment to draw.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ArcOutput {
    /// Slash-joined names from the first ring down
    pub key: String,
    pub depth: usize,
    #[serde(flatten)]
    pub arc: ArcDescriptor,
    /// SVG path data, centered on the origin
    pub d: String,
}

/// One label to draw.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LabelOutput {
    pub key: String,
    pub depth: usize,
    #[serde(flatten)]
    pub label: LabelTransform,
    /// SVG transform attribute
    pub transform: String,
    /// Vertical text offset, e.g. "0.35em"
    pub dy: String,
}

/// Per-update style of the label group, applied to all labels at once.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LabelGroupStyle {
    /// "visible" or "hidden"
    pub visibility: String,
    pub font_size: f64,
    pub fill: String,
}

/// Label group attributes set once when the containers are created.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LabelGroupDefaults {
    pub pointer_events: String,
    pub text_anchor: String,
    pub font_size: f64,
    pub font_family: String,
}

/// Drawing surface setup. Only present on the first successful update.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartFrame {
    pub width: f64,
    pub height: f64,
    /// e.g. "-200, -200, 400, 400"
    pub view_box: String,
    pub label_group: LabelGroupDefaults,
}

/// Everything emitted for one snapshot.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DrawInstructions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub frame: Option<ChartFrame>,
    /// Pre-order, root excluded
    pub arcs: Vec<ArcOutput>,
    /// Pre-order, only labels long enough to be legible
    pub labels: Vec<LabelOutput>,
    pub text: LabelGroupStyle,
}

/// Error information for the browser console / UI
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ErrorInfo {
    pub message: String,
    /// "invalid_input" for unreadable JSON, otherwise the tree error kind
    pub kind: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line: Option<usize>,   // 1-based, JSON errors only
    #[serde(skip_serializing_if = "Option::is_none")]
    pub column: Option<usize>, // 1-based, JSON errors only
}

impl From<&InvalidTreeError> for ErrorInfo {
    fn from(e: &InvalidTreeError) -> Self {
        Self {
            message: e.to_string(),
            kind: e.kind.as_str().to_string(),
            path: Some(e.path.clone()),
            line: None,
            column: None,
        }
    }
}

impl From<&serde_json::Error> for ErrorInfo {
    fn from(e: &serde_json::Error) -> Self {
        Self {
            message: e.to_string(),
            kind: "invalid_input".to_string(),
            path: None,
            line: Some(e.line()),
            column: Some(e.column()),
        }
    }
}

/// The combined output sent to the browser
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartOutput {
    #[serde(flatten)]
    pub draw: Option<DrawInstructions>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ErrorInfo>,
}

impl ChartOutput {
    pub fn ok(draw: DrawInstructions) -> Self {
        Self { draw: Some(draw), error: None }
    }

    pub fn err(error: ErrorInfo) -> Self {
        Self { draw: None, error: Some(error) }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hierarchy::InvalidTreeKind;

    #[test]
    fn test_error_output_has_no_draw_fields() {
        let e = InvalidTreeError::new(InvalidTreeKind::Cycle, "a/b", "'a' is its own ancestor");
        let json = serde_json::to_value(ChartOutput::err(ErrorInfo::from(&e))).unwrap();

        assert!(json.get("arcs").is_none());
        assert_eq!(json["error"]["kind"], "cycle");
        assert_eq!(json["error"]["path"], "a/b");
        assert!(json["error"].get("line").is_none());
    }

    #[test]
    fn test_json_error_carries_position() {
        let e = serde_json::from_str::<serde_json::Value>("{\n  \"tree\": ").unwrap_err();
        let info = ErrorInfo::from(&e);
        assert_eq!(info.kind, "invalid_input");
        assert_eq!(info.line, Some(2));
        assert!(info.path.is_none());
    }

    #[test]
    fn test_arc_output_flattens_descriptor() {
        let out = ArcOutput {
            key: "fruit".to_string(),
            depth: 1,
            arc: ArcDescriptor {
                start_angle: 0.0,
                end_angle: 1.0,
                pad_angle: 0.005,
                pad_radius: 100.0,
                inner_radius: 50.0,
                outer_radius: 99.0,
                fill_color: "red".to_string(),
                fill_opacity: 0.5,
            },
            d: "M0,0Z".to_string(),
        };
        let json = serde_json::to_value(&out).unwrap();
        assert_eq!(json["key"], "fruit");
        assert_eq!(json["fill_color"], "red");
        assert_eq!(json["outer_radius"], 99.0);
        assert!(json.get("arc").is_none());
    }
}
