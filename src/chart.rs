// Chart pipeline: one data snapshot -> one set of draw instructions.
//
//   MainData.tree -> build -> partition -> to_arc / to_label -> DrawInstructions
//
// Every update lays out the full tree from scratch. The only state kept across
// updates is whether a snapshot was rendered before, which decides if the
// output carries the one-time ChartFrame setup.

use std::borrow::Cow;

use serde::{Deserialize, Serialize};

use crate::geometry::{to_arc, to_label, ArcStyle, Orientation};
use crate::hierarchy::{build, InvalidTreeError, RawNode, RawTable};
use crate::layout::{partition, LayoutConfig};
use crate::output::{ArcOutput, ChartFrame, DrawInstructions, LabelGroupDefaults, LabelGroupStyle, LabelOutput};

#[derive(Debug, Clone, PartialEq)]
pub struct ChartConfig {
    /// Width and height of the drawing surface.
    pub size: f64,
    /// Angular budget, radius and ring scale.
    pub layout: LayoutConfig,
    pub max_pad_angle: f64,
    /// Gap between rings, taken off each outer radius.
    pub ring_gap: f64,
    /// Labels are dropped when their arc at mid radius is not longer than this.
    pub min_label_arc_length: f64,
    pub font_size: f64,
    pub font_family: String,
    pub text_anchor: String,
    pub text_dy: String,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            size: 400.0,
            layout: LayoutConfig::default(),
            max_pad_angle: 0.005,
            ring_gap: 1.0,
            min_label_arc_length: 10.0,
            font_size: 10.0,
            font_family: "sans-serif".to_string(),
            text_anchor: "middle".to_string(),
            text_dy: "0.35em".to_string(),
        }
    }
}

impl ChartConfig {
    pub fn with_dimensions(size: f64, radius: f64) -> Self {
        Self {
            size,
            layout: LayoutConfig {
                radius,
                ..Default::default()
            },
            ..Default::default()
        }
    }

    fn arc_style(&self, inner_opacity: f64) -> ArcStyle {
        ArcStyle {
            max_pad_angle: self.max_pad_angle,
            ring_gap: self.ring_gap,
            inner_opacity,
        }
    }

    fn frame(&self) -> ChartFrame {
        let half = self.size / 2.0;
        ChartFrame {
            width: self.size,
            height: self.size,
            view_box: format!("-{}, -{}, {}, {}", half, half, self.size, self.size),
            label_group: LabelGroupDefaults {
                pointer_events: "none".to_string(),
                text_anchor: self.text_anchor.clone(),
                font_size: self.font_size,
                font_family: self.font_family.clone(),
            },
        }
    }
}

/// The tree of a snapshot, either nested or as a flat record table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TreeInput {
    Table(RawTable),
    Nested(RawNode),
}

impl TreeInput {
    pub fn resolve(&self) -> Result<Cow<'_, RawNode>, InvalidTreeError> {
        match self {
            TreeInput::Nested(node) => Ok(Cow::Borrowed(node)),
            TreeInput::Table(table) => table.into_tree().map(Cow::Owned),
        }
    }
}

impl From<RawNode> for TreeInput {
    fn from(node: RawNode) -> Self {
        TreeInput::Nested(node)
    }
}

fn default_inner_opacity() -> f64 {
    100.0
}
fn default_true() -> bool {
    true
}
fn default_text_size() -> f64 {
    10.0
}
fn default_text_color() -> String {
    "black".to_string()
}

/// One data snapshot with its display options.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MainData {
    pub tree: TreeInput,
    /// Opacity of the first ring, 0 to 100.
    #[serde(default = "default_inner_opacity")]
    pub inner_opacity: f64,
    #[serde(default = "default_true")]
    pub show_text: bool,
    #[serde(default = "default_text_size")]
    pub text_size: f64,
    #[serde(default = "default_text_color")]
    pub text_color: String,
    #[serde(default = "default_true")]
    pub rotate_text: bool,
}

impl MainData {
    pub fn new(tree: impl Into<TreeInput>) -> Self {
        Self {
            tree: tree.into(),
            inner_opacity: default_inner_opacity(),
            show_text: true,
            text_size: default_text_size(),
            text_color: default_text_color(),
            rotate_text: true,
        }
    }

    fn label_group_style(&self) -> LabelGroupStyle {
        LabelGroupStyle {
            visibility: if self.show_text { "visible" } else { "hidden" }.to_string(),
            font_size: self.text_size,
            fill: self.text_color.clone(),
        }
    }
}

/// Lay out one snapshot. Pure: no frame, no state.
pub fn layout_snapshot(cfg: &ChartConfig, data: &MainData) -> Result<DrawInstructions, InvalidTreeError> {
    let raw = data.tree.resolve()?;
    let tree = build(&raw)?;
    let root = partition(&tree, &cfg.layout);

    let style = cfg.arc_style(data.inner_opacity);
    let orientation = Orientation::from_rotate_flag(data.rotate_text);

    let mut arcs = Vec::new();
    let mut labels = Vec::new();
    for node in root.descendants() {
        if let Some(arc) = to_arc(node, cfg.layout.radius, &style) {
            arcs.push(ArcOutput {
                key: node.path.clone(),
                depth: node.depth,
                d: arc.to_path(),
                arc,
            });
        }
        if let Some(label) = to_label(node, orientation, cfg.min_label_arc_length) {
            labels.push(LabelOutput {
                key: node.path.clone(),
                depth: node.depth,
                transform: label.to_svg_transform(),
                dy: cfg.text_dy.clone(),
                label,
            });
        }
    }

    log::debug!("snapshot laid out: {} arcs, {} labels", arcs.len(), labels.len());

    Ok(DrawInstructions {
        frame: None,
        arcs,
        labels,
        text: data.label_group_style(),
    })
}

/// A chart fed by a stream of snapshots.
#[derive(Debug, Clone)]
pub struct Sunburst {
    cfg: ChartConfig,
    rendered: bool,
}

impl Sunburst {
    pub fn new(cfg: ChartConfig) -> Self {
        Self { cfg, rendered: false }
    }

    pub fn config(&self) -> &ChartConfig {
        &self.cfg
    }

    pub fn has_rendered(&self) -> bool {
        self.rendered
    }

    /// Lay out a snapshot. The first successful call also returns the frame
    /// setup. A failed call changes nothing.
    pub fn update(&mut self, data: &MainData) -> Result<DrawInstructions, InvalidTreeError> {
        let mut draw = match layout_snapshot(&self.cfg, data) {
            Ok(draw) => draw,
            Err(e) => {
                log::warn!("layout pass aborted: {}", e);
                return Err(e);
            }
        };

        if !self.rendered {
            draw.frame = Some(self.cfg.frame());
            self.rendered = true;
        }
        Ok(draw)
    }
}

impl Default for Sunburst {
    fn default() -> Self {
        Self::new(ChartConfig::default())
    }
}
