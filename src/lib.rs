//! Layout core for sunburst charts.
//!
//! A hierarchy of weighted, ordered records is laid out onto concentric rings:
//! depth picks the ring, accumulated value picks the angular width. The result
//! is a list of draw instructions (ring segments and label anchors) for a
//! rendering layer to paint.

pub mod chart;
pub mod geometry;
pub mod hierarchy;
pub mod layout;
pub mod output;
mod wasm;

pub use chart::{layout_snapshot, ChartConfig, MainData, Sunburst, TreeInput};
pub use geometry::{to_arc, to_label, ArcDescriptor, ArcStyle, LabelTransform, Orientation};
pub use hierarchy::{build, InvalidTreeError, InvalidTreeKind, NodeKind, RawNode, RawRecord, RawTable, TreeNode, MAX_DEPTH};
pub use layout::{partition, LayoutConfig, LayoutNode, RadialScale};
pub use output::{ChartFrame, ChartOutput, DrawInstructions, ErrorInfo};
pub use wasm::{layout_sunburst, SunburstChart};
