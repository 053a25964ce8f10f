//! Draw geometry derived from a laid-out node: ring segments and label anchors.

mod arc;
mod label;
mod path;

pub use arc::{to_arc, ArcDescriptor, ArcStyle};
pub use label::{to_label, LabelTransform, Orientation};
