//! Raw input records and the weighted, ordered tree built from them.

mod build;
mod error;
mod raw;

pub use build::{build, NodeKind, TreeNode, MAX_DEPTH};
pub use error::{InvalidTreeError, InvalidTreeKind};
pub use raw::{RawNode, RawRecord, RawTable};
