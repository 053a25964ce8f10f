use serde::{Serialize, Serializer};

/// What made a raw tree unusable for layout.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum InvalidTreeKind {
    /// A record references one of its own ancestors.
    Cycle,
    /// A record is referenced as a child by more than one parent.
    SharedChild,
    /// A child reference points at no record.
    UnknownChild,
    /// Two records share one id.
    DuplicateId,
    /// The table's root id points at no record.
    UnknownRoot,
    NonFiniteOrder,
    NonFiniteValue,
    NegativeValue,
    /// The tree nests deeper than `MAX_DEPTH` levels.
    TooDeep,
}

impl InvalidTreeKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            InvalidTreeKind::Cycle => "cycle",
            InvalidTreeKind::SharedChild => "shared_child",
            InvalidTreeKind::UnknownChild => "unknown_child",
            InvalidTreeKind::DuplicateId => "duplicate_id",
            InvalidTreeKind::UnknownRoot => "unknown_root",
            InvalidTreeKind::NonFiniteOrder => "non_finite_order",
            InvalidTreeKind::NonFiniteValue => "non_finite_value",
            InvalidTreeKind::NegativeValue => "negative_value",
            InvalidTreeKind::TooDeep => "too_deep",
        }
    }
}

impl Serialize for InvalidTreeKind {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// Malformed input tree. Aborts the whole layout pass.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InvalidTreeError {
    pub kind: InvalidTreeKind,
    /// Slash-joined names (or record ids) leading to the offending node.
    pub path: String,
    pub msg: String,
}

impl InvalidTreeError {
    pub fn new(kind: InvalidTreeKind, path: impl Into<String>, msg: impl Into<String>) -> Self {
        Self {
            kind,
            path: path.into(),
            msg: msg.into(),
        }
    }
}

impl std::fmt::Display for InvalidTreeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.path.is_empty() {
            write!(f, "Invalid tree ({}): {}", self.kind.as_str(), self.msg)
        } else {
            write!(f, "Invalid tree ({}) at '{}': {}", self.kind.as_str(), self.path, self.msg)
        }
    }
}
impl std::error::Error for InvalidTreeError {}
