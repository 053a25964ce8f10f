// Raw input records, as delivered by the data source.
//
// Two shapes are accepted:
// - RawNode: nested records, children owned by their parent. Acyclic by construction.
// - RawTable: flat records referencing children by id. May contain cycles or
//   shared children, which `into_tree` rejects while resolving ids.

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};

use super::build::MAX_DEPTH;
use super::error::{InvalidTreeError, InvalidTreeKind};

// Unknown fields are rejected so a broken table is never read as an empty node.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RawNode {
    #[serde(default)]
    pub name: String,
    /// Leaf weight. Ignored on nodes that have children.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<f64>,
    /// Sibling sort key (ascending).
    #[serde(default)]
    pub order: f64,
    #[serde(default)]
    pub color: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<RawNode>,
}

impl RawNode {
    pub fn leaf(name: &str, value: f64, order: f64) -> Self {
        Self {
            name: name.to_string(),
            value: Some(value),
            order,
            ..Default::default()
        }
    }

    pub fn internal(name: &str, order: f64, children: Vec<RawNode>) -> Self {
        Self {
            name: name.to_string(),
            order,
            children,
            ..Default::default()
        }
    }

    pub fn with_color(mut self, color: &str) -> Self {
        self.color = color.to_string();
        self
    }
}

/// One record of a flat table. `name` falls back to `id` when absent.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RawRecord {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<f64>,
    #[serde(default)]
    pub order: f64,
    #[serde(default)]
    pub color: String,
    /// Child record ids, in input order.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RawTable {
    pub root: String,
    pub records: Vec<RawRecord>,
}

impl RawTable {
    /// Resolve child ids into a nested tree rooted at `self.root`.
    /// Records not reachable from the root are ignored.
    pub fn into_tree(&self) -> Result<RawNode, InvalidTreeError> {
        let mut index: HashMap<&str, usize> = HashMap::with_capacity(self.records.len());
        for (i, rec) in self.records.iter().enumerate() {
            if index.insert(rec.id.as_str(), i).is_some() {
                return Err(InvalidTreeError::new(
                    InvalidTreeKind::DuplicateId,
                    rec.id.clone(),
                    format!("record id '{}' is used more than once", rec.id),
                ));
            }
        }

        let root = *index.get(self.root.as_str()).ok_or_else(|| {
            InvalidTreeError::new(
                InvalidTreeKind::UnknownRoot,
                "",
                format!("root id '{}' matches no record", self.root),
            )
        })?;

        let mut ctx = ResolveCtx {
            table: self,
            index,
            visited: HashSet::new(),
            ancestors: Vec::new(),
            on_path: HashSet::new(),
        };
        ctx.resolve(root)
    }
}

struct ResolveCtx<'a> {
    table: &'a RawTable,
    index: HashMap<&'a str, usize>,
    // Every record entered so far.
    visited: HashSet<usize>,
    // Records on the current root-to-node path, in order and as a set.
    ancestors: Vec<usize>,
    on_path: HashSet<usize>,
}

impl<'a> ResolveCtx<'a> {
    fn path(&self) -> String {
        self.ancestors
            .iter()
            .map(|&i| self.table.records[i].id.as_str())
            .collect::<Vec<_>>()
            .join("/")
    }

    fn resolve(&mut self, idx: usize) -> Result<RawNode, InvalidTreeError> {
        let table = self.table;
        let rec = &table.records[idx];
        self.visited.insert(idx);
        self.ancestors.push(idx);
        self.on_path.insert(idx);

        if self.ancestors.len() > MAX_DEPTH + 1 {
            return Err(InvalidTreeError::new(
                InvalidTreeKind::TooDeep,
                self.path(),
                format!("tree is nested deeper than {} levels", MAX_DEPTH),
            ));
        }

        let mut children = Vec::with_capacity(rec.children.len());
        for child_id in &rec.children {
            let child = *self.index.get(child_id.as_str()).ok_or_else(|| {
                InvalidTreeError::new(
                    InvalidTreeKind::UnknownChild,
                    self.path(),
                    format!("child id '{}' matches no record", child_id),
                )
            })?;

            if self.on_path.contains(&child) {
                return Err(InvalidTreeError::new(
                    InvalidTreeKind::Cycle,
                    self.path(),
                    format!("'{}' is its own ancestor", child_id),
                ));
            }
            if self.visited.contains(&child) {
                return Err(InvalidTreeError::new(
                    InvalidTreeKind::SharedChild,
                    self.path(),
                    format!("'{}' already has a parent", child_id),
                ));
            }

            children.push(self.resolve(child)?);
        }

        self.ancestors.pop();
        self.on_path.remove(&idx);
        Ok(RawNode {
            name: rec.name.clone().unwrap_or_else(|| rec.id.clone()),
            value: rec.value,
            order: rec.order,
            color: rec.color.clone(),
            children,
        })
    }
}
