//! Talent schema: canonical node order plus the node index.
//!
//! The schema is supplied by an external dataset and is read-only to the
//! decoder. The canonical order is the traversal sequence the original
//! bitstream producer used; decoding replays bit consumption in exactly
//! this order, so the order must be preserved verbatim, including ids
//! that have no entry in the node index.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::types::{Node, NodeId};

/// Immutable node schema for one class/spec combination.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TalentSchema {
    /// Canonical bitstream traversal order over all node ids.
    order: Vec<NodeId>,
    /// Lookup from id to node definition. May omit ids present in `order`;
    /// such nodes still consume bits during decoding but emit no record.
    index: HashMap<NodeId, Node>,
}

impl TalentSchema {
    /// Build a schema from the canonical order and the node definitions.
    ///
    /// The order is taken as-is; nodes are indexed by id. Duplicate node
    /// ids keep the last definition.
    pub fn new(order: Vec<NodeId>, nodes: impl IntoIterator<Item = Node>) -> Self {
        let index = nodes.into_iter().map(|n| (n.id, n)).collect();
        Self { order, index }
    }

    /// The canonical traversal order.
    #[inline]
    pub fn traversal_order(&self) -> &[NodeId] {
        &self.order
    }

    /// Look up a node definition by id.
    #[inline]
    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.index.get(&id)
    }

    /// Number of nodes in the canonical order (indexed or not).
    #[inline]
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Whether the canonical order is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Number of nodes with a definition in the index.
    #[inline]
    pub fn indexed_len(&self) -> usize {
        self.index.len()
    }
}

/// Registry of schemas keyed by (class, spec), built once per dataset load.
#[derive(Debug, Clone, Default)]
pub struct SchemaRegistry {
    schemas: HashMap<(String, String), TalentSchema>,
}

impl SchemaRegistry {
    /// Build a registry from (class, spec) → schema entries.
    pub fn new(entries: impl IntoIterator<Item = ((String, String), TalentSchema)>) -> Self {
        Self {
            schemas: entries.into_iter().collect(),
        }
    }

    /// Look up the schema for a class/spec pair.
    pub fn lookup(&self, class: &str, spec: &str) -> Result<&TalentSchema> {
        self.schemas
            .get(&(class.to_owned(), spec.to_owned()))
            .ok_or_else(|| Error::schema_not_found(class, spec))
    }
}
