//! Core type definitions for the talent build data model.

use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Identifier of one node in the talent hierarchy.
///
/// Opaque to the decoder; its only semantics are equality and its position
/// in the schema's canonical traversal order.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct NodeId(pub u32);

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Node kind: rank accumulator or mutually exclusive choice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NodeKind {
    /// Points accumulate up to `max_ranks`.
    Single,
    /// Taking the node selects exactly one of several alternatives.
    Choice,
}

/// Which source tree a node originates from.
///
/// Origin is carried as an explicit attribute rather than inferred from
/// which source list a node was loaded out of.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NodeOrigin {
    /// Class-wide tree.
    Class,
    /// Specialization tree.
    Spec,
    /// Hero tree.
    Hero,
}

/// Immutable definition of one talent node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Node {
    /// Node identifier, unique within a schema.
    pub id: NodeId,
    /// Single or Choice.
    pub kind: NodeKind,
    /// Source tree this node belongs to.
    pub origin: NodeOrigin,
    /// Maximum rank, >= 1.
    pub max_ranks: u8,
    /// Number of mutually exclusive alternatives, >= 1.
    /// Meaningful only when `kind` is [`NodeKind::Choice`].
    pub alternative_count: u8,
}

impl Node {
    /// Create a Single node with the given rank ceiling.
    pub fn single(id: NodeId, origin: NodeOrigin, max_ranks: u8) -> Self {
        Self {
            id,
            kind: NodeKind::Single,
            origin,
            max_ranks: max_ranks.max(1),
            alternative_count: 1,
        }
    }

    /// Create a Choice node with the given number of alternatives.
    ///
    /// Choice nodes always commit exactly one rank, so `max_ranks` is 1.
    pub fn choice(id: NodeId, origin: NodeOrigin, alternative_count: u8) -> Self {
        Self {
            id,
            kind: NodeKind::Choice,
            origin,
            max_ranks: 1,
            alternative_count: alternative_count.max(1),
        }
    }
}

/// Decoded selection state for one node.
///
/// Produced fresh on every decode pass and immutable afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectionRecord {
    /// Whether any points are committed to this node.
    pub taken: bool,
    /// Ranks spent: 0 when not taken, in `1..=max_ranks` when taken.
    pub ranks_taken: u8,
    /// Rank ceiling, copied from the node definition for convenience.
    pub max_ranks: u8,
    /// Selected alternative index, present only for taken Choice nodes.
    pub chosen_alternative: Option<u8>,
}

impl SelectionRecord {
    /// Record for a node with no points committed.
    pub fn not_taken(max_ranks: u8) -> Self {
        Self {
            taken: false,
            ranks_taken: 0,
            max_ranks,
            chosen_alternative: None,
        }
    }
}

/// Full decode result: one record per node present in the schema index.
pub type SelectionTable = HashMap<NodeId, SelectionRecord>;
