//! Node entity.

use super::property::{PropertyMap, PropertyValue};
use super::types::{EdgeDir, EdgeId, NodeId};
use crate::sets::{FastMap, StringSet};
use std::fmt;

/// A node of a labeled property graph.
///
/// Nodes carry an ordered set of labels, a property map, an independent
/// set of context tags, and per-direction adjacency in insertion order.
/// Nodes are owned by their graph and reached through it; all mutation
/// goes through the graph so the secondary indexes stay consistent.
#[derive(Debug)]
pub struct Node {
    pub(crate) id: NodeId,
    pub(crate) labels: StringSet,
    pub(crate) properties: PropertyMap,
    pub(crate) contexts: StringSet,
    pub(crate) incoming: FastMap<EdgeId, ()>,
    pub(crate) outgoing: FastMap<EdgeId, ()>,
}

impl Node {
    pub(crate) fn new(
        id: NodeId,
        labels: StringSet,
        properties: PropertyMap,
        contexts: StringSet,
    ) -> Self {
        Node {
            id,
            labels,
            properties,
            contexts,
            incoming: FastMap::new(),
            outgoing: FastMap::new(),
        }
    }

    pub fn id(&self) -> NodeId {
        self.id
    }

    pub fn labels(&self) -> &StringSet {
        &self.labels
    }

    pub fn has_label(&self, label: &str) -> bool {
        self.labels.has(label)
    }

    pub fn properties(&self) -> &PropertyMap {
        &self.properties
    }

    pub fn property(&self, key: &str) -> Option<&PropertyValue> {
        self.properties.get(key)
    }

    pub fn has_property(&self, key: &str) -> bool {
        self.properties.contains_key(key)
    }

    pub fn property_count(&self) -> usize {
        self.properties.len()
    }

    pub fn contexts(&self) -> &StringSet {
        &self.contexts
    }

    /// Number of incident edges in the given direction; `Any` counts a
    /// self-loop twice.
    pub fn degree(&self, dir: EdgeDir) -> usize {
        match dir {
            EdgeDir::Incoming => self.incoming.len(),
            EdgeDir::Outgoing => self.outgoing.len(),
            EdgeDir::Any => self.incoming.len() + self.outgoing.len(),
        }
    }

    /// Ids of edges ending at this node, in insertion order.
    pub fn incoming_ids(&self) -> impl Iterator<Item = EdgeId> + '_ {
        self.incoming.keys().copied()
    }

    /// Ids of edges starting at this node, in insertion order.
    pub fn outgoing_ids(&self) -> impl Iterator<Item = EdgeId> + '_ {
        self.outgoing.keys().copied()
    }
}

impl PartialEq for Node {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Node {}

impl std::hash::Hash for Node {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "(")?;
        for label in self.labels.iter() {
            write!(f, ":{}", label)?;
        }
        if !self.properties.is_empty() {
            write!(f, " {{")?;
            for (i, (k, v)) in self.properties.iter().enumerate() {
                if i > 0 {
                    write!(f, ", ")?;
                }
                write!(f, "{}: {}", k, v)?;
            }
            write!(f, "}}")?;
        }
        write!(f, ")")
    }
}
