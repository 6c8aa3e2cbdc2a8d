//! Edge entity.

use super::property::{PropertyMap, PropertyValue};
use super::types::{EdgeId, NodeId};
use crate::sets::StringSet;
use std::fmt;

/// A directed edge of a labeled property graph.
///
/// Unlike nodes, an edge carries exactly one label. Both endpoints are
/// nodes of the same graph; mutation goes through the graph.
#[derive(Debug)]
pub struct Edge {
    pub(crate) id: EdgeId,
    pub(crate) from: NodeId,
    pub(crate) to: NodeId,
    pub(crate) label: String,
    pub(crate) properties: PropertyMap,
    pub(crate) contexts: StringSet,
}

impl Edge {
    pub(crate) fn new(
        id: EdgeId,
        from: NodeId,
        to: NodeId,
        label: String,
        properties: PropertyMap,
        contexts: StringSet,
    ) -> Self {
        Edge {
            id,
            from,
            to,
            label,
            properties,
            contexts,
        }
    }

    pub fn id(&self) -> EdgeId {
        self.id
    }

    pub fn from(&self) -> NodeId {
        self.from
    }

    pub fn to(&self) -> NodeId {
        self.to
    }

    pub fn label(&self) -> &str {
        &self.label
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

    pub fn contexts(&self) -> &StringSet {
        &self.contexts
    }

    /// Both endpoints, ignoring direction.
    pub fn connects(&self, a: NodeId, b: NodeId) -> bool {
        (self.from == a && self.to == b) || (self.from == b && self.to == a)
    }

    /// The endpoint that is not `node`; for a self-loop, the node itself.
    pub fn other_endpoint(&self, node: NodeId) -> NodeId {
        if self.to == node {
            self.from
        } else {
            self.to
        }
    }
}

impl PartialEq for Edge {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Edge {}

impl std::hash::Hash for Edge {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Display for Edge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[:{}", self.label)?;
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
        write!(f, "]")
    }
}
