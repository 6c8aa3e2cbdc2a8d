//! Core identifier types.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// Unique identifier for a node.
///
/// Ids are assigned by the owning graph from a counter shared with edge
/// ids; they are never reused and are not portable across graphs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct NodeId(u64);

impl NodeId {
    pub fn new(id: u64) -> Self {
        NodeId(id)
    }

    pub fn as_u64(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "NodeId({})", self.0)
    }
}

impl From<u64> for NodeId {
    fn from(id: u64) -> Self {
        NodeId(id)
    }
}

/// Unique identifier for an edge, drawn from the same counter as node ids.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EdgeId(u64);

impl EdgeId {
    pub fn new(id: u64) -> Self {
        EdgeId(id)
    }

    pub fn as_u64(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for EdgeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "EdgeId({})", self.0)
    }
}

impl From<u64> for EdgeId {
    fn from(id: u64) -> Self {
        EdgeId(id)
    }
}

/// Direction selector for adjacency traversal.
///
/// The numeric values (`Incoming = -1`, `Any = 0`, `Outgoing = 1`) are part
/// of the public contract and are what serializes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(i8)]
pub enum EdgeDir {
    Incoming = -1,
    Any = 0,
    Outgoing = 1,
}

impl EdgeDir {
    pub fn as_i8(self) -> i8 {
        self as i8
    }

    pub fn from_i8(v: i8) -> Option<EdgeDir> {
        match v {
            -1 => Some(EdgeDir::Incoming),
            0 => Some(EdgeDir::Any),
            1 => Some(EdgeDir::Outgoing),
            _ => None,
        }
    }
}

impl Serialize for EdgeDir {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_i8(self.as_i8())
    }
}

impl<'de> Deserialize<'de> for EdgeDir {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let v = i8::deserialize(deserializer)?;
        EdgeDir::from_i8(v)
            .ok_or_else(|| serde::de::Error::custom(format!("invalid edge direction {}", v)))
    }
}
