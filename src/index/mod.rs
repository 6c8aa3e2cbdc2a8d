//! Secondary indexes: pluggable value indexes, the label map and the
//! per-graph index aggregate.

mod btree_index;
mod graph_index;
mod hash_index;
mod node_map;

pub use btree_index::BtreeIndex;
pub use hash_index::HashIndex;
pub use node_map::NodeMap;

pub(crate) use graph_index::{context_key, GraphIndex};

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::hash::Hash;

/// Selects the backing structure of a property value index.
///
/// The numeric values (`Btree = 0`, `Hash = 1`) are part of the public
/// contract and are what serializes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum IndexKind {
    Btree = 0,
    Hash = 1,
}

impl IndexKind {
    pub fn as_u8(self) -> u8 {
        self as u8
    }

    pub fn from_u8(v: u8) -> Option<IndexKind> {
        match v {
            0 => Some(IndexKind::Btree),
            1 => Some(IndexKind::Hash),
            _ => None,
        }
    }
}

impl Serialize for IndexKind {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u8(self.as_u8())
    }
}

impl<'de> Deserialize<'de> for IndexKind {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let v = u8::deserialize(deserializer)?;
        IndexKind::from_u8(v)
            .ok_or_else(|| serde::de::Error::custom(format!("invalid index kind {}", v)))
    }
}

/// A secondary index from a stringified property value to the set of item
/// ids carrying that value.
///
/// Items within one value are yielded in insertion order. A value whose
/// last item is removed disappears entirely, so [`ValueIndex::value_iter`]
/// never visits empty buckets.
pub trait ValueIndex<Id>: fmt::Debug {
    fn add(&mut self, value: &str, id: Id);

    fn remove(&mut self, value: &str, id: Id);

    /// The ids stored under `value`, in insertion order, with an exact
    /// size hint.
    fn find<'a>(&'a self, value: &str) -> Box<dyn Iterator<Item = Id> + 'a>;

    /// Every id in the index, bucket by bucket.
    fn value_iter<'a>(&'a self) -> Box<dyn Iterator<Item = Id> + 'a>;

    /// Total number of items across all values.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

pub(crate) fn new_value_index<Id>(kind: IndexKind) -> Box<dyn ValueIndex<Id>>
where
    Id: Copy + Eq + Hash + fmt::Debug + 'static,
{
    match kind {
        IndexKind::Btree => Box::new(BtreeIndex::new()),
        IndexKind::Hash => Box::new(HashIndex::new()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_index_kind_contract_values() {
        assert_eq!(IndexKind::Btree.as_u8(), 0);
        assert_eq!(IndexKind::Hash.as_u8(), 1);
        assert_eq!(IndexKind::from_u8(1), Some(IndexKind::Hash));
        assert_eq!(IndexKind::from_u8(7), None);
    }

    #[test]
    fn test_index_kind_serde() {
        assert_eq!(serde_json::to_string(&IndexKind::Hash).unwrap(), "1");
        let kind: IndexKind = serde_json::from_str("0").unwrap();
        assert_eq!(kind, IndexKind::Btree);
        assert!(serde_json::from_str::<IndexKind>("3").is_err());
    }
}
