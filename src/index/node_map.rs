//! Multi-label node index.

use crate::graph::NodeId;
use crate::sets::{FastMap, StringSet};
use std::collections::HashMap;

/// Maps each label to the set of nodes carrying it, and tracks every node
/// of the graph in creation order.
#[derive(Debug, Default)]
pub struct NodeMap {
    all: FastMap<NodeId, ()>,
    by_label: HashMap<String, FastMap<NodeId, ()>>,
}

impl NodeMap {
    pub fn new() -> Self {
        NodeMap {
            all: FastMap::new(),
            by_label: HashMap::new(),
        }
    }

    /// Registers a node under every one of its labels.
    pub fn add(&mut self, id: NodeId, labels: &StringSet) {
        self.all.insert(id, ());
        for label in labels.iter() {
            self.by_label
                .entry(label.to_string())
                .or_default()
                .insert(id, ());
        }
    }

    pub fn remove(&mut self, id: NodeId, labels: &StringSet) {
        self.all.remove(&id);
        for label in labels.iter() {
            self.remove_from_bucket(label, id);
        }
    }

    /// Rebinds a node from its old label buckets to the new ones. Labels
    /// present in both sets are untouched.
    pub fn replace(&mut self, id: NodeId, old: &StringSet, new: &StringSet) {
        for label in old.iter() {
            if !new.has(label) {
                self.remove_from_bucket(label, id);
            }
        }
        for label in new.iter() {
            if !old.has(label) {
                self.by_label
                    .entry(label.to_string())
                    .or_default()
                    .insert(id, ());
            }
        }
    }

    fn remove_from_bucket(&mut self, label: &str, id: NodeId) {
        if let Some(bucket) = self.by_label.get_mut(label) {
            bucket.remove(&id);
            if bucket.is_empty() {
                self.by_label.remove(label);
            }
        }
    }

    pub fn len(&self) -> usize {
        self.all.len()
    }

    pub fn is_empty(&self) -> bool {
        self.all.is_empty()
    }

    pub fn label_bucket_len(&self, label: &str) -> usize {
        self.by_label.get(label).map_or(0, FastMap::len)
    }

    /// Every node, exactly once, in creation order.
    pub fn iter(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.all.keys().copied()
    }

    /// Nodes whose label set is a superset of `labels`.
    ///
    /// Picks the smallest bucket among the requested labels and filters it
    /// by membership in every other requested bucket; the size hint is the
    /// pivot bucket's size. An empty `labels` yields every node.
    pub fn iter_all_labels<'a>(
        &'a self,
        labels: &StringSet,
    ) -> Box<dyn Iterator<Item = NodeId> + 'a> {
        if labels.is_empty() {
            return Box::new(self.all.keys().copied());
        }
        let mut pivot: Option<(&str, &'a FastMap<NodeId, ()>)> = None;
        for label in labels.iter() {
            match self.by_label.get(label) {
                None => return Box::new(std::iter::empty()),
                Some(bucket) => {
                    if pivot.map_or(true, |(_, p)| bucket.len() < p.len()) {
                        pivot = Some((label, bucket));
                    }
                }
            }
        }
        let (pivot_label, pivot_bucket) = match pivot {
            Some(p) => p,
            None => return Box::new(std::iter::empty()),
        };
        let others: Vec<&'a FastMap<NodeId, ()>> = labels
            .iter()
            .filter(|l| *l != pivot_label)
            .filter_map(|l| self.by_label.get(l))
            .collect();
        Box::new(
            pivot_bucket
                .keys()
                .copied()
                .filter(move |id| others.iter().all(|bucket| bucket.contains(id))),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(n: u64) -> NodeId {
        NodeId::new(n)
    }

    #[test]
    fn test_add_and_iter() {
        let mut map = NodeMap::new();
        map.add(id(1), &StringSet::of(["a", "b"]));
        map.add(id(2), &StringSet::of(["b"]));
        map.add(id(3), &StringSet::new());

        assert_eq!(map.len(), 3);
        assert_eq!(map.iter().collect::<Vec<_>>(), vec![id(1), id(2), id(3)]);
        assert_eq!(map.label_bucket_len("b"), 2);
    }

    #[test]
    fn test_iter_all_labels() {
        let mut map = NodeMap::new();
        map.add(id(1), &StringSet::of(["a", "b"]));
        map.add(id(2), &StringSet::of(["a"]));
        map.add(id(3), &StringSet::of(["a", "b", "c"]));

        let both: Vec<_> = map.iter_all_labels(&StringSet::of(["a", "b"])).collect();
        assert_eq!(both, vec![id(1), id(3)]);

        let itr = map.iter_all_labels(&StringSet::of(["a", "b"]));
        // Hint comes from the smaller ("b") bucket.
        assert_eq!(itr.size_hint().1, Some(2));

        assert_eq!(map.iter_all_labels(&StringSet::of(["zz"])).count(), 0);
        assert_eq!(map.iter_all_labels(&StringSet::new()).count(), 3);
    }

    #[test]
    fn test_replace() {
        let mut map = NodeMap::new();
        let old = StringSet::of(["a", "b"]);
        let new = StringSet::of(["b", "c"]);
        map.add(id(1), &old);
        map.replace(id(1), &old, &new);

        assert_eq!(map.label_bucket_len("a"), 0);
        assert_eq!(map.label_bucket_len("b"), 1);
        assert_eq!(map.label_bucket_len("c"), 1);
        assert_eq!(map.len(), 1);
    }

    #[test]
    fn test_remove() {
        let mut map = NodeMap::new();
        let labels = StringSet::of(["a"]);
        map.add(id(1), &labels);
        map.add(id(2), &labels);
        map.remove(id(1), &labels);

        assert_eq!(map.len(), 1);
        assert_eq!(
            map.iter_all_labels(&StringSet::of(["a"])).collect::<Vec<_>>(),
            vec![id(2)]
        );
    }
}
