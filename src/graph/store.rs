//! The graph façade: entity lifecycle, index-consistent mutation and the
//! find planner.

use super::edge::Edge;
use super::node::Node;
use super::property::{PropertyMap, PropertyValue};
use super::types::{EdgeDir, EdgeId, NodeId};
use crate::error::GraphError;
use crate::index::{context_key, GraphIndex, IndexKind, ValueIndex};
use crate::iter::{concat, EdgeIter, NodeIter};
use crate::sets::{FastMap, StringSet};
use std::collections::HashSet;
use std::panic::{catch_unwind, AssertUnwindSafe};
use tracing::debug;

/// A labeled property graph: directed edges over nodes that carry label
/// sets, property maps and context tags.
///
/// The graph owns every node and edge and is the single writer: all
/// mutation goes through these methods so the secondary indexes stay
/// consistent with the entities. Read methods hand out iterators borrowing
/// the graph; the borrow checker enforces the usual contract that a
/// structural mutation invalidates outstanding iterators.
///
/// Handles (`NodeId`/`EdgeId`) passed to mutating methods must belong to
/// this graph; a foreign or stale handle is a programmer error and panics.
#[derive(Debug, Default)]
pub struct Graph {
    nodes: FastMap<NodeId, Node>,
    edges: FastMap<EdgeId, Edge>,
    index: GraphIndex,
    id_base: u64,
}

impl Graph {
    /// An empty graph.
    pub fn new() -> Self {
        Graph {
            nodes: FastMap::new(),
            edges: FastMap::new(),
            index: GraphIndex::new(),
            id_base: 0,
        }
    }

    fn next_id(&mut self) -> u64 {
        let id = self.id_base;
        self.id_base += 1;
        id
    }

    pub fn num_nodes(&self) -> usize {
        self.nodes.len()
    }

    pub fn num_edges(&self) -> usize {
        self.edges.len()
    }

    /// Creates a node with the given labels, properties and contexts,
    /// copying all three.
    pub fn new_node(
        &mut self,
        labels: &[&str],
        props: Option<&PropertyMap>,
        contexts: Option<&StringSet>,
    ) -> NodeId {
        self.fast_new_node(
            StringSet::of(labels.iter().copied()),
            props.cloned().unwrap_or_default(),
            contexts.cloned().unwrap_or_default(),
        )
    }

    /// As [`Graph::new_node`], taking ownership of the containers instead
    /// of copying them.
    pub fn fast_new_node(
        &mut self,
        labels: StringSet,
        properties: PropertyMap,
        contexts: StringSet,
    ) -> NodeId {
        let id = NodeId::new(self.next_id());
        let node = Node::new(id, labels, properties, contexts);
        self.index.add_node(&node);
        self.nodes.insert(id, node);
        id
    }

    /// Creates an edge between two nodes of this graph, copying the
    /// properties and contexts.
    ///
    /// Panics if either endpoint is not a node of this graph.
    pub fn new_edge(
        &mut self,
        from: NodeId,
        to: NodeId,
        label: &str,
        props: Option<&PropertyMap>,
        contexts: Option<&StringSet>,
    ) -> EdgeId {
        self.fast_new_edge(
            from,
            to,
            label.to_string(),
            props.cloned().unwrap_or_default(),
            contexts.cloned().unwrap_or_default(),
        )
    }

    /// As [`Graph::new_edge`], taking ownership of the containers.
    ///
    /// Panics if either endpoint is not a node of this graph.
    pub fn fast_new_edge(
        &mut self,
        from: NodeId,
        to: NodeId,
        label: String,
        properties: PropertyMap,
        contexts: StringSet,
    ) -> EdgeId {
        if !self.nodes.contains(&from) {
            panic!("from node {} is not in this graph", from);
        }
        if !self.nodes.contains(&to) {
            panic!("to node {} is not in this graph", to);
        }
        let id = EdgeId::new(self.next_id());
        let edge = Edge::new(id, from, to, label, properties, contexts);
        self.index.add_edge(&edge);
        self.edges.insert(id, edge);
        self.connect(id, from, to);
        id
    }

    fn connect(&mut self, edge: EdgeId, from: NodeId, to: NodeId) {
        if let Some(node) = self.nodes.get_mut(&to) {
            node.incoming.insert(edge, ());
        }
        if let Some(node) = self.nodes.get_mut(&from) {
            node.outgoing.insert(edge, ());
        }
    }

    fn disconnect(&mut self, edge: EdgeId, from: NodeId, to: NodeId) {
        if let Some(node) = self.nodes.get_mut(&to) {
            node.incoming.remove(&edge);
        }
        if let Some(node) = self.nodes.get_mut(&from) {
            node.outgoing.remove(&edge);
        }
    }

    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(&id)
    }

    pub fn edge(&self, id: EdgeId) -> Option<&Edge> {
        self.edges.get(&id)
    }

    /// Replaces a node's label set, rebinding the label index by diff.
    pub fn set_node_labels(&mut self, id: NodeId, labels: &StringSet) {
        let node = match self.nodes.get_mut(&id) {
            Some(n) => n,
            None => panic!("node {} is not in this graph", id),
        };
        self.index.nodes_by_label.replace(id, &node.labels, labels);
        node.labels = labels.clone();
    }

    /// Sets a property, keeping any index on that key consistent: the old
    /// entry (if present) is removed and the new one inserted.
    pub fn set_node_property(&mut self, id: NodeId, key: &str, value: impl Into<PropertyValue>) {
        let value = value.into();
        let node = match self.nodes.get_mut(&id) {
            Some(n) => n,
            None => panic!("node {} is not in this graph", id),
        };
        if let Some(ix) = self.index.node_property_index_mut(key) {
            if let Some(old) = node.properties.get(key) {
                ix.remove(&old.index_key(), id);
            }
            ix.add(&value.index_key(), id);
        }
        node.properties.insert(key.to_string(), value);
    }

    /// Removes a property; a no-op if the node does not have it.
    pub fn remove_node_property(&mut self, id: NodeId, key: &str) {
        let node = match self.nodes.get_mut(&id) {
            Some(n) => n,
            None => panic!("node {} is not in this graph", id),
        };
        if let Some(old) = node.properties.remove(key) {
            if let Some(ix) = self.index.node_property_index_mut(key) {
                ix.remove(&old.index_key(), id);
            }
        }
    }

    pub fn set_edge_property(&mut self, id: EdgeId, key: &str, value: impl Into<PropertyValue>) {
        let value = value.into();
        let edge = match self.edges.get_mut(&id) {
            Some(e) => e,
            None => panic!("edge {} is not in this graph", id),
        };
        if let Some(ix) = self.index.edge_property_index_mut(key) {
            if let Some(old) = edge.properties.get(key) {
                ix.remove(&old.index_key(), id);
            }
            ix.add(&value.index_key(), id);
        }
        edge.properties.insert(key.to_string(), value);
    }

    pub fn remove_edge_property(&mut self, id: EdgeId, key: &str) {
        let edge = match self.edges.get_mut(&id) {
            Some(e) => e,
            None => panic!("edge {} is not in this graph", id),
        };
        if let Some(old) = edge.properties.remove(key) {
            if let Some(ix) = self.index.edge_property_index_mut(key) {
                ix.remove(&old.index_key(), id);
            }
        }
    }

    /// Replaces a node's context set, updating the context index by diff.
    pub fn set_node_contexts(&mut self, id: NodeId, contexts: &StringSet) {
        let node = match self.nodes.get_mut(&id) {
            Some(n) => n,
            None => panic!("node {} is not in this graph", id),
        };
        let mut removed = Vec::new();
        let mut added = Vec::new();
        node.contexts.replace(
            contexts,
            |s| removed.push(s.to_string()),
            |s| added.push(s.to_string()),
        );
        for context in &removed {
            self.index.nodes_by_context.remove(context, id);
        }
        for context in &added {
            self.index.nodes_by_context.add(context, id);
        }
    }

    /// Replaces an edge's context set, updating the bare and both
    /// endpoint-scoped context indexes by diff.
    pub fn set_edge_contexts(&mut self, id: EdgeId, contexts: &StringSet) {
        let edge = match self.edges.get_mut(&id) {
            Some(e) => e,
            None => panic!("edge {} is not in this graph", id),
        };
        let (from, to) = (edge.from, edge.to);
        let mut removed = Vec::new();
        let mut added = Vec::new();
        edge.contexts.replace(
            contexts,
            |s| removed.push(s.to_string()),
            |s| added.push(s.to_string()),
        );
        for context in &removed {
            self.index.edges_by_context.remove(context, id);
            self.index
                .edges_from_context
                .remove(&context_key(from.as_u64(), context), id);
            self.index
                .edges_to_context
                .remove(&context_key(to.as_u64(), context), id);
        }
        for context in &added {
            self.index.edges_by_context.add(context, id);
            self.index
                .edges_from_context
                .add(&context_key(from.as_u64(), context), id);
            self.index
                .edges_to_context
                .add(&context_key(to.as_u64(), context), id);
        }
    }

    /// Relabels an edge. The edge is disconnected from its endpoints'
    /// adjacency, relabeled and reconnected, so it moves to the end of
    /// both adjacency orders.
    pub fn set_edge_label(&mut self, id: EdgeId, label: &str) {
        let (from, to, old) = match self.edges.get(&id) {
            Some(e) => (e.from, e.to, e.label.clone()),
            None => panic!("edge {} is not in this graph", id),
        };
        self.disconnect(id, from, to);
        self.index.edges_by_label.remove(&old, id);
        if let Some(edge) = self.edges.get_mut(&id) {
            edge.label = label.to_string();
        }
        self.index.edges_by_label.add(label, id);
        self.connect(id, from, to);
    }

    /// Removes an edge, detaching it from its endpoints and from every
    /// index.
    pub fn remove_edge(&mut self, id: EdgeId) {
        let edge = match self.edges.remove(&id) {
            Some(e) => e,
            None => panic!("edge {} is not in this graph", id),
        };
        self.disconnect(id, edge.from, edge.to);
        self.index.remove_edge(&edge);
    }

    /// Removes a node and every edge incident to it.
    pub fn detach_and_remove_node(&mut self, id: NodeId) {
        let incident: Vec<EdgeId> = match self.nodes.get(&id) {
            Some(node) => node.incoming_ids().chain(node.outgoing_ids()).collect(),
            None => panic!("node {} is not in this graph", id),
        };
        for edge_id in incident {
            // A self-loop shows up in both adjacency sets; it is gone
            // after the first removal.
            if let Some(edge) = self.edges.remove(&edge_id) {
                self.disconnect(edge_id, edge.from, edge.to);
                self.index.remove_edge(&edge);
            }
        }
        if let Some(node) = self.nodes.remove(&id) {
            self.index.remove_node(&node);
            debug!("detached and removed node {}", id);
        }
    }

    /// All nodes in creation order.
    pub fn nodes(&self) -> NodeIter<'_> {
        Box::new(self.nodes.values())
    }

    /// All edges in creation order.
    pub fn edges(&self) -> EdgeIter<'_> {
        Box::new(self.edges.values())
    }

    /// Edges incident to a node, in adjacency insertion order. `Any`
    /// yields outgoing then incoming; a self-loop appears in both.
    pub fn edges_of(&self, id: NodeId, dir: EdgeDir) -> EdgeIter<'_> {
        let node = match self.nodes.get(&id) {
            Some(n) => n,
            None => return Box::new(std::iter::empty()),
        };
        match dir {
            EdgeDir::Outgoing => {
                Box::new(node.outgoing_ids().filter_map(move |e| self.edges.get(&e)))
            }
            EdgeDir::Incoming => {
                Box::new(node.incoming_ids().filter_map(move |e| self.edges.get(&e)))
            }
            EdgeDir::Any => Box::new(
                node.outgoing_ids()
                    .chain(node.incoming_ids())
                    .filter_map(move |e| self.edges.get(&e)),
            ),
        }
    }

    /// Nodes whose label set is a superset of `labels`. The iterator's
    /// size hint is the size of the smallest matching label bucket.
    pub fn nodes_with_all_labels<'a>(&'a self, labels: &StringSet) -> NodeIter<'a> {
        Box::new(
            self.index
                .nodes_by_label
                .iter_all_labels(labels)
                .filter_map(move |id| self.nodes.get(&id)),
        )
    }

    /// Edges labeled with any of the given labels: the concatenation of
    /// the label buckets, in the label set's insertion order.
    pub fn edges_with_any_label<'a>(&'a self, labels: &StringSet) -> EdgeIter<'a> {
        let parts: Vec<Box<dyn Iterator<Item = EdgeId> + 'a>> = labels
            .iter()
            .map(|label| self.index.edges_by_label.find(label))
            .collect();
        Box::new(concat(parts).filter_map(move |id| self.edges.get(&id)))
    }

    /// Nodes that have the given property key. Uses the property index if
    /// one exists, otherwise filters a full scan.
    pub fn nodes_with_property<'a>(&'a self, key: &str) -> NodeIter<'a> {
        match self.index.node_property_index(key) {
            Some(ix) => Box::new(ix.value_iter().filter_map(move |id| self.nodes.get(&id))),
            None => {
                let key = key.to_string();
                Box::new(
                    self.nodes
                        .values()
                        .filter(move |n| n.properties.contains_key(&key)),
                )
            }
        }
    }

    /// Edges that have the given property key.
    pub fn edges_with_property<'a>(&'a self, key: &str) -> EdgeIter<'a> {
        match self.index.edge_property_index(key) {
            Some(ix) => Box::new(ix.value_iter().filter_map(move |id| self.edges.get(&id))),
            None => {
                let key = key.to_string();
                Box::new(
                    self.edges
                        .values()
                        .filter(move |e| e.properties.contains_key(&key)),
                )
            }
        }
    }

    /// Calls `handler` once for every node tagged with at least one of the
    /// contexts, deduplicated by id. Returning `false` stops the scan.
    pub fn process_nodes_with_any_context(
        &self,
        contexts: &StringSet,
        mut handler: impl FnMut(&Node) -> bool,
    ) {
        let mut seen = HashSet::new();
        for context in contexts.iter() {
            for id in self.index.nodes_by_context.find(context) {
                if seen.insert(id) {
                    if let Some(node) = self.nodes.get(&id) {
                        if !handler(node) {
                            return;
                        }
                    }
                }
            }
        }
    }

    /// Calls `handler` once for every edge tagged with at least one of the
    /// contexts, deduplicated by id. Returning `false` stops the scan.
    pub fn process_edges_with_any_context(
        &self,
        contexts: &StringSet,
        mut handler: impl FnMut(&Edge) -> bool,
    ) {
        let mut seen = HashSet::new();
        for context in contexts.iter() {
            for id in self.index.edges_by_context.find(context) {
                if seen.insert(id) {
                    if let Some(edge) = self.edges.get(&id) {
                        if !handler(edge) {
                            return;
                        }
                    }
                }
            }
        }
    }

    /// As [`Graph::process_edges_with_any_context`], restricted to edges
    /// touching `node` on the given side: `Incoming` scans edges ending at
    /// the node, `Outgoing` edges starting at it, `Any` both.
    pub fn process_node_edges_with_any_context(
        &self,
        node: NodeId,
        contexts: &StringSet,
        dir: EdgeDir,
        mut handler: impl FnMut(&Edge) -> bool,
    ) {
        let mut seen = HashSet::new();
        for context in contexts.iter() {
            let key = context_key(node.as_u64(), context);
            let ids: Box<dyn Iterator<Item = EdgeId> + '_> = match dir {
                EdgeDir::Incoming => self.index.edges_to_context.find(&key),
                EdgeDir::Outgoing => self.index.edges_from_context.find(&key),
                EdgeDir::Any => Box::new(
                    self.index
                        .edges_to_context
                        .find(&key)
                        .chain(self.index.edges_from_context.find(&key)),
                ),
            };
            for id in ids {
                if seen.insert(id) {
                    if let Some(edge) = self.edges.get(&id) {
                        if !handler(edge) {
                            return;
                        }
                    }
                }
            }
        }
    }

    /// Registers an index for the given node property and indexes every
    /// existing node. Idempotent; the structure is fixed at creation.
    pub fn add_node_property_index(&mut self, key: &str, kind: IndexKind) {
        self.index.add_node_property_index(key, kind, &self.nodes);
    }

    /// Registers an index for the given edge property. Idempotent.
    pub fn add_edge_property_index(&mut self, key: &str, kind: IndexKind) {
        self.index.add_edge_property_index(key, kind, &self.edges);
    }

    /// Finds nodes carrying all of `all_labels` with matching `properties`.
    ///
    /// The planner gathers one candidate iterator per constraint — the
    /// all-labels iterator and one index bucket per property — and scans
    /// the candidate with the smallest known result bound, re-checking
    /// every constraint on each node.
    ///
    /// With no constraint at all, the full node iterator is returned
    /// together with `Some(GraphError::NoFilter)` — an informational
    /// companion, not a failure. Filtering on an unindexed property is an
    /// `Err(GraphError::PropertyNotIndexed)`.
    ///
    /// A `Null` filter value matches a node missing that key.
    pub fn find_nodes<'a>(
        &'a self,
        all_labels: &'a StringSet,
        properties: &'a PropertyMap,
    ) -> Result<(NodeIter<'a>, Option<GraphError>), GraphError> {
        if all_labels.is_empty() && properties.is_empty() {
            return Ok((self.nodes(), Some(GraphError::NoFilter)));
        }

        let label_candidate: Option<(usize, NodeIter<'a>)> = if all_labels.is_empty() {
            None
        } else {
            let itr = self.nodes_with_all_labels(all_labels);
            let size = itr.size_hint().1;
            size.map(|s| (s, itr))
        };

        let mut property_candidate: Option<(usize, NodeIter<'a>)> = None;
        for (key, value) in properties {
            let ids = self
                .index
                .find_nodes_by_property(key, &value.index_key())?;
            if let Some(size) = ids.size_hint().1 {
                if property_candidate
                    .as_ref()
                    .map_or(true, |(best, _)| size < *best)
                {
                    let itr: NodeIter<'a> =
                        Box::new(ids.filter_map(move |id| self.nodes.get(&id)));
                    property_candidate = Some((size, itr));
                }
            }
        }

        // The label iterator wins unless a property bucket is strictly
        // smaller.
        let chosen = match (label_candidate, property_candidate) {
            (Some((ls, li)), Some((ps, pi))) => Some(if ps > ls { li } else { pi }),
            (Some((_, li)), None) => Some(li),
            (None, Some((_, pi))) => Some(pi),
            (None, None) => None,
        };
        let chosen = chosen.ok_or(GraphError::NothingFound)?;
        let filter = node_filter(all_labels, properties);
        Ok((Box::new(chosen.filter(move |n| filter(n))), None))
    }

    /// Finds edges with the given label and matching `properties`. `None`
    /// means no label constraint. Same planning and error shape as
    /// [`Graph::find_nodes`].
    pub fn find_edges<'a>(
        &'a self,
        label: Option<&'a str>,
        properties: &'a PropertyMap,
    ) -> Result<(EdgeIter<'a>, Option<GraphError>), GraphError> {
        let label = label.filter(|l| !l.is_empty());
        if label.is_none() && properties.is_empty() {
            return Ok((self.edges(), Some(GraphError::NoFilter)));
        }

        let label_candidate: Option<(usize, EdgeIter<'a>)> = match label {
            None => None,
            Some(l) => {
                let ids = self.index.edges_by_label.find(l);
                let size = ids.size_hint().1;
                size.map(|s| {
                    let itr: EdgeIter<'a> =
                        Box::new(ids.filter_map(move |id| self.edges.get(&id)));
                    (s, itr)
                })
            }
        };

        let mut property_candidate: Option<(usize, EdgeIter<'a>)> = None;
        for (key, value) in properties {
            let ids = self
                .index
                .find_edges_by_property(key, &value.index_key())?;
            if let Some(size) = ids.size_hint().1 {
                if property_candidate
                    .as_ref()
                    .map_or(true, |(best, _)| size < *best)
                {
                    let itr: EdgeIter<'a> =
                        Box::new(ids.filter_map(move |id| self.edges.get(&id)));
                    property_candidate = Some((size, itr));
                }
            }
        }

        let chosen = match (label_candidate, property_candidate) {
            (Some((ls, li)), Some((ps, pi))) => Some(if ps > ls { li } else { pi }),
            (Some((_, li)), None) => Some(li),
            (None, Some((_, pi))) => Some(pi),
            (None, None) => None,
        };
        let chosen = chosen.ok_or(GraphError::NothingFound)?;
        let filter = edge_filter(label, properties);
        Ok((Box::new(chosen.filter(move |e| filter(e))), None))
    }
}

/// Value equality with the comparator panic trap: a panic inside a
/// user-supplied opaque comparator counts as "not equal" so the outer
/// iteration keeps its forward progress.
fn values_equal(a: &PropertyValue, b: &PropertyValue) -> bool {
    catch_unwind(AssertUnwindSafe(|| a == b)).unwrap_or(false)
}

fn property_filter<'a>(
    properties: &'a PropertyMap,
) -> impl Fn(&PropertyMap) -> bool + 'a {
    move |actual| {
        properties.iter().all(|(key, value)| match actual.get(key) {
            None => value.is_null(),
            Some(found) => values_equal(value, found),
        })
    }
}

fn node_filter<'a>(
    labels: &'a StringSet,
    properties: &'a PropertyMap,
) -> impl Fn(&Node) -> bool + 'a {
    let props_ok = property_filter(properties);
    move |node| {
        if !labels.is_empty() && !node.labels().has_all_set(labels) {
            return false;
        }
        props_ok(node.properties())
    }
}

fn edge_filter<'a>(
    label: Option<&'a str>,
    properties: &'a PropertyMap,
) -> impl Fn(&Edge) -> bool + 'a {
    let props_ok = property_filter(properties);
    move |edge| {
        if let Some(l) = label {
            if edge.label() != l {
                return false;
            }
        }
        props_ok(edge.properties())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_graph_is_empty() {
        let g = Graph::new();
        assert_eq!(g.num_nodes(), 0);
        assert_eq!(g.num_edges(), 0);
        assert_eq!(g.nodes().count(), 0);
        assert_eq!(g.edges().count(), 0);
    }

    #[test]
    fn test_ids_are_shared_and_monotonic() {
        let mut g = Graph::new();
        let a = g.new_node(&["a"], None, None);
        let b = g.new_node(&["b"], None, None);
        let e = g.new_edge(a, b, "x", None, None);
        let c = g.new_node(&["c"], None, None);

        assert_eq!(a.as_u64(), 0);
        assert_eq!(b.as_u64(), 1);
        assert_eq!(e.as_u64(), 2);
        assert_eq!(c.as_u64(), 3);
    }

    #[test]
    #[should_panic(expected = "is not in this graph")]
    fn test_foreign_endpoint_panics() {
        let mut g = Graph::new();
        let mut other = Graph::new();
        let a = g.new_node(&["a"], None, None);
        let _b = other.new_node(&["b"], None, None);
        // A handle minted by `other` does not exist in `g`.
        let foreign = NodeId::new(77);
        g.new_edge(a, foreign, "x", None, None);
    }

    #[test]
    fn test_adjacency_order() {
        let mut g = Graph::new();
        let hub = g.new_node(&["hub"], None, None);
        let mut expected = Vec::new();
        for i in 0..5 {
            let n = g.new_node(&[], None, None);
            expected.push(g.new_edge(hub, n, &format!("e{}", i), None, None));
        }
        let out: Vec<_> = g.edges_of(hub, EdgeDir::Outgoing).map(Edge::id).collect();
        assert_eq!(out, expected);
        assert_eq!(g.edges_of(hub, EdgeDir::Incoming).count(), 0);
        assert_eq!(g.edges_of(hub, EdgeDir::Any).count(), 5);
    }

    #[test]
    fn test_set_edge_label_keeps_adjacency() {
        let mut g = Graph::new();
        let a = g.new_node(&[], None, None);
        let b = g.new_node(&[], None, None);
        let e1 = g.new_edge(a, b, "one", None, None);
        let e2 = g.new_edge(a, b, "two", None, None);

        g.set_edge_label(e1, "three");
        assert_eq!(g.edge(e1).unwrap().label(), "three");

        // The relabeled edge reconnects at the back of the adjacency.
        let out: Vec<_> = g.edges_of(a, EdgeDir::Outgoing).map(Edge::id).collect();
        assert_eq!(out, vec![e2, e1]);

        let by_label: Vec<_> = g
            .edges_with_any_label(&StringSet::of(["three"]))
            .map(Edge::id)
            .collect();
        assert_eq!(by_label, vec![e1]);
        assert_eq!(g.edges_with_any_label(&StringSet::of(["one"])).count(), 0);
    }

    #[test]
    fn test_property_updates_follow_index() {
        let mut g = Graph::new();
        g.add_node_property_index("k", IndexKind::Btree);
        let n = g.new_node(&["a"], None, None);
        g.set_node_property(n, "k", "v1");

        let props = PropertyMap::from([("k".to_string(), PropertyValue::from("v1"))]);
        let labels = StringSet::new();
        let (found, warn) = g.find_nodes(&labels, &props).unwrap();
        assert!(warn.is_none());
        assert_eq!(found.count(), 1);

        g.set_node_property(n, "k", "v2");
        let (found, _) = g.find_nodes(&labels, &props).unwrap();
        assert_eq!(found.count(), 0);

        g.remove_node_property(n, "k");
        let props2 = PropertyMap::from([("k".to_string(), PropertyValue::from("v2"))]);
        let (found, _) = g.find_nodes(&labels, &props2).unwrap();
        assert_eq!(found.count(), 0);
    }

    #[test]
    fn test_nodes_with_property_without_index() {
        let mut g = Graph::new();
        let props = PropertyMap::from([("p".to_string(), PropertyValue::from(1i64))]);
        g.new_node(&["a"], Some(&props), None);
        g.new_node(&["b"], None, None);

        let with: Vec<_> = g.nodes_with_property("p").map(Node::id).collect();
        assert_eq!(with.len(), 1);
    }

    #[test]
    fn test_null_filter_matches_missing_property() {
        let mut g = Graph::new();
        g.add_node_property_index("k", IndexKind::Btree);
        // Two nodes with an explicit null make the "null" bucket larger
        // than the "only" label bucket, so the label candidate drives the
        // scan and the filter sees the missing key.
        let null_props = PropertyMap::from([("k".to_string(), PropertyValue::Null)]);
        g.new_node(&["a"], Some(&null_props), None);
        g.new_node(&["a"], Some(&null_props), None);
        g.new_node(&["only"], None, None);

        let labels = StringSet::of(["only"]);
        let filter = PropertyMap::from([("k".to_string(), PropertyValue::Null)]);
        let (found, _) = g.find_nodes(&labels, &filter).unwrap();
        assert_eq!(found.count(), 1);
    }
}
