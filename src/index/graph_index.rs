//! Aggregate of all secondary indexes kept on a graph.

use super::{new_value_index, BtreeIndex, IndexKind, NodeMap, ValueIndex};
use crate::error::GraphError;
use crate::graph::{Edge, EdgeId, Node, NodeId};
use crate::sets::FastMap;
use std::collections::HashMap;
use tracing::debug;

/// Index key scoping an edge context to one endpoint.
pub(crate) fn context_key(endpoint: u64, context: &str) -> String {
    format!("{}{}", endpoint, context)
}

/// All secondary indexes of one graph.
///
/// Every mutation path of the graph goes through the `add_*`/`remove_*`
/// hooks here (or through the per-field diff updates in the graph façade)
/// so that labels, contexts and indexed properties stay consistent with
/// the entities.
#[derive(Debug, Default)]
pub(crate) struct GraphIndex {
    pub(crate) nodes_by_label: NodeMap,
    pub(crate) nodes_by_context: BtreeIndex<NodeId>,
    pub(crate) edges_by_label: BtreeIndex<EdgeId>,
    pub(crate) edges_by_context: BtreeIndex<EdgeId>,
    pub(crate) edges_from_context: BtreeIndex<EdgeId>,
    pub(crate) edges_to_context: BtreeIndex<EdgeId>,
    node_properties: HashMap<String, Box<dyn ValueIndex<NodeId>>>,
    edge_properties: HashMap<String, Box<dyn ValueIndex<EdgeId>>>,
}

impl GraphIndex {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn add_node(&mut self, node: &Node) {
        self.nodes_by_label.add(node.id(), node.labels());
        for context in node.contexts().iter() {
            self.nodes_by_context.add(context, node.id());
        }
        for (key, value) in node.properties() {
            if let Some(ix) = self.node_properties.get_mut(key) {
                ix.add(&value.index_key(), node.id());
            }
        }
    }

    pub(crate) fn remove_node(&mut self, node: &Node) {
        self.nodes_by_label.remove(node.id(), node.labels());
        for context in node.contexts().iter() {
            self.nodes_by_context.remove(context, node.id());
        }
        for (key, value) in node.properties() {
            if let Some(ix) = self.node_properties.get_mut(key) {
                ix.remove(&value.index_key(), node.id());
            }
        }
    }

    pub(crate) fn add_edge(&mut self, edge: &Edge) {
        self.edges_by_label.add(edge.label(), edge.id());
        for context in edge.contexts().iter() {
            self.edges_by_context.add(context, edge.id());
            self.edges_from_context
                .add(&context_key(edge.from().as_u64(), context), edge.id());
            self.edges_to_context
                .add(&context_key(edge.to().as_u64(), context), edge.id());
        }
        for (key, value) in edge.properties() {
            if let Some(ix) = self.edge_properties.get_mut(key) {
                ix.add(&value.index_key(), edge.id());
            }
        }
    }

    pub(crate) fn remove_edge(&mut self, edge: &Edge) {
        self.edges_by_label.remove(edge.label(), edge.id());
        for context in edge.contexts().iter() {
            self.edges_by_context.remove(context, edge.id());
            self.edges_from_context
                .remove(&context_key(edge.from().as_u64(), context), edge.id());
            self.edges_to_context
                .remove(&context_key(edge.to().as_u64(), context), edge.id());
        }
        for (key, value) in edge.properties() {
            if let Some(ix) = self.edge_properties.get_mut(key) {
                ix.remove(&value.index_key(), edge.id());
            }
        }
    }

    /// Creates an index for the given node property unless one already
    /// exists, then indexes every current node. The backing structure is
    /// fixed at creation.
    pub(crate) fn add_node_property_index(
        &mut self,
        key: &str,
        kind: IndexKind,
        nodes: &FastMap<NodeId, Node>,
    ) {
        if self.node_properties.contains_key(key) {
            return;
        }
        let mut ix = new_value_index(kind);
        let mut indexed = 0usize;
        for (id, node) in nodes.iter() {
            if let Some(value) = node.properties().get(key) {
                ix.add(&value.index_key(), *id);
                indexed += 1;
            }
        }
        debug!("indexed {} nodes under property {}", indexed, key);
        self.node_properties.insert(key.to_string(), ix);
    }

    pub(crate) fn add_edge_property_index(
        &mut self,
        key: &str,
        kind: IndexKind,
        edges: &FastMap<EdgeId, Edge>,
    ) {
        if self.edge_properties.contains_key(key) {
            return;
        }
        let mut ix = new_value_index(kind);
        let mut indexed = 0usize;
        for (id, edge) in edges.iter() {
            if let Some(value) = edge.properties().get(key) {
                ix.add(&value.index_key(), *id);
                indexed += 1;
            }
        }
        debug!("indexed {} edges under property {}", indexed, key);
        self.edge_properties.insert(key.to_string(), ix);
    }

    pub(crate) fn node_property_index(&self, key: &str) -> Option<&dyn ValueIndex<NodeId>> {
        self.node_properties.get(key).map(Box::as_ref)
    }

    pub(crate) fn node_property_index_mut(
        &mut self,
        key: &str,
    ) -> Option<&mut (dyn ValueIndex<NodeId> + 'static)> {
        self.node_properties.get_mut(key).map(Box::as_mut)
    }

    pub(crate) fn edge_property_index(&self, key: &str) -> Option<&dyn ValueIndex<EdgeId>> {
        self.edge_properties.get(key).map(Box::as_ref)
    }

    pub(crate) fn edge_property_index_mut(
        &mut self,
        key: &str,
    ) -> Option<&mut (dyn ValueIndex<EdgeId> + 'static)> {
        self.edge_properties.get_mut(key).map(Box::as_mut)
    }

    /// The bucket iterator for an indexed node property value, or an error
    /// naming the missing index.
    pub(crate) fn find_nodes_by_property<'a>(
        &'a self,
        key: &str,
        value: &str,
    ) -> Result<Box<dyn Iterator<Item = NodeId> + 'a>, GraphError> {
        match self.node_properties.get(key) {
            Some(ix) => Ok(ix.find(value)),
            None => Err(GraphError::PropertyNotIndexed(key.to_string())),
        }
    }

    pub(crate) fn find_edges_by_property<'a>(
        &'a self,
        key: &str,
        value: &str,
    ) -> Result<Box<dyn Iterator<Item = EdgeId> + 'a>, GraphError> {
        match self.edge_properties.get(key) {
            Some(ix) => Ok(ix.find(value)),
            None => Err(GraphError::PropertyNotIndexed(key.to_string())),
        }
    }
}
