//! Graph cloning and isomorphism checking.

use crate::graph::{Edge, EdgeDir, EdgeId, Graph, Node, NodeId, PropertyMap, PropertyValue};
use std::collections::HashMap;

/// Clones every node and edge of `source` into `target`, passing each
/// property value through `clone_property`. Returns the mapping from
/// source node ids to their clones.
///
/// Nodes and edges are cloned in creation order, so the target graph
/// iterates in the same order as the source and the two graphs are
/// isomorphic (under property equality modulo `clone_property`).
pub fn copy_graph<F>(
    source: &Graph,
    target: &mut Graph,
    mut clone_property: F,
) -> HashMap<NodeId, NodeId>
where
    F: FnMut(&str, &PropertyValue) -> PropertyValue,
{
    let mut node_map = HashMap::new();
    for node in source.nodes() {
        let properties: PropertyMap = node
            .properties()
            .iter()
            .map(|(k, v)| (k.clone(), clone_property(k, v)))
            .collect();
        let clone =
            target.fast_new_node(node.labels().clone(), properties, node.contexts().clone());
        node_map.insert(node.id(), clone);
    }
    for edge in source.edges() {
        let properties: PropertyMap = edge
            .properties()
            .iter()
            .map(|(k, v)| (k.clone(), clone_property(k, v)))
            .collect();
        target.fast_new_edge(
            node_map[&edge.from()],
            node_map[&edge.to()],
            edge.label().to_string(),
            properties,
            edge.contexts().clone(),
        );
    }
    node_map
}

/// Decides whether a bijection exists between the nodes of `source` and
/// `target` such that `node_equiv` holds for every matched pair and every
/// source edge corresponds to exactly one target edge between the images
/// of its endpoints satisfying `edge_equiv`.
///
/// Backtracking search, pruned by degree, by `node_equiv`, and by the edge
/// multiplicities between each tentative pair and the nodes already
/// matched. Intended for the graph sizes this engine targets, not for
/// large-scale isomorphism problems.
pub fn check_isomorphism<N, E>(source: &Graph, target: &Graph, node_equiv: N, edge_equiv: E) -> bool
where
    N: Fn(&Node, &Node) -> bool,
    E: Fn(&Edge, &Edge) -> bool,
{
    if source.num_nodes() != target.num_nodes() || source.num_edges() != target.num_edges() {
        return false;
    }
    if source.num_nodes() == 0 {
        return true;
    }

    let source_nodes: Vec<&Node> = source.nodes().collect();
    let target_nodes: Vec<&Node> = target.nodes().collect();

    // Candidate target positions per source node, pruned by equivalence
    // and degree.
    let mut candidates: Vec<Vec<usize>> = Vec::with_capacity(source_nodes.len());
    for sn in &source_nodes {
        let mut row = Vec::new();
        for (j, tn) in target_nodes.iter().enumerate() {
            if sn.degree(EdgeDir::Incoming) == tn.degree(EdgeDir::Incoming)
                && sn.degree(EdgeDir::Outgoing) == tn.degree(EdgeDir::Outgoing)
                && node_equiv(sn, tn)
            {
                row.push(j);
            }
        }
        if row.is_empty() {
            return false;
        }
        candidates.push(row);
    }

    // Assign the most constrained nodes first.
    let mut order: Vec<usize> = (0..source_nodes.len()).collect();
    order.sort_by_key(|&i| candidates[i].len());

    let mut source_counts: HashMap<(NodeId, NodeId), usize> = HashMap::new();
    for edge in source.edges() {
        *source_counts.entry((edge.from(), edge.to())).or_default() += 1;
    }
    let mut target_counts: HashMap<(NodeId, NodeId), usize> = HashMap::new();
    let mut target_edges: HashMap<(NodeId, NodeId), Vec<EdgeId>> = HashMap::new();
    for edge in target.edges() {
        *target_counts.entry((edge.from(), edge.to())).or_default() += 1;
        target_edges
            .entry((edge.from(), edge.to()))
            .or_default()
            .push(edge.id());
    }

    let matcher = Matcher {
        source,
        target,
        source_nodes,
        target_nodes,
        candidates,
        order,
        source_counts,
        target_counts,
        target_edges,
        edge_equiv,
    };
    let mut assignment = vec![None; matcher.source_nodes.len()];
    let mut used = vec![false; matcher.target_nodes.len()];
    matcher.assign(&mut assignment, &mut used, 0)
}

struct Matcher<'s, 't, E> {
    source: &'s Graph,
    target: &'t Graph,
    source_nodes: Vec<&'s Node>,
    target_nodes: Vec<&'t Node>,
    candidates: Vec<Vec<usize>>,
    order: Vec<usize>,
    source_counts: HashMap<(NodeId, NodeId), usize>,
    target_counts: HashMap<(NodeId, NodeId), usize>,
    target_edges: HashMap<(NodeId, NodeId), Vec<EdgeId>>,
    edge_equiv: E,
}

impl<E> Matcher<'_, '_, E>
where
    E: Fn(&Edge, &Edge) -> bool,
{
    fn assign(&self, assignment: &mut [Option<usize>], used: &mut [bool], depth: usize) -> bool {
        if depth == self.order.len() {
            return self.edges_correspond(assignment);
        }
        let i = self.order[depth];
        for &j in &self.candidates[i] {
            if used[j] {
                continue;
            }
            assignment[i] = Some(j);
            used[j] = true;
            if self.consistent_so_far(assignment, depth, i, j)
                && self.assign(assignment, used, depth + 1)
            {
                return true;
            }
            assignment[i] = None;
            used[j] = false;
        }
        false
    }

    /// Edge multiplicities between the new pair and everything already
    /// assigned (including self-loops) must agree in both directions.
    fn consistent_so_far(
        &self,
        assignment: &[Option<usize>],
        depth: usize,
        i: usize,
        j: usize,
    ) -> bool {
        let count =
            |m: &HashMap<(NodeId, NodeId), usize>, a, b| m.get(&(a, b)).copied().unwrap_or(0);
        let si = self.source_nodes[i].id();
        let tj = self.target_nodes[j].id();
        if count(&self.source_counts, si, si) != count(&self.target_counts, tj, tj) {
            return false;
        }
        for d in 0..depth {
            let u = self.order[d];
            let tu = match assignment[u] {
                Some(p) => self.target_nodes[p].id(),
                None => continue,
            };
            let su = self.source_nodes[u].id();
            if count(&self.source_counts, si, su) != count(&self.target_counts, tj, tu)
                || count(&self.source_counts, su, si) != count(&self.target_counts, tu, tj)
            {
                return false;
            }
        }
        true
    }

    fn edges_correspond(&self, assignment: &[Option<usize>]) -> bool {
        let mut position: HashMap<NodeId, usize> = HashMap::new();
        for (i, node) in self.source_nodes.iter().enumerate() {
            position.insert(node.id(), i);
        }
        let image = |id: NodeId| -> Option<NodeId> {
            position
                .get(&id)
                .and_then(|&i| assignment[i])
                .map(|j| self.target_nodes[j].id())
        };
        for edge in self.source.edges() {
            let (from_image, to_image) = match (image(edge.from()), image(edge.to())) {
                (Some(f), Some(t)) => (f, t),
                _ => return false,
            };
            let between = match self.target_edges.get(&(from_image, to_image)) {
                Some(ids) => ids,
                None => return false,
            };
            let matching = between
                .iter()
                .filter_map(|id| self.target.edge(*id))
                .filter(|te| (self.edge_equiv)(edge, te))
                .count();
            if matching != 1 {
                return false;
            }
        }
        true
    }
}
