//! Variable-length path enumeration.
//!
//! Paths may revisit nodes, so a cutoff is needed to terminate on cyclic
//! graphs. The rule used here: a candidate edge whose target node `T`
//! already occurs at least twice in the path is rejected iff the edge
//! segment walked since the last occurrence of `T`, extended with the
//! candidate, is identical to the segment between the previous two
//! occurrences of `T`. A path may therefore traverse any cycle once, but
//! never repeat the same loop back to back.

use crate::graph::{Edge, EdgeDir, EdgeId, Graph, NodeId};

/// Enumerates paths starting at `from` whose first edge comes from
/// `first_leg` and whose subsequent edges are drawn from the current
/// endpoint's adjacency in direction `dir`, filtered by `edge_filter`.
///
/// `accumulator` is called with a copy of the edge slice and the path's
/// end node for every path whose edge count lies within `min..=max`
/// (`None` = unbounded); returning `false` halts the enumeration.
///
/// Direction semantics per step: `Outgoing` continues at the edge's `to`
/// node, `Incoming` at its `from` node, and `Any` at whichever endpoint is
/// not the current node.
pub fn collect_all_paths<'g, I, F, A>(
    graph: &'g Graph,
    from: NodeId,
    first_leg: I,
    edge_filter: F,
    dir: EdgeDir,
    min: Option<usize>,
    max: Option<usize>,
    accumulator: A,
) where
    I: Iterator<Item = &'g Edge>,
    F: FnMut(&Edge) -> bool,
    A: FnMut(Vec<EdgeId>, NodeId) -> bool,
{
    let mut walker = Walker {
        graph,
        dir,
        min,
        max,
        edge_filter,
        accumulator,
    };
    for edge in first_leg {
        let target = step_target(edge, from, dir);
        let mut edges = vec![edge.id()];
        let mut nodes = vec![from, target];
        if !walker.recurse(&mut edges, &mut nodes) {
            break;
        }
    }
}

/// The node a path continues from after walking `edge` out of `at`.
fn step_target(edge: &Edge, at: NodeId, dir: EdgeDir) -> NodeId {
    match dir {
        EdgeDir::Outgoing => edge.to(),
        EdgeDir::Incoming => edge.from(),
        EdgeDir::Any => edge.other_endpoint(at),
    }
}

struct Walker<'g, F, A> {
    graph: &'g Graph,
    dir: EdgeDir,
    min: Option<usize>,
    max: Option<usize>,
    edge_filter: F,
    accumulator: A,
}

impl<'g, F, A> Walker<'g, F, A>
where
    F: FnMut(&Edge) -> bool,
    A: FnMut(Vec<EdgeId>, NodeId) -> bool,
{
    /// Emits the current prefix if it is within bounds, then extends it
    /// edge by edge. Returns `false` when the accumulator asked to stop.
    fn recurse(&mut self, edges: &mut Vec<EdgeId>, nodes: &mut Vec<NodeId>) -> bool {
        let end = nodes[nodes.len() - 1];
        let len = edges.len();

        if self.min.map_or(true, |m| len >= m) && self.max.map_or(true, |m| len <= m) {
            if !(self.accumulator)(edges.clone(), end) {
                return false;
            }
        }
        if let Some(m) = self.max {
            if len >= m {
                return true;
            }
        }

        let graph = self.graph;
        let dir = self.dir;
        let mut next = Vec::new();
        for edge in graph.edges_of(end, dir) {
            if (self.edge_filter)(edge) {
                next.push((edge.id(), step_target(edge, end, dir)));
            }
        }
        for (edge_id, target) in next {
            if repeats_loop(nodes, edges, edge_id, target) {
                continue;
            }
            edges.push(edge_id);
            nodes.push(target);
            let keep_going = self.recurse(edges, nodes);
            edges.pop();
            nodes.pop();
            if !keep_going {
                return false;
            }
        }
        true
    }
}

/// True when appending `candidate` (targeting `target`) would walk the
/// same loop through `target` a second consecutive time.
fn repeats_loop(nodes: &[NodeId], edges: &[EdgeId], candidate: EdgeId, target: NodeId) -> bool {
    let mut last = None;
    let mut previous = None;
    for (i, n) in nodes.iter().enumerate() {
        if *n == target {
            previous = last;
            last = Some(i);
        }
    }
    let (previous, last) = match (previous, last) {
        (Some(p), Some(l)) => (p, l),
        _ => return false,
    };
    // Segment of the earlier loop vs the segment being closed now.
    let earlier = &edges[previous..last];
    let current = &edges[last..];
    if earlier.len() != current.len() + 1 {
        return false;
    }
    current == &earlier[..current.len()] && earlier[earlier.len() - 1] == candidate
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_repeats_loop_detects_exact_repetition() {
        let n = |v| NodeId::new(v);
        let e = |v| EdgeId::new(v);
        // Path A -e1-> B -e2-> C -e3-> A -e1-> B -e2-> C, candidate e3
        // closing the second identical loop at A.
        let nodes = [n(0), n(1), n(2), n(0), n(1), n(2)];
        let edges = [e(10), e(11), e(12), e(10), e(11)];
        assert!(repeats_loop(&nodes, &edges, e(12), n(0)));
        // A different closing edge is a different loop.
        assert!(!repeats_loop(&nodes, &edges, e(99), n(0)));
    }

    #[test]
    fn test_first_revisit_is_allowed() {
        let n = |v| NodeId::new(v);
        let e = |v| EdgeId::new(v);
        // Path A -e1-> B -e2-> C, candidate e3 closing the first loop.
        let nodes = [n(0), n(1), n(2)];
        let edges = [e(10), e(11)];
        assert!(!repeats_loop(&nodes, &edges, e(12), n(0)));
    }
}
