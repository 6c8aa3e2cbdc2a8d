//! Graph lifecycle, context and label scenarios.

use propgraph::{EdgeDir, Graph, Node, StringSet};

fn chain(graph: &mut Graph, n: usize) -> Vec<propgraph::NodeId> {
    let mut nodes = Vec::new();
    for i in 0..n {
        nodes.push(graph.new_node(&[&i.to_string()], None, None));
    }
    for i in 0..n - 1 {
        graph.new_edge(nodes[i], nodes[i + 1], "e", None, None);
    }
    nodes
}

#[test]
fn test_graph_crud() {
    let mut g = Graph::new();
    let nodes = chain(&mut g, 10);

    assert_eq!(g.nodes().count(), 10);
    assert_eq!(g.num_nodes(), 10);
    assert_eq!(g.num_edges(), 9);

    g.detach_and_remove_node(nodes[2]);

    assert_eq!(g.nodes().count(), 9);
    assert_eq!(g.num_nodes(), 9);
    // Both edges touching the detached node are gone.
    assert_eq!(g.num_edges(), 7);
    assert!(g.node(nodes[2]).is_none());
    for edge in g.edges() {
        assert_ne!(edge.from(), nodes[2]);
        assert_ne!(edge.to(), nodes[2]);
    }
}

#[test]
fn test_edge_contexts() {
    let mut g = Graph::new();
    let mut nodes = Vec::new();
    for i in 0..10 {
        nodes.push(g.new_node(&[&i.to_string()], None, None));
    }
    for i in 0..7 {
        g.new_edge(
            nodes[i],
            nodes[i + 1],
            "e",
            None,
            Some(&StringSet::of(["default", "whatever"])),
        );
    }
    g.new_edge(
        nodes[7],
        nodes[8],
        "e",
        None,
        Some(&StringSet::of(["something", "whatever"])),
    );

    let mut edges = Vec::new();
    g.process_edges_with_any_context(&StringSet::of(["something"]), |e| {
        edges.push(e.id());
        true
    });
    assert_eq!(edges.len(), 1);

    let mut edges = Vec::new();
    g.process_edges_with_any_context(&StringSet::of(["default", "whatever"]), |e| {
        edges.push(e.id());
        true
    });
    // Each edge is visited once even though most carry both contexts.
    assert_eq!(edges.len(), 8);

    let mut edges = Vec::new();
    g.process_edges_with_any_context(&StringSet::of(["default"]), |e| {
        edges.push(e.id());
        true
    });
    assert_eq!(edges.len(), 7);
}

#[test]
fn test_node_contexts() {
    let mut g = Graph::new();
    let a = g.new_node(&["a"], None, Some(&StringSet::of(["red", "blue"])));
    let b = g.new_node(&["b"], None, Some(&StringSet::of(["red"])));
    let _c = g.new_node(&["c"], None, None);

    let mut seen = Vec::new();
    g.process_nodes_with_any_context(&StringSet::of(["red", "blue"]), |n| {
        seen.push(n.id());
        true
    });
    assert_eq!(seen, vec![a, b]);

    // Replacing contexts moves the node across buckets.
    g.set_node_contexts(a, &StringSet::of(["green"]));
    let mut seen = Vec::new();
    g.process_nodes_with_any_context(&StringSet::of(["red", "blue"]), |n| {
        seen.push(n.id());
        true
    });
    assert_eq!(seen, vec![b]);

    let mut seen = Vec::new();
    g.process_nodes_with_any_context(&StringSet::of(["green"]), |n| {
        seen.push(n.id());
        true
    });
    assert_eq!(seen, vec![a]);
}

#[test]
fn test_edge_context_update() {
    let mut g = Graph::new();
    let a = g.new_node(&["a"], None, None);
    let b = g.new_node(&["b"], None, None);
    let e = g.new_edge(a, b, "e", None, Some(&StringSet::of(["old"])));

    g.set_edge_contexts(e, &StringSet::of(["new"]));

    let mut seen = Vec::new();
    g.process_edges_with_any_context(&StringSet::of(["old"]), |edge| {
        seen.push(edge.id());
        true
    });
    assert!(seen.is_empty());

    // The endpoint-scoped scan agrees on both sides.
    let mut seen = Vec::new();
    g.process_node_edges_with_any_context(a, &StringSet::of(["new"]), EdgeDir::Outgoing, |edge| {
        seen.push(edge.id());
        true
    });
    assert_eq!(seen, vec![e]);

    let mut seen = Vec::new();
    g.process_node_edges_with_any_context(b, &StringSet::of(["new"]), EdgeDir::Incoming, |edge| {
        seen.push(edge.id());
        true
    });
    assert_eq!(seen, vec![e]);

    let mut seen = Vec::new();
    g.process_node_edges_with_any_context(b, &StringSet::of(["new"]), EdgeDir::Outgoing, |edge| {
        seen.push(edge.id());
        true
    });
    assert!(seen.is_empty());
}

#[test]
fn test_context_scan_stops_on_false() {
    let mut g = Graph::new();
    let contexts = StringSet::of(["c"]);
    for i in 0..5 {
        g.new_node(&[&i.to_string()], None, Some(&contexts));
    }
    let mut visited = 0;
    g.process_nodes_with_any_context(&contexts, |_| {
        visited += 1;
        visited < 2
    });
    assert_eq!(visited, 2);
}

#[test]
fn test_edges_with_any_label() {
    let mut g = Graph::new();
    let mut nodes = Vec::new();
    for i in 0..10 {
        nodes.push(g.new_node(&[&i.to_string()], None, None));
    }
    for i in 0..8 {
        g.new_edge(nodes[i], nodes[i + 1], "edge", None, None);
    }
    for i in 0..8 {
        g.new_edge(nodes[i], nodes[i + 1], "other", None, None);
    }

    let others: Vec<&propgraph::Edge> =
        g.edges_with_any_label(&StringSet::of(["other"])).collect();
    assert_eq!(others.len(), 8);
    assert!(others.iter().all(|e| e.label() == "other"));

    let both = g.edges_with_any_label(&StringSet::of(["edge", "other"]));
    assert_eq!(both.count(), 16);

    assert_eq!(g.edges_with_any_label(&StringSet::of(["none"])).count(), 0);
}

#[test]
fn test_set_node_labels_rebinds_index() {
    let mut g = Graph::new();
    let n = g.new_node(&["a", "b"], None, None);
    let other = g.new_node(&["a"], None, None);

    g.set_node_labels(n, &StringSet::of(["b", "c"]));

    let by = |label: &str, g: &Graph| -> Vec<propgraph::NodeId> {
        g.nodes_with_all_labels(&StringSet::of([label]))
            .map(Node::id)
            .collect()
    };
    assert_eq!(by("a", &g), vec![other]);
    assert_eq!(by("b", &g), vec![n]);
    assert_eq!(by("c", &g), vec![n]);
    assert_eq!(g.node(n).unwrap().labels(), &StringSet::of(["b", "c"]));
}

#[test]
fn test_remove_edge_cleans_everything() {
    let mut g = Graph::new();
    let a = g.new_node(&["a"], None, None);
    let b = g.new_node(&["b"], None, None);
    let e = g.new_edge(a, b, "x", None, Some(&StringSet::of(["ctx"])));

    g.remove_edge(e);

    assert_eq!(g.num_edges(), 0);
    assert!(g.edge(e).is_none());
    assert_eq!(g.edges_of(a, EdgeDir::Any).count(), 0);
    assert_eq!(g.edges_of(b, EdgeDir::Any).count(), 0);
    assert_eq!(g.edges_with_any_label(&StringSet::of(["x"])).count(), 0);
    let mut seen = 0;
    g.process_edges_with_any_context(&StringSet::of(["ctx"]), |_| {
        seen += 1;
        true
    });
    assert_eq!(seen, 0);
}

#[test]
fn test_nodes_iterate_in_creation_order() {
    let mut g = Graph::new();
    let ids = chain(&mut g, 6);
    let listed: Vec<_> = g.nodes().map(Node::id).collect();
    assert_eq!(listed, ids);

    g.detach_and_remove_node(ids[0]);
    let listed: Vec<_> = g.nodes().map(Node::id).collect();
    assert_eq!(listed, ids[1..].to_vec());
}

#[test]
fn test_edge_property_updates_follow_index() {
    let mut g = Graph::new();
    g.add_edge_property_index("w", propgraph::IndexKind::Hash);
    let a = g.new_node(&["a"], None, None);
    let b = g.new_node(&["b"], None, None);
    let e = g.new_edge(a, b, "x", None, None);

    g.set_edge_property(e, "w", 5i64);
    let filter = propgraph::PropertyMap::from([(
        "w".to_string(),
        propgraph::PropertyValue::from(5i64),
    )]);
    let (found, _) = g.find_edges(None, &filter).unwrap();
    assert_eq!(found.count(), 1);

    assert_eq!(g.edges_with_property("w").count(), 1);

    g.remove_edge_property(e, "w");
    let (found, _) = g.find_edges(None, &filter).unwrap();
    assert_eq!(found.count(), 0);
    assert_eq!(g.edges_with_property("w").count(), 0);
    // Unindexed keys fall back to a scan.
    g.set_edge_property(e, "unindexed", true);
    assert_eq!(g.edges_with_property("unindexed").count(), 1);
}

#[test]
fn test_self_loop_detach() {
    let mut g = Graph::new();
    let a = g.new_node(&["a"], None, None);
    g.new_edge(a, a, "loop", None, None);
    assert_eq!(g.num_edges(), 1);
    assert_eq!(g.node(a).unwrap().degree(EdgeDir::Any), 2);

    g.detach_and_remove_node(a);
    assert_eq!(g.num_nodes(), 0);
    assert_eq!(g.num_edges(), 0);
}
