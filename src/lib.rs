//! An in-memory labeled property graph engine.
//!
//! Nodes carry an ordered set of labels, a property map and an independent
//! set of context tags; directed edges carry a single label, properties
//! and contexts. The graph keeps secondary indexes — by label, by context
//! and by value for registered properties — consistent under arbitrary
//! insertion, mutation and deletion, and a small planner picks the most
//! selective index when filtering by labels plus properties.
//!
//! This is the mutable data structure a query layer would sit on: there is
//! no query language, no persistence and no concurrent mutation. Reads go
//! through iterators borrowing the graph, so the borrow checker enforces
//! the single-writer contract.
//!
//! # Example
//!
//! ```rust
//! use propgraph::{Graph, IndexKind, PropertyMap, PropertyValue, StringSet};
//!
//! let mut graph = Graph::new();
//! graph.add_node_property_index("name", IndexKind::Btree);
//!
//! let props = PropertyMap::from([("name".to_string(), PropertyValue::from("Alice"))]);
//! let alice = graph.new_node(&["Person"], Some(&props), None);
//! let bob = graph.new_node(&["Person"], None, None);
//! graph.new_edge(alice, bob, "KNOWS", None, None);
//!
//! let labels = StringSet::of(["Person"]);
//! let filter = PropertyMap::from([("name".to_string(), PropertyValue::from("Alice"))]);
//! let (found, _) = graph.find_nodes(&labels, &filter).unwrap();
//! assert_eq!(found.count(), 1);
//! ```

#![warn(clippy::all)]

pub mod clone;
pub mod error;
pub mod graph;
pub mod index;
pub mod iter;
pub mod paths;
pub mod sets;

pub use clone::{check_isomorphism, copy_graph};
pub use error::GraphError;
pub use graph::{
    Edge, EdgeDir, EdgeId, Graph, Node, NodeId, OpaqueProperty, PropertyMap, PropertyValue,
};
pub use index::{BtreeIndex, HashIndex, IndexKind, NodeMap, ValueIndex};
pub use iter::{EdgeIter, NodeIter};
pub use paths::collect_all_paths;
pub use sets::{FastMap, StringSet};

/// Version information.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
