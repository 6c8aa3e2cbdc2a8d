//! The labeled property graph: entities, identifiers, property values and
//! the graph façade.

pub mod edge;
pub mod node;
pub mod property;
pub mod store;
pub mod types;

pub use edge::Edge;
pub use node::Node;
pub use property::{OpaqueProperty, PropertyMap, PropertyValue};
pub use store::Graph;
pub use types::{EdgeDir, EdgeId, NodeId};
