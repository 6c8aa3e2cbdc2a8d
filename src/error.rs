//! Error types.

use thiserror::Error;

/// Recoverable query-shape diagnostics.
///
/// Invariant violations (an edge endpoint that is not a node of the graph,
/// a mutation through a stale handle) are programmer errors and panic
/// instead; see the graph façade docs.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GraphError {
    /// A find was asked to filter on a property that has no index. The
    /// planner does not fall back to full scans for value lookups.
    #[error("no index found for property {0}")]
    PropertyNotIndexed(String),

    /// A find was called without any label or property constraint. This is
    /// reported alongside the full-scan iterator, not instead of it.
    #[error("no label or properties provided")]
    NoFilter,

    /// No usable index candidate was found for the requested filter.
    #[error("nothing found")]
    NothingFound,
}
