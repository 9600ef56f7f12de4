//! Error kinds for the graph store, algorithm engine, and document codec.
//!
//! `GraphError` covers the two kinds that are absorbed at the component
//! boundary (§7 of the design notes): callers see them as `bool`/empty
//! results rather than a propagated error, but the variants exist so tests
//! and embedders can assert on *why* an operation was a no-op.
//! `DocumentError` is the one that actually leaves the crate.

use thiserror::Error;

/// Reasons a graph-store or algorithm-engine operation silently declined to
/// do anything.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum GraphError {
    /// A named node was not present in the graph.
    #[error("node not found")]
    NotFound,
    /// An algorithm that requires a weighted graph was invoked on an
    /// unweighted one (or vice versa).
    #[error("algorithm not supported for this graph variant")]
    VariantMismatch,
}

/// Failures surfaced by [`crate::document`] when saving or loading a session
/// document.
#[derive(Debug, Error)]
pub enum DocumentError {
    /// The document's JSON did not conform to the `.nd` shape, or its
    /// `weighted` flag disagreed with the cell values in `graph`.
    #[error("malformed session document: {0}")]
    Malformed(#[from] serde_json::Error),
    /// The underlying file could not be read or written.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}
