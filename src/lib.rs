//! graphstep — a pedagogical graph library built around a step-addressable
//! execution model: every classical algorithm here is a plain iterator
//! whose `next()` advances exactly one algorithm iteration and yields an
//! observation frame, so a host UI can pause, resume, or timed-replay a
//! traversal one step at a time.
//!
//! - [`matrix`] — the adjacency-matrix graph store, generic over [`cell::CellValue`].
//! - [`algo`] — the stepwise algorithm engine (BFS/DFS, tree orders, Dijkstra, A*, Prim, Kruskal).
//! - [`names`] — the node-name generator.
//! - [`session`] — the session controller threading editing state through the rest.
//! - [`document`] — the `.nd` save-file codec.

pub mod algo;
pub mod cell;
pub mod document;
pub mod error;
pub mod matrix;
pub mod names;
pub mod scored;
pub mod session;
pub mod unionfind;

pub use cell::{CellValue, Weight};
pub use document::{load_document, load_document_str, save_document, to_document_string, Document};
pub use error::{DocumentError, GraphError};
pub use matrix::{Connection, GraphMatrix, MatrixView};
pub use names::NodeNameGenerator;
pub use session::{EditMode, GraphVariant, Session};
