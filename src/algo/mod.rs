//! Stepwise graph algorithms (§4.2).
//!
//! Every algorithm here is a plain iterator: `next` advances exactly one
//! algorithm iteration and returns a [`Frame`]-shaped value reflecting the
//! state *after* that iteration, with the very first frame emitted before
//! any work happens. None of these recurse; each owns its worklist(s) and
//! is dropped (freeing them) the moment the consumer stops pulling frames.
//!
//! Rather than a single frame type whose `processed`/`pending` fields are
//! heterogeneous depending on which algorithm produced them, each algorithm
//! has its own frame struct (`BfsFrame`, `DijkstraFrame`, `PrimFrame`, …) —
//! a tagged sum per algorithm rather than one polymorphic tuple, per §9's
//! redesign note. A host UI dispatches on which iterator it asked for, not
//! on a frame discriminant.

pub mod astar;
pub mod dijkstra;
pub mod kruskal;
pub mod prim;
pub mod traversal;
pub mod tree_order;

pub use astar::{a_star, ascii_heuristic, AStarFrame};
pub use dijkstra::{dijkstra, DijkstraFrame};
pub use kruskal::{kruskals_mst, KruskalFrame};
pub use prim::{prims_mst, PrimFrame, PrimProcessed};
pub use traversal::{breadth_first, depth_first, TraversalFrame};
pub use tree_order::{in_order, post_order, pre_order, TreeOrderFrame};

/// The node an algorithm is currently examining, or the "done" sentinel
/// emitted on the terminal frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Focus {
    /// The node being examined this iteration.
    Node(String),
    /// Terminal frame: the algorithm has finished.
    Done,
}

impl Focus {
    pub fn is_done(&self) -> bool {
        matches!(self, Focus::Done)
    }

    pub fn node(&self) -> Option<&str> {
        match self {
            Focus::Node(n) => Some(n.as_str()),
            Focus::Done => None,
        }
    }
}

/// Walks a predecessor map back from `end` to `start`, returning the path in
/// traversal order (`start` first). Used by Dijkstra and A* to materialize
/// the terminal frame's reconstructed answer (§3/§4.2).
pub(crate) fn reconstruct_path(
    predecessors: &std::collections::HashMap<String, String>,
    start: &str,
    end: &str,
) -> Vec<String> {
    let mut path = vec![end.to_owned()];
    let mut current = end;
    while current != start {
        match predecessors.get(current) {
            Some(prev) => {
                path.push(prev.clone());
                current = prev;
            }
            None => break,
        }
    }
    path.reverse();
    path
}
