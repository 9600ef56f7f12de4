//! Prim's minimum spanning tree (§4.2), grown one node at a time.
//!
//! Structurally parallel to [`crate::algo::dijkstra`]: a
//! [`std::collections::BinaryHeap`] of [`crate::scored::MinScored`] keyed on
//! `key_value`, with stale entries (a frontier node relaxed to a cheaper
//! attach cost more than once before it's popped) silently discarded when
//! searching for the next node to admit. The root defaults to the graph's
//! first node by insertion order when the caller doesn't name one (§9 Open
//! Question).

use std::collections::{BinaryHeap, HashMap, HashSet};

use crate::algo::Focus;
use crate::cell::{CellValue, Weight};
use crate::matrix::GraphMatrix;
use crate::scored::MinScored;

/// The algorithm's relaxation state (non-terminal frames), or the finished
/// spanning tree (the terminal frame) — §4.2's Prim `processed` contract.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PrimProcessed {
    /// One entry per graph node: whether it's joined the tree yet, the
    /// cheapest known cost to attach it (`None` = not yet reachable from the
    /// tree), and its parent on the tree once attached.
    Frontier {
        in_mst: HashMap<String, bool>,
        key_value: HashMap<String, Option<u32>>,
        parent: HashMap<String, Option<String>>,
    },
    /// The finished spanning tree's edges, in admission order.
    Tree(Vec<((String, String), u32)>),
}

/// One step of a Prim's-algorithm run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrimFrame {
    pub focus: Focus,
    pub processed: PrimProcessed,
    /// Unused by Prim (§4.2: "pending = unused"); always empty.
    pub pending: Vec<String>,
}

pub struct Prim<'g> {
    graph: &'g GraphMatrix<Weight>,
    heap: BinaryHeap<MinScored<u32, String>>,
    in_tree: HashSet<String>,
    key_value: HashMap<String, u32>,
    parent: HashMap<String, String>,
    tree_edges: Vec<((String, String), u32)>,
    emitted_first: bool,
    finished: bool,
    root: String,
}

impl<'g> Prim<'g> {
    fn new(graph: &'g GraphMatrix<Weight>, start: Option<&str>) -> Option<Self> {
        let root = match start {
            Some(name) if graph.has_node(name) => name.to_owned(),
            Some(_) => return None,
            None => graph.node_names().next()?.to_owned(),
        };
        let mut key_value = HashMap::new();
        key_value.insert(root.clone(), 0);
        let mut heap = BinaryHeap::new();
        heap.push(MinScored(0, root.clone()));
        Some(Prim {
            graph,
            heap,
            in_tree: HashSet::new(),
            key_value,
            parent: HashMap::new(),
            tree_edges: Vec::new(),
            emitted_first: false,
            finished: false,
            root,
        })
    }

    fn frontier_snapshot(&self) -> PrimProcessed {
        let mut in_mst = HashMap::new();
        let mut key_value = HashMap::new();
        let mut parent = HashMap::new();
        for name in self.graph.node_names() {
            in_mst.insert(name.to_owned(), self.in_tree.contains(name));
            key_value.insert(name.to_owned(), self.key_value.get(name).copied());
            parent.insert(name.to_owned(), self.parent.get(name).cloned());
        }
        PrimProcessed::Frontier {
            in_mst,
            key_value,
            parent,
        }
    }
}

impl<'g> Iterator for Prim<'g> {
    type Item = PrimFrame;

    fn next(&mut self) -> Option<PrimFrame> {
        if self.finished {
            return None;
        }

        if !self.emitted_first {
            self.emitted_first = true;
            return Some(PrimFrame {
                focus: Focus::Node(self.root.clone()),
                processed: self.frontier_snapshot(),
                pending: Vec::new(),
            });
        }

        let current = loop {
            match self.heap.pop() {
                None => {
                    self.finished = true;
                    return Some(PrimFrame {
                        focus: Focus::Done,
                        processed: PrimProcessed::Tree(self.tree_edges.clone()),
                        pending: Vec::new(),
                    });
                }
                Some(MinScored(cost, node)) => {
                    if self.in_tree.contains(&node) {
                        continue;
                    }
                    if self.key_value.get(&node).copied().unwrap_or(u32::MAX) < cost {
                        continue;
                    }
                    break node;
                }
            }
        };

        self.in_tree.insert(current.clone());
        log::debug!("prim admitted {current}");
        if let Some(parent) = self.parent.get(&current) {
            let weight = self.key_value[&current];
            self.tree_edges
                .push(((parent.clone(), current.clone()), weight));
        }

        for conn in self.graph.neighbors(&current) {
            if self.in_tree.contains(&conn.neighbor) {
                continue;
            }
            let weight = conn.value.cost();
            let better = self
                .key_value
                .get(&conn.neighbor)
                .map_or(true, |&known| weight < known);
            if better {
                self.key_value.insert(conn.neighbor.clone(), weight);
                self.parent.insert(conn.neighbor.clone(), current.clone());
                self.heap.push(MinScored(weight, conn.neighbor));
            }
        }

        Some(PrimFrame {
            focus: Focus::Node(current),
            processed: self.frontier_snapshot(),
            pending: Vec::new(),
        })
    }
}

/// Prim's minimum spanning tree. `start` defaults to the graph's first node
/// by insertion order when absent (§9's deterministic-default resolution of
/// the original's random start). `None` on an empty graph or an unknown
/// `start`.
pub fn prims_mst<'g>(graph: &'g GraphMatrix<Weight>, start: Option<&str>) -> Option<Prim<'g>> {
    Prim::new(graph, start)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_graph() -> GraphMatrix<Weight> {
        let mut g = GraphMatrix::<Weight>::new(false);
        for n in ["A", "B", "C", "D"] {
            g.add_node(n);
        }
        g.add_edge("A", "B", 1, false);
        g.add_edge("A", "C", 4, false);
        g.add_edge("B", "D", 2, false);
        g.add_edge("C", "D", 3, false);
        g.add_edge("B", "C", 5, false);
        g
    }

    fn tree_edges(frame: &PrimFrame) -> &[((String, String), u32)] {
        match &frame.processed {
            PrimProcessed::Tree(edges) => edges,
            PrimProcessed::Frontier { .. } => panic!("expected the terminal Tree frame"),
        }
    }

    #[test]
    fn spans_every_node_with_minimum_total_weight() {
        let g = sample_graph();
        let frames: Vec<_> = prims_mst(&g, None).unwrap().collect();
        let last = frames.last().unwrap();
        assert_eq!(last.focus, Focus::Done);
        let edges = tree_edges(last);
        assert_eq!(edges.len(), 3);
        let total: u32 = edges.iter().map(|(_, w)| w).sum();
        assert_eq!(total, 6); // A-B(1) + B-D(2) + D-C(3)
    }

    #[test]
    fn roots_at_first_inserted_node_by_default() {
        let g = sample_graph();
        let first_frame = prims_mst(&g, None).unwrap().next().unwrap();
        assert_eq!(first_frame.focus, Focus::Node("A".into()));
    }

    #[test]
    fn honors_an_explicit_start() {
        let g = sample_graph();
        let first_frame = prims_mst(&g, Some("C")).unwrap().next().unwrap();
        assert_eq!(first_frame.focus, Focus::Node("C".into()));
    }

    #[test]
    fn unknown_start_yields_no_iterator() {
        let g = sample_graph();
        assert!(prims_mst(&g, Some("Z")).is_none());
    }

    #[test]
    fn empty_graph_yields_no_iterator() {
        let g = GraphMatrix::<Weight>::new(false);
        assert!(prims_mst(&g, None).is_none());
    }

    #[test]
    fn first_frame_reflects_only_the_root_initialized() {
        let g = sample_graph();
        let first_frame = prims_mst(&g, None).unwrap().next().unwrap();
        match first_frame.processed {
            PrimProcessed::Frontier {
                in_mst,
                key_value,
                parent,
            } => {
                assert!(in_mst.values().all(|&in_tree| !in_tree));
                assert_eq!(key_value["A"], Some(0));
                assert_eq!(key_value["B"], None);
                assert!(parent.values().all(Option::is_none));
            }
            PrimProcessed::Tree(_) => panic!("expected the initial Frontier frame"),
        }
    }

    #[test]
    fn frontier_tracks_key_value_and_parent_as_nodes_join() {
        let g = sample_graph();
        let frames: Vec<_> = prims_mst(&g, None).unwrap().collect();
        // Second frame: root A admitted, its neighbors relaxed.
        let after_root = &frames[1];
        match &after_root.processed {
            PrimProcessed::Frontier {
                in_mst,
                key_value,
                parent,
            } => {
                assert!(in_mst["A"]);
                assert_eq!(key_value["B"], Some(1));
                assert_eq!(parent["B"].as_deref(), Some("A"));
                assert_eq!(key_value["C"], Some(4));
                assert_eq!(parent["C"].as_deref(), Some("A"));
            }
            PrimProcessed::Tree(_) => panic!("expected a Frontier frame"),
        }
    }
}
