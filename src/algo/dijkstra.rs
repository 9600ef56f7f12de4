//! Dijkstra's shortest-path algorithm (§4.2), stepped one heap-pop at a
//! time.
//!
//! The priority queue is a [`std::collections::BinaryHeap`] of
//! [`crate::scored::MinScored`] so the smallest tentative distance pops
//! first. Stale heap entries (a node relaxed more than once before it's
//! popped) are discarded silently while searching for the next node to
//! settle — they don't count as algorithm iterations of their own.

use std::collections::{BinaryHeap, HashMap};

use crate::algo::Focus;
use crate::cell::{CellValue, Weight};
use crate::matrix::GraphMatrix;
use crate::scored::MinScored;

/// One step of a Dijkstra run: the node just settled, the shortest-path
/// tree discovered so far, and a snapshot of the frontier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DijkstraFrame {
    pub focus: Focus,
    /// Shortest known distance to each node reached so far.
    pub distances: HashMap<String, u32>,
    /// Predecessor on the shortest-path tree, for reconstructing a path.
    pub predecessors: HashMap<String, String>,
    /// Nodes still in the frontier, nearest first — except on the terminal
    /// frame once `end` settles, where this holds the reconstructed
    /// `start..=end` path instead (§3/§4.2).
    pub pending: Vec<String>,
}

pub struct Dijkstra<'g> {
    graph: &'g GraphMatrix<Weight>,
    end: Option<String>,
    heap: BinaryHeap<MinScored<u32, String>>,
    visited: std::collections::HashSet<String>,
    distances: HashMap<String, u32>,
    predecessors: HashMap<String, String>,
    emitted_first: bool,
    finished: bool,
    start: String,
}

impl<'g> Dijkstra<'g> {
    fn new(graph: &'g GraphMatrix<Weight>, start: &str, end: Option<&str>) -> Option<Self> {
        if !graph.has_node(start) {
            return None;
        }
        let mut distances = HashMap::new();
        distances.insert(start.to_owned(), 0);
        let mut heap = BinaryHeap::new();
        heap.push(MinScored(0, start.to_owned()));
        Some(Dijkstra {
            graph,
            end: end.map(str::to_owned),
            heap,
            visited: std::collections::HashSet::new(),
            distances,
            predecessors: HashMap::new(),
            emitted_first: false,
            finished: false,
            start: start.to_owned(),
        })
    }

    fn pending_snapshot(&self) -> Vec<String> {
        let mut entries: Vec<_> = self
            .heap
            .iter()
            .filter(|MinScored(_, node)| !self.visited.contains(node))
            .map(|MinScored(cost, node)| (*cost, node.clone()))
            .collect();
        entries.sort();
        entries.into_iter().map(|(_, node)| node).collect()
    }
}

impl<'g> Iterator for Dijkstra<'g> {
    type Item = DijkstraFrame;

    fn next(&mut self) -> Option<DijkstraFrame> {
        if self.finished {
            return None;
        }

        if !self.emitted_first {
            self.emitted_first = true;
            return Some(DijkstraFrame {
                focus: Focus::Node(self.start.clone()),
                distances: self.distances.clone(),
                predecessors: self.predecessors.clone(),
                pending: self.pending_snapshot(),
            });
        }

        let current = loop {
            match self.heap.pop() {
                None => {
                    self.finished = true;
                    return Some(DijkstraFrame {
                        focus: Focus::Done,
                        distances: self.distances.clone(),
                        predecessors: self.predecessors.clone(),
                        pending: Vec::new(),
                    });
                }
                Some(MinScored(cost, node)) => {
                    if self.visited.contains(&node) {
                        continue;
                    }
                    if self.distances.get(&node).copied().unwrap_or(u32::MAX) < cost {
                        continue;
                    }
                    break node;
                }
            }
        };

        self.visited.insert(current.clone());
        log::debug!("dijkstra settled {current}");

        if self.end.as_deref() == Some(current.as_str()) {
            self.finished = true;
            let path = crate::algo::reconstruct_path(&self.predecessors, &self.start, &current);
            return Some(DijkstraFrame {
                focus: Focus::Done,
                distances: self.distances.clone(),
                predecessors: self.predecessors.clone(),
                pending: path,
            });
        }

        let current_cost = self.distances[&current];
        for conn in self.graph.neighbors(&current) {
            if self.visited.contains(&conn.neighbor) {
                continue;
            }
            let candidate = current_cost + conn.value.cost();
            let better = self
                .distances
                .get(&conn.neighbor)
                .map_or(true, |&known| candidate < known);
            if better {
                self.distances.insert(conn.neighbor.clone(), candidate);
                self.predecessors.insert(conn.neighbor.clone(), current.clone());
                self.heap.push(MinScored(candidate, conn.neighbor));
            }
        }

        Some(DijkstraFrame {
            focus: Focus::Node(current),
            distances: self.distances.clone(),
            predecessors: self.predecessors.clone(),
            pending: self.pending_snapshot(),
        })
    }
}

/// Dijkstra's algorithm from `start`, optionally stopping once `end` is
/// settled. `None` if `start` is not in the graph.
pub fn dijkstra<'g>(
    graph: &'g GraphMatrix<Weight>,
    start: &str,
    end: Option<&str>,
) -> Option<Dijkstra<'g>> {
    Dijkstra::new(graph, start, end)
}

#[cfg(test)]
mod tests {
    use super::*;

    // A --1-- B --2-- D
    // |                |
    // 4                1
    // |                |
    // C ------3-------- (C-D)
    fn sample_graph() -> GraphMatrix<Weight> {
        let mut g = GraphMatrix::<Weight>::new(false);
        for n in ["A", "B", "C", "D"] {
            g.add_node(n);
        }
        g.add_edge("A", "B", 1, false);
        g.add_edge("A", "C", 4, false);
        g.add_edge("B", "D", 2, false);
        g.add_edge("C", "D", 3, false);
        g
    }

    #[test]
    fn finds_shortest_distance_to_every_node() {
        let g = sample_graph();
        let frames: Vec<_> = dijkstra(&g, "A", None).unwrap().collect();
        let last = frames.last().unwrap();
        assert_eq!(last.distances["A"], 0);
        assert_eq!(last.distances["B"], 1);
        assert_eq!(last.distances["D"], 3);
        assert_eq!(last.distances["C"], 4);
        assert_eq!(last.focus, Focus::Done);
    }

    #[test]
    fn predecessor_chain_reconstructs_shortest_path() {
        let g = sample_graph();
        let frames: Vec<_> = dijkstra(&g, "A", None).unwrap().collect();
        let preds = &frames.last().unwrap().predecessors;
        assert_eq!(preds["D"], "B");
        assert_eq!(preds["B"], "A");
    }

    #[test]
    fn end_node_stops_once_settled() {
        let g = sample_graph();
        let frames: Vec<_> = dijkstra(&g, "A", Some("B")).unwrap().collect();
        assert_eq!(frames.last().unwrap().focus, Focus::Done);
        assert!(!frames.last().unwrap().distances.contains_key("D"));
    }

    #[test]
    fn terminal_frame_reconstructs_the_path() {
        let g = sample_graph();
        let frames: Vec<_> = dijkstra(&g, "A", Some("D")).unwrap().collect();
        let last = frames.last().unwrap();
        assert_eq!(last.pending, vec!["A".to_string(), "B".to_string(), "D".to_string()]);
    }

    #[test]
    fn unknown_start_yields_no_iterator() {
        let g = sample_graph();
        assert!(dijkstra(&g, "Z", None).is_none());
    }

    #[test]
    fn unreachable_node_never_settles() {
        let mut g = sample_graph();
        g.add_node("E");
        let frames: Vec<_> = dijkstra(&g, "A", None).unwrap().collect();
        assert!(!frames.last().unwrap().distances.contains_key("E"));
    }
}
