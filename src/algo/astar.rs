//! A* shortest-path search (§4.2), stepped one heap-pop at a time.
//!
//! Structurally identical to [`crate::algo::dijkstra`] except the heap
//! orders on `g(node) + heuristic(node, end)` rather than `g(node)` alone.
//! The heuristic is a required parameter — callers who don't have a
//! domain-specific one can pass [`ascii_heuristic`], the absolute
//! difference between two single-character node names' ASCII codes, which
//! is only admissible on node names that are actually single letters.

use std::collections::{BinaryHeap, HashMap, HashSet};

use crate::algo::Focus;
use crate::cell::{CellValue, Weight};
use crate::matrix::GraphMatrix;
use crate::scored::MinScored;

/// One step of an A* run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AStarFrame {
    pub focus: Focus,
    /// Shortest known distance to each node reached so far.
    pub distances: HashMap<String, u32>,
    pub predecessors: HashMap<String, String>,
    /// Nodes still in the frontier, lowest `g + h` first — except on the
    /// terminal frame once `end` is reached, where this holds the
    /// reconstructed `start..=end` path instead (§3/§4.2).
    pub pending: Vec<String>,
}

/// The distance between two node names' last characters, as the absolute
/// difference of their ASCII codes (§4.2/§6: `|ord(last_char(b)) -
/// ord(last_char(a))|`). Matches the original demonstrator's default
/// heuristic; admissible only when node names encode position, but that's
/// the pedagogical case this default exists for.
pub fn ascii_heuristic(a: &str, b: &str) -> u32 {
    let last_byte = |s: &str| s.chars().last().unwrap_or('\0') as i32;
    (last_byte(b) - last_byte(a)).unsigned_abs()
}

pub struct AStar<'g, H: Fn(&str, &str) -> u32> {
    graph: &'g GraphMatrix<Weight>,
    end: String,
    heuristic: H,
    heap: BinaryHeap<MinScored<u32, String>>,
    visited: HashSet<String>,
    distances: HashMap<String, u32>,
    predecessors: HashMap<String, String>,
    emitted_first: bool,
    finished: bool,
    start: String,
}

impl<'g, H: Fn(&str, &str) -> u32> AStar<'g, H> {
    fn new(graph: &'g GraphMatrix<Weight>, start: &str, end: &str, heuristic: H) -> Option<Self> {
        if !graph.has_node(start) || !graph.has_node(end) {
            return None;
        }
        let mut distances = HashMap::new();
        distances.insert(start.to_owned(), 0);
        let mut heap = BinaryHeap::new();
        heap.push(MinScored(heuristic(start, end), start.to_owned()));
        Some(AStar {
            graph,
            end: end.to_owned(),
            heuristic,
            heap,
            visited: HashSet::new(),
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
            .map(|MinScored(score, node)| (*score, node.clone()))
            .collect();
        entries.sort();
        entries.into_iter().map(|(_, node)| node).collect()
    }
}

impl<'g, H: Fn(&str, &str) -> u32> Iterator for AStar<'g, H> {
    type Item = AStarFrame;

    fn next(&mut self) -> Option<AStarFrame> {
        if self.finished {
            return None;
        }

        if !self.emitted_first {
            self.emitted_first = true;
            return Some(AStarFrame {
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
                    return Some(AStarFrame {
                        focus: Focus::Done,
                        distances: self.distances.clone(),
                        predecessors: self.predecessors.clone(),
                        pending: Vec::new(),
                    });
                }
                Some(MinScored(_, node)) => {
                    if self.visited.contains(&node) {
                        continue;
                    }
                    break node;
                }
            }
        };

        self.visited.insert(current.clone());
        log::debug!("astar expanded {current}");

        if current == self.end {
            self.finished = true;
            let path = crate::algo::reconstruct_path(&self.predecessors, &self.start, &self.end);
            return Some(AStarFrame {
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
                let priority = candidate + (self.heuristic)(&conn.neighbor, &self.end);
                self.heap.push(MinScored(priority, conn.neighbor));
            }
        }

        Some(AStarFrame {
            focus: Focus::Node(current),
            distances: self.distances.clone(),
            predecessors: self.predecessors.clone(),
            pending: self.pending_snapshot(),
        })
    }
}

/// A* search from `start` to `end` using `heuristic` to guide expansion.
/// `None` if either node is unknown to the graph.
pub fn a_star<'g, H: Fn(&str, &str) -> u32>(
    graph: &'g GraphMatrix<Weight>,
    start: &str,
    end: &str,
    heuristic: H,
) -> Option<AStar<'g, H>> {
    AStar::new(graph, start, end, heuristic)
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
        g
    }

    #[test]
    fn ascii_heuristic_is_symmetric_distance() {
        assert_eq!(ascii_heuristic("A", "D"), 3);
        assert_eq!(ascii_heuristic("D", "A"), 3);
    }

    #[test]
    fn finds_shortest_path_cost_to_goal() {
        let g = sample_graph();
        let frames: Vec<_> = a_star(&g, "A", "D", ascii_heuristic).unwrap().collect();
        let last = frames.last().unwrap();
        assert_eq!(last.focus, Focus::Done);
        assert_eq!(last.distances["D"], 3);
        assert_eq!(last.predecessors["D"], "B");
    }

    #[test]
    fn terminal_frame_reconstructs_the_path() {
        let g = sample_graph();
        let frames: Vec<_> = a_star(&g, "A", "D", ascii_heuristic).unwrap().collect();
        let last = frames.last().unwrap();
        assert_eq!(last.pending, vec!["A".to_string(), "B".to_string(), "D".to_string()]);
    }

    #[test]
    fn unknown_endpoint_yields_no_iterator() {
        let g = sample_graph();
        assert!(a_star(&g, "A", "Z", ascii_heuristic).is_none());
        assert!(a_star(&g, "Z", "A", ascii_heuristic).is_none());
    }

    #[test]
    fn zero_heuristic_degenerates_to_dijkstra_cost() {
        let g = sample_graph();
        let frames: Vec<_> = a_star(&g, "A", "D", |_, _| 0).unwrap().collect();
        assert_eq!(frames.last().unwrap().distances["D"], 3);
    }
}
