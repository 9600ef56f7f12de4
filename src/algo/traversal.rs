//! Breadth-first and depth-first traversal (§4.2).
//!
//! Both share one iterator shape: a worklist popped from one end (FIFO for
//! BFS, LIFO for DFS) and a "discovered" set that prevents re-enqueueing.
//! The discovered set is internal bookkeeping only — frames expose
//! `processed` (nodes already popped) and `pending` (the current worklist).
//! Discovery is tracked as a [`FixedBitSet`] over dense node indices rather
//! than a `HashSet<String>`, the same representation petgraph's own `Bfs`
//! and `Dfs` use for their visited maps.

use std::collections::VecDeque;

use fixedbitset::FixedBitSet;

use crate::algo::Focus;
use crate::cell::CellValue;
use crate::matrix::GraphMatrix;

/// One step of a breadth-first or depth-first traversal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TraversalFrame {
    pub focus: Focus,
    /// Nodes popped from the worklist so far, in pop order.
    pub processed: Vec<String>,
    /// The worklist as it stands after this iteration.
    pub pending: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Order {
    Fifo,
    Lifo,
}

/// Iterator driving either a BFS or a DFS, depending on [`Order`].
pub struct Traversal<'g, C: CellValue> {
    graph: &'g GraphMatrix<C>,
    end: Option<String>,
    order: Order,
    discovered: FixedBitSet,
    worklist: VecDeque<String>,
    processed: Vec<String>,
    emitted_first: bool,
    finished: bool,
}

impl<'g, C: CellValue> Traversal<'g, C> {
    fn new(graph: &'g GraphMatrix<C>, start: &str, end: Option<&str>, order: Order) -> Option<Self> {
        let start_index = graph.index_of(start)?;
        let mut discovered = FixedBitSet::with_capacity(graph.len());
        discovered.insert(start_index);
        Some(Traversal {
            graph,
            end: end.map(str::to_owned),
            order,
            discovered,
            worklist: VecDeque::from([start.to_owned()]),
            processed: Vec::new(),
            emitted_first: false,
            finished: false,
        })
    }

    fn pop(&mut self) -> Option<String> {
        match self.order {
            Order::Fifo => self.worklist.pop_front(),
            Order::Lifo => self.worklist.pop_back(),
        }
    }

    fn pending_snapshot(&self) -> Vec<String> {
        self.worklist.iter().cloned().collect()
    }
}

impl<'g, C: CellValue> Iterator for Traversal<'g, C> {
    type Item = TraversalFrame;

    fn next(&mut self) -> Option<TraversalFrame> {
        if self.finished {
            return None;
        }

        if !self.emitted_first {
            self.emitted_first = true;
            let start = self.worklist.front().expect("seeded with start").clone();
            return Some(TraversalFrame {
                focus: Focus::Node(start),
                processed: Vec::new(),
                pending: self.pending_snapshot(),
            });
        }

        let Some(current) = self.pop() else {
            self.finished = true;
            return Some(TraversalFrame {
                focus: Focus::Done,
                processed: self.processed.clone(),
                pending: Vec::new(),
            });
        };

        self.processed.push(current.clone());

        if self.end.as_deref() == Some(current.as_str()) {
            self.finished = true;
            return Some(TraversalFrame {
                focus: Focus::Done,
                processed: self.processed.clone(),
                pending: self.pending_snapshot(),
            });
        }

        for conn in self.graph.neighbors(&current) {
            let index = self
                .graph
                .index_of(&conn.neighbor)
                .expect("neighbor returned by the graph it belongs to");
            if !self.discovered.put(index) {
                self.worklist.push_back(conn.neighbor);
            }
        }

        Some(TraversalFrame {
            focus: Focus::Node(current),
            processed: self.processed.clone(),
            pending: self.pending_snapshot(),
        })
    }
}

/// Breadth-first traversal from `start`, optionally stopping once `end` is
/// reached. `None` if `start` is not in the graph (§4.2's empty-iterator
/// failure mode).
pub fn breadth_first<'g, C: CellValue>(
    graph: &'g GraphMatrix<C>,
    start: &str,
    end: Option<&str>,
) -> Option<Traversal<'g, C>> {
    Traversal::new(graph, start, end, Order::Fifo)
}

/// Depth-first traversal from `start`, optionally stopping once `end` is
/// reached.
pub fn depth_first<'g, C: CellValue>(
    graph: &'g GraphMatrix<C>,
    start: &str,
    end: Option<&str>,
) -> Option<Traversal<'g, C>> {
    Traversal::new(graph, start, end, Order::Lifo)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matrix::GraphMatrix;

    fn sample_graph() -> GraphMatrix<bool> {
        let mut g = GraphMatrix::<bool>::new(false);
        for n in ["A", "B", "C", "D"] {
            g.add_node(n);
        }
        g.add_edge("A", "B", false);
        g.add_edge("A", "C", false);
        g.add_edge("B", "D", false);
        g.add_edge("C", "D", false);
        g
    }

    #[test]
    fn breadth_first_matches_literal_scenario() {
        let g = sample_graph();
        let frames: Vec<_> = breadth_first(&g, "A", None).unwrap().collect();
        let foci: Vec<Focus> = frames.iter().map(|f| f.focus.clone()).collect();
        assert_eq!(
            foci,
            vec![
                Focus::Node("A".into()),
                Focus::Node("A".into()),
                Focus::Node("B".into()),
                Focus::Node("C".into()),
                Focus::Node("D".into()),
                Focus::Done,
            ]
        );
        assert_eq!(
            frames.last().unwrap().processed,
            vec!["A", "B", "C", "D"]
        );
    }

    #[test]
    fn depth_first_matches_literal_scenario() {
        let g = sample_graph();
        let frames: Vec<_> = depth_first(&g, "A", None).unwrap().collect();
        assert_eq!(
            frames.last().unwrap().processed,
            vec!["A", "C", "D", "B"]
        );
    }

    #[test]
    fn unknown_start_yields_no_iterator() {
        let g = sample_graph();
        assert!(breadth_first(&g, "Z", None).is_none());
    }

    #[test]
    fn frame_count_is_bounded() {
        let g = sample_graph();
        let frames: Vec<_> = breadth_first(&g, "A", None).unwrap().collect();
        assert!(frames.len() <= g.len() + 2);
    }

    #[test]
    fn iterator_is_fresh_each_call() {
        let g = sample_graph();
        let first: Vec<_> = breadth_first(&g, "A", None).unwrap().collect();
        let second: Vec<_> = breadth_first(&g, "A", None).unwrap().collect();
        assert_eq!(first, second);
    }

    #[test]
    fn end_node_stops_traversal_early() {
        let g = sample_graph();
        let frames: Vec<_> = breadth_first(&g, "A", Some("B")).unwrap().collect();
        assert_eq!(frames.last().unwrap().focus, Focus::Done);
        assert!(frames.len() < g.len() + 2);
    }
}
