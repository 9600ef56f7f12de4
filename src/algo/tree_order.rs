//! Iterative pre/in/post-order traversal over tree-shaped graphs (§4.2).
//!
//! The first neighbor of a node not already seen is treated as its "left"
//! child; any further unseen neighbors are "right" siblings, visited after
//! the left subtree. All three orders share one explicit-stack shape — a
//! work item either says "descend into this node" or "emit this node" —
//! differing only in where `Emit` is slotted relative to a node's children:
//!
//! - pre-order: `Emit(node)`, then `Descend` each child in order.
//! - in-order: `Descend(first child)`, `Emit(node)`, then `Descend` each
//!   remaining child in order.
//! - post-order: `Descend` each child in order, then `Emit(node)`.
//!
//! `pending` is always empty in these frames — the stack is internal
//! bookkeeping, not part of the observed state (§4.2).

use fixedbitset::FixedBitSet;

use crate::algo::Focus;
use crate::cell::CellValue;
use crate::matrix::GraphMatrix;

/// One step of a pre/in/post-order traversal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeOrderFrame {
    pub focus: Focus,
    pub processed: Vec<String>,
    pub pending: Vec<String>,
}

enum Step {
    Descend(String, Option<String>),
    Emit(String),
}

enum Order {
    Pre,
    In,
    Post,
}

/// Iterator driving pre/in/post-order traversal, depending on [`Order`].
pub struct TreeOrder<'g, C: CellValue> {
    graph: &'g GraphMatrix<C>,
    end: Option<String>,
    order: Order,
    stack: Vec<Step>,
    seen: FixedBitSet,
    processed: Vec<String>,
    emitted_first: bool,
    finished: bool,
    start: String,
}

impl<'g, C: CellValue> TreeOrder<'g, C> {
    fn new(graph: &'g GraphMatrix<C>, start: &str, end: Option<&str>, order: Order) -> Option<Self> {
        let start_index = graph.index_of(start)?;
        let mut seen = FixedBitSet::with_capacity(graph.len());
        seen.insert(start_index);
        Some(TreeOrder {
            graph,
            end: end.map(str::to_owned),
            order,
            stack: vec![Step::Descend(start.to_owned(), None)],
            seen,
            processed: Vec::new(),
            emitted_first: false,
            finished: false,
            start: start.to_owned(),
        })
    }

    fn children_of(&mut self, node: &str, parent: Option<&str>) -> Vec<String> {
        let seen = &self.seen;
        let graph = self.graph;
        graph
            .neighbors(node)
            .into_iter()
            .map(|c| c.neighbor)
            .filter(|n| {
                Some(n.as_str()) != parent
                    && !seen.contains(graph.index_of(n).expect("neighbor belongs to this graph"))
            })
            .collect()
    }

    fn push_descend(&mut self, node: String, parent: String) {
        self.stack.push(Step::Descend(node, Some(parent)));
    }
}

impl<'g, C: CellValue> Iterator for TreeOrder<'g, C> {
    type Item = TreeOrderFrame;

    fn next(&mut self) -> Option<TreeOrderFrame> {
        if self.finished {
            return None;
        }

        if !self.emitted_first {
            self.emitted_first = true;
            return Some(TreeOrderFrame {
                focus: Focus::Node(self.start.clone()),
                processed: Vec::new(),
                pending: Vec::new(),
            });
        }

        loop {
            match self.stack.pop() {
                None => {
                    self.finished = true;
                    return Some(TreeOrderFrame {
                        focus: Focus::Done,
                        processed: self.processed.clone(),
                        pending: Vec::new(),
                    });
                }
                Some(Step::Emit(node)) => {
                    if self.end.as_deref() == Some(node.as_str()) {
                        self.finished = true;
                        return Some(TreeOrderFrame {
                            focus: Focus::Done,
                            processed: self.processed.clone(),
                            pending: Vec::new(),
                        });
                    }
                    self.processed.push(node.clone());
                    return Some(TreeOrderFrame {
                        focus: Focus::Node(node),
                        processed: self.processed.clone(),
                        pending: Vec::new(),
                    });
                }
                Some(Step::Descend(node, parent)) => {
                    let children = self.children_of(&node, parent.as_deref());
                    for child in &children {
                        let index = self.graph.index_of(child).expect("neighbor belongs to this graph");
                        self.seen.insert(index);
                    }
                    match self.order {
                        Order::Pre => {
                            for child in children.iter().rev() {
                                self.push_descend(child.clone(), node.clone());
                            }
                            self.stack.push(Step::Emit(node));
                        }
                        Order::Post => {
                            self.stack.push(Step::Emit(node.clone()));
                            for child in children.iter().rev() {
                                self.push_descend(child.clone(), node.clone());
                            }
                        }
                        Order::In => {
                            if children.is_empty() {
                                self.stack.push(Step::Emit(node));
                            } else {
                                for right in children[1..].iter().rev() {
                                    self.push_descend(right.clone(), node.clone());
                                }
                                self.stack.push(Step::Emit(node.clone()));
                                self.push_descend(children[0].clone(), node.clone());
                            }
                        }
                    }
                    // Descending is internal bookkeeping; only Emit steps
                    // are observable frames.
                }
            }
        }
    }
}

/// Pre-order: visit a node, then its left subtree, then its right subtrees
/// in order.
pub fn pre_order<'g, C: CellValue>(
    graph: &'g GraphMatrix<C>,
    start: &str,
    end: Option<&str>,
) -> Option<TreeOrder<'g, C>> {
    TreeOrder::new(graph, start, end, Order::Pre)
}

/// In-order: visit the left subtree, then the node, then the right
/// subtrees in order.
pub fn in_order<'g, C: CellValue>(
    graph: &'g GraphMatrix<C>,
    start: &str,
    end: Option<&str>,
) -> Option<TreeOrder<'g, C>> {
    TreeOrder::new(graph, start, end, Order::In)
}

/// Post-order: visit the left subtree, then the right subtrees in order,
/// then the node.
pub fn post_order<'g, C: CellValue>(
    graph: &'g GraphMatrix<C>,
    start: &str,
    end: Option<&str>,
) -> Option<TreeOrder<'g, C>> {
    TreeOrder::new(graph, start, end, Order::Post)
}
