//! The adjacency-matrix graph store (§4.1).
//!
//! Node names and adjacency cells are kept as two separate fields —
//! `names` (an insertion-ordered set) and `cells` (a square grid) — rather
//! than the original's `matrix[0]` name row in front of `matrix[1..]` cell
//! rows. That mixed-type leading row, and the index-off-by-one it forces
//! into every operation, is exactly what §9's redesign note calls out.

use indexmap::IndexSet;

use crate::cell::CellValue;

/// One entry from [`GraphMatrix::neighbors`]: a reachable node and the cell
/// value of the edge leading to it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Connection<C: CellValue> {
    pub neighbor: String,
    pub value: C,
}

/// A read-only view over the matrix's node ordering and adjacency rows, for
/// a host UI to render as a table.
#[derive(Debug, Clone, Copy)]
pub struct MatrixView<'a, C: CellValue> {
    pub names: &'a IndexSet<String>,
    pub cells: &'a [Vec<C>],
}

/// A `k×k` adjacency matrix over named nodes, directed or undirected,
/// generic over the cell value type (`bool` for unweighted, [`crate::cell::Weight`]
/// for weighted).
#[derive(Debug, Clone)]
pub struct GraphMatrix<C: CellValue> {
    names: IndexSet<String>,
    cells: Vec<Vec<C>>,
    directed: bool,
}

impl<C: CellValue> GraphMatrix<C> {
    /// An empty graph. `directed` fixes whether mutations only write one
    /// direction by default; undirected graphs always mirror.
    pub fn new(directed: bool) -> Self {
        GraphMatrix {
            names: IndexSet::new(),
            cells: Vec::new(),
            directed,
        }
    }

    pub fn directed(&self) -> bool {
        self.directed
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn has_node(&self, name: &str) -> bool {
        self.names.contains(name)
    }

    /// Node names in insertion order.
    pub fn node_names(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }

    /// The dense row/column index of `name`, if present. Stable across
    /// mutations except [`GraphMatrix::delete_node`], which shifts every
    /// index after the removed one.
    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.names.get_index_of(name)
    }

    /// The node name at a dense row/column index, if in range.
    pub fn name_at(&self, index: usize) -> Option<&str> {
        self.names.get_index(index).map(String::as_str)
    }

    /// Adds a node. A no-op if the name already exists.
    pub fn add_node(&mut self, name: impl Into<String>) {
        let name = name.into();
        if self.names.contains(&name) {
            return;
        }
        log::debug!("adding node {name}");
        self.names.insert(name);
        let k = self.names.len();
        for row in &mut self.cells {
            row.push(C::default());
        }
        self.cells.push(vec![C::default(); k]);
    }

    /// Removes a node along with its row and column; remaining indices
    /// shift to stay contiguous.
    pub fn delete_node(&mut self, name: &str) {
        let Some(index) = self.index_of(name) else {
            return;
        };
        log::debug!("deleting node {name}");
        self.names.shift_remove_index(index);
        self.cells.remove(index);
        for row in &mut self.cells {
            row.remove(index);
        }
    }

    fn write_cell(&mut self, from: usize, to: usize, value: C, mirror: bool) {
        self.cells[from][to] = value;
        if mirror {
            self.cells[to][from] = value;
        }
    }

    /// The cell value between `from` and `to`, or the variant's "absent"
    /// value if either node is unknown.
    pub fn is_connected(&self, from: &str, to: &str) -> C {
        match (self.index_of(from), self.index_of(to)) {
            (Some(f), Some(t)) => self.cells[f][t],
            _ => C::default(),
        }
    }

    /// Removes the edge between `from` and `to`. `undirected` additionally
    /// clears the reverse edge on a directed graph (redundant on an
    /// undirected one, which always mirrors).
    pub fn delete_edge(&mut self, from: &str, to: &str, undirected: bool) {
        let (Some(f), Some(t)) = (self.index_of(from), self.index_of(to)) else {
            return;
        };
        if !self.cells[f][t].is_present() {
            return;
        }
        self.write_cell(f, t, C::default(), !self.directed || undirected);
    }

    /// Neighbors of `name` with a truthy cell, in node-insertion order.
    pub fn neighbors(&self, name: &str) -> Vec<Connection<C>> {
        let Some(from) = self.index_of(name) else {
            return Vec::new();
        };
        self.names
            .iter()
            .enumerate()
            .filter_map(|(to, neighbor)| {
                let value = self.cells[from][to];
                value.is_present().then(|| Connection {
                    neighbor: neighbor.clone(),
                    value,
                })
            })
            .collect()
    }

    /// A read-only view over the node ordering and adjacency rows.
    pub fn matrix(&self) -> MatrixView<'_, C> {
        MatrixView {
            names: &self.names,
            cells: &self.cells,
        }
    }

    /// Restores a matrix from already-materialized names and cells, e.g.
    /// when the document codec loads a saved graph. The caller is
    /// responsible for ensuring `cells` is square and sized to `names`.
    pub(crate) fn from_parts(names: IndexSet<String>, cells: Vec<Vec<C>>, directed: bool) -> Self {
        GraphMatrix {
            names,
            cells,
            directed,
        }
    }

    /// `true` iff the graph is undirected, fully connected, and acyclic
    /// (§4.1). Vacuously `true` on an empty graph.
    pub fn is_tree(&self) -> bool {
        if self.directed {
            return false;
        }
        if self.is_empty() {
            return true;
        }

        let mut visited = vec![false; self.len()];
        let start = 0usize;
        visited[start] = true;
        let mut queue = std::collections::VecDeque::from([(start, None::<usize>)]);
        let mut visited_count = 1usize;
        let mut acyclic = true;

        while let Some((current, parent)) = queue.pop_front() {
            for (to, _) in self
                .cells
                .get(current)
                .into_iter()
                .flatten()
                .enumerate()
                .filter(|(_, v)| v.is_present())
            {
                if !visited[to] {
                    visited[to] = true;
                    visited_count += 1;
                    queue.push_back((to, Some(current)));
                } else if Some(to) != parent && to != current {
                    acyclic = false;
                }
            }
        }

        acyclic && visited_count == self.len()
    }
}

impl GraphMatrix<bool> {
    /// Adds an edge between two already-present nodes (the stricter
    /// "require exists" rule adopted uniformly per §9's Open Question).
    /// Returns `false` (a no-op) if either endpoint is missing.
    pub fn add_edge(&mut self, from: &str, to: &str, undirected: bool) -> bool {
        let (Some(f), Some(t)) = (self.index_of(from), self.index_of(to)) else {
            return false;
        };
        self.write_cell(f, t, true, !self.directed || undirected);
        true
    }
}

impl GraphMatrix<crate::cell::Weight> {
    /// Adds a weighted edge between two already-present nodes. A `weight`
    /// of `0` is a no-op (§3: weight `0` is forbidden). Returns `false` if
    /// either endpoint is missing or the weight is zero.
    pub fn add_edge(&mut self, from: &str, to: &str, weight: u32, undirected: bool) -> bool {
        let Some(value) = crate::cell::Weight::new(weight) else {
            return false;
        };
        let (Some(f), Some(t)) = (self.index_of(from), self.index_of(to)) else {
            return false;
        };
        self.write_cell(f, t, value, !self.directed || undirected);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_node_is_idempotent() {
        let mut g = GraphMatrix::<bool>::new(false);
        g.add_node("A");
        g.add_node("A");
        assert_eq!(g.len(), 1);
    }

    #[test]
    fn undirected_edge_is_symmetric() {
        let mut g = GraphMatrix::<bool>::new(false);
        g.add_node("A");
        g.add_node("B");
        assert!(g.add_edge("A", "B", false));
        assert!(g.is_connected("A", "B"));
        assert!(g.is_connected("B", "A"));
    }

    #[test]
    fn directed_edge_defaults_one_way() {
        let mut g = GraphMatrix::<bool>::new(true);
        g.add_node("A");
        g.add_node("B");
        assert!(g.add_edge("A", "B", false));
        assert!(g.is_connected("A", "B"));
        assert!(!g.is_connected("B", "A"));
    }

    #[test]
    fn directed_edge_can_request_mirror() {
        let mut g = GraphMatrix::<bool>::new(true);
        g.add_node("A");
        g.add_node("B");
        assert!(g.add_edge("A", "B", true));
        assert!(g.is_connected("B", "A"));
    }

    #[test]
    fn add_edge_requires_both_endpoints() {
        let mut g = GraphMatrix::<bool>::new(false);
        g.add_node("A");
        assert!(!g.add_edge("A", "B", false));
        assert!(!g.is_connected("A", "B"));
    }

    #[test]
    fn delete_node_shifts_remaining_indices() {
        let mut g = GraphMatrix::<bool>::new(false);
        for n in ["A", "B", "C"] {
            g.add_node(n);
        }
        g.add_edge("A", "C", false);
        g.delete_node("B");
        assert_eq!(g.len(), 2);
        assert!(g.is_connected("A", "C"));
    }

    #[test]
    fn neighbors_follow_insertion_order() {
        let mut g = GraphMatrix::<bool>::new(false);
        for n in ["A", "B", "C", "D"] {
            g.add_node(n);
        }
        g.add_edge("A", "C", false);
        g.add_edge("A", "B", false);
        let names: Vec<_> = g.neighbors("A").into_iter().map(|c| c.neighbor).collect();
        assert_eq!(names, vec!["B".to_string(), "C".to_string()]);
    }

    #[test]
    fn self_loops_are_allowed() {
        let mut g = GraphMatrix::<bool>::new(false);
        g.add_node("A");
        assert!(g.add_edge("A", "A", false));
        assert!(g.is_connected("A", "A"));
    }

    #[test]
    fn weighted_reject_zero_weight() {
        let mut g = GraphMatrix::<crate::cell::Weight>::new(false);
        g.add_node("A");
        g.add_node("B");
        assert!(!g.add_edge("A", "B", 0, false));
    }

    #[test]
    fn is_tree_true_for_acyclic_connected_undirected() {
        let mut g = GraphMatrix::<bool>::new(false);
        for n in ["A", "B", "C", "D"] {
            g.add_node(n);
        }
        g.add_edge("A", "B", false);
        g.add_edge("A", "C", false);
        g.add_edge("A", "D", false);
        assert!(g.is_tree());
    }

    #[test]
    fn is_tree_false_once_a_cycle_closes() {
        let mut g = GraphMatrix::<bool>::new(false);
        for n in ["A", "B", "C", "D"] {
            g.add_node(n);
        }
        g.add_edge("A", "B", false);
        g.add_edge("A", "C", false);
        g.add_edge("A", "D", false);
        g.add_edge("B", "C", false);
        assert!(!g.is_tree());
    }

    #[test]
    fn is_tree_false_when_directed() {
        let mut g = GraphMatrix::<bool>::new(true);
        g.add_node("A");
        g.add_node("B");
        g.add_edge("A", "B", false);
        assert!(!g.is_tree());
    }

    #[test]
    fn empty_graph_is_vacuously_a_tree() {
        let g = GraphMatrix::<bool>::new(false);
        assert!(g.is_tree());
    }
}
