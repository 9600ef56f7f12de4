//! The session controller (§4.4): the editing state a host UI hangs its
//! toolbar and tab chrome off of.
//!
//! `state_model.py`'s `StateModel` is a process-wide singleton reached via
//! `__new__`. Per §9's redesign note, `Session` here is an ordinary owned
//! value instead — construct one at program start and thread it through,
//! or wrap it in `Rc<RefCell<_>>`/a thread-local if an embedding needs
//! shared access. Nothing below assumes there is exactly one instance.

use std::path::{Path, PathBuf};

use crate::algo::{
    self, AStarFrame, DijkstraFrame, KruskalFrame, PrimFrame, TraversalFrame, TreeOrderFrame,
};
use crate::cell::{CellValue, Weight};
use crate::matrix::GraphMatrix;
use crate::names::NodeNameGenerator;

/// Which editing tool the UI currently has selected. The core only stores
/// and returns this; it has no behavioral effect on the Graph Store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditMode {
    Nodes,
    Edges,
}

/// A graph in either variant. `Session` holds exactly one of these at a
/// time — switching variants means replacing it via [`Session::create_new`]
/// or [`Session::set_graph_matrix`], never mutating in place (§3: "a graph
/// cannot switch variant without being reset").
#[derive(Debug, Clone)]
pub enum GraphVariant {
    Unweighted(GraphMatrix<bool>),
    Weighted(GraphMatrix<Weight>),
}

impl GraphVariant {
    pub fn is_weighted(&self) -> bool {
        matches!(self, GraphVariant::Weighted(_))
    }

    pub fn len(&self) -> usize {
        match self {
            GraphVariant::Unweighted(g) => g.len(),
            GraphVariant::Weighted(g) => g.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn has_node(&self, name: &str) -> bool {
        match self {
            GraphVariant::Unweighted(g) => g.has_node(name),
            GraphVariant::Weighted(g) => g.has_node(name),
        }
    }

    pub fn node_names(&self) -> Vec<String> {
        match self {
            GraphVariant::Unweighted(g) => g.node_names().map(str::to_owned).collect(),
            GraphVariant::Weighted(g) => g.node_names().map(str::to_owned).collect(),
        }
    }

    pub fn add_node(&mut self, name: impl Into<String>) {
        match self {
            GraphVariant::Unweighted(g) => g.add_node(name),
            GraphVariant::Weighted(g) => g.add_node(name),
        }
    }

    pub fn delete_node(&mut self, name: &str) {
        match self {
            GraphVariant::Unweighted(g) => g.delete_node(name),
            GraphVariant::Weighted(g) => g.delete_node(name),
        }
    }

    pub fn delete_edge(&mut self, from: &str, to: &str, undirected: bool) {
        match self {
            GraphVariant::Unweighted(g) => g.delete_edge(from, to, undirected),
            GraphVariant::Weighted(g) => g.delete_edge(from, to, undirected),
        }
    }

    /// `true` iff an edge exists between `from` and `to`.
    pub fn has_edge(&self, from: &str, to: &str) -> bool {
        match self {
            GraphVariant::Unweighted(g) => g.is_connected(from, to),
            GraphVariant::Weighted(g) => g.is_connected(from, to).is_present(),
        }
    }

    pub fn is_tree(&self) -> bool {
        match self {
            GraphVariant::Unweighted(g) => g.is_tree(),
            GraphVariant::Weighted(g) => g.is_tree(),
        }
    }

    /// Adds an edge, using `weight` when the graph is weighted and ignoring
    /// it otherwise. A weighted graph with no `weight` supplied is a no-op
    /// (mirrors `add_edge`'s "require exists" no-op behavior for a missing
    /// precondition).
    pub fn add_edge(&mut self, from: &str, to: &str, undirected: bool, weight: Option<u32>) -> bool {
        match self {
            GraphVariant::Unweighted(g) => g.add_edge(from, to, undirected),
            GraphVariant::Weighted(g) => match weight {
                Some(w) => g.add_edge(from, to, w, undirected),
                None => false,
            },
        }
    }
}

/// The session controller: current graph, file path, dirty flag, and the
/// editing parameters a host UI's toolbar reads and writes.
#[derive(Debug, Clone)]
pub struct Session {
    graph: GraphVariant,
    file_path: Option<PathBuf>,
    dirty: bool,
    mode: EditMode,
    directed: bool,
    current_weight: Option<u32>,
    current_tab_tag: Option<String>,
    names: NodeNameGenerator,
}

impl Default for Session {
    /// A new session starts with an empty weighted, undirected graph, no
    /// file path, and `dirty = false` (§3).
    fn default() -> Self {
        Session {
            graph: GraphVariant::Weighted(GraphMatrix::new(false)),
            file_path: None,
            dirty: false,
            mode: EditMode::Nodes,
            directed: false,
            current_weight: None,
            current_tab_tag: None,
            names: NodeNameGenerator::new(),
        }
    }
}

impl Session {
    pub fn new() -> Self {
        Session::default()
    }

    /// Replaces the graph with an empty one of the requested variant,
    /// resets the name generator, and clears the dirty flag and file path.
    pub fn create_new(&mut self, weighted: bool) {
        self.graph = if weighted {
            GraphVariant::Weighted(GraphMatrix::new(self.directed))
        } else {
            GraphVariant::Unweighted(GraphMatrix::new(self.directed))
        };
        self.names = NodeNameGenerator::new();
        self.dirty = false;
        self.file_path = None;
        log::debug!("session reset (weighted={weighted})");
    }

    pub fn is_changed(&self) -> bool {
        self.dirty
    }

    pub fn set_changed(&mut self, changed: bool) {
        self.dirty = changed;
    }

    pub fn get_filename(&self) -> Option<&Path> {
        self.file_path.as_deref()
    }

    pub fn set_filename(&mut self, path: impl Into<PathBuf>) {
        self.file_path = Some(path.into());
    }

    pub fn is_tree(&self) -> bool {
        self.graph.is_tree()
    }

    pub fn is_weighted(&self) -> bool {
        self.graph.is_weighted()
    }

    pub fn get_graph_matrix(&self) -> &GraphVariant {
        &self.graph
    }

    /// Replaces the graph wholesale (e.g. after loading a document) and
    /// re-seeds the name generator from the incoming graph's node names,
    /// mirroring `state_model.py`'s `set_graph_matrix`.
    pub fn set_graph_matrix(&mut self, graph: GraphVariant) {
        let names = graph.node_names();
        self.names.reseed(names.iter().map(String::as_str));
        self.graph = graph;
        self.dirty = false;
    }

    pub fn mode(&self) -> EditMode {
        self.mode
    }

    pub fn set_mode(&mut self, mode: EditMode) {
        self.mode = mode;
    }

    pub fn directed(&self) -> bool {
        self.directed
    }

    pub fn set_directed(&mut self, directed: bool) {
        self.directed = directed;
    }

    pub fn current_weight(&self) -> Option<u32> {
        self.current_weight
    }

    pub fn set_current_weight(&mut self, weight: Option<u32>) {
        self.current_weight = weight;
    }

    pub fn current_tab_tag(&self) -> Option<&str> {
        self.current_tab_tag.as_deref()
    }

    pub fn set_current_tab_tag(&mut self, tag: impl Into<String>) {
        self.current_tab_tag = Some(tag.into());
    }

    /// The next auto-generated node name, without adding it to the graph.
    pub fn next_node_name(&mut self) -> String {
        self.names.next_name()
    }

    pub fn add_node(&mut self, name: impl Into<String>) {
        self.graph.add_node(name);
        self.dirty = true;
    }

    pub fn delete_node(&mut self, name: &str) {
        self.graph.delete_node(name);
        self.dirty = true;
    }

    pub fn has_edge(&self, from: &str, to: &str) -> bool {
        self.graph.has_edge(from, to)
    }

    /// Adds an edge using the session's `current_weight` (ignored on an
    /// unweighted graph). Whether it also mirrors is governed by the
    /// graph's own `directed` flag, not by this call; directed graphs that
    /// want a specific edge mirrored should go through [`GraphVariant`]
    /// directly.
    pub fn add_edge(&mut self, from: &str, to: &str) -> bool {
        let ok = self
            .graph
            .add_edge(from, to, false, self.current_weight);
        if ok {
            self.dirty = true;
        }
        ok
    }

    pub fn delete_edge(&mut self, from: &str, to: &str) {
        self.graph.delete_edge(from, to, false);
        self.dirty = true;
    }

    /// Breadth-first traversal over the current graph, whichever variant
    /// it is (§4.2's BFS/DFS are generic over `CellValue`).
    pub fn breadth_first(&self, start: &str, end: Option<&str>) -> Option<Box<dyn Iterator<Item = TraversalFrame> + '_>> {
        match &self.graph {
            GraphVariant::Unweighted(g) => {
                algo::breadth_first(g, start, end).map(|it| Box::new(it) as Box<dyn Iterator<Item = TraversalFrame>>)
            }
            GraphVariant::Weighted(g) => {
                algo::breadth_first(g, start, end).map(|it| Box::new(it) as Box<dyn Iterator<Item = TraversalFrame>>)
            }
        }
    }

    pub fn depth_first(&self, start: &str, end: Option<&str>) -> Option<Box<dyn Iterator<Item = TraversalFrame> + '_>> {
        match &self.graph {
            GraphVariant::Unweighted(g) => {
                algo::depth_first(g, start, end).map(|it| Box::new(it) as Box<dyn Iterator<Item = TraversalFrame>>)
            }
            GraphVariant::Weighted(g) => {
                algo::depth_first(g, start, end).map(|it| Box::new(it) as Box<dyn Iterator<Item = TraversalFrame>>)
            }
        }
    }

    pub fn pre_order(&self, start: &str, end: Option<&str>) -> Option<Box<dyn Iterator<Item = TreeOrderFrame> + '_>> {
        match &self.graph {
            GraphVariant::Unweighted(g) => {
                algo::pre_order(g, start, end).map(|it| Box::new(it) as Box<dyn Iterator<Item = TreeOrderFrame>>)
            }
            GraphVariant::Weighted(g) => {
                algo::pre_order(g, start, end).map(|it| Box::new(it) as Box<dyn Iterator<Item = TreeOrderFrame>>)
            }
        }
    }

    pub fn in_order(&self, start: &str, end: Option<&str>) -> Option<Box<dyn Iterator<Item = TreeOrderFrame> + '_>> {
        match &self.graph {
            GraphVariant::Unweighted(g) => {
                algo::in_order(g, start, end).map(|it| Box::new(it) as Box<dyn Iterator<Item = TreeOrderFrame>>)
            }
            GraphVariant::Weighted(g) => {
                algo::in_order(g, start, end).map(|it| Box::new(it) as Box<dyn Iterator<Item = TreeOrderFrame>>)
            }
        }
    }

    pub fn post_order(&self, start: &str, end: Option<&str>) -> Option<Box<dyn Iterator<Item = TreeOrderFrame> + '_>> {
        match &self.graph {
            GraphVariant::Unweighted(g) => {
                algo::post_order(g, start, end).map(|it| Box::new(it) as Box<dyn Iterator<Item = TreeOrderFrame>>)
            }
            GraphVariant::Weighted(g) => {
                algo::post_order(g, start, end).map(|it| Box::new(it) as Box<dyn Iterator<Item = TreeOrderFrame>>)
            }
        }
    }

    /// Dijkstra over the current graph, if it's weighted. `None` (the
    /// `VariantMismatch` failure mode of §7) if it isn't, or if `start` is
    /// unknown.
    pub fn dijkstra(&self, start: &str, end: Option<&str>) -> Option<Box<dyn Iterator<Item = DijkstraFrame> + '_>> {
        match &self.graph {
            GraphVariant::Weighted(g) => algo::dijkstra(g, start, end).map(|it| Box::new(it) as Box<dyn Iterator<Item = DijkstraFrame>>),
            GraphVariant::Unweighted(_) => None,
        }
    }

    /// A* over the current graph, if it's weighted.
    pub fn a_star<H: Fn(&str, &str) -> u32 + 'static>(
        &self,
        start: &str,
        end: &str,
        heuristic: H,
    ) -> Option<Box<dyn Iterator<Item = AStarFrame> + '_>> {
        match &self.graph {
            GraphVariant::Weighted(g) => {
                algo::a_star(g, start, end, heuristic).map(|it| Box::new(it) as Box<dyn Iterator<Item = AStarFrame>>)
            }
            GraphVariant::Unweighted(_) => None,
        }
    }

    pub fn prims_mst(&self, start: Option<&str>) -> Option<Box<dyn Iterator<Item = PrimFrame> + '_>> {
        match &self.graph {
            GraphVariant::Weighted(g) => algo::prims_mst(g, start).map(|it| Box::new(it) as Box<dyn Iterator<Item = PrimFrame>>),
            GraphVariant::Unweighted(_) => None,
        }
    }

    pub fn kruskals_mst(&self) -> Option<Box<dyn Iterator<Item = KruskalFrame> + '_>> {
        match &self.graph {
            GraphVariant::Weighted(g) => algo::kruskals_mst(g).map(|it| Box::new(it) as Box<dyn Iterator<Item = KruskalFrame>>),
            GraphVariant::Unweighted(_) => None,
        }
    }
}
