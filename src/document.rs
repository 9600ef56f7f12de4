//! The `.nd` session document codec (§4.5/§6).
//!
//! `draw_controls_frame.py`'s `__save_file`/`__load_file` are the ground
//! truth for the on-disk shape: a JSON object with exactly `graph`,
//! `weighted`, and `canvas`. The `canvas` value is never interpreted here —
//! it round-trips as an opaque [`serde_json::Value`], with its keys
//! re-sorted numerically on save (the original sorts
//! `saved_canvas.keys()` as integers before writing).
//!
//! Loading doesn't round-trip the graph's `directed` flag — it isn't part
//! of the on-disk shape (§6), so a loaded graph is always undirected. A
//! host that needs a directed graph back sets `Session::set_directed`
//! itself after loading.

use std::io::Read as _;
use std::path::Path;

use indexmap::IndexSet;
use serde::de::Error as _;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::cell::{CellValue, Weight};
use crate::error::DocumentError;
use crate::matrix::GraphMatrix;
use crate::session::GraphVariant;

/// A loaded or about-to-be-saved session document: the graph (in whichever
/// variant it was saved as) plus the UI-opaque canvas blob.
#[derive(Debug, Clone)]
pub struct Document {
    pub graph: GraphVariant,
    pub canvas: Value,
}

#[derive(Debug, Serialize, Deserialize)]
struct Wire {
    graph: Vec<Value>,
    weighted: bool,
    canvas: Value,
}

/// Saves `doc` to `path` as a `.nd` file.
pub fn save_document(doc: &Document, path: &Path) -> Result<(), DocumentError> {
    let wire = to_wire(doc);
    let file = std::fs::File::create(path)?;
    serde_json::to_writer_pretty(file, &wire)?;
    log::debug!("saved document to {}", path.display());
    Ok(())
}

/// Loads a `.nd` file from `path`.
pub fn load_document(path: &Path) -> Result<Document, DocumentError> {
    let mut text = String::new();
    std::fs::File::open(path)?.read_to_string(&mut text)?;
    let doc = load_document_str(&text)?;
    log::debug!("loaded document from {}", path.display());
    Ok(doc)
}

/// Parses a `.nd` document already read into memory, e.g. from an embedded
/// resource rather than a filesystem path.
pub fn load_document_str(text: &str) -> Result<Document, DocumentError> {
    let wire: Wire = serde_json::from_str(text)?;
    from_wire(wire)
}

/// Serializes `doc` to a `.nd`-shaped JSON string.
pub fn to_document_string(doc: &Document) -> Result<String, DocumentError> {
    Ok(serde_json::to_string_pretty(&to_wire(doc))?)
}

fn to_wire(doc: &Document) -> Wire {
    let (weighted, graph) = match &doc.graph {
        GraphVariant::Unweighted(g) => (false, matrix_to_rows(g, |c| Value::Bool(*c))),
        GraphVariant::Weighted(g) => (
            true,
            matrix_to_rows(g, |c| serde_json::to_value(c).expect("Weight always serializes")),
        ),
    };
    Wire {
        graph,
        weighted,
        canvas: sort_canvas_keys(&doc.canvas),
    }
}

fn matrix_to_rows<C: CellValue>(graph: &GraphMatrix<C>, cell_to_value: impl Fn(&C) -> Value) -> Vec<Value> {
    let view = graph.matrix();
    let mut rows = Vec::with_capacity(view.cells.len() + 1);
    let names: Vec<Value> = view.names.iter().map(|n| Value::String(n.clone())).collect();
    rows.push(Value::Array(names));
    for row in view.cells {
        rows.push(Value::Array(row.iter().map(&cell_to_value).collect()));
    }
    rows
}

fn from_wire(wire: Wire) -> Result<Document, DocumentError> {
    let mut rows = wire.graph.into_iter();
    let names_value = rows
        .next()
        .ok_or_else(|| DocumentError::Malformed(serde_json::Error::custom("graph has no node-name row")))?;
    let names: IndexSet<String> = serde_json::from_value(names_value)?;

    let graph = if wire.weighted {
        let cells: Vec<Vec<Weight>> = rows
            .map(serde_json::from_value)
            .collect::<Result<_, _>>()?;
        check_shape(&names, &cells)?;
        GraphVariant::Weighted(GraphMatrix::from_parts(names, cells, false))
    } else {
        let cells: Vec<Vec<bool>> = rows
            .map(serde_json::from_value)
            .collect::<Result<_, _>>()?;
        check_shape(&names, &cells)?;
        GraphVariant::Unweighted(GraphMatrix::from_parts(names, cells, false))
    };

    Ok(Document {
        graph,
        canvas: wire.canvas,
    })
}

fn check_shape<C>(names: &IndexSet<String>, cells: &[Vec<C>]) -> Result<(), DocumentError> {
    let k = names.len();
    if cells.len() != k || cells.iter().any(|row| row.len() != k) {
        return Err(DocumentError::Malformed(serde_json::Error::custom(format!(
            "graph declares {k} nodes but rows are not a square {k}x{k} grid"
        ))));
    }
    Ok(())
}

/// Returns a copy of `value` with every JSON object's keys re-ordered by
/// their integer value ascending (non-numeric keys sort after numeric
/// ones, in their original relative order).
fn sort_canvas_keys(value: &Value) -> Value {
    match value {
        Value::Object(map) => {
            let mut entries: Vec<(&String, &Value)> = map.iter().collect();
            entries.sort_by_key(|(k, _)| k.parse::<i64>().unwrap_or(i64::MAX));
            let mut sorted = Map::new();
            for (k, v) in entries {
                sorted.insert(k.clone(), sort_canvas_keys(v));
            }
            Value::Object(sorted)
        }
        other => other.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cell::Weight;

    fn sample_weighted_document() -> Document {
        let mut g = GraphMatrix::<Weight>::new(false);
        g.add_node("A");
        g.add_node("B");
        g.add_edge("A", "B", 5, false);
        let canvas = serde_json::json!({
            "10": ["oval", [1, 2, 3, 4], ["node", "node_A"]],
            "2": ["text", [5, 6], ["node", "nodename_A"]],
        });
        Document {
            graph: GraphVariant::Weighted(g),
            canvas,
        }
    }

    #[test]
    fn round_trips_a_weighted_graph() {
        let doc = sample_weighted_document();
        let text = to_document_string(&doc).unwrap();
        let loaded = load_document_str(&text).unwrap();
        assert!(loaded.graph.is_weighted());
        assert!(loaded.graph.has_edge("A", "B"));
        assert_eq!(loaded.graph.node_names(), vec!["A".to_string(), "B".to_string()]);
    }

    #[test]
    fn canvas_keys_are_sorted_numerically_on_save() {
        let doc = sample_weighted_document();
        let text = to_document_string(&doc).unwrap();
        let pos_2 = text.find("\"2\"").unwrap();
        let pos_10 = text.find("\"10\"").unwrap();
        assert!(pos_2 < pos_10);
    }

    #[test]
    fn round_trips_an_unweighted_graph() {
        let mut g = GraphMatrix::<bool>::new(false);
        g.add_node("A");
        g.add_node("B");
        g.add_edge("A", "B", false);
        let doc = Document {
            graph: GraphVariant::Unweighted(g),
            canvas: serde_json::json!({}),
        };
        let text = to_document_string(&doc).unwrap();
        let loaded = load_document_str(&text).unwrap();
        assert!(!loaded.graph.is_weighted());
        assert!(loaded.graph.has_edge("A", "B"));
    }

    #[test]
    fn rejects_a_weighted_flag_that_disagrees_with_cell_shape() {
        let malformed = r#"{"graph": [["A","B"], [false, true], [true, false]], "weighted": true, "canvas": {}}"#;
        assert!(load_document_str(malformed).is_err());
    }

    #[test]
    fn rejects_a_non_square_grid() {
        let malformed = r#"{"graph": [["A","B"], [false]], "weighted": false, "canvas": {}}"#;
        assert!(load_document_str(malformed).is_err());
    }

    #[test]
    fn zero_weight_imports_as_absent() {
        let text = r#"{"graph": [["A","B"], [0, 0], [0, 0]], "weighted": true, "canvas": {}}"#;
        let loaded = load_document_str(text).unwrap();
        assert!(!loaded.graph.has_edge("A", "B"));
    }
}
