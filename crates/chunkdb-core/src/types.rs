//! Domain types shared by the retrieval core and its storage backends.

use serde::{Deserialize, Serialize};

pub type NodeId = String;

/// Sentinel `doc_id` emitted for chunks whose node carries no back-reference
/// to a source document. Existing clients depend on the literal value.
pub const MISSING_DOC_ID: &str = "-";

/// A stored unit of document content, linked to its reading-order neighbors.
///
/// Nodes are owned by the document store; the retrieval core only reads them.
/// `file_name` is required — a node without one is malformed and fails the
/// retrieval call that surfaced it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    pub id: NodeId,
    pub text: String,
    pub file_name: String,
    /// Stable id of the source document, if the node kept a back-reference.
    pub ref_doc_id: Option<String>,
    pub prev_node_id: Option<NodeId>,
    pub next_node_id: Option<NodeId>,
}

/// A node surfaced by the similarity index together with its score.
///
/// Exists only for the duration of one retrieval call. `score` is in the
/// index's native range and may be absent; ranking treats absence as 0.0.
#[derive(Debug, Clone)]
pub struct ScoredNode {
    pub node: Node,
    pub score: Option<f32>,
}

/// Restricts a search to a subset of source documents.
///
/// `docs_ids: None` (or an empty list) selects the whole index. The field
/// name matches the JSON body accepted by existing clients.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ContextFilter {
    pub docs_ids: Option<Vec<String>>,
}

impl ContextFilter {
    pub fn is_empty(&self) -> bool {
        self.docs_ids.as_ref().map_or(true, |ids| ids.is_empty())
    }
}

/// A retrieved chunk with relevance score and optional reading-order context.
///
/// `previous_texts` and `next_texts` are ordered nearest-first and are always
/// present; both are empty when expansion was not requested
/// (`context_size == 0`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Chunk {
    pub score: f32,
    pub doc_id: String,
    pub doc_name: String,
    pub text: String,
    pub previous_texts: Vec<String>,
    pub next_texts: Vec<String>,
}
