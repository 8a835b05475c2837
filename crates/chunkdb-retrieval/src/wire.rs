//! JSON shapes of the chunks endpoint.
//!
//! The HTTP layer lives outside this workspace, but the request body it
//! accepts and the chunk shape it serializes are fixed here so existing
//! clients keep working.

use serde::{Deserialize, Serialize};

use chunkdb_core::types::{Chunk, ContextFilter};

use crate::expander::DEFAULT_LIMIT;

/// Body of a chunks request.
///
/// `prev_next_chunks` is the context size: how many neighbor chunks to
/// attach on each side of every result.
#[derive(Debug, Clone, Deserialize)]
pub struct ChunksRequest {
    pub text: String,
    #[serde(default)]
    pub context_filter: Option<ContextFilter>,
    #[serde(default = "default_limit")]
    pub limit: usize,
    #[serde(default)]
    pub prev_next_chunks: usize,
}

fn default_limit() -> usize {
    DEFAULT_LIMIT
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChunkDocument {
    pub doc_id: String,
    pub doc_filename: String,
}

/// One retrieved chunk as serialized to clients.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChunkResponse {
    pub score: f32,
    pub document: ChunkDocument,
    pub text: String,
    pub previous_texts: Vec<String>,
    pub next_texts: Vec<String>,
}

impl From<Chunk> for ChunkResponse {
    fn from(chunk: Chunk) -> Self {
        Self {
            score: chunk.score,
            document: ChunkDocument {
                doc_id: chunk.doc_id,
                doc_filename: chunk.doc_name,
            },
            text: chunk.text,
            previous_texts: chunk.previous_texts,
            next_texts: chunk.next_texts,
        }
    }
}
