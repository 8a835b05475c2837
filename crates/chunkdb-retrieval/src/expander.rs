use anyhow::Result;
use std::cmp::Ordering;
use std::sync::Arc;
use tracing::{debug, info};

use chunkdb_core::error::Error;
use chunkdb_core::traits::NodeStore;
use chunkdb_core::types::{Chunk, ContextFilter, Node, ScoredNode, MISSING_DOC_ID};

use crate::searcher::SimilaritySearcher;

pub const DEFAULT_LIMIT: usize = 10;

#[derive(Clone, Copy)]
enum Direction {
    Forward,
    Backward,
}

/// Ranks search candidates and reattaches local reading-order context by
/// walking sibling links in the node store.
pub struct ContextExpander {
    searcher: SimilaritySearcher,
    store: Arc<dyn NodeStore>,
}

impl ContextExpander {
    pub fn new(searcher: SimilaritySearcher, store: Arc<dyn NodeStore>) -> Self {
        Self { searcher, store }
    }

    /// The most relevant chunks for `text`, score-descending, each expanded
    /// with up to `context_size` neighbor texts per direction.
    ///
    /// Ties keep the order the index returned them in (stable sort), so the
    /// result is deterministic whenever the index is. Candidates from the
    /// same document are expanded independently, even when their neighbor
    /// windows overlap.
    pub fn retrieve_relevant(
        &self,
        text: &str,
        filter: &ContextFilter,
        limit: usize,
        context_size: usize,
    ) -> Result<Vec<Chunk>> {
        let mut candidates = self.searcher.search(text, filter, limit)?;
        candidates.sort_by(|a, b| {
            score_of(b)
                .partial_cmp(&score_of(a))
                .unwrap_or(Ordering::Equal)
        });

        let mut chunks = Vec::with_capacity(candidates.len());
        for candidate in &candidates {
            let doc_id = candidate
                .node
                .ref_doc_id
                .clone()
                .unwrap_or_else(|| MISSING_DOC_ID.to_string());
            let previous_texts =
                self.sibling_texts(&candidate.node, context_size, Direction::Backward)?;
            let next_texts =
                self.sibling_texts(&candidate.node, context_size, Direction::Forward)?;
            chunks.push(Chunk {
                score: candidate.score.unwrap_or(0.0),
                doc_id,
                doc_name: candidate.node.file_name.clone(),
                text: candidate.node.text.clone(),
                previous_texts,
                next_texts,
            });
        }
        info!(
            chunks = chunks.len(),
            limit, context_size, "retrieval complete"
        );
        Ok(chunks)
    }

    /// Neighbor texts of `start`, nearest first, following at most `hops`
    /// sibling links. A missing link is the document boundary and ends the
    /// walk silently; a link whose target the store cannot resolve is an
    /// error.
    fn sibling_texts(&self, start: &Node, hops: usize, direction: Direction) -> Result<Vec<String>> {
        let mut texts = Vec::new();
        let mut current = start.clone();
        for _ in 0..hops {
            let link = match direction {
                Direction::Forward => current.next_node_id.as_deref(),
                Direction::Backward => current.prev_node_id.as_deref(),
            };
            let Some(sibling_id) = link else {
                debug!(node = %current.id, "document boundary reached");
                break;
            };
            let sibling = self.store.get_node(sibling_id)?.ok_or_else(|| {
                Error::NotFound(format!("sibling node '{sibling_id}' linked from '{}'", current.id))
            })?;
            texts.push(sibling.text.clone());
            current = sibling;
        }
        Ok(texts)
    }
}

fn score_of(candidate: &ScoredNode) -> f32 {
    candidate.score.unwrap_or(0.0)
}
