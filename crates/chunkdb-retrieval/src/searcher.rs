use anyhow::{Context, Result};
use std::sync::Arc;
use tracing::debug;

use chunkdb_core::error::Error;
use chunkdb_core::traits::{Embedder, NodeStore, VectorIndex};
use chunkdb_core::types::{ContextFilter, ScoredNode};

/// Scored-candidate search over the vector index.
///
/// Embeds the query, runs the approximate nearest-neighbor lookup, and
/// resolves every returned id against the node store. Candidates come back
/// in index order, which is not guaranteed to be score-sorted.
pub struct SimilaritySearcher {
    embedder: Arc<dyn Embedder>,
    index: Arc<dyn VectorIndex>,
    store: Arc<dyn NodeStore>,
}

impl SimilaritySearcher {
    pub fn new(
        embedder: Arc<dyn Embedder>,
        index: Arc<dyn VectorIndex>,
        store: Arc<dyn NodeStore>,
    ) -> Self {
        Self { embedder, index, store }
    }

    /// Up to `top_k` candidates matching `text` under `filter`.
    ///
    /// Fails on embedding or index errors and on malformed candidates: an id
    /// the store cannot resolve, or a node without a file name. No retries
    /// and no partial results at this layer.
    pub fn search(
        &self,
        text: &str,
        filter: &ContextFilter,
        top_k: usize,
    ) -> Result<Vec<ScoredNode>> {
        anyhow::ensure!(top_k >= 1, "top_k must be at least 1");
        let vector = self.embedder.embed(text).context("embedding query")?;
        let hits = self
            .index
            .query(&vector, top_k, filter)
            .context("querying vector index")?;
        debug!(hits = hits.len(), top_k, "similarity search returned candidates");

        let mut candidates = Vec::with_capacity(hits.len());
        for (node_id, score) in hits {
            let node = self
                .store
                .get_node(&node_id)?
                .ok_or_else(|| Error::NotFound(format!("node '{node_id}' surfaced by the index")))?;
            if node.file_name.is_empty() {
                return Err(Error::Retrieval(format!("node '{}' has no file name", node.id)).into());
            }
            candidates.push(ScoredNode { node, score });
        }
        Ok(candidates)
    }
}
