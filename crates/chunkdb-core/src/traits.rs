use crate::types::{ContextFilter, Node, NodeId};

pub trait Embedder: Send + Sync {
    fn dim(&self) -> usize;
    fn embed(&self, text: &str) -> anyhow::Result<Vec<f32>>;
}

pub trait VectorIndex: Send + Sync {
    /// Approximate nearest neighbors of `vector`, restricted to `filter`,
    /// capped at `top_k`. The returned order carries no guarantee; callers
    /// must sort by score themselves. A `None` score means the index did
    /// not report one.
    fn query(
        &self,
        vector: &[f32],
        top_k: usize,
        filter: &ContextFilter,
    ) -> anyhow::Result<Vec<(NodeId, Option<f32>)>>;
}

pub trait NodeStore: Send + Sync {
    fn get_node(&self, id: &str) -> anyhow::Result<Option<Node>>;
}
