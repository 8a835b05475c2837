//! Chunk retrieval over a vector index with reading-order context expansion.
//!
//! `SimilaritySearcher` wraps the embedding model, vector index and node
//! store behind one scored-candidate search; `ContextExpander` ranks the
//! candidates and walks sibling links to reattach each chunk's surrounding
//! text. Collaborators are injected at construction and shared read-only
//! across calls; the crate holds no other state.

pub mod expander;
pub mod searcher;
pub mod wire;

pub use expander::{ContextExpander, DEFAULT_LIMIT};
pub use searcher::SimilaritySearcher;
