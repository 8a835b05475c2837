//! LanceDB-backed node store and vector index.
//!
//! One `nodes` table carries both concerns: node content with sibling links
//! (read by the context expander) and the embedding column (queried by the
//! similarity searcher). `LanceStore` implements both core traits behind a
//! synchronous API; LanceDB itself is async, so the store owns a tokio
//! runtime and bridges with `block_on`.

pub mod schema;
pub mod search;
pub mod store;

pub use store::LanceStore;
