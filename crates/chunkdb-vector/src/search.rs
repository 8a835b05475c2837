use anyhow::Result;
use arrow_array::Float32Array;
use futures::TryStreamExt;
use lancedb::query::{ExecutableQuery, QueryBase};
use tracing::debug;

use chunkdb_core::traits::VectorIndex;
use chunkdb_core::types::{ContextFilter, NodeId};

use crate::store::{required_str, sql_escape, LanceStore};

impl VectorIndex for LanceStore {
    fn query(
        &self,
        vector: &[f32],
        top_k: usize,
        filter: &ContextFilter,
    ) -> Result<Vec<(NodeId, Option<f32>)>> {
        anyhow::ensure!(top_k >= 1, "top_k must be at least 1");
        self.rt.block_on(async {
            let table = self.conn.open_table(&self.table_name).execute().await?;
            let mut query = table.vector_search(vector.to_vec())?.limit(top_k);
            if let Some(expr) = docs_filter_expr(filter) {
                query = query.only_if(expr);
            }
            let mut stream = query.execute().await?;
            let mut hits = Vec::new();
            while let Some(batch) = TryStreamExt::try_next(&mut stream).await? {
                for row in 0..batch.num_rows() {
                    let id = required_str(&batch, "id", row)?;
                    // LanceDB reports a distance; similarity is its inverse.
                    let score = batch
                        .column_by_name("_distance")
                        .and_then(|c| c.as_any().downcast_ref::<Float32Array>())
                        .map(|c| 1.0 - c.value(row));
                    hits.push((id, score));
                }
            }
            debug!(table = %self.table_name, top_k, hits = hits.len(), "vector query");
            Ok(hits)
        })
    }
}

fn docs_filter_expr(filter: &ContextFilter) -> Option<String> {
    if filter.is_empty() {
        return None;
    }
    let ids = filter.docs_ids.as_ref()?;
    let quoted: Vec<String> = ids
        .iter()
        .map(|id| format!("'{}'", sql_escape(id)))
        .collect();
    Some(format!("ref_doc_id IN ({})", quoted.join(", ")))
}
