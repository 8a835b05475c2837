use anyhow::Result;
use futures::TryStreamExt;
use lancedb::query::{ExecutableQuery, QueryBase};
use lancedb::{connect, Connection};
use std::path::Path;
use std::sync::Arc;
use tracing::debug;

use arrow_array::{
    Array, FixedSizeListArray, RecordBatch, RecordBatchIterator, StringArray,
};

use chunkdb_core::traits::NodeStore;
use chunkdb_core::types::Node;

use crate::schema::{build_nodes_schema, EMBEDDING_DIM};

/// Handle to a LanceDB `nodes` table. Long-lived and shared read-only across
/// concurrent retrieval calls; constructed once at process start.
pub struct LanceStore {
    pub(crate) rt: tokio::runtime::Runtime,
    pub(crate) conn: Connection,
    pub(crate) table_name: String,
}

impl LanceStore {
    /// Open (and if needed create) the nodes table at `db_path`.
    ///
    /// Must be called from a non-async context: the store owns its own
    /// runtime for bridging into LanceDB.
    pub fn open(db_path: &Path, table_name: &str) -> Result<Self> {
        let rt = tokio::runtime::Runtime::new()?;
        let conn =
            rt.block_on(async { connect(db_path.to_string_lossy().as_ref()).execute().await })?;
        rt.block_on(ensure_nodes_table(&conn, table_name))?;
        Ok(Self {
            rt,
            conn,
            table_name: table_name.to_string(),
        })
    }

    /// Insert node rows with their embedding vectors. Used by tests and
    /// seeding tools; the ingestion pipeline proper lives elsewhere.
    pub fn insert_nodes(&self, nodes: &[Node], vectors: &[Vec<f32>]) -> Result<()> {
        anyhow::ensure!(
            nodes.len() == vectors.len(),
            "got {} nodes but {} vectors",
            nodes.len(),
            vectors.len()
        );
        if nodes.is_empty() {
            return Ok(());
        }
        let batch = nodes_to_record_batch(nodes, vectors)?;
        let schema = batch.schema();
        let reader = Box::new(RecordBatchIterator::new(vec![Ok(batch)].into_iter(), schema));
        self.rt.block_on(async {
            let table = self.conn.open_table(&self.table_name).execute().await?;
            table.add(reader).execute().await?;
            debug!(table = %self.table_name, rows = nodes.len(), "inserted nodes");
            Ok(())
        })
    }
}

impl NodeStore for LanceStore {
    fn get_node(&self, id: &str) -> Result<Option<Node>> {
        self.rt.block_on(async {
            let table = self.conn.open_table(&self.table_name).execute().await?;
            let mut stream = table
                .query()
                .only_if(format!("id = '{}'", sql_escape(id)))
                .limit(1)
                .execute()
                .await?;
            while let Some(batch) = TryStreamExt::try_next(&mut stream).await? {
                if batch.num_rows() == 0 {
                    continue;
                }
                return Ok(Some(decode_node(&batch, 0)?));
            }
            Ok(None)
        })
    }
}

async fn ensure_nodes_table(conn: &Connection, name: &str) -> Result<()> {
    let names = conn.table_names().execute().await?;
    if names.contains(&name.to_string()) {
        return Ok(());
    }
    // create empty table with 0 rows
    let schema = build_nodes_schema();
    let iter = RecordBatchIterator::new(vec![].into_iter(), schema);
    conn.create_table(name, Box::new(iter)).execute().await?;
    Ok(())
}

pub(crate) fn sql_escape(s: &str) -> String {
    s.replace('\'', "''")
}

pub(crate) fn required_str(batch: &RecordBatch, column: &str, row: usize) -> Result<String> {
    let col = batch
        .column_by_name(column)
        .and_then(|c| c.as_any().downcast_ref::<StringArray>())
        .ok_or_else(|| anyhow::anyhow!("nodes.{column} column missing"))?;
    anyhow::ensure!(!col.is_null(row), "nodes.{column} is null");
    Ok(col.value(row).to_string())
}

pub(crate) fn optional_str(batch: &RecordBatch, column: &str, row: usize) -> Result<Option<String>> {
    let col = batch
        .column_by_name(column)
        .and_then(|c| c.as_any().downcast_ref::<StringArray>())
        .ok_or_else(|| anyhow::anyhow!("nodes.{column} column missing"))?;
    if col.is_null(row) {
        return Ok(None);
    }
    Ok(Some(col.value(row).to_string()))
}

pub(crate) fn decode_node(batch: &RecordBatch, row: usize) -> Result<Node> {
    Ok(Node {
        id: required_str(batch, "id", row)?,
        text: required_str(batch, "text", row)?,
        file_name: required_str(batch, "file_name", row)?,
        ref_doc_id: optional_str(batch, "ref_doc_id", row)?,
        prev_node_id: optional_str(batch, "prev_id", row)?,
        next_node_id: optional_str(batch, "next_id", row)?,
    })
}

fn nodes_to_record_batch(nodes: &[Node], vectors: &[Vec<f32>]) -> Result<RecordBatch> {
    let schema = build_nodes_schema();
    let mut ids = Vec::new();
    let mut ref_doc_ids: Vec<Option<String>> = Vec::new();
    let mut file_names = Vec::new();
    let mut texts = Vec::new();
    let mut prev_ids: Vec<Option<String>> = Vec::new();
    let mut next_ids: Vec<Option<String>> = Vec::new();
    let mut vecs: Vec<Option<Vec<Option<f32>>>> = Vec::new();
    for (node, vector) in nodes.iter().zip(vectors.iter()) {
        anyhow::ensure!(
            vector.len() == EMBEDDING_DIM as usize,
            "node {} vector has dim {}, expected {}",
            node.id,
            vector.len(),
            EMBEDDING_DIM
        );
        ids.push(node.id.clone());
        ref_doc_ids.push(node.ref_doc_id.clone());
        file_names.push(node.file_name.clone());
        texts.push(node.text.clone());
        prev_ids.push(node.prev_node_id.clone());
        next_ids.push(node.next_node_id.clone());
        vecs.push(Some(vector.iter().map(|&x| Some(x)).collect()));
    }
    let batch = RecordBatch::try_new(
        schema,
        vec![
            Arc::new(StringArray::from(ids)),
            Arc::new(StringArray::from(ref_doc_ids)),
            Arc::new(StringArray::from(file_names)),
            Arc::new(StringArray::from(texts)),
            Arc::new(StringArray::from(prev_ids)),
            Arc::new(StringArray::from(next_ids)),
            Arc::new(FixedSizeListArray::from_iter_primitive::<
                arrow_array::types::Float32Type,
                _,
                _,
            >(vecs.into_iter(), EMBEDDING_DIM)),
        ],
    )?;
    Ok(batch)
}
