use arrow_schema::{DataType, Field, Schema};
use std::sync::Arc;

pub const EMBEDDING_DIM: i32 = 1024;

pub fn build_nodes_schema() -> Arc<Schema> {
    Arc::new(Schema::new(vec![
        Field::new("id", DataType::Utf8, false),
        Field::new("ref_doc_id", DataType::Utf8, true),
        Field::new("file_name", DataType::Utf8, false),
        Field::new("text", DataType::Utf8, false),
        Field::new("prev_id", DataType::Utf8, true),
        Field::new("next_id", DataType::Utf8, true),
        Field::new(
            "vector",
            DataType::FixedSizeList(
                Arc::new(Field::new("item", DataType::Float32, true)),
                EMBEDDING_DIM,
            ),
            true,
        ),
    ]))
}
