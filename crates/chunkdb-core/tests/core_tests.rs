use std::path::Path;

use chunkdb_core::config::{expand_path, resolve_with_base};
use chunkdb_core::types::{ContextFilter, MISSING_DOC_ID};

#[test]
fn expand_path_env_var() {
    std::env::set_var("CHUNKDB_TEST_DIR", "/tmp/chunkdb");
    let p = expand_path("${CHUNKDB_TEST_DIR}/lancedb");
    assert_eq!(p, Path::new("/tmp/chunkdb/lancedb"));
}

#[test]
fn resolve_with_base_keeps_absolute() {
    let base = Path::new("/srv/chunkdb");
    assert_eq!(resolve_with_base(base, "/var/data"), Path::new("/var/data"));
    assert_eq!(
        resolve_with_base(base, "indexes/nodes"),
        Path::new("/srv/chunkdb/indexes/nodes")
    );
}

#[test]
fn context_filter_emptiness() {
    assert!(ContextFilter::default().is_empty(), "no docs_ids = unrestricted");
    assert!(ContextFilter { docs_ids: Some(vec![]) }.is_empty());
    let restricted = ContextFilter {
        docs_ids: Some(vec!["doc-1".to_string()]),
    };
    assert!(!restricted.is_empty());
}

#[test]
fn missing_doc_id_sentinel_is_wire_compatible() {
    // Existing clients receive "-" for nodes without a source document.
    assert_eq!(MISSING_DOC_ID, "-");
}
