use chunkdb_embed::{default_embedder, EMBEDDING_DIM};

#[test]
fn fake_embedder_shapes_and_determinism() {
    // Force fake embedder to avoid loading the large model
    std::env::set_var("CHUNKDB_USE_FAKE_EMBEDDINGS", "1");

    let embedder = default_embedder().expect("embedder");
    assert_eq!(embedder.dim(), EMBEDDING_DIM);

    let v1 = embedder.embed("hello world").expect("embed");
    let v2 = embedder.embed("hello world").expect("embed");

    assert_eq!(v1.len(), EMBEDDING_DIM, "embedding dim is 1024");

    // Norm approximately 1.0
    let norm: f32 = v1.iter().map(|x| x * x).sum::<f32>().sqrt();
    assert!((norm - 1.0).abs() <= 1e-3, "vector is L2-normalized (norm={norm})");

    // Deterministic for same input
    for (a, b) in v1.iter().zip(v2.iter()) {
        assert!((a - b).abs() <= 1e-6);
    }
}

#[test]
fn fake_embedder_distinguishes_texts() {
    std::env::set_var("CHUNKDB_USE_FAKE_EMBEDDINGS", "1");
    let embedder = default_embedder().expect("embedder");
    let a = embedder.embed("cats purr on the windowsill").expect("embed");
    let b = embedder.embed("router firmware update schedule").expect("embed");
    let dot: f32 = a.iter().zip(b.iter()).map(|(x, y)| x * y).sum();
    assert!(dot < 0.99, "unrelated texts should not collapse to one vector");
}
