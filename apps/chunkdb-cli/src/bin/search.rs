use std::env;
use std::path::PathBuf;
use std::sync::Arc;

use chunkdb_core::config::{expand_path, Config};
use chunkdb_core::types::ContextFilter;
use chunkdb_embed::default_embedder;
use chunkdb_retrieval::wire::ChunkResponse;
use chunkdb_retrieval::{ContextExpander, SimilaritySearcher, DEFAULT_LIMIT};
use chunkdb_vector::LanceStore;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let args: Vec<String> = env::args().collect();
    if args.len() < 2 {
        eprintln!("Usage: {} <query> [--limit N] [--context N] [--doc ID]... [db_path] [table_name]", args[0]);
        eprintln!("Example: {} 'fire starting basics' --limit 5 --context 2 ./data/lancedb nodes", args[0]);
        std::process::exit(1);
    }
    let query_text = &args[1];

    // Config supplies defaults; positional args override.
    let config = Config::load()?;
    let mut db_path = config
        .get::<String>("database.path")
        .map(expand_path)
        .unwrap_or_else(|_| PathBuf::from("./data/lancedb"));
    let mut table_name = config
        .get::<String>("database.table")
        .unwrap_or_else(|_| "nodes".to_string());
    let mut limit = DEFAULT_LIMIT;
    let mut context_size = 0usize;
    let mut doc_ids: Vec<String> = Vec::new();

    let mut positional_seen = 0usize;
    let mut i = 2;
    while i < args.len() {
        match args[i].as_str() {
            "--limit" => {
                limit = parse_number(&args, i, "--limit");
                i += 1;
            }
            "--context" => {
                context_size = parse_number(&args, i, "--context");
                i += 1;
            }
            "--doc" => {
                if i + 1 < args.len() {
                    doc_ids.push(args[i + 1].clone());
                    i += 1;
                } else {
                    eprintln!("Error: --doc requires a document id");
                    std::process::exit(1);
                }
            }
            _ if !args[i].starts_with('-') => {
                if positional_seen == 0 {
                    db_path = PathBuf::from(&args[i]);
                } else {
                    table_name = args[i].clone();
                }
                positional_seen += 1;
            }
            _ => {}
        }
        i += 1;
    }

    println!("🔍 chunkdb-search\n================");
    println!("Query: {}", query_text);
    println!("Database path: {}", db_path.display());
    println!("Table: {}", table_name);

    let embedder = default_embedder()?;
    let store = Arc::new(LanceStore::open(&db_path, &table_name)?);
    let searcher = SimilaritySearcher::new(embedder, store.clone(), store.clone());
    let expander = ContextExpander::new(searcher, store);

    let filter = if doc_ids.is_empty() {
        ContextFilter::default()
    } else {
        ContextFilter { docs_ids: Some(doc_ids) }
    };
    let chunks = expander.retrieve_relevant(query_text, &filter, limit, context_size)?;

    println!("\n🔍 Found {} chunks for: \"{}\"", chunks.len(), query_text);
    for (rank, chunk) in chunks.iter().enumerate() {
        println!(
            "\n  {}. score={:.4}  doc_id={}  file={}",
            rank + 1,
            chunk.score,
            chunk.doc_id,
            chunk.doc_name
        );
        println!("     📝 {}", chunk.text);
        if !chunk.previous_texts.is_empty() || !chunk.next_texts.is_empty() {
            println!(
                "     ⬅ {} previous, ➡ {} next context chunks",
                chunk.previous_texts.len(),
                chunk.next_texts.len()
            );
        }
    }

    let responses: Vec<ChunkResponse> = chunks.into_iter().map(ChunkResponse::from).collect();
    println!("\n{}", serde_json::to_string_pretty(&responses)?);
    Ok(())
}

fn parse_number(args: &[String], i: usize, flag: &str) -> usize {
    if let Some(raw) = args.get(i + 1) {
        if let Ok(n) = raw.parse::<usize>() {
            return n;
        }
    }
    eprintln!("Error: {flag} requires a number");
    std::process::exit(1);
}
