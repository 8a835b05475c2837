//! Embedding collaborators for the retrieval core.
//!
//! `EmbeddingModel` runs BGE-M3 locally through candle; `FakeEmbedder` is a
//! deterministic hash-based stand-in for tests, selected with
//! `CHUNKDB_USE_FAKE_EMBEDDINGS=1`.

use anyhow::{anyhow, Result};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;

use candle_core::{DType, Device, Tensor};
use candle_nn::VarBuilder;
use candle_transformers::models::xlm_roberta::{Config as XLMRobertaConfig, XLMRobertaModel};
use tokenizers::Tokenizer;
use tracing::{info, warn};

use chunkdb_core::error::Error;
use chunkdb_core::traits::Embedder;

pub mod device;
pub mod pool;
pub mod tokenize;

pub use pool::masked_mean_l2;

/// Output dimension of BGE-M3 (and of the fake embedder, so the two are
/// interchangeable against the same index).
pub const EMBEDDING_DIM: usize = 1024;

const MAX_LEN: usize = 256;

pub struct EmbeddingModel {
    model: XLMRobertaModel,
    tokenizer: Tokenizer,
    device: Device,
}

impl EmbeddingModel {
    pub fn new() -> Result<Self> {
        let device = device::select_device();
        let model_dir = resolve_model_dir()?;
        info!(dir = %model_dir.display(), "loading BGE-M3 model");

        let tokenizer_path = model_dir.join("tokenizer.json");
        let tokenizer = Tokenizer::from_file(&tokenizer_path)
            .map_err(|e| anyhow!("Failed to load tokenizer from {}: {}", tokenizer_path.display(), e))?;

        let config_path = model_dir.join("config.json");
        let config: XLMRobertaConfig =
            serde_json::from_str(&std::fs::read_to_string(&config_path)?)?;

        let weights_path = model_dir.join("pytorch_model.bin");
        let weights = candle_core::pickle::read_all(&weights_path)?;
        let weights_map: std::collections::HashMap<String, Tensor> =
            weights.into_iter().collect();
        let vb = VarBuilder::from_tensors(weights_map, DType::F32, &device);
        let model = XLMRobertaModel::new(&config, vb)?;
        info!("BGE-M3 model loaded");
        Ok(Self { model, tokenizer, device })
    }

    fn embed_text(&self, text: &str) -> Result<Vec<f32>> {
        let start = Instant::now();
        let (input_ids, attention_mask) =
            tokenize::tokenize_on_device(&self.tokenizer, text, MAX_LEN, &self.device)?;
        let token_type_ids = Tensor::zeros((1, MAX_LEN), DType::I64, &self.device)?;
        let hidden_states =
            self.model
                .forward(&input_ids, &attention_mask, &token_type_ids, None, None, None)?;
        let pooled = masked_mean_l2(&hidden_states, &attention_mask)?;
        let embedding: Vec<f32> = pooled.to_device(&Device::Cpu)?.squeeze(0)?.to_vec1()?;
        assert_eq!(embedding.len(), EMBEDDING_DIM);
        let elapsed = start.elapsed();
        if elapsed.as_millis() > 100 {
            warn!(ms = elapsed.as_millis(), "slow embedding");
        }
        Ok(embedding)
    }
}

impl Embedder for EmbeddingModel {
    fn dim(&self) -> usize {
        EMBEDDING_DIM
    }

    fn embed(&self, text: &str) -> Result<Vec<f32>> {
        self.embed_text(text)
    }
}

struct FakeEmbedder {
    dim: usize,
}

impl FakeEmbedder {
    fn new(dim: usize) -> Self {
        Self { dim }
    }
}

impl Embedder for FakeEmbedder {
    fn dim(&self) -> usize {
        self.dim
    }

    fn embed(&self, text: &str) -> Result<Vec<f32>> {
        use std::hash::{Hash, Hasher};
        use twox_hash::XxHash64;
        let mut v = vec![0f32; self.dim];
        for (i, token) in text.split_whitespace().enumerate() {
            let mut hasher = XxHash64::with_seed(0);
            token.hash(&mut hasher);
            let h = hasher.finish();
            let idx = (h as usize) % self.dim;
            let val = (((h >> 32) as u32) as f32) / (u32::MAX as f32);
            v[idx] += val + (i as f32 % 3.0) * 0.01;
        }
        let norm = (v.iter().map(|x| x * x).sum::<f32>()).sqrt().max(1e-6);
        for x in &mut v {
            *x /= norm;
        }
        Ok(v)
    }
}

/// Build the process-wide embedder. Honors `CHUNKDB_USE_FAKE_EMBEDDINGS=1`
/// so tests and CI never load the real model.
pub fn default_embedder() -> Result<Arc<dyn Embedder>> {
    let use_fake = std::env::var("CHUNKDB_USE_FAKE_EMBEDDINGS")
        .ok()
        .map(|v| v == "1" || v.eq_ignore_ascii_case("true"))
        .unwrap_or(false);
    if use_fake {
        info!("using FakeEmbedder");
        return Ok(Arc::new(FakeEmbedder::new(EMBEDDING_DIM)));
    }
    Ok(Arc::new(EmbeddingModel::new()?))
}

fn resolve_model_dir() -> Result<PathBuf> {
    for var in ["CHUNKDB_MODEL_DIR", "MODEL_DIR"] {
        if let Ok(dir) = std::env::var(var) {
            let p = PathBuf::from(&dir);
            if p.exists() {
                info!(var, dir = %p.display(), "using model dir from env");
                return Ok(p);
            }
        }
    }
    for candidate in ["../models/bge-m3", "models/bge-m3"] {
        let p = Path::new(candidate);
        if p.exists() {
            info!(dir = %p.display(), "using model dir");
            return Ok(p.to_path_buf());
        }
    }
    Err(Error::InvalidConfig("Could not locate BGE-M3 model directory".to_string()).into())
}
