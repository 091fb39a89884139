//! Weight and checkpoint loading.

use candle_core::{DType, Device};
use candle_nn::VarBuilder;
use tempfile::TempDir;

use crate::config::ModelConfig;
use crate::error::EmbeddingError;
use crate::provider::EmbeddingProvider;

use super::super::{BertEmbedder, BertWeights, ModelFiles};
use super::helpers::{
    tiny_config, tiny_embedder, tiny_tensors, tiny_weights, write_tiny_checkpoint, TINY_HIDDEN,
};

#[test]
fn test_prefixed_and_legacy_names_load_identically() {
    let plain = tiny_weights("", false).expect("plain names");
    let prefixed = tiny_weights("bert.", true).expect("bert. prefix with gamma/beta");

    assert_eq!(plain.encoder_layers.len(), 2);
    assert_eq!(plain.param_count(), prefixed.param_count());

    let a: Vec<f32> = plain
        .embeddings
        .word_embeddings
        .flatten_all()
        .unwrap()
        .to_vec1()
        .unwrap();
    let b: Vec<f32> = prefixed
        .embeddings
        .word_embeddings
        .flatten_all()
        .unwrap()
        .to_vec1()
        .unwrap();
    assert_eq!(a, b);
}

#[test]
fn test_missing_tensor_fails() {
    let mut tensors = tiny_tensors("", false);
    tensors.remove("encoder.layer.1.intermediate.dense.weight");
    let vb = VarBuilder::from_tensors(tensors, DType::F32, &Device::Cpu);

    let result = BertWeights::from_var_builder(vb, tiny_config(), &Device::Cpu);
    assert!(result.is_err());
}

#[test]
fn test_wrong_shape_fails() {
    let mut config = tiny_config();
    config.intermediate_size = 32;
    let vb = VarBuilder::from_tensors(tiny_tensors("", false), DType::F32, &Device::Cpu);

    assert!(BertWeights::from_var_builder(vb, config, &Device::Cpu).is_err());
}

#[test]
fn test_param_count() {
    let weights = tiny_weights("", false).unwrap();
    let (v, h, i, p, t) = (8, 8, 16, 16, 2);
    let embeddings = v * h + p * h + t * h + 2 * h;
    let per_layer = 4 * (h * h + h) + (i * h + i) + (h * i + h) + 4 * h;
    assert_eq!(weights.param_count(), embeddings + 2 * per_layer);
}

#[test]
fn test_from_files_round_trip() {
    let dir = TempDir::new().unwrap();
    write_tiny_checkpoint(dir.path());

    let files = ModelFiles::from_dir("tiny-bert", dir.path()).unwrap();
    let loaded = BertEmbedder::from_files("tiny-bert", &files, &Device::Cpu).expect("load");

    assert_eq!(loaded.model_name(), "tiny-bert");
    assert_eq!(loaded.dimension(), TINY_HIDDEN);
    assert_eq!(
        loaded.embed("hello").unwrap(),
        tiny_embedder().embed("hello").unwrap()
    );
}

#[test]
fn test_load_from_model_dir_config() {
    let dir = TempDir::new().unwrap();
    write_tiny_checkpoint(dir.path());

    let config = ModelConfig {
        model_id: "tiny-bert".to_string(),
        model_dir: Some(dir.path().to_path_buf()),
        ..ModelConfig::default()
    };
    let embedder = BertEmbedder::load(&config).expect("load from model_dir");
    assert_eq!(embedder.embed("cat").unwrap().len(), TINY_HIDDEN);
}

#[test]
fn test_corrupt_tokenizer_is_model_load_error() {
    let dir = TempDir::new().unwrap();
    write_tiny_checkpoint(dir.path());
    std::fs::write(dir.path().join("tokenizer.json"), "not json").unwrap();

    let files = ModelFiles::from_dir("tiny-bert", dir.path()).unwrap();
    match BertEmbedder::from_files("tiny-bert", &files, &Device::Cpu) {
        Err(EmbeddingError::ModelLoad { model_id, message }) => {
            assert_eq!(model_id, "tiny-bert");
            assert!(message.contains("tokenizer"), "got: {}", message);
        }
        Err(other) => panic!("Expected ModelLoad error, got {:?}", other),
        Ok(_) => panic!("Expected ModelLoad error, got a model"),
    }
}

#[test]
fn test_missing_model_dir_is_model_load_error() {
    let config = ModelConfig {
        model_dir: Some("/nonexistent/bert".into()),
        ..ModelConfig::default()
    };
    assert!(matches!(
        BertEmbedder::load(&config),
        Err(EmbeddingError::ModelLoad { .. })
    ));
}
