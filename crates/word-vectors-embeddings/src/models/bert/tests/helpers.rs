//! Tiny BERT checkpoint and tokenizer for CPU tests.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use candle_core::{DType, Device, Tensor};
use candle_nn::VarBuilder;
use tokenizers::Tokenizer;

use super::super::{BertConfig, BertEmbedder, BertWeights, HiddenAct};

pub const TINY_HIDDEN: usize = 8;
pub const TINY_MAX_POSITIONS: usize = 16;

/// Vocabulary: [PAD] [UNK] [CLS] [SEP] hello world cat dog
pub const TOKENIZER_JSON: &str = r#"{
  "version": "1.0",
  "truncation": null,
  "padding": null,
  "added_tokens": [],
  "normalizer": { "type": "Lowercase" },
  "pre_tokenizer": { "type": "Whitespace" },
  "post_processor": {
    "type": "BertProcessing",
    "sep": ["[SEP]", 3],
    "cls": ["[CLS]", 2]
  },
  "decoder": null,
  "model": {
    "type": "WordLevel",
    "vocab": {
      "[PAD]": 0, "[UNK]": 1, "[CLS]": 2, "[SEP]": 3,
      "hello": 4, "world": 5, "cat": 6, "dog": 7
    },
    "unk_token": "[UNK]"
  }
}"#;

pub fn tiny_config() -> BertConfig {
    BertConfig {
        vocab_size: 8,
        hidden_size: TINY_HIDDEN,
        num_hidden_layers: 2,
        num_attention_heads: 2,
        intermediate_size: 16,
        hidden_act: HiddenAct::Gelu,
        max_position_embeddings: TINY_MAX_POSITIONS,
        type_vocab_size: 2,
        layer_norm_eps: 1e-12,
    }
}

pub fn tiny_config_json() -> String {
    let c = tiny_config();
    format!(
        r#"{{"model_type": "bert", "vocab_size": {}, "hidden_size": {}, "num_hidden_layers": {},
            "num_attention_heads": {}, "intermediate_size": {}, "hidden_act": "gelu",
            "max_position_embeddings": {}, "type_vocab_size": {}, "layer_norm_eps": 1e-12}}"#,
        c.vocab_size,
        c.hidden_size,
        c.num_hidden_layers,
        c.num_attention_heads,
        c.intermediate_size,
        c.max_position_embeddings,
        c.type_vocab_size
    )
}

pub fn tiny_tokenizer() -> Tokenizer {
    Tokenizer::from_bytes(TOKENIZER_JSON.as_bytes()).expect("tokenizer json")
}

/// Smooth, seed-dependent values in [-0.2, 0.2].
fn pseudo_tensor(shape: &[usize], seed: usize) -> Tensor {
    let n: usize = shape.iter().product();
    let data: Vec<f32> = (0..n)
        .map(|i| ((i * 7 + seed * 13) as f32 * 0.37).sin() * 0.2)
        .collect();
    Tensor::from_vec(data, shape, &Device::Cpu).expect("tensor")
}

/// Named tensors in Hugging Face layout.
///
/// `prefix` is prepended to every name (e.g. `"bert."`); `legacy_ln` uses
/// `gamma`/`beta` instead of `weight`/`bias` for LayerNorm.
pub fn tiny_tensors(prefix: &str, legacy_ln: bool) -> HashMap<String, Tensor> {
    let c = tiny_config();
    let (h, i) = (c.hidden_size, c.intermediate_size);
    let (ln_w, ln_b) = if legacy_ln {
        ("gamma", "beta")
    } else {
        ("weight", "bias")
    };

    let mut seed = 0;
    let mut next = |shape: &[usize]| {
        seed += 1;
        pseudo_tensor(shape, seed)
    };

    let mut t = HashMap::new();
    let put_ln = |t: &mut HashMap<String, Tensor>, name: &str| {
        t.insert(
            format!("{}{}.{}", prefix, name, ln_w),
            Tensor::ones(h, DType::F32, &Device::Cpu).expect("ones"),
        );
        t.insert(
            format!("{}{}.{}", prefix, name, ln_b),
            Tensor::zeros(h, DType::F32, &Device::Cpu).expect("zeros"),
        );
    };

    t.insert(
        format!("{}embeddings.word_embeddings.weight", prefix),
        next(&[c.vocab_size, h]),
    );
    t.insert(
        format!("{}embeddings.position_embeddings.weight", prefix),
        next(&[c.max_position_embeddings, h]),
    );
    t.insert(
        format!("{}embeddings.token_type_embeddings.weight", prefix),
        next(&[c.type_vocab_size, h]),
    );
    put_ln(&mut t, "embeddings.LayerNorm");

    for layer in 0..c.num_hidden_layers {
        let base = format!("{}encoder.layer.{}", prefix, layer);
        for proj in ["query", "key", "value"] {
            t.insert(format!("{}.attention.self.{}.weight", base, proj), next(&[h, h]));
            t.insert(format!("{}.attention.self.{}.bias", base, proj), next(&[h]));
        }
        t.insert(format!("{}.attention.output.dense.weight", base), next(&[h, h]));
        t.insert(format!("{}.attention.output.dense.bias", base), next(&[h]));
        t.insert(format!("{}.intermediate.dense.weight", base), next(&[i, h]));
        t.insert(format!("{}.intermediate.dense.bias", base), next(&[i]));
        t.insert(format!("{}.output.dense.weight", base), next(&[h, i]));
        t.insert(format!("{}.output.dense.bias", base), next(&[h]));

        let local = format!("encoder.layer.{}", layer);
        put_ln(&mut t, &format!("{}.attention.output.LayerNorm", local));
        put_ln(&mut t, &format!("{}.output.LayerNorm", local));
    }

    t
}

pub fn tiny_weights(prefix: &str, legacy_ln: bool) -> candle_core::Result<BertWeights> {
    let vb = VarBuilder::from_tensors(tiny_tensors(prefix, legacy_ln), DType::F32, &Device::Cpu);
    BertWeights::from_var_builder(vb, tiny_config(), &Device::Cpu)
}

pub fn tiny_embedder() -> BertEmbedder {
    let weights = tiny_weights("", false).expect("tiny weights");
    BertEmbedder::from_parts("tiny-bert", weights, tiny_tokenizer()).expect("tiny embedder")
}

/// Write config.json, tokenizer.json and model.safetensors into `dir`.
pub fn write_tiny_checkpoint(dir: &Path) {
    fs::write(dir.join("config.json"), tiny_config_json()).expect("write config");
    fs::write(dir.join("tokenizer.json"), TOKENIZER_JSON).expect("write tokenizer");
    candle_core::safetensors::save(&tiny_tensors("bert.", false), dir.join("model.safetensors"))
        .expect("write safetensors");
}
