use std::collections::HashMap;
use std::path::PathBuf;
use std::time::Duration;

use candle_core::{DType, Device};
use candle_nn::VarBuilder;
use serde::Deserialize;
use tokenizers::models::wordpiece::WordPiece;
use tokenizers::normalizers::BertNormalizer;
use tokenizers::pre_tokenizers::bert::BertPreTokenizer;
use tokenizers::processors::bert::BertProcessing;
use tokenizers::{Tokenizer, TruncationParams};

use crate::error::{PipelineError, Result};

/// BERT position embeddings stop here.
pub const MAX_SEQUENCE_LEN: usize = 512;

#[derive(Debug, Clone)]
pub struct HfLoader {
    pub repo: String,
    pub filename: String,
}

impl HfLoader {
    pub fn new(repo: &str, filename: &str) -> Self {
        Self {
            repo: repo.into(),
            filename: filename.into(),
        }
    }

    pub fn load(&self) -> Result<PathBuf> {
        let hf_api = hf_hub::api::sync::ApiBuilder::new()
            .with_progress(false)
            .build()
            .map_err(|e| {
                PipelineError::Download(format!("Failed to initialize HuggingFace API: {e}"))
            })?;
        let hf_api = hf_api.model(self.repo.clone());

        let max_retries = 3;
        let mut attempts = 0u32;

        for attempt in 0..max_retries {
            match hf_api.get(self.filename.as_str()) {
                Ok(path) => return Ok(path),
                Err(e) => {
                    let error_msg = e.to_string();
                    attempts = attempt + 1;
                    if error_msg.contains("Lock acquisition failed") && attempt < max_retries - 1 {
                        let wait_time = Duration::from_millis(100 * (1 << attempt));
                        tracing::warn!(
                            repo = %self.repo,
                            file = %self.filename,
                            ?wait_time,
                            "hub cache locked, retrying"
                        );
                        std::thread::sleep(wait_time);
                        continue;
                    }
                    return Err(PipelineError::Download(format!(
                        "Failed to download '{}' from '{}': {}",
                        self.filename, self.repo, error_msg
                    )));
                }
            }
        }

        Err(PipelineError::Download(format!(
            "Download timed out for '{}' from '{}' after {} attempt(s)",
            self.filename, self.repo, attempts
        )))
    }
}

/// Loads a BERT tokenizer, preferring `tokenizer.json` and falling back to `vocab.txt`.
#[derive(Debug, Clone)]
pub struct TokenizerLoader {
    pub tokenizer_file_loader: HfLoader,
    pub vocab_file_loader: HfLoader,
}

impl TokenizerLoader {
    pub fn new(repo: &str) -> Self {
        Self {
            tokenizer_file_loader: HfLoader::new(repo, "tokenizer.json"),
            vocab_file_loader: HfLoader::new(repo, "vocab.txt"),
        }
    }

    pub fn load(&self) -> Result<Tokenizer> {
        let mut tokenizer = match self.tokenizer_file_loader.load() {
            Ok(path) => Tokenizer::from_file(&path).map_err(|e| {
                PipelineError::Tokenization(format!(
                    "Failed to load tokenizer from '{}': {}",
                    path.display(),
                    e
                ))
            })?,
            Err(e) => {
                tracing::info!(error = %e, "no tokenizer.json, building WordPiece tokenizer from vocab.txt");
                let vocab_path = self.vocab_file_loader.load()?;
                wordpiece_tokenizer(&vocab_path)?
            }
        };

        tokenizer
            .with_truncation(Some(TruncationParams {
                max_length: MAX_SEQUENCE_LEN,
                ..Default::default()
            }))
            .map_err(|e| PipelineError::Tokenization(format!("Failed to set truncation: {e}")))?;

        Ok(tokenizer)
    }
}

fn wordpiece_tokenizer(vocab_path: &std::path::Path) -> Result<Tokenizer> {
    let vocab = vocab_path.to_string_lossy();
    let wordpiece = WordPiece::from_file(&vocab)
        .unk_token("[UNK]".to_string())
        .build()
        .map_err(|e| {
            PipelineError::Tokenization(format!("Failed to read vocabulary '{vocab}': {e}"))
        })?;

    let mut tokenizer = Tokenizer::new(wordpiece);
    let special_id = |token: &str| {
        tokenizer.token_to_id(token).ok_or_else(|| {
            PipelineError::Tokenization(format!("Vocabulary '{vocab}' has no {token} token"))
        })
    };
    let cls_id = special_id("[CLS]")?;
    let sep_id = special_id("[SEP]")?;

    tokenizer
        .with_normalizer(Some(BertNormalizer::new(true, true, None, true)))
        .with_pre_tokenizer(Some(BertPreTokenizer))
        .with_post_processor(Some(BertProcessing::new(
            ("[SEP]".to_string(), sep_id),
            ("[CLS]".to_string(), cls_id),
        )));

    Ok(tokenizer)
}

/// Labels and sizes a classification head needs from `config.json`.
#[derive(Debug, Clone, Deserialize)]
pub struct ClassifierConfig {
    pub hidden_size: usize,
    #[serde(default)]
    pub id2label: HashMap<String, String>,
}

impl ClassifierConfig {
    /// Labels ordered by class id.
    pub fn labels(&self) -> Result<Vec<String>> {
        let mut indexed = self
            .id2label
            .iter()
            .map(|(id, label)| {
                id.parse::<usize>().map(|i| (i, label.clone())).map_err(|_| {
                    PipelineError::Model(format!("Invalid class id '{id}' in id2label"))
                })
            })
            .collect::<Result<Vec<_>>>()?;
        indexed.sort_by_key(|(i, _)| *i);

        if indexed.iter().enumerate().any(|(pos, (i, _))| pos != *i) {
            return Err(PipelineError::Model(
                "id2label class ids are not contiguous from 0".to_string(),
            ));
        }
        Ok(indexed.into_iter().map(|(_, label)| label).collect())
    }
}

/// Reads `config.json` as both the encoder config `C` and the head config.
pub struct ClassifierConfigLoader {
    pub config_file_loader: HfLoader,
}

impl ClassifierConfigLoader {
    pub fn new(repo: &str) -> Self {
        Self {
            config_file_loader: HfLoader::new(repo, "config.json"),
        }
    }

    pub fn load<C: for<'de> Deserialize<'de>>(&self) -> Result<(C, ClassifierConfig)> {
        let config_path = self.config_file_loader.load()?;
        let config_str = std::fs::read_to_string(&config_path)?;
        let model_config: C = serde_json::from_str(&config_str)?;
        let head_config: ClassifierConfig = serde_json::from_str(&config_str)?;
        Ok((model_config, head_config))
    }
}

/// Loads weights from `model.safetensors`, falling back to `pytorch_model.bin`.
pub struct WeightsLoader {
    pub safetensors_loader: HfLoader,
    pub pytorch_loader: HfLoader,
}

impl WeightsLoader {
    pub fn new(repo: &str) -> Self {
        Self {
            safetensors_loader: HfLoader::new(repo, "model.safetensors"),
            pytorch_loader: HfLoader::new(repo, "pytorch_model.bin"),
        }
    }

    pub fn load(&self, device: &Device) -> Result<VarBuilder<'static>> {
        let weights_path = self
            .safetensors_loader
            .load()
            .or_else(|_| self.pytorch_loader.load())?;

        let vb = if weights_path.extension().is_some_and(|e| e == "safetensors") {
            unsafe { VarBuilder::from_mmaped_safetensors(&[weights_path], DType::F32, device)? }
        } else {
            VarBuilder::from_pth(&weights_path, DType::F32, device)?
        };
        Ok(vb)
    }
}
