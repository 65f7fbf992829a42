use candle_core::{Device, IndexOp, Tensor, D};
use candle_nn::{linear, ops::softmax, Linear, Module};
use candle_transformers::models::bert::{BertModel, Config};
use tokenizers::Tokenizer;

use crate::error::{PipelineError, Result};
use crate::loaders::{ClassifierConfigLoader, TokenizerLoader, WeightsLoader};
use crate::pipelines::sentiment::{StarRatingModel, StarScore};

/// Available star-rating checkpoints.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum StarModel {
    /// `nlptown/bert-base-multilingual-uncased-sentiment` (~170M parameters,
    /// product reviews in six languages).
    #[default]
    MultilingualUncased,
    /// Any Hugging Face repo with a `BertForSequenceClassification` head whose
    /// labels read `"<N> star(s)"`.
    Custom(String),
}

impl StarModel {
    /// Hugging Face repo id.
    pub fn repo_id(&self) -> &str {
        match self {
            StarModel::MultilingualUncased => "nlptown/bert-base-multilingual-uncased-sentiment",
            StarModel::Custom(repo) => repo,
        }
    }
}

impl std::fmt::Display for StarModel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.repo_id())
    }
}

impl From<&str> for StarModel {
    fn from(repo: &str) -> Self {
        if repo == StarModel::MultilingualUncased.repo_id() {
            StarModel::MultilingualUncased
        } else {
            StarModel::Custom(repo.to_string())
        }
    }
}

/// BERT encoder with a pooled classification head, rating text from 1 to 5 stars.
pub struct BertStarRatingModel {
    bert: BertModel,
    pooler: Linear,
    classifier: Linear,
    tokenizer: Tokenizer,
    labels: Vec<String>,
    device: Device,
}

impl BertStarRatingModel {
    /// Download (or reuse the hub cache) and load a checkpoint on `device`.
    pub fn new(model: StarModel, device: Device) -> Result<Self> {
        let repo_id = model.repo_id();

        let (config, head) = ClassifierConfigLoader::new(repo_id).load::<Config>()?;
        let labels = head.labels()?;
        if labels.is_empty() {
            return Err(PipelineError::Model(format!(
                "'{repo_id}' config.json has no id2label classes"
            )));
        }

        let vb = WeightsLoader::new(repo_id).load(&device)?;
        let bert = BertModel::load(vb.pp("bert"), &config)?;
        let pooler = linear(
            head.hidden_size,
            head.hidden_size,
            vb.pp("bert").pp("pooler").pp("dense"),
        )?;
        let classifier = linear(head.hidden_size, labels.len(), vb.pp("classifier"))?;

        let tokenizer = TokenizerLoader::new(repo_id).load()?;

        tracing::info!(model = %model, classes = labels.len(), "star-rating model ready");

        Ok(Self {
            bert,
            pooler,
            classifier,
            tokenizer,
            labels,
            device,
        })
    }

    /// Returns the device (CPU/GPU) the model is running on.
    pub fn device(&self) -> &Device {
        &self.device
    }

    /// Class labels ordered by class id.
    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    fn class_probabilities(&self, text: &str) -> Result<Vec<f32>> {
        let tokens = self.tokenizer.encode(text, true).map_err(|e| {
            PipelineError::Tokenization(format!(
                "Tokenization failed on '{}': {}",
                &text.chars().take(50).collect::<String>(),
                e
            ))
        })?;

        let input_ids = Tensor::new(tokens.get_ids(), &self.device)?.unsqueeze(0)?;
        let token_type_ids = input_ids.zeros_like()?;
        let attention_mask =
            Tensor::new(tokens.get_attention_mask(), &self.device)?.unsqueeze(0)?;

        let hidden = self
            .bert
            .forward(&input_ids, &token_type_ids, Some(&attention_mask))?;
        let cls = hidden.i((.., 0))?;
        let pooled = self.pooler.forward(&cls)?.tanh()?;
        let logits = self.classifier.forward(&pooled)?;

        let probs = softmax(&logits, D::Minus1)?.squeeze(0)?.to_vec1::<f32>()?;
        Ok(probs)
    }
}

impl StarRatingModel for BertStarRatingModel {
    fn rate(&self, text: &str) -> Result<Vec<StarScore>> {
        let probs = self.class_probabilities(text)?;
        if probs.len() != self.labels.len() {
            return Err(PipelineError::Model(format!(
                "classifier returned {} scores for {} labels",
                probs.len(),
                self.labels.len()
            )));
        }

        Ok(self
            .labels
            .iter()
            .zip(probs)
            .map(|(label, score)| StarScore::new(label.clone(), score))
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_checkpoint_is_nlptown() {
        assert_eq!(
            StarModel::default().repo_id(),
            "nlptown/bert-base-multilingual-uncased-sentiment"
        );
    }

    #[test]
    fn repo_strings_map_to_checkpoints() {
        assert_eq!(
            StarModel::from("nlptown/bert-base-multilingual-uncased-sentiment"),
            StarModel::MultilingualUncased
        );
        let custom = StarModel::from("acme/stars");
        assert_eq!(custom, StarModel::Custom("acme/stars".into()));
        assert_eq!(custom.to_string(), "acme/stars");
    }
}
