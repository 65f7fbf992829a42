use super::pipeline::SentimentScorer;
use crate::error::Result;
use crate::models::{BertStarRatingModel, StarModel};
use crate::pipelines::utils::DeviceRequest;

crate::pipelines::utils::impl_device_methods!(SentimentScorerBuilder);

/// Builder for [`SentimentScorer`] backed by a BERT star-rating checkpoint.
///
/// Use [`Self::bert`] as the entry point. Each call to [`Self::build`]
/// loads the model once; share the result instead of building per comment.
///
/// # Examples
///
/// ```rust,no_run
/// # use emoji_sentiment::sentiment::{SentimentScorerBuilder, StarModel};
/// # fn main() -> emoji_sentiment::error::Result<()> {
/// let scorer = SentimentScorerBuilder::bert(StarModel::MultilingualUncased)
///     .cuda(0)
///     .build()?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct SentimentScorerBuilder {
    model: StarModel,
    device_request: DeviceRequest,
}

impl SentimentScorerBuilder {
    /// Creates a builder for a BERT star-rating checkpoint.
    pub fn bert(model: StarModel) -> Self {
        Self {
            model,
            device_request: DeviceRequest::Cpu,
        }
    }

    /// Loads only the model, for callers that want to own and share it.
    ///
    /// # Errors
    ///
    /// Returns an error if device initialization, download, or loading fails.
    pub fn build_model(self) -> Result<BertStarRatingModel> {
        let device = self.device_request.resolve()?;
        tracing::info!(model = %self.model, device = ?device.location(), "loading star-rating model");
        BertStarRatingModel::new(self.model, device)
    }

    /// Builds the scorer with configured settings.
    ///
    /// # Errors
    ///
    /// Returns an error if device initialization, download, or loading fails.
    pub fn build(self) -> Result<SentimentScorer<BertStarRatingModel>> {
        Ok(SentimentScorer::new(self.build_model()?))
    }
}
