use std::sync::Arc;

use serde::Serialize;
use tracing::{error, info, instrument};

use barbermatch_booking::{Hairstyle, HairstyleService};
use barbermatch_core::{AnalysisId, DomainError, DomainResult};

use crate::{AnalysisRepository, AnalyzerError, FaceAnalysisResult, FaceAnalyzer};

/// Stored analysis plus the catalog entries tagged for the detected shape.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FaceAnalysis {
    #[serde(flatten)]
    pub result: FaceAnalysisResult,
    pub recommended_hairstyles: Vec<Hairstyle>,
}

pub struct VisagismService {
    analyzer: Arc<dyn FaceAnalyzer>,
    analyses: Arc<dyn AnalysisRepository>,
    hairstyles: Arc<HairstyleService>,
}

impl VisagismService {
    pub fn new(
        analyzer: Arc<dyn FaceAnalyzer>,
        analyses: Arc<dyn AnalysisRepository>,
        hairstyles: Arc<HairstyleService>,
    ) -> Self {
        Self {
            analyzer,
            analyses,
            hairstyles,
        }
    }

    #[instrument(skip(self, image), fields(image_len = image.len()))]
    pub async fn analyze_image(&self, image: &str) -> DomainResult<FaceAnalysis> {
        if image.trim().is_empty() {
            return Err(DomainError::validation("image must not be empty"));
        }

        let reading = self.analyzer.analyze(image).map_err(|err| match err {
            AnalyzerError::InvalidImage(msg) => DomainError::validation(msg),
            AnalyzerError::Failed(msg) => {
                error!(error = %msg, "face analysis failed");
                DomainError::internal(msg)
            }
        })?;

        let result = FaceAnalysisResult {
            id: AnalysisId::new(),
            face_shape: reading.face_shape,
            confidence: reading.confidence,
        };
        let stored = self.analyses.insert(result).await.map_err(|err| {
            error!(error = %err, "analysis store failure");
            DomainError::from(err)
        })?;
        info!(analysis_id = %stored.id, face_shape = %stored.face_shape, "face analyzed");

        let recommended_hairstyles = self
            .hairstyles
            .filter_by_face_shape(stored.face_shape.as_str())
            .await?;
        Ok(FaceAnalysis {
            result: stored,
            recommended_hairstyles,
        })
    }
}
