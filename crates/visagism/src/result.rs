use serde::{Deserialize, Serialize};

use barbermatch_core::{AnalysisId, Entity};

use crate::FaceShape;

/// Stored outcome of one analysis call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FaceAnalysisResult {
    pub id: AnalysisId,
    pub face_shape: FaceShape,
    /// Confidence in \[0, 1\].
    pub confidence: f64,
}

impl Entity for FaceAnalysisResult {
    type Id = AnalysisId;

    fn id(&self) -> AnalysisId {
        self.id
    }
}
