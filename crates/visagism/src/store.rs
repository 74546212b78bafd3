use async_trait::async_trait;

use barbermatch_core::StoreResult;

use crate::FaceAnalysisResult;

#[async_trait]
pub trait AnalysisRepository: Send + Sync {
    async fn insert(&self, result: FaceAnalysisResult) -> StoreResult<FaceAnalysisResult>;
}
