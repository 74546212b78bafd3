//! `barbermatch-visagism`
//!
//! Face-shape analysis boundary. The analyzer is a port; the only shipped
//! implementation is [`SimulatedFaceAnalyzer`], which does no image work.
//! Results are insights: they are stored but never linked to an account.

pub mod analyzer;
pub mod result;
pub mod service;
pub mod shape;
pub mod store;

pub use analyzer::{AnalyzerError, FaceAnalyzer, FaceReading, SimulatedFaceAnalyzer};
pub use result::FaceAnalysisResult;
pub use service::{FaceAnalysis, VisagismService};
pub use shape::FaceShape;
pub use store::AnalysisRepository;
