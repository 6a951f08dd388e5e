pub mod navigation;
pub mod normalize;
pub mod scoring;

pub use navigation::CaseIndices;
pub use normalize::{check_answer, normalize, normalize_without_tones};
pub use scoring::calculate_accuracy;
