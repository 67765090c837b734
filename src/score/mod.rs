//! Fan score computation: feature extraction and weighted aggregation.

pub mod aggregate;
pub mod extract;
pub mod qualitative;
pub mod weights;

pub use aggregate::{aggregate, ScoreBreakdown};
pub use extract::{algorithmic_scores, PromptContext};
pub use qualitative::{build_prompt, parse_score, score_or_neutral};
pub use weights::{Factor, WeightTable};
