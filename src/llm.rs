//! LLM collaborator interfaces.
//!
//! Feedback classification and prompt refinement are plain request/response
//! calls to a language model made by the host application; only their
//! contracts live here.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::StoreResult;

/// Verdict from the feedback classifier.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FeedbackVerdict {
    pub is_feedback: bool,
    /// Classifier confidence in `[0, 1]`.
    pub confidence: f32,
}

/// Decide whether a piece of text is feedback about the agent's behavior.
#[async_trait]
pub trait FeedbackClassifier: Send + Sync {
    async fn classify(&self, text: &str) -> StoreResult<FeedbackVerdict>;
}

/// Strategy used when folding feedback into a prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RefinementStrategy {
    /// One rewrite pass incorporating the feedback.
    #[default]
    SingleShot,
    /// Repeated rewrite passes, each fed the previous result.
    SequentialRefinement,
    /// Alternating analysis and improvement passes.
    IterativeAnalysis,
}

impl RefinementStrategy {
    pub fn as_str(&self) -> &'static str {
        match self {
            RefinementStrategy::SingleShot => "single_shot",
            RefinementStrategy::SequentialRefinement => "sequential_refinement",
            RefinementStrategy::IterativeAnalysis => "iterative_analysis",
        }
    }
}

/// Default step bound for the iterating strategies.
pub const DEFAULT_REFINEMENT_STEPS: u32 = 3;

/// Rewrite a prompt so it incorporates user feedback.
#[async_trait]
pub trait PromptRefiner: Send + Sync {
    /// Return the revised prompt. `max_steps` bounds the iterating
    /// strategies and is ignored by [`RefinementStrategy::SingleShot`].
    async fn refine(
        &self,
        prompt: &str,
        feedback: &str,
        strategy: RefinementStrategy,
        max_steps: u32,
    ) -> StoreResult<String>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strategy_names() {
        assert_eq!(RefinementStrategy::SingleShot.as_str(), "single_shot");
        assert_eq!(
            RefinementStrategy::SequentialRefinement.as_str(),
            "sequential_refinement"
        );
        assert_eq!(
            RefinementStrategy::IterativeAnalysis.as_str(),
            "iterative_analysis"
        );
    }

    #[test]
    fn test_default_strategy() {
        assert_eq!(RefinementStrategy::default(), RefinementStrategy::SingleShot);
        assert_eq!(DEFAULT_REFINEMENT_STEPS, 3);
    }
}
