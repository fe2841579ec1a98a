//! Semantic Judgment Scorer: pluggable, trait-based scorer that asks an external
//! language model how well a resume matches a job description along one dimension.
//!
//! Default: `LlmJudge` (one chat-completions round trip per call).
//! Tests swap in stubs through the same trait.
//!
//! Judge replies are free text, not a numeric contract. Parsing is best-effort and
//! returns `None` instead of failing; callers treat `None` as "this pair cannot be
//! scored", never as 0.

use std::sync::LazyLock;

use async_trait::async_trait;
use regex::Regex;
use tracing::{debug, warn};

use crate::llm_client::LlmClient;
use crate::matching::normalize::NormalizedText;
use crate::matching::prompts::build_judgment_prompt;

/// First integer or decimal standing as its own word.
static SCORE_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b([0-9]+(?:\.[0-9]+)?)\b").expect("score pattern is valid"));

/// A fit dimension delegated to the judge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScoreDimension {
    Education,
    Skills,
}

impl ScoreDimension {
    /// Wording used inside the prompt.
    pub fn label(self) -> &'static str {
        match self {
            ScoreDimension::Education => "educational background",
            ScoreDimension::Skills => "skills",
        }
    }
}

/// The judgment scorer trait. Implement this to swap judges without touching
/// the pipeline or handlers.
///
/// Carried in `AppState` as `Arc<dyn JudgmentScorer>`.
#[async_trait]
pub trait JudgmentScorer: Send + Sync {
    /// A score in [0, 1], or `None` when no usable answer came back.
    async fn judge(
        &self,
        resume: &NormalizedText,
        job_description: &NormalizedText,
        dimension: ScoreDimension,
    ) -> Option<f64>;
}

/// Judge backed by the chat-completions client. No retries, no caching.
pub struct LlmJudge(pub LlmClient);

#[async_trait]
impl JudgmentScorer for LlmJudge {
    async fn judge(
        &self,
        resume: &NormalizedText,
        job_description: &NormalizedText,
        dimension: ScoreDimension,
    ) -> Option<f64> {
        let prompt =
            build_judgment_prompt(resume.as_str(), job_description.as_str(), dimension.label());

        let reply = match self.0.complete(&prompt).await {
            Ok(reply) => reply,
            Err(e) => {
                warn!("Judge call for {} failed: {e}", dimension.label());
                return None;
            }
        };

        let score = parse_score(&reply);
        match score {
            Some(s) if !(0.0..=1.0).contains(&s) => {
                warn!("Judge returned out-of-range {} score {s}", dimension.label());
            }
            Some(s) => debug!("Judge scored {} at {s}", dimension.label()),
            None => warn!(
                "Judge reply for {} had no numeric score: {reply:?}",
                dimension.label()
            ),
        }
        score
    }
}

/// Extracts the first numeric token from a judge reply.
pub fn parse_score(reply: &str) -> Option<f64> {
    SCORE_PATTERN
        .captures(reply)?
        .get(1)?
        .as_str()
        .parse::<f64>()
        .ok()
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::llm_client::mock_server::{MockJudgeServer, MockReply};
    use crate::matching::normalize::normalize;

    fn judge_for(url: &str) -> LlmJudge {
        LlmJudge(
            LlmClient::new(
                "test-key".to_string(),
                url.to_string(),
                "gpt-3.5-turbo".to_string(),
                Duration::from_secs(5),
            )
            .unwrap(),
        )
    }

    #[test]
    fn test_parse_bare_decimal() {
        assert_eq!(parse_score("0.85"), Some(0.85));
    }

    #[test]
    fn test_parse_integer() {
        assert_eq!(parse_score("1"), Some(1.0));
    }

    #[test]
    fn test_parse_takes_first_number_in_prose() {
        assert_eq!(parse_score("The score is 0.6 out of 1"), Some(0.6));
        assert_eq!(parse_score("Score: 0.7."), Some(0.7));
    }

    #[test]
    fn test_parse_ratio_takes_numerator() {
        assert_eq!(parse_score("8/10"), Some(8.0));
    }

    #[test]
    fn test_parse_ignores_digits_glued_to_words() {
        assert_eq!(parse_score("v2 model"), None);
    }

    #[test]
    fn test_parse_no_number_is_none() {
        assert_eq!(parse_score("I cannot determine a score."), None);
        assert_eq!(parse_score(""), None);
    }

    #[test]
    fn test_dimension_labels() {
        assert_eq!(ScoreDimension::Education.label(), "educational background");
        assert_eq!(ScoreDimension::Skills.label(), "skills");
    }

    #[tokio::test]
    async fn test_llm_judge_parses_reply() {
        let server = MockJudgeServer::start(vec![MockReply::content("0.9")]).await;
        let judge = judge_for(&server.url());

        let score = judge
            .judge(&normalize("rust"), &normalize("rust"), ScoreDimension::Skills)
            .await;
        assert_eq!(score, Some(0.9));

        let prompt = server.requests()[0].body["messages"][0]["content"]
            .as_str()
            .unwrap()
            .to_string();
        assert!(prompt.contains("candidate's skills matches"));
    }

    #[tokio::test]
    async fn test_llm_judge_non_success_is_none() {
        let server = MockJudgeServer::start(vec![MockReply::status(503)]).await;
        let judge = judge_for(&server.url());

        let score = judge
            .judge(&normalize("rust"), &normalize("rust"), ScoreDimension::Education)
            .await;
        assert_eq!(score, None);
        assert_eq!(server.requests().len(), 1, "must not retry");
    }

    #[tokio::test]
    async fn test_llm_judge_unparseable_reply_is_none() {
        let server = MockJudgeServer::start(vec![MockReply::content("Strong match!")]).await;
        let judge = judge_for(&server.url());

        let score = judge
            .judge(&normalize("rust"), &normalize("go"), ScoreDimension::Skills)
            .await;
        assert_eq!(score, None);
    }

    #[tokio::test]
    async fn test_llm_judge_keeps_out_of_range_value() {
        let server = MockJudgeServer::start(vec![MockReply::content("85")]).await;
        let judge = judge_for(&server.url());

        let score = judge
            .judge(&normalize("rust"), &normalize("go"), ScoreDimension::Skills)
            .await;
        assert_eq!(score, Some(85.0));
    }
}
