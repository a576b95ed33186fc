//! LLM-as-judge scoring of a generated query against ground truth.
//!
//! The judge replies in three labeled lines:
//!
//! ```text
//! SCORE: 0.85
//! SEMANTIC_MATCH: YES
//! REASONING: Both queries filter on ...
//! ```
//!
//! Parsing is best-effort: a reply missing any field still yields a verdict
//! with that field at its default (score 0.0, no match, whole reply as
//! reasoning).

use crate::error::Result;
use crate::prompt::{judge_user_prompt, JUDGE_SYSTEM_PROMPT};
use futures::stream::{self, StreamExt, TryStreamExt};
use llm::{ChatModel, ChatRequest, Message};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

const SCORE_LABEL: &str = "SCORE:";
const MATCH_LABEL: &str = "SEMANTIC_MATCH:";
const REASONING_LABEL: &str = "REASONING:";

/// Sampling temperature for judge calls.
pub const DEFAULT_JUDGE_TEMPERATURE: f32 = 0.1;

/// Judge calls in flight at once during a batch.
pub const BATCH_CONCURRENCY: usize = 4;

/// Parsed judge reply.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JudgeVerdict {
    /// In `[0, 1]`.
    pub score: f64,
    pub semantic_match: bool,
    pub reasoning: String,
    pub raw_evaluation: String,
}

/// One generated/ground-truth pair to score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Evaluation {
    pub generated_query: String,
    pub ground_truth_query: String,
    #[serde(default)]
    pub prompt: String,
}

/// Aggregate over a batch of verdicts.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BatchSummary {
    pub verdicts: Vec<JudgeVerdict>,
    pub average_score: f64,
    pub semantic_match_rate: f64,
}

impl BatchSummary {
    pub fn from_verdicts(verdicts: Vec<JudgeVerdict>) -> Self {
        let (average_score, semantic_match_rate) = if verdicts.is_empty() {
            (0.0, 0.0)
        } else {
            let n = verdicts.len() as f64;
            let total: f64 = verdicts.iter().map(|v| v.score).sum();
            let matches = verdicts.iter().filter(|v| v.semantic_match).count() as f64;
            (total / n, matches / n)
        };

        Self {
            verdicts,
            average_score,
            semantic_match_rate,
        }
    }
}

/// Parse a judge reply. Never fails.
pub fn parse_judge_reply(text: &str) -> JudgeVerdict {
    let mut score = 0.0;
    let mut semantic_match = false;
    let mut reasoning = text.to_string();

    for line in text.split('\n') {
        let line = line.trim_start();

        if let Some(rest) = line.strip_prefix(SCORE_LABEL) {
            if let Ok(value) = rest.trim().parse::<f64>() {
                if !value.is_nan() {
                    score = value.clamp(0.0, 1.0);
                }
            }
        } else if let Some(rest) = line.strip_prefix(MATCH_LABEL) {
            semantic_match = rest.trim().eq_ignore_ascii_case("YES");
        } else if line.starts_with(REASONING_LABEL) {
            if let Some(start) = text.find(REASONING_LABEL) {
                reasoning = text[start + REASONING_LABEL.len()..].trim().to_string();
            }
        }
    }

    JudgeVerdict {
        score,
        semantic_match,
        reasoning,
        raw_evaluation: text.to_string(),
    }
}

/// Scores generated SQL with a chat model.
pub struct QueryJudge {
    model: Arc<dyn ChatModel>,
    temperature: f32,
}

impl QueryJudge {
    pub fn new(model: Arc<dyn ChatModel>) -> Self {
        Self {
            model,
            temperature: DEFAULT_JUDGE_TEMPERATURE,
        }
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    pub async fn judge(
        &self,
        generated_query: &str,
        ground_truth_query: &str,
        prompt: &str,
    ) -> Result<JudgeVerdict> {
        let request = ChatRequest::new(vec![
            Message::system(JUDGE_SYSTEM_PROMPT),
            Message::human(judge_user_prompt(generated_query, ground_truth_query, prompt)),
        ])
        .with_temperature(self.temperature);

        let response = self.model.chat(request).await?;
        let verdict = parse_judge_reply(response.text());

        tracing::info!(
            model = %response.model,
            score = verdict.score,
            semantic_match = verdict.semantic_match,
            "Judged generated query"
        );
        Ok(verdict)
    }

    /// Judge every evaluation, keeping input order. The first failure fails
    /// the whole batch.
    pub async fn judge_batch(&self, evaluations: &[Evaluation]) -> Result<BatchSummary> {
        let verdicts: Vec<JudgeVerdict> = stream::iter(evaluations.iter().cloned())
            .map(|e| async move {
                self.judge(&e.generated_query, &e.ground_truth_query, &e.prompt)
                    .await
            })
            .buffered(BATCH_CONCURRENCY)
            .try_collect()
            .await?;

        Ok(BatchSummary::from_verdicts(verdicts))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use llm::{ChatResponse, LlmError};
    use std::sync::Mutex;

    #[test]
    fn test_parse_well_formed() {
        let reply = "SCORE: 0.85\nSEMANTIC_MATCH: YES\nREASONING: Column order differs only.";
        let verdict = parse_judge_reply(reply);

        assert_eq!(verdict.score, 0.85);
        assert!(verdict.semantic_match);
        assert_eq!(verdict.reasoning, "Column order differs only.");
        assert_eq!(verdict.raw_evaluation, reply);
    }

    #[test]
    fn test_parse_clamps_score() {
        assert_eq!(parse_judge_reply("SCORE: 1.7").score, 1.0);
        assert_eq!(parse_judge_reply("SCORE: -0.4").score, 0.0);
        assert_eq!(parse_judge_reply("SCORE: inf").score, 1.0);
    }

    #[test]
    fn test_parse_missing_score() {
        let verdict = parse_judge_reply("SEMANTIC_MATCH: NO\nREASONING: nothing matches");
        assert_eq!(verdict.score, 0.0);
        assert!(!verdict.semantic_match);
        assert_eq!(verdict.reasoning, "nothing matches");
    }

    #[test]
    fn test_parse_garbage() {
        let verdict = parse_judge_reply("I think they are similar.");
        assert_eq!(verdict.score, 0.0);
        assert!(!verdict.semantic_match);
        assert_eq!(verdict.reasoning, "I think they are similar.");
    }

    #[test]
    fn test_parse_unparseable_and_nan_scores() {
        assert_eq!(parse_judge_reply("SCORE: high").score, 0.0);
        assert_eq!(parse_judge_reply("SCORE: NaN").score, 0.0);
        assert_eq!(parse_judge_reply("SCORE: 0.6\nSCORE: oops").score, 0.6);
        assert_eq!(parse_judge_reply("SCORE: 0.2\nSCORE: 0.7").score, 0.7);
    }

    #[test]
    fn test_parse_match_case_insensitive() {
        assert!(parse_judge_reply("SEMANTIC_MATCH: yes").semantic_match);
        assert!(parse_judge_reply("SEMANTIC_MATCH:   Yes  ").semantic_match);
        assert!(!parse_judge_reply("SEMANTIC_MATCH: YES.").semantic_match);
        assert!(!parse_judge_reply("SEMANTIC_MATCH: NO").semantic_match);
    }

    #[test]
    fn test_parse_multiline_reasoning_and_crlf() {
        let reply = "SCORE: 0.5\r\nSEMANTIC_MATCH: NO\r\nREASONING: First line.\r\nSecond line.\r\n";
        let verdict = parse_judge_reply(reply);

        assert_eq!(verdict.score, 0.5);
        assert!(!verdict.semantic_match);
        assert_eq!(verdict.reasoning, "First line.\r\nSecond line.");
    }

    #[test]
    fn test_parse_indented_labels() {
        let verdict = parse_judge_reply("  SCORE: 0.9\n\tSEMANTIC_MATCH: YES\n  REASONING: ok");
        assert_eq!(verdict.score, 0.9);
        assert!(verdict.semantic_match);
        assert_eq!(verdict.reasoning, "ok");
    }

    #[test]
    fn test_batch_summary() {
        let verdict = |score, semantic_match| JudgeVerdict {
            score,
            semantic_match,
            reasoning: String::new(),
            raw_evaluation: String::new(),
        };

        let summary = BatchSummary::from_verdicts(vec![verdict(1.0, true), verdict(0.5, false)]);
        assert_eq!(summary.average_score, 0.75);
        assert_eq!(summary.semantic_match_rate, 0.5);

        let empty = BatchSummary::from_verdicts(vec![]);
        assert_eq!(empty.average_score, 0.0);
        assert_eq!(empty.semantic_match_rate, 0.0);
    }

    struct RecordingJudge {
        requests: Mutex<Vec<ChatRequest>>,
        fail_on: Option<&'static str>,
    }

    #[async_trait]
    impl ChatModel for RecordingJudge {
        async fn chat(&self, request: ChatRequest) -> llm::Result<ChatResponse> {
            let user = request.messages[1].content.clone();
            self.requests.lock().unwrap().push(request);

            if let Some(marker) = self.fail_on {
                if user.contains(marker) {
                    return Err(LlmError::RateLimitExceeded("slow down".into()));
                }
            }

            // Same queries score 1.0, different ones 0.3.
            let same = user.matches("SELECT a FROM t;").count() == 2;
            let text = if same {
                "SCORE: 1.0\nSEMANTIC_MATCH: YES\nREASONING: identical"
            } else {
                "SCORE: 0.3\nSEMANTIC_MATCH: NO\nREASONING: different"
            };
            Ok(ChatResponse {
                message: Message::assistant(text),
                usage: None,
                model: "gpt-4o-mini".into(),
                finish_reason: Some("stop".into()),
            })
        }
    }

    fn recording(fail_on: Option<&'static str>) -> Arc<RecordingJudge> {
        Arc::new(RecordingJudge {
            requests: Mutex::new(Vec::new()),
            fail_on,
        })
    }

    #[tokio::test]
    async fn test_judge_sends_rubric_and_temperature() {
        let model = recording(None);
        let judge = QueryJudge::new(model.clone());

        let verdict = judge
            .judge("SELECT a FROM t;", "SELECT a FROM t;", "show a")
            .await
            .unwrap();
        assert_eq!(verdict.score, 1.0);
        assert!(verdict.semantic_match);

        let requests = model.requests.lock().unwrap();
        assert_eq!(requests[0].messages[0].content, JUDGE_SYSTEM_PROMPT);
        assert!(requests[0].messages[1].content.contains("ORIGINAL REQUEST:\nshow a"));
        assert_eq!(requests[0].temperature, Some(DEFAULT_JUDGE_TEMPERATURE));
    }

    #[tokio::test]
    async fn test_judge_batch_keeps_order() {
        let judge = QueryJudge::new(recording(None)).with_temperature(0.0);
        let evaluations = vec![
            Evaluation {
                generated_query: "SELECT b FROM t;".into(),
                ground_truth_query: "SELECT a FROM t;".into(),
                prompt: String::new(),
            },
            Evaluation {
                generated_query: "SELECT a FROM t;".into(),
                ground_truth_query: "SELECT a FROM t;".into(),
                prompt: String::new(),
            },
        ];

        let summary = judge.judge_batch(&evaluations).await.unwrap();
        assert_eq!(summary.verdicts[0].score, 0.3);
        assert_eq!(summary.verdicts[1].score, 1.0);
        assert!((summary.average_score - 0.65).abs() < 1e-9);
        assert_eq!(summary.semantic_match_rate, 0.5);
    }

    #[tokio::test]
    async fn test_judge_batch_fails_on_first_error() {
        let judge = QueryJudge::new(recording(Some("SELECT boom")));
        let evaluations = vec![Evaluation {
            generated_query: "SELECT boom;".into(),
            ground_truth_query: "SELECT a FROM t;".into(),
            prompt: String::new(),
        }];

        assert!(judge.judge_batch(&evaluations).await.is_err());
    }

    fn assert_send<T: Send>(_: &T) {}

    // axum handlers need Send futures.
    #[test]
    fn test_judge_batch_future_is_send() {
        let judge = QueryJudge::new(recording(None));
        let evaluations: Vec<Evaluation> = Vec::new();
        let future = judge.judge_batch(&evaluations);
        assert_send(&future);
    }
}
