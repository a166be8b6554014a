//! Skill assessment
//!
//! Turns an external judgement into the 0-100 score that drives combat
//! damage. Spoken answers go to a [`SpeechJudge`]; quiz answers are scored
//! locally with [`quiz_score`].

use std::sync::OnceLock;

use regex::Regex;
use thiserror::Error;

/// Highest possible score
pub const MAX_SCORE: u8 = 100;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum AssessError {
    #[error("no audio to assess")]
    EmptyAudio,
    #[error("judge reply has no score: {0:?}")]
    MissingScore(String),
    #[error("judge unavailable: {0}")]
    Unavailable(String),
}

/// What the judge is asked to grade
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssessmentRequest {
    /// Recorded answer, encoded as the judge expects
    pub audio: Vec<u8>,
    /// Grading instructions; must ask for a `Score: NN` marker
    pub rubric: String,
}

impl AssessmentRequest {
    pub fn new(audio: Vec<u8>, rubric: &str) -> Self {
        Self {
            audio,
            rubric: rubric.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Assessment {
    /// 0..=100
    pub score: u8,
    pub feedback: String,
}

impl Assessment {
    /// Build from the judge's free-text reply. The score marker is removed
    /// from the feedback.
    pub fn from_reply(reply: &str) -> Result<Self, AssessError> {
        let score = extract_score(reply).ok_or_else(|| AssessError::MissingScore(reply.to_string()))?;
        let feedback = score_pattern().replace(reply, "").trim().to_string();
        Ok(Self { score, feedback })
    }
}

/// Grades a spoken answer. One call yields exactly one result.
pub trait SpeechJudge {
    fn assess(&self, request: &AssessmentRequest) -> Result<Assessment, AssessError>;
}

fn score_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    // Accepts the full-width colon as well
    PATTERN.get_or_init(|| Regex::new(r"(?i)score\s*[:：]\s*(\d+)").expect("score pattern is valid"))
}

/// Find the first `Score: NN` marker. Values above 100 are clamped.
pub fn extract_score(text: &str) -> Option<u8> {
    let digits = score_pattern().captures(text)?.get(1)?.as_str();
    // Too many digits to parse is still "above 100"
    let value = digits.parse::<u32>().unwrap_or(u32::MAX);
    Some(value.min(u32::from(MAX_SCORE)) as u8)
}

/// Percentage of correct answers, rounded. An empty quiz scores 0.
pub fn quiz_score(correct: u32, total: u32) -> u8 {
    if total == 0 {
        return 0;
    }
    let correct = u64::from(correct.min(total));
    ((correct * 100 + u64::from(total) / 2) / u64::from(total)) as u8
}
