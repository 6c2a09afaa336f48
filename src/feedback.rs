//! Explanations for wrong answers, supplied by an outside collaborator.
//!
//! The lesson pages could ask a language model to explain why a student's
//! answer was wrong. That call lives outside this crate: the host injects a
//! [`FeedbackProvider`] and this module only guarantees that a failed or
//! empty explanation degrades to a fixed message instead of an error.
//!
//! Any `Fn(&FeedbackRequest) -> Result<String, FeedbackError>` closure is a
//! provider, which keeps test doubles to a single line:
//!
//! ```
//! use physeval::feedback::{explain_or_fallback, FeedbackError, FeedbackRequest};
//!
//! let offline = |_: &FeedbackRequest| -> Result<String, FeedbackError> {
//!     Err(FeedbackError::Timeout)
//! };
//! let request = FeedbackRequest::new("2 + 2?", "5", "4");
//! let text = explain_or_fallback(&offline, &request);
//! assert_eq!(text, physeval::feedback::FALLBACK_MESSAGE);
//! ```

use serde::{Deserialize, Serialize};

/// Message shown when no explanation could be produced.
pub const FALLBACK_MESSAGE: &str =
    "Feedback is unavailable right now. Compare your answer with the worked solution.";

/// Result type for feedback providers.
pub type FeedbackResult<T> = Result<T, FeedbackError>;

/// Errors a feedback provider may report.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FeedbackError {
    /// Provider could not be reached or refused the request
    #[error("Feedback provider unavailable: {0}")]
    Unavailable(String),
    /// Provider did not answer in time
    #[error("Feedback provider timed out")]
    Timeout,
}

/// What the student was asked, what they answered, and what was expected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeedbackRequest {
    pub question: String,
    pub student_answer: String,
    pub correct_answer: String,
}

impl FeedbackRequest {
    pub fn new(
        question: impl Into<String>,
        student_answer: impl Into<String>,
        correct_answer: impl Into<String>,
    ) -> Self {
        FeedbackRequest {
            question: question.into(),
            student_answer: student_answer.into(),
            correct_answer: correct_answer.into(),
        }
    }
}

/// Source of explanations for incorrect answers.
pub trait FeedbackProvider: Send + Sync {
    fn explain(&self, request: &FeedbackRequest) -> FeedbackResult<String>;
}

impl<F> FeedbackProvider for F
where
    F: Fn(&FeedbackRequest) -> FeedbackResult<String> + Send + Sync,
{
    fn explain(&self, request: &FeedbackRequest) -> FeedbackResult<String> {
        self(request)
    }
}

/// Provider for hosts without an explanation service.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoFeedback;

impl FeedbackProvider for NoFeedback {
    fn explain(&self, _request: &FeedbackRequest) -> FeedbackResult<String> {
        Err(FeedbackError::Unavailable("no feedback provider configured".to_string()))
    }
}

/// Provider that always returns the same text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StaticFeedback {
    text: String,
}

impl StaticFeedback {
    pub fn new(text: impl Into<String>) -> Self {
        StaticFeedback { text: text.into() }
    }
}

impl FeedbackProvider for StaticFeedback {
    fn explain(&self, _request: &FeedbackRequest) -> FeedbackResult<String> {
        Ok(self.text.clone())
    }
}

/// Asks `provider` for an explanation, returning `fallback` if it fails or
/// answers with blank text.
pub fn explain_or(
    provider: &dyn FeedbackProvider,
    request: &FeedbackRequest,
    fallback: &str,
) -> String {
    match provider.explain(request) {
        Ok(text) if !text.trim().is_empty() => text,
        Ok(_) => {
            log::warn!("Feedback provider returned an empty explanation; using fallback");
            fallback.to_string()
        }
        Err(e) => {
            log::warn!("Feedback unavailable ({}); using fallback", e);
            fallback.to_string()
        }
    }
}

/// [`explain_or`] with [`FALLBACK_MESSAGE`].
pub fn explain_or_fallback(provider: &dyn FeedbackProvider, request: &FeedbackRequest) -> String {
    explain_or(provider, request, FALLBACK_MESSAGE)
}
