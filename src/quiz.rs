//! Quiz grading.
//!
//! Lesson pages close with multiple-choice concept checks and numeric
//! problems whose answer comes from an evaluator. Grading is a pure
//! comparison; explaining a wrong answer in more depth is left to a
//! [`FeedbackProvider`](crate::feedback::FeedbackProvider).

use serde::{Deserialize, Serialize};

use crate::feedback::{self, FeedbackProvider, FeedbackRequest};
use crate::{guard, EvalError, EvalResult};

/// Outcome of checking one answer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Grade {
    pub correct: bool,
    pub explanation: String,
}

/// A question with a fixed list of options and one correct index.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MultipleChoice {
    pub question: String,
    pub options: Vec<String>,
    pub correct: usize,
    pub explanation: String,
}

impl MultipleChoice {
    /// Creates a question, checking that `correct` indexes into `options`.
    pub fn new<S: Into<String>>(
        question: S,
        options: Vec<String>,
        correct: usize,
        explanation: S,
    ) -> EvalResult<Self> {
        if correct >= options.len() {
            return Err(EvalError::InvalidAnswer { index: correct, options: options.len() });
        }
        Ok(MultipleChoice {
            question: question.into(),
            options,
            correct,
            explanation: explanation.into(),
        })
    }

    /// Grades the option at `choice`.
    ///
    /// # Example
    ///
    /// ```
    /// use physeval::quiz::MultipleChoice;
    ///
    /// let q = MultipleChoice::new(
    ///     "What happens to pressure as fluid speed increases?",
    ///     vec!["It increases".into(), "It decreases".into()],
    ///     1,
    ///     "Speed and pressure are inversely related.",
    /// )?;
    /// assert!(q.check(1)?.correct);
    /// assert!(!q.check(0)?.correct);
    /// # Ok::<(), physeval::EvalError>(())
    /// ```
    pub fn check(&self, choice: usize) -> EvalResult<Grade> {
        if choice >= self.options.len() {
            return Err(EvalError::InvalidAnswer { index: choice, options: self.options.len() });
        }
        Ok(Grade { correct: choice == self.correct, explanation: self.explanation.clone() })
    }

    /// Grades `choice` and, when wrong, asks `provider` for a tailored
    /// explanation, falling back to the stored one.
    pub fn review(&self, choice: usize, provider: &dyn FeedbackProvider) -> EvalResult<Grade> {
        let grade = self.check(choice)?;
        if grade.correct {
            return Ok(grade);
        }
        let request = FeedbackRequest {
            question: self.question.clone(),
            student_answer: self.options[choice].clone(),
            correct_answer: self.options[self.correct].clone(),
        };
        let explanation = feedback::explain_or(provider, &request, &self.explanation);
        Ok(Grade { correct: false, explanation })
    }
}

/// A question whose answer is a number, accepted within an absolute tolerance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NumericQuestion {
    pub question: String,
    pub answer: f64,
    pub tolerance: f64,
    pub explanation: String,
}

impl NumericQuestion {
    pub fn new<S: Into<String>>(
        question: S,
        answer: f64,
        tolerance: f64,
        explanation: S,
    ) -> EvalResult<Self> {
        let answer = guard::finite("answer", answer)?;
        let tolerance = guard::non_negative("tolerance", tolerance)?;
        Ok(NumericQuestion {
            question: question.into(),
            answer,
            tolerance,
            explanation: explanation.into(),
        })
    }

    pub fn check(&self, value: f64) -> Grade {
        let correct = value.is_finite() && (value - self.answer).abs() <= self.tolerance;
        Grade { correct, explanation: self.explanation.clone() }
    }

    /// Grades `value` and, when wrong, asks `provider` for an explanation.
    pub fn review(&self, value: f64, provider: &dyn FeedbackProvider) -> Grade {
        let grade = self.check(value);
        if grade.correct {
            return grade;
        }
        let request = FeedbackRequest {
            question: self.question.clone(),
            student_answer: value.to_string(),
            correct_answer: self.answer.to_string(),
        };
        Grade {
            correct: false,
            explanation: feedback::explain_or(provider, &request, &self.explanation),
        }
    }
}
