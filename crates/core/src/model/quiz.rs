use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::model::ids::QuizId;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum QuizError {
    #[error("quiz title cannot be empty")]
    EmptyTitle,

    #[error("quiz question cannot be empty")]
    EmptyQuestion,
}

/// A single quiz question. The question text is markdown.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Quiz {
    id: QuizId,
    title: String,
    question: String,
    answer: Option<String>,
    completed: bool,
    created_at: DateTime<Utc>,
}

impl Quiz {
    /// Creates a new, not yet completed quiz.
    ///
    /// # Errors
    ///
    /// Returns `QuizError` if the title or question is blank.
    pub fn new(
        id: QuizId,
        title: impl Into<String>,
        question: impl Into<String>,
        answer: Option<String>,
        created_at: DateTime<Utc>,
    ) -> Result<Self, QuizError> {
        Self::from_persisted(id, title, question, answer, false, created_at)
    }

    /// Rebuilds a quiz from stored fields, re-running validation.
    ///
    /// # Errors
    ///
    /// Returns `QuizError` if the title or question is blank.
    pub fn from_persisted(
        id: QuizId,
        title: impl Into<String>,
        question: impl Into<String>,
        answer: Option<String>,
        completed: bool,
        created_at: DateTime<Utc>,
    ) -> Result<Self, QuizError> {
        let title = title.into();
        let question = question.into();
        if title.trim().is_empty() {
            return Err(QuizError::EmptyTitle);
        }
        if question.trim().is_empty() {
            return Err(QuizError::EmptyQuestion);
        }

        Ok(Self {
            id,
            title: title.trim().to_owned(),
            question: question.trim().to_owned(),
            answer: answer
                .map(|a| a.trim().to_owned())
                .filter(|a| !a.is_empty()),
            completed,
            created_at,
        })
    }

    #[must_use]
    pub fn with_id(self, id: QuizId) -> Self {
        Self { id, ..self }
    }

    pub fn set_completed(&mut self, completed: bool) {
        self.completed = completed;
    }

    #[must_use]
    pub fn id(&self) -> QuizId {
        self.id
    }

    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    #[must_use]
    pub fn question(&self) -> &str {
        &self.question
    }

    #[must_use]
    pub fn answer(&self) -> Option<&str> {
        self.answer.as_deref()
    }

    #[must_use]
    pub fn is_completed(&self) -> bool {
        self.completed
    }

    #[must_use]
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}
