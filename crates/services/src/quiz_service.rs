use std::sync::Arc;

use mathtermind_core::model::{ProgressValue, Quiz, QuizId};
use storage::repository::{QuizCounts, QuizRepository, StorageError};

use crate::Clock;
use crate::error::QuizServiceError;

/// Quiz creation, completion tracking, and the overall completion percentage
/// shown by the dashboard gauge.
#[derive(Clone)]
pub struct QuizService {
    clock: Clock,
    quizzes: Arc<dyn QuizRepository>,
}

impl QuizService {
    #[must_use]
    pub fn new(clock: Clock, quizzes: Arc<dyn QuizRepository>) -> Self {
        Self { clock, quizzes }
    }

    /// Validate and persist a new quiz.
    ///
    /// # Errors
    ///
    /// Returns `QuizServiceError::Quiz` for validation failures.
    /// Returns `QuizServiceError::Storage` if persistence fails.
    pub async fn create_quiz(
        &self,
        title: String,
        question: String,
        answer: Option<String>,
    ) -> Result<QuizId, QuizServiceError> {
        let quiz = Quiz::new(QuizId::new(0), title, question, answer, self.clock.now())?;
        let id = self.quizzes.insert_quiz(&quiz).await?;
        tracing::info!(quiz_id = %id, "quiz created");
        Ok(id)
    }

    /// # Errors
    ///
    /// Returns `QuizServiceError::Storage` if repository access fails.
    pub async fn list_quizzes(&self, limit: u32) -> Result<Vec<Quiz>, QuizServiceError> {
        Ok(self.quizzes.list_quizzes(limit).await?)
    }

    /// # Errors
    ///
    /// Returns `QuizServiceError::Storage` (`NotFound` if the quiz is missing).
    pub async fn set_completed(&self, id: QuizId, completed: bool) -> Result<(), QuizServiceError> {
        self.quizzes.set_quiz_completed(id, completed).await?;
        Ok(())
    }

    /// Flip the completion flag and return the new state.
    ///
    /// # Errors
    ///
    /// Returns `QuizServiceError::Storage` (`NotFound` if the quiz is missing).
    pub async fn toggle_completed(&self, id: QuizId) -> Result<bool, QuizServiceError> {
        let quiz = self
            .quizzes
            .get_quiz(id)
            .await?
            .ok_or(StorageError::NotFound)?;
        let completed = !quiz.is_completed();
        self.quizzes.set_quiz_completed(id, completed).await?;
        Ok(completed)
    }

    /// # Errors
    ///
    /// Returns `QuizServiceError::Storage` if repository access fails.
    pub async fn counts(&self) -> Result<QuizCounts, QuizServiceError> {
        Ok(self.quizzes.count_quizzes().await?)
    }

    /// Share of completed quizzes, rounded to a whole percent. No quizzes is 0%.
    ///
    /// # Errors
    ///
    /// Returns `QuizServiceError::Storage` if repository access fails.
    pub async fn completion_percent(&self) -> Result<ProgressValue, QuizServiceError> {
        let counts = self.counts().await?;
        Ok(percent_of(counts))
    }
}

fn percent_of(counts: QuizCounts) -> ProgressValue {
    let total = usize::try_from(counts.total).unwrap_or(usize::MAX);
    let completed = usize::try_from(counts.completed).unwrap_or(usize::MAX);
    ProgressValue::from_ratio(completed, total)
}
