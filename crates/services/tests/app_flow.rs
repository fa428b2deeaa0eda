use std::sync::Arc;

use mathtermind_core::gauge::{ArcTone, ProgressIndicator};
use mathtermind_core::model::{Quiz, QuizId};
use mathtermind_core::time::fixed_now;
use services::{AppServices, Clock, QuizService, QuizServiceError};
use storage::repository::{QuizCounts, QuizRepository, StorageError};

#[tokio::test]
async fn sqlite_backed_progress_feeds_indicator() {
    let services = AppServices::new_sqlite(
        "sqlite:file:memdb_app_flow?mode=memory&cache=shared",
        Clock::fixed(fixed_now()),
    )
    .await
    .expect("open sqlite");
    assert!(services.seed_sample_content().await.expect("seed"));

    let quizzes = services.quizzes();
    let listed = quizzes.list_quizzes(10).await.expect("list");
    assert_eq!(listed.len(), 4);

    let mut indicator = ProgressIndicator::new();
    indicator.set_value(i64::from(quizzes.completion_percent().await.unwrap().get()));
    assert_eq!(indicator.value(), 0);
    assert_eq!(indicator.tone(), ArcTone::Alert);

    for quiz in listed.iter().take(3) {
        quizzes.set_completed(quiz.id(), true).await.unwrap();
    }
    indicator.set_value(i64::from(quizzes.completion_percent().await.unwrap().get()));
    assert_eq!(indicator.value(), 75);
    assert_eq!(indicator.tone(), ArcTone::Info);
    assert_eq!(indicator.label(), "75%");

    services.close().await;
    assert!(quizzes.counts().await.is_err());
}

struct FailingQuizRepo;

#[async_trait::async_trait]
impl QuizRepository for FailingQuizRepo {
    async fn insert_quiz(&self, _quiz: &Quiz) -> Result<QuizId, StorageError> {
        Err(StorageError::Connection("fail".to_string()))
    }

    async fn get_quiz(&self, _id: QuizId) -> Result<Option<Quiz>, StorageError> {
        Err(StorageError::Connection("fail".to_string()))
    }

    async fn list_quizzes(&self, _limit: u32) -> Result<Vec<Quiz>, StorageError> {
        Err(StorageError::Connection("fail".to_string()))
    }

    async fn set_quiz_completed(&self, _id: QuizId, _completed: bool) -> Result<(), StorageError> {
        Err(StorageError::Connection("fail".to_string()))
    }

    async fn count_quizzes(&self) -> Result<QuizCounts, StorageError> {
        Err(StorageError::Connection("fail".to_string()))
    }
}

#[tokio::test]
async fn storage_failures_surface_as_service_errors() {
    let service = QuizService::new(Clock::fixed(fixed_now()), Arc::new(FailingQuizRepo));
    let err = service.completion_percent().await.unwrap_err();
    assert!(matches!(
        err,
        QuizServiceError::Storage(StorageError::Connection(_))
    ));
}
