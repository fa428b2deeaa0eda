use std::sync::Arc;

use mathtermind_core::config::AppConfig;
use mathtermind_core::model::{Quiz, QuizId};
use storage::repository::{
    InMemoryRepository, QuizCounts, QuizRepository, Storage, StorageError,
};

use super::test_harness::{ViewKind, setup_view_harness, setup_view_harness_with_storage};

#[tokio::test(flavor = "current_thread")]
async fn dashboard_smoke_renders_ring_and_counts() {
    let mut harness = setup_view_harness(ViewKind::Dashboard);
    harness.services.seed_sample_content().await.expect("seed");
    let quizzes = harness.services.quizzes();
    for quiz in quizzes.list_quizzes(10).await.expect("list").iter().take(2) {
        quizzes.set_completed(quiz.id(), true).await.expect("complete");
    }

    harness.rebuild();
    harness.drive_async().await;
    let html = harness.render();
    assert!(html.contains("Dashboard"), "missing title in {html}");
    assert!(html.contains("Courses: 2"), "missing course count in {html}");
    assert!(
        html.contains("Quizzes completed: 2 of 4"),
        "missing quiz count in {html}"
    );
    assert!(html.contains("50%"), "missing ring label in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn dashboard_smoke_empty_database_shows_zero() {
    let mut harness = setup_view_harness(ViewKind::Dashboard);
    harness.rebuild();
    harness.drive_async().await;
    let html = harness.render();
    assert!(html.contains("0%"), "missing ring label in {html}");
    assert!(html.contains("Courses: 0"), "missing course count in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn courses_smoke_lists_topics() {
    let mut harness = setup_view_harness(ViewKind::Courses);
    harness.services.seed_sample_content().await.expect("seed");

    harness.rebuild();
    harness.drive_async().await;
    let html = harness.render();
    assert!(html.contains("Algebra"), "missing course in {html}");
    assert!(html.contains("Quadratic equations"), "missing topic in {html}");
    assert!(html.contains("3 topics"), "missing topic summary in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn courses_smoke_empty_state() {
    let mut harness = setup_view_harness(ViewKind::Courses);
    harness.rebuild();
    harness.drive_async().await;
    let html = harness.render();
    assert!(html.contains("No courses yet."), "missing empty state in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn quizzes_smoke_renders_markdown_questions() {
    let mut harness = setup_view_harness(ViewKind::Quizzes);
    harness.services.seed_sample_content().await.expect("seed");

    harness.rebuild();
    harness.drive_async().await;
    let html = harness.render();
    assert!(html.contains("Solve for x"), "missing quiz title in {html}");
    assert!(html.contains("<strong>2x + 3 = 11</strong>"), "missing markdown in {html}");
    assert!(html.contains("Mark as done"), "missing toggle in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn settings_smoke_shows_config() {
    let mut harness = setup_view_harness(ViewKind::Settings);
    harness.rebuild();
    let html = harness.render();
    assert!(html.contains("Mathtermind"), "missing title in {html}");
    assert!(html.contains("1200 x 800"), "missing window size in {html}");
    assert!(html.contains("in-memory"), "missing data source in {html}");
    assert!(html.contains("(loaded)"), "missing stylesheet status in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn settings_smoke_missing_stylesheet_still_renders() {
    let config = AppConfig::new("Mathtermind", 1200, 800, 220, "/definitely/missing.css")
        .expect("config");
    let mut harness =
        setup_view_harness_with_storage(ViewKind::Settings, Storage::in_memory(), config);
    harness.rebuild();
    let html = harness.render();
    assert!(html.contains("not found"), "missing stylesheet status in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn quizzes_toggle_updates_ring_and_button() {
    let mut harness = setup_view_harness(ViewKind::Quizzes);
    harness.services.seed_sample_content().await.expect("seed");

    harness.rebuild();
    harness.drive_async().await;
    let html = harness.render();
    assert!(html.contains("aria-valuenow=\"0\""), "expected empty ring in {html}");
    assert!(!html.contains("Mark as not done"), "nothing completed yet in {html}");

    let quizzes = harness.services.quizzes();
    let first = quizzes.list_quizzes(10).await.expect("list")[0].id();
    harness.toggle_quiz(first.value());
    harness.drive_async().await;

    let html = harness.render();
    assert!(html.contains("25%"), "missing updated ring label in {html}");
    assert!(html.contains("aria-valuenow=\"25\""), "missing updated ring value in {html}");
    assert!(html.contains("Mark as not done"), "missing flipped toggle in {html}");
    assert_eq!(quizzes.counts().await.expect("counts").completed, 1);
}

/// Reads work, completion writes fail.
#[derive(Clone)]
struct ReadOnlyQuizRepo(InMemoryRepository);

#[async_trait::async_trait]
impl QuizRepository for ReadOnlyQuizRepo {
    async fn insert_quiz(&self, quiz: &Quiz) -> Result<QuizId, StorageError> {
        self.0.insert_quiz(quiz).await
    }

    async fn get_quiz(&self, id: QuizId) -> Result<Option<Quiz>, StorageError> {
        self.0.get_quiz(id).await
    }

    async fn list_quizzes(&self, limit: u32) -> Result<Vec<Quiz>, StorageError> {
        self.0.list_quizzes(limit).await
    }

    async fn set_quiz_completed(&self, _id: QuizId, _completed: bool) -> Result<(), StorageError> {
        Err(StorageError::Connection("read only".to_string()))
    }

    async fn count_quizzes(&self) -> Result<QuizCounts, StorageError> {
        self.0.count_quizzes().await
    }
}

#[tokio::test(flavor = "current_thread")]
async fn quizzes_toggle_failure_shows_error_and_keeps_ring() {
    let mut storage = Storage::in_memory();
    storage.quizzes = Arc::new(ReadOnlyQuizRepo(InMemoryRepository::new()));
    let mut harness =
        setup_view_harness_with_storage(ViewKind::Quizzes, storage, AppConfig::default());
    harness.services.seed_sample_content().await.expect("seed");

    harness.rebuild();
    harness.drive_async().await;
    let html = harness.render();
    assert!(html.contains("Solve for x"), "missing quiz list in {html}");
    assert!(!html.contains("Something went wrong"), "unexpected error in {html}");

    let first = harness.services.quizzes().list_quizzes(10).await.expect("list")[0].id();
    harness.toggle_quiz(first.value());
    harness.drive_async().await;

    let html = harness.render();
    assert!(html.contains("Something went wrong"), "missing toggle error in {html}");
    assert!(html.contains("aria-valuenow=\"0\""), "ring should not move in {html}");
    assert!(html.contains("Solve for x"), "list should stay visible in {html}");
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

#[tokio::test(flavor = "current_thread")]
async fn quizzes_smoke_renders_error_state() {
    let mut storage = Storage::in_memory();
    storage.quizzes = Arc::new(FailingQuizRepo);
    let mut harness =
        setup_view_harness_with_storage(ViewKind::Quizzes, storage, AppConfig::default());
    harness.rebuild();
    harness.drive_async().await;
    let html = harness.render();
    assert!(html.contains("Something went wrong"), "missing error in {html}");
}
