use async_trait::async_trait;
use mathtermind_core::model::{Course, CourseId, Quiz, QuizId, Topic, TopicId};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::{Arc, Mutex, MutexGuard};
use thiserror::Error;

use crate::sqlite::SqliteRepository;

/// Errors surfaced by storage adapters.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum StorageError {
    #[error("not found")]
    NotFound,

    #[error("conflict")]
    Conflict,

    #[error("connection error: {0}")]
    Connection(String),

    #[error("serialization error: {0}")]
    Serialization(String),
}

/// Completion tally across all quizzes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizCounts {
    pub total: u64,
    pub completed: u64,
}

#[async_trait]
pub trait CourseRepository: Send + Sync {
    /// Insert a course and return the id assigned by storage. The id carried
    /// by `course` is ignored.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the course cannot be stored.
    async fn insert_course(&self, course: &Course) -> Result<CourseId, StorageError>;

    /// Fetch a course by ID. Missing courses yield `Ok(None)`.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` on connection or decoding failures.
    async fn get_course(&self, id: CourseId) -> Result<Option<Course>, StorageError>;

    /// List courses ordered by ID.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` on connection or decoding failures.
    async fn list_courses(&self, limit: u32) -> Result<Vec<Course>, StorageError>;

    /// Delete a course and, through the foreign key, all of its topics.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::NotFound` if the course does not exist.
    async fn delete_course(&self, id: CourseId) -> Result<(), StorageError>;

    /// # Errors
    ///
    /// Returns `StorageError` on connection failures.
    async fn count_courses(&self) -> Result<u64, StorageError>;
}

#[async_trait]
pub trait TopicRepository: Send + Sync {
    /// Insert a topic and return its new id.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Conflict` if the parent course does not exist.
    async fn insert_topic(&self, topic: &Topic) -> Result<TopicId, StorageError>;

    /// Topics of one course ordered by ID.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` on connection or decoding failures.
    async fn list_topics(&self, course_id: CourseId) -> Result<Vec<Topic>, StorageError>;

    /// # Errors
    ///
    /// Returns `StorageError::NotFound` if the topic does not exist.
    async fn delete_topic(&self, id: TopicId) -> Result<(), StorageError>;
}

#[async_trait]
pub trait QuizRepository: Send + Sync {
    /// Insert a quiz and return its new id.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the quiz cannot be stored.
    async fn insert_quiz(&self, quiz: &Quiz) -> Result<QuizId, StorageError>;

    /// # Errors
    ///
    /// Returns `StorageError` on connection or decoding failures.
    async fn get_quiz(&self, id: QuizId) -> Result<Option<Quiz>, StorageError>;

    /// # Errors
    ///
    /// Returns `StorageError` on connection or decoding failures.
    async fn list_quizzes(&self, limit: u32) -> Result<Vec<Quiz>, StorageError>;

    /// # Errors
    ///
    /// Returns `StorageError::NotFound` if the quiz does not exist.
    async fn set_quiz_completed(&self, id: QuizId, completed: bool) -> Result<(), StorageError>;

    /// # Errors
    ///
    /// Returns `StorageError` on connection failures.
    async fn count_quizzes(&self) -> Result<QuizCounts, StorageError>;
}

//
// ─── IN-MEMORY ─────────────────────────────────────────────────────────────────
//

#[derive(Default)]
struct InMemoryState {
    next_course_id: u64,
    next_topic_id: u64,
    next_quiz_id: u64,
    courses: BTreeMap<CourseId, Course>,
    topics: BTreeMap<TopicId, Topic>,
    quizzes: BTreeMap<QuizId, Quiz>,
}

/// Simple in-memory repository implementation for tests and prototyping.
/// Ids start at 1 and are never reused.
#[derive(Clone, Default)]
pub struct InMemoryRepository {
    state: Arc<Mutex<InMemoryState>>,
}

impl InMemoryRepository {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<MutexGuard<'_, InMemoryState>, StorageError> {
        self.state
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))
    }
}

fn take_limit<T>(items: impl Iterator<Item = T>, limit: u32) -> Vec<T> {
    items
        .take(usize::try_from(limit).unwrap_or(usize::MAX))
        .collect()
}

#[async_trait]
impl CourseRepository for InMemoryRepository {
    async fn insert_course(&self, course: &Course) -> Result<CourseId, StorageError> {
        let mut guard = self.lock()?;
        guard.next_course_id += 1;
        let id = CourseId::new(guard.next_course_id);
        guard.courses.insert(id, course.clone().with_id(id));
        Ok(id)
    }

    async fn get_course(&self, id: CourseId) -> Result<Option<Course>, StorageError> {
        Ok(self.lock()?.courses.get(&id).cloned())
    }

    async fn list_courses(&self, limit: u32) -> Result<Vec<Course>, StorageError> {
        Ok(take_limit(self.lock()?.courses.values().cloned(), limit))
    }

    async fn delete_course(&self, id: CourseId) -> Result<(), StorageError> {
        let mut guard = self.lock()?;
        guard.courses.remove(&id).ok_or(StorageError::NotFound)?;
        guard.topics.retain(|_, topic| topic.course_id() != id);
        Ok(())
    }

    async fn count_courses(&self) -> Result<u64, StorageError> {
        Ok(self.lock()?.courses.len() as u64)
    }
}

#[async_trait]
impl TopicRepository for InMemoryRepository {
    async fn insert_topic(&self, topic: &Topic) -> Result<TopicId, StorageError> {
        let mut guard = self.lock()?;
        if !guard.courses.contains_key(&topic.course_id()) {
            return Err(StorageError::Conflict);
        }
        guard.next_topic_id += 1;
        let id = TopicId::new(guard.next_topic_id);
        guard.topics.insert(id, topic.clone().with_id(id));
        Ok(id)
    }

    async fn list_topics(&self, course_id: CourseId) -> Result<Vec<Topic>, StorageError> {
        Ok(self
            .lock()?
            .topics
            .values()
            .filter(|topic| topic.course_id() == course_id)
            .cloned()
            .collect())
    }

    async fn delete_topic(&self, id: TopicId) -> Result<(), StorageError> {
        self.lock()?
            .topics
            .remove(&id)
            .map(|_| ())
            .ok_or(StorageError::NotFound)
    }
}

#[async_trait]
impl QuizRepository for InMemoryRepository {
    async fn insert_quiz(&self, quiz: &Quiz) -> Result<QuizId, StorageError> {
        let mut guard = self.lock()?;
        guard.next_quiz_id += 1;
        let id = QuizId::new(guard.next_quiz_id);
        guard.quizzes.insert(id, quiz.clone().with_id(id));
        Ok(id)
    }

    async fn get_quiz(&self, id: QuizId) -> Result<Option<Quiz>, StorageError> {
        Ok(self.lock()?.quizzes.get(&id).cloned())
    }

    async fn list_quizzes(&self, limit: u32) -> Result<Vec<Quiz>, StorageError> {
        Ok(take_limit(self.lock()?.quizzes.values().cloned(), limit))
    }

    async fn set_quiz_completed(&self, id: QuizId, completed: bool) -> Result<(), StorageError> {
        let mut guard = self.lock()?;
        let quiz = guard.quizzes.get_mut(&id).ok_or(StorageError::NotFound)?;
        quiz.set_completed(completed);
        Ok(())
    }

    async fn count_quizzes(&self) -> Result<QuizCounts, StorageError> {
        let guard = self.lock()?;
        Ok(QuizCounts {
            total: guard.quizzes.len() as u64,
            completed: guard.quizzes.values().filter(|q| q.is_completed()).count() as u64,
        })
    }
}

//
// ─── AGGREGATE ─────────────────────────────────────────────────────────────────
//

/// Aggregates the repositories behind trait objects for easy backend swapping.
#[derive(Clone)]
pub struct Storage {
    pub courses: Arc<dyn CourseRepository>,
    pub topics: Arc<dyn TopicRepository>,
    pub quizzes: Arc<dyn QuizRepository>,
    sqlite: Option<SqliteRepository>,
}

impl Storage {
    #[must_use]
    pub fn in_memory() -> Self {
        let repo = InMemoryRepository::new();
        Self {
            courses: Arc::new(repo.clone()),
            topics: Arc::new(repo.clone()),
            quizzes: Arc::new(repo),
            sqlite: None,
        }
    }

    pub(crate) fn from_sqlite(repo: SqliteRepository) -> Self {
        Self {
            courses: Arc::new(repo.clone()),
            topics: Arc::new(repo.clone()),
            quizzes: Arc::new(repo.clone()),
            sqlite: Some(repo),
        }
    }

    /// Release the database handle, if any. In-memory storage is unaffected.
    pub async fn close(&self) {
        if let Some(repo) = &self.sqlite {
            repo.close().await;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mathtermind_core::time::fixed_now;

    fn course(name: &str) -> Course {
        Course::new(CourseId::new(0), name, None, fixed_now()).unwrap()
    }

    fn topic(course_id: CourseId, name: &str) -> Topic {
        Topic::new(TopicId::new(0), course_id, name, None, fixed_now()).unwrap()
    }

    fn quiz(title: &str) -> Quiz {
        Quiz::new(QuizId::new(0), title, "1 + 1 = ?", Some("2".into()), fixed_now()).unwrap()
    }

    #[tokio::test]
    async fn assigns_sequential_ids() {
        let repo = InMemoryRepository::new();
        let first = repo.insert_course(&course("Algebra")).await.unwrap();
        let second = repo.insert_course(&course("Geometry")).await.unwrap();
        assert_eq!(first, CourseId::new(1));
        assert_eq!(second, CourseId::new(2));

        let fetched = repo.get_course(second).await.unwrap().unwrap();
        assert_eq!(fetched.id(), second);
        assert_eq!(fetched.name(), "Geometry");
    }

    #[tokio::test]
    async fn list_respects_limit() {
        let repo = InMemoryRepository::new();
        for name in ["A", "B", "C"] {
            repo.insert_course(&course(name)).await.unwrap();
        }
        let listed = repo.list_courses(2).await.unwrap();
        let names: Vec<_> = listed.iter().map(Course::name).collect();
        assert_eq!(names, ["A", "B"]);
    }

    #[tokio::test]
    async fn deleting_course_drops_its_topics() {
        let repo = InMemoryRepository::new();
        let keep = repo.insert_course(&course("Keep")).await.unwrap();
        let drop = repo.insert_course(&course("Drop")).await.unwrap();
        repo.insert_topic(&topic(keep, "Kept topic")).await.unwrap();
        repo.insert_topic(&topic(drop, "Gone topic")).await.unwrap();

        repo.delete_course(drop).await.unwrap();

        assert!(repo.list_topics(drop).await.unwrap().is_empty());
        assert_eq!(repo.list_topics(keep).await.unwrap().len(), 1);
        assert!(matches!(
            repo.delete_course(drop).await,
            Err(StorageError::NotFound)
        ));
    }

    #[tokio::test]
    async fn topic_requires_existing_course() {
        let repo = InMemoryRepository::new();
        let err = repo
            .insert_topic(&topic(CourseId::new(99), "Orphan"))
            .await
            .unwrap_err();
        assert!(matches!(err, StorageError::Conflict));
    }

    #[tokio::test]
    async fn quiz_completion_counts() {
        let repo = InMemoryRepository::new();
        let a = repo.insert_quiz(&quiz("a")).await.unwrap();
        repo.insert_quiz(&quiz("b")).await.unwrap();
        repo.set_quiz_completed(a, true).await.unwrap();

        let counts = repo.count_quizzes().await.unwrap();
        assert_eq!(
            counts,
            QuizCounts {
                total: 2,
                completed: 1
            }
        );
        assert!(matches!(
            repo.set_quiz_completed(QuizId::new(42), true).await,
            Err(StorageError::NotFound)
        ));
    }
}
