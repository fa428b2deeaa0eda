use std::sync::Arc;

use mathtermind_core::model::{Course, CourseId, Topic, TopicId};
use storage::repository::{CourseRepository, StorageError, TopicRepository};

use crate::Clock;
use crate::error::CourseServiceError;

/// A course together with its topics, in id order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CourseWithTopics {
    pub course: Course,
    pub topics: Vec<Topic>,
}

/// Orchestrates course and topic creation and lookup.
#[derive(Clone)]
pub struct CourseService {
    clock: Clock,
    courses: Arc<dyn CourseRepository>,
    topics: Arc<dyn TopicRepository>,
}

impl CourseService {
    #[must_use]
    pub fn new(
        clock: Clock,
        courses: Arc<dyn CourseRepository>,
        topics: Arc<dyn TopicRepository>,
    ) -> Self {
        Self {
            clock,
            courses,
            topics,
        }
    }

    /// Validate and persist a new course.
    ///
    /// # Errors
    ///
    /// Returns `CourseServiceError::Course` for validation failures.
    /// Returns `CourseServiceError::Storage` if persistence fails.
    pub async fn create_course(
        &self,
        name: String,
        description: Option<String>,
    ) -> Result<CourseId, CourseServiceError> {
        let course = Course::new(CourseId::new(0), name, description, self.clock.now())?;
        let id = self.courses.insert_course(&course).await?;
        tracing::info!(course_id = %id, name = course.name(), "course created");
        Ok(id)
    }

    /// # Errors
    ///
    /// Returns `CourseServiceError::Storage` if repository access fails.
    pub async fn list_courses(&self, limit: u32) -> Result<Vec<Course>, CourseServiceError> {
        Ok(self.courses.list_courses(limit).await?)
    }

    /// Returns `Ok(None)` when the course does not exist.
    ///
    /// # Errors
    ///
    /// Returns `CourseServiceError::Storage` if repository access fails.
    pub async fn get_course(&self, id: CourseId) -> Result<Option<Course>, CourseServiceError> {
        Ok(self.courses.get_course(id).await?)
    }

    /// Delete a course along with its topics.
    ///
    /// # Errors
    ///
    /// Returns `CourseServiceError::Storage` (`NotFound` if missing).
    pub async fn delete_course(&self, id: CourseId) -> Result<(), CourseServiceError> {
        self.courses.delete_course(id).await?;
        tracing::info!(course_id = %id, "course deleted");
        Ok(())
    }

    /// # Errors
    ///
    /// Returns `CourseServiceError::Storage` if repository access fails.
    pub async fn count_courses(&self) -> Result<u64, CourseServiceError> {
        Ok(self.courses.count_courses().await?)
    }

    /// Add a topic to an existing course.
    ///
    /// # Errors
    ///
    /// Returns `CourseServiceError::Storage(StorageError::NotFound)` if the
    /// course does not exist, `CourseServiceError::Topic` for validation
    /// failures.
    pub async fn add_topic(
        &self,
        course_id: CourseId,
        name: String,
        description: Option<String>,
    ) -> Result<TopicId, CourseServiceError> {
        let topic = Topic::new(TopicId::new(0), course_id, name, description, self.clock.now())?;
        if self.courses.get_course(course_id).await?.is_none() {
            return Err(StorageError::NotFound.into());
        }
        let id = self.topics.insert_topic(&topic).await?;
        tracing::debug!(course_id = %course_id, topic_id = %id, "topic added");
        Ok(id)
    }

    /// # Errors
    ///
    /// Returns `CourseServiceError::Storage` if repository access fails.
    pub async fn list_topics(&self, course_id: CourseId) -> Result<Vec<Topic>, CourseServiceError> {
        Ok(self.topics.list_topics(course_id).await?)
    }

    /// Courses (up to `limit`) each paired with its topics.
    ///
    /// # Errors
    ///
    /// Returns `CourseServiceError::Storage` if repository access fails.
    pub async fn list_courses_with_topics(
        &self,
        limit: u32,
    ) -> Result<Vec<CourseWithTopics>, CourseServiceError> {
        let courses = self.courses.list_courses(limit).await?;
        let mut out = Vec::with_capacity(courses.len());
        for course in courses {
            let topics = self.topics.list_topics(course.id()).await?;
            out.push(CourseWithTopics { course, topics });
        }
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use mathtermind_core::model::CourseError;
    use mathtermind_core::time::fixed_clock;
    use storage::repository::InMemoryRepository;

    fn service() -> CourseService {
        let repo = InMemoryRepository::new();
        CourseService::new(fixed_clock(), Arc::new(repo.clone()), Arc::new(repo))
    }

    #[tokio::test]
    async fn create_course_validates_name() {
        let service = service();
        let err = service
            .create_course("   ".to_string(), None)
            .await
            .unwrap_err();
        assert!(matches!(err, CourseServiceError::Course(CourseError::EmptyName)));
        assert_eq!(service.count_courses().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn add_topic_requires_course() {
        let service = service();
        let err = service
            .add_topic(CourseId::new(5), "Limits".to_string(), None)
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            CourseServiceError::Storage(StorageError::NotFound)
        ));
    }

    #[tokio::test]
    async fn lists_courses_with_their_topics() {
        let service = service();
        let algebra = service
            .create_course("Algebra".to_string(), Some("basics".to_string()))
            .await
            .unwrap();
        let geometry = service
            .create_course("Geometry".to_string(), None)
            .await
            .unwrap();
        service
            .add_topic(algebra, "Equations".to_string(), None)
            .await
            .unwrap();
        service
            .add_topic(algebra, "Inequalities".to_string(), None)
            .await
            .unwrap();

        let listed = service.list_courses_with_topics(10).await.unwrap();
        assert_eq!(listed.len(), 2);
        assert_eq!(listed[0].course.id(), algebra);
        assert_eq!(listed[0].topics.len(), 2);
        assert_eq!(listed[1].course.id(), geometry);
        assert!(listed[1].topics.is_empty());
    }

    #[tokio::test]
    async fn delete_course_removes_topics() {
        let service = service();
        let id = service
            .create_course("Calculus".to_string(), None)
            .await
            .unwrap();
        service
            .add_topic(id, "Limits".to_string(), None)
            .await
            .unwrap();

        service.delete_course(id).await.unwrap();
        assert!(service.get_course(id).await.unwrap().is_none());
        assert!(service.list_topics(id).await.unwrap().is_empty());
    }
}
