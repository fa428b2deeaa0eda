use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::model::course::normalize_description;
use crate::model::ids::{CourseId, TopicId};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum TopicError {
    #[error("topic name cannot be empty")]
    EmptyName,
}

/// A topic belongs to exactly one course.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Topic {
    id: TopicId,
    course_id: CourseId,
    name: String,
    description: Option<String>,
    created_at: DateTime<Utc>,
}

impl Topic {
    /// Creates a new Topic under `course_id`.
    ///
    /// # Errors
    ///
    /// Returns `TopicError::EmptyName` if name is empty or whitespace-only.
    pub fn new(
        id: TopicId,
        course_id: CourseId,
        name: impl Into<String>,
        description: Option<String>,
        created_at: DateTime<Utc>,
    ) -> Result<Self, TopicError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(TopicError::EmptyName);
        }

        Ok(Self {
            id,
            course_id,
            name: name.trim().to_owned(),
            description: normalize_description(description),
            created_at,
        })
    }

    #[must_use]
    pub fn with_id(self, id: TopicId) -> Self {
        Self { id, ..self }
    }

    #[must_use]
    pub fn id(&self) -> TopicId {
        self.id
    }

    #[must_use]
    pub fn course_id(&self) -> CourseId {
        self.course_id
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    #[must_use]
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::time::fixed_now;

    #[test]
    fn topic_new_rejects_empty_name() {
        let err = Topic::new(TopicId::new(1), CourseId::new(1), "", None, fixed_now())
            .unwrap_err();
        assert_eq!(err, TopicError::EmptyName);
    }

    #[test]
    fn topic_keeps_parent_course() {
        let topic = Topic::new(
            TopicId::new(3),
            CourseId::new(2),
            " Fractions ",
            None,
            fixed_now(),
        )
        .unwrap();
        assert_eq!(topic.course_id(), CourseId::new(2));
        assert_eq!(topic.name(), "Fractions");
    }
}
