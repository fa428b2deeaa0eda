use mathtermind_core::model::{CourseId, Topic, TopicId};

use super::mapping::{course_id_to_i64, map_topic_row, topic_id_from_i64, topic_id_to_i64};
use super::{SqliteRepository, storage_err};
use crate::repository::{StorageError, TopicRepository};

#[async_trait::async_trait]
impl TopicRepository for SqliteRepository {
    async fn insert_topic(&self, topic: &Topic) -> Result<TopicId, StorageError> {
        let res = sqlx::query(
            r"
            INSERT INTO topics (course_id, name, description, created_at)
            VALUES (?1, ?2, ?3, ?4)
            ",
        )
        .bind(course_id_to_i64(topic.course_id())?)
        .bind(topic.name())
        .bind(topic.description())
        .bind(topic.created_at())
        .execute(&self.pool)
        .await
        .map_err(storage_err)?;

        topic_id_from_i64(res.last_insert_rowid())
    }

    async fn list_topics(&self, course_id: CourseId) -> Result<Vec<Topic>, StorageError> {
        let rows = sqlx::query(
            r"
            SELECT id, course_id, name, description, created_at
            FROM topics
            WHERE course_id = ?1
            ORDER BY id ASC
            ",
        )
        .bind(course_id_to_i64(course_id)?)
        .fetch_all(&self.pool)
        .await
        .map_err(storage_err)?;

        rows.iter().map(map_topic_row).collect()
    }

    async fn delete_topic(&self, id: TopicId) -> Result<(), StorageError> {
        let res = sqlx::query("DELETE FROM topics WHERE id = ?1")
            .bind(topic_id_to_i64(id)?)
            .execute(&self.pool)
            .await
            .map_err(storage_err)?;

        if res.rows_affected() == 0 {
            return Err(StorageError::NotFound);
        }
        Ok(())
    }
}
