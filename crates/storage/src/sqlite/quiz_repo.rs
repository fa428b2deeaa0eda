use mathtermind_core::model::{Quiz, QuizId};
use sqlx::Row;

use super::mapping::{map_quiz_row, quiz_id_from_i64, quiz_id_to_i64, ser};
use super::{SqliteRepository, storage_err};
use crate::repository::{QuizCounts, QuizRepository, StorageError};

#[async_trait::async_trait]
impl QuizRepository for SqliteRepository {
    async fn insert_quiz(&self, quiz: &Quiz) -> Result<QuizId, StorageError> {
        let res = sqlx::query(
            r"
            INSERT INTO quizzes (title, question, answer, completed, created_at)
            VALUES (?1, ?2, ?3, ?4, ?5)
            ",
        )
        .bind(quiz.title())
        .bind(quiz.question())
        .bind(quiz.answer())
        .bind(quiz.is_completed())
        .bind(quiz.created_at())
        .execute(&self.pool)
        .await
        .map_err(storage_err)?;

        quiz_id_from_i64(res.last_insert_rowid())
    }

    async fn get_quiz(&self, id: QuizId) -> Result<Option<Quiz>, StorageError> {
        let row = sqlx::query(
            r"
            SELECT id, title, question, answer, completed, created_at
            FROM quizzes WHERE id = ?1
            ",
        )
        .bind(quiz_id_to_i64(id)?)
        .fetch_optional(&self.pool)
        .await
        .map_err(storage_err)?;

        row.as_ref().map(map_quiz_row).transpose()
    }

    async fn list_quizzes(&self, limit: u32) -> Result<Vec<Quiz>, StorageError> {
        let rows = sqlx::query(
            r"
            SELECT id, title, question, answer, completed, created_at
            FROM quizzes
            ORDER BY id ASC
            LIMIT ?1
            ",
        )
        .bind(i64::from(limit))
        .fetch_all(&self.pool)
        .await
        .map_err(storage_err)?;

        rows.iter().map(map_quiz_row).collect()
    }

    async fn set_quiz_completed(&self, id: QuizId, completed: bool) -> Result<(), StorageError> {
        let res = sqlx::query("UPDATE quizzes SET completed = ?1 WHERE id = ?2")
            .bind(completed)
            .bind(quiz_id_to_i64(id)?)
            .execute(&self.pool)
            .await
            .map_err(storage_err)?;

        if res.rows_affected() == 0 {
            return Err(StorageError::NotFound);
        }
        tracing::debug!(quiz_id = %id, completed, "quiz completion updated");
        Ok(())
    }

    async fn count_quizzes(&self) -> Result<QuizCounts, StorageError> {
        let row = sqlx::query(
            r"
            SELECT COUNT(*) AS total, COALESCE(SUM(completed), 0) AS completed
            FROM quizzes
            ",
        )
        .fetch_one(&self.pool)
        .await
        .map_err(storage_err)?;

        let total: i64 = row.try_get("total").map_err(ser)?;
        let completed: i64 = row.try_get("completed").map_err(ser)?;
        Ok(QuizCounts {
            total: u64::try_from(total).map_err(ser)?,
            completed: u64::try_from(completed).map_err(ser)?,
        })
    }
}
