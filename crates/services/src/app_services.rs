use std::sync::Arc;

use storage::repository::Storage;

use crate::Clock;
use crate::course_service::CourseService;
use crate::error::AppServicesError;
use crate::quiz_service::QuizService;

const SAMPLE_COURSES: &[(&str, &str, &[&str])] = &[
    (
        "Algebra",
        "Expressions, equations and functions",
        &["Linear equations", "Quadratic equations", "Functions"],
    ),
    (
        "Geometry",
        "Shapes, angles and proofs",
        &["Triangles", "Circles"],
    ),
];

const SAMPLE_QUIZZES: &[(&str, &str, &str)] = &[
    ("Solve for x", "Solve **2x + 3 = 11**.", "x = 4"),
    ("Factor", "Factor `x^2 - 9`.", "(x - 3)(x + 3)"),
    ("Angles", "What is the sum of the interior angles of a triangle?", "180 degrees"),
    ("Circle area", "Area of a circle with radius *3*?", "9π"),
];

/// Assembles app-facing services over one storage backend.
#[derive(Clone)]
pub struct AppServices {
    storage: Storage,
    courses: Arc<CourseService>,
    quizzes: Arc<QuizService>,
}

impl AppServices {
    /// Build services backed by `SQLite` storage.
    ///
    /// # Errors
    ///
    /// Returns `AppServicesError` if the database cannot be opened or set up.
    pub async fn new_sqlite(db_url: &str, clock: Clock) -> Result<Self, AppServicesError> {
        let storage = Storage::sqlite(db_url).await?;
        Ok(Self::from_storage(storage, clock))
    }

    #[must_use]
    pub fn from_storage(storage: Storage, clock: Clock) -> Self {
        let courses = Arc::new(CourseService::new(
            clock,
            Arc::clone(&storage.courses),
            Arc::clone(&storage.topics),
        ));
        let quizzes = Arc::new(QuizService::new(clock, Arc::clone(&storage.quizzes)));
        Self {
            storage,
            courses,
            quizzes,
        }
    }

    #[must_use]
    pub fn courses(&self) -> Arc<CourseService> {
        Arc::clone(&self.courses)
    }

    #[must_use]
    pub fn quizzes(&self) -> Arc<QuizService> {
        Arc::clone(&self.quizzes)
    }

    #[must_use]
    pub fn storage(&self) -> &Storage {
        &self.storage
    }

    /// Insert starter courses, topics and quizzes when the database holds no
    /// courses and no quizzes. Returns whether anything was inserted.
    ///
    /// # Errors
    ///
    /// Returns `AppServicesError` if any insert fails.
    pub async fn seed_sample_content(&self) -> Result<bool, AppServicesError> {
        let has_courses = self.courses.count_courses().await? > 0;
        let has_quizzes = self.quizzes.counts().await?.total > 0;
        if has_courses || has_quizzes {
            tracing::debug!("database not empty, skipping sample content");
            return Ok(false);
        }

        for (name, description, topics) in SAMPLE_COURSES {
            let course_id = self
                .courses
                .create_course((*name).to_string(), Some((*description).to_string()))
                .await?;
            for topic in *topics {
                self.courses
                    .add_topic(course_id, (*topic).to_string(), None)
                    .await?;
            }
        }

        for (title, question, answer) in SAMPLE_QUIZZES {
            self.quizzes
                .create_quiz(
                    (*title).to_string(),
                    (*question).to_string(),
                    Some((*answer).to_string()),
                )
                .await?;
        }

        tracing::info!(
            courses = SAMPLE_COURSES.len(),
            quizzes = SAMPLE_QUIZZES.len(),
            "sample content inserted"
        );
        Ok(true)
    }

    /// Close the underlying database handle.
    pub async fn close(&self) {
        self.storage.close().await;
    }
}
