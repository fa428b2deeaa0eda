#![forbid(unsafe_code)]

pub mod app_services;
pub mod course_service;
pub mod error;
pub mod quiz_service;

pub use mathtermind_core::Clock;

pub use app_services::AppServices;
pub use course_service::{CourseService, CourseWithTopics};
pub use error::{AppServicesError, CourseServiceError, QuizServiceError};
pub use quiz_service::QuizService;
