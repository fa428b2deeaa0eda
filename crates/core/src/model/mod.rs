mod course;
mod ids;
mod progress;
mod quiz;
mod topic;

pub use ids::{CourseId, ParseIdError, QuizId, TopicId};

pub use course::{Course, CourseError};
pub use progress::ProgressValue;
pub use quiz::{Quiz, QuizError};
pub use topic::{Topic, TopicError};
