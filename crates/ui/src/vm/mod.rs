mod course_vm;
mod markdown_vm;
mod quiz_vm;
mod time_fmt;

pub use course_vm::{CourseCardVm, map_course_cards};
pub use markdown_vm::{markdown_to_html, sanitize_html};
pub use quiz_vm::{QuizItemVm, map_quiz_items};
pub use time_fmt::format_date;
