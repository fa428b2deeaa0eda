mod courses;
mod dashboard;
mod quizzes;
mod settings;
mod state;

#[cfg(test)]
mod test_harness;
#[cfg(test)]
mod view_smoke;

pub use courses::CoursesView;
pub use dashboard::DashboardView;
pub use quizzes::QuizzesView;
pub use settings::SettingsView;
pub use state::{ViewError, ViewState, view_state_from_resource};
