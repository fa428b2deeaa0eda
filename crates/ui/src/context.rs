use std::path::Path;
use std::sync::Arc;

use mathtermind_core::config::AppConfig;
use services::{CourseService, QuizService};

/// What the composition root (e.g. `crates/app`) hands to the UI.
pub trait UiApp: Send + Sync {
    fn config(&self) -> AppConfig;

    /// Human-readable description of where data lives, shown on the settings page.
    fn data_source(&self) -> String;

    fn course_service(&self) -> Arc<CourseService>;
    fn quiz_service(&self) -> Arc<QuizService>;
}

#[derive(Clone)]
pub struct AppContext {
    config: AppConfig,
    data_source: String,
    stylesheet: Option<Arc<str>>,

    course_service: Arc<CourseService>,
    quiz_service: Arc<QuizService>,
}

impl AppContext {
    #[must_use]
    pub fn new(app: &Arc<dyn UiApp>) -> Self {
        let config = app.config();
        let stylesheet = load_stylesheet(config.stylesheet());

        Self {
            config,
            data_source: app.data_source(),
            stylesheet,
            course_service: app.course_service(),
            quiz_service: app.quiz_service(),
        }
    }

    #[must_use]
    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    #[must_use]
    pub fn data_source(&self) -> &str {
        &self.data_source
    }

    /// Contents of the configured stylesheet, `None` if it could not be read.
    #[must_use]
    pub fn stylesheet(&self) -> Option<Arc<str>> {
        self.stylesheet.clone()
    }

    #[must_use]
    pub fn course_service(&self) -> Arc<CourseService> {
        Arc::clone(&self.course_service)
    }

    #[must_use]
    pub fn quiz_service(&self) -> Arc<QuizService> {
        Arc::clone(&self.quiz_service)
    }
}

/// A missing or unreadable stylesheet is not fatal: log and run unstyled.
fn load_stylesheet(path: &Path) -> Option<Arc<str>> {
    match std::fs::read_to_string(path) {
        Ok(css) => {
            tracing::debug!(path = %path.display(), bytes = css.len(), "stylesheet loaded");
            Some(Arc::from(css))
        }
        Err(err) => {
            tracing::warn!(path = %path.display(), error = %err, "stylesheet not loaded");
            None
        }
    }
}

/// Build an `AppContext` from a UI-facing app implementation.
#[must_use]
pub fn build_app_context(app: &Arc<dyn UiApp>) -> AppContext {
    AppContext::new(app)
}
