use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ConfigError {
    #[error("window title cannot be empty")]
    EmptyTitle,

    #[error("window size must be non-zero (got {width}x{height})")]
    InvalidWindowSize { width: u32, height: u32 },

    #[error("sidebar width {sidebar} must be > 0 and narrower than the window ({window})")]
    InvalidSidebarWidth { sidebar: u32, window: u32 },
}

/// Window-level settings shared by the binary and the UI.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppConfig {
    window_title: String,
    window_width: u32,
    window_height: u32,
    sidebar_width: u32,
    stylesheet: PathBuf,
}

pub const DEFAULT_WINDOW_TITLE: &str = "Mathtermind";
pub const DEFAULT_WINDOW_WIDTH: u32 = 1200;
pub const DEFAULT_WINDOW_HEIGHT: u32 = 800;
pub const DEFAULT_SIDEBAR_WIDTH: u32 = 220;
pub const DEFAULT_STYLESHEET: &str = "assets/style.css";

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            window_title: DEFAULT_WINDOW_TITLE.to_owned(),
            window_width: DEFAULT_WINDOW_WIDTH,
            window_height: DEFAULT_WINDOW_HEIGHT,
            sidebar_width: DEFAULT_SIDEBAR_WIDTH,
            stylesheet: PathBuf::from(DEFAULT_STYLESHEET),
        }
    }
}

impl AppConfig {
    /// Build a validated config.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the title is blank, a window dimension is
    /// zero, or the sidebar does not fit inside the window.
    pub fn new(
        window_title: impl Into<String>,
        window_width: u32,
        window_height: u32,
        sidebar_width: u32,
        stylesheet: impl Into<PathBuf>,
    ) -> Result<Self, ConfigError> {
        let window_title = window_title.into();
        if window_title.trim().is_empty() {
            return Err(ConfigError::EmptyTitle);
        }
        if window_width == 0 || window_height == 0 {
            return Err(ConfigError::InvalidWindowSize {
                width: window_width,
                height: window_height,
            });
        }
        if sidebar_width == 0 || sidebar_width >= window_width {
            return Err(ConfigError::InvalidSidebarWidth {
                sidebar: sidebar_width,
                window: window_width,
            });
        }

        Ok(Self {
            window_title: window_title.trim().to_owned(),
            window_width,
            window_height,
            sidebar_width,
            stylesheet: stylesheet.into(),
        })
    }

    #[must_use]
    pub fn window_title(&self) -> &str {
        &self.window_title
    }

    #[must_use]
    pub fn window_width(&self) -> u32 {
        self.window_width
    }

    #[must_use]
    pub fn window_height(&self) -> u32 {
        self.window_height
    }

    #[must_use]
    pub fn sidebar_width(&self) -> u32 {
        self.sidebar_width
    }

    /// Width left for the page area.
    #[must_use]
    pub fn content_width(&self) -> u32 {
        self.window_width - self.sidebar_width
    }

    #[must_use]
    pub fn stylesheet(&self) -> &Path {
        &self.stylesheet
    }
}
