use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use dioxus::LaunchBuilder;
use dioxus::desktop::{Config as DesktopConfig, LogicalSize, WindowBuilder};
use mathtermind_core::config::{
    AppConfig, DEFAULT_SIDEBAR_WIDTH, DEFAULT_STYLESHEET, DEFAULT_WINDOW_HEIGHT,
    DEFAULT_WINDOW_TITLE, DEFAULT_WINDOW_WIDTH,
};
use services::{AppServices, AppServicesError, Clock, CourseService, QuizService};
use tracing_subscriber::EnvFilter;
use ui::{App, UiApp, build_app_context};

const DEFAULT_DB_URL: &str = "sqlite://mathtermind.sqlite3";

#[derive(Debug, PartialEq, Eq)]
enum ArgsError {
    MissingValue { flag: &'static str },
    UnknownArg(String),
    UnknownCommand(String),
    InvalidDbUrl { raw: String },
    InvalidSize { flag: &'static str, raw: String },
}

impl fmt::Display for ArgsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgsError::MissingValue { flag } => write!(f, "{flag} requires a value"),
            ArgsError::UnknownArg(arg) => write!(f, "unknown argument: {arg}"),
            ArgsError::UnknownCommand(cmd) => write!(f, "unknown subcommand: {cmd}"),
            ArgsError::InvalidDbUrl { raw } => write!(f, "invalid --db value: {raw}"),
            ArgsError::InvalidSize { flag, raw } => write!(f, "invalid {flag} value: {raw}"),
        }
    }
}

impl std::error::Error for ArgsError {}

fn require_value(
    args: &mut impl Iterator<Item = String>,
    flag: &'static str,
) -> Result<String, ArgsError> {
    args.next().ok_or(ArgsError::MissingValue { flag })
}

fn parse_size(value: String, flag: &'static str) -> Result<u32, ArgsError> {
    match value.parse::<u32>() {
        Ok(size) if size > 0 => Ok(size),
        _ => Err(ArgsError::InvalidSize { flag, raw: value }),
    }
}

struct DesktopApp {
    config: AppConfig,
    db_url: String,
    course_service: Arc<CourseService>,
    quiz_service: Arc<QuizService>,
}

impl UiApp for DesktopApp {
    fn config(&self) -> AppConfig {
        self.config.clone()
    }

    fn data_source(&self) -> String {
        self.db_url.clone()
    }

    fn course_service(&self) -> Arc<CourseService> {
        Arc::clone(&self.course_service)
    }

    fn quiz_service(&self) -> Arc<QuizService> {
        Arc::clone(&self.quiz_service)
    }
}

#[derive(Debug, PartialEq, Eq)]
struct Args {
    db_url: String,
    stylesheet: PathBuf,
    width: u32,
    height: u32,
}

fn print_usage() {
    eprintln!("Usage:");
    eprintln!("  app ui   [--db <sqlite_url>] [--stylesheet <path>] [--width <px>] [--height <px>]");
    eprintln!("  app seed [--db <sqlite_url>]");
    eprintln!();
    eprintln!("Defaults:");
    eprintln!("  --db {DEFAULT_DB_URL}");
    eprintln!("  --stylesheet {DEFAULT_STYLESHEET}");
    eprintln!("  --width {DEFAULT_WINDOW_WIDTH} --height {DEFAULT_WINDOW_HEIGHT}");
    eprintln!();
    eprintln!("Environment:");
    eprintln!("  MATHTERMIND_DB_URL, MATHTERMIND_STYLESHEET, RUST_LOG");
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Command {
    Ui,
    Seed,
}

/// What the first argument asked for.
#[derive(Debug, PartialEq, Eq)]
enum Invocation {
    Help,
    Run(Command, Vec<String>),
}

/// Split off the subcommand. Flags without a subcommand launch the UI.
fn split_command(mut argv: Vec<String>) -> Result<Invocation, ArgsError> {
    let command = match argv.first().map(String::as_str) {
        Some("--help" | "-h") => return Ok(Invocation::Help),
        None => return Ok(Invocation::Run(Command::Ui, argv)),
        Some(flag) if flag.starts_with('-') => return Ok(Invocation::Run(Command::Ui, argv)),
        Some("ui") => Command::Ui,
        Some("seed") => Command::Seed,
        Some(other) => return Err(ArgsError::UnknownCommand(other.to_owned())),
    };
    argv.remove(0);
    Ok(Invocation::Run(command, argv))
}

impl Args {
    fn from_env() -> Self {
        Self {
            db_url: std::env::var("MATHTERMIND_DB_URL")
                .unwrap_or_else(|_| DEFAULT_DB_URL.to_owned()),
            stylesheet: std::env::var_os("MATHTERMIND_STYLESHEET")
                .map_or_else(|| PathBuf::from(DEFAULT_STYLESHEET), PathBuf::from),
            width: DEFAULT_WINDOW_WIDTH,
            height: DEFAULT_WINDOW_HEIGHT,
        }
    }

    /// Apply command-line flags on top of `self`. `Ok(None)` means help was printed.
    fn apply_flags(
        mut self,
        args: &mut impl Iterator<Item = String>,
    ) -> Result<Option<Self>, ArgsError> {
        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--db" => self.db_url = require_value(args, "--db")?,
                "--stylesheet" => {
                    self.stylesheet = PathBuf::from(require_value(args, "--stylesheet")?);
                }
                "--width" => self.width = parse_size(require_value(args, "--width")?, "--width")?,
                "--height" => {
                    self.height = parse_size(require_value(args, "--height")?, "--height")?;
                }
                "--help" | "-h" => {
                    print_usage();
                    return Ok(None);
                }
                _ => return Err(ArgsError::UnknownArg(arg)),
            }
        }

        Ok(Some(self))
    }

    fn config(&self) -> Result<AppConfig, mathtermind_core::config::ConfigError> {
        AppConfig::new(
            DEFAULT_WINDOW_TITLE,
            self.width,
            self.height,
            DEFAULT_SIDEBAR_WIDTH,
            self.stylesheet.clone(),
        )
    }
}

/// A resolved database location: the URL handed to sqlx, and the backing
/// file when there is one.
#[derive(Debug, PartialEq, Eq)]
struct DbTarget {
    url: String,
    file: Option<PathBuf>,
}

impl DbTarget {
    /// Accepts `sqlite://path`, `sqlite:path` or a bare path. Relative paths
    /// are joined onto `cwd`; in-memory URLs pass through untouched.
    fn resolve(raw: &str, cwd: &Path) -> Result<Self, ArgsError> {
        let raw = raw.trim();
        let invalid = || ArgsError::InvalidDbUrl {
            raw: raw.to_owned(),
        };
        if raw.is_empty() {
            return Err(invalid());
        }
        if raw == "sqlite::memory:" || raw.contains("mode=memory") {
            return Ok(Self {
                url: raw.to_owned(),
                file: None,
            });
        }

        let rest = raw
            .strip_prefix("sqlite://")
            .or_else(|| raw.strip_prefix("sqlite:"))
            .unwrap_or(raw);
        let (path, query) = match rest.split_once('?') {
            Some((path, query)) => (path, Some(query)),
            None => (rest, None),
        };
        if path.is_empty() {
            return Err(invalid());
        }

        let file = cwd.join(path);
        let url = match query {
            Some(query) => format!("sqlite://{}?{query}", file.display()),
            None => format!("sqlite://{}", file.display()),
        };
        Ok(Self {
            url,
            file: Some(file),
        })
    }

    /// Create the parent directory and an empty file so sqlx can open it.
    fn ensure_file(&self) -> std::io::Result<()> {
        let Some(file) = &self.file else {
            return Ok(());
        };
        if let Some(parent) = file.parent() {
            std::fs::create_dir_all(parent)?;
        }
        if !file.exists() {
            std::fs::File::create(file)?;
            tracing::info!(path = %file.display(), "created database file");
        }
        Ok(())
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}

fn launch_ui(config: AppConfig, db_url: String, services: &AppServices) {
    tracing::info!(db = %db_url, "launching ui");
    let window = WindowBuilder::new()
        .with_title(config.window_title())
        .with_inner_size(LogicalSize::new(
            f64::from(config.window_width()),
            f64::from(config.window_height()),
        ))
        .with_always_on_top(false);

    let app: Arc<dyn UiApp> = Arc::new(DesktopApp {
        config,
        db_url,
        course_service: services.courses(),
        quiz_service: services.quizzes(),
    });
    let context = build_app_context(&app);

    LaunchBuilder::desktop()
        .with_cfg(DesktopConfig::new().with_window(window))
        .with_context(context)
        .launch(App);
}

async fn seed(db_url: &str, services: &AppServices) -> Result<(), AppServicesError> {
    if services.seed_sample_content().await? {
        eprintln!("seed: sample courses and quizzes added to {db_url}");
    } else {
        eprintln!("seed: {db_url} already has content, nothing to do");
    }
    services.close().await;
    Ok(())
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let (command, rest) = match split_command(std::env::args().skip(1).collect()) {
        Ok(Invocation::Help) => {
            print_usage();
            return Ok(());
        }
        Ok(Invocation::Run(command, rest)) => (command, rest),
        Err(err) => {
            print_usage();
            return Err(err.into());
        }
    };

    let Some(args) = Args::from_env()
        .apply_flags(&mut rest.into_iter())
        .inspect_err(|_| print_usage())?
    else {
        return Ok(());
    };
    let config = args.config()?;

    let db = DbTarget::resolve(&args.db_url, &std::env::current_dir()?)?;
    db.ensure_file()?;
    let services = AppServices::new_sqlite(&db.url, Clock::system()).await?;

    match command {
        Command::Ui => launch_ui(config, db.url, &services),
        Command::Seed => seed(&db.url, &services).await?,
    }
    Ok(())
}

#[tokio::main]
async fn main() {
    init_tracing();
    if let Err(err) = run().await {
        eprintln!("{err}");
        std::process::exit(2);
    }
}
