use std::path::Path;
use std::sync::Arc;

use dioxus::core::NoOpMutations;
use dioxus::prelude::*;
use dioxus_router::{Routable, Router};
use mathtermind_core::config::{AppConfig, DEFAULT_SIDEBAR_WIDTH};
use mathtermind_core::time::fixed_now;
use services::{AppServices, Clock, CourseService, QuizService};
use storage::repository::Storage;

use crate::context::{UiApp, build_app_context};
use crate::views::quizzes::QuizTestHandles;
use crate::views::{CoursesView, DashboardView, QuizzesView, SettingsView};

#[derive(Clone)]
struct TestApp {
    config: AppConfig,
    course_service: Arc<CourseService>,
    quiz_service: Arc<QuizService>,
}

impl UiApp for TestApp {
    fn config(&self) -> AppConfig {
        self.config.clone()
    }

    fn data_source(&self) -> String {
        "in-memory".to_string()
    }

    fn course_service(&self) -> Arc<CourseService> {
        Arc::clone(&self.course_service)
    }

    fn quiz_service(&self) -> Arc<QuizService> {
        Arc::clone(&self.quiz_service)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ViewKind {
    Dashboard,
    Courses,
    Quizzes,
    Settings,
}

#[derive(Props, Clone)]
struct ViewHarnessProps {
    app: Arc<TestApp>,
    view: ViewKind,
    quiz_handles: Option<QuizTestHandles>,
}

impl PartialEq for ViewHarnessProps {
    fn eq(&self, _other: &Self) -> bool {
        true
    }
}

#[component]
fn ViewRouterHarness(props: ViewHarnessProps) -> Element {
    let app: Arc<dyn UiApp> = props.app.clone();
    use_context_provider(|| build_app_context(&app));
    use_context_provider(|| props.view);
    if let Some(handles) = props.quiz_handles.clone() {
        use_context_provider(|| handles);
    }
    rsx! { Router::<TestRoute> {} }
}

#[derive(Clone, Routable, PartialEq)]
#[rustfmt::skip]
enum TestRoute {
    #[route("/")]
    Root {},
}

#[component]
fn Root() -> Element {
    match use_context::<ViewKind>() {
        ViewKind::Dashboard => rsx! { DashboardView {} },
        ViewKind::Courses => rsx! { CoursesView {} },
        ViewKind::Quizzes => rsx! { QuizzesView {} },
        ViewKind::Settings => rsx! { SettingsView {} },
    }
}

pub struct ViewHarness {
    pub dom: VirtualDom,
    pub services: AppServices,
    pub quiz_handles: Option<QuizTestHandles>,
}

impl ViewHarness {
    pub fn rebuild(&mut self) {
        self.dom.rebuild_in_place();
        drive_dom(&mut self.dom);
    }

    pub async fn drive_async(&mut self) {
        for _ in 0..4 {
            let _ = tokio::time::timeout(
                std::time::Duration::from_millis(50),
                self.dom.wait_for_work(),
            )
            .await;
            self.dom.render_immediate(&mut NoOpMutations);
            self.dom.process_events();
        }
    }

    /// Fire the quizzes page toggle for `quiz_id`, as a button click would.
    pub fn toggle_quiz(&self, quiz_id: u64) {
        let handles = self.quiz_handles.as_ref().expect("quizzes view harness");
        let toggle = handles.toggle();
        self.dom.in_runtime(|| toggle.call(quiz_id));
    }

    pub fn render(&self) -> String {
        dioxus_ssr::render(&self.dom)
    }
}

pub fn drive_dom(dom: &mut VirtualDom) {
    dom.process_events();
    dom.render_immediate(&mut NoOpMutations);
    dom.process_events();
}

fn bundled_stylesheet() -> std::path::PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("assets/style.css")
}

pub fn setup_view_harness(view: ViewKind) -> ViewHarness {
    let config = AppConfig::new("Mathtermind", 1200, 800, DEFAULT_SIDEBAR_WIDTH, bundled_stylesheet())
        .expect("test config");
    setup_view_harness_with_storage(view, Storage::in_memory(), config)
}

pub fn setup_view_harness_with_storage(
    view: ViewKind,
    storage: Storage,
    config: AppConfig,
) -> ViewHarness {
    let services = AppServices::from_storage(storage, Clock::fixed(fixed_now()));
    let app = Arc::new(TestApp {
        config,
        course_service: services.courses(),
        quiz_service: services.quizzes(),
    });

    let quiz_handles = (view == ViewKind::Quizzes).then(QuizTestHandles::default);
    let dom = VirtualDom::new_with_props(
        ViewRouterHarness,
        ViewHarnessProps {
            app,
            view,
            quiz_handles: quiz_handles.clone(),
        },
    );

    ViewHarness {
        dom,
        services,
        quiz_handles,
    }
}
