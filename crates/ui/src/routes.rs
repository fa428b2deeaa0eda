use dioxus::prelude::*;
use dioxus_router::{Link, Outlet, Routable};

use crate::context::AppContext;
use crate::views::{CoursesView, DashboardView, QuizzesView, SettingsView};

/// Every page the sidebar can show. Adding a page means adding a variant here.
#[derive(Clone, Routable, PartialEq, Debug)]
#[rustfmt::skip]
pub enum Route {
    #[layout(Layout)]
        #[route("/", DashboardView)] Dashboard {},
        #[route("/courses", CoursesView)] Courses {},
        #[route("/quizzes", QuizzesView)] Quizzes {},
        #[route("/settings", SettingsView)] Settings {},
}

impl Route {
    /// Sidebar order.
    #[must_use]
    pub fn pages() -> [Route; 4] {
        [
            Route::Dashboard {},
            Route::Courses {},
            Route::Quizzes {},
            Route::Settings {},
        ]
    }

    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            Route::Dashboard {} => "Dashboard",
            Route::Courses {} => "Courses",
            Route::Quizzes {} => "Quizzes",
            Route::Settings {} => "Settings",
        }
    }
}

#[component]
fn Layout() -> Element {
    rsx! {
        div { class: "app",
            Sidebar {}
            main { class: "content",
                Outlet::<Route> {}
            }
        }
    }
}

#[component]
fn Sidebar() -> Element {
    let ctx = use_context::<AppContext>();
    let width = ctx.config().sidebar_width();

    rsx! {
        nav { class: "sidebar", style: "width: {width}px;",
            h1 { "{ctx.config().window_title()}" }
            ul {
                for page in Route::pages() {
                    li { key: "{page.label()}",
                        Link { to: page.clone(), "{page.label()}" }
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pages_round_trip_through_paths() {
        for page in Route::pages() {
            let path = page.to_string();
            let parsed: Route = path.parse().unwrap_or_else(|_| panic!("parse {path}"));
            assert_eq!(parsed, page);
        }
    }

    #[test]
    fn unknown_path_does_not_parse() {
        assert!("/nowhere".parse::<Route>().is_err());
    }

    #[test]
    fn labels_are_distinct() {
        let labels: std::collections::HashSet<_> =
            Route::pages().iter().map(Route::label).collect();
        assert_eq!(labels.len(), Route::pages().len());
    }
}
