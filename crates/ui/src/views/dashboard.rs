use dioxus::prelude::*;
use mathtermind_core::gauge::ProgressIndicator;

use crate::components::ProgressRing;
use crate::context::AppContext;
use crate::views::{ViewError, ViewState, view_state_from_resource};

#[derive(Clone, Debug, PartialEq, Eq)]
struct DashboardData {
    courses: u64,
    quizzes_total: u64,
    quizzes_completed: u64,
}

#[component]
pub fn DashboardView() -> Element {
    let ctx = use_context::<AppContext>();
    let courses = ctx.course_service();
    let quizzes = ctx.quiz_service();
    let mut gauge = use_signal(ProgressIndicator::new);

    let resource = use_resource(move || {
        let courses = courses.clone();
        let quizzes = quizzes.clone();
        async move {
            let percent = quizzes.completion_percent().await.map_err(|err| {
                tracing::warn!(error = %err, "completion percent unavailable");
                ViewError::Unknown
            })?;
            let counts = quizzes.counts().await.map_err(|_| ViewError::Unknown)?;
            let course_count = courses.count_courses().await.map_err(|_| ViewError::Unknown)?;
            gauge.write().set_value(i64::from(percent.get()));
            Ok(DashboardData {
                courses: course_count,
                quizzes_total: counts.total,
                quizzes_completed: counts.completed,
            })
        }
    });

    let state = view_state_from_resource(resource);

    rsx! {
        div { class: "page dashboard",
            h2 { "Dashboard" }
            ProgressRing { indicator: gauge, size: 180 }

            match state {
                ViewState::Idle => rsx! {
                    p { "Idle" }
                },
                ViewState::Loading => rsx! {
                    p { "Loading..." }
                },
                ViewState::Ready(data) => rsx! {
                    ul { class: "stats",
                        li { "Courses: {data.courses}" }
                        li { "Quizzes completed: {data.quizzes_completed} of {data.quizzes_total}" }
                    }
                },
                ViewState::Error(err) => rsx! {
                    p { "{err.message()}" }
                },
            }
        }
    }
}
