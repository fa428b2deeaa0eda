use dioxus::prelude::*;

use crate::context::AppContext;
use crate::views::{ViewError, ViewState, view_state_from_resource};
use crate::vm::{CourseCardVm, map_course_cards};

const COURSE_LIMIT: u32 = 100;

#[component]
pub fn CoursesView() -> Element {
    let ctx = use_context::<AppContext>();
    let courses = ctx.course_service();

    let resource = use_resource(move || {
        let courses = courses.clone();
        async move {
            let items = courses
                .list_courses_with_topics(COURSE_LIMIT)
                .await
                .map_err(|_| ViewError::Unknown)?;
            Ok(map_course_cards(&items))
        }
    });

    let state = view_state_from_resource(resource);

    rsx! {
        div { class: "page",
            h2 { "Courses" }

            match state {
                ViewState::Idle => rsx! {
                    p { "Idle" }
                },
                ViewState::Loading => rsx! {
                    p { "Loading..." }
                },
                ViewState::Ready(cards) => rsx! {
                    if cards.is_empty() {
                        p { "No courses yet." }
                    } else {
                        ul { class: "course-list",
                            for card in cards {
                                CourseCard { key: "{card.id}", card }
                            }
                        }
                    }
                },
                ViewState::Error(err) => rsx! {
                    p { "{err.message()}" }
                },
            }
        }
    }
}

#[component]
fn CourseCard(card: CourseCardVm) -> Element {
    let summary = card.topic_summary();
    rsx! {
        li { class: "course-card",
            h3 { "{card.name}" }
            if let Some(description) = card.description.as_deref() {
                p { class: "course-description", "{description}" }
            }
            p { class: "course-meta", "{summary} | added {card.created_at_str}" }
            if !card.topics.is_empty() {
                ul { class: "topic-list",
                    for topic in card.topics.iter() {
                        li { "{topic}" }
                    }
                }
            }
        }
    }
}
