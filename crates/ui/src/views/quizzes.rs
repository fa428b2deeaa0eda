use dioxus::prelude::*;
use mathtermind_core::gauge::ProgressIndicator;
use mathtermind_core::model::QuizId;

use crate::components::ProgressRing;
use crate::context::AppContext;
use crate::views::{ViewError, ViewState, view_state_from_resource};
use crate::vm::{QuizItemVm, map_quiz_items};

const QUIZ_LIMIT: u32 = 200;

#[component]
pub fn QuizzesView() -> Element {
    let ctx = use_context::<AppContext>();
    let quizzes = ctx.quiz_service();
    let toggler = ctx.quiz_service();
    let mut gauge = use_signal(ProgressIndicator::new);
    let mut toggle_failed = use_signal(|| false);

    let mut resource = use_resource(move || {
        let quizzes = quizzes.clone();
        async move {
            let items = quizzes
                .list_quizzes(QUIZ_LIMIT)
                .await
                .map_err(|_| ViewError::Unknown)?;
            let percent = quizzes
                .completion_percent()
                .await
                .map_err(|_| ViewError::Unknown)?;
            gauge.write().set_value(i64::from(percent.get()));
            Ok(map_quiz_items(&items))
        }
    });

    let on_toggle = use_callback(move |id: u64| {
        let toggler = toggler.clone();
        spawn(async move {
            match toggler.toggle_completed(QuizId::new(id)).await {
                Ok(completed) => {
                    tracing::debug!(quiz_id = id, completed, "quiz toggled");
                    toggle_failed.set(false);
                    resource.restart();
                }
                Err(err) => {
                    tracing::warn!(quiz_id = id, error = %err, "quiz toggle failed");
                    toggle_failed.set(true);
                }
            }
        });
    });

    #[cfg(test)]
    {
        if let Some(handles) = try_consume_context::<QuizTestHandles>() {
            handles.register(on_toggle);
        }
    }

    let state = view_state_from_resource(resource);

    rsx! {
        div { class: "page",
            h2 { "Quizzes" }
            ProgressRing { indicator: gauge, size: 120 }
            if toggle_failed() {
                p { class: "error", "{ViewError::Unknown.message()}" }
            }

            match state {
                ViewState::Idle => rsx! {
                    p { "Idle" }
                },
                ViewState::Loading => rsx! {
                    p { "Loading..." }
                },
                ViewState::Ready(items) => rsx! {
                    if items.is_empty() {
                        p { "No quizzes yet." }
                    } else {
                        ul { class: "quiz-list",
                            for item in items {
                                QuizRow {
                                    key: "{item.id}",
                                    item,
                                    on_toggle,
                                }
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
fn QuizRow(item: QuizItemVm, on_toggle: Callback<u64>) -> Element {
    let id = item.id;
    let row_class = if item.completed { "quiz done" } else { "quiz" };
    let label = item.toggle_label();

    rsx! {
        li { class: "{row_class}",
            h3 { "{item.title}" }
            div { class: "quiz-question", dangerous_inner_html: "{item.question_html}" }
            if let Some(answer) = item.answer.as_deref() {
                details { class: "quiz-answer",
                    summary { "Answer" }
                    p { "{answer}" }
                }
            }
            button {
                class: "quiz-toggle",
                onclick: move |_| on_toggle.call(id),
                "{label}"
            }
        }
    }
}

/// Lets tests fire the toggle without synthesizing DOM events.
#[cfg(test)]
#[derive(Clone, Default)]
pub(crate) struct QuizTestHandles {
    toggle: std::rc::Rc<std::cell::RefCell<Option<Callback<u64>>>>,
}

#[cfg(test)]
impl QuizTestHandles {
    fn register(&self, toggle: Callback<u64>) {
        *self.toggle.borrow_mut() = Some(toggle);
    }

    pub(crate) fn toggle(&self) -> Callback<u64> {
        (*self.toggle.borrow()).expect("quiz toggle registered")
    }
}
