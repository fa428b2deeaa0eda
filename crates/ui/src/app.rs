use dioxus::prelude::*;
use dioxus_router::Router;

use crate::context::AppContext;
use crate::routes::Route;

/// Root component. Expects an `AppContext` in the root context.
#[component]
pub fn App() -> Element {
    let ctx = use_context::<AppContext>();
    let title = ctx.config().window_title().to_owned();
    let stylesheet = ctx.stylesheet();

    rsx! {
        if let Some(css) = stylesheet {
            document::Style { "{css}" }
        }

        document::Title { "{title}" }

        div { class: "app-root",
            ErrorBoundary {
                handle_error: |errors: ErrorContext| rsx! {
                    div { class: "fatal",
                        h1 { "Something went wrong" }
                        pre { "{errors:?}" }
                    }
                },
                Router::<Route> {}
            }
        }
    }
}
