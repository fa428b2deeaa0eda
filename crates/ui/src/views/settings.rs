use dioxus::prelude::*;

use crate::context::AppContext;

/// Read-only view of the configuration the app was launched with.
#[component]
pub fn SettingsView() -> Element {
    let ctx = use_context::<AppContext>();
    let config = ctx.config();
    let stylesheet = config.stylesheet().display().to_string();
    let stylesheet_status = if ctx.stylesheet().is_some() {
        "loaded"
    } else {
        "not found, using default styles"
    };

    rsx! {
        div { class: "page",
            h2 { "Settings" }
            dl { class: "settings",
                dt { "Window title" }
                dd { "{config.window_title()}" }
                dt { "Window size" }
                dd { "{config.window_width()} x {config.window_height()}" }
                dt { "Sidebar width" }
                dd { "{config.sidebar_width()}px" }
                dt { "Stylesheet" }
                dd { "{stylesheet} ({stylesheet_status})" }
                dt { "Database" }
                dd { "{ctx.data_source()}" }
            }
        }
    }
}
