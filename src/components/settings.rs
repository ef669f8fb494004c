use dioxus::prelude::*;

use crate::components::preferences::{MAX_FONT_SIZE, MIN_FONT_SIZE};
use crate::components::{BookType, ReaderController};

/// Overlay with the settings relevant to the open book's type.
#[component]
pub fn SettingsPanel(kind: BookType, on_close: EventHandler<()>) -> Element {
    let mut controller = use_context::<Signal<ReaderController>>();

    let (font_size, zoom_percent, dark) = {
        let state = controller.read();
        let prefs = state.preferences();
        (prefs.font_size(), prefs.zoom_percent(), prefs.theme().is_dark())
    };

    rsx! {
        div {
            class: "card settings-overlay",
            onclick: move |evt| evt.stop_propagation(),
            div {
                class: "settings-header",
                h3 { "Settings" }
                button { onclick: move |_| on_close.call(()), "×" }
            }

            if kind == BookType::Txt {
                label { r#for: "font-size", "Font size ({font_size}px)" }
                input {
                    id: "font-size",
                    r#type: "range",
                    min: "{MIN_FONT_SIZE}",
                    max: "{MAX_FONT_SIZE}",
                    value: "{font_size}",
                    oninput: move |evt| {
                        if let Ok(size) = evt.value().parse::<u32>() {
                            controller.write().set_font_size(size);
                        }
                    },
                }
            }

            if kind == BookType::Pdf {
                div {
                    class: "zoom-controls",
                    button {
                        class: "btn",
                        onclick: move |_| {
                            controller.write().zoom_out();
                        },
                        "-"
                    }
                    button {
                        class: "btn",
                        onclick: move |_| {
                            controller.write().zoom_in();
                        },
                        "+"
                    }
                }
                div { class: "zoom-level", "{zoom_percent}%" }
            }

            button {
                class: "btn btn-primary",
                onclick: move |_| {
                    controller.write().toggle_theme();
                },
                if dark { "Light mode" } else { "Dark mode" }
            }
        }
    }
}
