use dioxus::desktop::window;
use dioxus::prelude::*;

use crate::components::ReaderController;

/// Frameless window title bar: drag to move, double-click to maximize.
#[component]
pub fn Header() -> Element {
    let controller = use_context::<Signal<ReaderController>>();
    let mut maximized = use_signal(|| window().is_maximized());
    let mut mouse_down_pos = use_signal(|| None::<(f64, f64)>);

    let title = controller
        .read()
        .session()
        .map(|s| s.record.name.clone())
        .unwrap_or_else(|| "Shelf Reader".to_string());

    let mut toggle_maximized = move || {
        let will_maximize = !window().is_maximized();
        window().set_maximized(will_maximize);
        maximized.set(will_maximize);
    };

    rsx! {
        header {
            class: "title-bar",
            div {
                class: "title-bar-drag",
                onmousedown: move |evt| {
                    let coords = evt.client_coordinates();
                    mouse_down_pos.set(Some((coords.x, coords.y)));
                },
                onmousemove: move |evt| {
                    if let Some((start_x, start_y)) = *mouse_down_pos.read() {
                        let coords = evt.client_coordinates();
                        if (coords.x - start_x).abs() > 5.0 || (coords.y - start_y).abs() > 5.0 {
                            window().drag();
                        }
                    }
                },
                onmouseup: move |_| mouse_down_pos.set(None),
                ondoubleclick: move |evt| {
                    evt.stop_propagation();
                    toggle_maximized();
                },
                span { class: "title-bar-text", "{title}" }
            }

            div {
                class: "window-controls",
                button {
                    class: "window-btn minimize",
                    onmousedown: |evt| evt.stop_propagation(),
                    onclick: move |_| window().set_minimized(true),
                    "─"
                }
                button {
                    class: "window-btn maximize",
                    onmousedown: |evt| evt.stop_propagation(),
                    onclick: move |_| toggle_maximized(),
                    if *maximized.read() { "□" } else { "∧" }
                }
                button {
                    class: "window-btn close",
                    onmousedown: |evt| evt.stop_propagation(),
                    onclick: move |_| window().close(),
                    "✕"
                }
            }
        }
    }
}
