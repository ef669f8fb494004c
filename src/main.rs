#![allow(non_snake_case)]
use dioxus::desktop::{Config, WindowBuilder};
use dioxus::document::{Stylesheet, Title};
use dioxus::prelude::*;

use shelf_reader::components::{Header, Library, Reader, ReaderController, View};

fn main() {
    if let Err(e) = shelf_reader::logging::init() {
        eprintln!("Failed to initialize logging: {e}");
    }

    dioxus::LaunchBuilder::desktop()
        .with_cfg(Config::new().with_window(
            WindowBuilder::new()
                .with_resizable(true)
                .with_decorations(false)
                .with_title("Shelf Reader"),
        ))
        .launch(App)
}

#[component]
fn App() -> Element {
    let controller = use_context_provider(|| Signal::new(ReaderController::open_default()));

    let (dark, reading) = {
        let state = controller.read();
        (
            state.preferences().theme().is_dark(),
            matches!(state.view(), View::Reading(_)),
        )
    };

    rsx! {
        Title { "Shelf Reader" }
        Stylesheet { href: asset!("/assets/reader.css") }
        div {
            class: if dark { "app dark" } else { "app" },
            Header {}
            main {
                class: "content",
                if reading {
                    Reader {}
                } else {
                    Library {}
                }
            }
        }
    }
}
