use dioxus::prelude::*;
use rfd::{AsyncFileDialog, AsyncMessageDialog, MessageButtons, MessageLevel};
use tracing::{error, info, warn};

use crate::components::{BookRecord, BookType, ReaderController};
use crate::error::ReaderError;

/// Blocking notice, the desktop stand-in for `alert()`.
pub(crate) fn show_notice(title: &'static str, description: String) {
    spawn(async move {
        AsyncMessageDialog::new()
            .set_level(MessageLevel::Warning)
            .set_title(title)
            .set_description(description)
            .set_buttons(MessageButtons::Ok)
            .show()
            .await;
    });
}

#[component]
fn BookRow(book: BookRecord) -> Element {
    let mut controller = use_context::<Signal<ReaderController>>();
    let id = book.id;
    let added = book.date_added.format("%Y-%m-%d");
    let kind = book.kind.extension().to_uppercase();

    rsx! {
        div {
            class: "card book-row",
            onclick: move |_| {
                let result = controller.write().open(id);
                if let Err(e) = result {
                    error!(id = %id, "Failed to open book: {e}");
                    show_notice("Cannot open book", e.to_string());
                }
            },
            div {
                class: "book-row-main",
                span { "📚" }
                span { class: "book-title", title: "{book.name}", "{book.name}" }
            }
            div {
                class: "book-row-meta",
                span { class: "book-date", "{added}" }
                span { class: "book-type", "{kind}" }
            }
        }
    }
}

#[component]
pub fn Library() -> Element {
    let mut controller = use_context::<Signal<ReaderController>>();
    let mut uploading = use_signal(|| false);

    let (books, dark, persistent) = {
        let state = controller.read();
        (
            state.books().to_vec(),
            state.preferences().theme().is_dark(),
            state.store().is_persistent(),
        )
    };

    let extensions: Vec<&str> = BookType::ALL.iter().map(|k| k.extension()).collect();

    let pick_file = move |_| {
        if *uploading.read() {
            return;
        }
        uploading.set(true);
        let extensions = extensions.clone();
        spawn(async move {
            if let Some(handle) = AsyncFileDialog::new()
                .add_filter("Books", extensions.as_slice())
                .pick_file()
                .await
            {
                let name = handle.file_name();
                if let Err(e) = BookType::from_file_name(&name) {
                    warn!(name = %name, "Rejected upload");
                    show_notice("Unsupported format", format!("{e}"));
                    uploading.set(false);
                    return;
                }
                match async_std::fs::read(handle.path()).await {
                    Ok(bytes) => {
                        let result = controller.write().upload(&name, bytes);
                        match result {
                            Ok(id) => info!(id = %id, name = %name, "Uploaded book"),
                            Err(ReaderError::UnsupportedFormat(ext)) => {
                                warn!(name = %name, "Rejected upload");
                                show_notice(
                                    "Unsupported format",
                                    format!("`{ext}` is not supported. Use PDF, EPUB or TXT."),
                                );
                            }
                            Err(e) => {
                                error!(name = %name, "Upload failed: {e}");
                                show_notice("Upload failed", e.to_string());
                            }
                        }
                    }
                    Err(e) => {
                        error!(name = %name, "Failed to read file: {e}");
                        show_notice("Upload failed", e.to_string());
                    }
                }
            }
            uploading.set(false);
        });
    };

    rsx! {
        div {
            class: "library",
            div {
                class: "library-header",
                h1 { "My Library" }
                button {
                    class: "theme-toggle",
                    onclick: move |_| {
                        controller.write().toggle_theme();
                    },
                    if dark { "☀️" } else { "🌙" }
                }
            }

            div {
                class: "btn-outline upload-zone",
                onclick: pick_file,
                div { "📚" }
                p { class: "upload-title", "Click to add a book" }
                p { class: "upload-hint", "Supports PDF, EPUB and TXT" }
            }

            if !persistent {
                p { class: "notice", "Storage is unavailable; books are kept for this session only." }
            }

            div {
                class: "book-list",
                if !books.is_empty() {
                    h2 { "My Books ({books.len()})" }
                }
                for book in books {
                    BookRow { key: "{book.id.0}", book: book.clone() }
                }
            }
        }
    }
}
