use dioxus::prelude::*;

use crate::components::{
    EpubPane, ReaderController, ReaderPane, SettingsPanel, TableOfContents, TocEntry,
};

/// What the content area needs from the session, copied out of the controller
/// so no borrow is held while rendering.
enum ContentView {
    Pdf {
        url: String,
        zoom: f64,
    },
    Epub {
        html: String,
        chapter: usize,
        chapter_count: usize,
        toc: Vec<TocEntry>,
    },
    EpubError(String),
    Text {
        text: String,
        page: u32,
        total: u32,
        words: usize,
        font_size: u32,
    },
}

#[component]
pub fn Reader() -> Element {
    let mut controller = use_context::<Signal<ReaderController>>();
    let mut show_settings = use_signal(|| false);

    let (name, kind, content) = {
        let state = controller.read();
        let Some(session) = state.session() else {
            return rsx! {};
        };
        let prefs = state.preferences();
        let content = match &session.pane {
            ReaderPane::Pdf(pane) => ContentView::Pdf {
                url: pane.blob_url.clone(),
                zoom: prefs.pdf_zoom(),
            },
            ReaderPane::Epub(EpubPane::Ready(rendition)) => ContentView::Epub {
                html: rendition.chapter_html().to_string(),
                chapter: rendition.current_chapter(),
                chapter_count: rendition.chapter_count(),
                toc: rendition.toc().to_vec(),
            },
            ReaderPane::Epub(EpubPane::Failed(message)) => ContentView::EpubError(message.clone()),
            ReaderPane::Text(pager) => ContentView::Text {
                text: pager.page_text(),
                page: pager.current_page(),
                total: pager.total_pages(),
                words: pager.word_count(),
                font_size: prefs.font_size(),
            },
        };
        (session.record.name.clone(), session.record.kind, content)
    };

    let go_prev = move |_| {
        controller.write().prev_page();
    };
    let go_next = move |_| {
        controller.write().next_page();
    };

    rsx! {
        div {
            class: "reader",
            div {
                class: "reader-header",
                button {
                    class: "icon-btn",
                    onclick: move |_| {
                        show_settings.set(false);
                        controller.write().back();
                    },
                    "←"
                }
                div { class: "book-title", "{name}" }
                button {
                    class: "icon-btn",
                    onclick: move |_| show_settings.toggle(),
                    "⚙️"
                }
            }

            if *show_settings.read() {
                SettingsPanel { kind, on_close: move |_| show_settings.set(false) }
            }

            {match content {
                ContentView::Pdf { url, zoom } => rsx! {
                    div {
                        class: "content-area pdf-frame",
                        style: "transform: scale({zoom}); transform-origin: top center;",
                        embed { class: "pdf-viewer", src: "{url}", r#type: "application/pdf" }
                    }
                },
                ContentView::Epub { html, chapter, chapter_count, toc } => rsx! {
                    div {
                        class: "content-area epub-layout",
                        if !toc.is_empty() {
                            aside {
                                class: "epub-sidebar",
                                TableOfContents {
                                    entries: toc,
                                    current_chapter: chapter,
                                    goto_chapter: move |index| {
                                        controller.write().goto_chapter(index);
                                    },
                                }
                            }
                        }
                        div {
                            class: "epub-viewer",
                            div { dangerous_inner_html: "{html}" }
                            div {
                                class: "nav-controls",
                                button { class: "btn", disabled: chapter == 0, onclick: go_prev, "Previous" }
                                span { "Chapter {chapter + 1} / {chapter_count}" }
                                button {
                                    class: "btn",
                                    disabled: chapter + 1 >= chapter_count,
                                    onclick: go_next,
                                    "Next"
                                }
                            }
                        }
                    }
                },
                ContentView::EpubError(message) => rsx! {
                    div {
                        class: "content-area",
                        div { class: "error", "Could not display this EPUB: {message}" }
                    }
                },
                ContentView::Text { text, page, total, words, font_size } => rsx! {
                    div {
                        class: "content-area",
                        div { class: "text-viewer", style: "font-size: {font_size}px", "{text}" }
                    }
                    div {
                        class: "nav-controls",
                        button { class: "btn", disabled: page <= 1, onclick: go_prev, "Previous" }
                        span { "Page {page} / {total} · {words} words" }
                        button { class: "btn", disabled: page >= total, onclick: go_next, "Next" }
                    }
                },
            }}
        }
    }
}

