use std::collections::HashSet;

use dioxus::prelude::*;

use crate::components::TocEntry;

#[component]
fn TocItem(
    entry: TocEntry,
    path: String,
    depth: usize,
    current_chapter: usize,
    collapsed_nodes: Signal<HashSet<String>>,
    goto_chapter: EventHandler<usize>,
    toggle_collapse: EventHandler<String>,
) -> Element {
    let is_collapsed = collapsed_nodes.read().contains(&path);
    let has_children = !entry.children.is_empty();
    let chapter_index = entry.chapter;

    let class_name = match chapter_index {
        Some(ci) if ci == current_chapter => "toc-label active",
        Some(_) => "toc-label",
        None => "toc-label unresolved",
    };
    let node_path = path.clone();

    rsx! {
        div {
            class: "toc-item",
            div {
                class: "toc-row",
                style: "padding-left: {depth * 12}px",
                if has_children {
                    button {
                        class: "toc-toggle",
                        onclick: move |_| toggle_collapse.call(node_path.clone()),
                        span {
                            style: if is_collapsed { "" } else { "display: inline-block; transform: rotate(90deg)" },
                            "▶"
                        }
                    }
                }
                div {
                    class: "{class_name}",
                    onclick: move |_| {
                        if let Some(ci) = chapter_index {
                            goto_chapter.call(ci);
                        }
                    },
                    "{entry.label}"
                }
            }

            if !is_collapsed && has_children {
                div {
                    class: "toc-children",
                    for (idx, child) in entry.children.iter().enumerate() {
                        TocItem {
                            key: "{path}/{idx}",
                            entry: child.clone(),
                            path: format!("{path}/{idx}"),
                            depth: depth + 1,
                            current_chapter,
                            collapsed_nodes,
                            goto_chapter,
                            toggle_collapse,
                        }
                    }
                }
            }
        }
    }
}

#[component]
pub fn TableOfContents(
    entries: Vec<TocEntry>,
    current_chapter: usize,
    goto_chapter: EventHandler<usize>,
) -> Element {
    let mut collapsed_nodes = use_signal(HashSet::<String>::new);

    let toggle_collapse = move |node: String| {
        let mut nodes = collapsed_nodes.write();
        if !nodes.remove(&node) {
            nodes.insert(node);
        }
    };

    rsx! {
        nav {
            class: "toc",
            for (idx, entry) in entries.iter().enumerate() {
                TocItem {
                    key: "{idx}",
                    entry: entry.clone(),
                    path: idx.to_string(),
                    depth: 0,
                    current_chapter,
                    collapsed_nodes,
                    goto_chapter,
                    toggle_collapse,
                }
            }
        }
    }
}
