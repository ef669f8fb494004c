use std::path::{Component, Path, PathBuf};
use std::sync::OnceLock;

use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use regex::{Captures, Regex};
use tracing::debug;

fn img_regex() -> &'static Regex {
    static IMG: OnceLock<Regex> = OnceLock::new();
    IMG.get_or_init(|| {
        Regex::new(r#"(<img[^>]+src=["'])([^"']+)(["'])"#).expect("valid img regex")
    })
}

pub fn data_url(mime: &str, bytes: &[u8]) -> String {
    format!("data:{};base64,{}", mime, BASE64.encode(bytes))
}

/// Resolves `href` relative to the directory of `base`, dropping any fragment.
pub fn resolve_href(base: &Path, href: &str) -> PathBuf {
    let href = href.split('#').next().unwrap_or(href);
    let joined = base.parent().unwrap_or(Path::new("")).join(href);

    let mut out = PathBuf::new();
    for part in joined.components() {
        match part {
            Component::ParentDir => {
                out.pop();
            }
            Component::CurDir | Component::RootDir | Component::Prefix(_) => {}
            Component::Normal(p) => out.push(p),
        }
    }
    out
}

/// Inlines chapter images as data URLs. `lookup` maps an archive path to
/// `(bytes, mime)`; sources it cannot resolve are left as they are.
pub fn process_html_content<F>(content: &str, chapter_path: &Path, mut lookup: F) -> String
where
    F: FnMut(&Path) -> Option<(Vec<u8>, String)>,
{
    img_regex()
        .replace_all(content, |caps: &Captures| {
            let src = &caps[2];
            if src.starts_with("data:") || src.contains("://") {
                return caps[0].to_string();
            }

            let path = resolve_href(chapter_path, src);
            match lookup(&path) {
                Some((bytes, mime)) => format!("{}{}{}", &caps[1], data_url(&mime, &bytes), &caps[3]),
                None => {
                    debug!(src, resolved = %path.display(), "No resource for image");
                    caps[0].to_string()
                }
            }
        })
        .into_owned()
}
