//! Fixed word-count pagination for plain-text books.

pub const WORDS_PER_PAGE: usize = 250;

#[derive(Debug, Clone, PartialEq)]
pub struct TextPager {
    words: Vec<String>,
    current_page: u32,
    total_pages: u32,
}

impl TextPager {
    /// `start_page` is clamped into the document, so a stale position still opens.
    pub fn new(content: &str, start_page: u32) -> Self {
        let words: Vec<String> = content.split_whitespace().map(str::to_string).collect();
        let total_pages = words.len().div_ceil(WORDS_PER_PAGE).max(1) as u32;
        Self {
            words,
            current_page: start_page.clamp(1, total_pages),
            total_pages,
        }
    }

    pub fn current_page(&self) -> u32 {
        self.current_page
    }

    pub fn total_pages(&self) -> u32 {
        self.total_pages
    }

    pub fn word_count(&self) -> usize {
        self.words.len()
    }

    pub fn has_next(&self) -> bool {
        self.current_page < self.total_pages
    }

    pub fn has_prev(&self) -> bool {
        self.current_page > 1
    }

    pub fn next(&mut self) -> bool {
        if !self.has_next() {
            return false;
        }
        self.current_page += 1;
        true
    }

    pub fn prev(&mut self) -> bool {
        if !self.has_prev() {
            return false;
        }
        self.current_page -= 1;
        true
    }

    pub fn page_text(&self) -> String {
        let start = (self.current_page as usize - 1) * WORDS_PER_PAGE;
        let end = (start + WORDS_PER_PAGE).min(self.words.len());
        self.words.get(start..end).map(|w| w.join(" ")).unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn words(n: usize) -> String {
        (0..n).map(|i| format!("w{i}")).collect::<Vec<_>>().join(" ")
    }

    #[test]
    fn total_pages_is_ceiling_of_word_count() {
        for (count, pages) in [(1, 1), (249, 1), (250, 1), (251, 2), (500, 2), (501, 3)] {
            let pager = TextPager::new(&words(count), 1);
            assert_eq!(pager.word_count(), count);
            assert_eq!(pager.total_pages(), pages, "{count} words");
        }
    }

    #[test]
    fn empty_text_still_has_one_page() {
        let pager = TextPager::new("  \n ", 3);
        assert_eq!(pager.word_count(), 0);
        assert_eq!(pager.total_pages(), 1);
        assert_eq!(pager.current_page(), 1);
        assert_eq!(pager.page_text(), "");
    }

    #[test]
    fn navigation_is_clamped() {
        let mut pager = TextPager::new(&words(600), 1);
        assert!(!pager.prev());
        assert_eq!(pager.current_page(), 1);
        assert!(pager.next());
        assert!(pager.next());
        assert!(!pager.next());
        assert_eq!(pager.current_page(), 3);
        assert!(pager.prev());
        assert_eq!(pager.current_page(), 2);
    }

    #[test]
    fn pages_slice_the_word_list() {
        let mut pager = TextPager::new(&words(260), 1);
        assert!(pager.page_text().starts_with("w0 w1"));
        assert!(pager.page_text().ends_with("w249"));
        pager.next();
        assert_eq!(pager.page_text(), (250..260).map(|i| format!("w{i}")).collect::<Vec<_>>().join(" "));
    }

    #[test]
    fn start_page_is_clamped() {
        assert_eq!(TextPager::new(&words(300), 9).current_page(), 2);
        assert_eq!(TextPager::new(&words(300), 0).current_page(), 1);
    }
}
