//! Markdown to HTML conversion.

use pulldown_cmark::{Options, Parser, html::push_html};

/// Converts page sources to HTML with pulldown-cmark.
///
/// The leading `---` header block of a page is not part of the output.
#[derive(Clone, Debug)]
pub struct MarkdownConverter {
    options: Options,
}

impl Default for MarkdownConverter {
    fn default() -> Self {
        Self::new()
    }
}

impl MarkdownConverter {
    /// Create a converter with GFM and the common extensions enabled:
    /// tables, footnotes, strikethrough, task lists, smart punctuation,
    /// heading attributes and definition lists.
    #[must_use]
    pub fn new() -> Self {
        Self {
            options: Options::ENABLE_TABLES
                | Options::ENABLE_FOOTNOTES
                | Options::ENABLE_STRIKETHROUGH
                | Options::ENABLE_TASKLISTS
                | Options::ENABLE_SMART_PUNCTUATION
                | Options::ENABLE_HEADING_ATTRIBUTES
                | Options::ENABLE_DEFINITION_LIST
                | Options::ENABLE_GFM,
        }
    }

    /// Convert a full page source, header included, to HTML.
    #[must_use]
    pub fn to_html(&self, markdown: &str) -> String {
        let body = mies_header::strip_header(markdown);
        let parser = Parser::new_ext(body, self.options);

        let mut html = String::with_capacity(body.len() * 3 / 2);
        push_html(&mut html, parser);
        html
    }
}
