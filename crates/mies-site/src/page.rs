//! Page records passed through the build pipeline.

use std::borrow::Cow;
use std::path::{Path, PathBuf};

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Deserializer, Serialize};

/// Fields declared in a page's YAML header.
///
/// Field names are matched case-insensitively, so `isIndex`, `IsIndex` and
/// `isindex` all set [`is_index`](Self::is_index).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageHeader {
    /// Title shown in the browser title bar, metadata and inbound links.
    #[serde(alias = "pagetitle")]
    pub title: String,

    /// One-line description for tables of contents and metadata.
    #[serde(default, alias = "pagedesc")]
    pub description: String,

    /// Timestamp of the page, if any.
    #[serde(default, deserialize_with = "deserialize_date")]
    pub date: Option<NaiveDateTime>,

    /// Blog posts are listed chronologically by index pages.
    #[serde(rename(deserialize = "isblogpost"), default)]
    pub is_blog_post: bool,

    /// Index pages are rendered after every other page.
    #[serde(rename(deserialize = "isindex"), default)]
    pub is_index: bool,

    /// Template used to render this page.
    pub template: String,
}

/// Everything known about a page once it has been loaded.
///
/// Built in one piece by the loader and never modified afterwards.
#[derive(Clone, Debug, Serialize)]
pub struct PageModel {
    #[serde(flatten)]
    pub header: PageHeader,
    /// Raw markdown source, header included.
    pub markdown: String,
    /// Markdown converted to HTML, before templating.
    pub contents: String,
    /// File name of the rendered page, e.g. `foo.html` for `foo.md`.
    pub page_link: String,
}

/// A single page moving through the pipeline.
///
/// Discovery creates it with paths only; loading sets [`model`](Self::model);
/// rendering sets [`html_output`](Self::html_output).
///
/// Serializes with the model's fields inlined next to the paths and the
/// rendered output, which is how templates see the page collection.
#[derive(Debug, Serialize)]
pub struct PageResult {
    /// Markdown source file.
    pub in_path: PathBuf,
    /// Target HTML file in the output directory.
    pub out_path: PathBuf,
    #[serde(flatten)]
    pub model: Option<PageModel>,
    pub html_output: Option<String>,
}

impl PageResult {
    #[must_use]
    pub fn new(in_path: PathBuf, out_path: PathBuf) -> Self {
        Self {
            in_path,
            out_path,
            model: None,
            html_output: None,
        }
    }

    /// Whether the loaded header marks this page as an index page.
    ///
    /// Pages that have not been loaded are not index pages.
    #[must_use]
    pub fn is_index(&self) -> bool {
        self.model.as_ref().is_some_and(|m| m.header.is_index)
    }

    /// Source file name, for log and error messages.
    #[must_use]
    pub fn name(&self) -> Cow<'_, str> {
        file_name(&self.in_path)
    }

    /// Output file name, e.g. `post.html`.
    #[must_use]
    pub fn out_name(&self) -> Cow<'_, str> {
        file_name(&self.out_path)
    }

    pub(crate) fn set_model(&mut self, model: PageModel) {
        debug_assert!(self.model.is_none(), "page model is set once");
        self.model = Some(model);
    }
}

fn file_name(path: &Path) -> Cow<'_, str> {
    path.file_name()
        .map_or_else(|| path.to_string_lossy(), |name| name.to_string_lossy())
}

/// Parse a header timestamp.
///
/// Accepts RFC 3339 (`2024-03-01T10:00:00+02:00`, offset dropped),
/// `YYYY-MM-DD HH:MM[:SS]` (space or `T` separated) and `YYYY-MM-DD`.
#[must_use]
pub fn parse_date(text: &str) -> Option<NaiveDateTime> {
    const FORMATS: [&str; 4] = [
        "%Y-%m-%d %H:%M:%S",
        "%Y-%m-%dT%H:%M:%S",
        "%Y-%m-%d %H:%M",
        "%Y-%m-%dT%H:%M",
    ];

    let text = text.trim();
    if let Ok(date) = DateTime::parse_from_rfc3339(text) {
        return Some(date.naive_local());
    }
    FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(text, format).ok())
        .or_else(|| {
            NaiveDate::parse_from_str(text, "%Y-%m-%d")
                .ok()
                .and_then(|date| date.and_hms_opt(0, 0, 0))
        })
}

fn deserialize_date<'de, D>(deserializer: D) -> Result<Option<NaiveDateTime>, D::Error>
where
    D: Deserializer<'de>,
{
    let Some(text) = Option::<String>::deserialize(deserializer)? else {
        return Ok(None);
    };
    if text.trim().is_empty() {
        return Ok(None);
    }
    parse_date(&text)
        .map(Some)
        .ok_or_else(|| serde::de::Error::custom(format!("invalid date `{text}`")))
}
