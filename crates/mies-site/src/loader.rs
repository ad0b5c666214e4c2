//! Page loading: header decoding and markdown conversion.

use std::fs;

use crate::error::LoadError;
use crate::markdown::MarkdownConverter;
use crate::page::{PageHeader, PageModel, PageResult};

/// Read a page's source and fill in its model.
///
/// Decodes the YAML header, converts the source to HTML and records the
/// output file name as the page's link.
pub fn load_page(page: &mut PageResult, converter: &MarkdownConverter) -> Result<(), LoadError> {
    tracing::debug!(page = %page.name(), "Loading page");

    let markdown = fs::read_to_string(&page.in_path)?;
    let header: PageHeader = mies_header::extract_header(&page.in_path, &markdown)?;
    let contents = converter.to_html(&markdown);
    let page_link = page.out_name().into_owned();

    page.set_model(PageModel {
        header,
        markdown,
        contents,
        page_link,
    });
    Ok(())
}
