//! Markdown-to-HTML static site generation for Mies.
//!
//! Pages are markdown files starting with a YAML header block. They are
//! rendered through a theme's minijinja templates into a flat output
//! directory alongside the theme's raw files.

mod builder;
mod error;
mod loader;
mod markdown;
mod order;
mod output;
mod page;
mod scanner;
mod template;

pub use builder::{BuildConfig, BuildReport, StaticSiteBuilder};
pub use error::{BuildError, LoadError, RenderError};
pub use loader::load_page;
pub use markdown::MarkdownConverter;
pub use order::move_index_pages_to_end;
pub use output::{copy_raw_tree, reset_output_dir, write_page};
pub use page::{PageHeader, PageModel, PageResult, parse_date};
pub use scanner::{discover, output_path};
pub use template::{RenderContext, TemplateRenderer, template_file_name};
