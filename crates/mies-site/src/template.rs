//! Page rendering through minijinja templates.
//!
//! Templates are looked up by the name given in a page's header. A name
//! without an extension refers to `<name>.html`. Each templates directory is
//! searched in order (site overrides first, then the theme) and a template is
//! read from disk once per run.
//!
//! Templates see the page model fields at the top level (`title`,
//! `description`, `date`, `is_blog_post`, `is_index`, `template`, `markdown`,
//! `contents`, `page_link`) plus:
//!
//! - `site`: the site configuration (`site.title`, `site.author`, ...)
//! - `all`: every page in processing order, each with its model fields,
//!   `in_path`, `out_path` and `html_output`
//! - `recent_posts`: the newest `site.recent_posts` blog posts, shaped like
//!   the entries of `all`
//!
//! Pages are rendered one after another, so `html_output` is set for the
//! pages processed before the current one. Index pages come last and can
//! embed the rendered output of every other page.
//!
//! `contents` is already HTML and should be emitted with `{{ contents|safe }}`.

use std::collections::HashSet;
use std::io;
use std::path::{Path, PathBuf};

use minijinja::{Environment, ErrorKind};
use mies_config::SiteConfig;
use serde::Serialize;

use crate::error::RenderError;
use crate::page::{PageModel, PageResult};

/// Data a template is rendered against.
#[derive(Debug, Serialize)]
pub struct RenderContext<'a> {
    #[serde(flatten)]
    pub page: &'a PageModel,
    pub site: &'a SiteConfig,
    pub all: &'a [PageResult],
    pub recent_posts: Vec<&'a PageResult>,
}

impl<'a> RenderContext<'a> {
    /// Build the context for `page` from the shared site state.
    #[must_use]
    pub fn new(page: &'a PageModel, site: &'a SiteConfig, pages: &'a [PageResult]) -> Self {
        Self {
            page,
            site,
            all: pages,
            recent_posts: recent_posts(pages, site.recent_posts),
        }
    }
}

/// Blog posts, newest first, limited to `count`.
///
/// Undated posts sort after dated ones; ties keep processing order.
fn recent_posts(pages: &[PageResult], count: usize) -> Vec<&PageResult> {
    let mut posts: Vec<_> = pages
        .iter()
        .filter_map(|p| Some((p, p.model.as_ref()?)))
        .filter(|(_, m)| m.header.is_blog_post)
        .collect();
    posts.sort_by(|(_, a), (_, b)| b.header.date.cmp(&a.header.date));
    posts.into_iter().take(count).map(|(p, _)| p).collect()
}

/// Renders page models with templates from one or more directories.
pub struct TemplateRenderer {
    env: Environment<'static>,
    template_dirs: Vec<PathBuf>,
    loaded: HashSet<String>,
}

impl TemplateRenderer {
    /// Create a renderer searching `template_dirs` in order.
    #[must_use]
    pub fn new(template_dirs: Vec<PathBuf>) -> Self {
        let mut env = Environment::new();
        // `extends` and `include` resolve through the same directories
        let dirs = template_dirs.clone();
        env.set_loader(move |name| read_template(&dirs, name));

        Self {
            env,
            template_dirs,
            loaded: HashSet::new(),
        }
    }

    /// Directories searched for templates, highest precedence first.
    #[must_use]
    pub fn template_dirs(&self) -> &[PathBuf] {
        &self.template_dirs
    }

    /// Render `page` with the template named in its header.
    pub async fn render(
        &mut self,
        page: &PageModel,
        site: &SiteConfig,
        pages: &[PageResult],
    ) -> Result<String, RenderError> {
        let name = template_file_name(&page.header.template);
        self.ensure_loaded(&name).await?;

        let template = self.env.get_template(&name)?;
        let context = RenderContext::new(page, site, pages);
        Ok(template.render(&context)?)
    }

    /// Read and compile template `name` unless already cached.
    async fn ensure_loaded(&mut self, name: &str) -> Result<(), RenderError> {
        if self.loaded.contains(name) {
            return Ok(());
        }

        for dir in &self.template_dirs {
            let path = dir.join(name);
            match tokio::fs::read_to_string(&path).await {
                Ok(source) => {
                    tracing::debug!(template = name, path = %path.display(), "Compiling template");
                    self.env.add_template_owned(name.to_owned(), source)?;
                    self.loaded.insert(name.to_owned());
                    return Ok(());
                }
                Err(e) if e.kind() == io::ErrorKind::NotFound => {}
                Err(source) => return Err(RenderError::Io { path, source }),
            }
        }

        Err(RenderError::TemplateNotFound {
            name: name.to_owned(),
        })
    }
}

/// Template file for a header template name: `post` is `post.html`.
#[must_use]
pub fn template_file_name(name: &str) -> String {
    if Path::new(name).extension().is_some() {
        name.to_owned()
    } else {
        format!("{name}.html")
    }
}

fn read_template(dirs: &[PathBuf], name: &str) -> Result<Option<String>, minijinja::Error> {
    let file_name = template_file_name(name);
    for dir in dirs {
        match std::fs::read_to_string(dir.join(&file_name)) {
            Ok(source) => return Ok(Some(source)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => {}
            Err(e) => {
                return Err(minijinja::Error::new(
                    ErrorKind::InvalidOperation,
                    format!("could not read template {file_name}"),
                )
                .with_source(e));
            }
        }
    }
    Ok(None)
}
