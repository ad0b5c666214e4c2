//! Page discovery by filesystem walking.
//!
//! Discovery only identifies source files and computes where their output
//! goes; no file content is read at this stage.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{BuildError, io_error};
use crate::page::PageResult;

/// Extension of markdown source files.
const MARKDOWN_EXTENSION: &str = "md";

/// Find up to `max` markdown files under `pages_dir`.
///
/// Walks the tree depth-first. Within each directory, files come before
/// subdirectories and both are sorted by name, so the result does not depend
/// on the platform's directory enumeration order.
///
/// Every page is written flat into `outputs_dir` as `<file stem>.html`.
pub fn discover(
    pages_dir: &Path,
    outputs_dir: &Path,
    max: usize,
) -> Result<Vec<PageResult>, BuildError> {
    let mut sources = Vec::new();
    scan_directory(pages_dir, max, &mut sources)?;

    Ok(sources
        .into_iter()
        .map(|source| {
            let out_path = output_path(&source, outputs_dir);
            PageResult::new(source, out_path)
        })
        .collect())
}

/// Output location of a page: `outputs_dir / (stem + ".html")`.
#[must_use]
pub fn output_path(source: &Path, outputs_dir: &Path) -> PathBuf {
    let name = Path::new(source.file_name().unwrap_or(source.as_os_str()));
    outputs_dir.join(name.with_extension("html"))
}

fn scan_directory(dir: &Path, max: usize, sources: &mut Vec<PathBuf>) -> Result<(), BuildError> {
    if sources.len() >= max {
        return Ok(());
    }

    let mut files = Vec::new();
    let mut dirs = Vec::new();
    for entry in fs::read_dir(dir).map_err(io_error(dir))? {
        let entry = entry.map_err(io_error(dir))?;
        let path = entry.path();
        let is_dir = entry.file_type().is_ok_and(|t| t.is_dir());
        if is_dir {
            dirs.push(path);
        } else if is_markdown(&path) {
            files.push(path);
        }
    }
    files.sort();
    dirs.sort();

    for file in files {
        if sources.len() >= max {
            return Ok(());
        }
        sources.push(file);
    }
    for subdir in dirs {
        scan_directory(&subdir, max, sources)?;
    }

    Ok(())
}

fn is_markdown(path: &Path) -> bool {
    path.extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case(MARKDOWN_EXTENSION))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn create_test_dir() -> tempfile::TempDir {
        let temp_dir = tempfile::tempdir().unwrap();
        let pages = temp_dir.path().join("pages");
        fs::create_dir_all(pages.join("blog/2024")).unwrap();
        fs::create_dir_all(pages.join("about")).unwrap();
        fs::write(pages.join("index.md"), "").unwrap();
        fs::write(pages.join("contact.md"), "").unwrap();
        fs::write(pages.join("notes.txt"), "").unwrap();
        fs::write(pages.join("blog/first.md"), "").unwrap();
        fs::write(pages.join("blog/2024/second.MD"), "").unwrap();
        fs::write(pages.join("about/me.md"), "").unwrap();
        temp_dir
    }

    fn names(pages: &[PageResult]) -> Vec<String> {
        pages.iter().map(|p| p.name().into_owned()).collect()
    }

    #[test]
    fn test_discover_recursive_in_stable_order() {
        let temp_dir = create_test_dir();
        let pages = discover(
            &temp_dir.path().join("pages"),
            &temp_dir.path().join("out"),
            usize::MAX,
        )
        .unwrap();

        assert_eq!(
            names(&pages),
            vec!["contact.md", "index.md", "me.md", "first.md", "second.MD"]
        );
        assert!(pages.iter().all(|p| p.model.is_none() && p.html_output.is_none()));
    }

    #[test]
    fn test_discover_computes_flat_output_paths() {
        let temp_dir = create_test_dir();
        let out = temp_dir.path().join("out");
        let pages = discover(&temp_dir.path().join("pages"), &out, usize::MAX).unwrap();

        let outputs: Vec<_> = pages.iter().map(|p| p.out_path.clone()).collect();
        assert_eq!(
            outputs,
            vec![
                out.join("contact.html"),
                out.join("index.html"),
                out.join("me.html"),
                out.join("first.html"),
                out.join("second.html"),
            ]
        );
    }

    #[test]
    fn test_discover_respects_max() {
        let temp_dir = create_test_dir();
        let pages_dir = temp_dir.path().join("pages");
        let out = temp_dir.path().join("out");

        assert_eq!(
            names(&discover(&pages_dir, &out, 3).unwrap()),
            vec!["contact.md", "index.md", "me.md"]
        );
        assert!(discover(&pages_dir, &out, 0).unwrap().is_empty());
    }

    #[test]
    fn test_discover_empty_dir() {
        let temp_dir = tempfile::tempdir().unwrap();
        let pages = discover(temp_dir.path(), &temp_dir.path().join("out"), 10).unwrap();
        assert!(pages.is_empty());
    }

    #[test]
    fn test_discover_missing_dir_is_io_error() {
        let err = discover(Path::new("/nonexistent/pages"), Path::new("/out"), 10).unwrap_err();
        assert!(matches!(
            err,
            BuildError::Io { ref path, .. } if path == Path::new("/nonexistent/pages")
        ));
    }

    #[test]
    fn test_output_path_replaces_extension() {
        assert_eq!(
            output_path(Path::new("pages/blog/hello.world.md"), Path::new("out")),
            PathBuf::from("out/hello.world.html")
        );
    }
}
