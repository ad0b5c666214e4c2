//! Writing the generated site to disk.

use std::fs;
use std::path::Path;

use crate::error::{BuildError, io_error};

/// Delete `path` if it exists, then create it empty.
pub fn reset_output_dir(path: &Path) -> Result<(), BuildError> {
    if path.exists() {
        tracing::info!(path = %path.display(), "Deleting output directory");
        fs::remove_dir_all(path).map_err(io_error(path))?;
    }

    tracing::info!(path = %path.display(), "Creating output directory");
    fs::create_dir_all(path).map_err(io_error(path))
}

/// Copy the contents of `source_dir` into `target_dir`, recursively.
///
/// Existing files in the target are overwritten. Returns the number of files
/// copied. Stops at the first failure without undoing earlier copies.
pub fn copy_raw_tree(source_dir: &Path, target_dir: &Path) -> Result<usize, BuildError> {
    let mut count = 0;

    for entry in fs::read_dir(source_dir).map_err(io_error(source_dir))? {
        let entry = entry.map_err(io_error(source_dir))?;
        let source = entry.path();
        let target = target_dir.join(entry.file_name());

        if entry.file_type().map_err(io_error(&source))?.is_dir() {
            fs::create_dir_all(&target).map_err(io_error(&target))?;
            count += copy_raw_tree(&source, &target)?;
        } else {
            fs::copy(&source, &target).map_err(io_error(&source))?;
            count += 1;
        }
    }

    Ok(count)
}

/// Write rendered HTML to `path`, replacing any existing file.
pub fn write_page(path: &Path, html: &str) -> Result<(), BuildError> {
    tracing::debug!(page = %path.display(), "Writing page");
    fs::write(path, html).map_err(io_error(path))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_reset_creates_missing_dir() {
        let temp_dir = tempfile::tempdir().unwrap();
        let out = temp_dir.path().join("a/b/out");

        reset_output_dir(&out).unwrap();

        assert!(out.is_dir());
    }

    #[test]
    fn test_reset_removes_stale_content() {
        let temp_dir = tempfile::tempdir().unwrap();
        let out = temp_dir.path().join("out");
        fs::create_dir_all(out.join("nested")).unwrap();
        fs::write(out.join("stale.html"), "old").unwrap();
        fs::write(out.join("nested/old.css"), "old").unwrap();

        reset_output_dir(&out).unwrap();

        assert!(out.is_dir());
        assert_eq!(fs::read_dir(&out).unwrap().count(), 0);
    }

    #[test]
    fn test_copy_raw_tree_counts_all_files() {
        let temp_dir = tempfile::tempdir().unwrap();
        let raw = temp_dir.path().join("raw");
        let out = temp_dir.path().join("out");
        fs::create_dir_all(raw.join("css")).unwrap();
        fs::create_dir_all(raw.join("img/icons")).unwrap();
        fs::create_dir_all(raw.join("empty")).unwrap();
        fs::write(raw.join("favicon.ico"), "ico").unwrap();
        fs::write(raw.join("css/site.css"), "body {}").unwrap();
        fs::write(raw.join("img/logo.png"), "png").unwrap();
        fs::write(raw.join("img/icons/a.svg"), "<svg/>").unwrap();
        fs::create_dir_all(&out).unwrap();

        let count = copy_raw_tree(&raw, &out).unwrap();

        assert_eq!(count, 4);
        assert_eq!(fs::read_to_string(out.join("css/site.css")).unwrap(), "body {}");
        assert_eq!(fs::read_to_string(out.join("img/icons/a.svg")).unwrap(), "<svg/>");
        assert!(out.join("empty").is_dir());
    }

    #[test]
    fn test_copy_raw_tree_overwrites() {
        let temp_dir = tempfile::tempdir().unwrap();
        let raw = temp_dir.path().join("raw");
        let out = temp_dir.path().join("out");
        fs::create_dir_all(&raw).unwrap();
        fs::create_dir_all(&out).unwrap();
        fs::write(raw.join("style.css"), "new").unwrap();
        fs::write(out.join("style.css"), "old").unwrap();

        assert_eq!(copy_raw_tree(&raw, &out).unwrap(), 1);
        assert_eq!(fs::read_to_string(out.join("style.css")).unwrap(), "new");
    }

    #[test]
    fn test_copy_raw_tree_missing_source() {
        let temp_dir = tempfile::tempdir().unwrap();
        let err = copy_raw_tree(&temp_dir.path().join("nope"), temp_dir.path()).unwrap_err();
        assert!(matches!(err, BuildError::Io { .. }));
    }

    #[test]
    fn test_write_page_overwrites() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("a.html");
        fs::write(&path, "old").unwrap();

        write_page(&path, "<p>héllo</p>").unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "<p>héllo</p>");
    }
}
