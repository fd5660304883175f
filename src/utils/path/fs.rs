//! Filesystem helpers.
//!
//! - `normalize_path` - file system paths (canonicalize + fallback)
//! - `copy_path` - verbatim copy of a file or a whole directory tree
//! - `write_file` - truncate-and-write with parent directory creation

use crate::core::BuildError;
use jwalk::WalkDir;
use std::{
    fs, io,
    path::{Component, Path, PathBuf},
};

/// Files never copied into the output.
const IGNORED_FILES: &[&str] = &[".DS_Store"];

/// Normalize a file system path to absolute form.
///
/// Tries `canonicalize()` first (resolves symlinks, `.`, `..`).
/// Falls back to:
/// - Join with current directory if relative
/// - Lexically fold `.` and `..` components
#[inline]
pub fn normalize_path(path: &Path) -> PathBuf {
    path.canonicalize().unwrap_or_else(|_| {
        let absolute = if path.is_absolute() {
            path.to_path_buf()
        } else {
            std::env::current_dir().map_or_else(|_| path.to_path_buf(), |cwd| cwd.join(path))
        };
        fold_dots(&absolute)
    })
}

fn fold_dots(path: &Path) -> PathBuf {
    let mut folded = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                if !folded.pop() && !folded.has_root() {
                    folded.push(component);
                }
            }
            other => folded.push(other),
        }
    }
    folded
}

/// Write `contents` to `path`, replacing any existing file.
pub fn write_file(path: &Path, contents: impl AsRef<[u8]>) -> Result<(), BuildError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| BuildError::io(parent, e))?;
    }
    fs::write(path, contents).map_err(|e| BuildError::io(path, e))
}

/// Copy a file or directory tree from `from` to `to`.
///
/// Directories are merged into `to`; existing files are overwritten.
/// Returns the number of files copied.
pub fn copy_path(from: &Path, to: &Path) -> Result<usize, BuildError> {
    let meta = fs::metadata(from).map_err(|e| BuildError::io(from, e))?;

    if meta.is_file() {
        write_copy(from, to)?;
        return Ok(1);
    }

    fs::create_dir_all(to).map_err(|e| BuildError::io(to, e))?;

    let mut copied = 0;
    for entry in WalkDir::new(from).skip_hidden(false).sort(true) {
        let entry = entry.map_err(|e| BuildError::io(from, io::Error::other(e.to_string())))?;
        let path = entry.path();
        let name = entry.file_name().to_str().unwrap_or_default();
        if IGNORED_FILES.contains(&name) {
            continue;
        }

        // WalkDir only yields paths under `from`
        let Ok(relative) = path.strip_prefix(from) else {
            continue;
        };
        let target = to.join(relative);

        if entry.file_type().is_dir() {
            fs::create_dir_all(&target).map_err(|e| BuildError::io(&target, e))?;
        } else {
            write_copy(&path, &target)?;
            copied += 1;
        }
    }

    Ok(copied)
}

fn write_copy(from: &Path, to: &Path) -> Result<(), BuildError> {
    if let Some(parent) = to.parent() {
        fs::create_dir_all(parent).map_err(|e| BuildError::io(parent, e))?;
    }
    fs::copy(from, to).map_err(|e| BuildError::io(from, e))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_normalize_path_relative() {
        let normalized = normalize_path(Path::new("relative/path/file.txt"));
        assert!(normalized.is_absolute());
    }

    #[test]
    fn test_normalize_path_folds_missing_parents() {
        assert_eq!(
            normalize_path(Path::new("/nonexistent/site/./public/../..")),
            PathBuf::from("/nonexistent")
        );
        assert_eq!(normalize_path(Path::new("/nonexistent/a/../b")), PathBuf::from("/nonexistent/b"));
    }

    #[test]
    fn test_copy_single_file() {
        let dir = TempDir::new().unwrap();
        let src = dir.path().join("robots.txt");
        fs::write(&src, "User-agent: *\n").unwrap();

        let dst = dir.path().join("out/robots.txt");
        assert_eq!(copy_path(&src, &dst).unwrap(), 1);
        assert_eq!(fs::read_to_string(dst).unwrap(), "User-agent: *\n");
    }

    #[test]
    fn test_copy_directory_tree() {
        let dir = TempDir::new().unwrap();
        let src = dir.path().join("assets");
        fs::create_dir_all(src.join("css")).unwrap();
        fs::write(src.join("css/main.css"), "body{}").unwrap();
        fs::write(src.join("logo.svg"), "<svg/>").unwrap();
        fs::write(src.join(".DS_Store"), "junk").unwrap();

        let dst = dir.path().join("public/assets");
        assert_eq!(copy_path(&src, &dst).unwrap(), 2);
        assert_eq!(fs::read_to_string(dst.join("css/main.css")).unwrap(), "body{}");
        assert!(dst.join("logo.svg").exists());
        assert!(!dst.join(".DS_Store").exists());
    }

    #[test]
    fn test_copy_missing_source_is_error() {
        let dir = TempDir::new().unwrap();
        let err = copy_path(&dir.path().join("nope"), &dir.path().join("out")).unwrap_err();
        assert!(matches!(err, BuildError::Io { .. }));
    }

    #[test]
    fn test_write_file_creates_parents_and_truncates() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("go/index.html");
        write_file(&path, "first version").unwrap();
        write_file(&path, "second").unwrap();
        assert_eq!(fs::read_to_string(path).unwrap(), "second");
    }
}
