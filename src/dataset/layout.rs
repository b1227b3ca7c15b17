//! Discovery of class folders under a dataset root.

use crate::error::{Error, Result, error_chain};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// One class folder and the files it contains.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassFolder {
    /// Class label (the folder name).
    pub name: String,
    /// Path to the folder.
    pub path: PathBuf,
    /// Regular files directly inside the folder, sorted by name.
    pub files: Vec<PathBuf>,
}

/// Check that `root` exists and is a directory.
pub fn ensure_dataset_root(root: &Path) -> Result<()> {
    if !root.exists() {
        return Err(Error::DatasetRootNotFound {
            path: root.to_path_buf(),
        });
    }
    if !root.is_dir() {
        return Err(Error::DatasetRootNotDirectory {
            path: root.to_path_buf(),
        });
    }
    Ok(())
}

/// List the class folders directly under `root`, sorted by name.
///
/// Files at the root and directories nested inside class folders are not
/// part of any class and are skipped. A class folder that cannot be listed
/// is logged and left out; only an unreadable root is an error.
pub fn discover_classes(root: &Path) -> Result<Vec<ClassFolder>> {
    ensure_dataset_root(root)?;

    let (dirs, stray_files) = sorted_entries(root)?;
    for file in &stray_files {
        debug!("Ignoring file outside any class folder: {}", file.display());
    }

    let mut classes = Vec::with_capacity(dirs.len());
    for dir in dirs {
        match read_class(&dir) {
            Ok(class) => classes.push(class),
            Err(e) => warn!(
                "Skipping unreadable class folder {}: {}",
                dir.display(),
                error_chain(&e)
            ),
        }
    }

    Ok(classes)
}

fn read_class(dir: &Path) -> Result<ClassFolder> {
    let (nested, files) = sorted_entries(dir)?;
    for sub in &nested {
        debug!("Ignoring nested directory: {}", sub.display());
    }

    // Use to_string_lossy() so non-UTF-8 folder names still get a label
    let name = dir.file_name().map_or_else(
        || dir.to_string_lossy().into_owned(),
        |n| n.to_string_lossy().into_owned(),
    );

    Ok(ClassFolder {
        name,
        path: dir.to_path_buf(),
        files,
    })
}

/// Split the entries of `dir` into sorted (directories, files).
fn sorted_entries(dir: &Path) -> Result<(Vec<PathBuf>, Vec<PathBuf>)> {
    let read_error = |e: std::io::Error| Error::DatasetRead {
        path: dir.to_path_buf(),
        source: e,
    };

    let mut dirs = Vec::new();
    let mut files = Vec::new();
    for entry in std::fs::read_dir(dir).map_err(read_error)? {
        let path = entry.map_err(read_error)?.path();
        if path.is_dir() {
            dirs.push(path);
        } else if path.is_file() {
            files.push(path);
        }
    }

    // Sort by file name so label assignment does not depend on the filesystem
    dirs.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
    files.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
    Ok((dirs, files))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_missing_root_is_error() {
        let result = discover_classes(Path::new("/nonexistent/dataset"));
        assert!(matches!(result, Err(Error::DatasetRootNotFound { .. })));
    }

    #[test]
    fn test_file_root_is_error() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("not_a_dir.txt");
        fs::write(&file, b"x").unwrap();
        let result = discover_classes(&file);
        assert!(matches!(result, Err(Error::DatasetRootNotDirectory { .. })));
    }

    #[test]
    fn test_classes_and_files_are_sorted() {
        let dir = TempDir::new().unwrap();
        for class in ["fr", "en", "es"] {
            fs::create_dir(dir.path().join(class)).unwrap();
        }
        fs::write(dir.path().join("en").join("b.wav"), b"").unwrap();
        fs::write(dir.path().join("en").join("a.wav"), b"").unwrap();
        fs::write(dir.path().join("readme.txt"), b"").unwrap();
        fs::create_dir(dir.path().join("en").join("nested")).unwrap();

        let classes = discover_classes(dir.path()).unwrap();
        let names: Vec<_> = classes.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["en", "es", "fr"]);

        let files: Vec<_> = classes[0]
            .files
            .iter()
            .map(|f| f.file_name().unwrap().to_str().unwrap())
            .collect();
        assert_eq!(files, vec!["a.wav", "b.wav"]);
        assert!(classes[1].files.is_empty());
    }

    #[test]
    fn test_empty_root_has_no_classes() {
        let dir = TempDir::new().unwrap();
        assert!(discover_classes(dir.path()).unwrap().is_empty());
    }

    #[test]
    fn test_unreadable_class_is_read_error() {
        let dir = TempDir::new().unwrap();
        let result = read_class(&dir.path().join("gone"));
        assert!(matches!(result, Err(Error::DatasetRead { .. })));
    }

    #[cfg(unix)]
    #[test]
    fn test_unreadable_class_is_skipped() {
        use std::os::unix::fs::PermissionsExt;

        let dir = TempDir::new().unwrap();
        for class in ["en", "fr"] {
            fs::create_dir(dir.path().join(class)).unwrap();
        }
        let locked = dir.path().join("en");
        fs::set_permissions(&locked, fs::Permissions::from_mode(0o000)).unwrap();

        // Root ignores permission bits, so only assert when the folder is really locked
        let locked_out = fs::read_dir(&locked).is_err();
        let classes = discover_classes(dir.path());
        fs::set_permissions(&locked, fs::Permissions::from_mode(0o755)).unwrap();

        let names: Vec<_> = classes.unwrap().into_iter().map(|c| c.name).collect();
        if locked_out {
            assert_eq!(names, vec!["fr"]);
        } else {
            assert_eq!(names, vec!["en", "fr"]);
        }
    }
}
