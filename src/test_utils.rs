use std::fs;
use std::path::{Path, PathBuf};

/// Creates an empty file at `root/relative`, creating parent directories.
pub(crate) fn touch(root: &Path, relative: &str) -> PathBuf {
    write_file(root, relative, "")
}

/// Writes `contents` to `root/relative`, creating parent directories.
pub(crate) fn write_file(root: &Path, relative: &str, contents: &str) -> PathBuf {
    let path = root.join(relative);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).expect("Failed to create parent directories");
    }
    fs::write(&path, contents).expect("Failed to write file");
    path
}
