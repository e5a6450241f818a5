use std::io;
use std::path::{Component, Path, PathBuf};

/// Renders a path for messages, preferring the canonical form and falling back
/// to the lexically normalised absolute form when the path no longer exists.
pub fn best_effort_path_display(path: &Path) -> String {
    match path.canonicalize() {
        Ok(canonical) => canonical.display().to_string(),
        Err(_) => match lexically_absolute(path) {
            Ok(absolute) => absolute.display().to_string(),
            Err(_) => path.display().to_string(),
        },
    }
}

/// Makes `path` absolute against the current directory and folds away `.` and
/// `..` components without touching the filesystem, so symlinks are preserved.
fn lexically_absolute(path: &Path) -> io::Result<PathBuf> {
    let absolute = std::path::absolute(path)?;
    let mut normalized = PathBuf::new();

    for component in absolute.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                // `pop` refuses to remove the root, so `/..` stays `/`
                normalized.pop();
            }
            other => normalized.push(other),
        }
    }

    Ok(normalized)
}

/// Renders a relative path with `/` separators; the empty path is shown as `.`.
fn slash_display(path: &Path) -> String {
    let segments = path
        .components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>();
    if segments.is_empty() {
        ".".to_string()
    } else {
        segments.join("/")
    }
}

pub trait PathExt {
    fn best_effort_path_display(&self) -> String;
    fn lexically_absolute(&self) -> io::Result<PathBuf>;
    fn slash_display(&self) -> String;
}

impl PathExt for Path {
    fn best_effort_path_display(&self) -> String {
        best_effort_path_display(self)
    }

    fn lexically_absolute(&self) -> io::Result<PathBuf> {
        lexically_absolute(self)
    }

    fn slash_display(&self) -> String {
        slash_display(self)
    }
}

impl PathExt for PathBuf {
    fn best_effort_path_display(&self) -> String {
        best_effort_path_display(self)
    }

    fn lexically_absolute(&self) -> io::Result<PathBuf> {
        lexically_absolute(self)
    }

    fn slash_display(&self) -> String {
        slash_display(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::*;

    #[rstest]
    #[case("/a/b/../c", "/a/c")]
    #[case("/a/./b/.", "/a/b")]
    #[case("/..", "/")]
    #[case("/a/b/../../..", "/")]
    fn lexically_absolute_folds_dots(#[case] input: &str, #[case] expected: &str) {
        let result = Path::new(input).lexically_absolute().unwrap();
        assert_eq!(result, PathBuf::from(expected));
    }

    #[test]
    fn lexically_absolute_joins_current_dir() {
        let result = Path::new("some/dir").lexically_absolute().unwrap();
        assert!(result.is_absolute());
        assert!(result.ends_with("some/dir"));
    }

    #[rstest]
    #[case("", ".")]
    #[case("a", "a")]
    #[case("a/b/c.txt", "a/b/c.txt")]
    fn slash_display_joins_segments(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(Path::new(input).slash_display(), expected);
    }

    #[test]
    fn best_effort_display_of_missing_path_is_absolute() {
        let shown = Path::new("/this/path/does/not/../exist.txt").best_effort_path_display();
        assert_eq!(shown, "/this/path/does/exist.txt");
    }
}
