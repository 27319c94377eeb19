//! Path display for consistent output across platforms.

use std::path::Path;

/// Format a path for display, relative to `project_root` when it is inside
/// it, always with forward slashes.
///
/// Returns `"."` when `path` equals `project_root`.
#[must_use]
pub fn display_path(path: &Path, project_root: Option<&Path>) -> String {
    let shown = project_root
        .and_then(|root| path.strip_prefix(root).ok())
        .unwrap_or(path);
    let result = shown.to_string_lossy().replace('\\', "/");
    if result.is_empty() {
        ".".to_string()
    } else {
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn relative_to_root() {
        let root = Path::new("/work/shop");
        assert_eq!(
            display_path(Path::new("/work/shop/src/test/java/CartTest.java"), Some(root)),
            "src/test/java/CartTest.java"
        );
    }

    #[test]
    fn outside_root_is_unchanged() {
        let root = Path::new("/work/shop");
        assert_eq!(
            display_path(Path::new("/elsewhere/CartTest.java"), Some(root)),
            "/elsewhere/CartTest.java"
        );
    }

    #[test]
    fn root_itself_is_dot() {
        let root = Path::new("/work/shop");
        assert_eq!(display_path(root, Some(root)), ".");
    }

    #[test]
    fn no_root_keeps_path() {
        assert_eq!(display_path(Path::new("a/b.java"), None), "a/b.java");
    }
}
