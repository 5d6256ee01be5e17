//! Path component splitting and small path helpers.

use std::path::{Path, PathBuf};

/// Separator used when splitting and joining path text.
pub const SEPARATOR: char = '/';

/// Ordered components of a path.
///
/// An absolute path's first segment is the root `/`, matching what
/// platform path-component APIs report. Empty components produced by
/// repeated or trailing separators are dropped.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PathSegments(Vec<String>);

impl PathSegments {
    pub fn parse(path: &str) -> Self {
        let mut segments = Vec::new();
        if path.starts_with(SEPARATOR) {
            segments.push(SEPARATOR.to_string());
        }
        segments.extend(
            path.split(SEPARATOR)
                .filter(|s| !s.is_empty())
                .map(str::to_string),
        );
        Self(segments)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&str> {
        self.0.get(index).map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }
}

/// Replace a leading `~` with the current user's home directory.
///
/// `~user` forms and paths without a leading tilde are returned unchanged, as
/// is everything when no home directory can be determined.
pub fn expand_tilde(path: &str) -> PathBuf {
    let rest = match path.strip_prefix('~') {
        Some(rest) if rest.is_empty() || rest.starts_with(SEPARATOR) => rest,
        _ => return PathBuf::from(path),
    };
    match dirs::home_dir() {
        Some(home) => home.join(rest.trim_start_matches(SEPARATOR)),
        None => PathBuf::from(path),
    }
}

/// Last path component without its extension.
pub fn file_stem(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_absolute() {
        let segs = PathSegments::parse("/Users/a/Downloads");
        assert_eq!(segs.iter().collect::<Vec<_>>(), ["/", "Users", "a", "Downloads"]);
    }

    #[test]
    fn test_parse_drops_empty_components() {
        let segs = PathSegments::parse("/Users//a/Downloads/");
        assert_eq!(segs.len(), 4);
        assert_eq!(segs.get(3), Some("Downloads"));
    }

    #[test]
    fn test_parse_relative() {
        let segs = PathSegments::parse("sub/img.png");
        assert_eq!(segs.iter().collect::<Vec<_>>(), ["sub", "img.png"]);
    }

    #[test]
    fn test_parse_empty() {
        assert!(PathSegments::parse("").is_empty());
        assert_eq!(PathSegments::parse("/").len(), 1);
    }

    #[test]
    fn test_expand_tilde() {
        let Some(home) = dirs::home_dir() else {
            return;
        };
        assert_eq!(expand_tilde("~"), home);
        assert_eq!(expand_tilde("~/Downloads"), home.join("Downloads"));
    }

    #[test]
    fn test_expand_tilde_leaves_other_paths() {
        assert_eq!(expand_tilde("/tmp/x"), PathBuf::from("/tmp/x"));
        assert_eq!(expand_tilde("~other/x"), PathBuf::from("~other/x"));
        assert_eq!(expand_tilde("a/~/b"), PathBuf::from("a/~/b"));
    }

    #[test]
    fn test_file_stem() {
        assert_eq!(file_stem(Path::new("/Users/a/20240101-101010.jpg")), "20240101-101010");
        assert_eq!(file_stem(Path::new("/Users/a/archive.tar.gz")), "archive.tar");
        assert_eq!(file_stem(Path::new("/")), "");
    }
}
