// FILE: crates/library/src/filter.rs

use std::ffi::OsStr;
use std::fs::Metadata;
use std::io;
use std::path::Path;

/// Decides which directory entries take part in a scan
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathFilter {
    extensions: Vec<String>,
    follow_symlinks: bool,
}

impl PathFilter {
    /// Creates a filter accepting the given audio extensions
    ///
    /// Entries are trimmed, lowercased and stripped of a leading dot; empty
    /// entries are dropped. Order is preserved.
    pub fn new<I, S>(extensions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let extensions = extensions
            .into_iter()
            .map(|ext| ext.as_ref().trim().trim_start_matches('.').to_ascii_lowercase())
            .filter(|ext| !ext.is_empty())
            .collect();

        Self {
            extensions,
            follow_symlinks: true,
        }
    }

    pub fn with_follow_symlinks(mut self, follow: bool) -> Self {
        self.follow_symlinks = follow;
        self
    }

    pub fn extensions(&self) -> &[String] {
        &self.extensions
    }

    pub fn follows_symlinks(&self) -> bool {
        self.follow_symlinks
    }

    /// Names starting with a dot are never surfaced
    pub fn is_hidden(&self, name: &OsStr) -> bool {
        name.as_encoded_bytes().starts_with(b".")
    }

    /// Whether the extension of `path` is in the allow-list
    pub fn is_audio(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|e| e.to_str())
            .map(|ext| self.extensions.iter().any(|allowed| ext.eq_ignore_ascii_case(allowed)))
            .unwrap_or(false)
    }

    /// Whether `path` is a directory the scan may descend into
    pub fn is_traversable(&self, path: &Path) -> bool {
        self.stat(path).map(|md| md.is_dir()).unwrap_or(false)
    }

    /// Stats `path`, following symlinks only when the policy allows it
    pub fn stat(&self, path: &Path) -> io::Result<Metadata> {
        if self.follow_symlinks {
            std::fs::metadata(path)
        } else {
            std::fs::symlink_metadata(path)
        }
    }
}

impl Default for PathFilter {
    fn default() -> Self {
        Self::new(bookcaster_config::DEFAULT_AUDIO_EXTENSIONS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_hidden_names() {
        let filter = PathFilter::default();
        assert!(filter.is_hidden(OsStr::new(".DS_Store")));
        assert!(filter.is_hidden(OsStr::new(".hidden.mp3")));
        assert!(!filter.is_hidden(OsStr::new("visible.mp3")));
        assert!(!filter.is_hidden(OsStr::new("a.b")));
    }

    #[test]
    fn test_default_extensions() {
        let filter = PathFilter::default();
        assert_eq!(filter.extensions(), ["mp3", "mp4", "m4a", "m4b"]);
        assert!(filter.is_audio(Path::new("a.mp3")));
        assert!(filter.is_audio(Path::new("book.m4b")));
        assert!(!filter.is_audio(Path::new("cover.jpg")));
        assert!(!filter.is_audio(Path::new("mp3")));
        assert!(!filter.is_audio(Path::new("notes.mp3.txt")));
    }

    #[test]
    fn test_extension_match_ignores_case() {
        let filter = PathFilter::default();
        assert!(filter.is_audio(Path::new("CHAPTER01.MP3")));
        assert!(filter.is_audio(Path::new("Book.M4b")));
    }

    #[test]
    fn test_configured_extensions_are_normalized() {
        let filter = PathFilter::new([" .FLAC ", "ogg", "", "."]);
        assert_eq!(filter.extensions(), ["flac", "ogg"]);
        assert!(filter.is_audio(Path::new("track.flac")));
        assert!(!filter.is_audio(Path::new("track.mp3")));
    }

    #[test]
    fn test_is_traversable() {
        let temp_dir = TempDir::new().unwrap();
        let file = temp_dir.path().join("a.mp3");
        fs::write(&file, b"data").unwrap();

        let filter = PathFilter::default();
        assert!(filter.is_traversable(temp_dir.path()));
        assert!(!filter.is_traversable(&file));
        assert!(!filter.is_traversable(&temp_dir.path().join("missing")));
    }

    #[cfg(unix)]
    #[test]
    fn test_symlink_policy() {
        let temp_dir = TempDir::new().unwrap();
        let target = temp_dir.path().join("target");
        fs::create_dir(&target).unwrap();
        let link = temp_dir.path().join("link");
        std::os::unix::fs::symlink(&target, &link).unwrap();

        assert!(PathFilter::default().is_traversable(&link));
        assert!(!PathFilter::default()
            .with_follow_symlinks(false)
            .is_traversable(&link));
    }
}
