// FILE: crates/library/src/scanner.rs

use crate::error::{LibraryError, Result};
use crate::filter::PathFilter;
use crate::model::{Author, Book, BookKind, Track};
use crate::paths;
use bookcaster_config::LibraryConfig;
use log::{debug, info, warn};
use std::io;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Configuration for library scanner
#[derive(Debug, Clone)]
pub struct ScannerConfig {
    /// Directory holding one subdirectory per author
    pub root: PathBuf,
    /// Maximum depth below a book directory (`None` = unlimited)
    pub max_depth: Option<usize>,
    /// Follow symbolic links
    pub follow_symlinks: bool,
    /// Audio file extensions
    pub audio_extensions: Vec<String>,
}

impl Default for ScannerConfig {
    fn default() -> Self {
        Self::from(&LibraryConfig::default())
    }
}

impl From<&LibraryConfig> for ScannerConfig {
    fn from(config: &LibraryConfig) -> Self {
        Self {
            root: config.root.clone(),
            max_depth: config.max_depth(),
            follow_symlinks: config.follow_symlinks,
            audio_extensions: config.audio_extensions.clone(),
        }
    }
}

impl ScannerConfig {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            ..Default::default()
        }
    }

    /// Limits the book walk to `depth` levels; 0 removes the limit
    pub fn with_max_depth(mut self, depth: usize) -> Self {
        self.max_depth = (depth > 0).then_some(depth);
        self
    }

    pub fn with_follow_symlinks(mut self, follow: bool) -> Self {
        self.follow_symlinks = follow;
        self
    }

    pub fn with_extensions(mut self, extensions: Vec<String>) -> Self {
        self.audio_extensions = extensions;
        self
    }

    /// Builds the entry filter matching this configuration
    pub fn filter(&self) -> PathFilter {
        PathFilter::new(&self.audio_extensions).with_follow_symlinks(self.follow_symlinks)
    }
}

/// Read-only view over the `author/book/file` tree
///
/// Every call re-reads the filesystem; nothing is cached between calls.
#[derive(Debug, Clone)]
pub struct LibraryScanner {
    config: ScannerConfig,
    filter: PathFilter,
}

impl LibraryScanner {
    /// Create a new scanner rooted at `root` with default rules
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self::with_config(ScannerConfig::new(root))
    }

    /// Create a new scanner with custom configuration
    pub fn with_config(config: ScannerConfig) -> Self {
        let filter = config.filter();
        Self { config, filter }
    }

    /// Get the current configuration
    pub fn config(&self) -> &ScannerConfig {
        &self.config
    }

    pub fn filter(&self) -> &PathFilter {
        &self.filter
    }

    pub fn root(&self) -> &Path {
        &self.config.root
    }

    /// Lists the author directories of the library, sorted by name
    pub fn list_authors(&self) -> Result<Vec<Author>> {
        let root = &self.config.root;
        if !self.filter.is_traversable(root) {
            let err = match self.filter.stat(root) {
                Err(e) => e,
                Ok(_) => io::Error::new(
                    io::ErrorKind::NotADirectory,
                    format!("library root {} is not a directory", root.display()),
                ),
            };
            return Err(err.into());
        }

        let names = self.list_entries(root, |md, _| md.is_dir())?;
        debug!("Found {} authors in {}", names.len(), root.display());

        Ok(names.into_iter().map(|name| Author { name }).collect())
    }

    /// Lists the books of `author`, sorted by name
    ///
    /// A book is either a subdirectory or an audio file placed directly in
    /// the author directory.
    pub fn list_books(&self, author: &str) -> Result<Vec<Book>> {
        let author_dir = self.config.root.join(paths::single_segment(author, "author")?);

        match self.filter.stat(&author_dir) {
            Ok(md) if md.is_dir() => {}
            Ok(_) => return Err(LibraryError::not_found(format!("author {}", author))),
            Err(e) => return Err(LibraryError::from_stat(&format!("author {}", author), e)),
        }

        let mut books = Vec::new();
        for entry in self.walk_children(&author_dir)? {
            let path = entry.path();
            let kind = if entry.file_type().is_dir() {
                BookKind::Directory
            } else if entry.file_type().is_file() && self.filter.is_audio(path) {
                BookKind::File
            } else {
                continue;
            };

            if let Some(name) = entry_name(path) {
                books.push(Book {
                    author: author.to_string(),
                    name,
                    kind,
                });
            }
        }

        books.sort_by(|a, b| a.name.cmp(&b.name));
        debug!("Found {} books for {}", books.len(), author);
        Ok(books)
    }

    /// Resolves the ordered audio files of a book
    ///
    /// A book naming an audio file yields exactly that file. A directory is
    /// walked recursively and its audio files are returned sorted by their
    /// `/`-separated path relative to the book directory.
    pub fn resolve_tracks(&self, author: &str, book: &str) -> Result<Vec<Track>> {
        let book_path = self
            .config
            .root
            .join(paths::single_segment(author, "author")?)
            .join(paths::single_segment(book, "book")?);

        let metadata = self
            .filter
            .stat(&book_path)
            .map_err(|e| LibraryError::from_stat(&format!("book {}/{}", author, book), e))?;

        if metadata.is_file() && self.filter.is_audio(&book_path) {
            debug!("Single-file book: {}", book_path.display());
            return Ok(vec![Track {
                relative_path: book.to_string(),
                absolute_path: book_path,
                size: metadata.len(),
            }]);
        }

        if !metadata.is_dir() {
            return Err(LibraryError::invalid_input("unknown file type"));
        }

        let tracks = self.walk_book(&book_path)?;
        info!(
            "Resolved {} tracks for {}/{}",
            tracks.len(),
            author,
            book
        );
        Ok(tracks)
    }

    /// Same as [`resolve_tracks`](Self::resolve_tracks), named for the file listing view
    pub fn list_files(&self, author: &str, book: &str) -> Result<Vec<Track>> {
        self.resolve_tracks(author, book)
    }

    /// Walks a book directory, skipping hidden entries and unreadable subtrees
    ///
    /// Symlink loops are reported by walkdir and skipped like any other
    /// unreadable entry.
    fn walk_book(&self, book_dir: &Path) -> Result<Vec<Track>> {
        let mut tracks = Vec::new();

        let walker = WalkDir::new(book_dir)
            .min_depth(1)
            .max_depth(self.config.max_depth.unwrap_or(usize::MAX))
            .follow_links(self.filter.follows_symlinks())
            .into_iter()
            .filter_entry(|e| !self.filter.is_hidden(e.file_name()));

        for entry in walker {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) if e.depth() == 0 => return Err(walk_error(e)),
                Err(e) => {
                    warn!("Skipping entry in {}: {}", book_dir.display(), e);
                    continue;
                }
            };

            let path = entry.path();
            if !entry.file_type().is_file() || !self.filter.is_audio(path) {
                continue;
            }

            let size = match entry.metadata() {
                Ok(md) => md.len(),
                Err(e) => {
                    warn!("Skipping {}: {}", path.display(), e);
                    continue;
                }
            };

            match path.strip_prefix(book_dir).ok().and_then(paths::to_slash) {
                Some(relative_path) => tracks.push(Track {
                    relative_path,
                    absolute_path: path.to_path_buf(),
                    size,
                }),
                None => warn!("Skipping non UTF-8 path: {}", path.display()),
            }
        }

        tracks.sort_by(|a, b| a.relative_path.cmp(&b.relative_path));
        Ok(tracks)
    }

    /// Lists non-hidden entry names of `dir` whose metadata satisfies `keep`
    fn list_entries<F>(&self, dir: &Path, keep: F) -> Result<Vec<String>>
    where
        F: Fn(&std::fs::FileType, &Path) -> bool,
    {
        let mut names: Vec<String> = self
            .walk_children(dir)?
            .into_iter()
            .filter(|entry| keep(&entry.file_type(), entry.path()))
            .filter_map(|entry| entry_name(entry.path()))
            .collect();

        names.sort();
        Ok(names)
    }

    /// Immediate, non-hidden children of `dir`
    fn walk_children(&self, dir: &Path) -> Result<Vec<walkdir::DirEntry>> {
        let mut children = Vec::new();

        let walker = WalkDir::new(dir)
            .min_depth(1)
            .max_depth(1)
            .follow_links(self.filter.follows_symlinks())
            .into_iter()
            .filter_entry(|e| !self.filter.is_hidden(e.file_name()));

        for entry in walker {
            match entry {
                Ok(entry) => children.push(entry),
                // Failing to open `dir` itself is an error; a bad child is skipped
                Err(e) if e.depth() == 0 => return Err(walk_error(e)),
                Err(e) => warn!("Skipping entry in {}: {}", dir.display(), e),
            }
        }

        Ok(children)
    }
}

fn walk_error(err: walkdir::Error) -> LibraryError {
    err.into_io_error()
        .unwrap_or_else(|| io::Error::other("directory walk failed"))
        .into()
}

fn entry_name(path: &Path) -> Option<String> {
    let name = path.file_name()?;
    match name.to_str() {
        Some(name) => Some(name.to_string()),
        None => {
            warn!("Skipping non UTF-8 name: {}", path.display());
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn create_test_audio_file(dir: &Path, name: &str) -> PathBuf {
        let path = dir.join(name);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, vec![0u8; 2048]).unwrap();
        path
    }

    #[test]
    fn test_scanner_creation() {
        let scanner = LibraryScanner::new("/test");
        assert_eq!(scanner.root(), Path::new("/test"));
        assert_eq!(scanner.config().max_depth, None);
        assert!(scanner.config().follow_symlinks);
    }

    #[test]
    fn test_scanner_config_builder() {
        let config = ScannerConfig::new("/test")
            .with_max_depth(5)
            .with_follow_symlinks(false)
            .with_extensions(vec!["flac".to_string()]);

        assert_eq!(config.max_depth, Some(5));
        assert!(!config.follow_symlinks);
        assert!(config.filter().is_audio(Path::new("a.flac")));
        assert!(!config.filter().is_audio(Path::new("a.mp3")));
    }

    #[test]
    fn test_config_from_library_section() {
        let section = LibraryConfig {
            root: PathBuf::from("/srv/books"),
            max_scan_depth: 3,
            ..Default::default()
        };

        let config = ScannerConfig::from(&section);
        assert_eq!(config.root, PathBuf::from("/srv/books"));
        assert_eq!(config.max_depth, Some(3));
    }

    #[test]
    fn test_list_authors_skips_files_and_hidden() -> Result<()> {
        let temp_dir = TempDir::new()?;
        fs::create_dir(temp_dir.path().join("Zola"))?;
        fs::create_dir(temp_dir.path().join("Austen"))?;
        fs::create_dir(temp_dir.path().join(".cache"))?;
        create_test_audio_file(temp_dir.path(), "stray.mp3");

        let authors = LibraryScanner::new(temp_dir.path()).list_authors()?;
        let names: Vec<_> = authors.iter().map(|a| a.name.as_str()).collect();
        assert_eq!(names, ["Austen", "Zola"]);

        Ok(())
    }

    #[test]
    fn test_list_authors_missing_root() {
        let result = LibraryScanner::new("/nonexistent/library/root").list_authors();
        assert!(matches!(result, Err(LibraryError::Io(_))));
    }

    #[test]
    fn test_list_authors_root_is_a_file() -> Result<()> {
        let temp_dir = TempDir::new()?;
        let root = create_test_audio_file(temp_dir.path(), "root.txt");

        let result = LibraryScanner::new(root).list_authors();
        assert!(matches!(result, Err(LibraryError::Io(_))));

        Ok(())
    }

    #[test]
    fn test_list_books_kinds() -> Result<()> {
        let temp_dir = TempDir::new()?;
        let author = temp_dir.path().join("Author");
        fs::create_dir_all(author.join("Saga"))?;
        create_test_audio_file(&author, "Novella.m4b");
        create_test_audio_file(&author, "cover.jpg");

        let books = LibraryScanner::new(temp_dir.path()).list_books("Author")?;
        assert_eq!(books.len(), 2);
        assert_eq!(books[0].name, "Novella.m4b");
        assert_eq!(books[0].kind, BookKind::File);
        assert_eq!(books[1].name, "Saga");
        assert_eq!(books[1].kind, BookKind::Directory);

        Ok(())
    }

    #[test]
    fn test_resolve_single_file_book() -> Result<()> {
        let temp_dir = TempDir::new()?;
        let path = create_test_audio_file(&temp_dir.path().join("Author"), "Novella.m4b");

        let tracks = LibraryScanner::new(temp_dir.path()).resolve_tracks("Author", "Novella.m4b")?;
        assert_eq!(tracks.len(), 1);
        assert_eq!(tracks[0].relative_path, "Novella.m4b");
        assert_eq!(tracks[0].absolute_path, path);
        assert_eq!(tracks[0].size, 2048);

        Ok(())
    }

    #[test]
    fn test_resolve_max_depth() -> Result<()> {
        let temp_dir = TempDir::new()?;
        let book = temp_dir.path().join("Author/Book");
        create_test_audio_file(&book, "01.mp3");
        create_test_audio_file(&book, "disc2/02.mp3");
        create_test_audio_file(&book, "disc2/extra/03.mp3");

        let config = ScannerConfig::new(temp_dir.path()).with_max_depth(2);
        let tracks = LibraryScanner::with_config(config).resolve_tracks("Author", "Book")?;
        let names: Vec<_> = tracks.iter().map(|t| t.relative_path.as_str()).collect();

        // depth 1 = files in the book directory, depth 2 = one level below
        assert_eq!(names, ["01.mp3", "disc2/02.mp3"]);

        Ok(())
    }

    #[test]
    fn test_zero_max_depth_is_unlimited() -> Result<()> {
        let temp_dir = TempDir::new()?;
        let book = temp_dir.path().join("A/B");
        create_test_audio_file(&book, "sub/x.mp3");
        create_test_audio_file(&book, "sub/deeper/y.mp3");

        let config = ScannerConfig::new(temp_dir.path()).with_max_depth(0);
        assert_eq!(config.max_depth, None);

        let tracks = LibraryScanner::with_config(config).resolve_tracks("A", "B")?;
        let names: Vec<_> = tracks.iter().map(|t| t.relative_path.as_str()).collect();
        assert_eq!(names, ["sub/deeper/y.mp3", "sub/x.mp3"]);

        Ok(())
    }

    #[cfg(unix)]
    #[test]
    fn test_unreadable_subdirectory_is_skipped() -> Result<()> {
        use std::os::unix::fs::PermissionsExt;

        let temp_dir = TempDir::new()?;
        let book = temp_dir.path().join("Author/Book");
        create_test_audio_file(&book, "01.mp3");
        create_test_audio_file(&book, "locked/02.mp3");
        fs::set_permissions(book.join("locked"), fs::Permissions::from_mode(0o000))?;

        // root ignores permission bits, so only check when the lock took effect
        if fs::read_dir(book.join("locked")).is_err() {
            let tracks = LibraryScanner::new(temp_dir.path()).resolve_tracks("Author", "Book")?;
            let names: Vec<_> = tracks.iter().map(|t| t.relative_path.as_str()).collect();
            assert_eq!(names, ["01.mp3"]);
        }

        fs::set_permissions(book.join("locked"), fs::Permissions::from_mode(0o755))?;
        Ok(())
    }

    #[test]
    fn test_resolve_rejects_traversal() {
        let temp_dir = TempDir::new().unwrap();
        let scanner = LibraryScanner::new(temp_dir.path());

        assert!(matches!(
            scanner.resolve_tracks("..", "Book"),
            Err(LibraryError::InvalidInput(_))
        ));
        assert!(matches!(
            scanner.resolve_tracks("Author", "../../etc"),
            Err(LibraryError::InvalidInput(_))
        ));
    }

    #[cfg(unix)]
    #[test]
    fn test_symlink_cycle_is_walked_once() -> Result<()> {
        let temp_dir = TempDir::new()?;
        let book = temp_dir.path().join("Author/Book");
        create_test_audio_file(&book, "01.mp3");
        std::os::unix::fs::symlink(&book, book.join("loop"))?;

        let tracks = LibraryScanner::new(temp_dir.path()).resolve_tracks("Author", "Book")?;
        assert_eq!(tracks.len(), 1);

        Ok(())
    }

    #[cfg(unix)]
    #[test]
    fn test_symlinks_ignored_when_disabled() -> Result<()> {
        let temp_dir = TempDir::new()?;
        let outside = temp_dir.path().join("outside");
        create_test_audio_file(&outside, "linked.mp3");
        let book = temp_dir.path().join("Author/Book");
        create_test_audio_file(&book, "01.mp3");
        std::os::unix::fs::symlink(&outside, book.join("extra"))?;

        let config = ScannerConfig::new(temp_dir.path()).with_follow_symlinks(false);
        let tracks = LibraryScanner::with_config(config).resolve_tracks("Author", "Book")?;
        let names: Vec<_> = tracks.iter().map(|t| t.relative_path.as_str()).collect();
        assert_eq!(names, ["01.mp3"]);

        let followed = LibraryScanner::new(temp_dir.path()).resolve_tracks("Author", "Book")?;
        let names: Vec<_> = followed.iter().map(|t| t.relative_path.as_str()).collect();
        assert_eq!(names, ["01.mp3", "extra/linked.mp3"]);

        Ok(())
    }
}
