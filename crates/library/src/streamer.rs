// FILE: crates/library/src/streamer.rs

use crate::error::{LibraryError, Result};
use crate::filter::PathFilter;
use crate::model::ResolvedFile;
use crate::paths;
use crate::scanner::ScannerConfig;
use bookcaster_media_formats::{MimeResolver, MimeType};
use log::{debug, warn};
use std::path::PathBuf;
use tokio::fs::File;
use tokio_util::io::ReaderStream;

/// Resolves `author/book/file` requests to audio files and opens them
#[derive(Debug, Clone)]
pub struct AudioStreamer {
    root: PathBuf,
    filter: PathFilter,
    resolver: MimeResolver,
}

impl AudioStreamer {
    pub fn new(config: &ScannerConfig, resolver: MimeResolver) -> Self {
        Self {
            root: config.root.clone(),
            filter: config.filter(),
            resolver,
        }
    }

    /// Finds the file to stream with its type and size
    ///
    /// When the book is a directory the target is `file` inside it. When the
    /// book is itself an audio file it is the target and `file` is ignored.
    /// Blocking; run it off the async executor.
    pub fn resolve(&self, author: &str, book: &str, file: &str) -> Result<ResolvedFile> {
        let book_path = self
            .root
            .join(paths::single_segment(author, "author")?)
            .join(paths::single_segment(book, "book")?);

        let book_metadata = self
            .filter
            .stat(&book_path)
            .map_err(|e| LibraryError::from_stat(&format!("book {}/{}", author, book), e))?;

        let target = if book_metadata.is_dir() {
            book_path.join(paths::relative_file(file)?)
        } else if book_metadata.is_file() && self.filter.is_audio(&book_path) {
            book_path
        } else {
            return Err(LibraryError::not_found(format!("book {}/{}", author, book)));
        };

        let what = format!("file {}/{}/{}", author, book, file);
        let metadata = self
            .filter
            .stat(&target)
            .map_err(|e| LibraryError::from_stat(&what, e))?;
        if !metadata.is_file() {
            return Err(LibraryError::not_found(what));
        }

        let mime_type = self.resolver.resolve(&target)?;
        debug!("Resolved {} as {} ({} bytes)", target.display(), mime_type, metadata.len());
        if !mime_type.is_audio() {
            warn!("Serving {} with non-audio type {}", target.display(), mime_type);
        }

        Ok(ResolvedFile {
            absolute_path: target,
            mime_type,
            size: metadata.len(),
        })
    }

    /// Opens a resolved file for sequential reading
    pub async fn open(&self, resolved: &ResolvedFile) -> Result<AudioStream> {
        let file = File::open(&resolved.absolute_path)
            .await
            .map_err(|e| LibraryError::from_stat(&resolved.absolute_path.display().to_string(), e))?;

        Ok(AudioStream {
            file,
            mime_type: resolved.mime_type.clone(),
            size: resolved.size,
        })
    }
}

/// An open audio file
///
/// The file handle is closed when the stream, or the body built from it, is
/// dropped.
#[derive(Debug)]
pub struct AudioStream {
    file: File,
    mime_type: MimeType,
    size: u64,
}

impl AudioStream {
    pub fn mime_type(&self) -> &MimeType {
        &self.mime_type
    }

    pub fn size(&self) -> u64 {
        self.size
    }

    /// Chunked byte stream over the whole file
    pub fn into_reader_stream(self) -> ReaderStream<File> {
        ReaderStream::new(self.file)
    }

    pub fn into_file(self) -> File {
        self.file
    }
}
