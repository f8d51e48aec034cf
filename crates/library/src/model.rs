// FILE: crates/library/src/model.rs
//! Catalog entities derived from the directory tree

use bookcaster_media_formats::MimeType;
use std::path::PathBuf;

/// A top-level directory of the library
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Author {
    pub name: String,
}

/// How a book is stored on disk
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BookKind {
    /// A directory of audio files, possibly nested
    Directory,
    /// A single audio file directly inside the author directory
    File,
}

/// A book of one author
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Book {
    pub author: String,
    pub name: String,
    pub kind: BookKind,
}

/// One audio file of a book
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Track {
    /// Path relative to the book directory, `/`-separated
    ///
    /// For a single-file book this is the file name itself.
    pub relative_path: String,
    pub absolute_path: PathBuf,
    /// Size in bytes
    pub size: u64,
}

/// A file ready to be streamed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedFile {
    pub absolute_path: PathBuf,
    pub mime_type: MimeType,
    pub size: u64,
}
