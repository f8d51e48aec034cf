//! Bookcaster library access
//!
//! Read-only view of an audiobook tree laid out as `author/book/file`:
//! listing authors and books, resolving the ordered tracks of a book, and
//! opening single files for streaming.

pub mod error;
pub mod filter;
pub mod model;
mod paths;
pub mod scanner;
pub mod streamer;

pub use error::{LibraryError, LibraryResult};
pub use filter::PathFilter;
pub use model::{Author, Book, BookKind, ResolvedFile, Track};
pub use scanner::{LibraryScanner, ScannerConfig};
pub use streamer::{AudioStream, AudioStreamer};
