//! Content-type detection for audiobook files.
//!
//! [`FormatDetector`] sniffs magic bytes; [`MimeResolver`] layers an ordered
//! table of extension overrides on top of it.

mod detection;
mod error;
mod format;
mod mime;
mod resolver;

pub use detection::FormatDetector;
pub use error::{FormatError, FormatResult};
pub use format::AudioFormat;
pub use mime::MimeType;
pub use resolver::{MimeResolver, OverrideRule};

pub mod prelude {
    pub use crate::{AudioFormat, FormatDetector, FormatError, FormatResult, MimeResolver, MimeType};
}
