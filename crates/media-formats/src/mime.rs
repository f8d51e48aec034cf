// FILE: src/mime.rs
// ============================================================================

use crate::AudioFormat;
use std::borrow::Cow;
use std::fmt;

/// A MIME type string such as `audio/mpeg`
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MimeType(Cow<'static, str>);

impl MimeType {
    /// Generic binary content; what sniffing reports when nothing matches
    pub const OCTET_STREAM: MimeType = MimeType(Cow::Borrowed("application/octet-stream"));
    /// Zero-length file
    pub const EMPTY: MimeType = MimeType(Cow::Borrowed("application/x-empty"));
    /// Printable text
    pub const TEXT_PLAIN: MimeType = MimeType(Cow::Borrowed("text/plain"));
    /// MPEG-4 container without an audio brand
    pub const VIDEO_MP4: MimeType = MimeType(Cow::Borrowed("video/mp4"));
    /// Type forced onto `.mp3` files that sniff as generic binary
    pub const AUDIO_MP3: MimeType = MimeType(Cow::Borrowed("audio/mp3"));

    /// Creates a MIME type from any string; values are lowercased
    pub fn new(value: impl Into<String>) -> Self {
        MimeType(Cow::Owned(value.into().trim().to_ascii_lowercase()))
    }

    /// Returns the MIME type for a given audio format
    pub fn from_format(format: AudioFormat) -> Self {
        let primary = match format {
            AudioFormat::Mp3 => "audio/mpeg",
            AudioFormat::Aac => "audio/aac",
            AudioFormat::M4a => "audio/x-m4a",
            AudioFormat::M4b => "audio/mp4",
            AudioFormat::Flac => "audio/flac",
            AudioFormat::Ogg => "audio/ogg",
            AudioFormat::Wav => "audio/x-wav",
            AudioFormat::Aiff => "audio/x-aiff",
            AudioFormat::Mka => "audio/x-matroska",
        };
        MimeType(Cow::Borrowed(primary))
    }

    /// Returns the MIME type string
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns true for `audio/*` types
    pub fn is_audio(&self) -> bool {
        self.0.starts_with("audio/")
    }
}

impl fmt::Display for MimeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&'static str> for MimeType {
    fn from(value: &'static str) -> Self {
        MimeType(Cow::Borrowed(value))
    }
}
