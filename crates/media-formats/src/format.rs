//! Audio formats recognizable from their leading bytes

use crate::MimeType;
use std::fmt;

/// Audio formats the sniffer can identify
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AudioFormat {
    /// MP3 - MPEG Audio Layer 3 (ID3 tag or bare frame sync)
    Mp3,
    /// AAC in an ADTS stream
    Aac,
    /// AAC in an MPEG-4 container with an `M4A ` brand
    M4a,
    /// AAC in an MPEG-4 container with an `M4B ` (audiobook) brand
    M4b,
    /// FLAC - Free Lossless Audio Codec
    Flac,
    /// Any Ogg stream (Vorbis, Opus, ...)
    Ogg,
    /// WAV - Waveform Audio File Format
    Wav,
    /// AIFF - Audio Interchange File Format
    Aiff,
    /// MKA - Matroska Audio
    Mka,
}

impl AudioFormat {
    /// Returns the MIME type reported for this format
    pub fn mime_type(&self) -> MimeType {
        MimeType::from_format(*self)
    }

    /// Returns the format name
    pub fn name(&self) -> &'static str {
        match self {
            Self::Mp3 => "MP3",
            Self::Aac => "AAC (ADTS)",
            Self::M4a => "AAC (M4A)",
            Self::M4b => "AAC (M4B)",
            Self::Flac => "FLAC",
            Self::Ogg => "Ogg",
            Self::Wav => "WAV",
            Self::Aiff => "AIFF",
            Self::Mka => "Matroska Audio",
        }
    }
}

impl fmt::Display for AudioFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}
