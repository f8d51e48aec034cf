// FILE: src/detection.rs
// ============================================================================

use crate::{AudioFormat, FormatError, FormatResult, MimeType};
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// Number of leading bytes inspected
const SNIFF_LEN: usize = 512;

/// Content sniffer working on the leading bytes of a file
#[derive(Debug, Clone, Copy, Default)]
pub struct FormatDetector;

impl FormatDetector {
    pub fn new() -> Self {
        Self
    }

    /// Sniffs the MIME type of a file from its content only
    ///
    /// The file name plays no part here; extension-based corrections are the
    /// job of [`crate::MimeResolver`].
    pub fn sniff_file(&self, path: &Path) -> FormatResult<MimeType> {
        let mut file =
            File::open(path).map_err(|e| FormatError::from_io(path.to_path_buf(), &e))?;

        let mut buffer = Vec::with_capacity(SNIFF_LEN);
        file.by_ref()
            .take(SNIFF_LEN as u64)
            .read_to_end(&mut buffer)
            .map_err(|e| FormatError::from_io(path.to_path_buf(), &e))?;

        Ok(self.sniff_bytes(&buffer))
    }

    /// Sniffs the MIME type of an in-memory header
    pub fn sniff_bytes(&self, header: &[u8]) -> MimeType {
        if header.is_empty() {
            return MimeType::EMPTY;
        }

        if let Some(format) = detect_audio(header) {
            return format.mime_type();
        }

        if is_mp4_container(header) {
            return MimeType::VIDEO_MP4;
        }

        if looks_like_text(header) {
            return MimeType::TEXT_PLAIN;
        }

        MimeType::OCTET_STREAM
    }
}

/// Detects an audio format from magic bytes
fn detect_audio(buffer: &[u8]) -> Option<AudioFormat> {
    if buffer.starts_with(b"ID3") {
        return Some(AudioFormat::Mp3);
    }

    if let [0xFF, second, ..] = buffer {
        // 11-bit frame sync; layer bits 00 mean ADTS AAC rather than MPEG audio
        if second & 0xE0 == 0xE0 {
            return if second & 0x06 == 0 {
                Some(AudioFormat::Aac)
            } else {
                Some(AudioFormat::Mp3)
            };
        }
    }

    if buffer.starts_with(b"fLaC") {
        return Some(AudioFormat::Flac);
    }

    if buffer.starts_with(b"OggS") {
        return Some(AudioFormat::Ogg);
    }

    if buffer.len() >= 12 && buffer.starts_with(b"RIFF") && &buffer[8..12] == b"WAVE" {
        return Some(AudioFormat::Wav);
    }

    if buffer.len() >= 12
        && buffer.starts_with(b"FORM")
        && (&buffer[8..12] == b"AIFF" || &buffer[8..12] == b"AIFC")
    {
        return Some(AudioFormat::Aiff);
    }

    if is_mp4_container(buffer) {
        return match &buffer[8..12] {
            b"M4A " | b"M4P " => Some(AudioFormat::M4a),
            b"M4B " => Some(AudioFormat::M4b),
            _ => None,
        };
    }

    if buffer.starts_with(&[0x1A, 0x45, 0xDF, 0xA3]) {
        return Some(AudioFormat::Mka);
    }

    None
}

fn is_mp4_container(buffer: &[u8]) -> bool {
    buffer.len() >= 12 && &buffer[4..8] == b"ftyp"
}

fn looks_like_text(buffer: &[u8]) -> bool {
    let valid = match std::str::from_utf8(buffer) {
        Ok(_) => true,
        // A multi-byte sequence cut off by the sniff window is still text
        Err(e) => e.error_len().is_none(),
    };

    valid
        && buffer
            .iter()
            .all(|&b| b >= 0x20 || matches!(b, b'\n' | b'\r' | b'\t' | 0x0C))
}
