// FILE: src/resolver.rs
// ============================================================================

//! MIME resolution: content sniffing plus extension override rules

use crate::{FormatDetector, FormatResult, MimeType};
use std::path::Path;

/// Replaces a sniffed type when the file extension matches
///
/// Rules are checked in order and the first match wins.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OverrideRule {
    /// Type the sniffer must have reported
    pub sniffed: MimeType,
    /// Extension (case-insensitive, without dot) the path must carry
    pub extension: String,
    /// Type reported instead
    pub replacement: MimeType,
}

impl OverrideRule {
    pub fn new(sniffed: MimeType, extension: impl Into<String>, replacement: MimeType) -> Self {
        Self {
            sniffed,
            extension: extension.into().trim_start_matches('.').to_ascii_lowercase(),
            replacement,
        }
    }

    fn matches(&self, sniffed: &MimeType, path: &Path) -> bool {
        &self.sniffed == sniffed
            && path
                .extension()
                .and_then(|e| e.to_str())
                .is_some_and(|e| e.eq_ignore_ascii_case(&self.extension))
    }
}

/// Determines the content type of library files
#[derive(Debug, Clone)]
pub struct MimeResolver {
    detector: FormatDetector,
    rules: Vec<OverrideRule>,
}

impl MimeResolver {
    /// Resolver with the default rule table
    ///
    /// MP3 files without an ID3 tag and with leading junk sniff as generic
    /// binary, so `.mp3` + `application/octet-stream` becomes `audio/mp3`.
    pub fn new() -> Self {
        Self::with_rules(vec![OverrideRule::new(
            MimeType::OCTET_STREAM,
            "mp3",
            MimeType::AUDIO_MP3,
        )])
    }

    /// Resolver with an explicit rule table
    pub fn with_rules(rules: Vec<OverrideRule>) -> Self {
        Self {
            detector: FormatDetector::new(),
            rules,
        }
    }

    /// Appends a rule after the existing ones
    pub fn with_rule(mut self, rule: OverrideRule) -> Self {
        self.rules.push(rule);
        self
    }

    pub fn rules(&self) -> &[OverrideRule] {
        &self.rules
    }

    /// Resolves the MIME type of the file at `path`
    pub fn resolve(&self, path: &Path) -> FormatResult<MimeType> {
        let sniffed = self.detector.sniff_file(path)?;
        Ok(self.apply_rules(sniffed, path))
    }

    /// Applies the override table to an already sniffed type
    pub fn apply_rules(&self, sniffed: MimeType, path: &Path) -> MimeType {
        match self.rules.iter().find(|rule| rule.matches(&sniffed, path)) {
            Some(rule) => {
                log::debug!(
                    "Overriding {} with {} for {}",
                    sniffed,
                    rule.replacement,
                    path.display()
                );
                rule.replacement.clone()
            }
            None => sniffed,
        }
    }
}

impl Default for MimeResolver {
    fn default() -> Self {
        Self::new()
    }
}
