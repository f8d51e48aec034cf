// crates/feed/src/audio_url.rs
//! Absolute URLs for the audio endpoint

use crate::error::{FeedError, FeedResult};
use url::Url;

/// Produces the URL a podcast client fetches a track from
pub trait AudioUrlGenerator {
    fn audio_url(&self, author: &str, book: &str, file: &str) -> String;
}

/// Builds `{base}/audio?author=…&book=…&file=…` with a form-urlencoded query
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BaseUrlGenerator {
    endpoint: Url,
}

impl BaseUrlGenerator {
    /// Creates a generator from an absolute base such as `https://example.com`
    ///
    /// A path on the base is kept as a prefix: `http://host/books` serves
    /// audio from `http://host/books/audio`.
    pub fn new(base: &str) -> FeedResult<Self> {
        let mut base = Url::parse(base)?;
        if base.cannot_be_a_base() {
            return Err(FeedError::InvalidUrl(format!("{} cannot be a base", base)));
        }

        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }
        base.set_query(None);
        base.set_fragment(None);

        Ok(Self {
            endpoint: base.join("audio")?,
        })
    }

    /// Creates a generator from a scheme and a `Host` header value
    pub fn from_origin(scheme: &str, host: &str) -> FeedResult<Self> {
        Self::new(&format!("{}://{}/", scheme, host))
    }

    /// The audio endpoint without query
    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

impl AudioUrlGenerator for BaseUrlGenerator {
    fn audio_url(&self, author: &str, book: &str, file: &str) -> String {
        let mut url = self.endpoint.clone();
        url.query_pairs_mut()
            .append_pair("author", author)
            .append_pair("book", book)
            .append_pair("file", file);
        url.into()
    }
}
