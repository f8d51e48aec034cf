// crates/feed/src/builder.rs
//! Feed synthesis from resolved tracks

use crate::error::{FeedError, FeedResult};
use crate::feed::{Enclosure, Feed, FeedItem};
use crate::audio_url::AudioUrlGenerator;
use bookcaster_config::FeedConfig;
use bookcaster_library::Track;
use bookcaster_media_formats::MimeResolver;
use chrono::{Days, NaiveDateTime};
use log::debug;

/// Turns the ordered tracks of a book into a podcast feed
///
/// Item `i` is dated `start_date - i days`, so podcast clients sorting by
/// date newest-first play the book in order.
#[derive(Debug, Clone)]
pub struct FeedBuilder {
    start_date: NaiveDateTime,
    resolver: MimeResolver,
}

impl FeedBuilder {
    pub fn new(start_date: NaiveDateTime) -> Self {
        Self {
            start_date,
            resolver: MimeResolver::default(),
        }
    }

    pub fn with_resolver(mut self, resolver: MimeResolver) -> Self {
        self.resolver = resolver;
        self
    }

    pub fn start_date(&self) -> NaiveDateTime {
        self.start_date
    }

    /// Builds the feed; blocking, since every track is sniffed for its type
    pub fn build_feed(
        &self,
        author: &str,
        book: &str,
        tracks: &[Track],
        urls: &dyn AudioUrlGenerator,
    ) -> FeedResult<Feed> {
        let mut feed = Feed::new(format!("{} - {}", author, book));

        for (index, track) in tracks.iter().enumerate() {
            let audio_url = urls.audio_url(author, book, &track.relative_path);
            let mime_type = self.resolver.resolve(&track.absolute_path)?;

            feed.add_item(FeedItem {
                title: track.relative_path.clone(),
                author: author.to_string(),
                description: format!("{} - {} - {}", author, book, track.relative_path),
                guid: audio_url.clone(),
                enclosure: Enclosure {
                    url: audio_url,
                    length: track.size,
                    mime_type,
                },
                published: self.publication_date(index)?,
            });
        }

        debug!("Built feed '{}' with {} items", feed.title, feed.item_count());
        Ok(feed)
    }

    /// Date of the item at `index`, one day earlier per position
    pub fn publication_date(&self, index: usize) -> FeedResult<NaiveDateTime> {
        self.start_date
            .checked_sub_days(Days::new(index as u64))
            .ok_or_else(|| {
                FeedError::InvalidDate(format!(
                    "{} minus {} days is out of range",
                    self.start_date, index
                ))
            })
    }
}

impl From<&FeedConfig> for FeedBuilder {
    fn from(config: &FeedConfig) -> Self {
        Self::new(config.start_date)
    }
}

impl Default for FeedBuilder {
    fn default() -> Self {
        Self::from(&FeedConfig::default())
    }
}
