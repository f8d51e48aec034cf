// crates/feed/src/feed.rs
//! Feed data structures

use bookcaster_media_formats::MimeType;
use chrono::NaiveDateTime;

/// A podcast channel for one book
#[derive(Debug, Clone)]
pub struct Feed {
    /// Channel title, `"{author} - {book}"`
    pub title: String,
    /// Episodes, most recent first
    pub items: Vec<FeedItem>,
}

impl Feed {
    /// Creates an empty feed
    pub fn new(title: String) -> Self {
        Self {
            title,
            items: Vec::new(),
        }
    }

    /// Returns the number of items in the feed
    pub fn item_count(&self) -> usize {
        self.items.len()
    }

    /// Returns true if the feed has no items
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Adds an item to the feed
    pub fn add_item(&mut self, item: FeedItem) {
        self.items.push(item);
    }
}

/// One episode, backed by one track
#[derive(Debug, Clone)]
pub struct FeedItem {
    /// Track path relative to its book
    pub title: String,
    pub author: String,
    pub description: String,
    /// Absolute audio URL
    pub guid: String,
    pub enclosure: Enclosure,
    /// Synthetic publication date
    pub published: NaiveDateTime,
}

/// Downloadable media attached to an item
#[derive(Debug, Clone)]
pub struct Enclosure {
    /// URL to the media file
    pub url: String,
    /// File size in bytes
    pub length: u64,
    /// MIME type (e.g., "audio/mpeg")
    pub mime_type: MimeType,
}
