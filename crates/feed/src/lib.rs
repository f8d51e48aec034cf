// crates/feed/src/lib.rs
//! Podcast RSS feeds for audiobooks
//!
//! Each book becomes one RSS 2.0 channel whose items are the book's tracks
//! in order, dated one day apart so that podcast clients list them in
//! playback order.
//!
//! # Example
//!
//! ```rust
//! use bookcaster_feed::{Feed, FeedItem, Enclosure};
//! use bookcaster_media_formats::MimeType;
//! use chrono::NaiveDate;
//!
//! let mut feed = Feed::new("Jane Austen - Emma".to_string());
//! feed.add_item(FeedItem {
//!     title: "01.mp3".to_string(),
//!     author: "Jane Austen".to_string(),
//!     description: "Jane Austen - Emma - 01.mp3".to_string(),
//!     guid: "http://localhost:8080/audio?author=Jane+Austen&book=Emma&file=01.mp3".to_string(),
//!     enclosure: Enclosure {
//!         url: "http://localhost:8080/audio?author=Jane+Austen&book=Emma&file=01.mp3".to_string(),
//!         length: 1024,
//!         mime_type: MimeType::from("audio/mpeg"),
//!     },
//!     published: NaiveDate::from_ymd_opt(2015, 1, 1).unwrap().and_hms_opt(0, 0, 0).unwrap(),
//! });
//!
//! let xml = feed.to_xml().expect("Failed to write feed");
//! assert!(xml.contains("<pubDate>Thu, 1 Jan 2015 00:00:00</pubDate>"));
//! ```

mod builder;
mod error;
mod feed;
mod audio_url;
mod writer;

pub use builder::FeedBuilder;
pub use error::{FeedError, FeedResult};
pub use feed::{Enclosure, Feed, FeedItem};
pub use audio_url::{AudioUrlGenerator, BaseUrlGenerator};
pub use writer::{ITUNES_NAMESPACE, PUB_DATE_FORMAT};
