// crates/server/src/state.rs

use bookcaster_config::Config;
use bookcaster_feed::FeedBuilder;
use bookcaster_library::{AudioStreamer, LibraryScanner, ScannerConfig};
use bookcaster_media_formats::MimeResolver;
use std::net::IpAddr;
use std::sync::Arc;

/// Components shared by all handlers; read-only after startup
#[derive(Debug, Clone)]
pub struct AppState {
    pub scanner: LibraryScanner,
    pub streamer: AudioStreamer,
    pub feed_builder: FeedBuilder,
    /// Peers whose `X-Forwarded-*` headers are honored
    pub trusted_proxies: Vec<IpAddr>,
}

impl AppState {
    pub fn new(config: &Config) -> Self {
        let scanner_config = ScannerConfig::from(&config.library);
        let resolver = MimeResolver::default();

        Self {
            scanner: LibraryScanner::with_config(scanner_config.clone()),
            streamer: AudioStreamer::new(&scanner_config, resolver.clone()),
            feed_builder: FeedBuilder::from(&config.feed).with_resolver(resolver),
            trusted_proxies: config.server.trusted_proxy_addrs(),
        }
    }

    pub fn shared(config: &Config) -> Arc<Self> {
        Arc::new(Self::new(config))
    }
}
