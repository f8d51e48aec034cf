// crates/feed/src/writer.rs
//! RSS 2.0 serialization

use crate::error::{FeedError, FeedResult};
use crate::feed::{Feed, FeedItem};
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;

/// Namespace of the iTunes podcast extensions
pub const ITUNES_NAMESPACE: &str = "http://www.itunes.com/dtds/podcast-1.0.dtd";

/// `pubDate` layout, e.g. `Fri, 10 Jan 2020 00:00:00`
pub const PUB_DATE_FORMAT: &str = "%a, %-d %b %Y %H:%M:%S";

type XmlWriter = Writer<Vec<u8>>;

impl Feed {
    /// Serializes the feed as an RSS 2.0 document
    ///
    /// Text and attribute values are escaped by the writer.
    pub fn to_xml(&self) -> FeedResult<String> {
        let mut writer = Writer::new_with_indent(Vec::new(), b' ', 2);

        write(&mut writer, Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;

        let mut rss = BytesStart::new("rss");
        rss.push_attribute(("version", "2.0"));
        rss.push_attribute(("xmlns:itunes", ITUNES_NAMESPACE));
        write(&mut writer, Event::Start(rss))?;

        write(&mut writer, Event::Start(BytesStart::new("channel")))?;
        write_text_element(&mut writer, "title", &self.title)?;

        for item in &self.items {
            write_item(&mut writer, item)?;
        }

        write(&mut writer, Event::End(BytesEnd::new("channel")))?;
        write(&mut writer, Event::End(BytesEnd::new("rss")))?;

        String::from_utf8(writer.into_inner()).map_err(|e| FeedError::Xml(e.to_string()))
    }
}

fn write_item(writer: &mut XmlWriter, item: &FeedItem) -> FeedResult<()> {
    write(writer, Event::Start(BytesStart::new("item")))?;

    write_text_element(writer, "title", &item.title)?;
    write_text_element(writer, "author", &item.author)?;
    write_text_element(writer, "description", &item.description)?;
    write_text_element(writer, "guid", &item.guid)?;

    let length = item.enclosure.length.to_string();
    let mut enclosure = BytesStart::new("enclosure");
    enclosure.push_attribute(("url", item.enclosure.url.as_str()));
    enclosure.push_attribute(("length", length.as_str()));
    enclosure.push_attribute(("type", item.enclosure.mime_type.as_str()));
    write(writer, Event::Empty(enclosure))?;

    let published = item.published.format(PUB_DATE_FORMAT).to_string();
    write_text_element(writer, "pubDate", &published)?;

    write(writer, Event::End(BytesEnd::new("item")))
}

fn write_text_element(writer: &mut XmlWriter, name: &str, text: &str) -> FeedResult<()> {
    write(writer, Event::Start(BytesStart::new(name)))?;
    write(writer, Event::Text(BytesText::new(text)))?;
    write(writer, Event::End(BytesEnd::new(name)))
}

fn write(writer: &mut XmlWriter, event: Event<'_>) -> FeedResult<()> {
    writer
        .write_event(event)
        .map_err(|e| FeedError::Xml(e.to_string()))
}
