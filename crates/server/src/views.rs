// crates/server/src/views.rs
//! Rendering of catalog listings as HTML, JSON and XML

use crate::error::ServerError;
use axum::http::header::CONTENT_TYPE;
use axum::response::{Html, IntoResponse, Response};
use axum::Json;
use bookcaster_library::Track;
use quick_xml::escape::escape;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;
use serde::Serialize;

pub const XML_CONTENT_TYPE: &str = "text/xml";

/// Catalog operation selected by the request path
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    Authors,
    Books,
    Files,
    Feed,
}

/// Response representation selected by the path suffix
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Format {
    #[default]
    Html,
    Json,
    Xml,
}

/// Splits an endpoint such as `books.json` into view and format
///
/// A missing suffix selects HTML. Returns `None` for unknown names.
pub fn parse_endpoint(endpoint: &str) -> Option<(View, Format)> {
    let (name, suffix) = match endpoint.split_once('.') {
        Some((name, suffix)) => (name, Some(suffix)),
        None => (endpoint, None),
    };

    let view = match name {
        "authors" => View::Authors,
        "books" => View::Books,
        "files" => View::Files,
        "feed" => View::Feed,
        _ => return None,
    };

    let format = match suffix {
        None | Some("html") => Format::Html,
        Some("json") => Format::Json,
        Some("xml") => Format::Xml,
        Some(_) => return None,
    };

    Some((view, format))
}

/// Entry of the JSON file listing
#[derive(Debug, Serialize)]
pub struct FileEntry<'a> {
    pub filename: &'a str,
    pub filesize: u64,
}

pub fn authors(names: &[String], format: Format) -> Result<Response, ServerError> {
    match format {
        Format::Json => Ok(Json(names).into_response()),
        Format::Xml => xml_list("authors", "author", names),
        Format::Html => {
            let items: Vec<String> = names
                .iter()
                .map(|author| {
                    format!(
                        r#"<li><a href="books.html?{}">{}</a></li>"#,
                        escape(query(&[("author", author.as_str())]).as_str()),
                        escape(author.as_str())
                    )
                })
                .collect();
            Ok(html_page("Authors", &[], &items))
        }
    }
}

pub fn books(author: &str, names: &[String], format: Format) -> Result<Response, ServerError> {
    match format {
        Format::Json => Ok(Json(names).into_response()),
        Format::Xml => xml_list("books", "book", names),
        Format::Html => {
            let items: Vec<String> = names
                .iter()
                .map(|book| {
                    let params = query(&[("author", author), ("book", book.as_str())]);
                    format!(
                        r#"<li><a href="files.html?{params}">{}</a> (<a href="feed.xml?{params}">feed</a>)</li>"#,
                        escape(book.as_str()),
                        params = escape(params.as_str())
                    )
                })
                .collect();
            let links = [r#"<a href="authors.html">Authors</a>"#.to_string()];
            Ok(html_page(author, &links, &items))
        }
    }
}

pub fn files(author: &str, book: &str, tracks: &[Track], format: Format) -> Result<Response, ServerError> {
    match format {
        Format::Json => {
            let entries: Vec<FileEntry<'_>> = tracks
                .iter()
                .map(|t| FileEntry {
                    filename: &t.relative_path,
                    filesize: t.size,
                })
                .collect();
            Ok(Json(entries).into_response())
        }
        Format::Xml => Err(ServerError::UnknownEndpoint("files.xml".to_string())),
        Format::Html => {
            let items: Vec<String> = tracks
                .iter()
                .map(|track| {
                    let params = query(&[
                        ("author", author),
                        ("book", book),
                        ("file", track.relative_path.as_str()),
                    ]);
                    format!(
                        r#"<li><a href="audio?{}">{}</a> {}</li>"#,
                        escape(params.as_str()),
                        escape(track.relative_path.as_str()),
                        human_filesize(track.size)
                    )
                })
                .collect();
            let book_params = query(&[("author", author), ("book", book)]);
            let links = [
                format!(
                    r#"<a href="books.html?{}">{}</a>"#,
                    escape(query(&[("author", author)]).as_str()),
                    escape(author)
                ),
                format!(r#"<a href="feed.xml?{}">Podcast feed</a>"#, escape(book_params.as_str())),
            ];
            Ok(html_page(&format!("{} - {}", author, book), &links, &items))
        }
    }
}

/// An RSS document with the feed content type
pub fn feed(xml: String) -> Response {
    ([(CONTENT_TYPE, XML_CONTENT_TYPE)], xml).into_response()
}

/// Formats a byte count the way the listing pages show it
///
/// Base 1024 with two decimals from one kilobyte up, e.g. `1.50MB`.
pub fn human_filesize(size: u64) -> String {
    const KB: u64 = 1 << 10;
    const MB: u64 = 1 << 20;
    const GB: u64 = 1 << 30;

    let (divisor, unit) = match size {
        s if s >= GB => (GB, "GB"),
        s if s >= MB => (MB, "MB"),
        s if s >= KB => (KB, "KB"),
        s => return format!("{} bytes", group_thousands(&s.to_string())),
    };

    let formatted = format!("{:.2}", size as f64 / divisor as f64);
    let (whole, fraction) = formatted.split_once('.').unwrap_or((formatted.as_str(), "00"));
    format!("{}.{}{}", group_thousands(whole), fraction, unit)
}

fn group_thousands(digits: &str) -> String {
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }
    grouped
}

fn query(pairs: &[(&str, &str)]) -> String {
    url::form_urlencoded::Serializer::new(String::new())
        .extend_pairs(pairs)
        .finish()
}

fn html_page(title: &str, links: &[String], items: &[String]) -> Response {
    let title = escape(title);
    let nav = if links.is_empty() {
        String::new()
    } else {
        format!("<nav>{}</nav>\n", links.join(" | "))
    };

    Html(format!(
        "<!DOCTYPE html>\n<html>\n<head><meta charset=\"utf-8\"><title>{title}</title></head>\n<body>\n{nav}<h1>{title}</h1>\n<ul>\n{}\n</ul>\n</body>\n</html>\n",
        items.join("\n"),
    ))
    .into_response()
}

/// `<root><child>name</child>…</root>`
fn xml_list(root: &str, child: &str, names: &[String]) -> Result<Response, ServerError> {
    let mut writer = Writer::new_with_indent(Vec::new(), b' ', 2);

    writer
        .write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))
        .map_err(xml_error)?;
    writer
        .write_event(Event::Start(BytesStart::new(root)))
        .map_err(xml_error)?;
    for name in names {
        writer
            .create_element(child)
            .write_text_content(BytesText::new(name))
            .map_err(xml_error)?;
    }
    writer
        .write_event(Event::End(BytesEnd::new(root)))
        .map_err(xml_error)?;

    let body = String::from_utf8(writer.into_inner()).map_err(xml_error)?;
    Ok(([(CONTENT_TYPE, XML_CONTENT_TYPE)], body).into_response())
}

fn xml_error(err: impl std::fmt::Display) -> ServerError {
    ServerError::Internal(err.to_string())
}
