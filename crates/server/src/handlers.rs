// crates/server/src/handlers.rs

use crate::error::{ServerError, ServerResult};
use crate::origin::RequestOrigin;
use crate::state::AppState;
use crate::views::{self, Format, View};
use axum::body::Body;
use axum::extract::{Path, Query, State};
use axum::http::header::{CONTENT_LENGTH, CONTENT_TYPE};
use axum::response::{IntoResponse, Response};
use bookcaster_feed::BaseUrlGenerator;
use log::info;
use serde::Deserialize;
use std::sync::Arc;

/// Query parameters shared by the catalog endpoints
#[derive(Debug, Default, Deserialize)]
pub struct CatalogQuery {
    pub author: Option<String>,
    pub book: Option<String>,
    pub file: Option<String>,
}

impl CatalogQuery {
    fn require(value: Option<&String>, name: &'static str) -> ServerResult<String> {
        value.cloned().ok_or(ServerError::MissingParameter(name))
    }

    fn author(&self) -> ServerResult<String> {
        Self::require(self.author.as_ref(), "author")
    }

    fn book(&self) -> ServerResult<String> {
        Self::require(self.book.as_ref(), "book")
    }

    fn file(&self) -> ServerResult<String> {
        Self::require(self.file.as_ref(), "file")
    }
}

/// `GET /`
pub async fn index(State(state): State<Arc<AppState>>) -> ServerResult<Response> {
    list_authors(&state, Format::Html).await
}

/// `GET /{view}[.{format}]`
pub async fn endpoint(
    State(state): State<Arc<AppState>>,
    Path(endpoint): Path<String>,
    Query(query): Query<CatalogQuery>,
    origin: RequestOrigin,
) -> ServerResult<Response> {
    let (view, format) =
        views::parse_endpoint(&endpoint).ok_or_else(|| ServerError::UnknownEndpoint(endpoint.clone()))?;

    match view {
        View::Authors => list_authors(&state, format).await,
        View::Books => list_books(&state, &query, format).await,
        View::Files => list_files(&state, &query, format).await,
        View::Feed => get_feed(&state, &query, origin).await,
    }
}

async fn list_authors(state: &Arc<AppState>, format: Format) -> ServerResult<Response> {
    info!("list-authors ({:?})", format);

    let scanner = state.scanner.clone();
    let authors = tokio::task::spawn_blocking(move || scanner.list_authors()).await??;
    let names: Vec<String> = authors.into_iter().map(|a| a.name).collect();

    views::authors(&names, format)
}

async fn list_books(state: &Arc<AppState>, query: &CatalogQuery, format: Format) -> ServerResult<Response> {
    let author = query.author()?;
    info!("list-books {:?} ({:?})", author, format);

    let scanner = state.scanner.clone();
    let lookup = author.clone();
    let books = tokio::task::spawn_blocking(move || scanner.list_books(&lookup)).await??;
    let names: Vec<String> = books.into_iter().map(|b| b.name).collect();

    views::books(&author, &names, format)
}

async fn list_files(state: &Arc<AppState>, query: &CatalogQuery, format: Format) -> ServerResult<Response> {
    let author = query.author()?;
    let book = query.book()?;
    info!("list-files {:?}/{:?} ({:?})", author, book, format);

    let scanner = state.scanner.clone();
    let (a, b) = (author.clone(), book.clone());
    let tracks = tokio::task::spawn_blocking(move || scanner.list_files(&a, &b)).await??;

    views::files(&author, &book, &tracks, format)
}

async fn get_feed(state: &Arc<AppState>, query: &CatalogQuery, origin: RequestOrigin) -> ServerResult<Response> {
    let author = query.author()?;
    let book = query.book()?;
    info!("get-feed {:?}/{:?} for {}://{}", author, book, origin.scheme, origin.host);

    let urls = BaseUrlGenerator::from_origin(&origin.scheme, &origin.host)?;
    let state = Arc::clone(state);
    let xml = tokio::task::spawn_blocking(move || -> ServerResult<String> {
        let tracks = state.scanner.resolve_tracks(&author, &book)?;
        let feed = state.feed_builder.build_feed(&author, &book, &tracks, &urls)?;
        Ok(feed.to_xml()?)
    })
    .await??;

    Ok(views::feed(xml))
}

/// `GET /audio?author=&book=&file=`
pub async fn audio(
    State(state): State<Arc<AppState>>,
    Query(query): Query<CatalogQuery>,
) -> ServerResult<Response> {
    let author = query.author()?;
    let book = query.book()?;
    let file = query.file()?;
    info!("get-audio {:?}/{:?}/{:?}", author, book, file);

    let streamer = state.streamer.clone();
    let resolved = tokio::task::spawn_blocking(move || streamer.resolve(&author, &book, &file)).await??;
    let stream = state.streamer.open(&resolved).await?;

    let headers = [
        (CONTENT_TYPE, stream.mime_type().to_string()),
        (CONTENT_LENGTH, stream.size().to_string()),
    ];
    Ok((headers, Body::from_stream(stream.into_reader_stream())).into_response())
}
