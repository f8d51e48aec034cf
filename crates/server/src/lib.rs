// crates/server/src/lib.rs
//! HTTP front end for a Bookcaster library
//!
//! Routes:
//!
//! - `GET /` and `GET /authors[.html|.json|.xml]`: authors
//! - `GET /books[.fmt]?author=`: books of an author
//! - `GET /files[.html|.json]?author=&book=`: tracks of a book with sizes
//! - `GET /feed[.fmt]?author=&book=`: podcast RSS for a book
//! - `GET /audio?author=&book=&file=`: audio bytes

mod error;
mod handlers;
mod origin;
mod router;
mod state;
mod views;

pub use error::{ServerError, ServerResult};
pub use handlers::CatalogQuery;
pub use origin::{request_origin, RequestOrigin};
pub use router::{router, serve};
pub use state::AppState;
pub use views::{human_filesize, parse_endpoint, Format, View};
