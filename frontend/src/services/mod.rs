//! Browser-side implementations of the collaborators `common` talks to.
//!
//! - `api`: `ApiClient`, the HTTP client of the collection backend
//!   (collections, image uploads, pipelines, logged-in user).
//! - `browser_file`: wraps `web_sys::File` so the uploader and the CSV
//!   sniffer can use files picked in an `<input type="file">`.
//! - `config`: loads the runtime `ClientConfig` served by the host.

pub mod api;
pub mod browser_file;
pub mod config;
mod http;
