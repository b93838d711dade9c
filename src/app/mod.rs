//! Request-facing helpers shared by the CLI and the HTTP API.

pub mod url;

pub use url::{validate_and_normalize_url, URL_REQUIRED};
