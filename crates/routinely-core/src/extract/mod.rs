//! Text-extraction bindings.

mod http;

pub use http::HttpTaskExtractor;
