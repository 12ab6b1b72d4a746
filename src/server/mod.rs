//! # Server Module
//!
//! Development HTTP server on `may_minihttp`: serves the build output from
//! the content base and answers every other `GET`/`HEAD` with the entry
//! document, the application already rendered into its mount point.

pub mod http_server;
pub mod request;
pub mod response;
pub mod service;

pub use http_server::{HttpServer, ServerHandle};
pub use request::{parse_request, split_target, ParsedRequest};
pub use service::{DevService, SharedShell, Shell};
