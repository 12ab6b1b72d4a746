//! # CLI Module
//!
//! Command-line interface of the `spa-router` binary.
//!
//! ## Commands
//!
//! ### `build`
//!
//! ```bash
//! spa-router build --config demos/student_directory/spa.yaml --mode production
//! ```
//!
//! Runs the bundler and prints every emitted file with its size.
//!
//! ### `serve`
//!
//! ```bash
//! spa-router serve --config demos/student_directory/spa.yaml --watch
//! ```
//!
//! Builds (skip with `--no-build`), then serves the content base. With the
//! history-API fallback on, any unknown path returns the entry document with
//! the matching page already rendered. `--watch` rebuilds on source changes.
//! `SIGINT`/`SIGTERM` stop the server.
//!
//! ### `routes`
//!
//! Prints each route table as `pattern (exact|prefix) -> view`.
//!
//! ### `render`
//!
//! ```bash
//! spa-router render '/students/name/craig?x=1#top'
//! ```
//!
//! Prints the markup the application renders for a location.

mod commands;

#[cfg(test)]
mod tests;

pub use commands::{render_url, routes_listing, run, run_cli, Cli, Commands};
