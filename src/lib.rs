//! # spa-router
//!
//! **spa-router** is a small single-page student directory together with the
//! tooling that ships it: a declarative route matcher, a view renderer, an
//! in-memory navigation history, a bundler and a coroutine-powered dev server
//! with history-API fallback.
//!
//! ## Overview
//!
//! The application has five views. A shell with a greeting and a navigation
//! list renders the top-level route table beneath it; the Students view
//! renders a nested table whose only entry, `/students/name/:name`, echoes its
//! match and location as JSON.
//!
//! ## Architecture
//!
//! - **[`location`]** - The navigation value (`pathname`, `search`, `hash`, `key`)
//! - **[`router`]** - Pattern parsing and segment-wise matching; ordered route tables
//! - **[`dispatcher`]** - Renders every matching entry of a table (non-exclusive)
//! - **[`markup`]** - Element tree produced by views, serialised to HTML
//! - **[`views`]** - The student directory itself
//! - **[`history`]** - Push/replace/back/forward and a headless browser on top
//! - **[`bundler`]** - Rule-driven asset pipeline producing bundle, shell and manifest
//! - **[`server`]** - Dev server built on `may_minihttp`
//! - **[`hot_reload`]** - Rebuild on source change and swap the served shell
//! - **[`config`]** / **[`runtime_config`]** - Build configuration and env overrides
//! - **[`logging`]** - `tracing-subscriber` setup
//! - **[`cli`]** - The `spa-router` binary
//!
//! ### Request Handling Flow
//!
//! ```mermaid
//! sequenceDiagram
//!     participant Client
//!     participant Server as HttpServer<br/>(may_minihttp)
//!     participant Static as StaticFiles
//!     participant Dispatcher as Dispatcher
//!     participant Shell as Shell<br/>(ArcSwap)
//!
//!     Client->>Server: GET /students/name/craig
//!     Server->>Static: load("students/name/craig")
//!     Static-->>Server: NotFound
//!     Server->>Dispatcher: render(Location)
//!     Dispatcher->>Dispatcher: match APP_ROUTES, STUDENT_ROUTES
//!     Dispatcher-->>Server: markup
//!     Server->>Shell: load()
//!     Shell-->>Server: entry document
//!     Server-->>Client: 200 text/html<br/>(markup inside #root)
//! ```
//!
//! ## Quick Start
//!
//! ```
//! use spa_router::{history::Browser, views};
//!
//! let mut browser = Browser::open(views::dispatcher(), "/");
//! assert!(browser.html().contains("<h1>Home</h1>"));
//!
//! browser.click_link("/about")?;
//! assert!(browser.html().contains("<h1>About</h1>"));
//! assert_eq!(browser.history().len(), 2);
//! # Ok::<(), anyhow::Error>(())
//! ```
//!
//! ## Runtime Considerations
//!
//! The dev server uses the `may` coroutine runtime, not tokio. Rendering is
//! synchronous and allocation-only; the coroutine stack size is configurable
//! via the `SPA_ROUTER_STACK_SIZE` environment variable.

pub mod bundler;
pub mod cli;
pub mod config;
pub mod dispatcher;
pub mod history;
pub mod hot_reload;
pub mod location;
pub mod logging;
pub mod markup;
pub mod router;
pub mod runtime_config;
pub mod server;
pub mod static_files;
pub mod views;

pub use config::{load_config, BuildConfig, Mode};
pub use location::Location;
pub use router::{match_path, RouteMatch};
