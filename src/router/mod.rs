//! # Router Module
//!
//! Path matching for client-side routes. The router is deliberately free of
//! any rendering concern: it compiles patterns, tests them against a
//! [`Location`](crate::location::Location) and derives a [`RouteMatch`].
//!
//! ## Matching rules
//!
//! - Paths and patterns are tokenised on `/`; one leading and one trailing
//!   slash are ignored.
//! - Literal segments compare by exact string equality.
//! - `:name` matches one non-empty segment and binds it (percent-decoded).
//! - Exact entries require equal segment counts; prefix entries (the
//!   default) allow the path to continue past the pattern.
//!
//! ## Example
//!
//! ```rust
//! use spa_router::router::match_path;
//!
//! let m = match_path("/students/name/:name", false, "/students/name/craig").unwrap();
//! assert_eq!(m.get_param("name"), Some("craig"));
//! assert!(m.is_exact);
//!
//! assert!(match_path("/", true, "/about").is_none());
//! assert!(match_path("/", false, "/about").is_some());
//! ```

mod core;
mod pattern;

pub use core::{
    match_path, match_pattern, ParamVec, RouteEntry, RouteMatch, RouteTable, MAX_INLINE_PARAMS,
};
pub use pattern::{split_segments, RoutePattern, Segment};
