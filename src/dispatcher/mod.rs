//! # Dispatcher Module
//!
//! Connects route tables to views. For a location, [`render_routes`] walks a
//! [`ViewTable`] in order and renders every entry whose pattern matches,
//! handing each view its [`RouteProps`]. Entries are not exclusive, and a
//! location matching nothing renders nothing.
//!
//! [`Dispatcher`] wraps a root view (the application shell) so callers such
//! as [`Browser`](crate::history::Browser) and the dev server only deal in
//! locations.
//!
//! Views nest their own tables by calling [`render_routes`] with the location
//! from their props; there is no ambient routing state.

mod core;

pub use core::{render_routes, Dispatcher, RouteProps, View, ViewTable};
