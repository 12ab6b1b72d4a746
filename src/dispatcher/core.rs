use std::time::Instant;

use tracing::{debug, debug_span};

use crate::location::Location;
use crate::markup::Node;
use crate::router::{RouteMatch, RouteTable};

/// Inputs handed to a view: the (optional) match that selected it and the
/// current location.
#[derive(Debug, Clone, Copy)]
pub struct RouteProps<'a> {
    /// `None` when the view is rendered outside a route entry
    pub route_match: Option<&'a RouteMatch>,
    pub location: &'a Location,
}

impl<'a> RouteProps<'a> {
    /// Props for a view rendered without a route entry
    #[must_use]
    pub fn unrouted(location: &'a Location) -> Self {
        Self {
            route_match: None,
            location,
        }
    }

    /// Named parameter from the match, if any
    #[must_use]
    pub fn param(&self, name: &str) -> Option<&'a str> {
        self.route_match.and_then(|m| m.get_param(name))
    }
}

/// A pure rendering function
pub type View = fn(&RouteProps<'_>) -> Node;

/// Route table whose targets are views
pub type ViewTable = RouteTable<View>;

/// Render every entry of `table` that matches `location`, in table order.
///
/// A location matching nothing yields an empty list; that region of the page
/// simply stays blank.
#[must_use]
pub fn render_routes(table: &ViewTable, location: &Location) -> Vec<Node> {
    let rendered: Vec<Node> = table
        .matches(location)
        .map(|(entry, route_match)| {
            debug!(
                pathname = %location.pathname,
                pattern = %entry.pattern().as_str(),
                view = entry.name(),
                is_exact = route_match.is_exact,
                params = ?route_match.params,
                "Route matched"
            );
            let view = entry.target();
            view(&RouteProps {
                route_match: Some(&route_match),
                location,
            })
        })
        .collect();

    if rendered.is_empty() {
        debug!(pathname = %location.pathname, "No route matched");
    }
    rendered
}

/// Renders a root view for locations.
///
/// The dispatcher is stateless: every call derives matches afresh from the
/// location it is given, so rendering the same location twice yields the
/// same tree.
#[derive(Clone, Copy)]
pub struct Dispatcher {
    root: View,
}

impl Dispatcher {
    #[must_use]
    pub fn new(root: View) -> Self {
        Self { root }
    }

    /// Render the root view for `location`
    #[must_use]
    pub fn render(&self, location: &Location) -> Node {
        let span = debug_span!("render", pathname = %location.pathname);
        let _entered = span.enter();
        let started = Instant::now();
        let node = (self.root)(&RouteProps::unrouted(location));
        debug!(duration_us = started.elapsed().as_micros(), "Rendered");
        node
    }

    /// Render the root view for `location` straight to HTML
    #[must_use]
    pub fn render_html(&self, location: &Location) -> String {
        self.render(location).to_html()
    }
}

impl std::fmt::Debug for Dispatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Dispatcher").finish_non_exhaustive()
    }
}
