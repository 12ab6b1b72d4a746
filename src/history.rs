//! # Navigation history
//!
//! [`History`] owns the current [`Location`] and is its only writer. It is
//! passed explicitly to whoever needs it; nothing reads navigation state from
//! a global.
//!
//! [`Browser`] pairs a history with a [`Dispatcher`] and re-renders
//! synchronously after every navigation, which is how link activation
//! behaves in a single page app: the page is never reloaded, the history
//! grows by one entry and the new markup is available immediately.

use anyhow::{bail, Result};
use tracing::{debug, info};
use url::Url;

use crate::dispatcher::Dispatcher;
use crate::location::Location;
use crate::markup::Node;

/// Origin used to resolve relative navigation targets
const RESOLVE_BASE: &str = "http://localhost";

/// Session history: an ordered list of locations and a cursor into it.
#[derive(Debug, Clone)]
pub struct History {
    entries: Vec<Location>,
    index: usize,
}

impl History {
    #[must_use]
    pub fn new(initial: Location) -> Self {
        Self {
            entries: vec![initial],
            index: 0,
        }
    }

    /// The current location
    #[must_use]
    pub fn location(&self) -> &Location {
        &self.entries[self.index]
    }

    /// Number of entries, including any forward entries
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[must_use]
    pub fn index(&self) -> usize {
        self.index
    }

    /// Navigate to `to`, discarding forward entries.
    pub fn push(&mut self, to: &str) -> &Location {
        let next = self.resolve(to).with_new_key();
        self.entries.truncate(self.index + 1);
        self.entries.push(next);
        self.index += 1;
        debug!(href = %self.location().href(), len = self.entries.len(), "history push");
        self.location()
    }

    /// Replace the current entry with `to`.
    pub fn replace(&mut self, to: &str) -> &Location {
        let next = self.resolve(to).with_new_key();
        self.entries[self.index] = next;
        debug!(href = %self.location().href(), "history replace");
        self.location()
    }

    /// Move the cursor by `delta`; returns `false` (and stays put) when out of range.
    pub fn go(&mut self, delta: isize) -> bool {
        match self.index.checked_add_signed(delta) {
            Some(target) if target < self.entries.len() => {
                self.index = target;
                true
            }
            _ => false,
        }
    }

    pub fn back(&mut self) -> bool {
        self.go(-1)
    }

    pub fn forward(&mut self) -> bool {
        self.go(1)
    }

    /// Resolve `to` against the current location the way a browser resolves
    /// an `href`.
    #[must_use]
    pub fn resolve(&self, to: &str) -> Location {
        if to.starts_with('/') {
            return Location::parse(to);
        }
        let current = self.location();
        Url::parse(RESOLVE_BASE)
            .and_then(|base| base.join(&current.pathname))
            .and_then(|base| base.join(to))
            .map(|url| Location::from_url(&url))
            .unwrap_or_else(|_| Location::parse(to))
    }
}

/// A single-page session: history plus the page rendered for its current
/// location.
#[derive(Debug)]
pub struct Browser {
    history: History,
    dispatcher: Dispatcher,
    page: Node,
    page_loads: usize,
}

impl Browser {
    /// Load `url` as the initial document
    #[must_use]
    pub fn open(dispatcher: Dispatcher, url: &str) -> Self {
        let history = History::new(Location::parse(url));
        let page = dispatcher.render(history.location());
        info!(href = %history.location().href(), "page loaded");
        Self {
            history,
            dispatcher,
            page,
            page_loads: 1,
        }
    }

    #[must_use]
    pub fn location(&self) -> &Location {
        self.history.location()
    }

    #[must_use]
    pub fn history(&self) -> &History {
        &self.history
    }

    /// Markup for the current location
    #[must_use]
    pub fn page(&self) -> &Node {
        &self.page
    }

    #[must_use]
    pub fn html(&self) -> String {
        self.page.to_html()
    }

    /// Full document loads; navigation never increments this
    #[must_use]
    pub fn page_loads(&self) -> usize {
        self.page_loads
    }

    /// Push `to` and re-render
    pub fn navigate(&mut self, to: &str) -> &Node {
        self.history.push(to);
        self.rerender()
    }

    /// Activate a link present on the current page.
    ///
    /// # Errors
    ///
    /// Returns an error if no anchor on the page points at `href`.
    pub fn click_link(&mut self, href: &str) -> Result<&Node> {
        if !self.page.links().iter().any(|l| l == href) {
            bail!(
                "no link to {href} on page {}",
                self.history.location().href()
            );
        }
        Ok(self.navigate(href))
    }

    /// Step back one entry and re-render; `false` at the start of history
    pub fn back(&mut self) -> bool {
        let moved = self.history.back();
        if moved {
            self.rerender();
        }
        moved
    }

    /// Step forward one entry and re-render; `false` at the end of history
    pub fn forward(&mut self) -> bool {
        let moved = self.history.forward();
        if moved {
            self.rerender();
        }
        moved
    }

    fn rerender(&mut self) -> &Node {
        self.page = self.dispatcher.render(self.history.location());
        &self.page
    }
}
