//! Two-route navigation between the landing page and the Analyze page.

use std::fmt;

/// A logical screen of the app.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Route {
    #[default]
    Home,
    Analyze,
}

impl Route {
    pub fn path(self) -> &'static str {
        match self {
            Self::Home => "/",
            Self::Analyze => "/analyze",
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

/// Current route plus a pending scroll-to-top request.
#[derive(Debug, Default)]
pub struct Router {
    current: Route,
    scroll_reset_pending: bool,
}

impl Router {
    pub fn new(start: Route) -> Self {
        Self {
            current: start,
            scroll_reset_pending: true,
        }
    }

    pub fn current(&self) -> Route {
        self.current
    }

    /// Switch to `route` and ask the next page render to scroll to the top.
    /// Returns the route that was left.
    pub fn navigate_to(&mut self, route: Route) -> Route {
        let previous = self.current;
        if previous != route {
            tracing::info!("Navigating {previous} -> {route}");
        }
        self.current = route;
        self.scroll_reset_pending = true;
        previous
    }

    /// Consume the scroll reset request; true at most once per navigation.
    pub fn take_scroll_reset(&mut self) -> bool {
        std::mem::take(&mut self.scroll_reset_pending)
    }
}
