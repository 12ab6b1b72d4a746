use crate::dispatcher::{render_routes, RouteProps};
use crate::markup::{el, link, Node};

use super::APP_ROUTES;

/// Entries of the top navigation list: `(href, label)`
pub const NAV_LINKS: [(&str, &str); 4] = [
    ("/", "Home"),
    ("/about", "About"),
    ("/contact", "Contact Us"),
    ("/students", "Students"),
];

/// Application shell: greeting, navigation and the top-level route outlet.
pub fn app(props: &RouteProps<'_>) -> Node {
    el("div")
        .child(el("h1").text("Hello, world!"))
        .child(
            el("ul").children(
                NAV_LINKS
                    .iter()
                    .map(|(href, label)| el("li").child(link(href, label))),
            ),
        )
        .children(render_routes(&APP_ROUTES, props.location))
        .into()
}

pub fn home(_: &RouteProps<'_>) -> Node {
    el("h1").text("Home").into()
}

pub fn about(_: &RouteProps<'_>) -> Node {
    el("h1").text("About").into()
}

pub fn contact(_: &RouteProps<'_>) -> Node {
    el("h1").text("Contact Us").into()
}
