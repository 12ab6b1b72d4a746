use serde::Serialize;
use serde_json::ser::PrettyFormatter;

use crate::dispatcher::{render_routes, RouteProps};
use crate::markup::{el, link, Node};

use super::STUDENT_ROUTES;

/// Shown when the route carries no `name`
pub const DEFAULT_STUDENT_NAME: &str = "No One";

/// `(slug, label)` for every listed student
pub const STUDENTS: [(&str, &str); 3] = [
    ("craig", "Craig"),
    ("marcel", "Marcel"),
    ("ignacio", "Ignacio"),
];

/// Student list followed by the nested student detail outlet.
pub fn students(props: &RouteProps<'_>) -> Node {
    el("div")
        .child(el("h2").text("Students:"))
        .child(el("ul").children(STUDENTS.iter().map(|(slug, label)| {
            el("li").child(link(&format!("/students/name/{slug}"), label))
        })))
        .children(render_routes(&STUDENT_ROUTES, props.location))
        .into()
}

/// Echoes the bound `name` and dumps the match and location as JSON.
pub fn student(props: &RouteProps<'_>) -> Node {
    let name = props
        .param("name")
        .filter(|n| !n.is_empty())
        .unwrap_or(DEFAULT_STUDENT_NAME);

    el("div")
        .child(el("h3").text(format!("Student Info For {name}")))
        .child(
            el("h4")
                .text("What's in match? ")
                .child(el("pre").text(pretty_json(&props.route_match))),
        )
        .child(
            el("h4")
                .text("What's in location? ")
                .child(el("pre").text(pretty_json(props.location))),
        )
        .into()
}

/// JSON with four-space indentation.
fn pretty_json<T: Serialize + ?Sized>(value: &T) -> String {
    let mut buf = Vec::new();
    let mut ser =
        serde_json::Serializer::with_formatter(&mut buf, PrettyFormatter::with_indent(b"    "));
    match value.serialize(&mut ser) {
        Ok(()) => String::from_utf8(buf).unwrap_or_default(),
        Err(_) => "null".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::location::Location;
    use crate::router::match_path;

    #[test]
    fn test_pretty_json_indent() {
        let out = pretty_json(&serde_json::json!({ "a": 1 }));
        assert_eq!(out, "{\n    \"a\": 1\n}");
    }

    #[test]
    fn test_student_without_match_defaults() {
        let location = Location::parse("/students");
        let node = student(&RouteProps::unrouted(&location));
        assert_eq!(node.texts_of("h3"), vec!["Student Info For No One"]);
        assert_eq!(node.texts_of("pre")[0], "null");
    }

    #[test]
    fn test_student_echoes_name() {
        let location = Location::parse("/students/name/marcel");
        let m = match_path("/students/name/:name", false, &location.pathname).unwrap();
        let node = student(&RouteProps {
            route_match: Some(&m),
            location: &location,
        });
        assert_eq!(node.texts_of("h3"), vec!["Student Info For marcel"]);
        assert!(node.texts_of("pre")[0].contains("\"name\": \"marcel\""));
        assert!(node.texts_of("pre")[1].contains("\"pathname\": \"/students/name/marcel\""));
    }
}
