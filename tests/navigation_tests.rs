use spa_router::history::Browser;
use spa_router::location::Location;
use spa_router::views::{self, DEFAULT_STUDENT_NAME, NAV_LINKS};

fn headings(url: &str) -> Vec<String> {
    views::dispatcher()
        .render(&Location::parse(url))
        .texts_of("h1")
}

#[test]
fn test_static_pages_render_their_heading() {
    assert_eq!(headings("/"), vec!["Hello, world!", "Home"]);
    assert_eq!(headings("/about"), vec!["Hello, world!", "About"]);
    assert_eq!(headings("/contact"), vec!["Hello, world!", "Contact Us"]);
}

#[test]
fn test_navigation_is_always_rendered() {
    for url in ["/", "/about", "/nowhere", "/students/name/craig"] {
        let page = views::dispatcher().render(&Location::parse(url));
        let links = page.links();
        for (href, _) in NAV_LINKS {
            assert!(links.iter().any(|l| l == href), "{url} lacks {href}");
        }
    }
}

#[test]
fn test_unknown_path_renders_shell_only() {
    assert_eq!(headings("/nowhere"), vec!["Hello, world!"]);
}

#[test]
fn test_prefix_entries_match_sub_paths() {
    assert_eq!(headings("/about/team"), vec!["Hello, world!", "About"]);
}

#[test]
fn test_student_page_echoes_name() {
    let page = views::dispatcher().render(&Location::parse("/students/name/craig"));
    assert_eq!(page.texts_of("h2"), vec!["Students:"]);
    assert_eq!(page.texts_of("h3"), vec!["Student Info For craig"]);
    let pre = page.texts_of("pre");
    assert!(pre[0].contains("\"name\": \"craig\""));
    assert!(pre[0].contains("\"path\": \"/students/name/:name\""));
    assert!(pre[0].contains("\"url\": \"/students/name/craig\""));
    assert!(pre[0].contains("\"isExact\": true"));
    assert!(pre[1].contains("\"pathname\": \"/students/name/craig\""));
}

#[test]
fn test_student_page_carries_query_and_hash() {
    let page = views::dispatcher().render(&Location::parse("/students/name/craig?x=1#top"));
    let pre = page.texts_of("pre");
    assert!(pre[1].contains("\"search\": \"?x=1\""));
    assert!(pre[1].contains("\"hash\": \"#top\""));
}

#[test]
fn test_student_name_is_percent_decoded() {
    let page = views::dispatcher().render(&Location::parse("/students/name/Ana%20Lu"));
    assert_eq!(page.texts_of("h3"), vec!["Student Info For Ana Lu"]);
    let pre = page.texts_of("pre");
    assert!(pre[0].contains("\"url\": \"/students/name/Ana Lu\""));
    assert!(pre[1].contains("\"pathname\": \"/students/name/Ana Lu\""));
}

#[test]
fn test_students_without_name_has_no_detail() {
    for url in ["/students", "/students/name/", "/students/name"] {
        let page = views::dispatcher().render(&Location::parse(url));
        assert_eq!(page.texts_of("h2"), vec!["Students:"], "{url}");
        assert!(page.texts_of("h3").is_empty(), "{url}");
    }
}

#[test]
fn test_student_view_without_match_shows_default() {
    let location = Location::parse("/students/name/");
    let node = views::student(&spa_router::dispatcher::RouteProps::unrouted(&location));
    assert_eq!(
        node.texts_of("h3"),
        vec![format!("Student Info For {DEFAULT_STUDENT_NAME}")]
    );
}

#[test]
fn test_rendering_is_idempotent() {
    let dispatcher = views::dispatcher();
    for url in ["/", "/about", "/students/name/marcel?q=1"] {
        let location = Location::parse(url);
        assert_eq!(
            dispatcher.render_html(&location),
            dispatcher.render_html(&location)
        );
    }
}

#[test]
fn test_link_navigation_swaps_page_without_reload() {
    let mut browser = Browser::open(views::dispatcher(), "/");
    assert!(browser.page().texts_of("h1").contains(&"Home".to_string()));
    let before = browser.history().len();

    browser.click_link("/about").unwrap();

    let h1 = browser.page().texts_of("h1");
    assert!(h1.contains(&"About".to_string()));
    assert!(!h1.contains(&"Home".to_string()));
    assert_eq!(browser.history().len(), before + 1);
    assert_eq!(browser.location().pathname, "/about");
    assert_eq!(browser.page_loads(), 1);
}

#[test]
fn test_nested_link_navigation() {
    let mut browser = Browser::open(views::dispatcher(), "/");
    browser.click_link("/students").unwrap();
    browser.click_link("/students/name/ignacio").unwrap();
    assert_eq!(
        browser.page().texts_of("h3"),
        vec!["Student Info For ignacio"]
    );
    let key = browser.location().key.clone().unwrap();
    assert!(browser.page().texts_of("pre")[1].contains(&key));
}

#[test]
fn test_click_missing_link_is_error() {
    let mut browser = Browser::open(views::dispatcher(), "/");
    let err = browser.click_link("/students/name/craig").unwrap_err();
    assert!(err.to_string().contains("/students/name/craig"));
    assert_eq!(browser.history().len(), 1);
}

#[test]
fn test_back_and_forward_rerender() {
    let mut browser = Browser::open(views::dispatcher(), "/");
    browser.click_link("/contact").unwrap();
    assert!(browser.back());
    assert!(browser.html().contains("<h1>Home</h1>"));
    assert!(browser.forward());
    assert!(browser.html().contains("<h1>Contact Us</h1>"));
    assert!(!browser.forward());
}
