//! # Views
//!
//! The student directory application: a shell with navigation, three static
//! pages and a student list whose nested route echoes its parameters.
//!
//! | pattern | mode | view |
//! |---|---|---|
//! | `/` | exact | [`home`] |
//! | `/about` | prefix | [`about`] |
//! | `/contact` | prefix | [`contact`] |
//! | `/students` | prefix | [`students`] |
//! | `/students/name/:name` | prefix, nested in `students` | [`student`] |

mod pages;
mod students;

use once_cell::sync::Lazy;

use crate::dispatcher::{Dispatcher, View, ViewTable};
use crate::router::{RouteEntry, RouteTable};

pub use pages::{about, app, contact, home, NAV_LINKS};
pub use students::{student, students, DEFAULT_STUDENT_NAME, STUDENTS};

/// Top-level routes rendered below the navigation list
pub static APP_ROUTES: Lazy<ViewTable> = Lazy::new(|| {
    RouteTable::new(vec![
        RouteEntry::exact("/", "home", home as View),
        RouteEntry::new("/about", "about", about as View),
        RouteEntry::new("/contact", "contact", contact as View),
        RouteEntry::new("/students", "students", students as View),
    ])
});

/// Routes nested inside the student list
pub static STUDENT_ROUTES: Lazy<ViewTable> = Lazy::new(|| {
    RouteTable::new(vec![RouteEntry::new(
        "/students/name/:name",
        "student",
        student as View,
    )])
});

/// Dispatcher rendering the application shell
#[must_use]
pub fn dispatcher() -> Dispatcher {
    Dispatcher::new(app)
}

/// All route tables with a label, for listing
#[must_use]
pub fn route_tables() -> [(&'static str, &'static ViewTable); 2] {
    [("app", &*APP_ROUTES), ("students", &*STUDENT_ROUTES)]
}
