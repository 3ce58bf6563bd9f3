//! Landing page.

use super::PageBuilder;
use crate::router::Route;

pub(super) fn render(page: &mut PageBuilder) {
    let owner = page.site().owner.clone();
    page.heading(1, format!("Hi, I'm {owner}"))
        .heading(2, "I'm a Full Stack Developer")
        .paragraph(
            "I create engaging web experiences with modern technologies. \
             Passionate about clean code and user-centric design.",
        )
        .link("View My Work", Route::Projects.path())
        .link("Contact Me", Route::Contact.path());
}
