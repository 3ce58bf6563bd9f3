//! Contact page with the message form.

use super::PageBuilder;
use crate::contact::Field;
use crate::dom::ButtonRole;

pub(super) fn render(page: &mut PageBuilder) {
    let mailto = format!("mailto:{}", page.site().contact_email);
    let email = page.site().contact_email.clone();
    page.heading(2, "Get In Touch")
        .input(Field::Name)
        .input(Field::Email)
        .textarea(Field::Message)
        .button(ButtonRole::SubmitContact, "Send Message")
        .paragraph("Or reach out directly at:")
        .link(email, &mailto);
}
