//! Project showcase.

use super::PageBuilder;

struct Project {
    title: &'static str,
    description: &'static str,
    tech: &'static [&'static str],
    link: &'static str,
}

const PROJECTS: &[Project] = &[
    Project {
        title: "Portfolio",
        description: "This site: keyboard-first navigation, theming and accessible page changes.",
        tech: &["Rust", "Ratatui", "Crossterm"],
        link: "https://github.com/pawanyd",
    },
    Project {
        title: "Project 2",
        description: "Description of project 2",
        tech: &["React", "TypeScript", "Tailwind"],
        link: "https://github.com/pawanyd",
    },
];

pub(super) fn render(page: &mut PageBuilder) {
    page.heading(2, "My Projects");
    for project in PROJECTS {
        page.heading(3, project.title)
            .paragraph(project.description)
            .list_item(project.tech.join(" · "))
            .link("View Project →", project.link);
    }
}
