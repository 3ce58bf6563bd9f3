//! About page: short bio and skills.

use super::PageBuilder;

const SKILLS: [&str; 8] = [
    "JavaScript",
    "TypeScript",
    "React",
    "Node.js",
    "Python",
    "SQL",
    "Git",
    "AWS",
];

pub(super) fn render(page: &mut PageBuilder) {
    page.heading(2, "About Me")
        .paragraph(
            "I'm a passionate Full Stack Developer with experience in building modern web \
             applications. I love turning complex problems into simple, beautiful, and \
             intuitive solutions.",
        )
        .paragraph(
            "With a strong foundation in both front-end and back-end development, I strive \
             to create seamless user experiences while maintaining clean and efficient code.",
        )
        .heading(3, "Skills");
    for skill in SKILLS {
        page.list_item(skill);
    }
}
