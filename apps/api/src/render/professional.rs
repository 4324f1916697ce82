//! Template 3: colored header band with a contact bar; skills (percent bars), education and
//! certificates on the left, objective, experience, activities and research on the right.

use crate::models::document::CvDocument;
use crate::render::helpers::{
    avatar, contacts, education_meta, experience_dates, icon, or_fallback, research_block,
    skill_bar_style, ResearchClasses, FALLBACK_NAME, FALLBACK_TITLE,
};
use crate::render::markup::{div, el, Element, Markup};

fn section(title: &'static str) -> Element {
    div("t3-section").child(div("t3-section-title").child(Markup::trusted(title)))
}

pub fn render(d: &CvDocument) -> Markup {
    div("cv-template t3")
        .child(header(d))
        .child(
            div("t3-body")
                .child(left_column(d))
                .child(right_column(d)),
        )
        .build()
}

fn header(d: &CvDocument) -> Markup {
    let p = &d.personal;
    div("t3-header")
        .child(
            div("t3-header-inner")
                .child(avatar(&p.avatar, "t3-avatar", div("t3-avatar-placeholder").build()))
                .child(
                    div("t3-header-info")
                        .child(el("h1").class("t3-name").child(or_fallback(&p.name, FALLBACK_NAME)))
                        .child(div("t3-title").child(or_fallback(&p.title, FALLBACK_TITLE))),
                ),
        )
        .child(div("t3-contact-bar").children(contacts(p, false).into_iter().map(
            |(kind, value)| {
                el("span")
                    .child(icon(kind, true))
                    .child(Markup::trusted(" "))
                    .text(value)
            },
        )))
        .build()
}

fn left_column(d: &CvDocument) -> Markup {
    let mut left = div("t3-left");

    if !d.skills.is_empty() {
        left = left.child(section("KỸ NĂNG").children(d.skills.iter().map(|s| {
            div("t3-skill-item")
                .child(div("t3-skill-name").text(&s.name))
                .child(
                    div("t3-skill-bar-wrap")
                        .child(div("t3-skill-bar").attr("style", &skill_bar_style(&s.level))),
                )
        })));
    }

    if !d.education.is_empty() {
        left = left.child(section("GIÁO DỤC").children(d.education.iter().map(|e| {
            div("t3-edu-item")
                .child(div("t3-edu-school").text(&e.school))
                .child(div("t3-edu-major").text(&e.major))
                .child(div("t3-edu-meta").child(education_meta(e, " – ", " | ")))
        })));
    }

    if !d.certificates.is_empty() {
        left = left.child(
            section("CHỨNG CHỈ").child(
                el("ul")
                    .class("t3-list")
                    .children(d.certificates.iter().map(|c| el("li").text(&c.name))),
            ),
        );
    }

    left.build()
}

fn right_column(d: &CvDocument) -> Markup {
    let mut right = div("t3-right");

    if !d.objective.is_empty() {
        right = right.child(section("MỤC TIÊU").child(el("p").class("t3-text").multiline(&d.objective)));
    }

    if !d.experience.is_empty() {
        right = right.child(section("KINH NGHIỆM").children(d.experience.iter().map(|e| {
            div("t3-exp-item")
                .child(
                    div("t3-exp-header")
                        .child(div("t3-exp-company").text(&e.company))
                        .child(div("t3-exp-date").child(experience_dates(e))),
                )
                .child(div("t3-exp-position").text(&e.position))
                .child(
                    (!e.description.is_empty())
                        .then(|| div("t3-text").multiline(&e.description).build()),
                )
        })));
    }

    if !d.activities.is_empty() {
        right = right.child(section("HOẠT ĐỘNG").children(d.activities.iter().map(|a| {
            div("t3-act-item")
                .child(div("t3-act-name").text(&a.name))
                .child(
                    (!a.description.is_empty())
                        .then(|| div("t3-text").multiline(&a.description).build()),
                )
        })));
    }

    right
        .child(research_block(
            &d.research,
            &ResearchClasses {
                wrap: "t3-section",
                title: "t3-section-title",
                name: "t3-exp-company",
                meta: "t3-exp-position",
                desc: "t3-text",
            },
        ))
        .build()
}
