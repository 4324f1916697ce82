//! Template 4: gradient header with contact chips, boxed objective, then skills (plain level
//! tags), education and certificates beside a timeline of experience, activities and research.

use crate::models::document::CvDocument;
use crate::render::helpers::{
    avatar, contacts, displayable_research, education_meta, experience_dates, or_fallback,
    FALLBACK_NAME, FALLBACK_TITLE, RESEARCH_HEADING,
};
use crate::render::markup::{div, el, Element, Markup};

fn section(title: &'static str) -> Element {
    div("t4-section").child(
        div("t4-section-title")
            .child(el("span").class("t4-accent-bar"))
            .child(Markup::trusted(title)),
    )
}

pub fn render(d: &CvDocument) -> Markup {
    let p = &d.personal;

    let header = div("t4-header")
        .child(
            div("t4-header-content")
                .child(avatar(&p.avatar, "t4-avatar", div("t4-avatar-placeholder").build()))
                .child(
                    div("t4-header-text")
                        .child(el("h1").class("t4-name").child(or_fallback(&p.name, FALLBACK_NAME)))
                        .child(div("t4-title").child(or_fallback(&p.title, FALLBACK_TITLE))),
                ),
        )
        .child(
            div("t4-contact-chips").children(
                contacts(p, false)
                    .into_iter()
                    .map(|(_, value)| div("t4-chip").text(value)),
            ),
        );

    let mut body = div("t4-body");
    if !d.objective.is_empty() {
        body = body.child(div("t4-objective-box").child(el("p").multiline(&d.objective)));
    }
    body = body.child(
        div("t4-columns")
            .child(left_column(d))
            .child(right_column(d)),
    );

    div("cv-template t4").child(header).child(body).build()
}

fn left_column(d: &CvDocument) -> Markup {
    let mut left = div("t4-left");

    if !d.skills.is_empty() {
        left = left.child(section("KỸ NĂNG").children(d.skills.iter().map(|s| {
            div("t4-skill-item")
                .child(el("span").text(&s.name))
                .child(el("span").class("t4-tag").text(&s.level))
        })));
    }

    if !d.education.is_empty() {
        left = left.child(section("GIÁO DỤC").children(d.education.iter().map(|e| {
            div("t4-edu-item")
                .child(div("t4-edu-school").text(&e.school))
                .child(div("t4-edu-major").text(&e.major))
                .child(div("t4-edu-meta").child(education_meta(e, "–", " · ")))
        })));
    }

    if !d.certificates.is_empty() {
        left = left.child(
            section("CHỨNG CHỈ").child(
                el("ul")
                    .class("t4-list")
                    .children(d.certificates.iter().map(|c| el("li").text(&c.name))),
            ),
        );
    }

    left.build()
}

fn timeline_item(content: Element) -> Element {
    div("t4-exp-item")
        .child(div("t4-exp-timeline-dot"))
        .child(content)
}

fn right_column(d: &CvDocument) -> Markup {
    let mut right = div("t4-right");

    if !d.experience.is_empty() {
        right = right.child(section("KINH NGHIỆM").children(d.experience.iter().map(|e| {
            timeline_item(
                div("t4-exp-content")
                    .child(div("t4-exp-company").text(&e.company))
                    .child(
                        div("t4-exp-position-date")
                            .child(el("span").class("t4-exp-position").text(&e.position))
                            .child(el("span").class("t4-exp-date").child(experience_dates(e))),
                    )
                    .child(
                        (!e.description.is_empty())
                            .then(|| div("t4-exp-desc").multiline(&e.description).build()),
                    ),
            )
        })));
    }

    if !d.activities.is_empty() {
        right = right.child(section("HOẠT ĐỘNG").children(d.activities.iter().map(|a| {
            div("t4-act-item")
                .child(div("t4-act-name").text(&a.name))
                .child(
                    (!a.description.is_empty())
                        .then(|| div("t4-act-desc").multiline(&a.description).build()),
                )
        })));
    }

    // Research reuses the experience timeline instead of the shared block.
    let research = displayable_research(&d.research);
    if !research.is_empty() {
        right = right.child(section(RESEARCH_HEADING).children(research.into_iter().map(|r| {
            timeline_item(
                div("t4-exp-content")
                    .child(div("t4-exp-company").text(&r.title))
                    .child(
                        div("t4-exp-position-date")
                            .child((!r.role.is_empty()).then(|| {
                                el("span").class("t4-exp-position").text(&r.role).build()
                            }))
                            .child((!r.year.is_empty()).then(|| {
                                el("span").class("t4-exp-date").text(&r.year).build()
                            })),
                    )
                    .child(
                        (!r.description.is_empty())
                            .then(|| div("t4-exp-desc").multiline(&r.description).build()),
                    ),
            )
        })));
    }

    right.build()
}
