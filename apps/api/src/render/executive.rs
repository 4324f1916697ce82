//! Template 5: dark header with a ruled title bar; narrative sections on the left,
//! education, plain-label skills and certificates on the right.

use crate::models::document::CvDocument;
use crate::render::helpers::{
    avatar, contacts, education_meta, experience_dates, or_fallback, research_block,
    ResearchClasses, FALLBACK_NAME_UPPER, FALLBACK_TITLE,
};
use crate::render::markup::{div, el, Element, Markup};

fn section(title: &'static str) -> Element {
    div("t5-section").child(div("t5-section-title").child(Markup::trusted(title)))
}

pub fn render(d: &CvDocument) -> Markup {
    let p = &d.personal;

    let header = div("t5-header")
        .child(
            div("t5-header-main")
                .child(avatar(&p.avatar, "t5-avatar", div("t5-avatar-placeholder").build()))
                .child(
                    div("t5-header-text")
                        .child(
                            el("h1")
                                .class("t5-name")
                                .child(or_fallback(&p.name, FALLBACK_NAME_UPPER)),
                        )
                        .child(
                            div("t5-title-bar")
                                .child(div("t5-title-line"))
                                .child(
                                    el("span")
                                        .class("t5-title")
                                        .child(or_fallback(&p.title, FALLBACK_TITLE)),
                                )
                                .child(div("t5-title-line")),
                        ),
                ),
        )
        .child(
            div("t5-contact-row").children(
                contacts(p, false)
                    .into_iter()
                    .map(|(_, value)| el("span").text(value)),
            ),
        );

    div("cv-template t5")
        .child(header)
        .child(div("t5-body").child(left_column(d)).child(right_column(d)))
        .build()
}

fn left_column(d: &CvDocument) -> Markup {
    let mut left = div("t5-left");

    if !d.objective.is_empty() {
        left = left.child(section("MỤC TIÊU").child(el("p").class("t5-text").multiline(&d.objective)));
    }

    if !d.experience.is_empty() {
        left = left.child(section("KINH NGHIỆM LÀM VIỆC").children(d.experience.iter().map(
            |e| {
                div("t5-exp-item")
                    .child(
                        div("t5-exp-header")
                            .child(div("t5-exp-company").text(&e.company))
                            .child(div("t5-exp-date").child(experience_dates(e))),
                    )
                    .child(div("t5-exp-position").text(&e.position))
                    .child(
                        (!e.description.is_empty())
                            .then(|| div("t5-text").multiline(&e.description).build()),
                    )
            },
        )));
    }

    if !d.activities.is_empty() {
        left = left.child(section("HOẠT ĐỘNG").children(d.activities.iter().map(|a| {
            div("t5-exp-item")
                .child(div("t5-exp-company").text(&a.name))
                .child(
                    (!a.description.is_empty())
                        .then(|| div("t5-text").multiline(&a.description).build()),
                )
        })));
    }

    left.child(research_block(
        &d.research,
        &ResearchClasses {
            wrap: "t5-section",
            title: "t5-section-title",
            name: "t5-exp-company",
            meta: "t5-exp-position",
            desc: "t5-text",
        },
    ))
    .build()
}

fn right_column(d: &CvDocument) -> Markup {
    let mut right = div("t5-right");

    if !d.education.is_empty() {
        right = right.child(section("GIÁO DỤC").children(d.education.iter().map(|e| {
            div("t5-edu-item")
                .child(div("t5-edu-school").text(&e.school))
                .child(div("t5-edu-major").text(&e.major))
                .child(div("t5-edu-meta").child(education_meta(e, " – ", " | ")))
        })));
    }

    if !d.skills.is_empty() {
        right = right.child(section("KỸ NĂNG").children(d.skills.iter().map(|s| {
            div("t5-skill-item")
                .child(el("span").class("t5-skill-name").text(&s.name))
                .child(el("span").class("t5-skill-level").text(&s.level))
        })));
    }

    if !d.certificates.is_empty() {
        right = right.child(
            section("CHỨNG CHỈ &amp; BẰNG CẤP").child(
                el("ul")
                    .class("t5-list")
                    .children(d.certificates.iter().map(|c| el("li").text(&c.name))),
            ),
        );
    }

    right.build()
}
