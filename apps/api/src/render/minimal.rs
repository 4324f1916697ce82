//! Template 2: single column under an accent header; education/skills and
//! certificates/activities share two-column rows.

use crate::models::document::CvDocument;
use crate::render::helpers::{
    avatar, displayable_research, education_meta, experience_dates, or_fallback, research_block,
    skill_dots, DotPalette, ResearchClasses, FALLBACK_NAME, FALLBACK_TITLE,
};
use crate::render::markup::{div, el, Element, Markup};

fn section(title: &'static str) -> Element {
    div("t2-section")
        .child(div("t2-section-title").child(Markup::trusted(title)))
        .child(div("t2-divider"))
}

pub fn render(d: &CvDocument) -> Markup {
    div("cv-template t2")
        .child(header(d))
        .child(body(d))
        .build()
}

fn header(d: &CvDocument) -> Markup {
    let p = &d.personal;
    let glyphed = |glyph: &'static str, value: &str| {
        (!value.is_empty()).then(|| {
            el("span")
                .child(Markup::trusted(glyph))
                .text(value)
                .build()
        })
    };

    div("t2-header")
        .child(div("t2-header-left").child(avatar(
            &p.avatar,
            "t2-avatar",
            div("t2-avatar-placeholder").build(),
        )))
        .child(
            div("t2-header-right")
                .child(el("h1").class("t2-name").child(or_fallback(&p.name, FALLBACK_NAME)))
                .child(div("t2-title").child(or_fallback(&p.title, FALLBACK_TITLE)))
                .child(
                    div("t2-contact-row")
                        .child(glyphed("📞 ", &p.phone))
                        .child(glyphed("✉ ", &p.email))
                        .child(glyphed("📍 ", &p.address))
                        .child(glyphed("🎂 ", &p.dob)),
                ),
        )
        .build()
}

fn body(d: &CvDocument) -> Markup {
    let mut body = div("t2-body");

    if !d.objective.is_empty() {
        body = body.child(
            section("MỤC TIÊU NGHỀ NGHIỆP").child(el("p").class("t2-text").multiline(&d.objective)),
        );
    }

    if !d.experience.is_empty() {
        body = body.child(section("KINH NGHIỆM LÀM VIỆC").children(d.experience.iter().map(
            |e| {
                div("t2-exp-item").child(div("t2-exp-dot")).child(
                    div("t2-exp-content")
                        .child(
                            div("t2-exp-top")
                                .child(el("span").class("t2-exp-company").text(&e.company))
                                .child(
                                    el("span")
                                        .class("t2-exp-date")
                                        .child(experience_dates(e)),
                                ),
                        )
                        .child(div("t2-exp-position").text(&e.position))
                        .child((!e.description.is_empty()).then(|| {
                            div("t2-text t2-exp-desc")
                                .multiline(&e.description)
                                .build()
                        })),
                )
            },
        )));
    }

    let mut education_skills = div("t2-two-col");
    if !d.education.is_empty() {
        education_skills =
            education_skills.child(section("GIÁO DỤC").children(d.education.iter().map(|e| {
                div("t2-edu-item")
                    .child(div("t2-edu-school").text(&e.school))
                    .child(div("t2-edu-major").text(&e.major))
                    .child(div("t2-edu-meta").child(education_meta(e, " – ", " | ")))
            })));
    }
    if !d.skills.is_empty() {
        education_skills =
            education_skills.child(section("KỸ NĂNG").children(d.skills.iter().map(|s| {
                div("t2-skill-item")
                    .child(el("span").class("t2-skill-name").text(&s.name))
                    .child(skill_dots(&s.level, DotPalette::Accent))
            })));
    }
    body = body.child(education_skills);

    if !d.certificates.is_empty() || !d.activities.is_empty() {
        let mut row = div("t2-two-col");
        if !d.certificates.is_empty() {
            row = row.child(
                section("CHỨNG CHỈ &amp; BẰNG CẤP").child(
                    el("ul")
                        .class("t2-list")
                        .children(d.certificates.iter().map(|c| el("li").text(&c.name))),
                ),
            );
        }
        if !d.activities.is_empty() {
            row = row.child(section("HOẠT ĐỘNG").children(d.activities.iter().map(|a| {
                div("t2-act-item")
                    .child(div("t2-act-name").text(&a.name))
                    .child(
                        (!a.description.is_empty())
                            .then(|| div("t2-text").multiline(&a.description).build()),
                    )
            })));
        }
        body = body.child(row);
    }

    body = body.child(research_block(
        &d.research,
        &ResearchClasses {
            wrap: "t2-section",
            title: "t2-section-title",
            name: "t2-exp-company",
            meta: "t2-exp-position",
            desc: "t2-text",
        },
    ));
    if !displayable_research(&d.research).is_empty() {
        body = body.child(div("t2-divider").attr("style", "margin-bottom:0"));
    }

    body.build()
}
