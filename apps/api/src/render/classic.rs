//! Template 1: dark sidebar with identity, contacts, education, skills and certificates;
//! light main column with objective, experience, activities and research.

use crate::models::document::CvDocument;
use crate::render::helpers::{
    avatar, contacts, education_years, experience_dates, icon, or_fallback, research_block,
    skill_dots, DotPalette, ResearchClasses, FALLBACK_NAME, FALLBACK_TITLE, PERSON_GLYPH,
};
use crate::render::markup::{div, el, Markup};

pub fn render(d: &CvDocument) -> Markup {
    div("cv-template t1")
        .child(sidebar(d))
        .child(main_column(d))
        .build()
}

fn sidebar(d: &CvDocument) -> Markup {
    let p = &d.personal;
    let placeholder = div("t1-avatar-placeholder")
        .child(Markup::trusted(PERSON_GLYPH))
        .build();

    let mut side = div("t1-sidebar")
        .child(div("t1-avatar-wrap").child(avatar(&p.avatar, "t1-avatar", placeholder)))
        .child(div("t1-name").child(or_fallback(&p.name, FALLBACK_NAME)))
        .child(div("t1-title").child(or_fallback(&p.title, FALLBACK_TITLE)))
        .child(div("t1-section-title").child(Markup::trusted("LIÊN HỆ")))
        .child(div("t1-contact-list").children(contacts(p, true).into_iter().map(
            |(kind, value)| {
                div("t1-contact-item")
                    .child(icon(kind, false))
                    .child(el("span").text(value))
            },
        )));

    if !d.education.is_empty() {
        side = side
            .child(div("t1-section-title").child(Markup::trusted("GIÁO DỤC")))
            .children(d.education.iter().map(|e| {
                div("t1-edu-item")
                    .child(div("t1-edu-year").child(education_years(e, " – ")))
                    .child(div("t1-edu-major").text(&e.major))
                    .child(div("t1-edu-school").text(&e.school))
                    .child((!e.grade.is_empty()).then(|| {
                        div("t1-edu-grade")
                            .child(Markup::trusted("Loại: "))
                            .text(&e.grade)
                            .build()
                    }))
            }));
    }

    if !d.skills.is_empty() {
        side = side
            .child(div("t1-section-title").child(Markup::trusted("KỸ NĂNG")))
            .children(d.skills.iter().map(|s| {
                div("t1-skill-item")
                    .child(el("span").class("t1-skill-name").text(&s.name))
                    .child(skill_dots(&s.level, DotPalette::Inverted))
            }));
    }

    if !d.certificates.is_empty() {
        side = side
            .child(div("t1-section-title").child(Markup::trusted("BẰNG CẤP")))
            .child(
                el("ul")
                    .class("t1-list")
                    .children(d.certificates.iter().map(|c| el("li").text(&c.name))),
            );
    }

    side.build()
}

fn main_column(d: &CvDocument) -> Markup {
    let mut main = div("t1-main");

    if !d.objective.is_empty() {
        main = main.child(
            div("t1-main-section")
                .child(div("t1-main-section-title").child(Markup::trusted("MỤC TIÊU NGHỀ NGHIỆP")))
                .child(el("p").class("t1-objective").multiline(&d.objective)),
        );
    }

    if !d.experience.is_empty() {
        main = main.child(
            div("t1-main-section")
                .child(div("t1-main-section-title").child(Markup::trusted("KINH NGHIỆM LÀM VIỆC")))
                .children(d.experience.iter().map(|e| {
                    div("t1-exp-item")
                        .child(
                            div("t1-exp-header")
                                .child(
                                    el("div")
                                        .child(div("t1-exp-company").text(&e.company))
                                        .child(div("t1-exp-position").text(&e.position)),
                                )
                                .child(div("t1-exp-date").child(experience_dates(e))),
                        )
                        .child((!e.description.is_empty()).then(|| {
                            div("t1-exp-desc").multiline(&e.description).build()
                        }))
                })),
        );
    }

    if !d.activities.is_empty() {
        main = main.child(
            div("t1-main-section")
                .child(div("t1-main-section-title").child(Markup::trusted("HOẠT ĐỘNG")))
                .children(d.activities.iter().map(|a| {
                    div("t1-act-item")
                        .child(div("t1-act-name").text(&a.name))
                        .child((!a.description.is_empty()).then(|| {
                            div("t1-act-desc").multiline(&a.description).build()
                        }))
                })),
        );
    }

    main.child(research_block(
        &d.research,
        &ResearchClasses {
            wrap: "t1-main-section",
            title: "t1-main-section-title",
            name: "t1-exp-company",
            meta: "t1-exp-position",
            desc: "t1-exp-desc",
        },
    ))
    .build()
}
