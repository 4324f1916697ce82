//! Building blocks shared by the five layout variants.

use crate::models::document::{Experience, Education, Research, SkillLevel};
use crate::render::markup::{div, el, Markup};

// ────────────────────────────────────────────────────────────────────────────
// Fixed labels (source locale)
// ────────────────────────────────────────────────────────────────────────────

pub const FALLBACK_NAME: &str = "Họ và Tên";
pub const FALLBACK_NAME_UPPER: &str = "HỌ VÀ TÊN";
pub const FALLBACK_TITLE: &str = "Vị trí ứng tuyển";
pub const PRESENT: &str = "Hiện tại";
pub const RESEARCH_HEADING: &str = "NGHIÊN CỨU KHOA HỌC";

/// Escaped value, or the fallback label when the field is empty.
pub fn or_fallback(value: &str, fallback: &'static str) -> Markup {
    if value.is_empty() {
        Markup::trusted(fallback)
    } else {
        Markup::text(value)
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Skill level mappings
// ────────────────────────────────────────────────────────────────────────────

const DOT_SCALE: usize = 5;
const DEFAULT_DOTS: usize = 3;
const DEFAULT_BAR_PERCENT: u8 = 60;

/// Filled dots on the 5-dot scale. Unknown labels get 3.
pub fn filled_dots(level: &str) -> usize {
    match SkillLevel::parse(level) {
        Some(SkillLevel::Basic) => 1,
        Some(SkillLevel::Good) | Some(SkillLevel::Fair) => 2,
        Some(SkillLevel::Great) => 3,
        Some(SkillLevel::Proficient) => 4,
        Some(SkillLevel::Expert) => 5,
        None => DEFAULT_DOTS,
    }
}

/// Bar width in percent. Unknown labels get 60.
pub fn bar_percent(level: &str) -> u8 {
    match SkillLevel::parse(level) {
        Some(SkillLevel::Basic) => 20,
        Some(SkillLevel::Good) | Some(SkillLevel::Fair) => 40,
        Some(SkillLevel::Great) => 60,
        Some(SkillLevel::Proficient) => 80,
        Some(SkillLevel::Expert) => 100,
        None => DEFAULT_BAR_PERCENT,
    }
}

/// Fill contract for the dot scale.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DotPalette {
    /// White dots for dark backgrounds.
    Inverted,
    /// Accent-colored dots for light backgrounds.
    Accent,
}

impl DotPalette {
    fn fill(self, filled: bool) -> &'static str {
        match (self, filled) {
            (DotPalette::Inverted, true) => "background:rgba(255,255,255,0.9)",
            (DotPalette::Inverted, false) => "background:rgba(255,255,255,0.25)",
            (DotPalette::Accent, true) => "background:var(--cv-color, #1a73e8)",
            (DotPalette::Accent, false) => "background:#ddd",
        }
    }
}

pub fn skill_dots(level: &str, palette: DotPalette) -> Markup {
    let filled = filled_dots(level);
    el("span")
        .class("skill-dots")
        .children((1..=DOT_SCALE).map(|i| {
            el("span")
                .class("dot")
                .attr("style", palette.fill(i <= filled))
        }))
        .build()
}

pub fn skill_bar_style(level: &str) -> String {
    format!("width:{}%", bar_percent(level))
}

// ────────────────────────────────────────────────────────────────────────────
// Dates
// ────────────────────────────────────────────────────────────────────────────

/// `start – end`, or `start – present` for a current position.
pub fn experience_dates(e: &Experience) -> Markup {
    let mut out = Markup::text(&e.start_date);
    if !e.start_date.is_empty() || !e.end_date.is_empty() {
        out.push(Markup::trusted(" – "));
    }
    if e.current {
        out.push(Markup::trusted(PRESENT));
    } else {
        out.push(Markup::text(&e.end_date));
    }
    out
}

/// `start<sep>end`, separator only when both years are present.
pub fn education_years(e: &Education, separator: &'static str) -> Markup {
    let mut out = Markup::text(&e.start_year);
    if !e.start_year.is_empty() && !e.end_year.is_empty() {
        out.push(Markup::trusted(separator));
    }
    out.push(Markup::text(&e.end_year));
    out
}

/// Years followed by `<prefix>grade` when a grade is set.
pub fn education_meta(e: &Education, years_sep: &'static str, grade_prefix: &'static str) -> Markup {
    let mut out = education_years(e, years_sep);
    if !e.grade.is_empty() {
        out.push(Markup::trusted(grade_prefix));
        out.push(Markup::text(&e.grade));
    }
    out
}

// ────────────────────────────────────────────────────────────────────────────
// Identity
// ────────────────────────────────────────────────────────────────────────────

/// The avatar image when set, otherwise the given placeholder.
/// The data URI is used as an opaque image source; the builder escapes it as an attribute.
pub fn avatar(src: &str, img_class: &'static str, placeholder: Markup) -> Markup {
    if src.is_empty() {
        placeholder
    } else {
        el("img")
            .attr("src", src)
            .class(img_class)
            .attr("alt", "avatar")
            .build()
    }
}

pub const PERSON_GLYPH: &str = r#"<svg viewBox="0 0 24 24" fill="rgba(255,255,255,0.4)"><path d="M12 12c2.7 0 4.8-2.1 4.8-4.8S14.7 2.4 12 2.4 7.2 4.5 7.2 7.2 9.3 12 12 12zm0 2.4c-3.2 0-9.6 1.6-9.6 4.8v2.4h19.2v-2.4c0-3.2-6.4-4.8-9.6-4.8z"/></svg>"#;

pub mod icons {
    pub const PHONE: &str = r#"<path d="M6.6 10.8c1.4 2.8 3.8 5.1 6.6 6.6l2.2-2.2c.3-.3.7-.4 1-.2 1.1.4 2.3.6 3.6.6.6 0 1 .4 1 1V20c0 .6-.4 1-1 1-9.4 0-17-7.6-17-17 0-.6.4-1 1-1h3.5c.6 0 1 .4 1 1 0 1.3.2 2.5.6 3.6.1.3 0 .7-.2 1L6.6 10.8z"/>"#;
    pub const EMAIL: &str = r#"<path d="M20 4H4c-1.1 0-2 .9-2 2v12c0 1.1.9 2 2 2h16c1.1 0 2-.9 2-2V6c0-1.1-.9-2-2-2zm0 4l-8 5-8-5V6l8 5 8-5v2z"/>"#;
    pub const ADDRESS: &str = r#"<path d="M12 2C8.13 2 5 5.13 5 9c0 5.25 7 13 7 13s7-7.75 7-13c0-3.87-3.13-7-7-7zm0 9.5c-1.38 0-2.5-1.12-2.5-2.5s1.12-2.5 2.5-2.5 2.5 1.12 2.5 2.5-1.12 2.5-2.5 2.5z"/>"#;
    pub const CALENDAR: &str = r#"<path d="M19 3h-1V1h-2v2H8V1H6v2H5c-1.1 0-2 .9-2 2v14c0 1.1.9 2 2 2h14c1.1 0 2-.9 2-2V5c0-1.1-.9-2-2-2zm0 16H5V8h14v11zM7 10h5v5H7z"/>"#;
    pub const LINKEDIN: &str = r#"<path d="M20.447 20.452h-3.554v-5.569c0-1.328-.027-3.037-1.852-3.037-1.853 0-2.136 1.445-2.136 2.939v5.667H9.351V9h3.414v1.561h.046c.477-.9 1.637-1.85 3.37-1.85 3.601 0 4.267 2.37 4.267 5.455v6.286zM5.337 7.433c-1.144 0-2.063-.926-2.063-2.065 0-1.138.92-2.063 2.063-2.063 1.14 0 2.064.925 2.064 2.063 0 1.139-.925 2.065-2.064 2.065zm1.782 13.019H3.555V9h3.564v11.452zM22.225 0H1.771C.792 0 0 .774 0 1.729v20.542C0 23.227.792 24 1.771 24h20.451C23.2 24 24 23.227 24 22.271V1.729C24 .774 23.2 0 22.222 0h.003z"/>"#;
}

/// Contact kinds in display order, paired with their glyph paths.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContactKind {
    Phone,
    Email,
    Address,
    Dob,
    Linkedin,
}

impl ContactKind {
    pub fn icon_path(self) -> &'static str {
        match self {
            ContactKind::Phone => icons::PHONE,
            ContactKind::Email => icons::EMAIL,
            ContactKind::Address => icons::ADDRESS,
            ContactKind::Dob => icons::CALENDAR,
            ContactKind::Linkedin => icons::LINKEDIN,
        }
    }
}

/// Non-empty contact fields in display order. LinkedIn is included only when asked for.
pub fn contacts(
    p: &crate::models::document::Personal,
    with_linkedin: bool,
) -> Vec<(ContactKind, &str)> {
    let mut out = vec![
        (ContactKind::Phone, p.phone.as_str()),
        (ContactKind::Email, p.email.as_str()),
        (ContactKind::Address, p.address.as_str()),
        (ContactKind::Dob, p.dob.as_str()),
    ];
    if with_linkedin {
        out.push((ContactKind::Linkedin, p.linkedin.as_str()));
    }
    out.retain(|(_, v)| !v.is_empty());
    out
}

/// `<svg viewBox="0 0 24 24" ...>path</svg>` with optional inline sizing.
pub fn icon(kind: ContactKind, sized: bool) -> Markup {
    let open = if sized {
        r#"<svg viewBox="0 0 24 24" width="12" height="12" fill="currentColor">"#
    } else {
        r#"<svg viewBox="0 0 24 24">"#
    };
    let mut m = Markup::trusted(open);
    m.push(Markup::trusted(kind.icon_path()));
    m.push(Markup::trusted("</svg>"));
    m
}

// ────────────────────────────────────────────────────────────────────────────
// Research
// ────────────────────────────────────────────────────────────────────────────

/// Research entries that qualify for display.
pub fn displayable_research(research: &[Research]) -> Vec<&Research> {
    research.iter().filter(|r| r.is_displayable()).collect()
}

/// Class names a variant plugs into the shared research block.
pub struct ResearchClasses {
    pub wrap: &'static str,
    pub title: &'static str,
    pub name: &'static str,
    pub meta: &'static str,
    pub desc: &'static str,
}

/// `role · year`, either part optional.
pub fn research_meta(r: &Research) -> Markup {
    let mut out = Markup::text(&r.role);
    if !r.role.is_empty() && !r.year.is_empty() {
        out.push(Markup::trusted(" · "));
    }
    out.push(Markup::text(&r.year));
    out
}

/// Shared research section. Empty when no entry has a title or description.
pub fn research_block(research: &[Research], cls: &ResearchClasses) -> Markup {
    let list = displayable_research(research);
    if list.is_empty() {
        return Markup::empty();
    }

    div(cls.wrap)
        .child(div(cls.title).child(Markup::trusted(RESEARCH_HEADING)))
        .children(list.into_iter().map(|r| {
            el("div")
                .attr("style", "margin-bottom:12px")
                .child(div(cls.name).text(&r.title))
                .child(
                    (!r.role.is_empty() || !r.year.is_empty())
                        .then(|| div(cls.meta).child(research_meta(r)).build()),
                )
                .child(
                    (!r.description.is_empty())
                        .then(|| div(cls.desc).multiline(&r.description).build()),
                )
        }))
        .build()
}
