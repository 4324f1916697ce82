// Template rendering engine.
// Pure functions: (document, template, accent) → markup. No I/O, no shared state.

pub mod classic;
pub mod creative;
pub mod executive;
pub mod helpers;
pub mod markup;
pub mod minimal;
pub mod page;
pub mod professional;

pub use markup::Markup;
pub use page::render_page;

use crate::models::document::CvDocument;
use crate::models::template::{AccentColor, TemplateId};
use crate::render::markup::div;

/// CSS custom properties the stylesheet reads for accent-driven styling.
pub fn accent_style(accent: &AccentColor) -> String {
    format!(
        "--cv-color:{};--cv-color-light:{};--cv-color-mid:{}",
        accent,
        accent.rgba(0.1),
        accent.rgba(0.15)
    )
}

/// Renders one layout variant inside a surface element carrying the accent color.
pub fn render(doc: &CvDocument, template: TemplateId, accent: &AccentColor) -> Markup {
    let body = match template {
        TemplateId::Classic => classic::render(doc),
        TemplateId::Minimal => minimal::render(doc),
        TemplateId::Professional => professional::render(doc),
        TemplateId::Creative => creative::render(doc),
        TemplateId::Executive => executive::render(doc),
    };

    div("cv-surface")
        .attr("style", &accent_style(accent))
        .child(body)
        .build()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::document::{create_default_document, Research, Skill};
    use crate::render::helpers::{FALLBACK_NAME, FALLBACK_NAME_UPPER, FALLBACK_TITLE};

    fn color(t: TemplateId) -> AccentColor {
        t.default_color()
    }

    /// Structural class markers of every variant other than `t`.
    fn foreign_markers(t: TemplateId) -> Vec<String> {
        TemplateId::ALL
            .into_iter()
            .filter(|o| *o != t)
            .flat_map(|o| {
                let prefix = o.css_prefix();
                [format!("\"{prefix}-"), format!(" {prefix}\"")]
            })
            .collect()
    }

    #[test]
    fn test_default_document_renders_fallbacks_for_all_templates() {
        let doc = create_default_document();
        for t in TemplateId::ALL {
            let html = render(&doc, t, &color(t)).into_string();
            let name = if t == TemplateId::Executive {
                FALLBACK_NAME_UPPER
            } else {
                FALLBACK_NAME
            };
            assert!(html.contains(name), "template {t} missing name fallback");
            assert!(html.contains(FALLBACK_TITLE), "template {t} missing title fallback");
            assert!(html.contains(&format!("cv-template {}", t.css_prefix())));
        }
    }

    #[test]
    fn test_render_is_idempotent() {
        let mut doc = create_default_document();
        doc.personal.name = "Lan".into();
        doc.experience[0].description = "a\nb".into();
        for t in TemplateId::ALL {
            let a = render(&doc, t, &color(t));
            let b = render(&doc, t, &color(t));
            assert_eq!(a, b);
        }
    }

    #[test]
    fn test_unknown_id_renders_classic() {
        let doc = create_default_document();
        let c = color(TemplateId::Classic);
        assert_eq!(
            render(&doc, TemplateId::from(42), &c),
            render(&doc, TemplateId::Classic, &c)
        );
    }

    #[test]
    fn test_empty_lists_omit_section_headings() {
        let mut doc = create_default_document();
        doc.experience.clear();
        doc.education.clear();
        doc.skills.clear();
        doc.certificates.clear();
        doc.activities.clear();
        for t in TemplateId::ALL {
            let html = render(&doc, t, &color(t)).into_string();
            for heading in ["KINH NGHIỆM", "GIÁO DỤC", "KỸ NĂNG", "HOẠT ĐỘNG", "BẰNG CẤP", "CHỨNG CHỈ"] {
                assert!(!html.contains(heading), "template {t} still shows {heading}");
            }
        }
    }

    #[test]
    fn test_research_omitted_when_no_title_or_description() {
        let mut doc = create_default_document();
        doc.research = vec![
            Research {
                role: "Lead".into(),
                year: "2021".into(),
                ..Default::default()
            },
            Research::default(),
        ];
        for t in TemplateId::ALL {
            let html = render(&doc, t, &color(t)).into_string();
            assert!(!html.contains("NGHIÊN CỨU KHOA HỌC"), "template {t}");
            assert!(!html.contains("Lead"), "template {t}");
        }

        doc.research[1].title = "Sparse graphs".into();
        for t in TemplateId::ALL {
            let html = render(&doc, t, &color(t)).into_string();
            assert!(html.contains("NGHIÊN CỨU KHOA HỌC"), "template {t}");
            assert!(html.contains("Sparse graphs"), "template {t}");
        }
    }

    #[test]
    fn test_text_fields_are_escaped_everywhere() {
        let hostile = r#"<script>alert("x")</script> & co"#;
        let mut doc = create_default_document();
        doc.personal.name = hostile.into();
        doc.personal.title = hostile.into();
        doc.personal.email = hostile.into();
        doc.experience[0].company = hostile.into();
        doc.education[0].school = hostile.into();
        doc.skills[0] = Skill {
            name: hostile.into(),
            level: hostile.into(),
        };
        doc.certificates[0].name = hostile.into();
        doc.activities[0].name = hostile.into();
        doc.research[0].title = hostile.into();

        for t in TemplateId::ALL {
            let html = render(&doc, t, &color(t)).into_string();
            assert!(!html.contains("<script>"), "template {t}");
            assert!(!html.contains(r#""x""#), "template {t}");
            assert!(!html.contains(" & co"), "template {t}");
            assert!(html.contains("&lt;script&gt;alert(&quot;x&quot;)&lt;/script&gt; &amp; co"));
        }
    }

    #[test]
    fn test_multiline_description_breaks_after_escaping() {
        let mut doc = create_default_document();
        doc.experience[0].description = "Built R&D lab\nShipped <v2>".into();
        for t in TemplateId::ALL {
            let html = render(&doc, t, &color(t)).into_string();
            assert!(
                html.contains("Built R&amp;D lab<br>Shipped &lt;v2&gt;"),
                "template {t}"
            );
        }
    }

    #[test]
    fn test_skill_visuals_per_template() {
        let mut doc = create_default_document();
        doc.skills[0] = Skill {
            name: "Rust".into(),
            level: "Chuyên gia".into(),
        };
        let t1 = render(&doc, TemplateId::Classic, &color(TemplateId::Classic)).into_string();
        assert_eq!(t1.matches("rgba(255,255,255,0.9)").count(), 5);

        let t2 = render(&doc, TemplateId::Minimal, &color(TemplateId::Minimal)).into_string();
        assert_eq!(t2.matches("var(--cv-color, #1a73e8)").count(), 5);

        let t3 = render(&doc, TemplateId::Professional, &color(TemplateId::Professional)).into_string();
        assert!(t3.contains(r#"class="t3-skill-bar" style="width:100%""#));

        let t4 = render(&doc, TemplateId::Creative, &color(TemplateId::Creative)).into_string();
        assert!(t4.contains(r#"<span class="t4-tag">Chuyên gia</span>"#));

        let t5 = render(&doc, TemplateId::Executive, &color(TemplateId::Executive)).into_string();
        assert!(t5.contains(r#"<span class="t5-skill-level">Chuyên gia</span>"#));
    }

    #[test]
    fn test_avatar_image_or_placeholder() {
        let mut doc = create_default_document();
        let t1 = render(&doc, TemplateId::Classic, &color(TemplateId::Classic)).into_string();
        assert!(t1.contains("t1-avatar-placeholder"));
        assert!(t1.contains("<svg"));

        doc.personal.avatar = "data:image/png;base64,iVBORw0KGgo=".into();
        for t in TemplateId::ALL {
            let html = render(&doc, t, &color(t)).into_string();
            assert!(html.contains(r#"src="data:image/png;base64,iVBORw0KGgo=""#));
            assert!(!html.contains("avatar-placeholder"));
        }
    }

    #[test]
    fn test_current_position_hides_end_date() {
        let mut doc = create_default_document();
        doc.experience[0].start_date = "03/2021".into();
        doc.experience[0].end_date = "05/2024".into();
        doc.experience[0].current = true;
        for t in TemplateId::ALL {
            let html = render(&doc, t, &color(t)).into_string();
            assert!(html.contains("03/2021 – Hiện tại"), "template {t}");
            assert!(!html.contains("05/2024"), "template {t}");
        }
    }

    #[test]
    fn test_linkedin_only_in_classic() {
        let mut doc = create_default_document();
        doc.personal.linkedin = "linkedin.com/in/lan".into();
        for t in TemplateId::ALL {
            let html = render(&doc, t, &color(t)).into_string();
            assert_eq!(html.contains("linkedin.com/in/lan"), t == TemplateId::Classic);
        }
    }

    #[test]
    fn test_surface_carries_accent() {
        let doc = create_default_document();
        let accent = AccentColor::parse("#112233").unwrap();
        let html = render(&doc, TemplateId::Creative, &accent).into_string();
        assert!(html.starts_with(
            r#"<div class="cv-surface" style="--cv-color:#112233;--cv-color-light:rgba(17,34,51,0.1);--cv-color-mid:rgba(17,34,51,0.15)">"#
        ));
    }

    #[test]
    fn test_end_to_end_template_three() {
        let mut doc = create_default_document();
        doc.personal.name = "Nguyen Van A".into();
        let accent = AccentColor::parse("#112233").unwrap();
        let html = render(&doc, TemplateId::Professional, &accent).into_string();
        assert!(html.contains(r#"<h1 class="t3-name">Nguyen Van A</h1>"#));
        assert!(html.contains("--cv-color:#112233"));
        for marker in foreign_markers(TemplateId::Professional) {
            assert!(!html.contains(&marker), "found foreign marker {marker}");
        }
    }

    #[test]
    fn test_variants_are_structurally_distinct() {
        let doc = create_default_document();
        for t in TemplateId::ALL {
            let html = render(&doc, t, &color(t)).into_string();
            for marker in foreign_markers(t) {
                assert!(!html.contains(&marker), "template {t} has {marker}");
            }
        }
    }
}
