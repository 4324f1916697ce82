//! Standalone HTML page around a rendered surface, used for the live preview frame and
//! for the print-ready export.

use crate::models::document::CvDocument;
use crate::models::template::{AccentColor, TemplateId};
use crate::render::markup::{escape, Markup};

/// Template styles, including A4 `@page` rules for the print pipeline.
pub const STYLESHEET: &str = include_str!("../../assets/cv.css");

const AUTO_PRINT_SCRIPT: &str =
    "<script>window.addEventListener('load',function(){window.print();});</script>";

#[derive(Debug, Clone, Copy, Default)]
pub struct PageOptions {
    /// Opens the host print dialog as soon as the page loads.
    pub auto_print: bool,
}

pub fn render_page(
    doc: &CvDocument,
    template: TemplateId,
    accent: &AccentColor,
    title: &str,
) -> String {
    render_page_with(doc, template, accent, title, PageOptions::default())
}

pub fn render_page_with(
    doc: &CvDocument,
    template: TemplateId,
    accent: &AccentColor,
    title: &str,
    options: PageOptions,
) -> String {
    wrap_surface(&super::render(doc, template, accent), title, options)
}

/// Embeds an already rendered surface in a full document.
pub fn wrap_surface(surface: &Markup, title: &str, options: PageOptions) -> String {
    let mut html = String::with_capacity(STYLESHEET.len() + surface.as_str().len() + 256);
    html.push_str("<!DOCTYPE html><html lang=\"vi\"><head><meta charset=\"utf-8\">");
    html.push_str("<title>");
    html.push_str(&escape(title));
    html.push_str("</title><style>");
    html.push_str(STYLESHEET);
    html.push_str("</style>");
    if options.auto_print {
        html.push_str(AUTO_PRINT_SCRIPT);
    }
    html.push_str("</head><body><div id=\"cv-preview\">");
    html.push_str(surface.as_str());
    html.push_str("</div></body></html>");
    html
}
