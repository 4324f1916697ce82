//! Escaping boundary for all rendered HTML.
//!
//! `Markup` is the only type the renderer emits, and it can only be produced by:
//! - escaping user text (`Markup::text`, `Markup::multiline`),
//! - static literals written in this crate (`Markup::trusted`),
//! - the element builder, which escapes every attribute value.
//!
//! Passing a raw `String` where markup is expected does not compile.

use std::borrow::Cow;
use std::fmt;

/// Entity-escapes `&`, `<`, `>` and `"`.
pub fn escape(input: &str) -> Cow<'_, str> {
    if !input.contains(['&', '<', '>', '"']) {
        return Cow::Borrowed(input);
    }
    let mut out = String::with_capacity(input.len() + 16);
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(c),
        }
    }
    Cow::Owned(out)
}

/// An HTML fragment that is safe to concatenate.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Markup(String);

impl Markup {
    pub fn empty() -> Self {
        Self(String::new())
    }

    /// Escaped single-line text.
    pub fn text(s: &str) -> Self {
        Self(escape(s).into_owned())
    }

    /// Escaped multi-line text: escape first, then turn each line break into `<br>`.
    pub fn multiline(s: &str) -> Self {
        let normalized = s.replace("\r\n", "\n");
        Self(escape(&normalized).replace('\n', "<br>"))
    }

    /// A literal fragment authored in this crate (icons, separators, section headings).
    pub fn trusted(s: &'static str) -> Self {
        Self(s.to_string())
    }

    pub fn push(&mut self, other: impl Into<Markup>) {
        self.0.push_str(&other.into().0);
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for Markup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromIterator<Markup> for Markup {
    fn from_iter<I: IntoIterator<Item = Markup>>(iter: I) -> Self {
        let mut out = Markup::empty();
        for m in iter {
            out.push(m);
        }
        out
    }
}

impl From<Option<Markup>> for Markup {
    fn from(m: Option<Markup>) -> Self {
        m.unwrap_or_default()
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Element builder
// ────────────────────────────────────────────────────────────────────────────

const VOID_TAGS: &[&str] = &["img", "br", "meta", "link", "input"];

/// Builder for a single element. Attribute names are static; values are escaped.
#[derive(Debug, Clone)]
pub struct Element {
    tag: &'static str,
    attrs: Vec<(&'static str, String)>,
    children: Markup,
}

pub fn el(tag: &'static str) -> Element {
    Element {
        tag,
        attrs: Vec::new(),
        children: Markup::empty(),
    }
}

/// Shorthand for the ubiquitous `<div class="...">`.
pub fn div(class: &'static str) -> Element {
    el("div").class(class)
}

impl Element {
    pub fn class(self, class: &'static str) -> Self {
        self.attr("class", class)
    }

    pub fn attr(mut self, name: &'static str, value: &str) -> Self {
        self.attrs.push((name, escape(value).into_owned()));
        self
    }

    pub fn child(mut self, child: impl Into<Markup>) -> Self {
        self.children.push(child);
        self
    }

    pub fn children<I, M>(mut self, children: I) -> Self
    where
        I: IntoIterator<Item = M>,
        M: Into<Markup>,
    {
        for c in children {
            self.children.push(c);
        }
        self
    }

    pub fn text(self, s: &str) -> Self {
        self.child(Markup::text(s))
    }

    pub fn multiline(self, s: &str) -> Self {
        self.child(Markup::multiline(s))
    }

    pub fn build(self) -> Markup {
        let mut out = String::with_capacity(self.children.0.len() + 32);
        out.push('<');
        out.push_str(self.tag);
        for (name, value) in &self.attrs {
            out.push(' ');
            out.push_str(name);
            out.push_str("=\"");
            out.push_str(value);
            out.push('"');
        }
        out.push('>');
        if !VOID_TAGS.contains(&self.tag) {
            out.push_str(&self.children.0);
            out.push_str("</");
            out.push_str(self.tag);
            out.push('>');
        }
        Markup(out)
    }
}

impl From<Element> for Markup {
    fn from(e: Element) -> Self {
        e.build()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_all_specials() {
        assert_eq!(
            escape(r#"<a href="x">Tom & Jerry</a>"#),
            "&lt;a href=&quot;x&quot;&gt;Tom &amp; Jerry&lt;/a&gt;"
        );
    }

    #[test]
    fn test_escape_borrows_clean_input() {
        assert!(matches!(escape("plain text"), Cow::Borrowed(_)));
    }

    #[test]
    fn test_multiline_escapes_before_breaking() {
        let m = Markup::multiline("R&D\n<b>led</b>");
        assert_eq!(m.as_str(), "R&amp;D<br>&lt;b&gt;led&lt;/b&gt;");
    }

    #[test]
    fn test_multiline_handles_crlf() {
        assert_eq!(Markup::multiline("a\r\nb").as_str(), "a<br>b");
    }

    #[test]
    fn test_attribute_values_are_escaped() {
        let m = el("img").attr("src", r#"x" onerror="alert(1)"#).build();
        assert_eq!(m.as_str(), r#"<img src="x&quot; onerror=&quot;alert(1)">"#);
    }

    #[test]
    fn test_nested_build() {
        let m = div("outer")
            .child(el("span").text("a<b"))
            .children(vec![Markup::trusted("<br>"), Markup::text("&")])
            .build();
        assert_eq!(
            m.as_str(),
            r#"<div class="outer"><span>a&lt;b</span><br>&amp;</div>"#
        );
    }

    #[test]
    fn test_collect_from_iter() {
        let m: Markup = ["a", "b"].iter().map(|s| Markup::text(s)).collect();
        assert_eq!(m.as_str(), "ab");
    }
}
