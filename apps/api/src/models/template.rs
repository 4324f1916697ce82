use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize, Serializer};
use thiserror::Error;

// ────────────────────────────────────────────────────────────────────────────
// Template selection
// ────────────────────────────────────────────────────────────────────────────

/// The five layout variants. Serializes as its numeric id (1–5).
/// Any unknown id converts to `Classic`.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(from = "u8", into = "u8")]
pub enum TemplateId {
    /// Dark sidebar on the left, content on the right.
    #[default]
    Classic = 1,
    /// Single column with an accent header.
    Minimal = 2,
    /// Colored header band over two equal columns.
    Professional = 3,
    /// Gradient header, tag-style skills.
    Creative = 4,
    /// Dark header, gold accent.
    Executive = 5,
}

impl TemplateId {
    pub const ALL: [TemplateId; 5] = [
        TemplateId::Classic,
        TemplateId::Minimal,
        TemplateId::Professional,
        TemplateId::Creative,
        TemplateId::Executive,
    ];

    pub fn id(self) -> u8 {
        self as u8
    }

    pub fn name(self) -> &'static str {
        match self {
            TemplateId::Classic => "classic",
            TemplateId::Minimal => "minimal",
            TemplateId::Professional => "professional",
            TemplateId::Creative => "creative",
            TemplateId::Executive => "executive",
        }
    }

    /// Root class of the variant's markup; every structural class starts with it.
    pub fn css_prefix(self) -> &'static str {
        match self {
            TemplateId::Classic => "t1",
            TemplateId::Minimal => "t2",
            TemplateId::Professional => "t3",
            TemplateId::Creative => "t4",
            TemplateId::Executive => "t5",
        }
    }

    pub fn default_color(self) -> AccentColor {
        let hex = match self {
            TemplateId::Classic => "#2c3e50",
            TemplateId::Minimal => "#1a73e8",
            TemplateId::Professional => "#34495e",
            TemplateId::Creative => "#6c63ff",
            TemplateId::Executive => "#c9a84c",
        };
        AccentColor(hex.to_string())
    }

    fn index(self) -> usize {
        self.id() as usize - 1
    }
}

impl From<u8> for TemplateId {
    fn from(id: u8) -> Self {
        match id {
            2 => TemplateId::Minimal,
            3 => TemplateId::Professional,
            4 => TemplateId::Creative,
            5 => TemplateId::Executive,
            _ => TemplateId::Classic,
        }
    }
}

impl From<TemplateId> for u8 {
    fn from(id: TemplateId) -> Self {
        id.id()
    }
}

impl fmt::Display for TemplateId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.id(), self.name())
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Accent colors
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Error, PartialEq)]
#[error("'{0}' is not a #rrggbb color")]
pub struct ColorError(pub String);

/// A validated `#rrggbb` color, stored lowercase.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct AccentColor(String);

impl AccentColor {
    pub fn parse(raw: &str) -> Result<Self, ColorError> {
        let raw = raw.trim();
        let valid = raw.len() == 7
            && raw.starts_with('#')
            && raw[1..].chars().all(|c| c.is_ascii_hexdigit());
        if valid {
            Ok(Self(raw.to_ascii_lowercase()))
        } else {
            Err(ColorError(raw.to_string()))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn rgb(&self) -> (u8, u8, u8) {
        let channel = |i: usize| u8::from_str_radix(&self.0[i..i + 2], 16).unwrap_or(0);
        (channel(1), channel(3), channel(5))
    }

    /// `rgba(r,g,b,alpha)` tint used for light backgrounds behind accent elements.
    pub fn rgba(&self, alpha: f32) -> String {
        let (r, g, b) = self.rgb();
        format!("rgba({r},{g},{b},{alpha})")
    }
}

impl TryFrom<String> for AccentColor {
    type Error = ColorError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<AccentColor> for String {
    fn from(color: AccentColor) -> Self {
        color.0
    }
}

impl fmt::Display for AccentColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Per-template color map
// ────────────────────────────────────────────────────────────────────────────

/// Accent color for every template id. Always total: a missing id holds its default.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColorMap {
    colors: [AccentColor; 5],
}

impl Default for ColorMap {
    fn default() -> Self {
        Self {
            colors: TemplateId::ALL.map(TemplateId::default_color),
        }
    }
}

impl ColorMap {
    /// Overlays a persisted record onto the defaults.
    /// Keys that are not ids 1–5 and values that are not valid colors are skipped.
    pub fn merged_over_defaults(saved: &BTreeMap<String, String>) -> Self {
        let mut map = Self::default();
        for (key, value) in saved {
            let Ok(id) = key.trim().parse::<u8>() else {
                continue;
            };
            if !(1..=5).contains(&id) {
                continue;
            }
            if let Ok(color) = AccentColor::parse(value) {
                map.set(TemplateId::from(id), color);
            }
        }
        map
    }

    pub fn get(&self, id: TemplateId) -> &AccentColor {
        &self.colors[id.index()]
    }

    pub fn set(&mut self, id: TemplateId, color: AccentColor) {
        self.colors[id.index()] = color;
    }

    pub fn reset(&mut self, id: TemplateId) {
        self.set(id, id.default_color());
    }

    /// Persisted shape: `{"1": "#2c3e50", ...}`.
    pub fn to_record(&self) -> BTreeMap<String, String> {
        TemplateId::ALL
            .into_iter()
            .map(|id| (id.id().to_string(), self.get(id).as_str().to_string()))
            .collect()
    }
}

impl Serialize for ColorMap {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_record().serialize(serializer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_template_id_falls_back_to_classic() {
        assert_eq!(TemplateId::from(0), TemplateId::Classic);
        assert_eq!(TemplateId::from(9), TemplateId::Classic);
        assert_eq!(TemplateId::from(4), TemplateId::Creative);
        let parsed: TemplateId = serde_json::from_str("7").unwrap();
        assert_eq!(parsed, TemplateId::Classic);
        assert_eq!(serde_json::to_string(&TemplateId::Executive).unwrap(), "5");
    }

    #[test]
    fn test_color_parse() {
        assert_eq!(AccentColor::parse("#FF0000").unwrap().as_str(), "#ff0000");
        assert!(AccentColor::parse("ff0000").is_err());
        assert!(AccentColor::parse("#ff00").is_err());
        assert!(AccentColor::parse("#gg0000").is_err());
    }

    #[test]
    fn test_rgba_tint() {
        let c = AccentColor::parse("#112233").unwrap();
        assert_eq!(c.rgb(), (0x11, 0x22, 0x33));
        assert_eq!(c.rgba(0.1), "rgba(17,34,51,0.1)");
    }

    #[test]
    fn test_color_map_merge_keeps_defaults() {
        let saved = BTreeMap::from([("2".to_string(), "#ff0000".to_string())]);
        let map = ColorMap::merged_over_defaults(&saved);
        assert_eq!(map.get(TemplateId::Classic).as_str(), "#2c3e50");
        assert_eq!(map.get(TemplateId::Minimal).as_str(), "#ff0000");
        assert_eq!(map.get(TemplateId::Professional).as_str(), "#34495e");
        assert_eq!(map.get(TemplateId::Creative).as_str(), "#6c63ff");
        assert_eq!(map.get(TemplateId::Executive).as_str(), "#c9a84c");
    }

    #[test]
    fn test_color_map_merge_skips_garbage() {
        let saved = BTreeMap::from([
            ("9".to_string(), "#ff0000".to_string()),
            ("x".to_string(), "#ff0000".to_string()),
            ("3".to_string(), "red".to_string()),
        ]);
        assert_eq!(ColorMap::merged_over_defaults(&saved), ColorMap::default());
    }

    #[test]
    fn test_color_map_reset() {
        let mut map = ColorMap::default();
        map.set(TemplateId::Creative, AccentColor::parse("#000000").unwrap());
        map.reset(TemplateId::Creative);
        assert_eq!(map, ColorMap::default());
    }

    #[test]
    fn test_color_map_serializes_as_record() {
        let value = serde_json::to_value(ColorMap::default()).unwrap();
        assert_eq!(value["1"], "#2c3e50");
        assert_eq!(value["5"], "#c9a84c");
    }
}
