//! CV document model: the single aggregate edited by the form controller.
//!
//! Field names serialize in camelCase so documents saved by earlier builds keep loading.
//! Every repeatable list holds at least one entry; removal at size 1 is a no-op.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;

// ────────────────────────────────────────────────────────────────────────────
// Skill levels
// ────────────────────────────────────────────────────────────────────────────

/// The six ordinal skill labels, lowest → highest, in the source locale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum SkillLevel {
    #[serde(rename = "Cơ bản")]
    Basic,
    #[serde(rename = "Tốt")]
    Good,
    #[serde(rename = "Khá")]
    Fair,
    #[serde(rename = "Giỏi")]
    Great,
    #[serde(rename = "Thành thạo")]
    Proficient,
    #[serde(rename = "Chuyên gia")]
    Expert,
}

impl SkillLevel {
    pub const ALL: [SkillLevel; 6] = [
        SkillLevel::Basic,
        SkillLevel::Good,
        SkillLevel::Fair,
        SkillLevel::Great,
        SkillLevel::Proficient,
        SkillLevel::Expert,
    ];

    pub fn label(self) -> &'static str {
        match self {
            SkillLevel::Basic => "Cơ bản",
            SkillLevel::Good => "Tốt",
            SkillLevel::Fair => "Khá",
            SkillLevel::Great => "Giỏi",
            SkillLevel::Proficient => "Thành thạo",
            SkillLevel::Expert => "Chuyên gia",
        }
    }

    /// Exact label match. Unknown labels yield `None` and render with defaults.
    pub fn parse(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|l| l.label() == label)
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Document types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Personal {
    pub name: String,
    pub title: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub dob: String,
    /// Data URI of the uploaded image, or empty.
    pub avatar: String,
    pub linkedin: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Experience {
    pub company: String,
    pub position: String,
    pub start_date: String,
    /// Kept even while `current` is set; the renderer shows "present" instead.
    pub end_date: String,
    pub current: bool,
    pub description: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Education {
    pub school: String,
    pub major: String,
    pub start_year: String,
    pub end_year: String,
    pub grade: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Skill {
    pub name: String,
    /// Free label; see [`SkillLevel::parse`].
    pub level: String,
}

impl Default for Skill {
    fn default() -> Self {
        Self {
            name: String::new(),
            level: SkillLevel::Good.label().to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Certificate {
    pub name: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Activity {
    pub name: String,
    pub description: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Research {
    pub title: String,
    pub role: String,
    pub year: String,
    pub description: String,
}

impl Research {
    /// Role and year alone do not qualify an entry for display.
    pub fn is_displayable(&self) -> bool {
        !self.title.is_empty() || !self.description.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CvDocument {
    pub personal: Personal,
    pub objective: String,
    pub experience: Vec<Experience>,
    pub education: Vec<Education>,
    pub skills: Vec<Skill>,
    pub certificates: Vec<Certificate>,
    pub activities: Vec<Activity>,
    pub research: Vec<Research>,
}

impl Default for CvDocument {
    fn default() -> Self {
        Self {
            personal: Personal::default(),
            objective: String::new(),
            experience: vec![Experience::default()],
            education: vec![Education::default()],
            skills: vec![Skill::default()],
            certificates: vec![Certificate::default()],
            activities: vec![Activity::default()],
            research: vec![Research::default()],
        }
    }
}

/// Zero-state document: empty fields, one blank entry per repeatable list.
pub fn create_default_document() -> CvDocument {
    CvDocument::default()
}

// ────────────────────────────────────────────────────────────────────────────
// Sections & fields
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Section {
    Experience,
    Education,
    Skills,
    Certificates,
    Activities,
    Research,
}

impl Section {
    pub const ALL: [Section; 6] = [
        Section::Experience,
        Section::Education,
        Section::Skills,
        Section::Certificates,
        Section::Activities,
        Section::Research,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Section::Experience => "experience",
            Section::Education => "education",
            Section::Skills => "skills",
            Section::Certificates => "certificates",
            Section::Activities => "activities",
            Section::Research => "research",
        }
    }
}

/// Single-line personal fields editable from the form. The avatar has its own ingestion path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PersonalField {
    Name,
    Title,
    Email,
    Phone,
    Address,
    Dob,
    Linkedin,
}

/// A form value: text inputs send strings, the "currently working here" checkbox a bool.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Text(String),
    Flag(bool),
}

#[derive(Debug, Error, PartialEq)]
pub enum FieldError {
    #[error("{section} has no item at index {index}")]
    IndexOutOfRange { section: &'static str, index: usize },

    #[error("{section} has no field '{field}'")]
    UnknownField { section: &'static str, field: String },

    #[error("field '{field}' expects a {expected} value")]
    TypeMismatch { field: String, expected: &'static str },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RemoveOutcome {
    Removed,
    /// The list is at its one-entry floor; nothing changed.
    AtFloor,
    OutOfRange,
}

/// Field access shared by every repeatable-list item.
trait SectionItem {
    fn text_field_mut(&mut self, field: &str) -> Option<&mut String>;

    fn flag_field_mut(&mut self, _field: &str) -> Option<&mut bool> {
        None
    }
}

impl SectionItem for Experience {
    fn text_field_mut(&mut self, field: &str) -> Option<&mut String> {
        match field {
            "company" => Some(&mut self.company),
            "position" => Some(&mut self.position),
            "startDate" => Some(&mut self.start_date),
            "endDate" => Some(&mut self.end_date),
            "description" => Some(&mut self.description),
            _ => None,
        }
    }

    fn flag_field_mut(&mut self, field: &str) -> Option<&mut bool> {
        (field == "current").then_some(&mut self.current)
    }
}

impl SectionItem for Education {
    fn text_field_mut(&mut self, field: &str) -> Option<&mut String> {
        match field {
            "school" => Some(&mut self.school),
            "major" => Some(&mut self.major),
            "startYear" => Some(&mut self.start_year),
            "endYear" => Some(&mut self.end_year),
            "grade" => Some(&mut self.grade),
            _ => None,
        }
    }
}

impl SectionItem for Skill {
    fn text_field_mut(&mut self, field: &str) -> Option<&mut String> {
        match field {
            "name" => Some(&mut self.name),
            "level" => Some(&mut self.level),
            _ => None,
        }
    }
}

impl SectionItem for Certificate {
    fn text_field_mut(&mut self, field: &str) -> Option<&mut String> {
        (field == "name").then_some(&mut self.name)
    }
}

impl SectionItem for Activity {
    fn text_field_mut(&mut self, field: &str) -> Option<&mut String> {
        match field {
            "name" => Some(&mut self.name),
            "description" => Some(&mut self.description),
            _ => None,
        }
    }
}

impl SectionItem for Research {
    fn text_field_mut(&mut self, field: &str) -> Option<&mut String> {
        match field {
            "title" => Some(&mut self.title),
            "role" => Some(&mut self.role),
            "year" => Some(&mut self.year),
            "description" => Some(&mut self.description),
            _ => None,
        }
    }
}

fn set_list_field<T: SectionItem>(
    list: &mut [T],
    section: Section,
    index: usize,
    field: &str,
    value: FieldValue,
) -> Result<(), FieldError> {
    let item = list.get_mut(index).ok_or(FieldError::IndexOutOfRange {
        section: section.as_str(),
        index,
    })?;

    match value {
        FieldValue::Text(text) => {
            if let Some(slot) = item.text_field_mut(field) {
                *slot = text;
                Ok(())
            } else if item.flag_field_mut(field).is_some() {
                Err(FieldError::TypeMismatch {
                    field: field.to_string(),
                    expected: "boolean",
                })
            } else {
                Err(FieldError::UnknownField {
                    section: section.as_str(),
                    field: field.to_string(),
                })
            }
        }
        FieldValue::Flag(flag) => {
            if let Some(slot) = item.flag_field_mut(field) {
                *slot = flag;
                Ok(())
            } else if item.text_field_mut(field).is_some() {
                Err(FieldError::TypeMismatch {
                    field: field.to_string(),
                    expected: "string",
                })
            } else {
                Err(FieldError::UnknownField {
                    section: section.as_str(),
                    field: field.to_string(),
                })
            }
        }
    }
}

fn remove_with_floor<T>(list: &mut Vec<T>, index: usize) -> RemoveOutcome {
    if index >= list.len() {
        return RemoveOutcome::OutOfRange;
    }
    if list.len() <= 1 {
        return RemoveOutcome::AtFloor;
    }
    list.remove(index);
    RemoveOutcome::Removed
}

impl CvDocument {
    pub fn len(&self, section: Section) -> usize {
        match section {
            Section::Experience => self.experience.len(),
            Section::Education => self.education.len(),
            Section::Skills => self.skills.len(),
            Section::Certificates => self.certificates.len(),
            Section::Activities => self.activities.len(),
            Section::Research => self.research.len(),
        }
    }

    pub fn set_personal(&mut self, field: PersonalField, value: String) {
        let p = &mut self.personal;
        let slot = match field {
            PersonalField::Name => &mut p.name,
            PersonalField::Title => &mut p.title,
            PersonalField::Email => &mut p.email,
            PersonalField::Phone => &mut p.phone,
            PersonalField::Address => &mut p.address,
            PersonalField::Dob => &mut p.dob,
            PersonalField::Linkedin => &mut p.linkedin,
        };
        *slot = value;
    }

    /// Appends one blank entry and returns its index.
    pub fn add_item(&mut self, section: Section) -> usize {
        match section {
            Section::Experience => self.experience.push(Experience::default()),
            Section::Education => self.education.push(Education::default()),
            Section::Skills => self.skills.push(Skill::default()),
            Section::Certificates => self.certificates.push(Certificate::default()),
            Section::Activities => self.activities.push(Activity::default()),
            Section::Research => self.research.push(Research::default()),
        }
        self.len(section) - 1
    }

    pub fn remove_item(&mut self, section: Section, index: usize) -> RemoveOutcome {
        match section {
            Section::Experience => remove_with_floor(&mut self.experience, index),
            Section::Education => remove_with_floor(&mut self.education, index),
            Section::Skills => remove_with_floor(&mut self.skills, index),
            Section::Certificates => remove_with_floor(&mut self.certificates, index),
            Section::Activities => remove_with_floor(&mut self.activities, index),
            Section::Research => remove_with_floor(&mut self.research, index),
        }
    }

    /// Updates one field of one list item. Field names are the persisted camelCase names.
    pub fn set_item_field(
        &mut self,
        section: Section,
        index: usize,
        field: &str,
        value: FieldValue,
    ) -> Result<(), FieldError> {
        match section {
            Section::Experience => set_list_field(&mut self.experience, section, index, field, value),
            Section::Education => set_list_field(&mut self.education, section, index, field, value),
            Section::Skills => set_list_field(&mut self.skills, section, index, field, value),
            Section::Certificates => {
                set_list_field(&mut self.certificates, section, index, field, value)
            }
            Section::Activities => set_list_field(&mut self.activities, section, index, field, value),
            Section::Research => set_list_field(&mut self.research, section, index, field, value),
        }
    }

    /// Builds a document from persisted JSON, field by field.
    ///
    /// A missing or malformed field falls back to its default without discarding the rest.
    /// Absent or empty lists are seeded with one blank entry, which also backfills `research`
    /// for documents saved before that section existed. Returns `None` if `value` is not an object.
    pub fn from_value(value: Value) -> Option<Self> {
        let Value::Object(mut obj) = value else {
            return None;
        };

        Some(Self {
            personal: take_field(&mut obj, "personal").unwrap_or_default(),
            objective: take_field(&mut obj, "objective").unwrap_or_default(),
            experience: take_list(&mut obj, "experience"),
            education: take_list(&mut obj, "education"),
            skills: take_list(&mut obj, "skills"),
            certificates: take_list(&mut obj, "certificates"),
            activities: take_list(&mut obj, "activities"),
            research: take_list(&mut obj, "research"),
        })
    }
}

fn take_field<T: serde::de::DeserializeOwned>(obj: &mut Map<String, Value>, key: &str) -> Option<T> {
    obj.remove(key)
        .and_then(|v| serde_json::from_value(v).ok())
}

/// Items decode one at a time; a malformed item is dropped without losing its siblings.
fn take_list<T: serde::de::DeserializeOwned + Default>(
    obj: &mut Map<String, Value>,
    key: &str,
) -> Vec<T> {
    let list: Vec<T> = match obj.remove(key) {
        Some(Value::Array(items)) => items
            .into_iter()
            .filter_map(|item| serde_json::from_value(item).ok())
            .collect(),
        _ => Vec::new(),
    };
    if list.is_empty() {
        vec![T::default()]
    } else {
        list
    }
}
