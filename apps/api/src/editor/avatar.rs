//! Avatar ingestion: image detection, data-URI encoding and last-request-wins tickets.

use base64::{engine::general_purpose::STANDARD, Engine as _};

/// Issued when an avatar read starts. Only the most recently issued ticket may apply its result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AvatarTicket(u64);

#[derive(Debug, Default)]
pub struct TicketBook {
    latest: u64,
}

impl TicketBook {
    pub fn issue(&mut self) -> AvatarTicket {
        self.latest += 1;
        AvatarTicket(self.latest)
    }

    pub fn is_current(&self, ticket: AvatarTicket) -> bool {
        ticket.0 == self.latest
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AvatarOutcome {
    Applied,
    /// Not an image; the previous avatar is kept.
    Ignored,
    /// A newer avatar request was issued while this one was being read.
    Superseded,
}

const EXTENSION_MIME: &[(&str, &str)] = &[
    ("png", "image/png"),
    ("jpg", "image/jpeg"),
    ("jpeg", "image/jpeg"),
    ("gif", "image/gif"),
    ("webp", "image/webp"),
    ("svg", "image/svg+xml"),
    ("bmp", "image/bmp"),
];

/// The image MIME type of an upload, from its declared content type or, failing that,
/// its file extension. `None` when the upload is not an image.
pub fn image_mime(content_type: Option<&str>, file_name: Option<&str>) -> Option<String> {
    if let Some(ct) = content_type {
        let essence = ct.split(';').next().unwrap_or("").trim().to_ascii_lowercase();
        if essence.starts_with("image/") && essence.len() > "image/".len() {
            return Some(essence);
        }
        if !essence.is_empty() && essence != "application/octet-stream" {
            return None;
        }
    }
    let ext = file_name?.rsplit_once('.')?.1.to_ascii_lowercase();
    EXTENSION_MIME
        .iter()
        .find(|(e, _)| *e == ext)
        .map(|(_, mime)| mime.to_string())
}

pub fn to_data_uri(mime: &str, bytes: &[u8]) -> String {
    format!("data:{mime};base64,{}", STANDARD.encode(bytes))
}
