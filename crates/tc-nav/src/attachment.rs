//! Attachment kinds for topic file URLs.

use serde::{Deserialize, Serialize};

const DRIVE_HOST: &str = "drive.google.com";
const IMAGE_EXTENSIONS: &[&str] = &[".jpg", ".jpeg", ".png"];

/// How a file URL is presented on the topic page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Attachment {
    /// Google Drive file, linked through its viewer page
    GoogleDrive { file_id: String, view_url: String },
    /// PDF, opened in a new tab
    Pdf { url: String },
    /// Image, rendered inline
    Image { url: String },
    /// Anything else: no preview
    Other { url: String },
}

impl Attachment {
    /// Classify a file URL. Checks run in order: Drive, PDF, image.
    pub fn classify(url: &str) -> Self {
        if url.contains(DRIVE_HOST)
            && let Some(file_id) = drive_file_id(url)
        {
            return Self::GoogleDrive {
                view_url: format!("https://{DRIVE_HOST}/file/d/{file_id}/view"),
                file_id: file_id.to_string(),
            };
        }

        let url = url.to_string();
        if url.contains(".pdf") {
            Self::Pdf { url }
        } else if IMAGE_EXTENSIONS.iter().any(|ext| url.contains(ext)) {
            Self::Image { url }
        } else {
            Self::Other { url }
        }
    }

    /// Link target for this attachment.
    pub fn href(&self) -> &str {
        match self {
            Self::GoogleDrive { view_url, .. } => view_url,
            Self::Pdf { url } | Self::Image { url } | Self::Other { url } => url,
        }
    }
}

/// `https://drive.google.com/file/d/<id>/...` → `<id>`
fn drive_file_id(url: &str) -> Option<&str> {
    let (_, rest) = url.split_once("/d/")?;
    let id = rest.split(['/', '?', '#']).next()?;
    (!id.is_empty()).then_some(id)
}

/// Labels for the management table's file column.
pub fn file_link_labels(urls: &[String]) -> Vec<String> {
    (1..=urls.len()).map(|n| format!("Download File {n}")).collect()
}
