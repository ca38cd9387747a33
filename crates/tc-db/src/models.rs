use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use tc_nav::{Classified, Sequenced};

use crate::{
    error::{StoreError, StoreResult},
    store::{Document, Fields},
};

/// Topic model - one content record of the catalog
///
/// Stored fields are not validated on write, so reading never fails: nulls
/// and wrong types fall back to empty values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Topic {
    /// Opaque id assigned by the document store
    #[serde(default, deserialize_with = "lenient::string")]
    pub id: String,
    /// Topic title
    #[serde(default, deserialize_with = "lenient::string")]
    pub topic: String,
    /// Class label, several selected classes are joined with ", "
    #[serde(default, deserialize_with = "lenient::string")]
    pub class: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub category: String,
    /// Subcategory label, reused across classes
    #[serde(rename = "subCategory", default, deserialize_with = "lenient::string")]
    pub sub_category: String,
    /// Rich text (HTML) body
    #[serde(default, deserialize_with = "lenient::string")]
    pub description: String,
    /// Attached file URLs
    #[serde(rename = "fileURL", default, skip_serializing_if = "FileUrls::is_empty")]
    pub file_url: FileUrls,
    /// Date entered by the admin
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "lenient::optional_string"
    )]
    pub date: Option<String>,
    /// Creation instant, the epoch when missing or unreadable
    #[serde(with = "timestamp", default = "timestamp::epoch")]
    pub timestamp: DateTime<Utc>,
}

impl Topic {
    pub fn from_document(doc: Document) -> StoreResult<Self> {
        let mut topic: Self = serde_json::from_value(serde_json::Value::Object(doc.fields))?;
        topic.id = doc.id;
        Ok(topic)
    }
}

impl Classified for Topic {
    fn class(&self) -> &str {
        &self.class
    }

    fn category(&self) -> &str {
        &self.category
    }

    fn sub_category(&self) -> &str {
        &self.sub_category
    }
}

impl Sequenced for Topic {
    fn id(&self) -> &str {
        &self.id
    }

    fn created_at(&self) -> DateTime<Utc> {
        self.timestamp
    }
}

/// Topic file URLs.
///
/// Stored either as a single string or as a list; always exposed as a list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FileUrls(pub Vec<String>);

impl FileUrls {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_slice(&self) -> &[String] {
        &self.0
    }
}

impl From<Vec<String>> for FileUrls {
    fn from(urls: Vec<String>) -> Self {
        Self(urls)
    }
}

impl Serialize for FileUrls {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.0.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for FileUrls {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        lenient::strings(deserializer).map(Self)
    }
}

/// Fields for a new topic
#[derive(Debug, Clone, Serialize)]
pub struct NewTopic {
    pub topic: String,
    pub class: String,
    pub category: String,
    #[serde(rename = "subCategory")]
    pub sub_category: String,
    pub description: String,
    #[serde(rename = "fileURL")]
    pub file_url: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    #[serde(with = "timestamp")]
    pub timestamp: DateTime<Utc>,
}

/// Editable topic fields. `file_url: None` keeps the stored files.
#[derive(Debug, Clone, Serialize)]
pub struct TopicUpdate {
    pub topic: String,
    pub class: String,
    pub category: String,
    #[serde(rename = "subCategory")]
    pub sub_category: String,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    #[serde(rename = "fileURL", skip_serializing_if = "Option::is_none")]
    pub file_url: Option<Vec<String>>,
}

/// Class option offered by the admin form
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassOption {
    #[serde(default, deserialize_with = "lenient::string")]
    pub id: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub name: String,
}

/// Comment left under a subcategory page
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comment {
    #[serde(default, deserialize_with = "lenient::string")]
    pub id: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub name: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub email: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub comment: String,
    /// Replies in the order they were posted
    #[serde(default, deserialize_with = "lenient::strings")]
    pub replies: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewComment {
    pub name: String,
    pub email: String,
    pub comment: String,
}

/// In-progress admin form
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Draft {
    #[serde(deserialize_with = "lenient::string")]
    pub topic: String,
    #[serde(deserialize_with = "lenient::strings")]
    pub class: Vec<String>,
    #[serde(deserialize_with = "lenient::string")]
    pub category: String,
    #[serde(deserialize_with = "lenient::string")]
    pub sub_category: String,
    #[serde(deserialize_with = "lenient::string")]
    pub description: String,
    #[serde(deserialize_with = "lenient::string")]
    pub date: String,
    /// File names only, the files themselves are not kept
    #[serde(deserialize_with = "lenient::strings")]
    pub file: Vec<String>,
}

/// A downloadable file of a subcategory
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredFile {
    pub name: String,
    pub url: String,
}

/// Serialize `value` into top-level document fields.
pub fn to_fields<T: Serialize>(value: &T) -> StoreResult<Fields> {
    match serde_json::to_value(value)? {
        serde_json::Value::Object(fields) => Ok(fields),
        other => Err(StoreError::InvalidDocument(format!(
            "expected an object, got {other}"
        ))),
    }
}

/// Document timestamps: RFC 3339, UTC, fixed microsecond precision so that
/// string order is chronological order.
pub mod timestamp {
    use super::*;

    pub fn epoch() -> DateTime<Utc> {
        DateTime::<Utc>::UNIX_EPOCH
    }

    pub fn format(value: &DateTime<Utc>) -> String {
        value.to_rfc3339_opts(SecondsFormat::Micros, true)
    }

    pub fn serialize<S: Serializer>(value: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&format(value))
    }

    /// Unreadable values read as the epoch.
    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<DateTime<Utc>, D::Error> {
        let raw = lenient::string(deserializer)?;
        Ok(DateTime::parse_from_rfc3339(&raw)
            .map(|dt| dt.with_timezone(&Utc))
            .unwrap_or_else(|_| epoch()))
    }
}

/// Field readers that map nulls and wrong types to empty values.
mod lenient {
    use serde::{Deserialize, Deserializer};
    use serde_json::Value;

    pub(super) fn string<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
        Ok(match Value::deserialize(deserializer)? {
            Value::String(value) => value,
            Value::Number(value) => value.to_string(),
            Value::Bool(value) => value.to_string(),
            _ => String::new(),
        })
    }

    pub(super) fn optional_string<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<String>, D::Error> {
        Ok(Some(string(deserializer)?).filter(|value| !value.is_empty()))
    }

    /// A single string or a list; empty and non-string entries are dropped
    pub(super) fn strings<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Vec<String>, D::Error> {
        let items = match Value::deserialize(deserializer)? {
            Value::Array(items) => items,
            single => vec![single],
        };

        Ok(items
            .into_iter()
            .filter_map(|item| match item {
                Value::String(value) if !value.is_empty() => Some(value),
                _ => None,
            })
            .collect())
    }
}
