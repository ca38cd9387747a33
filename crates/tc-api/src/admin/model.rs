use serde::{Deserialize, Serialize};
use tc_db::models::{NewTopic, Topic, TopicUpdate};
use tc_nav::{ExcerptConfig, excerpt, file_link_labels};
use validator::Validate;

use crate::validation::{any_label, any_not_blank, not_blank};

/// Shown in the file column of a topic without files
pub const NO_FILE_LABEL: &str = "No File";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileLink {
    pub label: String,
    pub url: String,
}

/// One row of the management table
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TopicRow {
    pub id: String,
    pub topic: String,
    pub class: String,
    pub category: String,
    pub sub_category: String,
    pub date: Option<String>,
    /// `None` when the topic has no description
    pub excerpt: Option<String>,
    pub files: Vec<FileLink>,
    /// Set to [`NO_FILE_LABEL`] when `files` is empty
    pub file_label: Option<String>,
}

impl TopicRow {
    pub fn new(topic: Topic, config: ExcerptConfig) -> Self {
        let urls = topic.file_url.as_slice();
        let files: Vec<FileLink> = file_link_labels(urls)
            .into_iter()
            .zip(urls)
            .map(|(label, url)| FileLink {
                label,
                url: url.clone(),
            })
            .collect();

        Self {
            excerpt: excerpt(&topic.description, config),
            file_label: files.is_empty().then(|| NO_FILE_LABEL.to_string()),
            files,
            id: topic.id,
            topic: topic.topic,
            class: topic.class,
            category: topic.category,
            sub_category: topic.sub_category,
            date: topic.date,
        }
    }
}

/// Stored class label: trimmed entries joined with ", ", blanks dropped.
fn join_classes<'a>(classes: impl IntoIterator<Item = &'a str>) -> String {
    classes
        .into_iter()
        .map(str::trim)
        .filter(|class| !class.is_empty())
        .collect::<Vec<_>>()
        .join(", ")
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateTopicRequest {
    #[validate(custom(function = "not_blank", message = "Topic is required"))]
    pub topic: String,
    /// Selected classes, stored joined with ", "
    #[validate(custom(function = "any_not_blank", message = "Select at least one class"))]
    pub class: Vec<String>,
    #[validate(custom(function = "not_blank", message = "Category is required"))]
    pub category: String,
    #[validate(custom(function = "not_blank", message = "Subcategory is required"))]
    pub sub_category: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub date: Option<String>,
    #[serde(rename = "fileURL", default)]
    pub file_url: Vec<String>,
}

impl CreateTopicRequest {
    pub fn into_new_topic(self, timestamp: chrono::DateTime<chrono::Utc>) -> NewTopic {
        NewTopic {
            topic: self.topic.trim().to_string(),
            class: join_classes(self.class.iter().map(String::as_str)),
            category: self.category.trim().to_string(),
            sub_category: self.sub_category.trim().to_string(),
            description: self.description,
            file_url: self.file_url,
            date: self.date.filter(|date| !date.trim().is_empty()),
            timestamp,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTopicRequest {
    #[validate(custom(function = "not_blank", message = "Topic is required"))]
    pub topic: String,
    #[validate(custom(function = "any_label", message = "Class is required"))]
    pub class: String,
    #[validate(custom(function = "not_blank", message = "Category is required"))]
    pub category: String,
    #[validate(custom(function = "not_blank", message = "Subcategory is required"))]
    pub sub_category: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub date: Option<String>,
    /// Leave out to keep the stored files
    #[serde(rename = "fileURL", default)]
    pub file_url: Option<Vec<String>>,
}

impl From<UpdateTopicRequest> for TopicUpdate {
    fn from(request: UpdateTopicRequest) -> Self {
        Self {
            topic: request.topic.trim().to_string(),
            class: join_classes(request.class.split(',')),
            category: request.category.trim().to_string(),
            sub_category: request.sub_category.trim().to_string(),
            description: request.description,
            date: request.date.filter(|date| !date.trim().is_empty()),
            file_url: request.file_url,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatedTopic {
    pub id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateClassRequest {
    #[validate(custom(function = "not_blank", message = "Class name is required"))]
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadedFiles {
    pub files: Vec<tc_db::models::StoredFile>,
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};
    use tc_db::models::FileUrls;

    use super::*;

    fn topic(description: &str, files: Vec<String>) -> Topic {
        Topic {
            id: "t1".to_string(),
            topic: "Photosynthesis".to_string(),
            class: "Class 7".to_string(),
            category: "Science".to_string(),
            sub_category: "Plants".to_string(),
            description: description.to_string(),
            file_url: FileUrls(files),
            date: None,
            timestamp: Utc.timestamp_opt(0, 0).unwrap(),
        }
    }

    #[test]
    fn test_row_without_files() {
        let row = TopicRow::new(topic("", vec![]), ExcerptConfig::default());
        assert_eq!(row.excerpt, None);
        assert!(row.files.is_empty());
        assert_eq!(row.file_label.as_deref(), Some(NO_FILE_LABEL));
    }

    #[test]
    fn test_row_with_files_and_excerpt() {
        let row = TopicRow::new(
            topic(
                "Leaves use sunlight to make food from water and air",
                vec!["https://cdn/a.pdf".to_string(), "https://cdn/b.png".to_string()],
            ),
            ExcerptConfig::uniform(4),
        );

        assert_eq!(row.excerpt.as_deref(), Some("Leaves use sunlight to..."));
        assert_eq!(row.file_label, None);
        assert_eq!(
            row.files,
            vec![
                FileLink {
                    label: "Download File 1".to_string(),
                    url: "https://cdn/a.pdf".to_string(),
                },
                FileLink {
                    label: "Download File 2".to_string(),
                    url: "https://cdn/b.png".to_string(),
                },
            ]
        );
    }

    #[test]
    fn test_create_request_joins_classes() {
        let request = CreateTopicRequest {
            topic: " Photosynthesis ".to_string(),
            class: vec!["Class 7".to_string(), "Class 8".to_string()],
            category: "Science".to_string(),
            sub_category: "Plants".to_string(),
            description: String::new(),
            date: Some(String::new()),
            file_url: vec![],
        };
        assert!(request.validate().is_ok());

        let new_topic = request.into_new_topic(Utc.timestamp_opt(5, 0).unwrap());
        assert_eq!(new_topic.topic, "Photosynthesis");
        assert_eq!(new_topic.class, "Class 7, Class 8");
        assert_eq!(new_topic.date, None);
    }

    fn create_request(class: &[&str]) -> CreateTopicRequest {
        CreateTopicRequest {
            topic: "T".to_string(),
            class: class.iter().map(ToString::to_string).collect(),
            category: "C".to_string(),
            sub_category: "S".to_string(),
            description: String::new(),
            date: None,
            file_url: vec![],
        }
    }

    #[test]
    fn test_create_request_requires_class() {
        assert!(create_request(&[]).validate().is_err());
        assert!(create_request(&["  ", ""]).validate().is_err());
    }

    #[test]
    fn test_blank_class_entries_are_dropped() {
        let request = create_request(&[" Class 6 ", "", "  ", "Class 7"]);
        assert!(request.validate().is_ok());

        let new_topic = request.into_new_topic(Utc.timestamp_opt(5, 0).unwrap());
        assert_eq!(new_topic.class, "Class 6, Class 7");
    }

    #[test]
    fn test_update_request_normalizes_class() {
        let update = TopicUpdate::from(UpdateTopicRequest {
            topic: "T".to_string(),
            class: "Class 6, ".to_string(),
            category: "C".to_string(),
            sub_category: "S".to_string(),
            description: String::new(),
            date: None,
            file_url: None,
        });
        assert_eq!(update.class, "Class 6");
    }
}
