use serde::{Deserialize, Serialize};
use tc_db::models::Topic;
use tc_nav::Attachment;

/// Previous/next link target
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TopicLink {
    pub id: String,
    pub topic: String,
}

impl From<&Topic> for TopicLink {
    fn from(topic: &Topic) -> Self {
        Self {
            id: topic.id.clone(),
            topic: topic.topic.clone(),
        }
    }
}

/// A topic with its file URLs classified for display
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TopicWithAttachments {
    #[serde(flatten)]
    pub topic: Topic,
    pub attachments: Vec<Attachment>,
}

impl From<Topic> for TopicWithAttachments {
    fn from(topic: Topic) -> Self {
        let attachments = topic
            .file_url
            .as_slice()
            .iter()
            .map(|url| Attachment::classify(url))
            .collect();
        Self { topic, attachments }
    }
}

/// Topic detail page
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TopicDetail {
    #[serde(flatten)]
    pub topic: TopicWithAttachments,
    pub previous: Option<TopicLink>,
    pub next: Option<TopicLink>,
}
