use serde::{Deserialize, Serialize};
use tc_db::models::{Comment, NewComment, StoredFile};
use validator::Validate;

use crate::{topic::model::TopicWithAttachments, validation::not_blank};

/// Description page of a subcategory
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubCategoryPage {
    pub sub_category: String,
    /// Title of the first topic, if there is one
    pub title: Option<String>,
    pub topics: Vec<TopicWithAttachments>,
    pub files: Vec<StoredFile>,
    pub comments: Vec<Comment>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateCommentRequest {
    #[validate(custom(function = "not_blank", message = "Please enter your name."))]
    pub name: String,
    #[validate(email(message = "Please enter a valid email address."))]
    pub email: String,
    #[validate(custom(function = "not_blank", message = "Please enter a comment."))]
    pub comment: String,
}

impl From<CreateCommentRequest> for NewComment {
    fn from(request: CreateCommentRequest) -> Self {
        Self {
            name: request.name.trim().to_string(),
            email: request.email.trim().to_string(),
            comment: request.comment,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ReplyRequest {
    #[serde(default)]
    #[validate(custom(function = "not_blank", message = "Please enter a reply."))]
    pub reply: String,
}
