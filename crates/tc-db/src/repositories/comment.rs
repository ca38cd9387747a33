use serde_json::json;

use crate::{
    error::{StoreError, StoreResult},
    models::{Comment, NewComment, to_fields},
    store::DocumentStore,
};

use super::comments_collection;

/// Comments of a subcategory page in posting order
pub async fn list(store: &dyn DocumentStore, sub_category: &str) -> StoreResult<Vec<Comment>> {
    store
        .list_documents(&comments_collection(sub_category), None)
        .await?
        .into_iter()
        .map(|doc| {
            let mut comment: Comment =
                serde_json::from_value(serde_json::Value::Object(doc.fields))?;
            comment.id = doc.id;
            Ok(comment)
        })
        .collect()
}

pub async fn add(
    store: &dyn DocumentStore,
    sub_category: &str,
    new: &NewComment,
) -> StoreResult<Comment> {
    let id = store
        .add_document(&comments_collection(sub_category), to_fields(new)?)
        .await?;

    Ok(Comment {
        id,
        name: new.name.clone(),
        email: new.email.clone(),
        comment: new.comment.clone(),
        replies: Vec::new(),
    })
}

/// Append `reply` to a comment and return the updated comment.
pub async fn append_reply(
    store: &dyn DocumentStore,
    sub_category: &str,
    comment_id: &str,
    reply: &str,
) -> StoreResult<Comment> {
    let collection = comments_collection(sub_category);
    let doc = store
        .get_document(&collection, comment_id)
        .await?
        .ok_or_else(|| StoreError::not_found(&collection, comment_id))?;

    let mut comment: Comment = serde_json::from_value(serde_json::Value::Object(doc.fields))?;
    comment.id = doc.id;
    comment.replies.push(reply.to_string());

    let mut fields = crate::store::Fields::new();
    fields.insert("replies".to_string(), json!(comment.replies));
    store.update_document(&collection, comment_id, fields).await?;

    Ok(comment)
}
