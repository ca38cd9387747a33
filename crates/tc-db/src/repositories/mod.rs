// Repository functions take `&dyn DocumentStore` (or `&dyn ObjectStore`) so the
// same code runs against Postgres, the in-memory fake, or any other backend.

pub mod class;
pub mod comment;
pub mod draft;
pub mod file;
pub mod topic;

/// Collection holding every topic
pub const TOPICS: &str = "topics";
/// Collection of class options offered by the admin form
pub const CLASSES: &str = "classes";
/// Collection holding the single admin draft
pub const DRAFTS: &str = "drafts";

/// Comment collection for a subcategory page
pub fn comments_collection(sub_category: &str) -> String {
    format!("comments/{sub_category}/topicComments")
}

/// Object storage prefix for files of a subcategory
pub fn files_prefix(sub_category: &str) -> String {
    format!("files/{sub_category}")
}
