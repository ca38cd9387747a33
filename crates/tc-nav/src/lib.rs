//! Navigation library for the topic catalog
//!
//! This crate derives every piece of navigation state the catalog exposes from
//! flat topic records: the navbar class index, the sidebar class tree, the
//! previous/next sequencing of topics, the navbar scroll window, description
//! excerpts and attachment kinds. Everything here is pure and performs no I/O.

use chrono::{DateTime, Utc};

pub mod attachment;
pub mod excerpt;
pub mod sequence;
pub mod tree;
pub mod window;

pub use attachment::{Attachment, file_link_labels};
pub use excerpt::{ExcerptConfig, excerpt};
pub use sequence::{Neighbours, neighbours};
pub use tree::{
    CategoryNode, ClassNode, ClassTree, RESERVED_NAVBAR_CLASSES, UNCATEGORIZED, build_class_index,
    build_class_tree, filter_class_tree,
};
pub use window::{NavWindow, ScrollDirection, Viewport, sidebar_expanded};

/// A record placed in the class → category → subcategory hierarchy.
pub trait Classified {
    /// Class label (may be a comma-joined multi-select)
    fn class(&self) -> &str;
    /// Category label
    fn category(&self) -> &str;
    /// Subcategory label, not unique across classes
    fn sub_category(&self) -> &str;
}

/// A classified record that can be ordered for previous/next navigation.
pub trait Sequenced: Classified {
    /// Opaque identifier assigned by the document store
    fn id(&self) -> &str;
    /// Creation instant
    fn created_at(&self) -> DateTime<Utc>;
}

/// Resolve an empty or blank hierarchy label to the explicit bucket.
pub(crate) fn label_or_uncategorized(label: &str) -> &str {
    if label.trim().is_empty() {
        UNCATEGORIZED
    } else {
        label
    }
}
