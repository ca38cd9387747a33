//! Class → category → subcategory grouping.
//!
//! Two shapes are derived from the same flat topic list. The navbar uses the
//! list form ([`build_class_index`]): one entry per class holding every
//! subcategory in insertion order, duplicates included. The sidebar uses the
//! tree form ([`build_class_tree`]): classes hold categories, and each
//! (class, category) pair holds a de-duplicated set of subcategories.
//!
//! Both builders expect the input in ascending creation order and keep
//! first-seen order for every level.

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};

use crate::{Classified, label_or_uncategorized};

/// Class labels never shown in the navbar.
pub const RESERVED_NAVBAR_CLASSES: &[&str] = &["Class 9", "Class 10", "Class 11", "Class 12"];

/// Bucket for records with an empty class, category or subcategory.
pub const UNCATEGORIZED: &str = "Uncategorized";

/// Navbar entry: a class and the subcategories filed under it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassNode {
    /// Class label, [`UNCATEGORIZED`] when missing
    pub class: String,
    /// Subcategories in topic order, repeats kept
    pub sub_categories: Vec<String>,
}

/// Sidebar category with its distinct subcategories.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryNode {
    pub category: String,
    /// Distinct subcategories in first-seen order
    pub sub_categories: Vec<String>,
}

/// Sidebar entry: a class and its categories.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassTree {
    /// Class label, [`UNCATEGORIZED`] when missing
    pub class: String,
    pub categories: Vec<CategoryNode>,
}

/// Build the navbar list form.
///
/// Reserved classes ([`RESERVED_NAVBAR_CLASSES`]) are dropped. Subcategories
/// are appended as they appear, so a subcategory shared by several topics of
/// the same class shows up once per topic.
pub fn build_class_index<T: Classified>(topics: &[T]) -> Vec<ClassNode> {
    let mut nodes: Vec<ClassNode> = Vec::new();
    let mut positions: HashMap<&str, usize> = HashMap::new();

    for topic in topics {
        let class = label_or_uncategorized(topic.class());
        if RESERVED_NAVBAR_CLASSES.contains(&class) {
            continue;
        }

        let index = *positions.entry(class).or_insert_with(|| {
            nodes.push(ClassNode {
                class: class.to_string(),
                sub_categories: Vec::new(),
            });
            nodes.len() - 1
        });

        nodes[index]
            .sub_categories
            .push(label_or_uncategorized(topic.sub_category()).to_string());
    }

    nodes
}

/// Build the sidebar tree form.
pub fn build_class_tree<T: Classified>(topics: &[T]) -> Vec<ClassTree> {
    let mut classes: Vec<ClassTree> = Vec::new();
    let mut class_positions: HashMap<&str, usize> = HashMap::new();
    let mut category_positions: HashMap<(usize, &str), usize> = HashMap::new();
    let mut seen: HashSet<(usize, usize, &str)> = HashSet::new();

    for topic in topics {
        let class = label_or_uncategorized(topic.class());
        let category = label_or_uncategorized(topic.category());
        let sub_category = label_or_uncategorized(topic.sub_category());

        let class_index = *class_positions.entry(class).or_insert_with(|| {
            classes.push(ClassTree {
                class: class.to_string(),
                categories: Vec::new(),
            });
            classes.len() - 1
        });

        let categories = &mut classes[class_index].categories;
        let category_index = *category_positions
            .entry((class_index, category))
            .or_insert_with(|| {
                categories.push(CategoryNode {
                    category: category.to_string(),
                    sub_categories: Vec::new(),
                });
                categories.len() - 1
            });

        if seen.insert((class_index, category_index, sub_category)) {
            categories[category_index]
                .sub_categories
                .push(sub_category.to_string());
        }
    }

    classes
}

/// Keep the classes whose label contains `search`, ignoring case.
pub fn filter_class_tree(tree: Vec<ClassTree>, search: &str) -> Vec<ClassTree> {
    let needle = search.trim().to_lowercase();
    if needle.is_empty() {
        return tree;
    }

    tree.into_iter()
        .filter(|node| node.class.to_lowercase().contains(&needle))
        .collect()
}
