//! Previous/next sequencing of topics inside one subcategory.

use crate::Sequenced;

/// Topics adjacent to the current one in creation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Neighbours<'a, T> {
    /// Empty when the earlier topic is in another class or subcategory
    pub previous: Option<&'a T>,
    /// Same rule as `previous`
    pub next: Option<&'a T>,
}

impl<T> Neighbours<'_, T> {
    fn none() -> Self {
        Self {
            previous: None,
            next: None,
        }
    }
}

/// Locate `current_id` among `topics` and return its neighbours.
///
/// Topics are ordered by creation time (ties keep input order). A neighbour is
/// only returned when both its subcategory and its class equal the current
/// topic's, because the same subcategory label can be reused by another
/// class. An unknown `current_id` yields no neighbours.
pub fn neighbours<'a, T: Sequenced>(topics: &'a [T], current_id: &str) -> Neighbours<'a, T> {
    let mut ordered: Vec<&T> = topics.iter().collect();
    ordered.sort_by_key(|topic| topic.created_at());

    let Some(position) = ordered.iter().position(|topic| topic.id() == current_id) else {
        return Neighbours::none();
    };
    let current = ordered[position];

    let same_shelf = |candidate: &&'a T| {
        candidate.sub_category() == current.sub_category() && candidate.class() == current.class()
    };

    let previous = position
        .checked_sub(1)
        .and_then(|i| ordered.get(i))
        .copied()
        .filter(same_shelf);
    let next = ordered.get(position + 1).copied().filter(same_shelf);

    Neighbours { previous, next }
}
