//! The set of book ids a user has marked as liked.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::book::BookId;

/// Wishlist membership.
///
/// Serializes as a plain JSON array of integers, which is the durable
/// representation of the wishlist. Ids are weak references: a member does
/// not have to be present in the currently loaded catalog.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WishlistState {
    ids: BTreeSet<BookId>,
}

impl WishlistState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, id: BookId) -> bool {
        self.ids.contains(&id)
    }

    /// Returns `true` if the id was not already a member.
    pub fn insert(&mut self, id: BookId) -> bool {
        self.ids.insert(id)
    }

    /// Returns `true` if the id was a member.
    pub fn remove(&mut self, id: BookId) -> bool {
        self.ids.remove(&id)
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Members in ascending id order.
    pub fn iter(&self) -> impl Iterator<Item = BookId> + '_ {
        self.ids.iter().copied()
    }
}

impl FromIterator<BookId> for WishlistState {
    fn from_iter<I: IntoIterator<Item = BookId>>(iter: I) -> Self {
        Self {
            ids: iter.into_iter().collect(),
        }
    }
}
