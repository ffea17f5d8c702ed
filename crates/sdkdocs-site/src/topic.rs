//! Ordered topic list.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::error::SiteError;

/// One documentation section.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TopicEntry {
    /// Stable identifier, also used as the URL fragment.
    pub id: String,
    /// Sidebar label.
    pub title: String,
}

impl TopicEntry {
    /// Create a topic entry.
    #[must_use]
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
        }
    }
}

/// Non-empty, immutable topic sequence with unique ids.
///
/// Declaration order is the sidebar order and the scroll-spy scan order.
#[derive(Clone, Debug)]
pub struct Topics {
    entries: Vec<TopicEntry>,
    index: HashMap<String, usize>,
}

impl Topics {
    /// Build the topic list.
    ///
    /// # Errors
    ///
    /// Returns an error for an empty list, an empty id or a duplicate id.
    pub fn new(entries: Vec<TopicEntry>) -> Result<Self, SiteError> {
        if entries.is_empty() {
            return Err(SiteError::EmptySite);
        }

        let mut index = HashMap::with_capacity(entries.len());
        for (position, entry) in entries.iter().enumerate() {
            if entry.id.is_empty() {
                return Err(SiteError::EmptyTopicId);
            }
            if index.insert(entry.id.clone(), position).is_some() {
                return Err(SiteError::DuplicateTopic(entry.id.clone()));
            }
        }

        Ok(Self { entries, index })
    }

    /// Whether `id` names a topic.
    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }

    /// Look up a topic by id.
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&TopicEntry> {
        self.index.get(id).map(|&i| &self.entries[i])
    }

    /// First declared topic.
    #[must_use]
    pub fn first(&self) -> &TopicEntry {
        &self.entries[0]
    }

    /// Topics in declaration order.
    pub fn iter(&self) -> std::slice::Iter<'_, TopicEntry> {
        self.entries.iter()
    }

    /// Number of topics.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Always false; kept for API symmetry with `len`.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<'a> IntoIterator for &'a Topics {
    type Item = &'a TopicEntry;
    type IntoIter = std::slice::Iter<'a, TopicEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
