use crate::domain::emoji::{ClassifiedTitle, EmojiCategoryMap};
use indexmap::IndexMap;

/// Emoji and category frequencies of a release, in first-seen order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReleaseCounts {
    pub emoji: IndexMap<String, usize>,
    pub categories: IndexMap<String, usize>,
}

impl ReleaseCounts {
    pub fn new() -> Self {
        ReleaseCounts::default()
    }

    /// Tally one classified pull request.
    ///
    /// Every leading emoji counts once, and so does its category; two emoji of
    /// the same category on one title add two to that category.
    pub fn record(&mut self, classified: &ClassifiedTitle, categories: &EmojiCategoryMap) {
        for emoji in &classified.emoji {
            *self.emoji.entry(emoji.clone()).or_insert(0) += 1;
            let category = categories.category_of(emoji).to_string();
            *self.categories.entry(category).or_insert(0) += 1;
        }
    }

    pub fn emoji_count(&self, emoji: &str) -> usize {
        self.emoji.get(emoji).copied().unwrap_or(0)
    }

    pub fn category_count(&self, category: &str) -> usize {
        self.categories.get(category).copied().unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.emoji.is_empty()
    }
}
