//! Leading-emoji classification of pull request titles.

use crate::config::Config;
use indexmap::IndexSet;
use std::collections::{BTreeMap, HashMap};
use unicode_segmentation::UnicodeSegmentation;

const VARIATION_SELECTOR: char = '\u{FE0F}';

/// Result of scanning a title for its leading emoji
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassifiedTitle {
    /// Distinct leading emoji in order of appearance
    pub emoji: IndexSet<String>,
    /// The title, with a space inserted after the emoji run when one was missing
    pub title: String,
}

/// Immutable emoji → category lookup, built once from a category table.
#[derive(Debug, Clone)]
pub struct EmojiCategoryMap {
    categories: BTreeMap<String, Vec<String>>,
    by_emoji: HashMap<String, String>,
    unknown_emoji: String,
    other_category: String,
}

impl EmojiCategoryMap {
    /// Build the map from category → emoji list.
    ///
    /// Lookups ignore the U+FE0F variation selector, so "♻" and "♻️" land in
    /// the same category. An emoji listed under several categories keeps the
    /// first one in category-name order.
    pub fn new(
        categories: BTreeMap<String, Vec<String>>,
        unknown_emoji: impl Into<String>,
        other_category: impl Into<String>,
    ) -> Self {
        let mut by_emoji = HashMap::new();
        for (category, emoji) in &categories {
            for e in emoji {
                by_emoji
                    .entry(normalize(e))
                    .or_insert_with(|| category.clone());
            }
        }

        EmojiCategoryMap {
            categories,
            by_emoji,
            unknown_emoji: unknown_emoji.into(),
            other_category: other_category.into(),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        EmojiCategoryMap::new(
            config.categories.clone(),
            config.markers.unknown_emoji.clone(),
            config.markers.other_category.clone(),
        )
    }

    /// Category for an emoji, falling back to the "other" category
    pub fn category_of(&self, emoji: &str) -> &str {
        self.by_emoji
            .get(&normalize(emoji))
            .map(String::as_str)
            .unwrap_or(&self.other_category)
    }

    pub fn categories(&self) -> &BTreeMap<String, Vec<String>> {
        &self.categories
    }

    pub fn unknown_emoji(&self) -> &str {
        &self.unknown_emoji
    }

    pub fn other_category(&self) -> &str {
        &self.other_category
    }

    /// Extract the leading emoji of a title and repair a missing separator.
    ///
    /// Titles are scanned grapheme by grapheme so that multi-codepoint emoji
    /// (skin tones, ZWJ sequences, keycaps) stay intact. Scanning stops at the
    /// first non-emoji grapheme; if that grapheme is not a space, a space is
    /// inserted before it. Titles without a leading emoji yield the unknown
    /// marker and are returned untouched.
    pub fn classify(&self, title: &str) -> ClassifiedTitle {
        let mut emoji = IndexSet::new();
        let mut boundary = None;

        for (offset, grapheme) in title.grapheme_indices(true) {
            if is_emoji(grapheme) {
                emoji.insert(grapheme.to_string());
            } else {
                boundary = Some((offset, grapheme));
                break;
            }
        }

        if emoji.is_empty() {
            let mut unknown = IndexSet::new();
            unknown.insert(self.unknown_emoji.clone());
            return ClassifiedTitle {
                emoji: unknown,
                title: title.to_string(),
            };
        }

        let title = match boundary {
            Some((offset, grapheme)) if grapheme != " " => {
                format!("{} {}", &title[..offset], &title[offset..])
            }
            _ => title.to_string(),
        };

        ClassifiedTitle { emoji, title }
    }
}

impl Default for EmojiCategoryMap {
    fn default() -> Self {
        EmojiCategoryMap::from_config(&Config::default())
    }
}

/// Whether a grapheme cluster is an emoji.
///
/// The whole cluster is looked up first, then each character on its own, so
/// sequences missing from the emoji database (unusual modifier combinations)
/// still count when they contain an emoji character.
pub fn is_emoji(grapheme: &str) -> bool {
    if lookup(grapheme) {
        return true;
    }

    grapheme
        .chars()
        .filter(|c| *c != VARIATION_SELECTOR && *c != '\u{200D}')
        .any(|c| lookup(c.encode_utf8(&mut [0; 4])))
}

fn lookup(candidate: &str) -> bool {
    let bare = normalize(candidate);
    if bare.is_empty() {
        return false;
    }
    emojis::get(candidate).is_some()
        || emojis::get(&bare).is_some()
        || emojis::get(&format!("{}{}", bare, VARIATION_SELECTOR)).is_some()
}

fn normalize(emoji: &str) -> String {
    emoji.chars().filter(|c| *c != VARIATION_SELECTOR).collect()
}
