//! Forbidden-pattern matcher with a lazily warmed cache.
//!
//! Patterns are plain substrings matched case-insensitively; no regex, no
//! word boundaries. The cached list distinguishes "not yet loaded" (`None`)
//! from "loaded and legitimately empty" (`Some(vec![])`), so an empty
//! pattern table does not cause a reload on every message.

use anyhow::Result;
use futures::StreamExt;
use mongodb::bson::doc;
use mongodb::options::FindOptions;
use mongodb::Collection;
use parking_lot::RwLock;
use tracing::debug;

use crate::database::models::Pattern;
use crate::database::Database;

/// Repository for forbidden patterns.
pub struct PatternRepository {
    collection: Collection<Pattern>,
    /// `None` until the first load; replaced wholesale on reload.
    cache: RwLock<Option<Vec<String>>>,
}

impl PatternRepository {
    pub fn new(db: &Database) -> Self {
        Self {
            collection: db.collection("patterns"),
            cache: RwLock::new(None),
        }
    }

    /// Check whether `text` contains any configured pattern,
    /// case-insensitively. Empty text never matches.
    ///
    /// Warms the cache from the database on first use.
    pub async fn matches(&self, text: &str) -> Result<bool> {
        if text.is_empty() {
            return Ok(false);
        }
        let patterns = self.patterns().await?;
        Ok(contains_any(text, &patterns))
    }

    /// The full pattern list in insertion order, warming the cache if needed.
    pub async fn patterns(&self) -> Result<Vec<String>> {
        if let Some(list) = self.cache.read().clone() {
            return Ok(list);
        }

        let list = self.fetch_from_db().await?;
        debug!("Pattern cache warmed: {} patterns", list.len());
        *self.cache.write() = Some(list.clone());
        Ok(list)
    }

    /// Replace the cached list, either with the given patterns or with a
    /// fresh database read. Order is preserved.
    pub async fn reload_cache(&self, patterns: Option<Vec<String>>) -> Result<()> {
        let list = match patterns {
            Some(list) => list,
            None => self.fetch_from_db().await?,
        };

        debug!("Pattern cache reloaded: {} patterns", list.len());
        *self.cache.write() = Some(list);
        Ok(())
    }

    /// Append a pattern to the durable store.
    ///
    /// The cache is reset to unloaded so the next read picks the new
    /// pattern up in store order.
    pub async fn add_pattern(&self, text: &str) -> Result<()> {
        self.collection.insert_one(Pattern::new(text)).await?;
        *self.cache.write() = None;
        Ok(())
    }

    /// Fetch all patterns sorted by `_id`, i.e. insertion order.
    async fn fetch_from_db(&self) -> Result<Vec<String>> {
        let options = FindOptions::builder().sort(doc! { "_id": 1 }).build();
        let mut cursor = self.collection.find(doc! {}).with_options(options).await?;

        let mut patterns = Vec::new();
        while let Some(pattern) = cursor.next().await {
            patterns.push(pattern?.text);
        }
        Ok(patterns)
    }
}

/// True iff any non-empty pattern is a case-insensitive substring of `text`.
fn contains_any(text: &str, patterns: &[String]) -> bool {
    let text = text.to_lowercase();
    patterns
        .iter()
        .filter(|p| !p.is_empty())
        .any(|p| text.contains(&p.to_lowercase()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn patterns(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_any_of_substring_match() {
        let list = patterns(&["spam", "buy now"]);
        assert!(contains_any("BUY NOW cheap spam!!", &list));
        assert!(!contains_any("hello world", &list));
    }

    #[test]
    fn test_case_insensitive_both_ways() {
        let list = patterns(&["SpAm"]);
        assert!(contains_any("this is sPaM", &list));
    }

    #[test]
    fn test_empty_text_never_matches() {
        let list = patterns(&["spam", ""]);
        assert!(!contains_any("", &list));
    }

    #[test]
    fn test_empty_pattern_is_skipped() {
        // "" is a substring of everything; it must not flag every message
        let list = patterns(&[""]);
        assert!(!contains_any("perfectly fine message", &list));
    }

    #[test]
    fn test_no_patterns_no_match() {
        assert!(!contains_any("anything", &[]));
    }

    #[test]
    fn test_multibyte_text() {
        let list = patterns(&["запрещено"]);
        assert!(contains_any("Это ЗАПРЕЩЕНО здесь", &list));
    }
}
