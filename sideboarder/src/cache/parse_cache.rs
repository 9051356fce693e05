use mtg_common::{parse_decklist, CardCounts};
use std::collections::HashMap;

use super::content_key;

/// In-memory cache of parsed decklists, keyed by the hash of the text
#[derive(Debug, Default)]
pub struct ParseCache {
    entries: HashMap<String, CardCounts>,
}

impl ParseCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse `text`, reusing an earlier result for identical input
    pub fn parse(&mut self, text: &str) -> CardCounts {
        let key = content_key(text.as_bytes());
        if let Some(counts) = self.entries.get(&key) {
            log::debug!("Decklist cache hit ({} cards)", counts.len());
            return counts.clone();
        }

        log::info!("Decklist cache miss, parsing {} lines", text.lines().count());
        let counts = parse_decklist(text);
        self.entries.insert(key, counts.clone());
        counts
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
