use html_escape::encode_text;

use crate::domain::{NormalizedEntry, RawEntry};

#[derive(Clone)]
pub struct Normalizer;

impl Default for Normalizer {
    fn default() -> Self {
        Self::new()
    }
}

impl Normalizer {
    pub fn new() -> Self {
        Self
    }

    /// Map raw entries to layout-ready ones, in order. Pure and total.
    ///
    /// `title` and `published` are HTML-escaped so markup-significant
    /// characters in feed text render literally. `summary` passes through
    /// byte-for-byte: feeds carry basic emphasis markup there and it is
    /// intentionally rendered as markup.
    pub fn normalize(&self, raw: &[RawEntry]) -> Vec<NormalizedEntry> {
        raw.iter()
            .map(|entry| NormalizedEntry {
                title: encode_text(entry.display_title()).into_owned(),
                published: encode_text(entry.display_published()).into_owned(),
                summary: entry.display_summary().to_string(),
            })
            .collect()
    }
}
