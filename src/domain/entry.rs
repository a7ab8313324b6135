/// Placeholder shown when a feed entry carries no title.
pub const NO_TITLE: &str = "No title";
/// Placeholder shown when a feed entry carries no publication date.
pub const NO_DATE: &str = "No date";

/// One feed entry as parsed, before normalization. Every field is optional
/// because feeds routinely omit them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawEntry {
    pub title: Option<String>,
    pub published: Option<String>,
    pub summary: Option<String>,
}

impl RawEntry {
    pub fn display_title(&self) -> &str {
        self.title.as_deref().unwrap_or(NO_TITLE)
    }

    pub fn display_published(&self) -> &str {
        self.published.as_deref().unwrap_or(NO_DATE)
    }

    pub fn display_summary(&self) -> &str {
        self.summary.as_deref().unwrap_or("")
    }
}

/// A layout-ready entry. `title` and `published` are HTML-escaped so feed
/// text renders literally; `summary` keeps its inline markup and is trusted
/// as-is.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedEntry {
    pub title: String,
    pub published: String,
    pub summary: String,
}

impl NormalizedEntry {
    /// The provenance banner prepended to every page, present whether or not
    /// the fetch produced any real entries.
    pub fn banner(source_name: &str) -> Self {
        Self {
            title: format!("Feed Source: {}", source_name),
            published: String::new(),
            summary: String::new(),
        }
    }
}
