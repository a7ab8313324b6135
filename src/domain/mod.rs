pub mod entry;
pub mod source;

pub use entry::{NormalizedEntry, RawEntry};
pub use source::{FeedSource, SourceRegistry};
