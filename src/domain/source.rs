use rand::Rng;

use crate::app::{NewsprintError, Result};

/// A named feed endpoint. Immutable for the life of the process.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedSource {
    pub name: String,
    pub url: String,
}

/// The static set of feed sources. One is chosen uniformly at random per
/// cycle, independently each time; repeats are expected.
#[derive(Debug, Clone)]
pub struct SourceRegistry {
    sources: Vec<FeedSource>,
}

impl SourceRegistry {
    pub fn new(sources: Vec<FeedSource>) -> Result<Self> {
        if sources.is_empty() {
            return Err(NewsprintError::Config(
                "at least one feed source is required".into(),
            ));
        }
        Ok(Self { sources })
    }

    pub fn sources(&self) -> &[FeedSource] {
        &self.sources
    }

    pub fn pick(&self) -> &FeedSource {
        let idx = rand::thread_rng().gen_range(0..self.sources.len());
        &self.sources[idx]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn source(name: &str) -> FeedSource {
        FeedSource {
            name: name.into(),
            url: format!("https://example.com/{}.xml", name),
        }
    }

    #[test]
    fn test_empty_registry_rejected() {
        assert!(SourceRegistry::new(Vec::new()).is_err());
    }

    #[test]
    fn test_single_source_always_picked() {
        let registry = SourceRegistry::new(vec![source("only")]).unwrap();
        for _ in 0..10 {
            assert_eq!(registry.pick().name, "only");
        }
    }

    #[test]
    fn test_pick_stays_within_set() {
        let registry =
            SourceRegistry::new(vec![source("a"), source("b"), source("c")]).unwrap();
        for _ in 0..50 {
            let picked = registry.pick();
            assert!(registry.sources().contains(picked));
        }
    }
}
