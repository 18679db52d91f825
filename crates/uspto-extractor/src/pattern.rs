//! Tag-name patterns used to select elements
//!
//! Dump revisions name the same structure differently (`parties` vs
//! `us-parties`, `references-cited` vs `us-references-cited`), so lookups take
//! a pattern instead of a literal tag.

use regex::Regex;

/// A predicate over element tag names
#[derive(Debug, Clone)]
pub enum TagPattern {
    /// Tag equals the string
    Exact(String),
    /// Tag contains the string
    Contains(String),
    /// Tag matches the regular expression (unanchored unless the regex says so)
    Regex(Regex),
    /// Tag matches any of the inner patterns
    AnyOf(Vec<TagPattern>),
}

impl TagPattern {
    /// Tag name substring
    pub fn contains(needle: impl Into<String>) -> Self {
        TagPattern::Contains(needle.into())
    }

    /// Compile a regex pattern
    pub fn regex(pattern: &str) -> Result<Self, regex::Error> {
        Ok(TagPattern::Regex(Regex::new(pattern)?))
    }

    /// Any of several patterns
    pub fn any_of(patterns: impl IntoIterator<Item = TagPattern>) -> Self {
        TagPattern::AnyOf(patterns.into_iter().collect())
    }

    /// Test a tag name
    pub fn matches(&self, tag: &str) -> bool {
        match self {
            TagPattern::Exact(s) => tag == s,
            TagPattern::Contains(s) => tag.contains(s.as_str()),
            TagPattern::Regex(re) => re.is_match(tag),
            TagPattern::AnyOf(patterns) => patterns.iter().any(|p| p.matches(tag)),
        }
    }
}

impl From<&str> for TagPattern {
    fn from(tag: &str) -> Self {
        TagPattern::Exact(tag.to_string())
    }
}
