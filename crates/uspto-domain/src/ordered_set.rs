//! Insertion-ordered set of strings

use std::collections::HashSet;

/// A set of strings that remembers first-seen order
///
/// Re-inserting a value is a no-op, so a value appears at most once no matter
/// how many source elements produce it.
///
/// # Examples
///
/// ```
/// use uspto_domain::OrderedSet;
///
/// let mut set = OrderedSet::new();
/// assert!(set.insert("H04"));
/// assert!(set.insert("G06"));
/// assert!(!set.insert("H04"));
/// assert_eq!(set.into_vec(), vec!["H04".to_string(), "G06".to_string()]);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OrderedSet {
    items: Vec<String>,
    seen: HashSet<String>,
}

impl OrderedSet {
    /// Create an empty set
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a value, returning `true` if it was not already present
    pub fn insert(&mut self, value: impl Into<String>) -> bool {
        let value = value.into();
        if self.seen.contains(&value) {
            return false;
        }
        self.seen.insert(value.clone());
        self.items.push(value);
        true
    }

    /// Check whether a value is present
    pub fn contains(&self, value: &str) -> bool {
        self.seen.contains(value)
    }

    /// Number of distinct values
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the set is empty
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Iterate in first-seen order
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.items.iter().map(String::as_str)
    }

    /// Values in first-seen order
    pub fn as_slice(&self) -> &[String] {
        &self.items
    }

    /// Consume the set, returning values in first-seen order
    pub fn into_vec(self) -> Vec<String> {
        self.items
    }
}

impl<S: Into<String>> FromIterator<S> for OrderedSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut set = OrderedSet::new();
        for value in iter {
            set.insert(value);
        }
        set
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Property: no value is ever stored twice
        #[test]
        fn test_no_duplicates(values in proptest::collection::vec("[a-c]{1,2}", 0..40)) {
            let set: OrderedSet = values.iter().cloned().collect();
            let unique: HashSet<&String> = set.as_slice().iter().collect();
            prop_assert_eq!(unique.len(), set.len());
        }

        /// Property: order matches the first occurrence in the input
        #[test]
        fn test_first_seen_order(values in proptest::collection::vec("[a-e]", 0..40)) {
            let set: OrderedSet = values.iter().cloned().collect();

            let mut expected: Vec<String> = Vec::new();
            for v in &values {
                if !expected.contains(v) {
                    expected.push(v.clone());
                }
            }
            prop_assert_eq!(set.into_vec(), expected);
        }
    }
}
