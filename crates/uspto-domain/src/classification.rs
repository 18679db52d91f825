//! International Patent Classification (IPC) codes
//!
//! An IPC code is hierarchical: section `H`, class `H04`, subclass `H04L`,
//! group `H04L 29/06`. A record keeps one deduplicated list per level, so every
//! code contributes one entry to each list and the lists stay nested.

use crate::OrderedSet;
use serde::{Deserialize, Serialize};

/// One IPC code split into its components
///
/// # Examples
///
/// ```
/// use uspto_domain::IpcCode;
///
/// let code = IpcCode::new("H", "04", "L", "29", "06");
/// assert_eq!(code.section_class(), "H04");
/// assert_eq!(code.section_class_subclass(), "H04L");
/// assert_eq!(code.section_class_subclass_group(), "H04L 29/06");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct IpcCode {
    /// Section letter, e.g. `H`
    pub section: String,

    /// Two-digit class, e.g. `04`
    pub class: String,

    /// Subclass letter, e.g. `L`
    pub subclass: String,

    /// Main group, e.g. `29`
    pub main_group: String,

    /// Subgroup, e.g. `06`
    pub subgroup: String,
}

impl IpcCode {
    /// Create a code from its components
    pub fn new(
        section: impl Into<String>,
        class: impl Into<String>,
        subclass: impl Into<String>,
        main_group: impl Into<String>,
        subgroup: impl Into<String>,
    ) -> Self {
        Self {
            section: section.into(),
            class: class.into(),
            subclass: subclass.into(),
            main_group: main_group.into(),
            subgroup: subgroup.into(),
        }
    }

    /// Section level, e.g. `H`
    pub fn section(&self) -> &str {
        &self.section
    }

    /// Class level, e.g. `H04`
    pub fn section_class(&self) -> String {
        format!("{}{}", self.section, self.class)
    }

    /// Subclass level, e.g. `H04L`
    pub fn section_class_subclass(&self) -> String {
        format!("{}{}{}", self.section, self.class, self.subclass)
    }

    /// Group level, e.g. `H04L 29/06`
    pub fn section_class_subclass_group(&self) -> String {
        format!(
            "{} {}/{}",
            self.section_class_subclass(),
            self.main_group,
            self.subgroup
        )
    }
}

/// The four classification lists of a patent record
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Classification {
    /// Sections, e.g. `["H"]`
    pub sections: Vec<String>,

    /// Classes, e.g. `["H04"]`
    pub section_classes: Vec<String>,

    /// Subclasses, e.g. `["H04L"]`
    pub section_class_subclasses: Vec<String>,

    /// Groups, e.g. `["H04L 29/06"]`
    pub section_class_subclass_groups: Vec<String>,
}

/// Accumulator that deduplicates codes level by level
#[derive(Debug, Clone, Default)]
pub struct ClassificationSet {
    sections: OrderedSet,
    section_classes: OrderedSet,
    section_class_subclasses: OrderedSet,
    section_class_subclass_groups: OrderedSet,
}

impl ClassificationSet {
    /// Create an empty accumulator
    pub fn new() -> Self {
        Self::default()
    }

    /// Add one code to every level
    pub fn add(&mut self, code: &IpcCode) {
        self.sections.insert(code.section());
        self.section_classes.insert(code.section_class());
        self.section_class_subclasses
            .insert(code.section_class_subclass());
        self.section_class_subclass_groups
            .insert(code.section_class_subclass_group());
    }

    /// True when no section has been recorded yet
    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    /// Freeze into the record representation
    pub fn into_classification(self) -> Classification {
        Classification {
            sections: self.sections.into_vec(),
            section_classes: self.section_classes.into_vec(),
            section_class_subclasses: self.section_class_subclasses.into_vec(),
            section_class_subclass_groups: self.section_class_subclass_groups.into_vec(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_duplicate_codes_collapse() {
        let mut set = ClassificationSet::new();
        set.add(&IpcCode::new("H", "04", "L", "29", "06"));
        set.add(&IpcCode::new("H", "04", "L", "29", "06"));

        let c = set.into_classification();
        assert_eq!(c.sections, vec!["H"]);
        assert_eq!(c.section_classes, vec!["H04"]);
        assert_eq!(c.section_class_subclasses, vec!["H04L"]);
        assert_eq!(c.section_class_subclass_groups, vec!["H04L 29/06"]);
    }

    #[test]
    fn test_shared_prefix_dedups_per_level() {
        let mut set = ClassificationSet::new();
        set.add(&IpcCode::new("H", "04", "L", "29", "06"));
        set.add(&IpcCode::new("H", "04", "L", "9", "32"));
        set.add(&IpcCode::new("G", "06", "F", "21", "00"));

        let c = set.into_classification();
        assert_eq!(c.sections, vec!["H", "G"]);
        assert_eq!(c.section_classes, vec!["H04", "G06"]);
        assert_eq!(c.section_class_subclasses, vec!["H04L", "G06F"]);
        assert_eq!(
            c.section_class_subclass_groups,
            vec!["H04L 29/06", "H04L 9/32", "G06F 21/00"]
        );
    }

    #[test]
    fn test_empty_set() {
        let set = ClassificationSet::new();
        assert!(set.is_empty());
        assert_eq!(set.into_classification(), Classification::default());
    }
}
