//! IPC classification extraction
//!
//! Two passes. Structured `classification-ipcr` elements are read first. Only
//! when they produce nothing are the free-text classification strings of the
//! bibliographic section parsed, skipping any that belong to a citation.

use crate::error::ExtractError;
use crate::pattern::TagPattern;
use crate::tree::XmlElement;
use once_cell::sync::Lazy;
use regex::Regex;
use uspto_domain::{Classification, ClassificationSet, IpcCode};

static IPC_STRING_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"^(?P<section>[A-Z])(?P<class>[0-9]{2})(?P<subclass>[A-Z])\s?(?P<maingroup>[0-9]{1,4})\s?/\s?(?P<subgroup>[0-9]{2,6})",
    )
    .expect("valid ipc regex")
});

static BIBLIOGRAPHIC_DATA: Lazy<TagPattern> = Lazy::new(|| {
    TagPattern::regex("us-bibliographic-data-(grant|application)").expect("valid bibliographic regex")
});

static CLASSIFICATION_TAGS: Lazy<TagPattern> = Lazy::new(|| {
    TagPattern::regex("(classification-ipc(r)?)|(classification-cpc(-text)?)")
        .expect("valid classification tag regex")
});

/// Parse a combined code string such as `H04L 29/06` or `H04L29/06`
///
/// Only the leading code is read; trailing text is ignored.
pub fn parse_ipc_string(text: &str) -> Option<IpcCode> {
    let caps = IPC_STRING_RE.captures(text)?;
    Some(IpcCode::new(
        &caps["section"],
        &caps["class"],
        &caps["subclass"],
        &caps["maingroup"],
        &caps["subgroup"],
    ))
}

/// Run both passes over a document root
pub fn extract_classification(root: &XmlElement) -> Result<Classification, ExtractError> {
    let mut set = ClassificationSet::new();

    structured_pass(root, &mut set)?;
    if set.is_empty() {
        bibliographic_pass(root, &mut set);
    }

    Ok(set.into_classification())
}

fn structured_pass(root: &XmlElement, set: &mut ClassificationSet) -> Result<(), ExtractError> {
    let ipcr = TagPattern::from("classification-ipcr");

    for group in root.find_all(&TagPattern::from("classifications-ipcr")) {
        for element in group.find_all(&ipcr) {
            let field = |tag: &str| {
                element
                    .text_of(tag)
                    .map(|text| text.trim().to_string())
                    .ok_or_else(|| ExtractError::MissingField(format!("classification-ipcr/{}", tag)))
            };
            let code = IpcCode::new(
                field("section")?,
                field("class")?,
                field("subclass")?,
                field("main-group")?,
                field("subgroup")?,
            );
            set.add(&code);
        }
    }

    Ok(())
}

fn bibliographic_pass(root: &XmlElement, set: &mut ClassificationSet) {
    for biblio in root.find_all(&BIBLIOGRAPHIC_DATA) {
        let candidates = biblio
            .descendants_with_parent()
            .filter(|(parent, element)| {
                CLASSIFICATION_TAGS.matches(&element.name) && !parent.name.contains("citation")
            });

        for (_, element) in candidates {
            let text = element
                .text_of("main-classification")
                .unwrap_or_else(|| element.text());
            if let Some(code) = parse_ipc_string(&text) {
                set.add(&code);
            }
        }
    }
}
