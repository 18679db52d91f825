//! Choosing the document root and filtering out non-patent documents

use crate::error::ExtractError;
use crate::pattern::TagPattern;
use crate::tree::{parse_fragment, XmlElement, XmlNode};
use std::fmt;

/// Marker element of a genetic sequence listing
pub const SEQUENCE_LISTING_TAG: &str = "sequence-cwu";

/// Root element of a published application
pub const APPLICATION_ROOT: &str = "us-patent-application";

/// Root element of an issued grant
pub const GRANT_ROOT: &str = "us-patent-grant";

/// Which root the document was found under
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentKind {
    /// `us-patent-application`
    Application,
    /// `us-patent-grant`
    Grant,
}

impl DocumentKind {
    /// Root tag name
    pub fn root_tag(&self) -> &'static str {
        match self {
            DocumentKind::Application => APPLICATION_ROOT,
            DocumentKind::Grant => GRANT_ROOT,
        }
    }
}

impl fmt::Display for DocumentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.root_tag())
    }
}

/// A fragment after classification
#[derive(Debug, Clone)]
pub enum Classified {
    /// Sequence listing: excluded from every count
    SequenceListing,
    /// A patent document ready for extraction
    Patent(PatentDocument),
}

/// The selected root of one patent document
#[derive(Debug, Clone)]
pub struct PatentDocument {
    root: XmlElement,
    kind: DocumentKind,
}

impl PatentDocument {
    /// Wrap an already selected root element
    pub fn new(root: XmlElement, kind: DocumentKind) -> Self {
        Self { root, kind }
    }

    /// Root element
    pub fn root(&self) -> &XmlElement {
        &self.root
    }

    /// Application or grant
    pub fn kind(&self) -> DocumentKind {
        self.kind
    }

    /// Best-effort invention title for diagnostics
    pub fn title(&self) -> Option<String> {
        self.root.text_of("invention-title")
    }
}

/// Parse a fragment and select its root
///
/// The application root wins when both are somehow present.
pub fn classify(fragment: &str) -> Result<Classified, ExtractError> {
    let tree = parse_fragment(fragment)?;

    if tree.find(&TagPattern::from(SEQUENCE_LISTING_TAG)).is_some() {
        return Ok(Classified::SequenceListing);
    }

    for kind in [DocumentKind::Application, DocumentKind::Grant] {
        if tree.find(&TagPattern::from(kind.root_tag())).is_some() {
            return take_first(tree, kind.root_tag())
                .map(|root| Classified::Patent(PatentDocument::new(root, kind)))
                .ok_or(ExtractError::NoDocumentRoot);
        }
    }

    Err(ExtractError::NoDocumentRoot)
}

/// Move the first descendant named `tag` out of the tree
fn take_first(element: XmlElement, tag: &str) -> Option<XmlElement> {
    for node in element.children {
        if let XmlNode::Element(child) = node {
            if child.name == tag {
                return Some(child);
            }
            if let Some(found) = take_first(child, tag) {
                return Some(found);
            }
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sequence_listing_is_skipped() {
        let xml = r#"<us-patent-grant file="US1-20200101.XML"><sequence-cwu/></us-patent-grant>"#;
        assert!(matches!(classify(xml).unwrap(), Classified::SequenceListing));
    }

    #[test]
    fn test_grant_root() {
        let xml = r#"<!DOCTYPE us-patent-grant SYSTEM "x.dtd" []>
<us-patent-grant file="US1-20200101.XML"><invention-title>Gear</invention-title></us-patent-grant>"#;
        let Classified::Patent(doc) = classify(xml).unwrap() else {
            panic!("expected a patent");
        };
        assert_eq!(doc.kind(), DocumentKind::Grant);
        assert_eq!(doc.root().name, GRANT_ROOT);
        assert_eq!(doc.title().as_deref(), Some("Gear"));
    }

    #[test]
    fn test_application_root_preferred() {
        let xml = r#"<wrap><us-patent-grant/><us-patent-application/></wrap>"#;
        let Classified::Patent(doc) = classify(xml).unwrap() else {
            panic!("expected a patent");
        };
        assert_eq!(doc.kind(), DocumentKind::Application);
    }

    #[test]
    fn test_missing_title_is_none() {
        let Classified::Patent(doc) = classify("<us-patent-application/>").unwrap() else {
            panic!("expected a patent");
        };
        assert_eq!(doc.title(), None);
    }

    #[test]
    fn test_no_root_is_error() {
        let err = classify("<sequence-listing-other/>").unwrap_err();
        assert!(matches!(err, ExtractError::NoDocumentRoot));
    }
}
