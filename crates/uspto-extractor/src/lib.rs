//! USPTO Extractor
//!
//! Turns the documents of a bulk patent XML dump into [`PatentRecord`]s.
//!
//! # Overview
//!
//! A dump file is many XML documents glued together, each introduced by its
//! own XML declaration, spanning decades of schema revisions. The Extractor
//! slices the file into fragments, parses each into a small owned tree, picks
//! the application or grant root, and maps the tree onto one stable record.
//!
//! # Architecture
//!
//! ```text
//! file text → FragmentSplitter → classify → PatentExtractor → PatentRecord
//!                                   │              ├─ ipc (two-pass classification)
//!                                   │              ├─ parties
//!                                   │              └─ referential (shape-checked)
//!                                   └─ sequence listings → Skipped
//! ```
//!
//! # Key Features
//!
//! - **Lazy splitting**: fragments are borrowed slices of the file text
//! - **Tag patterns**: era-specific tag names are matched by [`TagPattern`]
//! - **Two-pass classification**: structured IPC elements, then free-text codes
//! - **Fail-fast referential data**: an unmapped related-document tag or a
//!   malformed referential object discards the whole document
//!
//! # Example Usage
//!
//! ```
//! use uspto_extractor::{FragmentOutcome, FragmentSplitter, PatentExtractor};
//!
//! let dump = r#"<?xml version="1.0" encoding="UTF-8"?>
//! <us-patent-grant file="US01234567-20200101.XML" date-produced="20191215">
//!   <publication-reference><document-id><date>20200101</date></document-id></publication-reference>
//!   <application-reference appl-type="utility">
//!     <document-id><doc-number>16000001</doc-number><date>20180101</date></document-id>
//!   </application-reference>
//!   <invention-title>Widget</invention-title>
//! </us-patent-grant>
//! "#;
//!
//! let extractor = PatentExtractor::new();
//! for fragment in FragmentSplitter::new(dump) {
//!     if let FragmentOutcome::Extracted(record) = extractor.process_fragment(fragment) {
//!         assert_eq!(record.publication_number, "US01234567");
//!         assert_eq!(record.grant_date.as_deref(), Some("20191215"));
//!     }
//! }
//! ```

#![warn(missing_docs)]

mod classifier;
mod error;
mod extractor;
mod ipc;
mod parties;
mod pattern;
mod referential;
mod splitter;
mod tree;
mod types;

#[cfg(test)]
mod tests;

pub use classifier::{
    classify, Classified, DocumentKind, PatentDocument, APPLICATION_ROOT, GRANT_ROOT,
    SEQUENCE_LISTING_TAG,
};
pub use error::ExtractError;
pub use extractor::PatentExtractor;
pub use ipc::{extract_classification, parse_ipc_string};
pub use parties::{build_name, build_org, extract_parties, Parties, UNKNOWN_SENTINEL};
pub use pattern::TagPattern;
pub use referential::{
    cited_references, extract_referential_documents, priority_claims, related_document_type,
    related_documents,
};
pub use splitter::{FragmentSplitter, XML_DECLARATION};
pub use tree::{decode_entities, parse_fragment, Descendants, XmlElement, XmlNode, DOCUMENT_NODE};
pub use types::FragmentOutcome;

#[doc(no_inline)]
pub use uspto_domain::PatentRecord;
