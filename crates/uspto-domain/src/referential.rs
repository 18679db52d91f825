//! Referential documents: related filings, cited references, priority claims

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// Relationship-specific extras (parent PCT number, claimed date, ...)
///
/// Keys stay in insertion order, which is the order they are written out.
pub type Metadata = IndexMap<String, Option<String>>;

/// The exact attribute set every referential document carries
pub const REFERENTIAL_FIELDS: [&str; 7] = [
    "uspto_publication_number",
    "reference",
    "cited_by_examiner",
    "document_type",
    "country",
    "kind",
    "metadata",
];

/// How a referential document relates to the subject patent
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DocumentType {
    /// Continuation of an earlier application
    Continuation,

    /// Divisional application
    Division,

    /// Continuation-in-part
    ContinuationInPart,

    /// Reissue (including reexamination merger and continuing reissue)
    Reissue,

    /// Substitute application
    Substitution,

    /// Provisional application the patent claims benefit of
    Provisional,

    /// Prior publication of the same application
    Prior,

    /// Patent cited as prior art
    PatentReference,

    /// Non-patent citation or priority claim
    OtherReference,
}

impl DocumentType {
    /// Get the canonical string form
    pub fn as_str(&self) -> &'static str {
        match self {
            DocumentType::Continuation => "continuation",
            DocumentType::Division => "division",
            DocumentType::ContinuationInPart => "continuation-in-part",
            DocumentType::Reissue => "reissue",
            DocumentType::Substitution => "substitution",
            DocumentType::Provisional => "provisional",
            DocumentType::Prior => "prior",
            DocumentType::PatentReference => "patent-reference",
            DocumentType::OtherReference => "other-reference",
        }
    }

    /// Parse the canonical string form
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "continuation" => Some(DocumentType::Continuation),
            "division" => Some(DocumentType::Division),
            "continuation-in-part" => Some(DocumentType::ContinuationInPart),
            "reissue" => Some(DocumentType::Reissue),
            "substitution" => Some(DocumentType::Substitution),
            "provisional" => Some(DocumentType::Provisional),
            "prior" => Some(DocumentType::Prior),
            "patent-reference" => Some(DocumentType::PatentReference),
            "other-reference" => Some(DocumentType::OtherReference),
            _ => None,
        }
    }
}

impl fmt::Display for DocumentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A document related to the subject patent
///
/// Stored append-only, keyed by `uspto_publication_number`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReferentialDocument {
    /// Publication number of the citing (subject) patent
    pub uspto_publication_number: String,

    /// Number of the other document, or free text for non-patent citations
    pub reference: Option<String>,

    /// Whether an examiner (rather than the applicant) cited it
    pub cited_by_examiner: Option<bool>,

    /// Relationship kind
    pub document_type: DocumentType,

    /// Country code of the other document
    pub country: Option<String>,

    /// Kind code of the other document
    pub kind: Option<String>,

    /// Relationship-specific extras
    pub metadata: Metadata,
}

impl ReferentialDocument {
    /// Create a document with only the key and type set
    pub fn new(uspto_publication_number: impl Into<String>, document_type: DocumentType) -> Self {
        Self {
            uspto_publication_number: uspto_publication_number.into(),
            reference: None,
            cited_by_examiner: None,
            document_type,
            country: None,
            kind: None,
            metadata: Metadata::new(),
        }
    }

    /// Check that the serialized form carries exactly [`REFERENTIAL_FIELDS`]
    pub fn validate_shape(&self) -> Result<(), ShapeError> {
        let value = serde_json::to_value(self).map_err(|e| ShapeError {
            missing: REFERENTIAL_FIELDS.iter().map(|k| k.to_string()).collect(),
            unexpected: Vec::new(),
            context: format!("not serializable: {}", e),
        })?;
        check_shape(&value)
    }
}

/// A referential document whose key set differs from [`REFERENTIAL_FIELDS`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShapeError {
    /// Expected keys that are absent
    pub missing: Vec<String>,

    /// Keys outside the expected set
    pub unexpected: Vec<String>,

    /// The offending object, rendered for triage
    pub context: String,
}

impl fmt::Display for ShapeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "referential document has missing keys {:?} and unexpected keys {:?} for {}",
            self.missing, self.unexpected, self.context
        )
    }
}

impl std::error::Error for ShapeError {}

/// Check a JSON object against the referential-document key set
pub fn check_shape(value: &Value) -> Result<(), ShapeError> {
    let Some(object) = value.as_object() else {
        return Err(ShapeError {
            missing: REFERENTIAL_FIELDS.iter().map(|k| k.to_string()).collect(),
            unexpected: Vec::new(),
            context: value.to_string(),
        });
    };

    let missing: Vec<String> = REFERENTIAL_FIELDS
        .iter()
        .filter(|k| !object.contains_key(**k))
        .map(|k| k.to_string())
        .collect();
    let unexpected: Vec<String> = object
        .keys()
        .filter(|k| !REFERENTIAL_FIELDS.contains(&k.as_str()))
        .cloned()
        .collect();

    if missing.is_empty() && unexpected.is_empty() {
        Ok(())
    } else {
        Err(ShapeError {
            missing,
            unexpected,
            context: value.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_document_type_round_trip_names() {
        for name in [
            "continuation",
            "division",
            "continuation-in-part",
            "reissue",
            "substitution",
            "provisional",
            "prior",
            "patent-reference",
            "other-reference",
        ] {
            let parsed = DocumentType::parse(name).unwrap();
            assert_eq!(parsed.as_str(), name);
            assert_eq!(serde_json::to_value(parsed).unwrap(), json!(name));
        }
        assert!(DocumentType::parse("us-reexamination-reissue-merger").is_none());
    }

    #[test]
    fn test_new_document_has_exact_shape() {
        let doc = ReferentialDocument::new("US1234567", DocumentType::Provisional);
        assert!(doc.validate_shape().is_ok());
    }

    #[test]
    fn test_extra_key_is_rejected() {
        let value = json!({
            "uspto_publication_number": "US1",
            "reference": null,
            "cited_by_examiner": false,
            "document_type": "prior",
            "country": null,
            "kind": null,
            "metadata": {},
            "name": "Smith"
        });

        let err = check_shape(&value).unwrap_err();
        assert!(err.missing.is_empty());
        assert_eq!(err.unexpected, vec!["name"]);
    }

    #[test]
    fn test_missing_key_is_rejected() {
        let value = json!({
            "uspto_publication_number": "US1",
            "reference": "123",
            "document_type": "prior",
            "country": "US",
            "metadata": {}
        });

        let err = check_shape(&value).unwrap_err();
        assert_eq!(err.missing, vec!["cited_by_examiner", "kind"]);
        assert!(err.to_string().contains("missing keys"));
    }

    #[test]
    fn test_non_object_is_rejected() {
        assert!(check_shape(&json!(["a"])).is_err());
    }

    #[test]
    fn test_metadata_keeps_insertion_order() {
        let mut doc = ReferentialDocument::new("US1", DocumentType::PatentReference);
        doc.metadata.insert("name".to_string(), Some("Smith".to_string()));
        doc.metadata.insert("date".to_string(), Some("19990101".to_string()));

        let line = serde_json::to_string(&doc.metadata).unwrap();
        assert_eq!(line, r#"{"name":"Smith","date":"19990101"}"#);

        let parsed: Metadata = serde_json::from_str(&line).unwrap();
        let keys: Vec<&str> = parsed.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["name", "date"]);
    }
}
