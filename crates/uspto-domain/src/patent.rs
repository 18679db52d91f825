//! Patent record - the canonical shape of one source document

use crate::{Classification, ReferentialDocument};
use serde::{Deserialize, Serialize};

/// One extracted patent grant or application
///
/// `publication_number` is the identity; re-extracting the same number
/// supersedes every other field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PatentRecord {
    /// Publication number (segment of the `file` attribute before the first hyphen)
    pub publication_number: String,

    /// Invention title
    pub publication_title: String,

    /// Publication date as written in the source (`YYYYMMDD`)
    pub publication_date: String,

    /// Grant date, present only for grants
    pub grant_date: Option<String>,

    /// Application number
    pub application_number: String,

    /// Application type (`utility`, `design`, ...)
    pub application_type: String,

    /// Application filing date
    pub application_date: String,

    /// Inventor names
    pub authors: Vec<String>,

    /// Applicant organizations (`org, city, country`)
    pub organizations: Vec<String>,

    /// Attorney names
    pub attorneys: Vec<String>,

    /// Attorney organizations (`org, city, country`)
    pub attorney_organizations: Vec<String>,

    /// IPC classification lists
    #[serde(flatten)]
    pub classification: Classification,

    /// Abstract text blocks
    #[serde(rename = "abstract")]
    pub abstract_text: Vec<String>,

    /// Description text blocks
    pub descriptions: Vec<String>,

    /// Claim text blocks
    pub claims: Vec<String>,

    /// Related filings, cited references and priority claims
    pub referential_documents: Vec<ReferentialDocument>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::DocumentType;

    fn sample_record() -> PatentRecord {
        PatentRecord {
            publication_number: "US09876543".to_string(),
            publication_title: "Widget".to_string(),
            publication_date: "20180102".to_string(),
            grant_date: Some("20180102".to_string()),
            application_number: "15123456".to_string(),
            application_type: "utility".to_string(),
            application_date: "20160505".to_string(),
            authors: vec!["Jane Doe".to_string()],
            organizations: vec!["Acme, Springfield, US".to_string()],
            attorneys: vec![],
            attorney_organizations: vec![],
            classification: Classification {
                sections: vec!["H".to_string()],
                section_classes: vec!["H04".to_string()],
                section_class_subclasses: vec!["H04L".to_string()],
                section_class_subclass_groups: vec!["H04L 29/06".to_string()],
            },
            abstract_text: vec!["An abstract.".to_string()],
            descriptions: vec![],
            claims: vec!["1. A widget.".to_string()],
            referential_documents: vec![ReferentialDocument::new(
                "US09876543",
                DocumentType::Prior,
            )],
        }
    }

    #[test]
    fn test_json_uses_flat_field_names() {
        let value = serde_json::to_value(sample_record()).unwrap();
        let object = value.as_object().unwrap();

        assert!(object.contains_key("abstract"));
        assert!(object.contains_key("sections"));
        assert!(object.contains_key("section_class_subclass_groups"));
        assert!(!object.contains_key("classification"));
        assert!(!object.contains_key("abstract_text"));
    }

    #[test]
    fn test_json_round_trip() {
        let record = sample_record();
        let line = serde_json::to_string(&record).unwrap();
        let parsed: PatentRecord = serde_json::from_str(&line).unwrap();
        assert_eq!(parsed, record);
    }
}
