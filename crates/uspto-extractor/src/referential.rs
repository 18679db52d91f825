//! Referential document normalization
//!
//! Related filings, cited references and priority claims arrive in three
//! unrelated layouts. Each is mapped to a [`ReferentialDocument`] and every
//! result is shape-checked; one bad item fails the whole document.

use crate::error::ExtractError;
use crate::pattern::TagPattern;
use crate::tree::XmlElement;
use once_cell::sync::Lazy;
use uspto_domain::{DocumentType, ReferentialDocument};

static FAMILY_DOCUMENTS: Lazy<TagPattern> = Lazy::new(|| {
    TagPattern::regex("(parent|child)-doc(ument)?$").expect("valid family document regex")
});
static REFERENCES_CITED: Lazy<TagPattern> =
    Lazy::new(|| TagPattern::contains("-references-cited"));
static CITATION: Lazy<TagPattern> = Lazy::new(|| TagPattern::contains("-citation"));

/// Map a related-document tag to its document type
///
/// Both legacy reissue tags collapse into [`DocumentType::Reissue`].
/// Returns `None` for tags with no mapping.
pub fn related_document_type(tag: &str) -> Option<DocumentType> {
    let document_type = match tag {
        "continuation" => DocumentType::Continuation,
        "division" => DocumentType::Division,
        "continuation-in-part" => DocumentType::ContinuationInPart,
        "reissue" | "us-reexamination-reissue-merger" | "continuing-reissue" => {
            DocumentType::Reissue
        }
        "substitution" => DocumentType::Substitution,
        "us-provisional-application" => DocumentType::Provisional,
        "related-publication" => DocumentType::Prior,
        _ => return None,
    };
    Some(document_type)
}

fn required(element: &XmlElement, tag: &str, context: &str) -> Result<String, ExtractError> {
    element
        .text_of(tag)
        .ok_or_else(|| ExtractError::MissingField(format!("{}/{}", context, tag)))
}

/// Collect every referential document of a root, shape-checked
pub fn extract_referential_documents(
    root: &XmlElement,
    publication_number: &str,
) -> Result<Vec<ReferentialDocument>, ExtractError> {
    let mut documents = related_documents(root, publication_number)?;
    documents.extend(cited_references(root, publication_number)?);
    documents.extend(priority_claims(root, publication_number)?);

    for document in &documents {
        document.validate_shape()?;
    }

    Ok(documents)
}

/// Direct children of `us-related-documents`
pub fn related_documents(
    root: &XmlElement,
    publication_number: &str,
) -> Result<Vec<ReferentialDocument>, ExtractError> {
    let Some(container) = root.find(&TagPattern::from("us-related-documents")) else {
        return Ok(Vec::new());
    };

    container
        .elements()
        .map(|related| related_document(related, publication_number))
        .collect()
}

fn related_document(
    related: &XmlElement,
    publication_number: &str,
) -> Result<ReferentialDocument, ExtractError> {
    let document_type = related_document_type(&related.name).ok_or_else(|| {
        ExtractError::SchemaValidation(format!(
            "'{}' is not set up to be included in referential documents",
            related.name
        ))
    })?;

    let mut doc = ReferentialDocument::new(publication_number, document_type);
    doc.cited_by_examiner = Some(false);

    match document_type {
        DocumentType::Provisional => {
            let context = related.name.as_str();
            doc.country = Some(required(related, "country", context)?);
            doc.reference = Some(required(related, "doc-number", context)?);
            doc.metadata.insert(
                "application_date".to_string(),
                Some(required(related, "date", context)?),
            );
        }
        DocumentType::Prior => {
            let context = related.name.as_str();
            doc.reference = Some(required(related, "doc-number", context)?);
            doc.country = Some(required(related, "country", context)?);
            doc.kind = Some(required(related, "kind", context)?);
            doc.metadata
                .insert("date".to_string(), Some(required(related, "date", context)?));
        }
        _ => fill_family_member(&mut doc, related)?,
    }

    Ok(doc)
}

/// Continuation-family entries: the `document-id`'s parent tag picks the fields
fn fill_family_member(
    doc: &mut ReferentialDocument,
    related: &XmlElement,
) -> Result<(), ExtractError> {
    for group in related.find_all(&FAMILY_DOCUMENTS) {
        let ids = group
            .descendants_with_parent()
            .filter(|(_, element)| element.name == "document-id");

        for (parent, id) in ids {
            let context = parent.name.as_str();
            match context {
                "parent-grant-document" => {
                    doc.reference = Some(required(id, "doc-number", context)?);
                }
                "parent-pct-document" => {
                    doc.metadata.insert(
                        "parent_pct_number".to_string(),
                        Some(required(id, "doc-number", context)?),
                    );
                    doc.metadata.insert(
                        "parent_pct_country".to_string(),
                        Some(required(id, "country", context)?),
                    );
                    doc.metadata
                        .insert("parent_pct_date".to_string(), id.text_of("date"));
                }
                "parent-doc" => {
                    doc.country = Some(required(id, "country", context)?);
                    doc.metadata.insert(
                        "application_number".to_string(),
                        Some(required(id, "doc-number", context)?),
                    );
                    doc.metadata
                        .insert("application_date".to_string(), id.text_of("date"));
                }
                "child-doc" => {
                    doc.metadata.insert(
                        "child_application_number".to_string(),
                        Some(required(id, "doc-number", context)?),
                    );
                    doc.metadata.insert(
                        "parent_country".to_string(),
                        Some(required(id, "country", context)?),
                    );
                }
                _ => {}
            }
        }
    }
    Ok(())
}

/// Citations in the first `*-references-cited` section
pub fn cited_references(
    root: &XmlElement,
    publication_number: &str,
) -> Result<Vec<ReferentialDocument>, ExtractError> {
    let Some(section) = root.find(&REFERENCES_CITED) else {
        return Ok(Vec::new());
    };

    let mut documents = Vec::new();
    for citation in section.find_all(&CITATION) {
        let by_examiner = citation
            .text_of("category")
            .is_some_and(|category| category.contains("examiner"));

        let doc = match citation.find(&TagPattern::from("document-id")) {
            Some(id) => {
                let mut doc =
                    ReferentialDocument::new(publication_number, DocumentType::PatentReference);
                doc.reference = Some(required(id, "doc-number", &citation.name)?);
                doc.country = id.text_of("country");
                doc.kind = id.text_of("kind");
                doc.metadata.insert("name".to_string(), id.text_of("name"));
                doc.metadata.insert("date".to_string(), id.text_of("date"));
                doc
            }
            None => {
                let mut doc =
                    ReferentialDocument::new(publication_number, DocumentType::OtherReference);
                doc.reference = Some(required(citation, "othercit", &citation.name)?);
                doc.country = citation.text_of("country");
                doc
            }
        };

        documents.push(ReferentialDocument {
            cited_by_examiner: Some(by_examiner),
            ..doc
        });
    }

    Ok(documents)
}

/// Entries of `priority-claims`
pub fn priority_claims(
    root: &XmlElement,
    publication_number: &str,
) -> Result<Vec<ReferentialDocument>, ExtractError> {
    let Some(claims) = root.find(&TagPattern::from("priority-claims")) else {
        return Ok(Vec::new());
    };

    claims
        .find_all(&TagPattern::from("priority-claim"))
        .into_iter()
        .map(|claim| {
            let mut doc = ReferentialDocument::new(publication_number, DocumentType::OtherReference);
            doc.reference = Some(required(claim, "doc-number", "priority-claim")?);
            doc.cited_by_examiner = Some(false);
            doc.country = claim.text_of("country");
            doc.metadata.insert("date".to_string(), claim.text_of("date"));
            Ok(doc)
        })
        .collect()
}
