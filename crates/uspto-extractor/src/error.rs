//! Error types for the Extractor

use thiserror::Error;
use uspto_domain::ShapeError;

/// Errors that can occur while turning one fragment into a record
///
/// Every variant is recoverable at document granularity: the pipeline records
/// it and moves on to the next fragment.
#[derive(Error, Debug)]
pub enum ExtractError {
    /// A required bibliographic or application field is absent
    #[error("Missing required field: {0}")]
    MissingField(String),

    /// A referential document failed the exact-shape check, or a related
    /// document used a relationship tag nobody has mapped yet
    #[error("Schema validation error: {0}")]
    SchemaValidation(String),

    /// The fragment is not well-formed XML
    #[error("XML error: {0}")]
    Xml(String),

    /// Neither an application nor a grant root element was found
    #[error("No us-patent-application or us-patent-grant root element")]
    NoDocumentRoot,
}

impl ExtractError {
    /// Short category name used in error reports
    pub fn kind(&self) -> &'static str {
        match self {
            ExtractError::MissingField(_) => "field-extraction",
            ExtractError::SchemaValidation(_) => "schema-validation",
            ExtractError::Xml(_) => "xml",
            ExtractError::NoDocumentRoot => "no-document-root",
        }
    }
}

impl From<quick_xml::Error> for ExtractError {
    fn from(e: quick_xml::Error) -> Self {
        ExtractError::Xml(e.to_string())
    }
}

impl From<quick_xml::events::attributes::AttrError> for ExtractError {
    fn from(e: quick_xml::events::attributes::AttrError) -> Self {
        ExtractError::Xml(e.to_string())
    }
}

impl From<ShapeError> for ExtractError {
    fn from(e: ShapeError) -> Self {
        ExtractError::SchemaValidation(e.to_string())
    }
}
