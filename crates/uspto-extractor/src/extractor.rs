//! Core Extractor implementation

use crate::classifier::{classify, Classified, DocumentKind, PatentDocument};
use crate::error::ExtractError;
use crate::ipc::extract_classification;
use crate::parties::extract_parties;
use crate::pattern::TagPattern;
use crate::referential::extract_referential_documents;
use crate::tree::XmlElement;
use crate::types::FragmentOutcome;
use tracing::{debug, warn};
use uspto_domain::PatentRecord;

/// The Extractor turns one patent document into a [`PatentRecord`]
///
/// Extraction is pure: the same fragment always yields the same record.
#[derive(Debug, Clone, Default)]
pub struct PatentExtractor {
    log_records: bool,
}

impl PatentExtractor {
    /// Create a new Extractor
    pub fn new() -> Self {
        Self::default()
    }

    /// Dump every extracted record at debug level
    pub fn with_record_logging(mut self, enabled: bool) -> Self {
        self.log_records = enabled;
        self
    }

    /// Classify and extract one raw fragment
    pub fn process_fragment(&self, fragment: &str) -> FragmentOutcome {
        let document = match classify(fragment) {
            Ok(Classified::SequenceListing) => return FragmentOutcome::Skipped,
            Ok(Classified::Patent(document)) => document,
            Err(error) => return FragmentOutcome::Failed { title: None, error },
        };

        let title = document.title();
        if title.is_none() {
            warn!("Could not read invention-title; continuing without one");
        }

        match self.extract(&document) {
            Ok(record) => FragmentOutcome::Extracted(record),
            Err(error) => FragmentOutcome::Failed { title, error },
        }
    }

    /// Extract a record from a classified document
    pub fn extract(&self, document: &PatentDocument) -> Result<PatentRecord, ExtractError> {
        let root = document.root();

        let file = root
            .attr("file")
            .ok_or_else(|| missing(root, "@file"))?;
        let publication_number = file
            .split_once('-')
            .map_or(file, |(head, _)| head)
            .to_string();

        let grant_date = match document.kind() {
            DocumentKind::Grant => root.attr("date-produced").map(str::to_string),
            DocumentKind::Application => None,
        };

        let publication_title = root
            .text_of("invention-title")
            .ok_or_else(|| missing(root, "invention-title"))?;
        let publication_date = root
            .find(&TagPattern::from("publication-reference"))
            .ok_or_else(|| missing(root, "publication-reference"))?
            .text_of("date")
            .ok_or_else(|| missing(root, "publication-reference/date"))?;

        let application = root
            .find(&TagPattern::from("application-reference"))
            .ok_or_else(|| missing(root, "application-reference"))?;
        let application_type = application
            .attr("appl-type")
            .ok_or_else(|| missing(root, "application-reference/@appl-type"))?
            .to_string();
        let application_date = application
            .text_of("date")
            .ok_or_else(|| missing(root, "application-reference/date"))?;
        let application_number = application
            .text_of("doc-number")
            .ok_or_else(|| missing(root, "application-reference/doc-number"))?;

        let referential_documents = extract_referential_documents(root, &publication_number)?;
        let classification = extract_classification(root)?;
        let parties = extract_parties(root);

        let record = PatentRecord {
            publication_number,
            publication_title,
            publication_date,
            grant_date,
            application_number,
            application_type,
            application_date,
            authors: parties.authors,
            organizations: parties.organizations,
            attorneys: parties.attorneys,
            attorney_organizations: parties.attorney_organizations,
            classification,
            abstract_text: text_blocks(root, "abstract"),
            descriptions: text_blocks(root, "description"),
            claims: text_blocks(root, "claim"),
            referential_documents,
        };

        if self.log_records {
            log_record(&record, file);
        }

        Ok(record)
    }
}

fn missing(root: &XmlElement, path: &str) -> ExtractError {
    ExtractError::MissingField(format!("{}/{}", root.name, path))
}

/// Text of every element with this tag, newlines trimmed from both ends
fn text_blocks(root: &XmlElement, tag: &str) -> Vec<String> {
    root.find_all(&TagPattern::from(tag))
        .into_iter()
        .map(|element| element.text().trim_matches('\n').to_string())
        .collect()
}

fn log_record(record: &PatentRecord, file: &str) {
    debug!("Filename: {}", file);
    debug!("Invention Title: {}", record.publication_title);
    debug!("Publication Number: {}", record.publication_number);
    debug!("Publication Date: {}", record.publication_date);
    debug!("Application Type: {}", record.application_type);
    for (i, group) in record
        .classification
        .section_class_subclass_groups
        .iter()
        .enumerate()
    {
        debug!("Classification #{}: {}", i + 1, group);
    }
    for (i, author) in record.authors.iter().enumerate() {
        debug!("Inventor #{}: {}", i + 1, author);
    }
    for (i, org) in record.organizations.iter().enumerate() {
        debug!("Organization #{}: {}", i + 1, org);
    }
    for (i, attorney) in record.attorneys.iter().enumerate() {
        debug!("Attorney #{}: {}", i + 1, attorney);
    }
    for (i, org) in record.attorney_organizations.iter().enumerate() {
        debug!("Attorney Organization #{}: {}", i + 1, org);
    }
    debug!(
        "{} abstract, {} description and {} claim blocks, {} referential documents",
        record.abstract_text.len(),
        record.descriptions.len(),
        record.claims.len(),
        record.referential_documents.len()
    );
}
