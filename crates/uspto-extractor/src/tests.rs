//! End-to-end tests for the Extractor

#[cfg(test)]
mod tests {
    use crate::{FragmentOutcome, FragmentSplitter, PatentExtractor, ExtractError, XML_DECLARATION};
    use pretty_assertions::assert_eq;
    use uspto_domain::DocumentType;

    fn grant(body: &str) -> String {
        format!(
            r#"{decl}
<!DOCTYPE us-patent-grant SYSTEM "us-patent-grant-v45-2014-04-03.dtd" [ ]>
<us-patent-grant lang="EN" dtd-version="v4.5 2014-04-03" file="US09876543-20180102.XML" status="PRODUCTION" id="us-patent-grant" country="US" date-produced="20171218" date-publ="20180102">
<us-bibliographic-data-grant>
<publication-reference><document-id><country>US</country><doc-number>09876543</doc-number><kind>B2</kind><date>20180102</date></document-id></publication-reference>
<application-reference appl-type="utility"><document-id><country>US</country><doc-number>15123456</doc-number><date>20160505</date></document-id></application-reference>
<invention-title id="d2e53">Widget &amp; gear assembly</invention-title>
{body}
</us-bibliographic-data-grant>
<abstract id="abstract">
<p id="p-0001">A widget is described.</p>
</abstract>
<description id="description">
<p id="p-0002">The widget turns.</p>
</description>
<claims id="claims">
<claim id="CLM-00001" num="00001"><claim-text>1. A widget comprising a gear.</claim-text></claim>
<claim id="CLM-00002" num="00002"><claim-text>2. The widget of claim 1.</claim-text></claim>
</claims>
</us-patent-grant>
"#,
            decl = XML_DECLARATION,
            body = body
        )
    }

    const PARTIES: &str = r#"<us-parties>
<us-applicants><us-applicant sequence="001" app-type="applicant" designation="us-only">
<addressbook><orgname>Acme Corp</orgname><address><city>Springfield</city><country>US</country></address></addressbook>
</us-applicant></us-applicants>
<inventors><inventor sequence="001" designation="us-only">
<addressbook><last-name>Doe</last-name><first-name>Jane</first-name><address><city>Springfield</city><country>US</country></address></addressbook>
</inventor><inventor sequence="002" designation="us-only">
<addressbook><last-name>unknown</last-name><first-name>unknown</first-name></addressbook>
</inventor></inventors>
<agents><agent sequence="01" rep-type="attorney">
<addressbook><first-name>Sam</first-name><last-name>Counsel</last-name><orgname>Counsel LLP</orgname><address><country>unknown</country></address></addressbook>
</agent></agents>
</us-parties>"#;

    const IPCR: &str = r#"<classifications-ipcr>
<classification-ipcr><ipc-version-indicator><date>20060101</date></ipc-version-indicator><section>H</section><class>04</class><subclass>L</subclass><main-group>29</main-group><subgroup>06</subgroup></classification-ipcr>
<classification-ipcr><ipc-version-indicator><date>20060101</date></ipc-version-indicator><section>H</section><class>04</class><subclass>L</subclass><main-group>29</main-group><subgroup>06</subgroup></classification-ipcr>
</classifications-ipcr>"#;

    fn extract(xml: &str) -> FragmentOutcome {
        let fragment = FragmentSplitter::new(xml).next().unwrap();
        PatentExtractor::new().process_fragment(fragment)
    }

    #[test]
    fn test_full_grant_extraction() {
        let body = format!(
            "{}{}<us-references-cited><us-citation><patcit num=\"00001\"><document-id>\
             <country>US</country><doc-number>5000001</doc-number><kind>A</kind><name>Smith</name><date>19950101</date>\
             </document-id></patcit><category>cited by examiner</category></us-citation></us-references-cited>",
            IPCR, PARTIES
        );

        let FragmentOutcome::Extracted(record) = extract(&grant(&body)) else {
            panic!("expected a record");
        };

        assert_eq!(record.publication_number, "US09876543");
        assert_eq!(record.publication_title, "Widget & gear assembly");
        assert_eq!(record.publication_date, "20180102");
        assert_eq!(record.grant_date.as_deref(), Some("20171218"));
        assert_eq!(record.application_number, "15123456");
        assert_eq!(record.application_type, "utility");
        assert_eq!(record.application_date, "20160505");

        assert_eq!(record.authors, vec!["Jane Doe"]);
        assert_eq!(record.organizations, vec!["Acme Corp, Springfield, US"]);
        assert_eq!(record.attorneys, vec!["Sam Counsel"]);
        assert_eq!(record.attorney_organizations, vec!["Counsel LLP"]);

        assert_eq!(record.classification.sections, vec!["H"]);
        assert_eq!(record.classification.section_class_subclass_groups, vec!["H04L 29/06"]);

        assert_eq!(record.abstract_text, vec!["A widget is described."]);
        assert_eq!(record.descriptions, vec!["The widget turns."]);
        assert_eq!(
            record.claims,
            vec!["1. A widget comprising a gear.", "2. The widget of claim 1."]
        );

        assert_eq!(record.referential_documents.len(), 1);
        let cited = &record.referential_documents[0];
        assert_eq!(cited.document_type, DocumentType::PatentReference);
        assert_eq!(cited.cited_by_examiner, Some(true));
        assert_eq!(cited.uspto_publication_number, "US09876543");
    }

    #[test]
    fn test_application_has_no_grant_date() {
        let xml = format!(
            r#"{}
<us-patent-application file="US20180000001A1-20180104.XML" date-produced="20171220">
<us-bibliographic-data-application>
<publication-reference><document-id><doc-number>20180000001</doc-number><date>20180104</date></document-id></publication-reference>
<application-reference appl-type="utility"><document-id><doc-number>15600001</doc-number><date>20170519</date></document-id></application-reference>
<invention-title>Gadget</invention-title>
<classification-ipc><main-classification>G06F 17/30</main-classification></classification-ipc>
</us-bibliographic-data-application>
</us-patent-application>"#,
            XML_DECLARATION
        );

        let FragmentOutcome::Extracted(record) = extract(&xml) else {
            panic!("expected a record");
        };

        assert_eq!(record.publication_number, "US20180000001A1");
        assert_eq!(record.grant_date, None);
        assert_eq!(record.classification.section_class_subclasses, vec!["G06F"]);
        assert!(record.claims.is_empty());
    }

    #[test]
    fn test_extraction_is_deterministic() {
        let xml = grant(&format!("{}{}", IPCR, PARTIES));
        let FragmentOutcome::Extracted(first) = extract(&xml) else {
            panic!("expected a record");
        };
        let FragmentOutcome::Extracted(second) = extract(&xml) else {
            panic!("expected a record");
        };
        assert_eq!(first, second);
    }

    #[test]
    fn test_unknown_related_document_discards_document() {
        let body = "<us-related-documents><us-mystery-relation><document-id>\
                    <doc-number>1</doc-number></document-id></us-mystery-relation></us-related-documents>";

        match extract(&grant(body)) {
            FragmentOutcome::Failed { title, error } => {
                assert_eq!(title.as_deref(), Some("Widget & gear assembly"));
                assert!(matches!(error, ExtractError::SchemaValidation(_)));
                assert_eq!(error.kind(), "schema-validation");
            }
            other => panic!("expected failure, got {:?}", other),
        }
    }

    #[test]
    fn test_missing_application_reference_is_field_error() {
        let xml = format!(
            r#"{}<us-patent-grant file="US1-2.XML"><invention-title>T</invention-title>
<publication-reference><document-id><date>20000101</date></document-id></publication-reference>
</us-patent-grant>"#,
            XML_DECLARATION
        );

        match extract(&xml) {
            FragmentOutcome::Failed { title, error } => {
                assert_eq!(title.as_deref(), Some("T"));
                assert!(matches!(error, ExtractError::MissingField(_)));
                assert!(error.to_string().contains("application-reference"));
            }
            other => panic!("expected failure, got {:?}", other),
        }
    }

    #[test]
    fn test_missing_title_fails_without_title() {
        let xml = format!(
            r#"{}<us-patent-grant file="US1-2.XML"></us-patent-grant>"#,
            XML_DECLARATION
        );
        match extract(&xml) {
            FragmentOutcome::Failed { title, error } => {
                assert_eq!(title, None);
                assert!(matches!(error, ExtractError::MissingField(_)));
            }
            other => panic!("expected failure, got {:?}", other),
        }
    }

    #[test]
    fn test_sequence_listing_is_skipped() {
        let xml = format!(
            r#"{}<us-patent-grant file="US1-2.XML"><sequence-cwu><p>ACGT</p></sequence-cwu></us-patent-grant>"#,
            XML_DECLARATION
        );
        let outcome = extract(&xml);
        assert!(matches!(outcome, FragmentOutcome::Skipped));
    }

    #[test]
    fn test_malformed_fragment_is_xml_error() {
        let xml = format!("{}<us-patent-grant><a></b></us-patent-grant>", XML_DECLARATION);
        match extract(&xml) {
            FragmentOutcome::Failed { error, .. } => assert_eq!(error.kind(), "xml"),
            other => panic!("expected failure, got {:?}", other),
        }
    }

    #[test]
    fn test_multi_document_dump() {
        let dump = format!("{}{}", grant(IPCR), grant(PARTIES));
        let extractor = PatentExtractor::new().with_record_logging(true);
        let outcomes: Vec<FragmentOutcome> = FragmentSplitter::new(&dump)
            .map(|f| extractor.process_fragment(f))
            .collect();

        assert_eq!(outcomes.len(), 2);
        let titles: Vec<&str> = outcomes
            .iter()
            .map(|o| match o {
                FragmentOutcome::Extracted(record) => record.publication_title.as_str(),
                other => panic!("expected a record, got {:?}", other),
            })
            .collect();
        assert_eq!(titles[1], "Widget & gear assembly");
    }
}
