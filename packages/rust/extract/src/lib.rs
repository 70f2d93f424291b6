//! Field projection from filing XML documents.
//!
//! A filing's primary document is parsed into a tree and a fixed set of
//! fields is read out of it: the primary issuer, the industry group, and the
//! related persons. Missing elements never fail extraction; they default to
//! empty values. Only a document that is not well-formed XML is an error.

mod path;

use filingdigest_shared::{FilingDigestError, FilingRecord, PrimaryIssuer, RelatedPerson, Result};
use roxmltree::{Document, Node, ParsingOptions};
use tracing::debug;

pub use path::{child_text, find_all, find_first};

/// Location of the issuer block, searched anywhere in the document.
const PRIMARY_ISSUER_PATH: &str = "primaryIssuer";

/// Location of the industry classification, searched anywhere in the document.
const INDUSTRY_GROUP_PATH: &str = "offeringData/industryGroup/industryGroupType";

/// Location of each related person entry, searched anywhere in the document.
const RELATED_PERSON_PATH: &str = "relatedPersonsList/relatedPersonInfo";

// ---------------------------------------------------------------------------
// FilingDocument
// ---------------------------------------------------------------------------

/// Fields read from one filing document, before flattening.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilingDocument {
    /// `None` when the document has no `primaryIssuer` block.
    pub primary_issuer: Option<PrimaryIssuer>,
    /// Industry group type, empty if absent.
    pub industry_group: String,
    /// Related persons in document order.
    pub related_persons: Vec<RelatedPerson>,
}

impl FilingDocument {
    /// Flatten into an output row sourced from `source_url`.
    ///
    /// A missing issuer block flattens to empty issuer columns.
    pub fn into_record(self, source_url: &str) -> FilingRecord {
        let issuer = self.primary_issuer.unwrap_or_default();
        FilingRecord::new(
            &issuer,
            &self.industry_group,
            &self.related_persons,
            source_url,
        )
    }
}

// ---------------------------------------------------------------------------
// Parsing
// ---------------------------------------------------------------------------

/// Parse a filing document and read out its summary fields.
pub fn parse_primary_doc(xml: &str) -> Result<FilingDocument> {
    let options = ParsingOptions {
        allow_dtd: true,
        ..ParsingOptions::default()
    };
    let doc = Document::parse_with_options(xml, options)
        .map_err(|e| FilingDigestError::parse(format!("malformed XML: {e}")))?;
    let root = doc.root_element();

    let primary_issuer = find_first(root, PRIMARY_ISSUER_PATH).map(read_primary_issuer);

    let industry_group = find_first(root, INDUSTRY_GROUP_PATH)
        .map(path::own_text)
        .unwrap_or_default();

    let related_persons: Vec<RelatedPerson> = find_all(root, RELATED_PERSON_PATH)
        .into_iter()
        .map(read_related_person)
        .collect();

    debug!(
        has_issuer = primary_issuer.is_some(),
        related_persons = related_persons.len(),
        "filing document parsed"
    );

    Ok(FilingDocument {
        primary_issuer,
        industry_group,
        related_persons,
    })
}

/// Parse `xml` and flatten it into an output row for `source_url`.
pub fn extract_record(xml: &str, source_url: &str) -> Result<FilingRecord> {
    Ok(parse_primary_doc(xml)?.into_record(source_url))
}

fn read_primary_issuer(node: Node<'_, '_>) -> PrimaryIssuer {
    PrimaryIssuer {
        cik: child_text(node, "cik"),
        entity_name: child_text(node, "entityName"),
        entity_type: child_text(node, "entityType"),
        jurisdiction_of_inc: child_text(node, "jurisdictionOfInc"),
    }
}

fn read_related_person(node: Node<'_, '_>) -> RelatedPerson {
    RelatedPerson {
        first_name: child_text(node, "relatedPersonName/firstName"),
        last_name: child_text(node, "relatedPersonName/lastName"),
        relationship_clarification: child_text(node, "relationshipClarification"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn load_fixture(name: &str) -> String {
        let path = format!("../../../fixtures/xml/{name}");
        std::fs::read_to_string(&path).unwrap_or_else(|_| panic!("missing fixture: {path}"))
    }

    #[test]
    fn parse_full_fixture() {
        let doc = parse_primary_doc(&load_fixture("primary_doc.xml")).unwrap();

        let issuer = doc.primary_issuer.expect("issuer block");
        assert_eq!(issuer.cik, "0001234567");
        assert_eq!(issuer.entity_name, "Example Robotics, Inc.");
        assert_eq!(issuer.entity_type, "Corporation");
        assert_eq!(issuer.jurisdiction_of_inc, "DELAWARE");

        assert_eq!(doc.industry_group, "Other Technology");
        assert_eq!(doc.related_persons.len(), 3);
    }

    #[test]
    fn related_persons_default_missing_parts() {
        let record = extract_record(
            &load_fixture("primary_doc.xml"),
            "https://www.sec.gov/Archives/edgar/data/1234567/primary_doc.xml",
        )
        .unwrap();

        assert_eq!(
            record.related_persons,
            "Jane Doe (Chief Executive Officer); John Roe (); Poe ()"
        );
        assert_eq!(
            record.information_source,
            "https://www.sec.gov/Archives/edgar/data/1234567/primary_doc.xml"
        );
    }

    #[test]
    fn missing_issuer_is_not_an_error() {
        let record = extract_record(&load_fixture("primary_doc_no_issuer.xml"), "u").unwrap();

        assert_eq!(record.cik, "");
        assert_eq!(record.company_name, "");
        assert_eq!(record.entity_type, "");
        assert_eq!(record.jurisdiction_of_incorporation, "");
        assert_eq!(record.industry_group, "Pooled Investment Fund");
        assert_eq!(record.related_persons, "");
    }

    #[test]
    fn namespaced_document_with_doctype() {
        let record =
            extract_record(&load_fixture("primary_doc_namespaced.xml"), "u").unwrap();

        assert_eq!(record.cik, "0007654321");
        assert_eq!(record.company_name, "Namespaced Capital LP");
        assert_eq!(record.entity_type, "Limited Partnership");
        assert_eq!(record.jurisdiction_of_incorporation, "CAYMAN ISLANDS");
        assert_eq!(record.industry_group, "Pooled Investment Fund");
        assert_eq!(record.related_persons, "Ada Lovelace (General Partner)");
    }

    #[test]
    fn empty_document_yields_empty_fields() {
        let record = extract_record("<edgarSubmission/>", "u").unwrap();
        assert_eq!(
            record,
            FilingRecord {
                information_source: "u".into(),
                ..FilingRecord::default()
            }
        );
    }

    #[test]
    fn first_issuer_block_wins() {
        let xml = r#"<edgarSubmission>
            <primaryIssuer><cik>111</cik><entityName>First</entityName></primaryIssuer>
            <issuerList><primaryIssuer><cik>222</cik></primaryIssuer></issuerList>
        </edgarSubmission>"#;
        let record = extract_record(xml, "u").unwrap();
        assert_eq!(record.cik, "111");
        assert_eq!(record.company_name, "First");
    }

    #[test]
    fn comments_do_not_hide_field_text() {
        let xml = r#"<edgarSubmission>
            <primaryIssuer><cik><!-- c -->123</cik><entityName>Acme<!--x--> Corp</entityName></primaryIssuer>
        </edgarSubmission>"#;
        let record = extract_record(xml, "u").unwrap();
        assert_eq!(record.cik, "123");
        assert_eq!(record.company_name, "Acme Corp");

        let xml = "<edgarSubmission><primaryIssuer><cik>12<!--x-->34</cik></primaryIssuer></edgarSubmission>";
        assert_eq!(extract_record(xml, "u").unwrap().cik, "1234");
    }

    #[test]
    fn industry_group_needs_full_path() {
        let xml = r#"<edgarSubmission>
            <industryGroup><industryGroupType>Orphan</industryGroupType></industryGroup>
        </edgarSubmission>"#;
        let record = extract_record(xml, "u").unwrap();
        assert_eq!(record.industry_group, "");
    }

    #[test]
    fn related_persons_without_list_wrapper_are_ignored() {
        let xml = r#"<edgarSubmission>
            <relatedPersonInfo>
                <relatedPersonName><firstName>Loose</firstName></relatedPersonName>
            </relatedPersonInfo>
        </edgarSubmission>"#;
        let record = extract_record(xml, "u").unwrap();
        assert_eq!(record.related_persons, "");
    }

    #[test]
    fn malformed_xml_is_an_error() {
        let err = parse_primary_doc("<edgarSubmission><primaryIssuer>").unwrap_err();
        assert!(matches!(err, FilingDigestError::Parse { .. }));

        assert!(parse_primary_doc("").is_err());
        assert!(parse_primary_doc("<html><body>Not found</body>").is_err());
    }
}
