//! Single-document extraction: URL in, output row out.

use filingdigest_fetch::DocumentFetcher;
use filingdigest_shared::{FilingRecord, Result};

/// Suffix a source cell must end with (ASCII case-insensitive) to be fetched.
const XML_SUFFIX: &str = ".xml";

/// Whether a source cell names an XML document.
///
/// The raw cell is checked as-is; surrounding whitespace is not stripped.
pub fn is_xml_source(value: &str) -> bool {
    value.len() >= XML_SUFFIX.len()
        && value.as_bytes()[value.len() - XML_SUFFIX.len()..]
            .eq_ignore_ascii_case(XML_SUFFIX.as_bytes())
}

/// Fetch the document at `url` and flatten it into an output row.
///
/// Fails on network errors, non-success status, or malformed XML. Missing
/// elements inside a well-formed document never fail.
pub async fn summarize_document(fetcher: &DocumentFetcher, url: &str) -> Result<FilingRecord> {
    let body = fetcher.fetch(url).await?;
    filingdigest_extract::extract_record(&body, url)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn xml_suffix_is_case_insensitive() {
        assert!(is_xml_source("https://www.sec.gov/Archives/primary_doc.xml"));
        assert!(is_xml_source("https://a.test/DOC.XML"));
        assert!(is_xml_source("https://a.test/doc.Xml"));
        assert!(is_xml_source(".xml"));
    }

    #[test]
    fn non_xml_sources_rejected() {
        assert!(!is_xml_source(""));
        assert!(!is_xml_source("xml"));
        assert!(!is_xml_source("https://a.test/doc.csv"));
        assert!(!is_xml_source("https://a.test/doc.xml.gz"));
        assert!(!is_xml_source("https://a.test/doc.xml "));
        assert!(!is_xml_source("https://a.test/docxml"));
        // Multi-byte text right before the suffix must not panic.
        assert!(!is_xml_source("ünïcödé"));
        assert!(is_xml_source("ü.xml"));
    }
}
