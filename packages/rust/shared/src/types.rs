//! Core domain types for filing summaries.

use serde::{Deserialize, Serialize};

/// Output table header, in column order.
pub const OUTPUT_COLUMNS: [&str; 7] = [
    "CIK",
    "CompanyName",
    "EntityType",
    "IndustryGroup",
    "JurisdictionOfIncorporation",
    "RelatedPersons",
    "InformationSource",
];

/// Separator between related persons in the flattened `RelatedPersons` cell.
const RELATED_PERSON_SEPARATOR: &str = "; ";

// ---------------------------------------------------------------------------
// PrimaryIssuer
// ---------------------------------------------------------------------------

/// The main filer named in an offering document.
///
/// Every field is an already-trimmed string; absent elements are empty.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PrimaryIssuer {
    pub cik: String,
    pub entity_name: String,
    pub entity_type: String,
    pub jurisdiction_of_inc: String,
}

// ---------------------------------------------------------------------------
// RelatedPerson
// ---------------------------------------------------------------------------

/// An officer, director, or promoter disclosed alongside the issuer.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RelatedPerson {
    pub first_name: String,
    pub last_name: String,
    pub relationship_clarification: String,
}

impl RelatedPerson {
    /// First and last name joined by a space, with outer whitespace removed.
    ///
    /// A person with only one of the two names yields just that name.
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
            .trim()
            .to_string()
    }
}

impl std::fmt::Display for RelatedPerson {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} ({})",
            self.full_name(),
            self.relationship_clarification
        )
    }
}

/// Flatten related persons into one cell: `"<name> (<clarification>)"` entries
/// joined by `"; "`, in the order given. No persons yields an empty string.
pub fn join_related_persons(persons: &[RelatedPerson]) -> String {
    persons
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(RELATED_PERSON_SEPARATOR)
}

// ---------------------------------------------------------------------------
// FilingRecord
// ---------------------------------------------------------------------------

/// One row of the output table.
///
/// Field declaration order is the CSV column order (see [`OUTPUT_COLUMNS`]).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilingRecord {
    #[serde(rename = "CIK")]
    pub cik: String,
    #[serde(rename = "CompanyName")]
    pub company_name: String,
    #[serde(rename = "EntityType")]
    pub entity_type: String,
    #[serde(rename = "IndustryGroup")]
    pub industry_group: String,
    #[serde(rename = "JurisdictionOfIncorporation")]
    pub jurisdiction_of_incorporation: String,
    #[serde(rename = "RelatedPersons")]
    pub related_persons: String,
    /// The source document URL, verbatim from the input table.
    #[serde(rename = "InformationSource")]
    pub information_source: String,
}

impl FilingRecord {
    /// Flatten extracted document parts into an output row.
    pub fn new(
        issuer: &PrimaryIssuer,
        industry_group: &str,
        related_persons: &[RelatedPerson],
        source_url: &str,
    ) -> Self {
        Self {
            cik: issuer.cik.clone(),
            company_name: issuer.entity_name.clone(),
            entity_type: issuer.entity_type.clone(),
            industry_group: industry_group.to_string(),
            jurisdiction_of_incorporation: issuer.jurisdiction_of_inc.clone(),
            related_persons: join_related_persons(related_persons),
            information_source: source_url.to_string(),
        }
    }
}
