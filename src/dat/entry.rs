//! Annotation record produced for each DAT entry.

use std::fmt;

use crate::error::Error;

use super::go::GoTerms;
use super::pathway::Pathways;

/// Separator of the compound key parts.
pub const KEY_SEPARATOR: char = '|';

/// Source database of an entry, from the status token of its ID line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Dataset {
    /// Reviewed (Swiss-Prot).
    SwissProt,
    /// Unreviewed (TrEMBL).
    Trembl,
}

impl Dataset {
    /// `Reviewed` selects Swiss-Prot; any other status is TrEMBL.
    #[must_use]
    pub fn from_status(status: &str) -> Self {
        if status.trim_end_matches([';', '.']) == "Reviewed" {
            Self::SwissProt
        } else {
            Self::Trembl
        }
    }

    /// Two-letter tag used in FASTA headers and compound keys.
    #[must_use]
    pub fn tag(self) -> &'static str {
        match self {
            Self::SwissProt => "sp",
            Self::Trembl => "tr",
        }
    }
}

impl fmt::Display for Dataset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// Cross-reference to a model-organism gene database entry (MGI).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneXref {
    pub accession: String,
    pub symbol: String,
}

/// Annotations extracted from one DAT entry. Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnnotationRecord {
    pub identifier: String,
    pub dataset: Dataset,
    pub accession: String,
    pub secondary_accessions: Vec<String>,
    pub name: Option<String>,
    pub alternative_names: Vec<String>,
    pub flags: Vec<String>,
    pub gene: Option<String>,
    pub gene_synonyms: Vec<String>,
    pub organism: Option<String>,
    pub taxonomy_id: Option<u32>,
    pub mgi: Option<GeneXref>,
    pub keywords: Vec<String>,
    pub go_terms: GoTerms,
    pub pathways: Pathways,
}

impl AnnotationRecord {
    /// `<db-flag>|<accession>|<identifier>`, as in UniProt FASTA headers.
    #[must_use]
    pub fn compound_key(&self) -> String {
        format!(
            "{}{KEY_SEPARATOR}{}{KEY_SEPARATOR}{}",
            self.dataset.tag(),
            self.accession,
            self.identifier
        )
    }
}

/// Field-by-field accumulator for an [`AnnotationRecord`].
#[derive(Debug, Default)]
pub struct AnnotationBuilder {
    pub identifier: Option<String>,
    pub dataset: Option<Dataset>,
    pub accession: Option<String>,
    pub secondary_accessions: Vec<String>,
    pub name: Option<String>,
    pub alternative_names: Vec<String>,
    pub flags: Vec<String>,
    pub gene: Option<String>,
    pub gene_synonyms: Vec<String>,
    pub organism: Option<String>,
    pub taxonomy_id: Option<u32>,
    pub mgi: Option<GeneXref>,
    pub keywords: Vec<String>,
    pub go_terms: GoTerms,
    pub pathways: Pathways,
}

impl AnnotationBuilder {
    /// Freezes the builder. Identifier, status and primary accession are required
    /// because every record is keyed by them.
    pub fn build(self) -> Result<AnnotationRecord, Error> {
        let identifier = self
            .identifier
            .ok_or_else(|| Error::Validation("record has no ID line".to_string()))?;
        let dataset = self
            .dataset
            .ok_or_else(|| Error::Validation(format!("record {identifier} has no status")))?;
        let accession = self.accession.ok_or_else(|| {
            Error::Validation(format!("record {identifier} has no primary accession"))
        })?;

        Ok(AnnotationRecord {
            identifier,
            dataset,
            accession,
            secondary_accessions: self.secondary_accessions,
            name: self.name,
            alternative_names: self.alternative_names,
            flags: self.flags,
            gene: self.gene,
            gene_synonyms: self.gene_synonyms,
            organism: self.organism,
            taxonomy_id: self.taxonomy_id,
            mgi: self.mgi,
            keywords: self.keywords,
            go_terms: self.go_terms,
            pathways: self.pathways,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn keyed_builder() -> AnnotationBuilder {
        AnnotationBuilder {
            identifier: Some("1433B_HUMAN".to_string()),
            dataset: Some(Dataset::SwissProt),
            accession: Some("P31946".to_string()),
            ..AnnotationBuilder::default()
        }
    }

    #[test]
    fn compound_key_format() {
        let record = keyed_builder().build().unwrap();
        assert_eq!(record.compound_key(), "sp|P31946|1433B_HUMAN");
    }

    #[test]
    fn optional_fields_default_to_none() {
        let record = keyed_builder().build().unwrap();
        assert!(record.name.is_none());
        assert!(record.gene.is_none());
        assert!(record.taxonomy_id.is_none());
        assert!(record.keywords.is_empty());
        assert!(record.go_terms.is_empty());
    }

    #[test]
    fn missing_accession_rejected() {
        let mut builder = keyed_builder();
        builder.accession = None;
        let err = builder.build().unwrap_err();
        assert!(err.to_string().contains("no primary accession"));
    }

    #[test]
    fn dataset_from_status() {
        assert_eq!(Dataset::from_status("Reviewed;"), Dataset::SwissProt);
        assert_eq!(Dataset::from_status("Unreviewed;"), Dataset::Trembl);
        assert_eq!(Dataset::Trembl.to_string(), "tr");
    }
}
