//! Tab-separated annotation table.

use std::io::Write;

use csv::WriterBuilder;
use tracing::warn;

use crate::config::Columns;
use crate::dat::entry::AnnotationRecord;
use crate::dat::go::Aspect;
use crate::error::Error;
use crate::field::FieldValue;
use crate::keywords::KeywordCatalog;
use crate::lookup::Lookup;

/// Text of an empty cell.
pub const EMPTY_CELL: &str = "na";

const BASE_COLUMNS: [&str; 10] = [
    "Index",
    "Primary Protein Name",
    "Alternative Protein Names",
    "Identifier",
    "Accession",
    "Other Accessions",
    "UniProt Gene Name",
    "Other Gene Synonyms",
    "Species Name",
    "Taxonomy Number",
];

/// Column layout and row rendering for resolved records.
#[derive(Debug, Clone, Copy)]
pub struct AnnotationTable<'a> {
    columns: Columns,
    catalog: Option<&'a KeywordCatalog>,
}

impl<'a> AnnotationTable<'a> {
    /// Category columns are only emitted when a keyword catalog is given.
    #[must_use]
    pub fn new(columns: Columns, catalog: Option<&'a KeywordCatalog>) -> Self {
        Self { columns, catalog }
    }

    fn categories(&self) -> &'a [String] {
        match self.catalog {
            Some(catalog) if self.columns.keywords => catalog.categories(),
            _ => &[],
        }
    }

    #[must_use]
    pub fn header(&self) -> Vec<String> {
        let mut header: Vec<String> = BASE_COLUMNS.iter().map(|c| c.to_string()).collect();
        if self.columns.mgi {
            header.push("MGI Accession".to_string());
            header.push("MGI Gene Name".to_string());
        }
        if self.columns.keywords {
            header.push("Key Words".to_string());
            header.extend(self.categories().iter().map(|c| format!("KW: {c}")));
        }
        if self.columns.go_terms {
            header.extend(Aspect::ALL.iter().map(|a| a.label().to_string()));
        }
        if self.columns.pathways {
            header.push("CC Pathway".to_string());
            header.push("Reactome Pathway".to_string());
        }
        header
    }

    /// Cells of one row, indexed by the query it was resolved from.
    /// A failed lookup has only its index cell filled.
    #[must_use]
    pub fn cells(&self, lookup: &Lookup<'_>) -> Vec<FieldValue> {
        match lookup.record {
            Some(record) => self.record_cells(lookup.query, record),
            None => {
                let mut cells = vec![FieldValue::optional(None); self.header().len()];
                cells[0] = FieldValue::from(lookup.query);
                cells
            }
        }
    }

    fn record_cells(&self, query: &str, record: &AnnotationRecord) -> Vec<FieldValue> {
        let mut cells = vec![
            FieldValue::from(query),
            FieldValue::optional(record.name.as_deref()),
            FieldValue::from(record.alternative_names.as_slice()),
            FieldValue::from(record.identifier.as_str()),
            FieldValue::from(record.accession.as_str()),
            FieldValue::from(record.secondary_accessions.as_slice()),
            FieldValue::optional(record.gene.as_deref()),
            FieldValue::from(record.gene_synonyms.as_slice()),
            FieldValue::optional(record.organism.as_deref()),
            FieldValue::optional(record.taxonomy_id.map(|id| id.to_string()).as_deref()),
        ];

        if self.columns.mgi {
            let mgi = record.mgi.as_ref();
            cells.push(FieldValue::optional(mgi.map(|x| x.accession.as_str())));
            cells.push(FieldValue::optional(mgi.map(|x| x.symbol.as_str())));
        }

        if self.columns.keywords {
            cells.push(FieldValue::from(record.keywords.as_slice()));
            let categories = self.categories();
            if let Some(catalog) = self.catalog.filter(|_| !categories.is_empty()) {
                match catalog.categorize(&record.keywords) {
                    Ok(buckets) => cells.extend(buckets.into_iter().map(FieldValue::from)),
                    Err(e) => {
                        warn!(record = %record.identifier, error = %e, "keyword categories left empty");
                        cells.extend(categories.iter().map(|_| FieldValue::optional(None)));
                    }
                }
            }
        }

        if self.columns.go_terms {
            cells.extend(
                Aspect::ALL
                    .iter()
                    .map(|&aspect| FieldValue::from(record.go_terms.formatted(aspect))),
            );
        }

        if self.columns.pathways {
            cells.push(FieldValue::optional(record.pathways.narrative()));
            cells.push(FieldValue::from(record.pathways.reactome_formatted()));
        }

        cells
    }

    /// Writes the header and one row per lookup, in lookup order.
    /// Returns the number of rows written.
    pub fn write<W: Write>(&self, writer: W, lookups: &[Lookup<'_>]) -> Result<usize, Error> {
        let mut out = WriterBuilder::new()
            .delimiter(b'\t')
            .has_headers(false)
            .from_writer(writer);

        out.write_record(self.header()).map_err(csv_error)?;
        for lookup in lookups {
            let row: Vec<String> = self
                .cells(lookup)
                .iter()
                .map(|cell| cell.render(EMPTY_CELL))
                .collect();
            out.write_record(&row).map_err(csv_error)?;
        }
        out.flush()?;
        Ok(lookups.len())
    }
}

fn csv_error(e: csv::Error) -> Error {
    if e.is_io_error() {
        match e.into_kind() {
            csv::ErrorKind::Io(io) => Error::Io(io),
            other => Error::Format(format!("{other:?}")),
        }
    } else {
        Error::Format(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dat::{DatParse, ExtractOptions, parse_dat};
    use crate::fixtures::{SAMPLE_DAT, SAMPLE_KEYWORDS};
    use crate::lookup::annotate;
    use std::io::Cursor;

    fn corpus() -> DatParse {
        parse_dat(Cursor::new(SAMPLE_DAT), &ExtractOptions::default()).unwrap()
    }

    fn catalog() -> KeywordCatalog {
        KeywordCatalog::parse(Cursor::new(SAMPLE_KEYWORDS)).unwrap()
    }

    fn render(table: &AnnotationTable<'_>, queries: &[&str]) -> Vec<Vec<String>> {
        let parsed = corpus();
        let (lookups, _) = annotate(&parsed.corpus, queries);
        let mut out = Vec::new();
        table.write(&mut out, &lookups).unwrap();
        String::from_utf8(out)
            .unwrap()
            .lines()
            .map(|line| line.split('\t').map(str::to_string).collect())
            .collect()
    }

    #[test]
    fn header_with_all_groups() {
        let catalog = catalog();
        let columns = Columns {
            mgi: true,
            ..Columns::default()
        };
        let header = AnnotationTable::new(columns, Some(&catalog)).header();
        assert_eq!(header.len(), 10 + 2 + 1 + 3 + 3 + 2);
        assert_eq!(header[10], "MGI Accession");
        assert_eq!(header[13], "KW: Cellular component");
        assert_eq!(header[16], "GO: Biological Process");
        assert_eq!(header.last().unwrap(), "Reactome Pathway");
    }

    #[test]
    fn keyword_categories_need_catalog() {
        let header = AnnotationTable::new(Columns::default(), None).header();
        assert!(header.contains(&"Key Words".to_string()));
        assert!(!header.iter().any(|c| c.starts_with("KW: ")));
    }

    #[test]
    fn rows_render_values_and_placeholders() {
        let catalog = catalog();
        let table = AnnotationTable::new(Columns::default(), Some(&catalog));
        let rows = render(&table, &["P31946", "A0A024R161"]);
        assert_eq!(rows.len(), 3);
        assert!(rows.iter().all(|row| row.len() == rows[0].len()));

        let human = &rows[1];
        assert_eq!(human[0], "P31946");
        assert_eq!(human[1], "14-3-3 protein beta/alpha");
        assert_eq!(
            human[2],
            "Protein 1054; Protein kinase C inhibitor protein 1 (KCIP-1)"
        );
        assert_eq!(human[5], "A8K9K2; E1P616");
        assert_eq!(human[9], "9606");
        assert_eq!(human[10], "3D-structure; Acetylation; Cytoplasm; Phosphoprotein");
        assert_eq!(human[11], "Cytoplasm");
        assert_eq!(human[12], "Acetylation; Phosphoprotein");
        assert_eq!(human[13], "3D-structure");
        assert_eq!(human[14], "protein targeting {GO:0006605}");
        assert_eq!(human[17], "Protein modification; protein phosphorylation.");
        assert_eq!(
            human[18],
            "Activation of BAD and translocation to mitochondria {R-HSA-111447}; \
             RHO GTPases activate PKNs {R-HSA-5625740}"
        );

        let unreviewed = &rows[2];
        assert_eq!(unreviewed[1], EMPTY_CELL);
        assert_eq!(unreviewed[6], EMPTY_CELL);
    }

    #[test]
    fn failed_lookup_row() {
        let table = AnnotationTable::new(Columns::default(), None);
        let rows = render(&table, &["NOPE"]);
        let row = &rows[1];
        assert_eq!(row[0], "NOPE");
        assert!(row[1..].iter().all(|c| c == EMPTY_CELL));
    }

    #[test]
    fn index_keeps_query_after_fallback() {
        let table = AnnotationTable::new(Columns::default(), None);
        let rows = render(&table, &["sp|P31946|OLDNAME_HUMAN"]);
        let row = &rows[1];
        assert_eq!(row[0], "sp|P31946|OLDNAME_HUMAN");
        assert_eq!(row[3], "1433B_HUMAN");
        assert_eq!(row[4], "P31946");
    }

    #[test]
    fn unknown_keyword_leaves_categories_empty() {
        let catalog = KeywordCatalog::parse(Cursor::new("ID   Kinase.\nCA   Molecular function.\n//\n")).unwrap();
        let table = AnnotationTable::new(Columns::default(), Some(&catalog));
        let rows = render(&table, &["P31946"]);
        assert_eq!(rows[1][11], EMPTY_CELL);
    }
}
