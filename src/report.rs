//! Frequency reports over a set of annotated proteins.
//!
//! Each report counts how many proteins carry a keyword, Reactome pathway or GO
//! term and lists them. Rows are ordered by descending frequency; ties keep the
//! order in which the terms were first seen.

use std::collections::HashMap;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use csv::WriterBuilder;

use crate::dat::entry::AnnotationRecord;
use crate::dat::go::Aspect;
use crate::error::Error;
use crate::keywords::KeywordCatalog;
use crate::table::EMPTY_CELL;

pub const KEYWORD_REPORT: &str = "keyword_report.txt";
pub const PATHWAY_REPORT: &str = "pathway_report.txt";
pub const GO_REPORT: &str = "GOTerms_report.txt";

/// One term with the proteins carrying it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrequencyRow {
    pub term: String,
    pub description: String,
    pub proteins: Vec<String>,
}

impl FrequencyRow {
    #[must_use]
    pub fn frequency(&self) -> usize {
        self.proteins.len()
    }
}

/// Term counts in first-seen order.
#[derive(Debug, Clone, Default)]
pub struct FrequencyTable {
    rows: Vec<FrequencyRow>,
    index: HashMap<String, usize>,
}

impl FrequencyTable {
    /// Records that `protein` carries `term`. A protein is counted once per term.
    pub fn add(&mut self, term: &str, description: &str, protein: &str) {
        let position = match self.index.get(term) {
            Some(&position) => position,
            None => {
                self.rows.push(FrequencyRow {
                    term: term.to_string(),
                    description: description.to_string(),
                    proteins: Vec::new(),
                });
                self.index.insert(term.to_string(), self.rows.len() - 1);
                self.rows.len() - 1
            }
        };
        let row = &mut self.rows[position];
        if !row.proteins.iter().any(|p| p == protein) {
            row.proteins.push(protein.to_string());
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Rows with at least `min_frequency` proteins, most frequent first.
    #[must_use]
    pub fn ranked(&self, min_frequency: usize) -> Vec<&FrequencyRow> {
        let mut rows: Vec<&FrequencyRow> = self
            .rows
            .iter()
            .filter(|row| row.frequency() >= min_frequency)
            .collect();
        rows.sort_by(|a, b| b.frequency().cmp(&a.frequency()));
        rows
    }
}

/// Frequency tables for one set of proteins.
#[derive(Debug, Clone, Default)]
pub struct CategoryReports {
    pub keywords: FrequencyTable,
    pub pathways: FrequencyTable,
    pub biological_process: FrequencyTable,
    pub cellular_component: FrequencyTable,
    pub molecular_function: FrequencyTable,
    /// Number of proteins the tables were built from.
    pub proteins: usize,
}

impl CategoryReports {
    #[must_use]
    pub fn build<'a, I>(records: I) -> Self
    where
        I: IntoIterator<Item = &'a AnnotationRecord>,
    {
        let mut reports = Self::default();
        for record in records {
            reports.proteins += 1;
            let protein = record.identifier.as_str();
            for keyword in &record.keywords {
                reports.keywords.add(keyword, "", protein);
            }
            let pathways = &record.pathways;
            for (id, description) in pathways.reactome_ids().zip(pathways.reactome_descriptions()) {
                reports.pathways.add(id, description, protein);
            }
            for aspect in Aspect::ALL {
                for term in record.go_terms.terms(aspect) {
                    reports
                        .go_table_mut(aspect)
                        .add(&term.go_id(), &term.description, protein);
                }
            }
        }
        reports
    }

    #[must_use]
    pub fn go_table(&self, aspect: Aspect) -> &FrequencyTable {
        match aspect {
            Aspect::BiologicalProcess => &self.biological_process,
            Aspect::CellularComponent => &self.cellular_component,
            Aspect::MolecularFunction => &self.molecular_function,
        }
    }

    fn go_table_mut(&mut self, aspect: Aspect) -> &mut FrequencyTable {
        match aspect {
            Aspect::BiologicalProcess => &mut self.biological_process,
            Aspect::CellularComponent => &mut self.cellular_component,
            Aspect::MolecularFunction => &mut self.molecular_function,
        }
    }

    /// Keyword report; catalog columns are left empty without a catalog.
    pub fn write_keyword_report<W: Write>(
        &self,
        mut writer: W,
        catalog: Option<&KeywordCatalog>,
        min_frequency: usize,
    ) -> Result<usize, Error> {
        writeln!(writer, "Keyword report")?;
        writeln!(writer, "Total proteins: {}", self.proteins)?;
        writeln!(writer, "Total keywords: {}", self.keywords.len())?;

        let mut out = tsv_writer(writer);
        write_row(&mut out, ["Keyword", "Category", "Description", "Synonyms", "Frequency", "Proteins"])?;

        let rows = self.keywords.ranked(min_frequency);
        for row in &rows {
            let entry = catalog.and_then(|c| c.get(&row.term));
            let category = entry.and_then(|e| e.category.as_deref()).unwrap_or(EMPTY_CELL);
            let description = entry
                .map(|e| e.definition.as_str())
                .filter(|d| !d.is_empty())
                .unwrap_or(EMPTY_CELL);
            let synonyms = entry
                .map(|e| e.synonyms.join("; "))
                .filter(|s| !s.is_empty())
                .unwrap_or_else(|| EMPTY_CELL.to_string());
            write_row(
                &mut out,
                [
                    row.term.as_str(),
                    category,
                    description,
                    &synonyms,
                    &row.frequency().to_string(),
                    &row.proteins.join("; "),
                ],
            )?;
        }
        out.flush()?;
        Ok(rows.len())
    }

    pub fn write_pathway_report<W: Write>(&self, mut writer: W, min_frequency: usize) -> Result<usize, Error> {
        writeln!(writer, "Reactome pathway report")?;
        writeln!(writer, "Total proteins: {}", self.proteins)?;
        writeln!(writer, "Total pathways: {}", self.pathways.len())?;

        let mut out = tsv_writer(writer);
        write_ranked(&mut out, &self.pathways, min_frequency)
    }

    /// One section per GO aspect, separated by a blank line.
    pub fn write_go_report<W: Write>(&self, mut writer: W, min_frequency: usize) -> Result<usize, Error> {
        let terms: usize = Aspect::ALL.iter().map(|&a| self.go_table(a).len()).sum();
        writeln!(writer, "GO term report")?;
        writeln!(writer, "Total proteins: {}", self.proteins)?;
        writeln!(writer, "Total GO terms: {terms}")?;

        let mut written = 0;
        for aspect in Aspect::ALL {
            writeln!(writer)?;
            writeln!(writer, "{}", aspect.label())?;
            let mut out = tsv_writer(&mut writer);
            written += write_ranked(&mut out, self.go_table(aspect), min_frequency)?;
        }
        Ok(written)
    }

    /// Writes the three report files into `dir`, creating it if needed.
    pub fn write_all(
        &self,
        dir: &Path,
        catalog: Option<&KeywordCatalog>,
        min_frequency: usize,
    ) -> Result<Vec<PathBuf>, Error> {
        std::fs::create_dir_all(dir)?;

        let keyword_path = dir.join(KEYWORD_REPORT);
        self.write_keyword_report(BufWriter::new(File::create(&keyword_path)?), catalog, min_frequency)?;

        let pathway_path = dir.join(PATHWAY_REPORT);
        self.write_pathway_report(BufWriter::new(File::create(&pathway_path)?), min_frequency)?;

        let go_path = dir.join(GO_REPORT);
        let mut go_writer = BufWriter::new(File::create(&go_path)?);
        self.write_go_report(&mut go_writer, min_frequency)?;
        go_writer.flush()?;

        Ok(vec![keyword_path, pathway_path, go_path])
    }
}

fn tsv_writer<W: Write>(writer: W) -> csv::Writer<W> {
    WriterBuilder::new()
        .delimiter(b'\t')
        .has_headers(false)
        .flexible(true)
        .from_writer(writer)
}

fn write_row<W: Write, const N: usize>(out: &mut csv::Writer<W>, row: [&str; N]) -> Result<(), Error> {
    out.write_record(row)
        .map_err(|e| Error::Format(format!("failed to write report row: {e}")))
}

fn write_ranked<W: Write>(
    out: &mut csv::Writer<W>,
    table: &FrequencyTable,
    min_frequency: usize,
) -> Result<usize, Error> {
    write_row(out, ["Identifier", "Description", "Frequency", "Proteins"])?;
    let rows = table.ranked(min_frequency);
    for row in &rows {
        write_row(
            out,
            [
                row.term.as_str(),
                row.description.as_str(),
                &row.frequency().to_string(),
                &row.proteins.join("; "),
            ],
        )?;
    }
    out.flush()?;
    Ok(rows.len())
}
