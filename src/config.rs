use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use serde::Deserialize;

use crate::dat::ExtractOptions;
use crate::dat::fields::DEFAULT_EXCLUDED_KEYWORDS;

/// Optional column groups of the annotation table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Columns {
    /// Keyword list plus one column per keyword category.
    pub keywords: bool,
    /// One column per GO aspect.
    pub go_terms: bool,
    /// Comment narrative and Reactome pathways.
    pub pathways: bool,
    /// MGI accession and gene symbol.
    pub mgi: bool,
}

impl Default for Columns {
    fn default() -> Self {
        Self {
            keywords: true,
            go_terms: true,
            pathways: true,
            mgi: false,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnnotateConfig {
    pub dat_file: PathBuf,
    pub keyword_file: Option<PathBuf>,
    #[serde(default = "default_excluded_keywords")]
    pub excluded_keywords: Vec<String>,
    #[serde(default)]
    pub columns: Columns,
    pub report_dir: Option<PathBuf>,
    #[serde(default = "default_min_report_frequency")]
    pub min_report_frequency: usize,
}

fn default_excluded_keywords() -> Vec<String> {
    DEFAULT_EXCLUDED_KEYWORDS
        .iter()
        .map(|k| k.to_string())
        .collect()
}

fn default_min_report_frequency() -> usize {
    2
}

impl AnnotateConfig {
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file: {}", path.display()))?;
        let config: Self = serde_json::from_str(&content)
            .with_context(|| format!("failed to parse config file: {}", path.display()))?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if self.dat_file.as_os_str().is_empty() {
            bail!("datFile must not be empty");
        }
        if self.min_report_frequency == 0 {
            bail!("minReportFrequency must be at least 1");
        }
        if let Some(keyword) = self.excluded_keywords.iter().find(|k| k.trim().is_empty()) {
            bail!("invalid excluded keyword: '{keyword}'");
        }
        Ok(())
    }

    /// Extraction options derived from this configuration.
    #[must_use]
    pub fn extract_options(&self) -> ExtractOptions {
        ExtractOptions {
            excluded_keywords: self.excluded_keywords.clone(),
        }
    }

    /// Source files as (name, path) pairs.
    pub fn source_files(&self) -> impl Iterator<Item = (&str, &Path)> {
        std::iter::once(("DAT", self.dat_file.as_path()))
            .chain(self.keyword_file.as_deref().map(|p| ("Keywords", p)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_config(json: &str) -> NamedTempFile {
        let mut f = NamedTempFile::new().unwrap();
        f.write_all(json.as_bytes()).unwrap();
        f
    }

    #[test]
    fn valid_config_all_fields() {
        let json = r#"{
            "datFile": "/data/uniprot_sprot.dat.gz",
            "keywordFile": "/data/keywlist.txt",
            "excludedKeywords": ["Reference proteome"],
            "columns": { "keywords": false, "goTerms": true, "pathways": false, "mgi": true },
            "reportDir": "/tmp/reports",
            "minReportFrequency": 5
        }"#;
        let f = write_config(json);
        let config = AnnotateConfig::from_file(f.path()).unwrap();
        assert_eq!(config.dat_file, PathBuf::from("/data/uniprot_sprot.dat.gz"));
        assert_eq!(config.excluded_keywords, vec!["Reference proteome"]);
        assert!(!config.columns.keywords);
        assert!(config.columns.mgi);
        assert_eq!(config.min_report_frequency, 5);
        assert_eq!(config.source_files().count(), 2);
    }

    #[test]
    fn valid_config_optional_fields_omitted() {
        let json = r#"{ "datFile": "uniprot_sprot.dat" }"#;
        let f = write_config(json);
        let config = AnnotateConfig::from_file(f.path()).unwrap();
        assert!(config.keyword_file.is_none());
        assert!(config.report_dir.is_none());
        assert_eq!(config.columns, Columns::default());
        assert_eq!(config.min_report_frequency, 2);
        assert_eq!(
            config.extract_options().excluded_keywords,
            vec!["Reference proteome", "Complete proteome", "Direct protein sequencing"]
        );
        assert_eq!(config.source_files().count(), 1);
    }

    #[test]
    fn partial_columns_use_defaults() {
        let json = r#"{ "datFile": "a.dat", "columns": { "mgi": true } }"#;
        let f = write_config(json);
        let config = AnnotateConfig::from_file(f.path()).unwrap();
        assert!(config.columns.keywords);
        assert!(config.columns.mgi);
    }

    #[test]
    fn empty_dat_file() {
        let f = write_config(r#"{ "datFile": "" }"#);
        let err = AnnotateConfig::from_file(f.path()).unwrap_err();
        assert!(err.to_string().contains("datFile"));
    }

    #[test]
    fn zero_report_frequency() {
        let f = write_config(r#"{ "datFile": "a.dat", "minReportFrequency": 0 }"#);
        let err = AnnotateConfig::from_file(f.path()).unwrap_err();
        assert!(err.to_string().contains("minReportFrequency"));
    }

    #[test]
    fn missing_dat_file_key() {
        let f = write_config(r#"{ "keywordFile": "k.txt" }"#);
        let err = AnnotateConfig::from_file(f.path()).unwrap_err();
        assert!(err.to_string().contains("failed to parse config file"));
    }
}
