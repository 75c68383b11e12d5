//! UniProt keyword list (`keywlist.txt`) parser and category bucketing.
//!
//! The file shares the DAT line grammar. Each entry starts at an `ID` (keyword)
//! or `IC` (category) line and ends at `//`; the banner and copyright text around
//! the entries never open a block and are ignored.

use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::io::{BufRead, BufReader, Read};

use flate2::read::MultiGzDecoder;
use tracing::{debug, warn};

use crate::error::Error;
use crate::segment::{Block, BlockSet, Line, LineCode, classify_line};

/// Whether an entry defines a keyword or one of the keyword categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeywordKind {
    Keyword,
    Category,
}

/// One entry of the keyword list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeywordEntry {
    pub identifier: String,
    pub accession: String,
    pub definition: String,
    pub synonyms: Vec<String>,
    /// GO term identifier to term name.
    pub go_mapping: BTreeMap<String, String>,
    /// `None` for category entries.
    pub category: Option<String>,
    /// Hierarchy paths, one per `HI` line.
    pub hierarchy: Vec<String>,
    pub web: Option<String>,
    pub kind: KeywordKind,
}

impl KeywordEntry {
    fn new(identifier: String, kind: KeywordKind) -> Self {
        Self {
            identifier,
            accession: String::new(),
            definition: String::new(),
            synonyms: Vec::new(),
            go_mapping: BTreeMap::new(),
            category: None,
            hierarchy: Vec::new(),
            web: None,
            kind,
        }
    }
}

/// Keyword entries keyed by identifier, with the sorted list of categories.
#[derive(Debug, Clone, Default)]
pub struct KeywordCatalog {
    entries: HashMap<String, KeywordEntry>,
    categories: Vec<String>,
}

impl KeywordCatalog {
    /// Parses a plain-text keyword list.
    pub fn parse<R: BufRead>(reader: R) -> Result<Self, Error> {
        let mut catalog = Self::default();
        let mut blocks = BlockSet::default();

        for line in reader.lines() {
            let line = line?;
            let line = line.trim_end();
            if line.is_empty() {
                continue;
            }

            match classify_line(line) {
                Line::Terminator => {
                    if let Some(entry) = finalize_entry(&blocks) {
                        catalog.insert(entry);
                    }
                    blocks.reset();
                }
                Line::Coded {
                    code: LineCode::Id | LineCode::Ic,
                    ..
                } => {
                    blocks.reset();
                    blocks.push_line(line);
                }
                _ => blocks.push_line(line),
            }
        }

        if blocks.get(LineCode::Id).is_some() || blocks.get(LineCode::Ic).is_some() {
            warn!("keyword list ends inside an entry, discarding it");
        }

        catalog.categories = catalog
            .entries
            .values()
            .filter_map(|entry| entry.category.clone())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();

        debug!(
            entries = catalog.entries.len(),
            categories = catalog.categories.len(),
            "parsed keyword list"
        );
        Ok(catalog)
    }

    /// Parses a gzip-compressed keyword list.
    pub fn parse_gz<R: Read>(reader: R) -> Result<Self, Error> {
        Self::parse(BufReader::new(MultiGzDecoder::new(reader)))
    }

    fn insert(&mut self, entry: KeywordEntry) {
        if let Some(previous) = self.entries.insert(entry.identifier.clone(), entry) {
            warn!(keyword = %previous.identifier, "duplicate keyword entry, keeping later one");
        }
    }

    /// Distinct categories in sorted order.
    #[must_use]
    pub fn categories(&self) -> &[String] {
        &self.categories
    }

    #[must_use]
    pub fn get(&self, identifier: &str) -> Option<&KeywordEntry> {
        self.entries.get(identifier)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &KeywordEntry> {
        self.entries.values()
    }

    /// Buckets keywords by category.
    ///
    /// Returns one entry per category in [`categories`](Self::categories) order,
    /// each the sorted, de-duplicated keywords of that category joined with
    /// `"; "`. A keyword missing from the catalog, or one without a category, fails
    /// the whole call.
    pub fn categorize<S: AsRef<str>>(&self, keywords: &[S]) -> Result<Vec<String>, Error> {
        let mut buckets: Vec<BTreeSet<&str>> = vec![BTreeSet::new(); self.categories.len()];

        for keyword in keywords {
            let keyword = keyword.as_ref();
            let entry = self
                .entries
                .get(keyword)
                .ok_or_else(|| Error::UnknownKeyword(keyword.to_string()))?;
            let position = entry
                .category
                .as_ref()
                .and_then(|category| self.categories.binary_search(category).ok())
                .ok_or_else(|| Error::Validation(format!("keyword '{keyword}' has no category")))?;
            buckets[position].insert(keyword);
        }

        Ok(buckets
            .into_iter()
            .map(|bucket| bucket.into_iter().collect::<Vec<_>>().join("; "))
            .collect())
    }

    /// Number of keywords in each category, in category order.
    #[must_use]
    pub fn category_frequencies(&self) -> Vec<(&str, usize)> {
        self.categories
            .iter()
            .map(|category| {
                let count = self
                    .entries
                    .values()
                    .filter(|entry| entry.category.as_ref() == Some(category))
                    .count();
                (category.as_str(), count)
            })
            .collect()
    }
}

/// Builds an entry from the blocks collected since the last `ID`/`IC` line.
fn finalize_entry(blocks: &BlockSet) -> Option<KeywordEntry> {
    let (identity, kind) = match (blocks.get(LineCode::Id), blocks.get(LineCode::Ic)) {
        (Some(block), _) => (block, KeywordKind::Keyword),
        (None, Some(block)) => (block, KeywordKind::Category),
        (None, None) => {
            if !blocks.is_empty() {
                debug!("entry without identifier line, skipping");
            }
            return None;
        }
    };

    let identifier = strip_period(&joined(identity));
    let mut entry = KeywordEntry::new(identifier, kind);

    for block in blocks.iter() {
        match block.code {
            LineCode::Ac => entry.accession = joined(block),
            LineCode::De => entry.definition = joined(block),
            LineCode::Sy => {
                entry.synonyms = joined(block)
                    .split(';')
                    .map(|s| strip_period(s.trim()))
                    .filter(|s| !s.is_empty())
                    .collect();
            }
            LineCode::Go => {
                for line in &block.lines {
                    if let Some((id, name)) = line.split_once(';') {
                        entry
                            .go_mapping
                            .insert(id.trim().to_string(), name.trim().to_string());
                    }
                }
            }
            LineCode::Ca if kind == KeywordKind::Keyword => {
                entry.category = Some(strip_period(&joined(block)));
            }
            LineCode::Hi => {
                entry.hierarchy = block
                    .lines
                    .iter()
                    .map(|line| strip_period(line.trim()))
                    .filter(|line| !line.is_empty())
                    .collect();
            }
            LineCode::Ww => entry.web = block.lines.first().map(|line| line.trim().to_string()),
            _ => {}
        }
    }

    Some(entry)
}

fn joined(block: &Block) -> String {
    block
        .lines
        .iter()
        .map(|line| line.trim())
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

fn strip_period(text: &str) -> String {
    text.strip_suffix('.').unwrap_or(text).to_string()
}
