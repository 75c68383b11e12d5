//! Record store with lookup by identifier, primary accession and compound key.

use std::collections::HashMap;

use tracing::warn;

use crate::dat::entry::{AnnotationRecord, KEY_SEPARATOR};

/// Stable handle to a record owned by a [`Corpus`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RecordId(usize);

impl RecordId {
    #[must_use]
    pub fn index(self) -> usize {
        self.0
    }
}

/// Owns every parsed record once; the three key maps hold only [`RecordId`]s.
/// Records are never mutated after insertion.
#[derive(Debug, Default)]
pub struct Corpus {
    records: Vec<AnnotationRecord>,
    by_identifier: HashMap<String, RecordId>,
    by_accession: HashMap<String, RecordId>,
    by_compound_key: HashMap<String, RecordId>,
}

impl Corpus {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores a record and indexes it under its three keys.
    /// A key already taken by an earlier record is re-pointed at the new one.
    pub fn insert(&mut self, record: AnnotationRecord) -> RecordId {
        let id = RecordId(self.records.len());
        let keys = [
            (&mut self.by_identifier, record.identifier.clone()),
            (&mut self.by_accession, record.accession.clone()),
            (&mut self.by_compound_key, record.compound_key()),
        ];
        for (index, key) in keys {
            if let Some(previous) = index.insert(key.clone(), id) {
                warn!(key = %key, previous = previous.0, "duplicate corpus key, keeping later record");
            }
        }
        self.records.push(record);
        id
    }

    /// Looks up an exact identifier, accession or compound key.
    #[must_use]
    pub fn find(&self, key: &str) -> Option<RecordId> {
        self.by_identifier
            .get(key)
            .or_else(|| self.by_accession.get(key))
            .or_else(|| self.by_compound_key.get(key))
            .copied()
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&AnnotationRecord> {
        self.find(key).and_then(|id| self.record(id))
    }

    #[must_use]
    pub fn record(&self, id: RecordId) -> Option<&AnnotationRecord> {
        self.records.get(id.0)
    }

    /// Resolves a user-supplied query.
    ///
    /// Direct lookup first; a `db|accession|identifier` query that is not a known
    /// compound key is retried by its identifier and then its accession.
    #[must_use]
    pub fn resolve(&self, query: &str) -> Option<&AnnotationRecord> {
        let query = query.trim();
        if let Some(record) = self.get(query) {
            return Some(record);
        }

        let parts: Vec<&str> = query.split(KEY_SEPARATOR).collect();
        if parts.len() != 3 {
            return None;
        }
        self.by_identifier
            .get(parts[2])
            .or_else(|| self.by_accession.get(parts[1]))
            .and_then(|&id| self.record(id))
    }

    /// Number of records stored.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Number of distinct keys across the three indices.
    #[must_use]
    pub fn key_count(&self) -> usize {
        self.by_identifier.len() + self.by_accession.len() + self.by_compound_key.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &AnnotationRecord> {
        self.records.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dat::entry::{AnnotationBuilder, Dataset};

    fn record(identifier: &str, accession: &str, dataset: Dataset) -> AnnotationRecord {
        AnnotationBuilder {
            identifier: Some(identifier.to_string()),
            dataset: Some(dataset),
            accession: Some(accession.to_string()),
            ..AnnotationBuilder::default()
        }
        .build()
        .unwrap()
    }

    #[test]
    fn three_keys_point_to_one_record() {
        let mut corpus = Corpus::new();
        let id = corpus.insert(record("1433B_HUMAN", "P31946", Dataset::SwissProt));
        assert_eq!(corpus.find("1433B_HUMAN"), Some(id));
        assert_eq!(corpus.find("P31946"), Some(id));
        assert_eq!(corpus.find("sp|P31946|1433B_HUMAN"), Some(id));
        assert_eq!(corpus.len(), 1);
        assert_eq!(corpus.key_count(), 3);
    }

    #[test]
    fn resolve_falls_back_to_identifier_then_accession() {
        let mut corpus = Corpus::new();
        corpus.insert(record("1433B_HUMAN", "P31946", Dataset::SwissProt));

        let by_identifier = corpus.resolve("tr|WRONG|1433B_HUMAN").unwrap();
        assert_eq!(by_identifier.accession, "P31946");

        let by_accession = corpus.resolve("sp|P31946|RENAMED_HUMAN").unwrap();
        assert_eq!(by_accession.identifier, "1433B_HUMAN");
    }

    #[test]
    fn resolve_unknown_is_none() {
        let mut corpus = Corpus::new();
        corpus.insert(record("1433B_HUMAN", "P31946", Dataset::SwissProt));
        assert!(corpus.resolve("sp|Q00000|NOPE_HUMAN").is_none());
        assert!(corpus.resolve("Q00000").is_none());
        assert!(corpus.resolve("a|b").is_none());
    }

    #[test]
    fn duplicate_key_keeps_later_record() {
        let mut corpus = Corpus::new();
        corpus.insert(record("OLD_HUMAN", "P1", Dataset::SwissProt));
        let later = corpus.insert(record("NEW_HUMAN", "P1", Dataset::Trembl));
        assert_eq!(corpus.find("P1"), Some(later));
        assert_eq!(corpus.len(), 2);
        assert_eq!(corpus.get("OLD_HUMAN").unwrap().dataset, Dataset::SwissProt);
    }
}
