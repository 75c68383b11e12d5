//! Gene Ontology terms from `DR   GO;` cross-reference lines.

use std::fmt;

use crate::evidence::strip_evidence;

/// Gene Ontology aspect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Aspect {
    MolecularFunction,
    CellularComponent,
    BiologicalProcess,
}

impl Aspect {
    /// Report and table order.
    pub const ALL: [Aspect; 3] = [
        Aspect::BiologicalProcess,
        Aspect::CellularComponent,
        Aspect::MolecularFunction,
    ];

    /// Maps the DAT aspect letter (`F`, `C`, `P`). Other letters have no aspect.
    #[must_use]
    pub fn from_letter(letter: char) -> Option<Self> {
        match letter {
            'F' => Some(Self::MolecularFunction),
            'C' => Some(Self::CellularComponent),
            'P' => Some(Self::BiologicalProcess),
            _ => None,
        }
    }

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::MolecularFunction => "GO: Molecular Function",
            Self::CellularComponent => "GO: Cellular Component",
            Self::BiologicalProcess => "GO: Biological Process",
        }
    }
}

/// One GO term attached to a protein.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GoTerm {
    /// Numeric part of the term identifier, e.g. `0005737`.
    pub id: String,
    pub description: String,
}

impl GoTerm {
    #[must_use]
    pub fn go_id(&self) -> String {
        format!("GO:{}", self.id)
    }
}

impl fmt::Display for GoTerm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {{GO:{}}}", self.description, self.id)
    }
}

/// GO terms bucketed by aspect, each bucket in encounter order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GoTerms {
    pub molecular_function: Vec<GoTerm>,
    pub cellular_component: Vec<GoTerm>,
    pub biological_process: Vec<GoTerm>,
}

impl GoTerms {
    pub fn push(&mut self, aspect: Aspect, term: GoTerm) {
        match aspect {
            Aspect::MolecularFunction => self.molecular_function.push(term),
            Aspect::CellularComponent => self.cellular_component.push(term),
            Aspect::BiologicalProcess => self.biological_process.push(term),
        }
    }

    #[must_use]
    pub fn terms(&self, aspect: Aspect) -> &[GoTerm] {
        match aspect {
            Aspect::MolecularFunction => &self.molecular_function,
            Aspect::CellularComponent => &self.cellular_component,
            Aspect::BiologicalProcess => &self.biological_process,
        }
    }

    /// `description {GO:id}` strings of one aspect joined with `"; "`.
    #[must_use]
    pub fn formatted(&self, aspect: Aspect) -> String {
        self.terms(aspect)
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join("; ")
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.molecular_function.len() + self.cellular_component.len() + self.biological_process.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Splits a GO cross-reference into its raw (term id, aspect letter, description) triple.
///
/// Expects the content after `DR   `, e.g. `GO; GO:0005737; C:cytoplasm; IDA:UniProtKB.`.
/// Returns `None` for other databases and for truncated lines.
#[must_use]
pub fn parse_go_xref(content: &str) -> Option<(String, char, String)> {
    let content = strip_evidence(content);
    let mut segments = content.split("; ");
    if segments.next()?.trim() != "GO" {
        return None;
    }
    let id = segments.next()?.trim().strip_prefix("GO:")?;
    let term = segments.next()?.trim();
    let letter = term.chars().next()?;
    let description = term.get(2..).unwrap_or("").trim_end_matches(';');
    Some((id.to_string(), letter, description.to_string()))
}

/// Collects the GO terms of a cross-reference block.
/// Triples with an unrecognized aspect letter are dropped.
pub fn extract_go_terms<'a, I>(contents: I) -> GoTerms
where
    I: IntoIterator<Item = &'a str>,
{
    let mut terms = GoTerms::default();
    for (id, letter, description) in contents.into_iter().filter_map(parse_go_xref) {
        if let Some(aspect) = Aspect::from_letter(letter) {
            terms.push(aspect, GoTerm { id, description });
        }
    }
    terms
}

#[cfg(test)]
mod tests {
    use super::*;

    const GO_LINES: [&str; 5] = [
        "GO; GO:0005737; C:cytoplasm; IDA:UniProtKB.",
        "GO; GO:0019904; F:protein domain specific binding; IPI:UniProtKB.",
        "Reactome; R-HSA-111447; Activation of BAD and translocation to mitochondria.",
        "GO; GO:0006605; P:protein targeting; TAS:ProtInc.",
        "GO; GO:0000001; X:unknown aspect; IEA:Ensembl.",
    ];

    #[test]
    fn parse_triple() {
        let triple = parse_go_xref(GO_LINES[0]).unwrap();
        assert_eq!(
            triple,
            ("0005737".to_string(), 'C', "cytoplasm".to_string())
        );
    }

    #[test]
    fn non_go_line_ignored() {
        assert!(parse_go_xref(GO_LINES[2]).is_none());
        assert!(parse_go_xref("GO; GO:0005737").is_none());
    }

    #[test]
    fn buckets_by_aspect_letter() {
        let terms = extract_go_terms(GO_LINES);
        assert_eq!(terms.len(), 3);
        assert_eq!(
            terms.formatted(Aspect::CellularComponent),
            "cytoplasm {GO:0005737}"
        );
        assert_eq!(
            terms.formatted(Aspect::MolecularFunction),
            "protein domain specific binding {GO:0019904}"
        );
        assert_eq!(
            terms.formatted(Aspect::BiologicalProcess),
            "protein targeting {GO:0006605}"
        );
    }

    #[test]
    fn each_term_lands_in_exactly_one_bucket() {
        let terms = extract_go_terms(GO_LINES);
        for aspect in Aspect::ALL {
            for term in terms.terms(aspect) {
                let hits = Aspect::ALL
                    .iter()
                    .filter(|other| terms.terms(**other).contains(term))
                    .count();
                assert_eq!(hits, 1, "{term} appears in {hits} buckets");
            }
        }
        assert!(
            Aspect::ALL
                .iter()
                .all(|a| terms.terms(*a).iter().all(|t| t.id != "0000001"))
        );
    }

    #[test]
    fn encounter_order_preserved() {
        let lines = [
            "GO; GO:0000002; F:second; IEA:X.",
            "GO; GO:0000001; F:first; IEA:X.",
        ];
        let terms = extract_go_terms(lines);
        assert_eq!(
            terms.formatted(Aspect::MolecularFunction),
            "second {GO:0000002}; first {GO:0000001}"
        );
    }

    #[test]
    fn evidence_removed_before_split() {
        let terms = extract_go_terms(["GO; GO:0005829; C:cytosol {ECO:0000304}; TAS:Reactome."]);
        assert_eq!(terms.cellular_component[0].description, "cytosol");
        assert_eq!(terms.cellular_component[0].go_id(), "GO:0005829");
    }
}
