//! Reactome cross-references and the `CC   -!- PATHWAY:` comment narrative.

use std::fmt;

use crate::evidence::strip_evidence;

const PATHWAY_MARKER: &str = "-!- PATHWAY:";
const TOPIC_MARKER: &str = "-!-";
const SEPARATOR_MARKER: &str = "----------";
const PLACEHOLDER: &str = ".";

/// A Reactome pathway reference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReactomePathway {
    pub id: String,
    pub description: String,
}

impl fmt::Display for ReactomePathway {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {{{}}}", self.description, self.id)
    }
}

/// Pathway annotations of one protein.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Pathways {
    /// Reactome references in encounter order.
    pub reactome: Vec<ReactomePathway>,
    /// Free text of the PATHWAY comment topic; empty when absent.
    pub narrative: String,
}

impl Pathways {
    pub fn reactome_ids(&self) -> impl Iterator<Item = &str> {
        self.reactome.iter().map(|p| p.id.as_str())
    }

    pub fn reactome_descriptions(&self) -> impl Iterator<Item = &str> {
        self.reactome.iter().map(|p| p.description.as_str())
    }

    /// `description {identifier}` pairs joined with `"; "`.
    #[must_use]
    pub fn reactome_formatted(&self) -> String {
        self.reactome
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join("; ")
    }

    #[must_use]
    pub fn narrative(&self) -> Option<&str> {
        if self.narrative.is_empty() {
            None
        } else {
            Some(&self.narrative)
        }
    }
}

/// Parses a Reactome cross-reference (content after `DR   `).
///
/// `Reactome; R-HSA-111447; Activation of BAD.` yields the identifier and the
/// description with its trailing period removed.
#[must_use]
pub fn parse_reactome_xref(content: &str) -> Option<ReactomePathway> {
    let content = strip_evidence(content);
    let mut parts = content.splitn(3, ';');
    if parts.next()?.trim() != "Reactome" {
        return None;
    }
    let id = parts.next()?.trim();
    let description = parts.next()?.trim();
    let description = description.strip_suffix('.').unwrap_or(description);
    Some(ReactomePathway {
        id: id.to_string(),
        description: description.to_string(),
    })
}

/// Collects the Reactome references of a cross-reference block.
pub fn extract_reactome<'a, I>(contents: I) -> Vec<ReactomePathway>
where
    I: IntoIterator<Item = &'a str>,
{
    contents
        .into_iter()
        .filter_map(parse_reactome_xref)
        .collect()
}

/// Accumulates the PATHWAY topic text from the contents of a `CC` block.
///
/// Accumulation starts at the PATHWAY marker and continues over the following
/// lines until another topic or the dashed copyright separator. Each PATHWAY
/// marker restarts the text, so of consecutive PATHWAY topics only the last one
/// is kept. A lone `.` left over from a wrapped evidence citation is skipped.
pub fn extract_narrative<'a, I>(contents: I) -> String
where
    I: IntoIterator<Item = &'a str>,
{
    let mut narrative = String::new();
    let mut in_pathway = false;

    for content in contents {
        let content = strip_evidence(content);
        if let Some(pos) = content.find(PATHWAY_MARKER) {
            narrative.clear();
            narrative.push_str(content[pos + PATHWAY_MARKER.len()..].trim());
            narrative.push(' ');
            in_pathway = true;
        } else if in_pathway {
            if content.contains(TOPIC_MARKER) || content.contains(SEPARATOR_MARKER) {
                break;
            }
            let text = content.trim();
            if text.is_empty() || text == PLACEHOLDER {
                continue;
            }
            narrative.push_str(text);
            narrative.push(' ');
        }
    }

    if narrative.ends_with(' ') {
        narrative.pop();
    }
    narrative
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reactome_pair() {
        let pathway = parse_reactome_xref(
            "Reactome; R-HSA-111447; Activation of BAD and translocation to mitochondria.",
        )
        .unwrap();
        assert_eq!(pathway.id, "R-HSA-111447");
        assert_eq!(
            pathway.description,
            "Activation of BAD and translocation to mitochondria"
        );
    }

    #[test]
    fn reactome_formatting_keeps_pairs_aligned() {
        let pathways = Pathways {
            reactome: extract_reactome([
                "Reactome; R-HSA-1; First.",
                "GO; GO:0005737; C:cytoplasm; IDA:UniProtKB.",
                "Reactome; R-HSA-2; Second; with semicolon.",
            ]),
            narrative: String::new(),
        };
        assert_eq!(
            pathways.reactome_formatted(),
            "First {R-HSA-1}; Second; with semicolon {R-HSA-2}"
        );
        assert_eq!(
            pathways.reactome_ids().collect::<Vec<_>>(),
            vec!["R-HSA-1", "R-HSA-2"]
        );
        assert_eq!(pathways.reactome_descriptions().count(), 2);
        assert!(pathways.narrative().is_none());
    }

    #[test]
    fn narrative_with_continuation() {
        let narrative = extract_narrative([
            "-!- FUNCTION: Adapter protein.",
            "-!- PATHWAY: Step one. {ECO:0000305}",
            "    continued step two.",
            "-!- SUBUNIT: Homodimer.",
        ]);
        assert_eq!(narrative, "Step one. continued step two.");
    }

    #[test]
    fn narrative_stops_at_separator_and_skips_placeholder() {
        let narrative = extract_narrative([
            "-!- PATHWAY: Lipid metabolism; step 1/2. {ECO:0000269|PubMed:10,",
            "    ECO:0000269|PubMed:20}.",
            "    more text.",
            "---------------------------------------------------------------------------",
            "Copyrighted by the UniProt Consortium",
        ]);
        assert_eq!(narrative, "Lipid metabolism; step 1/2. more text.");
    }

    #[test]
    fn later_pathway_topic_replaces_earlier() {
        let narrative = extract_narrative([
            "-!- PATHWAY: Amino-acid biosynthesis.",
            "-!- PATHWAY: Cofactor biosynthesis.",
            "-!- SIMILARITY: Belongs to the family.",
        ]);
        assert_eq!(narrative, "Cofactor biosynthesis.");
    }

    #[test]
    fn no_pathway_topic() {
        assert_eq!(extract_narrative(["-!- FUNCTION: Something."]), "");
    }
}
