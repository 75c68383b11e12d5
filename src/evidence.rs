//! Removal of inline `{ECO:...}` evidence citations from field values.

use std::sync::LazyLock;

use regex::Regex;

/// Optional space and brace, the `ECO:` tag, then everything up to the first `}` or `,`.
/// The tag must start the text or follow a brace or a space.
static CITATION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?: ?\{| |^)ECO:[^},]*[},]").expect("evidence citation pattern is valid")
});

/// Returns `text` with every inline evidence citation removed.
///
/// Citations lacking a terminator are left untouched. Removal repeats until no
/// citation remains, so stripping is idempotent.
#[must_use]
pub fn strip_evidence(text: &str) -> String {
    let mut out = text.to_string();
    while CITATION.is_match(&out) {
        out = CITATION.replace_all(&out, "").into_owned();
    }
    out
}
