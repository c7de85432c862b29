use serde::{Deserialize, Serialize};

/// Normalized fact-check report extracted from a backend HTML fragment.
///
/// Every field is an owned, non-null string; "absent" is the empty string
/// (or the `"#"` sentinel for a missing source URL) so consumers never
/// branch on nullability.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Report {
    pub verdict: String,
    pub conclusion: String,
    pub findings: Vec<Finding>,
    pub sources: Vec<Source>,
}

/// One individually assessed claim, in the order it appeared in the markup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Finding {
    pub claim_text: String,
    pub accuracy_label: String,
    pub explanation: String,
}

/// A citation backing the fact check, optionally linked.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Source {
    pub url: String,
    pub description: String,
    pub has_url: bool,
}

/// Collapse runs of whitespace into single spaces and trim the ends.
/// Element text from nested markup carries indentation and inter-tag
/// newlines that are not part of the content.
pub fn squeeze(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
