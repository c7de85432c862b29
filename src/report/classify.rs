//! Pure label classifiers.
//!
//! The backend's verdict and accuracy vocabulary is free text, so
//! classification is lossy and label-driven. Substring checks run
//! most-specific-first: a qualified label ("mostly false") must never be
//! captured by its unqualified form ("false"), and "inaccurate" must never
//! be captured by "accurate".

/// Presentation bucket for the whole-report verdict. Matched by exact
/// equality after lowercasing and trimming, not by substring.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VerdictCategory {
    Accurate,
    MostlyTrue,
    Mixed,
    ConsensusBased,
    MostlyFalse,
    False,
    Unverified,
    Error,
    AiGenerated,
    Other,
}

pub fn classify_verdict(verdict: &str) -> VerdictCategory {
    match verdict.trim().to_lowercase().as_str() {
        "accurate" | "true" => VerdictCategory::Accurate,
        "mostly true" => VerdictCategory::MostlyTrue,
        "mixed" => VerdictCategory::Mixed,
        "consensus-based" => VerdictCategory::ConsensusBased,
        "mostly false" => VerdictCategory::MostlyFalse,
        "false" => VerdictCategory::False,
        "unverified" => VerdictCategory::Unverified,
        "error" => VerdictCategory::Error,
        "ai-generated" => VerdictCategory::AiGenerated,
        _ => VerdictCategory::Other,
    }
}

/// Binary simplification of a per-finding accuracy label.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TruthLeaning {
    Truthy,
    Falsy,
    Unknown,
}

const FALSY_MARKERS: [&str; 4] = ["inaccurate", "false", "conspiracy", "misleading"];
const TRUTHY_MARKERS: [&str; 5] = [
    "accurate",
    "mostly true",
    "partly accurate",
    "expert consensus",
    "based on expert",
];

pub fn truth_leaning(label: &str) -> TruthLeaning {
    let lowered = label.to_lowercase();

    // The falsy pass runs first: "mostly false claim, though partly
    // accurate context" leans falsy, and "inaccurate" must not hit the
    // "accurate" substring below.
    if FALSY_MARKERS.iter().any(|m| lowered.contains(m)) {
        return TruthLeaning::Falsy;
    }
    if TRUTHY_MARKERS.iter().any(|m| lowered.contains(m)) {
        return TruthLeaning::Truthy;
    }
    TruthLeaning::Unknown
}

/// Finer-grained accuracy bucket, used where a badge needs to distinguish
/// qualified labels from their unqualified forms.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccuracyBadge {
    Accurate,
    MostlyTrue,
    PartlyAccurate,
    MostlyFalse,
    False,
    ExpertConsensus,
    Unverified,
    Unknown,
}

pub fn accuracy_badge(label: &str) -> AccuracyBadge {
    let lowered = label.to_lowercase();
    let has = |marker: &str| lowered.contains(marker);

    if has("accurate") && !has("inaccurate") && !has("mostly") && !has("partly") {
        AccuracyBadge::Accurate
    } else if has("mostly true") {
        AccuracyBadge::MostlyTrue
    } else if has("partly accurate") {
        AccuracyBadge::PartlyAccurate
    } else if has("mostly false") || has("mostly inaccurate") {
        AccuracyBadge::MostlyFalse
    } else if (has("false") && !has("mostly")) || has("inaccurate") {
        AccuracyBadge::False
    } else if has("expert consensus") || has("based on expert") {
        AccuracyBadge::ExpertConsensus
    } else if has("unable") || has("don't know") {
        AccuracyBadge::Unverified
    } else {
        AccuracyBadge::Unknown
    }
}
