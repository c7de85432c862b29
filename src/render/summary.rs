//! Plain-text summary of a report, shaped for the clipboard and for
//! share sheets: verdict, conclusion, one line per finding.

use std::fmt::Write;

use crate::report::{AccuracyBadge, Report, accuracy_badge};

pub fn clipboard_text(report: &Report) -> String {
    let mut out = String::new();

    let _ = write!(out, "Fact Check Result: {}", report.verdict);
    let _ = write!(out, "\n\nConclusion: {}", report.conclusion);
    out.push_str("\n\nClaims:");
    for finding in &report.findings {
        let _ = write!(out, "\n- {}: {}", finding.claim_text, finding.accuracy_label);
    }

    out
}

/// One-line teaser used when sharing a link to the results.
pub fn share_line(report: &Report) -> String {
    format!("Fact check result: {}", report.verdict)
}

/// Per-finding assessment lines: each claim with its normalized badge,
/// so free-text labels ("Mostly inaccurate") read consistently.
pub fn assessment_lines(report: &Report) -> String {
    let mut out = String::from("Assessments:");
    for finding in &report.findings {
        let badge = accuracy_badge(&finding.accuracy_label);
        let _ = write!(out, "\n- {} [{}]", finding.claim_text, badge_name(badge));
    }
    out
}

fn badge_name(badge: AccuracyBadge) -> &'static str {
    match badge {
        AccuracyBadge::Accurate => "accurate",
        AccuracyBadge::MostlyTrue => "mostly true",
        AccuracyBadge::PartlyAccurate => "partly accurate",
        AccuracyBadge::MostlyFalse => "mostly false",
        AccuracyBadge::False => "false",
        AccuracyBadge::ExpertConsensus => "expert consensus",
        AccuracyBadge::Unverified => "unverified",
        AccuracyBadge::Unknown => "unknown",
    }
}
