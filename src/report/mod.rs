pub mod classify;
pub mod model;
pub mod scrape;

#[cfg(test)]
mod tests;

pub use classify::{
    AccuracyBadge, TruthLeaning, VerdictCategory, accuracy_badge, classify_verdict, truth_leaning,
};
pub use model::{Finding, Report, Source};

/// Extract a normalized fact-check report from a backend HTML fragment.
///
/// Returns `None` for absent or blank input — "nothing to show" is distinct
/// from an empty report. For anything else the result is best-effort:
/// missing structure degrades through fallback heuristics, never an error.
pub fn extract(markup: Option<&str>) -> Option<Report> {
    let markup = markup?;
    if markup.trim().is_empty() {
        return None;
    }
    Some(scrape::scrape(markup))
}
