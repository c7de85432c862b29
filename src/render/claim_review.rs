//! schema.org ClaimReview metadata derived from a report.

use serde_json::{Value, json};

use crate::report::{Report, TruthLeaning, truth_leaning};

/// Build the ClaimReview annotation for a results page.
pub fn to_claim_review(report: &Report, page_url: &str) -> Value {
    let rating = match truth_leaning(&report.verdict) {
        TruthLeaning::Truthy => "5",
        _ => "1",
    };

    let claims = report
        .findings
        .iter()
        .map(|f| f.claim_text.as_str())
        .collect::<Vec<_>>()
        .join("; ");

    json!({
        "@context": "https://schema.org",
        "@type": "ClaimReview",
        "url": page_url,
        "itemReviewed": {
            "@type": "Claim",
            "appearance": {
                "@type": "CreativeWork",
                "name": "User submitted content"
            }
        },
        "author": {
            "@type": "Organization",
            "name": "AI-Powered Fact Check"
        },
        "reviewRating": {
            "@type": "Rating",
            "ratingValue": rating,
            "bestRating": "5",
            "worstRating": "1",
            "alternateName": report.verdict
        },
        "claimReviewed": claims
    })
}
