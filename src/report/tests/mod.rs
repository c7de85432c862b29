use crate::report::{Finding, Source, extract};

const WELL_FORMED: &str = concat!(
    r#"<h2 class="result">Mostly False</h2>"#,
    r#"<section class="analysis"><p>The claim overstates the effect.</p></section>"#,
    r#"<section class="findings"><ul>"#,
    r#"<li><span class="claim-text">X causes Y</span>"#,
    r#"<span class="accuracy">Mostly False</span>"#,
    r#"<span class="explanation">Studies show partial correlation only.</span></li>"#,
    r#"</ul></section>"#,
);

#[test]
fn test_absent_input_yields_no_report() {
    assert_eq!(extract(None), None);
    assert_eq!(extract(Some("")), None);
    assert_eq!(extract(Some("   \n\t ")), None);
}

#[test]
fn test_well_formed_fragment() {
    let report = extract(Some(WELL_FORMED)).unwrap();

    assert_eq!(report.verdict, "Mostly False");
    assert_eq!(report.conclusion, "The claim overstates the effect.");
    assert_eq!(
        report.findings,
        vec![Finding {
            claim_text: "X causes Y".to_string(),
            accuracy_label: "Mostly False".to_string(),
            explanation: "Studies show partial correlation only.".to_string(),
        }]
    );
    assert!(report.sources.is_empty());
}

#[test]
fn test_extraction_is_idempotent() {
    let first = extract(Some(WELL_FORMED)).unwrap();
    let second = extract(Some(WELL_FORMED)).unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_finding_order_is_preserved() {
    let html = r#"
        <h2 class="result">Mixed</h2>
        <section class="findings"><ul>
            <li><span class="claim-text">first</span><span class="accuracy">Accurate</span></li>
            <li><span class="claim-text">second</span><span class="accuracy">False</span></li>
            <li><span class="claim-text">third</span><span class="accuracy">Unable to verify</span></li>
        </ul></section>
    "#;
    let report = extract(Some(html)).unwrap();

    let claims: Vec<&str> = report
        .findings
        .iter()
        .map(|f| f.claim_text.as_str())
        .collect();
    assert_eq!(claims, vec!["first", "second", "third"]);
}

#[test]
fn test_heading_fallback_for_verdict() {
    let html = "<h3>Mixed</h3><section><p>Some claims hold up, others do not.</p></section>";
    let report = extract(Some(html)).unwrap();

    assert_eq!(report.verdict, "Mixed");
    // Conclusion came from the generic section paragraph fallback.
    assert_eq!(report.conclusion, "Some claims hold up, others do not.");
}

#[test]
fn test_missing_everything_degrades_to_defaults() {
    let report = extract(Some("just some plain text")).unwrap();

    assert_eq!(report.verdict, "UNKNOWN");
    assert_eq!(report.conclusion, "");
    assert!(report.findings.is_empty());
    assert!(report.sources.is_empty());
}

#[test]
fn test_synthesized_finding_when_findings_absent() {
    let html = concat!(
        r#"<h2 class="result">Unverified</h2>"#,
        r#"<section class="analysis"><p>Could not confirm the central claim.</p></section>"#,
    );
    let report = extract(Some(html)).unwrap();

    assert_eq!(
        report.findings,
        vec![Finding {
            claim_text: "Overall content".to_string(),
            accuracy_label: "Unverified".to_string(),
            explanation: "Could not confirm the central claim.".to_string(),
        }]
    );
}

#[test]
fn test_synthesized_finding_unknown_verdict() {
    // No verdict anywhere: the fallback finding's label degrades to "Unknown".
    let html = r#"<section class="analysis"><p>Only a summary was returned.</p></section>"#;
    let report = extract(Some(html)).unwrap();

    assert_eq!(report.verdict, "UNKNOWN");
    assert_eq!(report.findings.len(), 1);
    assert_eq!(report.findings[0].claim_text, "Overall content");
    assert_eq!(report.findings[0].accuracy_label, "Unknown");
}

#[test]
fn test_no_synthesized_finding_without_conclusion() {
    let html = r#"<h2 class="result">Error</h2>"#;
    let report = extract(Some(html)).unwrap();

    assert_eq!(report.verdict, "Error");
    assert!(report.findings.is_empty());
}

#[test]
fn test_findings_container_fallback_by_section_text() {
    let html = r#"
        <h2>Accurate</h2>
        <div>
            <h3>Key Findings</h3>
            <ul><li><strong>Claim 1:</strong> - Water boils at 100C
                <p>Assumes standard atmospheric pressure.</p>
            </li></ul>
        </div>
    "#;
    let report = extract(Some(html)).unwrap();

    assert_eq!(report.findings.len(), 1);
    let finding = &report.findings[0];
    // Claim text recovered from the text run after the bold label.
    assert_eq!(finding.claim_text, "Water boils at 100C");
    // Explanation recovered from the nested paragraph.
    assert_eq!(finding.explanation, "Assumes standard atmospheric pressure.");
}

#[test]
fn test_accuracy_label_recovered_by_keyword_scan() {
    let html = r#"
        <section class="findings"><ul>
            <li><span>Vaccines cause X</span>: Inaccurate. No supporting studies exist.</li>
        </ul></section>
    "#;
    let report = extract(Some(html)).unwrap();

    assert_eq!(report.findings.len(), 1);
    let finding = &report.findings[0];
    // First nested span stands in for the missing .claim-text element.
    assert_eq!(finding.claim_text, "Vaccines cause X");
    // The delimiter-bounded phrase around the keyword becomes the label.
    assert_eq!(finding.accuracy_label, "Inaccurate");
    assert!(finding.explanation.contains("No supporting studies exist"));
    assert!(!finding.explanation.contains("Vaccines cause X"));
}

#[test]
fn test_sources_with_and_without_links() {
    let html = r#"
        <section class="sources"><ul>
            <li><a href="https://example.com/a">Example A</a></li>
            <li>  Offline encyclopedia, 2019 edition  </li>
            <li><a>Anchor with no href</a></li>
        </ul></section>
    "#;
    let report = extract(Some(html)).unwrap();

    assert_eq!(
        report.sources,
        vec![
            Source {
                url: "https://example.com/a".to_string(),
                description: "Example A".to_string(),
                has_url: true,
            },
            Source {
                url: "#".to_string(),
                description: "Offline encyclopedia, 2019 edition".to_string(),
                has_url: false,
            },
            Source {
                url: "#".to_string(),
                description: "Anchor with no href".to_string(),
                has_url: true,
            },
        ]
    );
}

#[test]
fn test_malformed_markup_never_fails() {
    let report = extract(Some("<h2 class=\"result\">Broken")).unwrap();
    assert_eq!(report.verdict, "Broken");

    let report = extract(Some("<<<>>> &&& not html")).unwrap();
    assert_eq!(report.verdict, "UNKNOWN");
    assert!(report.findings.is_empty());
}

#[test]
fn test_full_backend_shaped_response() {
    // Shape the backend prompt actually asks the model for.
    let html = r#"
        <div class="fact-check">
            <h2 class="result">MOSTLY ACCURATE</h2>
            <section class="analysis">
                <h3>Conclusion:</h3>
                <p>Most claims check out against primary sources.</p>
            </section>
            <section class="sources">
                <h3>Sources:</h3>
                <ul>
                    <li><a href="https://who.int/report">WHO annual report</a></li>
                    <li>National statistics yearbook</li>
                </ul>
            </section>
            <section class="findings">
                <h3>Findings:</h3>
                <ul>
                    <li>
                        <strong>Claim 1:</strong>
                        <span class="claim-text">Cases fell by 40 percent</span> -
                        <span class="accuracy">Accurate</span>
                        <p class="explanation">Matches the WHO figures for that period.</p>
                    </li>
                    <li>
                        <strong>Claim 2:</strong>
                        <span class="claim-text">The decline was unprecedented</span> -
                        <span class="accuracy">Unable to verify</span>
                        <p class="explanation">No comparable historical series exists.</p>
                    </li>
                </ul>
            </section>
        </div>
    "#;
    let report = extract(Some(html)).unwrap();

    assert_eq!(report.verdict, "MOSTLY ACCURATE");
    assert_eq!(report.conclusion, "Most claims check out against primary sources.");
    assert_eq!(report.findings.len(), 2);
    assert_eq!(report.findings[0].claim_text, "Cases fell by 40 percent");
    assert_eq!(report.findings[0].accuracy_label, "Accurate");
    assert_eq!(
        report.findings[1].explanation,
        "No comparable historical series exists."
    );
    assert_eq!(report.sources.len(), 2);
    assert!(report.sources[0].has_url);
    assert!(!report.sources[1].has_url);
}

#[cfg(feature = "fuzz")]
mod fuzz {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn test_extract_never_panics(markup in ".*") {
            // Best-effort extraction must hold for arbitrary input.
            let _ = extract(Some(&markup));
        }

        #[test]
        fn test_fields_are_never_padded(markup in ".*") {
            if let Some(report) = extract(Some(&markup)) {
                prop_assert_eq!(report.verdict.trim(), report.verdict.as_str());
                for finding in &report.findings {
                    prop_assert_eq!(finding.claim_text.trim(), finding.claim_text.as_str());
                    prop_assert_eq!(finding.accuracy_label.trim(), finding.accuracy_label.as_str());
                }
            }
        }

        #[test]
        fn test_extract_is_deterministic(markup in ".*") {
            prop_assert_eq!(extract(Some(&markup)), extract(Some(&markup)));
        }
    }
}
