//! Best-effort extraction of report fields from the backend's HTML fragment.
//!
//! The backend's markup contract is loose, so every lookup here is a chain
//! of fallbacks: a structural selector first, then progressively cruder
//! guesses over the surrounding text. Missing elements degrade to the next
//! guess or to an empty-string default; nothing in this module returns an
//! error or panics on malformed input.

use once_cell::sync::Lazy;
use scraper::{ElementRef, Html, Selector};

use crate::report::model::{Finding, Report, Source, squeeze};

static RESULT: Lazy<Selector> = Lazy::new(|| Selector::parse(".result").unwrap());
static HEADING: Lazy<Selector> = Lazy::new(|| Selector::parse("h1, h2, h3, h4, h5, h6").unwrap());
static ANALYSIS_P: Lazy<Selector> = Lazy::new(|| Selector::parse(".analysis p").unwrap());
static SECTION_P: Lazy<Selector> = Lazy::new(|| Selector::parse("section p").unwrap());
static FINDINGS_LI: Lazy<Selector> = Lazy::new(|| Selector::parse(".findings li").unwrap());
static SECTION_LIKE: Lazy<Selector> = Lazy::new(|| Selector::parse("section, div").unwrap());
static LIST_ITEM: Lazy<Selector> = Lazy::new(|| Selector::parse("li").unwrap());
static CLAIM_TEXT: Lazy<Selector> = Lazy::new(|| Selector::parse(".claim-text").unwrap());
static ACCURACY: Lazy<Selector> = Lazy::new(|| Selector::parse(".accuracy").unwrap());
static EXPLANATION: Lazy<Selector> = Lazy::new(|| Selector::parse(".explanation").unwrap());
static BOLD: Lazy<Selector> = Lazy::new(|| Selector::parse("strong, b, em").unwrap());
static SPAN: Lazy<Selector> = Lazy::new(|| Selector::parse("span").unwrap());
static PARAGRAPH: Lazy<Selector> = Lazy::new(|| Selector::parse("p").unwrap());
static SOURCES_LI: Lazy<Selector> = Lazy::new(|| Selector::parse(".sources li").unwrap());
static ANCHOR: Lazy<Selector> = Lazy::new(|| Selector::parse("a").unwrap());

/// Keywords that mark a phrase as an accuracy assessment when no
/// structural `.accuracy` element is present.
const ACCURACY_KEYWORDS: [&str; 5] =
    ["accurate", "inaccurate", "partly", "mostly", "unable to verify"];

/// Phrase boundaries used when carving an accuracy label out of free text.
const LABEL_DELIMITERS: [char; 5] = ['.', ',', ':', ';', '-'];

pub(crate) fn scrape(markup: &str) -> Report {
    let doc = Html::parse_fragment(markup);

    let verdict = extract_verdict(&doc);
    let conclusion = extract_conclusion(&doc);
    let mut findings = extract_findings(&doc);

    // No findings located by any heuristic: summarize the overall content
    // as a single finding so the report is only empty when there is truly
    // nothing to show.
    if findings.is_empty() && !conclusion.is_empty() {
        let accuracy_label = if verdict == "UNKNOWN" {
            "Unknown".to_string()
        } else {
            verdict.clone()
        };
        findings.push(Finding {
            claim_text: "Overall content".to_string(),
            accuracy_label,
            explanation: conclusion.clone(),
        });
    }

    Report {
        verdict,
        conclusion,
        findings,
        sources: extract_sources(&doc),
    }
}

fn extract_verdict(doc: &Html) -> String {
    if let Some(el) = doc.select(&RESULT).next() {
        let text = element_text(el);
        if !text.is_empty() {
            return text;
        }
    }

    // No flagged result element; the first heading with text is usually
    // the verdict.
    for el in doc.select(&HEADING) {
        let text = element_text(el);
        if !text.is_empty() {
            return text;
        }
    }

    "UNKNOWN".to_string()
}

fn extract_conclusion(doc: &Html) -> String {
    if let Some(el) = doc.select(&ANALYSIS_P).next() {
        let text = element_text(el);
        if !text.is_empty() {
            return text;
        }
    }

    for el in doc.select(&SECTION_P) {
        let text = element_text(el);
        if !text.is_empty() {
            return text;
        }
    }

    String::new()
}

fn extract_findings(doc: &Html) -> Vec<Finding> {
    let mut items: Vec<ElementRef<'_>> = doc.select(&FINDINGS_LI).collect();
    if items.is_empty() {
        items = fallback_finding_items(doc);
    }
    items.into_iter().map(finding_from_item).collect()
}

/// Search section-like containers for one that talks about findings or
/// claims and take its list items instead.
fn fallback_finding_items(doc: &Html) -> Vec<ElementRef<'_>> {
    for container in doc.select(&SECTION_LIKE) {
        let text = container.text().collect::<String>().to_lowercase();
        if text.contains("findings") || text.contains("claims") {
            let items: Vec<ElementRef<'_>> = container.select(&LIST_ITEM).collect();
            if !items.is_empty() {
                return items;
            }
        }
    }
    Vec::new()
}

fn finding_from_item(item: ElementRef<'_>) -> Finding {
    let claim_text = item_claim_text(item);
    let accuracy_label = item_accuracy_label(item);
    let explanation = item_explanation(item, &claim_text, &accuracy_label);
    Finding {
        claim_text,
        accuracy_label,
        explanation,
    }
}

fn item_claim_text(item: ElementRef<'_>) -> String {
    if let Some(el) = item.select(&CLAIM_TEXT).next() {
        let text = element_text(el);
        if !text.is_empty() {
            return text;
        }
    }

    if let Some(text) = text_after_bold(item) {
        return text;
    }

    if let Some(el) = item.select(&SPAN).next() {
        let text = element_text(el);
        if !text.is_empty() {
            return text;
        }
    }

    first_line(&item.text().collect::<String>())
}

/// The backend sometimes writes `<strong>Claim 1:</strong> - claim text`
/// with no flagged element; take the first non-empty text run right after
/// a bold/emphasis node, minus the separator punctuation.
fn text_after_bold(item: ElementRef<'_>) -> Option<String> {
    for bold in item.select(&BOLD) {
        for sibling in bold.next_siblings() {
            if let Some(text) = sibling.value().as_text() {
                let trimmed = squeeze(text)
                    .trim_matches(|c: char| c.is_whitespace() || c == '-' || c == ':')
                    .to_string();
                if !trimmed.is_empty() {
                    return Some(trimmed);
                }
            } else if sibling.value().is_element() {
                // An element ends the text run following this bold node.
                break;
            }
        }
    }
    None
}

fn item_accuracy_label(item: ElementRef<'_>) -> String {
    if let Some(el) = item.select(&ACCURACY).next() {
        let text = element_text(el);
        if !text.is_empty() {
            return text;
        }
    }

    // Scan the item's text for an assessment keyword and carve out the
    // delimiter-bounded phrase around it.
    let full = item.text().collect::<String>();
    let lowered = full.to_lowercase();
    for keyword in ACCURACY_KEYWORDS {
        if lowered.contains(keyword) {
            for segment in full.split(LABEL_DELIMITERS) {
                if segment.to_lowercase().contains(keyword) {
                    return squeeze(segment);
                }
            }
        }
    }

    String::new()
}

fn item_explanation(item: ElementRef<'_>, claim_text: &str, accuracy_label: &str) -> String {
    if let Some(el) = item.select(&EXPLANATION).next() {
        let text = element_text(el);
        if !text.is_empty() {
            return text;
        }
    }

    if let Some(el) = item.select(&PARAGRAPH).next() {
        let text = element_text(el);
        if !text.is_empty() {
            return text;
        }
    }

    // Last resort: the item's own text minus the fields already extracted.
    let mut text = squeeze(&item.text().collect::<String>());
    if !claim_text.is_empty() {
        text = text.replace(claim_text, "");
    }
    if !accuracy_label.is_empty() {
        text = text.replace(accuracy_label, "");
    }
    squeeze(&text)
}

fn extract_sources(doc: &Html) -> Vec<Source> {
    doc.select(&SOURCES_LI)
        .map(|item| {
            if let Some(link) = item.select(&ANCHOR).next() {
                Source {
                    url: link.value().attr("href").unwrap_or("#").to_string(),
                    description: element_text(link),
                    has_url: true,
                }
            } else {
                Source {
                    url: "#".to_string(),
                    description: element_text(item),
                    has_url: false,
                }
            }
        })
        .collect()
}

fn element_text(el: ElementRef<'_>) -> String {
    squeeze(&el.text().collect::<String>())
}

fn first_line(text: &str) -> String {
    text.lines()
        .map(str::trim)
        .find(|line| !line.is_empty())
        .map(squeeze)
        .unwrap_or_default()
}
