//! Printable, self-contained HTML rendering of a report.

use chrono::{DateTime, Utc};
use std::fmt::Write;

use crate::client::types::WebSearchResult;
use crate::report::Report;

/// Inline styles so the document prints the same everywhere.
const STYLE: &str = "\
body { font-family: Arial, sans-serif; max-width: 800px; margin: 0 auto; padding: 20px; }\n\
.header { text-align: center; margin-bottom: 30px; }\n\
.result { font-size: 24px; font-weight: bold; margin-bottom: 10px; }\n\
.conclusion { margin-bottom: 30px; }\n\
.sources, .findings, .web-search { margin-bottom: 30px; }\n\
h2 { border-bottom: 1px solid #ddd; padding-bottom: 10px; }\n\
.claim { margin-bottom: 15px; padding-left: 20px; }\n\
.accuracy { font-weight: bold; }\n\
.footer { margin-top: 50px; text-align: center; font-size: 12px; color: #666; }\n";

/// Render a standalone HTML document for printing or PDF export.
///
/// Report fields are plain text and get escaped; web search answers may
/// carry backend-authored markup and get sanitized instead, the same
/// split the interactive view makes.
pub fn printable_html(
    report: &Report,
    web_search: &[WebSearchResult],
    generated_at: DateTime<Utc>,
) -> String {
    let mut out = String::new();

    let _ = write!(
        out,
        "<!DOCTYPE html>\n<html>\n<head>\n<title>Fact Check Results</title>\n<style>\n{STYLE}</style>\n</head>\n<body>\n"
    );
    let _ = write!(
        out,
        "<div class=\"header\">\n<h1>Fact Check Results</h1>\n<p>Generated on {}</p>\n</div>\n",
        generated_at.format("%Y-%m-%d %H:%M:%S UTC")
    );

    let _ = write!(
        out,
        "<div class=\"result\">Result: {}</div>\n<div class=\"conclusion\">{}</div>\n",
        escape(&report.verdict),
        escape(&report.conclusion)
    );

    out.push_str("<div class=\"findings\">\n<h2>Claims Analysis</h2>\n");
    for finding in &report.findings {
        let _ = write!(
            out,
            "<div class=\"claim\">\n<p><strong>{}</strong></p>\n<p class=\"accuracy\">Assessment: {}</p>\n<p>{}</p>\n</div>\n",
            escape(&finding.claim_text),
            escape(&finding.accuracy_label),
            escape(&finding.explanation)
        );
    }
    out.push_str("</div>\n");

    if !report.sources.is_empty() {
        out.push_str("<div class=\"sources\">\n<h2>Sources</h2>\n<ul>\n");
        for source in &report.sources {
            if source.has_url {
                let _ = write!(
                    out,
                    "<li><a href=\"{}\">{}</a></li>\n",
                    escape(&source.url),
                    escape(&source.description)
                );
            } else {
                let _ = write!(out, "<li>{}</li>\n", escape(&source.description));
            }
        }
        out.push_str("</ul>\n</div>\n");
    }

    if !web_search.is_empty() {
        out.push_str("<div class=\"web-search\">\n<h2>Web Search Corroboration</h2>\n");
        for result in web_search {
            let answer = result.answer.as_deref().unwrap_or("No result available");
            let _ = write!(
                out,
                "<div class=\"claim\">\n<p><strong>{}</strong></p>\n<div>{}</div>\n</div>\n",
                escape(&result.question),
                sanitize(answer)
            );
        }
        out.push_str("</div>\n");
    }

    out.push_str(
        "<div class=\"footer\">\n<p>This fact check is an automated analysis and should be verified with additional sources.</p>\n</div>\n</body>\n</html>\n",
    );

    out
}

/// Plain-text report fields: escape the HTML metacharacters, nothing else.
/// Full entity-escaping would mangle ordinary text (spaces, slashes) in the
/// exported document.
fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&#34;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Backend-authored rich text: strip anything dangerous, keep the rest.
fn sanitize(html: &str) -> String {
    ammonia::Builder::default().clean(html).to_string()
}
