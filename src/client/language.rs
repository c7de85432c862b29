//! Language detection for free-text submissions.
//!
//! When the user has not picked a response language, the detected language
//! of the submitted text is sent instead so the backend answers in kind.
//! Detection that is short, uncertain, or outside the supported set sends
//! nothing and lets the backend decide.

use whatlang::{Lang, detect};

const MIN_CONFIDENCE: f64 = 0.25;
const MIN_TEXT_LENGTH: usize = 50;

pub fn detect_language(text: &str) -> Option<String> {
    // Skip detection for very short text
    if text.trim().len() < MIN_TEXT_LENGTH {
        return None;
    }

    let info = detect(text)?;
    if info.confidence() < MIN_CONFIDENCE {
        return None;
    }
    response_code(info.lang()).map(str::to_string)
}

/// ISO 639-1 codes for the languages the backend answers in.
fn response_code(lang: Lang) -> Option<&'static str> {
    match lang {
        Lang::Eng => Some("en"),
        Lang::Spa => Some("es"),
        Lang::Fra => Some("fr"),
        Lang::Deu => Some("de"),
        Lang::Por => Some("pt"),
        Lang::Ita => Some("it"),
        Lang::Nld => Some("nl"),
        Lang::Rus => Some("ru"),
        Lang::Cmn => Some("zh"),
        Lang::Jpn => Some("ja"),
        Lang::Kor => Some("ko"),
        Lang::Ara => Some("ar"),
        Lang::Hin => Some("hi"),
        _ => None,
    }
}
