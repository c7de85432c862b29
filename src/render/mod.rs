pub mod claim_review;
pub mod export;
pub mod summary;

pub use claim_review::to_claim_review;
pub use export::printable_html;
pub use summary::{assessment_lines, clipboard_text, share_line};
