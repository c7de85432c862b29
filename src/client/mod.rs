pub mod api;
pub mod errors;
pub mod language;
pub mod poll;
pub mod types;

pub use api::ApiClient;
pub use errors::ClientError;
pub use poll::{JobPoller, PollHandle, PollOutcome};
pub use types::{
    CheckResponse, JobAck, JobStatus, ModelInfo, ModelRef, SubmitOutcome, Submission,
    WebSearchResult,
};
