//! Cancellable polling for asynchronous processing jobs.
//!
//! A submission that comes back with a job id enters a fixed-interval
//! status loop. At most one loop is outstanding per poller: starting a new
//! poll cancels the prior handle first, so two loops can never race to
//! update the same display state.

use std::time::Duration;

use tokio::sync::oneshot;
use tokio::time::interval;
use tokio_util::sync::CancellationToken;
use tracing::{Instrument, info, info_span, warn};
use uuid::Uuid;

use crate::client::api::ApiClient;
use crate::client::types::{CheckResponse, JobStatus};

/// Terminal state of one polling loop.
#[derive(Debug)]
pub enum PollOutcome {
    Completed(Box<CheckResponse>),
    Failed(String),
    Cancelled,
}

/// Handle to one outstanding polling loop.
pub struct PollHandle {
    token: CancellationToken,
    outcome: oneshot::Receiver<PollOutcome>,
}

impl PollHandle {
    /// Stop the loop. Safe to call more than once.
    pub fn cancel(&self) {
        self.token.cancel();
    }

    pub fn is_cancelled(&self) -> bool {
        self.token.is_cancelled()
    }

    /// Wait for the loop to end. A loop whose poller was dropped or
    /// restarted resolves to `Cancelled`.
    pub async fn wait(self) -> PollOutcome {
        self.outcome.await.unwrap_or(PollOutcome::Cancelled)
    }
}

pub struct JobPoller {
    client: ApiClient,
    poll_interval: Duration,
    current: Option<CancellationToken>,
}

impl JobPoller {
    pub fn new(client: ApiClient, poll_interval: Duration) -> Self {
        Self {
            client,
            poll_interval,
            current: None,
        }
    }

    /// Start polling a job, cancelling any previously started poll first.
    pub fn start(&mut self, job_id: Uuid) -> PollHandle {
        if let Some(prior) = self.current.take() {
            prior.cancel();
        }

        let token = CancellationToken::new();
        let (tx, rx) = oneshot::channel();
        let client = self.client.clone();
        let task_token = token.clone();
        let poll_interval = self.poll_interval;

        tokio::spawn(
            async move {
                let outcome = poll_until_done(client, job_id, poll_interval, task_token).await;
                // The receiver may be gone if the handle was dropped.
                let _ = tx.send(outcome);
            }
            .instrument(info_span!("poll", job_id = %job_id)),
        );

        self.current = Some(token.clone());
        PollHandle { token, outcome: rx }
    }

    /// Cancel the outstanding poll, if any.
    pub fn cancel(&mut self) {
        if let Some(token) = self.current.take() {
            token.cancel();
        }
    }
}

impl Drop for JobPoller {
    fn drop(&mut self) {
        self.cancel();
    }
}

async fn poll_until_done(
    client: ApiClient,
    job_id: Uuid,
    poll_interval: Duration,
    token: CancellationToken,
) -> PollOutcome {
    let mut ticker = interval(poll_interval);

    loop {
        tokio::select! {
            _ = token.cancelled() => {
                info!("poll cancelled");
                return PollOutcome::Cancelled;
            }
            _ = ticker.tick() => {
                match client.job_status(job_id).await {
                    Ok(JobStatus::Processing) => {}
                    Ok(JobStatus::Completed { result }) => {
                        info!("job completed");
                        return PollOutcome::Completed(result);
                    }
                    Ok(JobStatus::Error { detail }) => {
                        let detail = if detail.is_empty() {
                            "processing failed".to_string()
                        } else {
                            detail
                        };
                        return PollOutcome::Failed(detail);
                    }
                    Err(e) if e.should_retry() => {
                        warn!("status request failed, will retry: {}", e);
                    }
                    Err(e) => return PollOutcome::Failed(e.to_string()),
                }
            }
        }
    }
}
