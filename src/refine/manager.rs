use tokio::sync::mpsc;

use crate::refine::{
    client::RefineClient,
    types::{FinishedJob, RefineError, RefineJob, RefineOutcome},
};

/// Runs refinement jobs on a background task.
///
/// Jobs go in through one channel and outcomes come back through another, so
/// the owner never blocks while the model is working.
pub struct RefineManager {
    /// Channel for sending refinement jobs.
    request_tx: mpsc::UnboundedSender<RefineJob>,
    /// Completed jobs, in submission order.
    outcome_rx: mpsc::UnboundedReceiver<FinishedJob>,
}

impl RefineManager {
    /// Create a new refinement manager.
    ///
    /// This spawns a background task that processes jobs one at a time.
    ///
    /// # Arguments
    /// * `runtime_handle` - Tokio runtime handle for spawning async tasks
    /// * `client` - Client used for every job
    pub fn new(runtime_handle: &tokio::runtime::Handle, client: RefineClient) -> Self {
        let (request_tx, mut request_rx) = mpsc::unbounded_channel::<RefineJob>();
        let (outcome_tx, outcome_rx) = mpsc::unbounded_channel::<FinishedJob>();

        runtime_handle.spawn(async move {
            while let Some(job) = request_rx.recv().await {
                log::debug!("Processing refinement job {}: style={}", job.id, job.style);

                let outcome = match client
                    .refine(&job.image, &job.style, job.details.as_deref())
                    .await
                {
                    Ok(image) => {
                        log::info!("Refinement successful ({})", job.style);
                        RefineOutcome::Success {
                            image,
                            style: job.style,
                        }
                    }
                    Err(e) => {
                        let error_message = e.to_string();
                        log::error!("Refinement failed: {}", error_message);
                        RefineOutcome::Failed(error_message)
                    }
                };

                let finished = FinishedJob {
                    id: job.id,
                    outcome,
                };
                if outcome_tx.send(finished).is_err() {
                    log::debug!("Refinement outcome dropped; manager is gone");
                    break;
                }
            }
        });

        Self {
            request_tx,
            outcome_rx,
        }
    }

    /// Queue a refinement job.
    ///
    /// This is non-blocking and returns immediately.
    pub fn request_refine(&self, job: RefineJob) -> Result<(), RefineError> {
        self.request_tx
            .send(job)
            .map_err(|_| RefineError::ManagerUnavailable)
    }

    /// Try to get a finished outcome without waiting.
    pub fn try_take_outcome(&mut self) -> Option<FinishedJob> {
        self.outcome_rx.try_recv().ok()
    }

    /// Wait for the next finished outcome. Returns `None` once the worker has
    /// stopped.
    pub async fn next_outcome(&mut self) -> Option<FinishedJob> {
        self.outcome_rx.recv().await
    }
}

#[cfg(test)]
impl RefineManager {
    pub(crate) fn with_closed_channel_for_test() -> Self {
        let (tx, rx) = mpsc::unbounded_channel::<RefineJob>();
        drop(rx);
        let (_outcome_tx, outcome_rx) = mpsc::unbounded_channel::<FinishedJob>();
        Self {
            request_tx: tx,
            outcome_rx,
        }
    }
}
