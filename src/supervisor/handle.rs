use thiserror::Error;
use tokio::task::{JoinError, JoinHandle};

use crate::supervisor::ForeverReport;

#[derive(Debug, Error)]
pub enum ForeverHandleError {
    #[error("supervised loop did not finish: {0}")]
    Join(#[from] JoinError),
}

/// Handle to a running supervised loop.
///
/// Dropping the handle detaches the loop; it keeps running until its
/// token is cancelled.
#[derive(Debug)]
pub struct ForeverHandle {
    name: String,
    join_handle: JoinHandle<ForeverReport>,
}

impl ForeverHandle {
    pub(crate) fn new(name: String, join_handle: JoinHandle<ForeverReport>) -> Self {
        Self { name, join_handle }
    }

    /// The name the loop was started with.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns `true` once the loop has stopped and the completion handler ran.
    pub fn is_finished(&self) -> bool {
        self.join_handle.is_finished()
    }

    /// Waits for the loop to stop after its token is cancelled.
    pub async fn wait(self) -> Result<ForeverReport, ForeverHandleError> {
        Ok(self.join_handle.await?)
    }
}
