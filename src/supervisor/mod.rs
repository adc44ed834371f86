pub(crate) mod builder;
pub(crate) mod handle;
mod panic_trace;

use std::{any::Any, panic::AssertUnwindSafe};

use futures::FutureExt;
use tokio_util::sync::CancellationToken;

use crate::{
    supervisor::{builder::ForeverBuilder, handle::ForeverHandle, panic_trace::Traced},
    task::ForeverTask,
};

/// Callback invoked after every recovered fault.
pub type FaultHandler = Box<dyn FnMut() + Send + 'static>;

/// Callback invoked once the supervised loop has stopped.
pub type CompletionHandler = Box<dyn FnOnce() + Send + 'static>;

/// Runs `task` on a background Tokio task until `token` is cancelled.
///
/// Every iteration invokes `task` once. A panic or an `Err` returned by the
/// task is logged, reported to `on_fault` and the task is invoked again.
/// `on_done` fires exactly once after the loop has stopped.
///
/// Returns immediately. If `task` is `None`, or there is no Tokio runtime
/// to spawn on, an error is logged and nothing runs: `on_done` is dropped
/// without being called. Use [`ForeverBuilder`] to get a [`ForeverHandle`]
/// back instead.
pub fn run<T: ForeverTask>(
    token: CancellationToken,
    name: &str,
    task: Option<T>,
    on_fault: Option<FaultHandler>,
    on_done: impl FnOnce() + Send + 'static,
) {
    let mut builder = ForeverBuilder::new(name).with_completion_handler(on_done);
    if let Some(task) = task {
        builder = builder.with_task(task);
    }
    if let Some(on_fault) = on_fault {
        builder = builder.with_fault_handler(on_fault);
    }
    // Detached: the completion handler is the caller's join point.
    let _ = builder.build().run(token);
}

/// Summary of a finished supervised loop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ForeverReport {
    pub name: String,
    /// Number of times the task was invoked.
    pub iterations: u64,
    /// Number of invocations that panicked or returned an error.
    pub faults: u64,
}

/// A task ready to be kept alive. Built by [`ForeverBuilder`].
pub struct Forever<T: ForeverTask> {
    pub(crate) name: String,
    pub(crate) task: Option<T>,
    pub(crate) on_fault: Option<FaultHandler>,
    pub(crate) on_done: Option<CompletionHandler>,
}

impl<T: ForeverTask> Forever<T> {
    /// Shorthand for [`ForeverBuilder::new`].
    pub fn builder(name: impl Into<String>) -> ForeverBuilder<T> {
        ForeverBuilder::new(name)
    }

    /// Spawns the supervised loop, consuming `self`.
    ///
    /// Returns `None` when there is nothing to run (no task) or nowhere to
    /// run it (no Tokio runtime). The completion handler is not called in
    /// that case.
    pub fn run(self, token: CancellationToken) -> Option<ForeverHandle> {
        let Self {
            name,
            task,
            on_fault,
            on_done,
        } = self;

        let Some(task) = task else {
            tracing::error!(task = %name, "cannot run task because no task was provided");
            return None;
        };
        let Ok(runtime) = tokio::runtime::Handle::try_current() else {
            tracing::error!(task = %name, "cannot run task outside of a Tokio runtime");
            return None;
        };

        tracing::warn!(task = %name, "running task in a resilient way");
        panic_trace::install_hook();

        let loop_state = SupervisedLoop {
            name: name.clone(),
            task,
            on_fault,
            iterations: 0,
            faults: 0,
        };
        let join_handle = runtime.spawn(async move {
            let done = CompletionGuard(on_done);
            let report = loop_state.run_until_cancelled(token).await;
            drop(done);
            report
        });
        Some(ForeverHandle::new(name, join_handle))
    }
}

/// State owned by one running loop. Only the background task touches it.
struct SupervisedLoop<T: ForeverTask> {
    name: String,
    task: T,
    on_fault: Option<FaultHandler>,
    iterations: u64,
    faults: u64,
}

impl<T: ForeverTask> SupervisedLoop<T> {
    async fn run_until_cancelled(mut self, token: CancellationToken) -> ForeverReport {
        loop {
            if token.is_cancelled() {
                tracing::info!(
                    task = %self.name,
                    iterations = self.iterations,
                    "cancellation requested, stopping task"
                );
                break;
            }

            self.iterations += 1;
            tracing::info!(task = %self.name, iteration = self.iterations, "task is running");

            // The call itself goes inside the scope too: closure tasks may panic
            // before handing back a future.
            let outcome = AssertUnwindSafe(Traced::new(async {
                self.task.run(token.clone()).await
            }))
            .catch_unwind()
            .await;
            match outcome {
                Ok(Ok(())) => {}
                Ok(Err(err)) => {
                    tracing::error!(
                        task = %self.name,
                        iteration = self.iterations,
                        error = %err,
                        "task failed"
                    );
                    self.recover();
                }
                Err(payload) => {
                    tracing::error!(
                        task = %self.name,
                        iteration = self.iterations,
                        "recovered task from panic: {}",
                        panic_message(&*payload)
                    );
                    if let Some(trace) = panic_trace::take_trace() {
                        tracing::debug!(task = %self.name, "panic backtrace:\n{trace}");
                    }
                    self.recover();
                }
            }

            // A task that never suspends would otherwise hold the worker forever.
            tokio::task::yield_now().await;
        }

        ForeverReport {
            name: self.name,
            iterations: self.iterations,
            faults: self.faults,
        }
    }

    fn recover(&mut self) {
        self.faults += 1;
        let Some(on_fault) = self.on_fault.as_mut() else {
            return;
        };
        if let Err(payload) = std::panic::catch_unwind(AssertUnwindSafe(|| on_fault())) {
            tracing::error!(
                task = %self.name,
                "fault handler panicked: {}",
                panic_message(&*payload)
            );
        }
    }
}

/// Fires the completion handler when dropped, so it also runs if the
/// spawned task is aborted or dropped with the runtime.
struct CompletionGuard(Option<CompletionHandler>);

impl Drop for CompletionGuard {
    fn drop(&mut self) {
        if let Some(on_done) = self.0.take() {
            on_done();
        }
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(msg) = payload.downcast_ref::<&'static str>() {
        (*msg).to_string()
    } else if let Some(msg) = payload.downcast_ref::<String>() {
        msg.clone()
    } else {
        "unknown panic".to_string()
    }
}
