use std::future::Future;

use tokio_util::sync::CancellationToken;

/// Error returned by a failed invocation. `anyhow::Error` and any
/// `std::error::Error + Send + Sync` convert into it with `?` or `.into()`.
pub type TaskError = Box<dyn std::error::Error + Send + Sync + 'static>;

pub type TaskResult = Result<(), TaskError>;

/// The trait users implement for work kept alive by [`Forever`](crate::Forever).
///
/// # Invocation semantics
///
/// The same instance is invoked over and over, one invocation at a time.
/// Unlike a restart-from-clone model, mutations via `&mut self` survive
/// from one invocation to the next, including invocations that panicked.
/// If a panic can leave `self` half-updated, the task has to repair its
/// own state at the start of the next call.
///
/// Returning `Err` and panicking are both treated as a fault: the loop logs
/// it, notifies the fault handler and invokes the task again.
///
/// The token is checked before every invocation, never during one. A task
/// that runs for a long time should watch `token` itself and return early.
///
/// # Example
///
/// ```rust
/// use task_forever::{ForeverTask, TaskResult};
/// use tokio_util::sync::CancellationToken;
///
/// struct Poller {
///     polls: u64,
/// }
///
/// impl ForeverTask for Poller {
///     async fn run(&mut self, token: CancellationToken) -> TaskResult {
///         tokio::select! {
///             _ = token.cancelled() => {}
///             _ = tokio::time::sleep(std::time::Duration::from_secs(1)) => {
///                 self.polls += 1;
///             }
///         }
///         Ok(())
///     }
/// }
/// ```
pub trait ForeverTask: Send + 'static {
    /// Runs one iteration of the task.
    fn run(&mut self, token: CancellationToken) -> impl Future<Output = TaskResult> + Send;
}

/// Closure-backed task.
///
/// Wraps `F: FnMut(CancellationToken) -> Fut`, producing a fresh future per
/// invocation. State shared between invocations has to live in the closure
/// captures (usually behind an `Arc`).
#[derive(Debug, Clone)]
pub struct TaskFn<F> {
    f: F,
}

impl<F> TaskFn<F> {
    pub fn new(f: F) -> Self {
        Self { f }
    }
}

impl<F, Fut> ForeverTask for TaskFn<F>
where
    F: FnMut(CancellationToken) -> Fut + Send + 'static,
    Fut: Future<Output = TaskResult> + Send,
{
    fn run(&mut self, token: CancellationToken) -> impl Future<Output = TaskResult> + Send {
        (self.f)(token)
    }
}

/// Shorthand for [`TaskFn::new`].
pub fn task_fn<F, Fut>(f: F) -> TaskFn<F>
where
    F: FnMut(CancellationToken) -> Fut + Send + 'static,
    Fut: Future<Output = TaskResult> + Send,
{
    TaskFn::new(f)
}
