use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use task_forever::{ForeverTask, TaskResult};
use tokio_util::sync::CancellationToken;

/// Increments its counter and returns straight away.
#[allow(unused)]
#[derive(Clone)]
pub struct CountingTask {
    pub run_count: Arc<AtomicUsize>,
}

impl ForeverTask for CountingTask {
    async fn run(&mut self, _token: CancellationToken) -> TaskResult {
        self.run_count.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

/// Sleeps for `delay` without looking at the token.
#[allow(unused)]
#[derive(Clone)]
pub struct SleepyTask {
    pub delay: Duration,
    pub started: Arc<AtomicUsize>,
    pub finished: Arc<AtomicUsize>,
}

impl ForeverTask for SleepyTask {
    async fn run(&mut self, _token: CancellationToken) -> TaskResult {
        self.started.fetch_add(1, Ordering::SeqCst);
        tokio::time::sleep(self.delay).await;
        self.finished.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

/// Panics on every invocation, cancelling `token` on the `cancel_after`-th one.
#[allow(unused)]
#[derive(Clone)]
pub struct PanickingTask {
    pub run_count: Arc<AtomicUsize>,
    pub cancel_after: usize,
    pub token: CancellationToken,
}

impl ForeverTask for PanickingTask {
    async fn run(&mut self, _token: CancellationToken) -> TaskResult {
        let run = self.run_count.fetch_add(1, Ordering::SeqCst) + 1;
        if run == self.cancel_after {
            self.token.cancel();
        }
        panic!("panicking task, run {run}");
    }
}

/// Returns an error on every invocation, cancelling `token` on the
/// `cancel_after`-th one.
#[allow(unused)]
#[derive(Clone)]
pub struct FailingTask {
    pub run_count: Arc<AtomicUsize>,
    pub cancel_after: usize,
    pub token: CancellationToken,
}

impl ForeverTask for FailingTask {
    async fn run(&mut self, _token: CancellationToken) -> TaskResult {
        let run = self.run_count.fetch_add(1, Ordering::SeqCst) + 1;
        if run == self.cancel_after {
            self.token.cancel();
        }
        Err(format!("failing task, run {run}").into())
    }
}

/// Returns a completion handler that bumps the returned counter.
#[allow(unused)]
pub fn counting_completion() -> (Arc<AtomicUsize>, impl FnOnce() + Send + 'static) {
    let count = Arc::new(AtomicUsize::new(0));
    let handler_count = count.clone();
    (count, move || {
        handler_count.fetch_add(1, Ordering::SeqCst);
    })
}

/// Returns a fault handler that bumps the returned counter.
#[allow(unused)]
pub fn counting_fault_handler() -> (Arc<AtomicUsize>, impl FnMut() + Send + 'static) {
    let count = Arc::new(AtomicUsize::new(0));
    let handler_count = count.clone();
    (count, move || {
        handler_count.fetch_add(1, Ordering::SeqCst);
    })
}
