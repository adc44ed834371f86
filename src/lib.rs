//! # task-forever
//!
//! `task-forever` keeps a Tokio task running until you tell it to stop.
//! The task is invoked in a loop on a background task; if an invocation panics
//! or returns an error, the fault is logged and the task is simply invoked again.
//! Cancelling the `CancellationToken` ends the loop and fires a completion callback.
//!
//! ## Quick example
//!
//! ```rust,no_run
//! use task_forever::{task_fn, TaskResult};
//! use tokio_util::sync::CancellationToken;
//!
//! #[tokio::main]
//! async fn main() {
//!     let token = CancellationToken::new();
//!     let (done_tx, done_rx) = tokio::sync::oneshot::channel();
//!
//!     task_forever::run(
//!         token.clone(),
//!         "printer",
//!         Some(task_fn(|_token| async {
//!             println!("hello");
//!             tokio::time::sleep(std::time::Duration::from_secs(1)).await;
//!             TaskResult::Ok(())
//!         })),
//!         Some(Box::new(|| eprintln!("printer crashed, running it again"))),
//!         move || {
//!             let _ = done_tx.send(());
//!         },
//!     );
//!
//!     tokio::signal::ctrl_c().await.unwrap();
//!     token.cancel();
//!     let _ = done_rx.await;
//! }
//! ```
//!
//! ## What you get
//!
//! * **Fault isolation** – a panic or `Err` ends one invocation, never the loop.
//! * **Cooperative cancellation** – the token is checked before every invocation.
//! * **Exactly-once completion** – the completion callback fires once the loop stopped.
//! * **Config helpers** – typed environment accessors and a YAML loader in [`config`].
//!
//! Diagnostics are emitted through `tracing`; install a subscriber to see them.
//! Panics are only recovered when built with `panic = "unwind"` (the default).

pub use supervisor::{
    builder::ForeverBuilder,
    handle::{ForeverHandle, ForeverHandleError},
    run, CompletionHandler, FaultHandler, Forever, ForeverReport,
};
pub use task::{task_fn, ForeverTask, TaskError, TaskFn, TaskResult};

pub mod config;
mod supervisor;
mod task;
