use crate::{
    supervisor::{CompletionHandler, FaultHandler, Forever},
    task::ForeverTask,
};

/// Builds a [`Forever`] instance.
///
/// The task itself is optional here so that a missing task is reported
/// when the loop is started, the same way [`run`](crate::run) reports it.
pub struct ForeverBuilder<T: ForeverTask> {
    name: String,
    task: Option<T>,
    on_fault: Option<FaultHandler>,
    on_done: Option<CompletionHandler>,
}

impl<T: ForeverTask> ForeverBuilder<T> {
    /// Creates a new builder. `name` only shows up in diagnostics.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            task: None,
            on_fault: None,
            on_done: None,
        }
    }

    /// Sets the task to keep alive.
    pub fn with_task(mut self, task: T) -> Self {
        self.task = Some(task);
        self
    }

    /// Sets the callback invoked after each recovered panic or error.
    pub fn with_fault_handler(mut self, on_fault: impl FnMut() + Send + 'static) -> Self {
        self.on_fault = Some(Box::new(on_fault));
        self
    }

    /// Sets the callback invoked once the loop has stopped.
    pub fn with_completion_handler(mut self, on_done: impl FnOnce() + Send + 'static) -> Self {
        self.on_done = Some(Box::new(on_done));
        self
    }

    /// Constructs the [`Forever`] with the configured settings.
    pub fn build(self) -> Forever<T> {
        Forever {
            name: self.name,
            task: self.task,
            on_fault: self.on_fault,
            on_done: self.on_done,
        }
    }
}
