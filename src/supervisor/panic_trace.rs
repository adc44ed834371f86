//! Backtraces captured at the panic site.
//!
//! By the time `catch_unwind` returns, the frames that panicked are gone. A
//! process-wide hook, installed once and chained in front of the previous
//! hook, records a backtrace into a thread-local while the task is still on
//! the stack. Only panics raised inside [`Traced::poll`] are recorded.

use std::{
    backtrace::Backtrace,
    cell::{Cell, RefCell},
    future::Future,
    pin::Pin,
    sync::Once,
    task::{Context, Poll},
};

thread_local! {
    static ARMED: Cell<bool> = const { Cell::new(false) };
    static LAST_TRACE: RefCell<Option<Backtrace>> = const { RefCell::new(None) };
}

static INSTALL_HOOK: Once = Once::new();

/// Installs the capturing hook. Idempotent.
pub(crate) fn install_hook() {
    INSTALL_HOOK.call_once(|| {
        let previous = std::panic::take_hook();
        std::panic::set_hook(Box::new(move |info| {
            if ARMED.with(Cell::get) {
                let trace = Backtrace::force_capture();
                LAST_TRACE.with(|slot| *slot.borrow_mut() = Some(trace));
            }
            previous(info);
        }));
    });
}

/// Returns the backtrace of the last panic raised inside a [`Traced`] future
/// on this thread.
pub(crate) fn take_trace() -> Option<Backtrace> {
    LAST_TRACE.with(|slot| slot.borrow_mut().take())
}

/// Wraps a future so that panics raised while polling it are traced.
pub(crate) struct Traced<F> {
    inner: Pin<Box<F>>,
}

impl<F> Traced<F> {
    pub(crate) fn new(inner: F) -> Self {
        Self {
            inner: Box::pin(inner),
        }
    }
}

/// Disarms on drop, including while unwinding out of `poll`.
struct ArmedGuard(bool);

impl ArmedGuard {
    fn arm() -> Self {
        Self(ARMED.with(|armed| armed.replace(true)))
    }
}

impl Drop for ArmedGuard {
    fn drop(&mut self) {
        ARMED.with(|armed| armed.set(self.0));
    }
}

impl<F: Future> Future for Traced<F> {
    type Output = F::Output;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        let _armed = ArmedGuard::arm();
        self.inner.as_mut().poll(cx)
    }
}
