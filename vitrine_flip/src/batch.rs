// Copyright 2025 the Vitrine Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Completion handles for groups of animations started together.

use alloc::boxed::Box;
use alloc::rc::Rc;
use core::cell::RefCell;
use core::fmt;
use core::future::Future;
use core::pin::Pin;
use core::task::{Context, Poll, Waker};

/// Summary delivered when a batch settles.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct BatchReport {
    /// Animations started in the batch.
    pub started: usize,
    /// Animations that ran to their natural end.
    pub finished: usize,
    /// Animations cut short by cancellation or supersession. They still
    /// ended at their final target.
    pub canceled: usize,
}

/// How one animation in a batch ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Outcome {
    Finished,
    Canceled,
}

type Callback = Box<dyn FnOnce(BatchReport)>;

struct BatchState {
    pending: usize,
    armed: bool,
    report: BatchReport,
    settled: bool,
    waker: Option<Waker>,
    on_complete: Option<Callback>,
}

/// Handle to a group of animations started by one engine call.
///
/// The batch settles exactly once, after every animation in it has finished
/// or been canceled; a batch that started nothing settles immediately. On
/// settling, the `on_complete` callback (if any) runs and the handle resolves
/// as a [`Future`] with the [`BatchReport`]. Handles are cheap to clone and all
/// clones observe the same batch.
#[derive(Clone)]
pub struct Batch {
    state: Rc<RefCell<BatchState>>,
}

impl fmt::Debug for Batch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.state.borrow();
        f.debug_struct("Batch")
            .field("pending", &state.pending)
            .field("armed", &state.armed)
            .field("settled", &state.settled)
            .field("report", &state.report)
            .finish_non_exhaustive()
    }
}

impl Batch {
    /// A batch that has not been armed yet; it cannot settle until
    /// [`Batch::arm`] is called, even with nothing pending.
    pub(crate) fn pending(on_complete: Option<Callback>) -> Self {
        Self {
            state: Rc::new(RefCell::new(BatchState {
                pending: 0,
                armed: false,
                report: BatchReport::default(),
                settled: false,
                waker: None,
                on_complete,
            })),
        }
    }

    /// Counts one more animation in this batch.
    pub(crate) fn track(&self) {
        let mut state = self.state.borrow_mut();
        state.pending += 1;
        state.report.started += 1;
    }

    /// Marks the batch as fully populated, settling it if nothing is pending.
    pub(crate) fn arm(&self) {
        self.state.borrow_mut().armed = true;
        self.try_settle();
    }

    /// Records the end of one tracked animation.
    pub(crate) fn record(&self, outcome: Outcome) {
        {
            let mut state = self.state.borrow_mut();
            state.pending = state.pending.saturating_sub(1);
            match outcome {
                Outcome::Finished => state.report.finished += 1,
                Outcome::Canceled => state.report.canceled += 1,
            }
        }
        self.try_settle();
    }

    fn try_settle(&self) {
        let (callback, waker, report) = {
            let mut state = self.state.borrow_mut();
            if state.settled || !state.armed || state.pending > 0 {
                return;
            }
            state.settled = true;
            (state.on_complete.take(), state.waker.take(), state.report)
        };
        // Run outside the borrow so callbacks may inspect this batch.
        if let Some(callback) = callback {
            callback(report);
        }
        if let Some(waker) = waker {
            waker.wake();
        }
    }

    /// Returns `true` once every animation in the batch has ended.
    #[must_use]
    pub fn is_settled(&self) -> bool {
        self.state.borrow().settled
    }

    /// The final report, once settled.
    #[must_use]
    pub fn report(&self) -> Option<BatchReport> {
        let state = self.state.borrow();
        state.settled.then_some(state.report)
    }

    /// Animations still running.
    #[must_use]
    pub fn pending_count(&self) -> usize {
        self.state.borrow().pending
    }
}

impl Future for Batch {
    type Output = BatchReport;

    fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        let mut state = self.state.borrow_mut();
        if state.settled {
            Poll::Ready(state.report)
        } else {
            state.waker = Some(cx.waker().clone());
            Poll::Pending
        }
    }
}

#[cfg(test)]
mod tests {
    use alloc::boxed::Box;
    use alloc::rc::Rc;
    use core::cell::Cell;

    use super::{Batch, Outcome};

    #[test]
    fn empty_armed_batch_settles_immediately_once() {
        let calls = Rc::new(Cell::new(0));
        let seen = calls.clone();
        let batch = Batch::pending(Some(Box::new(move |_| seen.set(seen.get() + 1))));
        assert!(!batch.is_settled());
        batch.arm();
        batch.arm();
        assert!(batch.is_settled());
        assert_eq!(calls.get(), 1);
        assert_eq!(batch.report().map(|r| r.started), Some(0));
    }

    #[test]
    fn settles_after_last_animation() {
        let batch = Batch::pending(None);
        batch.track();
        batch.track();
        batch.arm();
        batch.record(Outcome::Finished);
        assert!(!batch.is_settled());
        assert_eq!(batch.pending_count(), 1);
        batch.record(Outcome::Canceled);
        let report = batch.report().unwrap();
        assert_eq!((report.started, report.finished, report.canceled), (2, 1, 1));
    }
}
