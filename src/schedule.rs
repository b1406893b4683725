use std::cell::Cell;
use std::rc::Rc;

use gloo_timers::callback::Timeout;
use web_sys::js_sys::Date;

/// Runs deferred work. Every task is owned by the [`Scheduled`] handle it returns.
pub trait Scheduler {
    fn now_ms(&self) -> f64;
    fn schedule(&self, delay_ms: u32, task: Box<dyn FnOnce()>) -> Scheduled;
}

/// A pending task. Dropping the handle before the task ran cancels it.
///
/// A task must not drop its own handle while it runs.
pub struct Scheduled {
    fired: Rc<Cell<bool>>,
    cancel: Option<Box<dyn FnOnce()>>,
}

impl Scheduled {
    /// Wraps `task` so that running it marks the returned flag as fired.
    pub fn track(task: Box<dyn FnOnce()>) -> (Rc<Cell<bool>>, impl FnOnce()) {
        let fired = Rc::new(Cell::new(false));
        let flag = fired.clone();
        (fired, move || {
            flag.set(true);
            task();
        })
    }

    pub fn new(fired: Rc<Cell<bool>>, cancel: impl FnOnce() + 'static) -> Self {
        Self {
            fired,
            cancel: Some(Box::new(cancel)),
        }
    }

    pub fn is_pending(&self) -> bool {
        !self.fired.get()
    }
}

impl Drop for Scheduled {
    fn drop(&mut self) {
        if let Some(cancel) = self.cancel.take() {
            if self.is_pending() {
                cancel();
            }
        }
    }
}

/// Browser timers via `setTimeout`.
#[derive(Clone, Copy, Debug, Default)]
pub struct TimeoutScheduler;

impl Scheduler for TimeoutScheduler {
    fn now_ms(&self) -> f64 {
        Date::now()
    }

    fn schedule(&self, delay_ms: u32, task: Box<dyn FnOnce()>) -> Scheduled {
        let (fired, task) = Scheduled::track(task);
        let timeout = Timeout::new(delay_ms, task);
        Scheduled::new(fired, move || {
            let _ = timeout.cancel();
        })
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;

    use super::*;
    use crate::testing::ManualScheduler;

    #[test]
    fn runs_task_once_its_delay_elapsed() {
        let scheduler = ManualScheduler::new();
        let ran = Rc::new(Cell::new(false));
        let flag = ran.clone();
        let handle = scheduler.schedule(60, Box::new(move || flag.set(true)));

        scheduler.advance(59);
        assert!(!ran.get());
        assert!(handle.is_pending());

        scheduler.advance(1);
        assert!(ran.get());
        assert!(!handle.is_pending());
    }

    #[test]
    fn dropping_the_handle_cancels_the_task() {
        let scheduler = ManualScheduler::new();
        let ran = Rc::new(Cell::new(false));
        let flag = ran.clone();
        let handle = scheduler.schedule(500, Box::new(move || flag.set(true)));

        drop(handle);
        scheduler.advance(1_000);
        assert!(!ran.get());
        assert_eq!(scheduler.pending(), 0);
    }

    #[test]
    fn tasks_run_in_due_order() {
        let scheduler = ManualScheduler::new();
        let order = Rc::new(RefCell::new(Vec::new()));
        let late = order.clone();
        let early = order.clone();
        let _a = scheduler.schedule(500, Box::new(move || late.borrow_mut().push("late")));
        let _b = scheduler.schedule(60, Box::new(move || early.borrow_mut().push("early")));

        scheduler.advance(600);
        assert_eq!(*order.borrow(), vec!["early", "late"]);
        assert_eq!(scheduler.now_ms(), 600.0);
    }
}
