//! Status feed from background tasks to the frame loop.
//!
//! Chat replies and the upload simulator run as spawned futures and never
//! touch the UI directly. They push [`AppEvent`]s here and the app drains
//! the queue at the top of every frame.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

use pharmacy_types::event::AppEvent;

/// Single-threaded queue of [`AppEvent`]s. Clones share one queue.
#[derive(Clone, Default)]
pub struct EventBus {
    queue: Rc<RefCell<VecDeque<AppEvent>>>,
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn emit(&self, event: AppEvent) {
        log::trace!("event: {:?}", event);
        self.queue.borrow_mut().push_back(event);
    }

    /// Everything emitted since the last drain, oldest first.
    pub fn drain(&self) -> Vec<AppEvent> {
        self.queue.borrow_mut().drain(..).collect()
    }
}
