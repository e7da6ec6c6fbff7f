//! Cancellation shared by every async task a component starts.
//!
//! A token is cheap to clone (Rc). Futures run through [`CancellationToken::run`]
//! are wrapped in `Abortable`; cancelling the token aborts all of them and
//! every later `run` resolves to `Cancelled` straight away.

use std::cell::RefCell;
use std::collections::HashMap;
use std::future::Future;
use std::rc::Rc;

use futures::future::{AbortHandle, Abortable};
use pharmacy_types::{PharmacyError, Result};

#[derive(Clone, Default)]
pub struct CancellationToken {
    inner: Rc<RefCell<TokenState>>,
}

#[derive(Default)]
struct TokenState {
    cancelled: bool,
    next_key: u64,
    handles: HashMap<u64, AbortHandle>,
}

impl CancellationToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        let handles: Vec<AbortHandle> = {
            let mut state = self.inner.borrow_mut();
            state.cancelled = true;
            state.handles.drain().map(|(_, h)| h).collect()
        };
        for handle in handles {
            handle.abort();
        }
    }

    pub fn is_cancelled(&self) -> bool {
        self.inner.borrow().cancelled
    }

    /// Number of futures currently registered with this token.
    pub fn in_flight(&self) -> usize {
        self.inner.borrow().handles.len()
    }

    /// Drive `fut` to completion unless the token is cancelled first.
    pub async fn run<F: Future>(&self, fut: F) -> Result<F::Output> {
        let (handle, registration) = AbortHandle::new_pair();
        let key = {
            let mut state = self.inner.borrow_mut();
            if state.cancelled {
                return Err(PharmacyError::Cancelled);
            }
            let key = state.next_key;
            state.next_key += 1;
            state.handles.insert(key, handle);
            key
        };

        let outcome = Abortable::new(fut, registration).await;
        self.inner.borrow_mut().handles.remove(&key);
        outcome.map_err(|_| PharmacyError::Cancelled)
    }
}
