use std::cell::{
  Cell,
  RefCell
};
use std::future::Future;
use std::rc::Rc;

use futures::future::{
  AbortHandle,
  abortable
};
use thiserror::Error;
use tracing::debug;

/// The request was started under a scope
/// that has since been aborted, so its
/// response was dropped.
#[derive(
  Debug, Clone, Copy, Error, PartialEq, Eq,
)]
#[error("response dropped after navigation")]
pub struct Aborted;

#[derive(Debug, Default)]
struct ScopeInner {
  aborted: Cell<bool>,
  handles: RefCell<Vec<AbortHandle>>
}

/// Lifetime of the responses wanted by one
/// tab activation. Aborting the scope drops
/// every future it guards, so a late
/// response never reaches a view that is
/// no longer shown. The request itself is
/// not cancelled on the wire; the backend
/// still sees it.
#[derive(Debug, Clone, Default)]
pub struct RequestScope {
  inner: Rc<ScopeInner>
}

impl RequestScope {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn guard<F>(
    &self,
    future: F
  ) -> impl Future<
    Output = Result<F::Output, Aborted>,
  > + use<F>
  where
    F: Future
  {
    let (guarded, handle) =
      abortable(future);
    if self.inner.aborted.get() {
      handle.abort();
    } else {
      let mut handles =
        self.inner.handles.borrow_mut();
      handles.retain(|h| !h.is_aborted());
      handles.push(handle);
    }

    async move {
      guarded.await.map_err(|_| Aborted)
    }
  }

  pub fn abort_all(&self) {
    self.inner.aborted.set(true);
    let handles = std::mem::take(
      &mut *self.inner.handles.borrow_mut()
    );
    debug!(
      guarded = handles.len(),
      "aborting request scope"
    );
    for handle in handles {
      handle.abort();
    }
  }

  pub fn is_aborted(&self) -> bool {
    self.inner.aborted.get()
  }
}
