use std::cell::RefCell;
use std::future::Future;
use std::rc::Rc;

use gloo::timers::future::TimeoutFuture;
use pmdash_core::presenter::TOAST_LIFETIME_MS;
use pmdash_core::views::panels::Panels;
use pmdash_core::{
  Aborted,
  ApiClient,
  AppAction,
  AppState,
  DashboardConfig,
  Failure,
  Modal,
  ModalSlot,
  Notice,
  RequestScope,
  ToastStack
};
use tracing::debug;
use yew::functional::UseForceUpdateHandle;

use super::forms::Forms;
use super::loaders;
use crate::api::GlooBackend;

/// Session-long state behind the app.
pub struct Shared {
  pub client: ApiClient<GlooBackend>,
  pub config: DashboardConfig,
  pub state:  RefCell<AppState>,
  pub panels: RefCell<Panels>,
  pub forms:  RefCell<Forms>,
  pub toasts: RefCell<ToastStack>,
  pub modal:  RefCell<ModalSlot<Modal>>
}

impl Shared {
  pub fn new(config: DashboardConfig) -> Self {
    Self {
      client: ApiClient::new(
        GlooBackend,
        &config
      ),
      config,
      state: RefCell::new(AppState::new()),
      panels: RefCell::default(),
      forms: RefCell::default(),
      toasts: RefCell::default(),
      modal: RefCell::default()
    }
  }
}

/// Cheap handle passed to every handler.
#[derive(Clone)]
pub struct Ui {
  pub shared: Rc<Shared>,
  redraw:     UseForceUpdateHandle
}

impl Ui {
  pub fn new(
    shared: Rc<Shared>,
    redraw: UseForceUpdateHandle
  ) -> Self {
    Self { shared, redraw }
  }

  pub fn redraw(&self) {
    self.redraw.force_update();
  }

  pub fn notify(&self, notice: Notice) {
    let id = self
      .shared
      .toasts
      .borrow_mut()
      .push(notice);
    self.redraw();

    let ui = self.clone();
    wasm_bindgen_futures::spawn_local(
      async move {
        TimeoutFuture::new(
          TOAST_LIFETIME_MS
        )
        .await;
        ui.shared
          .toasts
          .borrow_mut()
          .dismiss(id);
        ui.redraw();
      }
    );
  }

  pub fn fail(&self, failure: &Failure) {
    if let Some(notice) = failure.notice() {
      self.notify(notice);
    }
  }

  pub fn show_modal(&self, modal: Modal) {
    if let Some(replaced) =
      self.shared.modal.borrow_mut().show(modal)
    {
      debug!(replaced = replaced.title(), "modal replaced");
    }
    self.redraw();
  }

  pub fn close_modal(&self) {
    self.shared.modal.borrow_mut().close();
    self.redraw();
  }

  pub fn selected_project(
    &self
  ) -> Option<String> {
    self
      .shared
      .state
      .borrow()
      .selected_project()
      .map(str::to_string)
  }

  /// Applies `action` and runs the loader
  /// of the tab it switched to, if any.
  pub fn dispatch(&self, action: AppAction) {
    let switch = self
      .shared
      .state
      .borrow_mut()
      .apply(action);
    if let Some(switch) = switch {
      loaders::tab_loaders(self)
        .dispatch(&switch);
    }
    self.redraw();
  }

  /// Runs a read whose result only matters
  /// to the active tab. It reaches `apply`
  /// only if that tab is still the one it
  /// was started for; failures become
  /// toasts.
  pub fn run<T, Fut, A>(
    &self,
    request: impl FnOnce(Rc<Shared>) -> Fut,
    apply: A
  ) where
    T: 'static,
    Fut: Future<Output = Result<T, Failure>>
      + 'static,
    A: FnOnce(&Ui, T) + 'static
  {
    let scope = self
      .shared
      .state
      .borrow()
      .tabs()
      .current()
      .scope;
    self.run_in(scope, request, apply);
  }

  /// Runs startup or a write. Its outcome
  /// is applied and toasted whatever tab is
  /// shown by the time it returns.
  pub fn run_session<T, Fut, A>(
    &self,
    request: impl FnOnce(Rc<Shared>) -> Fut,
    apply: A
  ) where
    T: 'static,
    Fut: Future<Output = Result<T, Failure>>
      + 'static,
    A: FnOnce(&Ui, T) + 'static
  {
    let scope = self
      .shared
      .state
      .borrow()
      .session_scope()
      .clone();
    self.run_in(scope, request, apply);
  }

  fn run_in<T, Fut, A>(
    &self,
    scope: RequestScope,
    request: impl FnOnce(Rc<Shared>) -> Fut,
    apply: A
  ) where
    T: 'static,
    Fut: Future<Output = Result<T, Failure>>
      + 'static,
    A: FnOnce(&Ui, T) + 'static
  {
    let guarded = scope
      .guard(request(self.shared.clone()));

    let ui = self.clone();
    wasm_bindgen_futures::spawn_local(
      async move {
        match guarded.await {
          | Err(Aborted) => {
            debug!("response dropped after navigation");
          }
          | Ok(Ok(value)) => {
            apply(&ui, value);
            ui.redraw();
          }
          | Ok(Err(failure)) => {
            ui.fail(&failure)
          }
        }
      }
    );
  }
}
