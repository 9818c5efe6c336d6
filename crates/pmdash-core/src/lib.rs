//! Presentation core of the project
//! dashboard: state, tabs, the modal and
//! toast presenter, the REST client and one
//! view model per tab. Nothing here knows
//! about a UI toolkit.

pub mod api;
pub mod badges;
pub mod config;
pub mod error;
pub mod format;
pub mod presenter;
pub mod scope;
pub mod state;
pub mod tabs;
pub mod views;

pub use api::{
  ApiClient,
  ApiRequest,
  ApiResponse,
  HttpBackend,
  Method,
  TransportError
};
pub use config::DashboardConfig;
pub use error::{
  ApiError,
  Failure,
  FailureExt,
  InputError,
  TabError
};
pub use presenter::{
  Modal,
  ModalSlot,
  Notice,
  ToastKind,
  ToastStack
};
pub use scope::{
  Aborted,
  RequestScope
};
pub use state::{
  AppAction,
  AppState,
  Settings,
  Theme
};
pub use tabs::{
  Tab,
  TabController,
  TabSwitch
};
