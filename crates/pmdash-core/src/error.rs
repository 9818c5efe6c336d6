use thiserror::Error;

use crate::api::Method;

/// Failure of a single REST call.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ApiError {
  #[error(
    "{method} {path} failed: {message}"
  )]
  Transport {
    method:  Method,
    path:    String,
    message: String
  },
  #[error(
    "{method} {path} returned HTTP \
     {status}{}",
    .detail
      .as_deref()
      .map(|d| format!(": {d}"))
      .unwrap_or_default()
  )]
  Status {
    method: Method,
    path:   String,
    status: u16,
    detail: Option<String>
  },
  #[error(
    "unexpected payload from {path}: \
     {message}"
  )]
  Decode {
    path:    String,
    message: String
  },
  /// A 2xx response whose body carries
  /// an `error` field.
  #[error("{path} rejected: {message}")]
  Rejected {
    path:    String,
    message: String
  }
}

impl ApiError {
  pub fn status(&self) -> Option<u16> {
    match self {
      | ApiError::Status {
        status,
        ..
      } => Some(*status),
      | _ => None
    }
  }

  /// Message the backend attached to the
  /// failure, if any.
  pub fn server_message(
    &self
  ) -> Option<&str> {
    match self {
      | ApiError::Status {
        detail,
        ..
      } => detail.as_deref(),
      | ApiError::Rejected {
        message,
        ..
      } => Some(message),
      | _ => None
    }
  }
}

/// A required form field was left empty,
/// or the record a form refers to is gone.
#[derive(
  Debug, Clone, Error, PartialEq, Eq,
)]
pub enum InputError {
  #[error("{0}")]
  Missing(&'static str),
  #[error("{0}")]
  NotFound(&'static str)
}

#[derive(
  Debug, Clone, Error, PartialEq, Eq,
)]
pub enum TabError {
  #[error("no tab named '{0}'")]
  NotFound(String)
}

#[derive(Debug, Error)]
pub enum ConfigError {
  #[error("invalid config: {0}")]
  Parse(#[from] toml::de::Error),
  #[error(
    "api_base must be an http(s) URL, \
     got '{0}'"
  )]
  InvalidBase(String)
}

#[derive(Debug, Clone, Error, PartialEq)]
pub enum FailureCause {
  #[error(transparent)]
  Api(#[from] ApiError),
  #[error(transparent)]
  Input(#[from] InputError)
}

/// How a failure reaches the user.
#[derive(
  Debug, Clone, Copy, PartialEq, Eq,
)]
pub enum Surface {
  Toast,
  LogOnly
}

/// A view-module operation that did not
/// complete: the user-facing message plus
/// the structured cause for the log.
#[derive(Debug, Clone, Error, PartialEq)]
#[error("{message}")]
pub struct Failure {
  pub message: String,
  pub surface: Surface,
  #[source]
  pub cause:   FailureCause
}

impl Failure {
  pub fn toast(
    message: impl Into<String>,
    cause: impl Into<FailureCause>
  ) -> Self {
    Self {
      message: message.into(),
      surface: Surface::Toast,
      cause:   cause.into()
    }
  }

  pub fn log_only(
    message: impl Into<String>,
    cause: impl Into<FailureCause>
  ) -> Self {
    Self {
      message: message.into(),
      surface: Surface::LogOnly,
      cause:   cause.into()
    }
  }
}

impl From<InputError> for Failure {
  fn from(error: InputError) -> Self {
    Failure::toast(
      error.to_string(),
      error
    )
  }
}

/// Attaches the user-facing message to a
/// failed call, in the spirit of
/// `anyhow::Context`.
pub trait FailureExt<T> {
  fn or_toast(
    self,
    message: &'static str
  ) -> Result<T, Failure>;

  fn or_log(
    self,
    message: &'static str
  ) -> Result<T, Failure>;
}

impl<T, E> FailureExt<T> for Result<T, E>
where
  E: Into<FailureCause>
{
  fn or_toast(
    self,
    message: &'static str
  ) -> Result<T, Failure> {
    self.map_err(|error| {
      Failure::toast(message, error)
    })
  }

  fn or_log(
    self,
    message: &'static str
  ) -> Result<T, Failure> {
    self.map_err(|error| {
      Failure::log_only(message, error)
    })
  }
}
