use std::fmt;

use pmdash_shared::{
  CriticalPath,
  DelayPrediction,
  ErrorBody,
  GanttData,
  HealthStatus,
  ModelInfo,
  NoteCreate,
  NoteDto,
  NoteUpdate,
  ProjectDto,
  ProjectFilters,
  ProjectMetrics,
  ReportRecord,
  ReportRequest,
  RetrainResult,
  RiskClassification,
  TaskCreate,
  TaskDto,
  TaskFilters,
  TaskUpdate,
  WriteAck
};
use serde::Serialize;
use serde::de::DeserializeOwned;
use thiserror::Error;
use tracing::{
  debug,
  warn
};

use crate::config::DashboardConfig;
use crate::error::ApiError;

#[derive(
  Debug, Clone, Copy, PartialEq, Eq,
)]
pub enum Method {
  Get,
  Post,
  Put,
  Delete
}

impl Method {
  pub fn as_str(self) -> &'static str {
    match self {
      | Method::Get => "GET",
      | Method::Post => "POST",
      | Method::Put => "PUT",
      | Method::Delete => "DELETE"
    }
  }
}

impl fmt::Display for Method {
  fn fmt(
    &self,
    f: &mut fmt::Formatter<'_>
  ) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiRequest {
  pub method: Method,
  /// Absolute URL, query included.
  pub url:    String,
  /// JSON body, already encoded.
  pub body:   Option<Vec<u8>>
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiResponse {
  pub status: u16,
  pub body:   Vec<u8>
}

impl ApiResponse {
  pub fn is_success(&self) -> bool {
    (200..300).contains(&self.status)
  }
}

/// The request never produced a response.
#[derive(
  Debug, Clone, Error, PartialEq, Eq,
)]
#[error("{0}")]
pub struct TransportError(pub String);

/// One HTTP round trip. The browser build
/// implements it over `fetch`, the
/// terminal client over reqwest.
#[allow(async_fn_in_trait)]
pub trait HttpBackend {
  async fn send(
    &self,
    request: ApiRequest
  ) -> Result<ApiResponse, TransportError>;
}

/// Percent-encodes one path segment.
pub fn segment(raw: &str) -> String {
  urlencoding::encode(raw).into_owned()
}

/// `?k=v&...` from the pairs that carry a
/// non-empty value; empty string when none
/// do.
pub fn query_string(
  pairs: &[(&str, Option<&str>)]
) -> String {
  let encoded: Vec<String> = pairs
    .iter()
    .filter_map(|(key, value)| {
      value
        .filter(|v| !v.trim().is_empty())
        .map(|v| {
          format!(
            "{key}={}",
            urlencoding::encode(v)
          )
        })
    })
    .collect();

  if encoded.is_empty() {
    String::new()
  } else {
    format!("?{}", encoded.join("&"))
  }
}

pub fn project_filters_query(
  filters: &ProjectFilters
) -> String {
  query_string(&[
    ("status", filters.status.as_deref()),
    (
      "pm_name",
      filters.pm_name.as_deref()
    ),
    ("region", filters.region.as_deref()),
    ("market", filters.market.as_deref())
  ])
}

pub fn task_filters_query(
  filters: &TaskFilters
) -> String {
  query_string(&[
    (
      "project_number",
      filters.project_number.as_deref()
    ),
    (
      "status",
      filters.status.map(|s| s.label())
    )
  ])
}

#[derive(Debug, Clone)]
pub struct ApiClient<B> {
  backend:  B,
  api_base: String,
  root:     String
}

impl<B: HttpBackend> ApiClient<B> {
  pub fn new(
    backend: B,
    config: &DashboardConfig
  ) -> Self {
    Self {
      backend,
      api_base: config.api_base.clone(),
      root: config
        .server_root()
        .to_string()
    }
  }

  pub fn backend(&self) -> &B {
    &self.backend
  }

  async fn execute(
    &self,
    method: Method,
    url: String,
    path: &str,
    body: Option<Vec<u8>>
  ) -> Result<ApiResponse, ApiError> {
    debug!(%method, %url, "sending request");
    let response = self
      .backend
      .send(ApiRequest {
        method,
        url,
        body
      })
      .await
      .map_err(|err| {
        ApiError::Transport {
          method,
          path: path.to_string(),
          message: err.0
        }
      })?;

    if !response.is_success() {
      let detail =
        serde_json::from_slice::<ErrorBody>(
          &response.body
        )
        .ok()
        .and_then(|body| {
          body.detail.or(body.error)
        });
      warn!(
        %method,
        path,
        status = response.status,
        ?detail,
        "request rejected"
      );
      return Err(ApiError::Status {
        method,
        path: path.to_string(),
        status: response.status,
        detail
      });
    }

    Ok(response)
  }

  async fn call(
    &self,
    method: Method,
    path: &str,
    body: Option<Vec<u8>>
  ) -> Result<ApiResponse, ApiError> {
    let url =
      format!("{}{}", self.api_base, path);
    self
      .execute(method, url, path, body)
      .await
  }

  fn decode<T: DeserializeOwned>(
    path: &str,
    response: &ApiResponse
  ) -> Result<T, ApiError> {
    serde_json::from_slice(&response.body)
      .map_err(|err| ApiError::Decode {
        path:    path.to_string(),
        message: err.to_string()
      })
  }

  fn encode<T: Serialize>(
    path: &str,
    body: &T
  ) -> Result<Vec<u8>, ApiError> {
    serde_json::to_vec(body).map_err(
      |err| ApiError::Decode {
        path:    path.to_string(),
        message: err.to_string()
      }
    )
  }

  async fn get_json<T: DeserializeOwned>(
    &self,
    path: &str
  ) -> Result<T, ApiError> {
    let response = self
      .call(Method::Get, path, None)
      .await?;
    Self::decode(path, &response)
  }

  async fn send_json<T, R>(
    &self,
    method: Method,
    path: &str,
    body: &T
  ) -> Result<R, ApiError>
  where
    T: Serialize,
    R: DeserializeOwned
  {
    let payload =
      Self::encode(path, body)?;
    let response = self
      .call(method, path, Some(payload))
      .await?;
    Self::decode(path, &response)
  }

  /// Writes that answer with a small
  /// confirmation; an empty body counts as
  /// success.
  async fn ack(
    &self,
    method: Method,
    path: &str,
    body: Option<Vec<u8>>
  ) -> Result<WriteAck, ApiError> {
    let response =
      self.call(method, path, body).await?;
    if response.body.is_empty() {
      return Ok(WriteAck::default());
    }
    Self::decode(path, &response)
  }

  #[tracing::instrument(skip(self))]
  pub async fn health(
    &self
  ) -> Result<HealthStatus, ApiError> {
    let url = format!("{}/health", self.root);
    let response = self
      .execute(Method::Get, url, "/health", None)
      .await?;
    Self::decode("/health", &response)
  }

  pub async fn projects(
    &self,
    filters: &ProjectFilters
  ) -> Result<Vec<ProjectDto>, ApiError> {
    let path = format!(
      "/projects/{}",
      project_filters_query(filters)
    );
    self.get_json(&path).await
  }

  pub async fn project(
    &self,
    number: &str
  ) -> Result<ProjectDto, ApiError> {
    self
      .get_json(&format!(
        "/projects/{}",
        segment(number)
      ))
      .await
  }

  pub async fn project_metrics(
    &self,
    number: &str
  ) -> Result<ProjectMetrics, ApiError> {
    self
      .get_json(&format!(
        "/projects/{}/metrics",
        segment(number)
      ))
      .await
  }

  pub async fn search_projects(
    &self,
    term: &str
  ) -> Result<Vec<ProjectDto>, ApiError> {
    self
      .get_json(&format!(
        "/projects/search/{}",
        segment(term)
      ))
      .await
  }

  pub async fn gantt(
    &self,
    number: &str
  ) -> Result<GanttData, ApiError> {
    self
      .get_json(&format!(
        "/gantt/{}",
        segment(number)
      ))
      .await
  }

  pub async fn critical_path(
    &self,
    number: &str
  ) -> Result<CriticalPath, ApiError> {
    self
      .get_json(&format!(
        "/gantt/{}/critical-path",
        segment(number)
      ))
      .await
  }

  pub async fn tasks(
    &self,
    filters: &TaskFilters
  ) -> Result<Vec<TaskDto>, ApiError> {
    let path = format!(
      "/tasks/{}",
      task_filters_query(filters)
    );
    self.get_json(&path).await
  }

  pub async fn create_task(
    &self,
    task: &TaskCreate
  ) -> Result<WriteAck, ApiError> {
    self
      .send_json(Method::Post, "/tasks/", task)
      .await
  }

  pub async fn update_task(
    &self,
    id: i64,
    update: &TaskUpdate
  ) -> Result<WriteAck, ApiError> {
    let path = format!("/tasks/{id}");
    let body = Self::encode(&path, update)?;
    self
      .ack(Method::Put, &path, Some(body))
      .await
  }

  pub async fn delete_task(
    &self,
    id: i64
  ) -> Result<WriteAck, ApiError> {
    self
      .ack(
        Method::Delete,
        &format!("/tasks/{id}"),
        None
      )
      .await
  }

  pub async fn notes(
    &self,
    project: &str
  ) -> Result<Vec<NoteDto>, ApiError> {
    self
      .get_json(&format!(
        "/notes/{}",
        segment(project)
      ))
      .await
  }

  pub async fn create_note(
    &self,
    note: &NoteCreate
  ) -> Result<WriteAck, ApiError> {
    self
      .send_json(Method::Post, "/notes/", note)
      .await
  }

  /// The backend takes note edits as query
  /// parameters, not as a body.
  pub async fn update_note(
    &self,
    id: i64,
    update: &NoteUpdate
  ) -> Result<WriteAck, ApiError> {
    let path = format!(
      "/notes/{id}?title={}&content={}&tags={}",
      urlencoding::encode(&update.title),
      urlencoding::encode(&update.content),
      urlencoding::encode(&update.tags)
    );
    self.ack(Method::Put, &path, None).await
  }

  pub async fn delete_note(
    &self,
    id: i64
  ) -> Result<WriteAck, ApiError> {
    self
      .ack(
        Method::Delete,
        &format!("/notes/{id}"),
        None
      )
      .await
  }

  pub async fn report_history(
    &self
  ) -> Result<Vec<ReportRecord>, ApiError> {
    self.get_json("/reports/history").await
  }

  /// Raw bytes of the generated document.
  pub async fn generate_report(
    &self,
    request: &ReportRequest
  ) -> Result<Vec<u8>, ApiError> {
    let path = "/reports/generate";
    let body = Self::encode(path, request)?;
    let response = self
      .call(Method::Post, path, Some(body))
      .await?;
    Ok(response.body)
  }

  pub async fn predict_delay(
    &self,
    number: &str
  ) -> Result<DelayPrediction, ApiError> {
    self
      .get_json(&format!(
        "/ml/predict-delay/{}",
        segment(number)
      ))
      .await
  }

  pub async fn classify_risk(
    &self,
    number: &str
  ) -> Result<RiskClassification, ApiError>
  {
    self
      .get_json(&format!(
        "/ml/classify-risk/{}",
        segment(number)
      ))
      .await
  }

  /// Both ML reads, issued together; the
  /// first failure wins and the other
  /// result is discarded.
  #[tracing::instrument(skip(self))]
  pub async fn ml_insights(
    &self,
    number: &str
  ) -> Result<
    (DelayPrediction, RiskClassification),
    ApiError
  > {
    futures::try_join!(
      self.predict_delay(number),
      self.classify_risk(number)
    )
  }

  pub async fn retrain(
    &self
  ) -> Result<RetrainResult, ApiError> {
    let path = "/ml/retrain";
    let response = self
      .call(Method::Post, path, None)
      .await?;
    let result: RetrainResult =
      Self::decode(path, &response)?;
    match result.error {
      | Some(message) => {
        Err(ApiError::Rejected {
          path: path.to_string(),
          message
        })
      }
      | None => Ok(result)
    }
  }

  pub async fn model_info(
    &self
  ) -> Result<ModelInfo, ApiError> {
    self.get_json("/ml/model-info").await
  }
}
