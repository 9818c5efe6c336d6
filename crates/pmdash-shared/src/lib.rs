use std::collections::BTreeMap;

use serde::{
  Deserialize,
  Deserializer,
  Serialize
};

/// Identifiers that the backend emits
/// either as JSON strings or as bare
/// numbers, depending on the source
/// table.
mod lenient {
  use serde::{
    Deserialize,
    Deserializer
  };

  #[derive(Deserialize)]
  #[serde(untagged)]
  enum Raw {
    Text(String),
    Int(i64),
    Float(f64)
  }

  impl Raw {
    fn into_string(self) -> String {
      match self {
        | Raw::Text(text) => text,
        | Raw::Int(value) => {
          value.to_string()
        }
        | Raw::Float(value) => {
          value.to_string()
        }
      }
    }
  }

  pub fn string<'de, D>(
    deserializer: D
  ) -> Result<String, D::Error>
  where
    D: Deserializer<'de>
  {
    Raw::deserialize(deserializer)
      .map(Raw::into_string)
  }

  pub fn opt_string<'de, D>(
    deserializer: D
  ) -> Result<Option<String>, D::Error>
  where
    D: Deserializer<'de>
  {
    Option::<Raw>::deserialize(
      deserializer
    )
    .map(|raw| raw.map(Raw::into_string))
  }
}

fn null_as_default<'de, D, T>(
  deserializer: D
) -> Result<T, D::Error>
where
  D: Deserializer<'de>,
  T: Default + Deserialize<'de>
{
  Option::<T>::deserialize(deserializer)
    .map(Option::unwrap_or_default)
}

#[derive(
  Debug,
  Clone,
  Serialize,
  Deserialize,
  PartialEq,
)]
#[serde(
  rename_all = "SCREAMING_SNAKE_CASE"
)]
pub struct ProjectDto {
  #[serde(
    deserialize_with = "lenient::string"
  )]
  pub project_number: String,
  pub project_name:   String,
  pub project_type:   Option<String>,
  pub project_status: Option<String>,
  pub pm_name:        Option<String>,
  pub pm_email:       Option<String>,
  pub start_date:     Option<String>,
  pub end_date:       Option<String>,
  pub budget:         Option<f64>,
  pub actual_cost:    Option<f64>,
  pub region:         Option<String>,
  pub market:         Option<String>,
  pub priority:       Option<String>,
  pub created_date:   Option<String>,
  pub modified_date:  Option<String>
}

#[derive(
  Debug,
  Clone,
  Serialize,
  Deserialize,
  PartialEq,
  Default,
)]
pub struct ProjectMetrics {
  #[serde(default)]
  pub total_ccrs:       u64,
  #[serde(default)]
  pub completed_ccrs:   u64,
  #[serde(default)]
  pub total_orders:     u64,
  #[serde(default)]
  pub completed_orders: u64,
  #[serde(default)]
  pub budget_variance:  f64,
  #[serde(default)]
  pub estimated_hours:  f64,
  #[serde(default)]
  pub actual_hours:     f64
}

#[derive(
  Debug, Clone, Default, PartialEq, Eq,
)]
pub struct ProjectFilters {
  pub status:  Option<String>,
  pub pm_name: Option<String>,
  pub region:  Option<String>,
  pub market:  Option<String>
}

#[derive(
  Debug,
  Clone,
  Copy,
  Serialize,
  Deserialize,
  PartialEq,
  Eq,
  PartialOrd,
  Ord,
  Hash,
  Default,
)]
pub enum TaskStatus {
  #[default]
  Pending,
  #[serde(rename = "In Progress")]
  InProgress,
  Completed,
  #[serde(other)]
  Other
}

impl TaskStatus {
  pub const BOARD: [TaskStatus; 3] = [
    TaskStatus::Pending,
    TaskStatus::InProgress,
    TaskStatus::Completed
  ];

  pub fn label(self) -> &'static str {
    match self {
      | TaskStatus::Pending => "Pending",
      | TaskStatus::InProgress => {
        "In Progress"
      }
      | TaskStatus::Completed => {
        "Completed"
      }
      | TaskStatus::Other => "Other"
    }
  }

  pub fn from_label(
    label: &str
  ) -> TaskStatus {
    match label.trim() {
      | "Pending" => TaskStatus::Pending,
      | "In Progress" => {
        TaskStatus::InProgress
      }
      | "Completed" => {
        TaskStatus::Completed
      }
      | _ => TaskStatus::Other
    }
  }
}

#[derive(
  Debug,
  Clone,
  Serialize,
  Deserialize,
  PartialEq,
)]
pub struct TaskDto {
  pub id:             i64,
  #[serde(
    default,
    deserialize_with = "lenient::opt_string"
  )]
  pub project_number: Option<String>,
  pub task_name:      String,
  pub description:    Option<String>,
  #[serde(
    default,
    deserialize_with = "null_as_default"
  )]
  pub status:         TaskStatus,
  pub priority:       Option<String>,
  pub assigned_to:    Option<String>,
  pub due_date:       Option<String>,
  pub completed_date: Option<String>,
  pub created_date:   Option<String>,
  pub modified_date:  Option<String>
}

#[derive(
  Debug, Clone, Default, PartialEq, Eq,
)]
pub struct TaskFilters {
  pub project_number: Option<String>,
  pub status:         Option<TaskStatus>
}

#[derive(
  Debug,
  Clone,
  Serialize,
  Deserialize,
  PartialEq,
)]
pub struct TaskCreate {
  pub task_name:      String,
  pub project_number: String,
  pub priority:       String,
  pub due_date:       Option<String>,
  pub assigned_to:    String,
  pub description:    String,
  pub status:         TaskStatus
}

#[derive(
  Debug,
  Clone,
  Serialize,
  Deserialize,
  PartialEq,
)]
pub struct TaskUpdate {
  pub status:      TaskStatus,
  pub priority:    String,
  pub assigned_to: String,
  pub due_date:    Option<String>,
  pub description: String
}

#[derive(
  Debug,
  Clone,
  Serialize,
  Deserialize,
  PartialEq,
)]
pub struct NoteDto {
  pub id:             i64,
  #[serde(
    default,
    deserialize_with = "lenient::opt_string"
  )]
  pub project_number: Option<String>,
  pub title:          String,
  pub content:        Option<String>,
  pub tags:           Option<String>,
  pub created_by:     Option<String>,
  pub created_date:   Option<String>,
  pub modified_date:  Option<String>
}

#[derive(
  Debug,
  Clone,
  Serialize,
  Deserialize,
  PartialEq,
)]
pub struct NoteCreate {
  pub project_number: String,
  pub title:          String,
  pub content:        String,
  pub tags:           String,
  pub created_by:     String
}

#[derive(
  Debug, Clone, PartialEq, Eq, Default,
)]
pub struct NoteUpdate {
  pub title:   String,
  pub content: String,
  pub tags:    String
}

/// Body of the backend's create / update
/// / delete confirmations.
#[derive(
  Debug,
  Clone,
  Serialize,
  Deserialize,
  PartialEq,
  Default,
)]
pub struct WriteAck {
  pub id:      Option<i64>,
  pub message: Option<String>
}

#[derive(
  Debug,
  Clone,
  Serialize,
  Deserialize,
  PartialEq,
)]
pub struct ReportRecord {
  pub id:           Option<i64>,
  #[serde(
    default,
    deserialize_with = "null_as_default"
  )]
  pub report_type:  String,
  #[serde(
    default,
    deserialize_with = "null_as_default"
  )]
  pub report_name:  String,
  pub created_by:   Option<String>,
  pub created_date: Option<String>,
  pub file_path:    Option<String>
}

#[derive(
  Debug,
  Clone,
  Serialize,
  Deserialize,
  PartialEq,
)]
pub struct ReportRequest {
  pub report_type:     String,
  pub format:          String,
  pub project_numbers: Option<Vec<String>>,
  #[serde(
    skip_serializing_if = "Option::is_none",
    default
  )]
  pub start_date:      Option<String>,
  #[serde(
    skip_serializing_if = "Option::is_none",
    default
  )]
  pub end_date:        Option<String>,
  pub include_charts:  bool
}

#[derive(
  Debug,
  Clone,
  Serialize,
  Deserialize,
  PartialEq,
)]
pub struct GanttItem {
  #[serde(
    deserialize_with = "lenient::string"
  )]
  pub id:         String,
  #[serde(
    default,
    deserialize_with = "null_as_default"
  )]
  pub text:       String,
  pub start_date: Option<String>,
  pub end_date:   Option<String>,
  #[serde(
    default,
    deserialize_with = "lenient::opt_string"
  )]
  pub parent:     Option<String>,
  #[serde(rename = "type")]
  pub kind:       Option<String>,
  #[serde(
    default,
    deserialize_with = "null_as_default"
  )]
  pub progress:   f64
}

#[derive(
  Debug,
  Clone,
  Serialize,
  Deserialize,
  PartialEq,
)]
pub struct GanttLink {
  #[serde(
    default,
    deserialize_with = "lenient::opt_string"
  )]
  pub id:     Option<String>,
  #[serde(
    deserialize_with = "lenient::string"
  )]
  pub source: String,
  #[serde(
    deserialize_with = "lenient::string"
  )]
  pub target: String,
  #[serde(
    rename = "type",
    default,
    deserialize_with = "lenient::opt_string"
  )]
  pub kind:   Option<String>
}

#[derive(
  Debug,
  Clone,
  Serialize,
  Deserialize,
  PartialEq,
  Default,
)]
pub struct GanttData {
  #[serde(default)]
  pub data:  Vec<GanttItem>,
  #[serde(default)]
  pub links: Vec<GanttLink>
}

#[derive(
  Debug,
  Clone,
  Serialize,
  Deserialize,
  PartialEq,
)]
pub struct CriticalPathItem {
  #[serde(rename = "type")]
  pub kind:     String,
  #[serde(
    deserialize_with = "lenient::string"
  )]
  pub number:   String,
  pub duration: i64
}

#[derive(
  Debug,
  Clone,
  Serialize,
  Deserialize,
  PartialEq,
  Default,
)]
pub struct CriticalPath {
  #[serde(default)]
  pub critical_path:  Vec<CriticalPathItem>,
  #[serde(default)]
  pub total_duration: i64
}

/// Shared shape of the delay-prediction
/// and risk-classification responses.
/// The risk endpoint leaves
/// `predicted_delay_days` unset.
#[derive(
  Debug,
  Clone,
  Serialize,
  Deserialize,
  PartialEq,
  Default,
)]
pub struct MlPrediction {
  #[serde(
    default,
    deserialize_with = "lenient::opt_string"
  )]
  pub project_number:       Option<String>,
  pub predicted_delay_days: Option<i64>,
  pub risk_level:           Option<String>,
  pub confidence:           Option<f64>,
  pub factors:
    Option<BTreeMap<String, f64>>
}

pub type DelayPrediction = MlPrediction;
pub type RiskClassification =
  MlPrediction;

#[derive(
  Debug,
  Clone,
  Serialize,
  Deserialize,
  PartialEq,
  Default,
)]
pub struct DelayTrainingMetrics {
  pub final_mae: Option<f64>,
  pub samples:   Option<u64>
}

#[derive(
  Debug,
  Clone,
  Serialize,
  Deserialize,
  PartialEq,
  Default,
)]
pub struct RiskTrainingMetrics {
  pub final_accuracy: Option<f64>,
  pub samples:        Option<u64>
}

#[derive(
  Debug,
  Clone,
  Serialize,
  Deserialize,
  PartialEq,
  Default,
)]
pub struct RetrainResult {
  pub message:         Option<String>,
  pub error:           Option<String>,
  pub delay_predictor:
    Option<DelayTrainingMetrics>,
  pub risk_classifier:
    Option<RiskTrainingMetrics>
}

#[derive(
  Debug,
  Clone,
  Serialize,
  Deserialize,
  PartialEq,
  Default,
)]
pub struct ModelDescriptor {
  #[serde(rename = "type")]
  pub kind:         Option<String>,
  pub architecture: Option<String>,
  pub features:     Option<Vec<String>>,
  pub classes:      Option<Vec<String>>
}

#[derive(
  Debug,
  Clone,
  Serialize,
  Deserialize,
  PartialEq,
  Default,
)]
pub struct ModelCatalog {
  pub delay_predictor:
    Option<ModelDescriptor>,
  pub risk_classifier:
    Option<ModelDescriptor>
}

#[derive(
  Debug,
  Clone,
  Serialize,
  Deserialize,
  PartialEq,
)]
pub struct TrainingRun {
  #[serde(
    default,
    deserialize_with = "null_as_default"
  )]
  pub model_type:       String,
  pub training_date:    Option<String>,
  pub training_samples: Option<u64>,
  pub accuracy:         Option<f64>
}

#[derive(
  Debug,
  Clone,
  Serialize,
  Deserialize,
  PartialEq,
  Default,
)]
pub struct ModelInfo {
  pub training_history:
    Option<Vec<TrainingRun>>,
  pub models: Option<ModelCatalog>
}

#[derive(
  Debug,
  Clone,
  Serialize,
  Deserialize,
  PartialEq,
)]
pub struct HealthStatus {
  pub status:  String,
  pub version: Option<String>
}

/// Error payloads: FastAPI's `detail`
/// and the ad hoc `error` field some
/// endpoints return with a 2xx status.
#[derive(
  Debug,
  Clone,
  Serialize,
  Deserialize,
  PartialEq,
  Default,
)]
pub struct ErrorBody {
  pub detail: Option<String>,
  pub error:  Option<String>
}
