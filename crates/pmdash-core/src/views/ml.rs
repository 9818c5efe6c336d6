use pmdash_shared::{
  DelayPrediction,
  ModelDescriptor,
  ModelInfo,
  RetrainResult,
  RiskClassification
};
use tracing::info;

use super::Listing;
use crate::api::{
  ApiClient,
  HttpBackend
};
use crate::badges::{
  Badge,
  risk_badge,
  risk_text_class
};
use crate::error::{
  ApiError,
  Failure,
  FailureExt
};
use crate::format::{
  NOT_AVAILABLE,
  format_date,
  round_half_up
};
use crate::presenter::Notice;
use crate::views::gantt::selected_project;

pub const RETRAIN_PROMPT: &str =
  "Retraining models requires at least \
   100 completed projects. This may take \
   several minutes. Continue?";
pub const NO_TRAINING_HISTORY: &str =
  "No training history";

pub fn delay_color_class(
  days: i64
) -> &'static str {
  match days {
    | d if d < 0 => "text-green-600",
    | d if d < 30 => "text-yellow-600",
    | d if d < 60 => "text-orange-600",
    | _ => "text-red-600"
  }
}

pub fn factor_color_class(
  value: f64
) -> &'static str {
  if value < -0.1 {
    "bg-red-600"
  } else if value < 0.0 {
    "bg-yellow-600"
  } else {
    "bg-green-600"
  }
}

/// `ccr_completion` -> `Ccr Completion`.
pub fn factor_name(key: &str) -> String {
  key
    .split('_')
    .map(|word| {
      let mut chars = word.chars();
      match chars.next() {
        | Some(first) => {
          first.to_uppercase().chain(chars).collect()
        }
        | None => String::new()
      }
    })
    .collect::<Vec<String>>()
    .join(" ")
}

fn whole_percent(value: f64) -> i64 {
  round_half_up(value * 100.0) as i64
}

/// Ratios and completions read as
/// percentages, variances as signed
/// percentages, anything else as a plain
/// number to two decimals.
pub fn factor_value(
  key: &str,
  value: f64
) -> String {
  if key.contains("ratio")
    || key.contains("completion")
  {
    format!("{}%", whole_percent(value))
  } else if key.contains("variance") {
    let sign = if value > 0.0 { "+" } else { "" };
    format!("{sign}{}%", whole_percent(value))
  } else {
    (round_half_up(value * 100.0) / 100.0)
      .to_string()
  }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Confidence {
  pub label: String,
  /// Progress bar width in percent.
  pub width: f64
}

impl Confidence {
  fn new(confidence: Option<f64>) -> Self {
    let ratio = confidence.unwrap_or(0.0);
    Self {
      label: format!("{}%", whole_percent(ratio)),
      width: ratio * 100.0
    }
  }
}

#[derive(Debug, Clone, PartialEq)]
pub struct DelayCard {
  pub days:        i64,
  pub color_class: &'static str,
  pub risk_label:  String,
  pub risk_badge:  Badge,
  pub confidence:  Confidence
}

#[derive(Debug, Clone, PartialEq)]
pub struct RiskCard {
  pub label:      String,
  pub text_class: String,
  pub confidence: Confidence
}

#[derive(Debug, Clone, PartialEq)]
pub struct FactorBar {
  pub name:      String,
  pub value:     String,
  pub bar_class: &'static str,
  pub width:     f64
}

#[derive(Debug, Clone, PartialEq)]
pub struct MlInsights {
  pub project_number:  String,
  pub delay:           DelayCard,
  pub risk:            RiskCard,
  pub factors:         Vec<FactorBar>,
  pub recommendations: Vec<&'static str>
}

pub fn recommendations(
  delay: &DelayPrediction,
  risk: &RiskClassification
) -> Vec<&'static str> {
  let factor = |name: &str| {
    delay
      .factors
      .as_ref()
      .and_then(|f| f.get(name).copied())
  };
  let below = |name: &str, limit: f64| {
    factor(name).is_some_and(|v| v < limit)
  };

  let mut out = Vec::new();
  if delay
    .predicted_delay_days
    .is_some_and(|d| d > 30)
  {
    out.push(
      "Schedule a project review meeting to \
       identify bottlenecks"
    );
    out.push(
      "Consider reallocating resources to \
       critical path tasks"
    );
  }
  if below("budget_variance", -0.1) {
    out.push(
      "Review budget allocation and request \
       additional funding if needed"
    );
  }
  if below("ccr_completion", 0.5) {
    out.push(
      "Prioritize completion of pending CCRs"
    );
  }
  if below("order_completion", 0.5) {
    out.push(
      "Follow up on pending provisioning \
       orders"
    );
  }
  if matches!(
    risk.risk_level.as_deref(),
    Some("High" | "Critical")
  ) {
    out.push(
      "Escalate to senior management for \
       immediate attention"
    );
    out.push(
      "Implement daily standup meetings for \
       closer monitoring"
    );
  }
  if out.is_empty() {
    out.push(
      "Project is on track - continue with \
       current approach"
    );
    out.push(
      "Maintain regular monitoring and \
       status updates"
    );
  }
  out
}

impl MlInsights {
  pub fn new(
    project: &str,
    delay: &DelayPrediction,
    risk: &RiskClassification
  ) -> Self {
    // Missing delay reads as on time.
    let days =
      delay.predicted_delay_days.unwrap_or(0);
    let factors = delay
      .factors
      .iter()
      .flatten()
      .map(|(key, value)| FactorBar {
        name:      factor_name(key),
        value:     factor_value(key, *value),
        bar_class: factor_color_class(*value),
        width:     value.abs() * 100.0
      })
      .collect();

    Self {
      project_number: delay
        .project_number
        .clone()
        .unwrap_or_else(|| project.to_string()),
      delay: DelayCard {
        days,
        color_class: delay_color_class(days),
        risk_label: delay
          .risk_level
          .clone()
          .unwrap_or_else(|| "Unknown".to_string()),
        risk_badge: risk_badge(
          delay.risk_level.as_deref()
        ),
        confidence: Confidence::new(
          delay.confidence
        )
      },
      risk: RiskCard {
        label:      risk
          .risk_level
          .clone()
          .unwrap_or_else(|| {
            "Unknown".to_string()
          }),
        text_class: risk_text_class(
          risk.risk_level.as_deref()
        ),
        confidence: Confidence::new(
          risk.confidence
        )
      },
      factors,
      recommendations: recommendations(
        delay, risk
      )
    }
  }
}

/// Both reads run together; nothing
/// renders unless both succeed.
#[tracing::instrument(skip(client))]
pub async fn predict<B: HttpBackend>(
  client: &ApiClient<B>,
  selected: Option<&str>
) -> Result<MlInsights, Failure> {
  let project = selected_project(selected)?;
  let (delay, risk) = client
    .ml_insights(project)
    .await
    .or_toast("Failed to run ML prediction")?;
  Ok(MlInsights::new(project, &delay, &risk))
}

pub fn retraining_notice() -> Notice {
  Notice::info("Retraining ML models...")
}

/// `Ok(None)` when the user declines. A
/// rejection carried in the response body
/// is toasted verbatim.
#[tracing::instrument(skip(client, confirm))]
pub async fn retrain<B, C>(
  client: &ApiClient<B>,
  confirm: C
) -> Result<Option<(RetrainResult, Notice)>, Failure>
where
  B: HttpBackend,
  C: FnOnce(&str) -> bool
{
  if !confirm(RETRAIN_PROMPT) {
    return Ok(None);
  }
  match client.retrain().await {
    | Ok(result) => {
      info!(message = ?result.message, "models retrained");
      Ok(Some((
        result,
        Notice::success(
          "Models retrained successfully"
        )
      )))
    }
    | Err(
      err @ ApiError::Rejected {
        ..
      }
    ) => {
      let message = err
        .server_message()
        .unwrap_or("Failed to retrain models")
        .to_string();
      Err(Failure::toast(message, err))
    }
    | Err(err) => {
      Err(Failure::toast(
        "Failed to retrain models",
        err
      ))
    }
  }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrainingSummary {
  pub final_mae:      String,
  pub delay_samples:  u64,
  pub final_accuracy: String,
  pub risk_samples:   u64
}

impl From<&RetrainResult> for TrainingSummary {
  fn from(result: &RetrainResult) -> Self {
    let delay = result.delay_predictor.as_ref();
    let risk = result.risk_classifier.as_ref();
    Self {
      final_mae:      delay
        .and_then(|d| d.final_mae)
        .map(|mae| format!("{mae:.4}"))
        .unwrap_or_else(|| {
          NOT_AVAILABLE.to_string()
        }),
      delay_samples:  delay
        .and_then(|d| d.samples)
        .unwrap_or(0),
      final_accuracy: risk
        .and_then(|r| r.final_accuracy)
        .filter(|a| *a != 0.0)
        .map(|a| format!("{:.2}%", a * 100.0))
        .unwrap_or_else(|| {
          NOT_AVAILABLE.to_string()
        }),
      risk_samples:   risk
        .and_then(|r| r.samples)
        .unwrap_or(0)
    }
  }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelCard {
  pub kind:         String,
  pub architecture: String,
  pub features:     usize,
  pub classes:      String
}

impl From<Option<&ModelDescriptor>> for ModelCard {
  fn from(model: Option<&ModelDescriptor>) -> Self {
    let text = |value: Option<&String>| {
      value
        .filter(|v| !v.is_empty())
        .cloned()
        .unwrap_or_else(|| {
          NOT_AVAILABLE.to_string()
        })
    };
    Self {
      kind:         text(
        model.and_then(|m| m.kind.as_ref())
      ),
      architecture: text(
        model.and_then(|m| m.architecture.as_ref())
      ),
      features:     model
        .and_then(|m| m.features.as_ref())
        .map_or(0, Vec::len),
      classes:      model
        .and_then(|m| m.classes.as_ref())
        .filter(|c| !c.is_empty())
        .map(|c| c.join(", "))
        .unwrap_or_else(|| {
          NOT_AVAILABLE.to_string()
        })
    }
  }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryRow {
  pub model:    String,
  pub date:     String,
  pub samples:  String,
  pub accuracy: String
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelInfoView {
  pub delay_predictor: ModelCard,
  pub risk_classifier: ModelCard,
  pub history:         Listing<HistoryRow>
}

impl From<&ModelInfo> for ModelInfoView {
  fn from(info: &ModelInfo) -> Self {
    let models = info.models.as_ref();
    let history = info
      .training_history
      .iter()
      .flatten()
      .map(|run| HistoryRow {
        model:    run.model_type.clone(),
        date:     format_date(
          run.training_date.as_deref()
        ),
        samples:  run
          .training_samples
          .map(|s| s.to_string())
          .unwrap_or_default(),
        accuracy: run
          .accuracy
          .filter(|a| *a != 0.0)
          .map(|a| format!("{:.2}%", a * 100.0))
          .unwrap_or_else(|| {
            NOT_AVAILABLE.to_string()
          })
      })
      .collect();

    Self {
      delay_predictor: ModelCard::from(
        models.and_then(|m| m.delay_predictor.as_ref())
      ),
      risk_classifier: ModelCard::from(
        models.and_then(|m| m.risk_classifier.as_ref())
      ),
      history: Listing::from_items(
        history,
        NO_TRAINING_HISTORY
      )
    }
  }
}

pub async fn model_info<B: HttpBackend>(
  client: &ApiClient<B>
) -> Result<ModelInfo, Failure> {
  client
    .model_info()
    .await
    .or_toast("Failed to load model info")
}

#[derive(
  Debug, Clone, Copy, PartialEq, Eq,
)]
pub enum ShareTarget {
  Slack,
  Webex,
  Email
}

impl ShareTarget {
  pub const ALL: [ShareTarget; 3] = [
    ShareTarget::Slack,
    ShareTarget::Webex,
    ShareTarget::Email
  ];

  pub fn label(self) -> &'static str {
    match self {
      | ShareTarget::Slack => "Share to Slack",
      | ShareTarget::Webex => "Share to Webex",
      | ShareTarget::Email => "Share via Email"
    }
  }

  pub fn icon(self) -> &'static str {
    match self {
      | ShareTarget::Slack => "fab fa-slack",
      | ShareTarget::Webex => "fas fa-video",
      | ShareTarget::Email => "fas fa-envelope"
    }
  }

  pub fn notice(self) -> Notice {
    Notice::info(match self {
      | ShareTarget::Slack => "Opening Slack...",
      | ShareTarget::Webex => "Opening Webex...",
      | ShareTarget::Email => {
        "Opening email client..."
      }
    })
  }
}

pub fn export_notice() -> Notice {
  Notice::info("Exporting ML report...")
}

#[cfg(test)]
mod tests {
  use std::collections::BTreeMap;

  use super::*;

  fn prediction(
    days: Option<i64>,
    level: &str,
    factors: &[(&str, f64)]
  ) -> DelayPrediction {
    DelayPrediction {
      project_number:       Some("P-1".to_string()),
      predicted_delay_days: days,
      risk_level:           Some(level.to_string()),
      confidence:           Some(0.876),
      factors:              Some(
        factors
          .iter()
          .map(|(k, v)| (k.to_string(), *v))
          .collect::<BTreeMap<_, _>>()
      )
    }
  }

  #[test]
  fn delay_colors_by_threshold() {
    assert_eq!(delay_color_class(-3), "text-green-600");
    assert_eq!(delay_color_class(0), "text-yellow-600");
    assert_eq!(delay_color_class(45), "text-orange-600");
    assert_eq!(delay_color_class(60), "text-red-600");
  }

  #[test]
  fn factor_formatting() {
    assert_eq!(
      factor_name("order_completion"),
      "Order Completion"
    );
    assert_eq!(factor_value("ccr_completion", 0.456), "46%");
    assert_eq!(factor_value("budget_variance", 0.12), "+12%");
    assert_eq!(factor_value("budget_variance", -0.2), "-20%");
    assert_eq!(factor_value("team_size", 3.14159), "3.14");
    assert_eq!(factor_value("team_size", 2.0), "2");
    assert_eq!(factor_color_class(-0.2), "bg-red-600");
    assert_eq!(factor_color_class(-0.05), "bg-yellow-600");
    assert_eq!(factor_color_class(0.0), "bg-green-600");
  }

  #[test]
  fn recommendations_accumulate_in_order() {
    let delay = prediction(
      Some(45),
      "High",
      &[
        ("budget_variance", -0.3),
        ("ccr_completion", 0.2),
        ("order_completion", 0.9)
      ]
    );
    let risk = prediction(None, "Critical", &[]);
    let recs = recommendations(&delay, &risk);
    assert_eq!(recs.len(), 6);
    assert!(recs[0].starts_with("Schedule a project review"));
    assert!(recs[2].starts_with("Review budget"));
    assert!(recs[3].starts_with("Prioritize completion"));
    assert!(recs[4].starts_with("Escalate"));
  }

  #[test]
  fn healthy_project_is_on_track() {
    let delay = prediction(Some(5), "Low", &[]);
    let risk = prediction(None, "Low", &[]);
    let recs = recommendations(&delay, &risk);
    assert_eq!(recs.len(), 2);
    assert!(recs[0].starts_with("Project is on track"));
  }

  #[test]
  fn insights_fill_cards() {
    let delay = prediction(
      None,
      "Medium",
      &[("ccr_completion", 0.8)]
    );
    let mut risk = prediction(None, "High", &[]);
    risk.confidence = None;
    let view = MlInsights::new("P-1", &delay, &risk);
    assert_eq!(view.delay.days, 0);
    assert_eq!(view.delay.color_class, "text-yellow-600");
    assert_eq!(view.delay.confidence.label, "88%");
    assert_eq!(view.risk.text_class, "risk-high");
    assert_eq!(view.risk.confidence.label, "0%");
    assert_eq!(view.factors[0].name, "Ccr Completion");
    assert_eq!(view.factors[0].width, 80.0);
  }

  #[test]
  fn training_summary_formats_metrics() {
    let result: RetrainResult =
      serde_json::from_value(serde_json::json!({
        "message": "done",
        "delay_predictor": {"final_mae": 3.14159, "samples": 120},
        "risk_classifier": {"final_accuracy": 0.91234, "samples": 120}
      }))
      .expect("fixture");
    let summary = TrainingSummary::from(&result);
    assert_eq!(summary.final_mae, "3.1416");
    assert_eq!(summary.final_accuracy, "91.23%");

    let empty = TrainingSummary::from(&RetrainResult::default());
    assert_eq!(empty.final_mae, "N/A");
    assert_eq!(empty.risk_samples, 0);
  }

  #[test]
  fn missing_delay_is_shown_as_on_time() {
    let delay = prediction(None, "Low", &[]);
    let risk = prediction(None, "Low", &[]);
    let view = MlInsights::new("P-1", &delay, &risk);
    assert_eq!(view.delay.days, 0);
    assert_eq!(
      view.delay.color_class,
      "text-yellow-600"
    );
  }

  #[test]
  fn model_info_view_compares_whole() {
    fn assert_eq_impl<T: Eq>(_: &T) {}

    let info = ModelInfo::default();
    let view = ModelInfoView::from(&info);
    assert_eq_impl(&view);
    assert_eq!(view, ModelInfoView::from(&info));
  }

  #[test]
  fn model_info_without_history() {
    let view = ModelInfoView::from(&ModelInfo::default());
    assert_eq!(
      view.history.empty_message(),
      Some("No training history")
    );
    assert_eq!(view.delay_predictor.kind, "N/A");
    assert_eq!(view.risk_classifier.classes, "N/A");
  }
}
