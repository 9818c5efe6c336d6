use pmdash_shared::{
  ReportRecord,
  ReportRequest
};
use tracing::info;

use super::Listing;
use crate::api::{
  ApiClient,
  HttpBackend
};
use crate::error::{
  Failure,
  FailureExt
};
use crate::format::{
  format_date,
  or_not_available
};
use crate::presenter::Notice;

pub const NO_REPORTS: &str =
  "No reports generated yet";

pub const REPORT_TYPES: [(&str, &str); 3] = [
  ("project_summary", "Project Summary"),
  ("ccr_analysis", "CCR Analysis"),
  ("budget_variance", "Budget Variance")
];

pub const REPORT_FORMATS: [&str; 2] =
  ["PDF", "Excel"];

pub const SCHEDULE_FREQUENCIES: [(
  &str,
  &str
); 3] = [
  ("daily", "Daily"),
  ("weekly", "Weekly"),
  ("monthly", "Monthly")
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportRow {
  pub report_type:  String,
  pub report_name:  String,
  pub created_by:   String,
  pub created_date: String,
  pub file_path:    Option<String>
}

impl From<&ReportRecord> for ReportRow {
  fn from(record: &ReportRecord) -> Self {
    Self {
      report_type:  record
        .report_type
        .clone(),
      report_name:  record
        .report_name
        .clone(),
      created_by:   or_not_available(
        record.created_by.as_deref()
      ),
      created_date: format_date(
        record.created_date.as_deref()
      ),
      file_path:    record.file_path.clone()
    }
  }
}

/// History failures are only logged.
pub async fn history<B: HttpBackend>(
  client: &ApiClient<B>
) -> Result<Listing<ReportRow>, Failure> {
  let records = client
    .report_history()
    .await
    .or_log(
      "Failed to load report history"
    )?;
  Ok(Listing::from_items(
    records.iter().map(ReportRow::from).collect(),
    NO_REPORTS
  ))
}

/// Scoped to the selected project when
/// there is one, to every project
/// otherwise.
pub fn build_request(
  report_type: &str,
  format: &str,
  selected: Option<&str>
) -> ReportRequest {
  ReportRequest {
    report_type:     report_type.to_string(),
    format:          format.to_string(),
    project_numbers: selected
      .map(|p| vec![p.to_string()]),
    start_date:      None,
    end_date:        None,
    include_charts:  true
  }
}

/// `report_{type}_{epoch ms}.{format}`.
pub fn report_file_name(
  report_type: &str,
  format: &str,
  epoch_ms: i64
) -> String {
  format!(
    "report_{report_type}_{epoch_ms}.{}",
    format.to_lowercase()
  )
}

pub fn mime_type(format: &str) -> &'static str {
  match format {
    | "PDF" => "application/pdf",
    | "Excel" => {
      "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet"
    }
    | _ => "application/octet-stream"
  }
}

/// `budget_variance` -> `BUDGET VARIANCE`.
pub fn report_type_title(
  report_type: &str
) -> String {
  report_type.replace('_', " ").to_uppercase()
}

pub fn generating_notice() -> Notice {
  Notice::info("Generating report...")
}

pub fn download_notice() -> Notice {
  Notice::info("Downloading report...")
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedReport {
  pub file_name: String,
  pub mime_type: &'static str,
  pub bytes:     Vec<u8>
}

#[tracing::instrument(skip(client))]
pub async fn generate<B: HttpBackend>(
  client: &ApiClient<B>,
  report_type: &str,
  format: &str,
  selected: Option<&str>,
  epoch_ms: i64
) -> Result<(GeneratedReport, Notice), Failure>
{
  let request =
    build_request(report_type, format, selected);
  let bytes = client
    .generate_report(&request)
    .await
    .or_toast("Failed to generate report")?;
  let report = GeneratedReport {
    file_name: report_file_name(
      report_type,
      format,
      epoch_ms
    ),
    mime_type: mime_type(format),
    bytes
  };
  info!(
    file = %report.file_name,
    size = report.bytes.len(),
    "report generated"
  );
  Ok((
    report,
    Notice::success(
      "Report generated successfully"
    )
  ))
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportSchedule {
  pub report_type: String,
  pub frequency:   String,
  pub recipients:  Vec<String>
}

impl ReportSchedule {
  pub fn new(
    report_type: &str,
    frequency: &str,
    recipients: &str
  ) -> Self {
    Self {
      report_type: report_type.to_string(),
      frequency:   frequency.to_string(),
      recipients:  recipients
        .split(',')
        .map(str::trim)
        .filter(|r| !r.is_empty())
        .map(str::to_string)
        .collect()
    }
  }
}

/// The backend has no scheduling endpoint;
/// the schedule is acknowledged locally.
pub fn schedule(
  schedule: &ReportSchedule
) -> Notice {
  info!(
    report_type = %schedule.report_type,
    frequency = %schedule.frequency,
    recipients = schedule.recipients.len(),
    "report scheduled"
  );
  Notice::success(
    "Report scheduled successfully"
  )
}
