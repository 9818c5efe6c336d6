use std::collections::HashMap;

use chrono::NaiveDate;
use pmdash_shared::{
  CriticalPath,
  GanttData,
  GanttItem
};
use tracing::{
  debug,
  warn
};

use crate::api::{
  ApiClient,
  HttpBackend
};
use crate::error::{
  Failure,
  FailureExt,
  InputError
};
use crate::format::{
  format_date,
  format_naive_date,
  parse_backend_date,
  round_half_up
};
use crate::presenter::Notice;

pub const SELECT_PROMPT: &str =
  "Select a project...";

/// Horizontal placement of a bar, in
/// percent of the chart width.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BarLayout {
  pub left:  f64,
  pub width: f64
}

#[derive(Debug, Clone, PartialEq)]
pub struct GanttRow {
  pub id:       String,
  pub text:     String,
  pub start:    String,
  pub end:      String,
  pub progress: String,
  pub depth:    usize,
  pub kind:     Option<String>,
  pub bar:      Option<BarLayout>
}

#[derive(Debug, Clone, PartialEq)]
pub struct TodayMarker {
  pub offset: f64,
  pub title:  String
}

#[derive(Debug, Clone, PartialEq)]
pub struct GanttView {
  pub rows:  Vec<GanttRow>,
  pub span:  Option<(NaiveDate, NaiveDate)>,
  pub today: Option<TodayMarker>,
  pub links: usize
}

fn item_dates(
  item: &GanttItem
) -> Option<(NaiveDate, NaiveDate)> {
  let start = item
    .start_date
    .as_deref()
    .and_then(parse_backend_date)?;
  let end = item
    .end_date
    .as_deref()
    .and_then(parse_backend_date)
    .unwrap_or(start);
  Some((start, end.max(start)))
}

/// Items in display order: each parent
/// followed by its children, depth first.
/// Items whose parent is unknown are
/// treated as roots.
fn tree_order(
  items: &[GanttItem]
) -> Vec<(usize, &GanttItem)> {
  let known: HashMap<&str, usize> = items
    .iter()
    .enumerate()
    .map(|(idx, item)| (item.id.as_str(), idx))
    .collect();

  let mut children: HashMap<&str, Vec<usize>> =
    HashMap::new();
  let mut roots = Vec::new();
  for (idx, item) in items.iter().enumerate()
  {
    match item
      .parent
      .as_deref()
      .filter(|p| known.contains_key(p))
      .filter(|p| *p != item.id)
    {
      | Some(parent) => {
        children
          .entry(parent)
          .or_default()
          .push(idx)
      }
      | None => roots.push(idx)
    }
  }

  let mut ordered =
    Vec::with_capacity(items.len());
  let mut visited = vec![false; items.len()];
  let mut stack: Vec<(usize, usize)> = roots
    .into_iter()
    .rev()
    .map(|idx| (idx, 0))
    .collect();
  while let Some((idx, depth)) = stack.pop() {
    if visited[idx] {
      continue;
    }
    visited[idx] = true;
    ordered.push((depth, &items[idx]));
    if let Some(kids) =
      children.get(items[idx].id.as_str())
    {
      stack.extend(
        kids.iter().rev().map(|k| (*k, depth + 1))
      );
    }
  }

  // Parent cycles never reach a root.
  for (idx, item) in items.iter().enumerate()
  {
    if !visited[idx] {
      warn!(id = %item.id, "gantt item unreachable from any root");
      ordered.push((0, item));
    }
  }
  ordered
}

fn percent(
  date: NaiveDate,
  (first, last): (NaiveDate, NaiveDate)
) -> f64 {
  let total =
    (last - first).num_days().max(1) as f64;
  (date - first).num_days() as f64 / total
    * 100.0
}

pub fn layout(
  data: &GanttData,
  today: NaiveDate
) -> GanttView {
  let dated: Vec<(NaiveDate, NaiveDate)> =
    data.data.iter().filter_map(item_dates).collect();
  let span = dated
    .iter()
    .map(|(s, _)| *s)
    .min()
    .zip(dated.iter().map(|(_, e)| *e).max());

  let rows = tree_order(&data.data)
    .into_iter()
    .map(|(depth, item)| {
      let bar = span.zip(item_dates(item)).map(
        |(span, (start, end))| {
          let left = percent(start, span);
          BarLayout {
            left,
            width: (percent(end, span) - left)
              .max(0.5)
          }
        }
      );
      GanttRow {
        id: item.id.clone(),
        text: item.text.clone(),
        start: format_date(
          item.start_date.as_deref()
        ),
        end: format_date(
          item.end_date.as_deref()
        ),
        progress: format!(
          "{}%",
          round_half_up(item.progress * 100.0)
            as i64
        ),
        depth,
        kind: item.kind.clone(),
        bar
      }
    })
    .collect();

  let marker = span
    .filter(|(first, last)| {
      (*first..=*last).contains(&today)
    })
    .map(|span| TodayMarker {
      offset: percent(today, span),
      title:  format!(
        "Today: {}",
        format_naive_date(today)
      )
    });

  GanttView {
    rows,
    span,
    today: marker,
    links: data.links.len()
  }
}

pub fn selected_project(
  selected: Option<&str>
) -> Result<&str, InputError> {
  selected
    .filter(|p| !p.trim().is_empty())
    .ok_or(InputError::Missing(
      "Please select a project"
    ))
}

#[tracing::instrument(skip(client))]
pub async fn load<B: HttpBackend>(
  client: &ApiClient<B>,
  number: &str,
  today: NaiveDate
) -> Result<(GanttView, Notice), Failure> {
  let data = client
    .gantt(number)
    .await
    .or_toast("Failed to load Gantt chart")?;
  debug!(
    items = data.data.len(),
    links = data.links.len(),
    "gantt data loaded"
  );
  Ok((
    layout(&data, today),
    Notice::success(
      "Gantt chart loaded successfully"
    )
  ))
}

pub async fn critical_path<B: HttpBackend>(
  client: &ApiClient<B>,
  selected: Option<&str>
) -> Result<CriticalPath, Failure> {
  let number = selected_project(selected)?;
  client
    .critical_path(number)
    .await
    .or_toast(
      "Failed to calculate critical path"
    )
}

pub fn total_duration_label(
  path: &CriticalPath
) -> String {
  format!("{} days", path.total_duration)
}

#[cfg(test)]
mod tests {
  use serde_json::json;

  use super::*;

  fn day(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d)
      .expect("valid date")
  }

  fn data() -> GanttData {
    serde_json::from_value(json!({
      "data": [
        {"id": "c1", "text": "Design", "start_date": "2024-01-11", "end_date": "2024-01-21", "parent": "p", "progress": 0.5},
        {"id": "p", "text": "Project", "start_date": "2024-01-01", "end_date": "2024-01-31", "parent": 0, "progress": 0.255},
        {"id": "c2", "text": "Build", "start_date": null, "parent": "p", "progress": 0}
      ],
      "links": [{"id": 1, "source": "c1", "target": "c2", "type": "0"}]
    }))
    .expect("fixture")
  }

  #[test]
  fn children_follow_their_parent() {
    let view = layout(&data(), day(2023, 6, 1));
    let order: Vec<(&str, usize)> = view
      .rows
      .iter()
      .map(|r| (r.id.as_str(), r.depth))
      .collect();
    assert_eq!(
      order,
      vec![("p", 0), ("c1", 1), ("c2", 1)]
    );
    assert_eq!(view.links, 1);
  }

  #[test]
  fn bars_span_the_dated_range() {
    let view = layout(&data(), day(2024, 1, 16));
    let root = &view.rows[0];
    let bar = root.bar.expect("dated bar");
    assert_eq!(bar.left, 0.0);
    assert_eq!(bar.width, 100.0);

    let design =
      view.rows[1].bar.expect("dated bar");
    assert!((design.left - 100.0 / 3.0).abs() < 1e-9);
    assert!(view.rows[2].bar.is_none());

    let marker = view.today.expect("inside span");
    assert_eq!(marker.offset, 50.0);
    assert_eq!(marker.title, "Today: Jan 16, 2024");
  }

  #[test]
  fn progress_is_rounded_percent() {
    let view = layout(&data(), day(2030, 1, 1));
    assert_eq!(view.rows[0].progress, "26%");
    assert_eq!(view.rows[1].progress, "50%");
    assert!(view.today.is_none());
  }

  #[test]
  fn empty_chart_has_no_span() {
    let view = layout(
      &GanttData::default(),
      day(2024, 1, 1)
    );
    assert!(view.rows.is_empty());
    assert!(view.span.is_none());
  }

  #[test]
  fn critical_path_needs_a_project() {
    assert_eq!(
      selected_project(None),
      Err(InputError::Missing(
        "Please select a project"
      ))
    );
    assert_eq!(
      selected_project(Some("P-1")),
      Ok("P-1")
    );
  }
}
