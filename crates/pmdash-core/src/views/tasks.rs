use pmdash_shared::{
  TaskCreate,
  TaskDto,
  TaskFilters,
  TaskStatus,
  TaskUpdate
};
use tracing::info;

use super::Listing;
use crate::api::{
  ApiClient,
  HttpBackend
};
use crate::badges::{
  Badge,
  priority_badge
};
use crate::error::{
  Failure,
  FailureExt,
  InputError
};
use crate::format::format_date;
use crate::presenter::Notice;

pub const NO_TASKS: &str = "No tasks found";
pub const PRIORITIES: [&str; 3] =
  ["Low", "Medium", "High"];
pub const DELETE_PROMPT: &str =
  "Are you sure you want to delete this task?";

#[derive(Debug, Clone, PartialEq)]
pub struct TaskCard {
  pub id:             i64,
  pub name:           String,
  pub description:    String,
  pub priority:       String,
  pub priority_badge: Badge,
  pub due:            Option<String>
}

impl From<&TaskDto> for TaskCard {
  fn from(task: &TaskDto) -> Self {
    Self {
      id:             task.id,
      name:           task.task_name.clone(),
      description:    task
        .description
        .clone()
        .filter(|d| !d.is_empty())
        .unwrap_or_else(|| {
          "No description".to_string()
        }),
      priority:       task
        .priority
        .clone()
        .unwrap_or_default(),
      priority_badge: priority_badge(
        task.priority.as_deref()
      ),
      due:            task
        .due_date
        .as_deref()
        .filter(|d| !d.is_empty())
        .map(|d| format_date(Some(d)))
    }
  }
}

#[derive(Debug, Clone, PartialEq)]
pub struct BoardColumn {
  pub status: TaskStatus,
  pub title:  String,
  pub cards:  Vec<TaskCard>
}

/// Three status columns. Tasks with any
/// other status are left off the board.
pub fn board(
  tasks: &[TaskDto]
) -> Listing<BoardColumn> {
  if tasks.is_empty() {
    return Listing::Empty(NO_TASKS);
  }

  Listing::Items(
    TaskStatus::BOARD
      .into_iter()
      .map(|status| {
        let cards: Vec<TaskCard> = tasks
          .iter()
          .filter(|t| t.status == status)
          .map(TaskCard::from)
          .collect();
        BoardColumn {
          status,
          title: format!(
            "{} ({})",
            status.label(),
            cards.len()
          ),
          cards
        }
      })
      .collect()
  )
}

pub async fn load<B: HttpBackend>(
  client: &ApiClient<B>,
  filters: &TaskFilters
) -> Result<Listing<BoardColumn>, Failure> {
  let tasks = client
    .tasks(filters)
    .await
    .or_toast("Failed to load tasks")?;
  Ok(board(&tasks))
}

/// Looks the task up in a fresh, unfiltered
/// listing.
pub async fn details<B: HttpBackend>(
  client: &ApiClient<B>,
  id: i64
) -> Result<TaskDto, Failure> {
  let tasks = client
    .tasks(&TaskFilters::default())
    .await
    .or_toast(
      "Failed to load task details"
    )?;
  tasks
    .into_iter()
    .find(|t| t.id == id)
    .ok_or(InputError::NotFound(
      "Task not found"
    ))
    .map_err(Failure::from)
}

/// Editable fields of the details modal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskEdit {
  pub status:      TaskStatus,
  pub priority:    String,
  pub assigned_to: String,
  pub due_date:    String,
  pub description: String
}

impl TaskEdit {
  pub fn from_task(task: &TaskDto) -> Self {
    Self {
      status:      task.status,
      priority:    task
        .priority
        .clone()
        .unwrap_or_else(|| {
          "Medium".to_string()
        }),
      assigned_to: task
        .assigned_to
        .clone()
        .unwrap_or_default(),
      due_date:    task
        .due_date
        .clone()
        .unwrap_or_default(),
      description: task
        .description
        .clone()
        .unwrap_or_default()
    }
  }

  pub fn to_update(&self) -> TaskUpdate {
    TaskUpdate {
      status:      self.status,
      priority:    self.priority.clone(),
      assigned_to: self.assigned_to.clone(),
      due_date:    Some(self.due_date.trim())
        .filter(|d| !d.is_empty())
        .map(str::to_string),
      description: self.description.clone()
    }
  }
}

pub async fn update<B: HttpBackend>(
  client: &ApiClient<B>,
  id: i64,
  edit: &TaskEdit
) -> Result<Notice, Failure> {
  client
    .update_task(id, &edit.to_update())
    .await
    .or_toast("Failed to update task")?;
  info!(id, "task updated");
  Ok(Notice::success(
    "Task updated successfully"
  ))
}

/// `Ok(None)` when the user declines the
/// confirmation; nothing is sent then.
pub async fn delete<B, C>(
  client: &ApiClient<B>,
  id: i64,
  confirm: C
) -> Result<Option<Notice>, Failure>
where
  B: HttpBackend,
  C: FnOnce(&str) -> bool
{
  if !confirm(DELETE_PROMPT) {
    return Ok(None);
  }
  client
    .delete_task(id)
    .await
    .or_toast("Failed to delete task")?;
  info!(id, "task deleted");
  Ok(Some(Notice::success(
    "Task deleted successfully"
  )))
}

/// The add-task form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTask {
  pub task_name:      String,
  pub project_number: String,
  pub priority:       String,
  pub due_date:       String,
  pub assigned_to:    String,
  pub description:    String
}

impl Default for NewTask {
  fn default() -> Self {
    Self {
      task_name:      String::new(),
      project_number: String::new(),
      priority:       "Medium".to_string(),
      due_date:       String::new(),
      assigned_to:    String::new(),
      description:    String::new()
    }
  }
}

impl NewTask {
  pub fn validate(
    &self
  ) -> Result<TaskCreate, InputError> {
    if self.task_name.trim().is_empty()
      || self.project_number.trim().is_empty()
    {
      return Err(InputError::Missing(
        "Please fill in required fields"
      ));
    }
    Ok(TaskCreate {
      task_name:      self.task_name.clone(),
      project_number: self
        .project_number
        .clone(),
      priority:       self.priority.clone(),
      due_date:       Some(self.due_date.trim())
        .filter(|d| !d.is_empty())
        .map(str::to_string),
      assigned_to:    self.assigned_to.clone(),
      description:    self.description.clone(),
      status:         TaskStatus::Pending
    })
  }
}

pub async fn create<B: HttpBackend>(
  client: &ApiClient<B>,
  form: &NewTask
) -> Result<Notice, Failure> {
  let task = form.validate()?;
  client
    .create_task(&task)
    .await
    .or_toast("Failed to create task")?;
  info!(project = %task.project_number, "task created");
  Ok(Notice::success(
    "Task created successfully"
  ))
}

#[cfg(test)]
mod tests {
  use serde_json::json;

  use super::*;

  fn tasks() -> Vec<TaskDto> {
    serde_json::from_value(json!([
      {"id": 1, "task_name": "Survey", "status": "Pending", "priority": "High", "due_date": "2024-05-01"},
      {"id": 2, "task_name": "Permit", "status": "In Progress", "priority": "Low", "description": "City permit"},
      {"id": 3, "task_name": "Splice", "status": "In Progress"},
      {"id": 4, "task_name": "Legacy", "status": "Blocked"}
    ]))
    .expect("fixture")
  }

  #[test]
  fn board_groups_by_status() {
    let listing = board(&tasks());
    let titles: Vec<&str> = listing
      .items()
      .iter()
      .map(|c| c.title.as_str())
      .collect();
    assert_eq!(
      titles,
      vec![
        "Pending (1)",
        "In Progress (2)",
        "Completed (0)"
      ]
    );
  }

  #[test]
  fn cards_fill_defaults() {
    let listing = board(&tasks());
    let pending = &listing.items()[0].cards[0];
    assert_eq!(pending.description, "No description");
    assert_eq!(pending.priority_badge.class, "badge-high");
    assert_eq!(pending.due.as_deref(), Some("May 1, 2024"));

    let splice = &listing.items()[1].cards[1];
    assert_eq!(splice.due, None);
    assert_eq!(splice.priority_badge.class, "badge-medium");
  }

  #[test]
  fn empty_board_has_message() {
    assert_eq!(
      board(&[]).empty_message(),
      Some("No tasks found")
    );
  }

  #[test]
  fn new_task_requires_name_and_project() {
    let form = NewTask {
      task_name: "Survey".to_string(),
      ..NewTask::default()
    };
    assert_eq!(
      form.validate(),
      Err(InputError::Missing(
        "Please fill in required fields"
      ))
    );

    let created = NewTask {
      project_number: "P-1".to_string(),
      ..form
    }
    .validate()
    .expect("valid form");
    assert_eq!(created.priority, "Medium");
    assert_eq!(created.due_date, None);
    assert_eq!(created.status, TaskStatus::Pending);
  }

  #[test]
  fn edit_turns_blank_due_date_into_null() {
    let task = &tasks()[1];
    let edit = TaskEdit::from_task(task);
    assert_eq!(edit.status, TaskStatus::InProgress);
    let update = edit.to_update();
    assert_eq!(update.due_date, None);
    assert_eq!(update.description, "City permit");
  }
}
