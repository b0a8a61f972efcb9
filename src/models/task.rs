use serde::{Deserialize, Serialize};

use crate::error::Error;

/// Task status (punch list workflow state)
///
/// Ordered by workflow position so status sorts group tasks the way the
/// board shows them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum TaskStatus {
    #[serde(rename = "Not Started")]
    NotStarted,
    #[serde(rename = "In Progress")]
    InProgress,
    Completed,
    Blocked,
}

impl TaskStatus {
    /// All statuses in workflow order, for populating status pickers.
    pub const ALL: [TaskStatus; 4] = [
        TaskStatus::NotStarted,
        TaskStatus::InProgress,
        TaskStatus::Completed,
        TaskStatus::Blocked,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            TaskStatus::NotStarted => "Not Started",
            TaskStatus::InProgress => "In Progress",
            TaskStatus::Completed => "Completed",
            TaskStatus::Blocked => "Blocked",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "Not Started" => Some(TaskStatus::NotStarted),
            "In Progress" => Some(TaskStatus::InProgress),
            "Completed" => Some(TaskStatus::Completed),
            "Blocked" => Some(TaskStatus::Blocked),
            _ => None,
        }
    }
}

/// Minutes component of a time entry, quantized to quarter hours.
///
/// Serializes as the integers 0, 15, 30, 45; anything else is rejected on
/// the way in.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum Minutes {
    #[default]
    Zero,
    Quarter,
    Half,
    ThreeQuarters,
}

impl Minutes {
    pub fn as_u8(self) -> u8 {
        match self {
            Minutes::Zero => 0,
            Minutes::Quarter => 15,
            Minutes::Half => 30,
            Minutes::ThreeQuarters => 45,
        }
    }
}

impl TryFrom<u8> for Minutes {
    type Error = Error;

    fn try_from(value: u8) -> std::result::Result<Self, Error> {
        match value {
            0 => Ok(Minutes::Zero),
            15 => Ok(Minutes::Quarter),
            30 => Ok(Minutes::Half),
            45 => Ok(Minutes::ThreeQuarters),
            _ => Err(Error::InvalidFieldValue {
                field: "minutes",
                value: value.to_string(),
            }),
        }
    }
}

impl From<Minutes> for u8 {
    fn from(minutes: Minutes) -> u8 {
        minutes.as_u8()
    }
}

/// A punch list entry.
///
/// `parameter` and `value` record the source column and cell for tasks
/// created by import; both are empty for manually entered tasks.
/// `created_ts` is fixed at creation and never updated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    pub id: u64,
    #[serde(default)]
    pub parameter: String,
    #[serde(default)]
    pub value: String,
    pub task_name: String,
    pub status: TaskStatus,
    pub planned_hours: u8,
    pub planned_minutes: Minutes,
    pub actual_hours: u8,
    pub actual_minutes: Minutes,
    pub created_ts: i64,
}

impl Task {
    /// Create a manually entered task.
    pub fn new(id: u64, name: impl Into<String>) -> Self {
        let now = chrono::Utc::now().timestamp();
        Self {
            id,
            parameter: String::new(),
            value: String::new(),
            task_name: name.into(),
            status: TaskStatus::NotStarted,
            planned_hours: 0,
            planned_minutes: Minutes::Zero,
            actual_hours: 0,
            actual_minutes: Minutes::Zero,
            created_ts: now,
        }
    }

    /// Create a task derived from one dataset cell.
    pub fn from_cell(id: u64, column: &str, cell: &str) -> Self {
        Self {
            parameter: column.to_string(),
            value: cell.to_string(),
            ..Self::new(id, cell)
        }
    }

    /// Planned time as fractional hours.
    pub fn planned_total(&self) -> f64 {
        self.planned_hours as f64 + self.planned_minutes.as_u8() as f64 / 60.0
    }

    /// Actual time as fractional hours.
    pub fn actual_total(&self) -> f64 {
        self.actual_hours as f64 + self.actual_minutes.as_u8() as f64 / 60.0
    }
}

/// A single editable field paired with its new value.
///
/// Hour and minute edits carry the raw numbers coming off the form; they
/// are validated before the task is touched.
#[derive(Debug, Clone)]
pub enum FieldEdit {
    Name(String),
    Status(TaskStatus),
    PlannedHours(u8),
    PlannedMinutes(u8),
    ActualHours(u8),
    ActualMinutes(u8),
}

impl FieldEdit {
    /// Apply the edit to a task. An out-of-range value fails without
    /// mutating anything.
    pub(crate) fn apply(self, task: &mut Task) -> std::result::Result<(), Error> {
        match self {
            FieldEdit::Name(name) => {
                if name.trim().is_empty() {
                    return Err(Error::InvalidFieldValue {
                        field: "task_name",
                        value: name,
                    });
                }
                task.task_name = name;
            }
            FieldEdit::Status(status) => task.status = status,
            FieldEdit::PlannedHours(hours) => {
                task.planned_hours = check_hours("planned_hours", hours)?;
            }
            FieldEdit::PlannedMinutes(minutes) => {
                task.planned_minutes = Minutes::try_from(minutes)?;
            }
            FieldEdit::ActualHours(hours) => {
                task.actual_hours = check_hours("actual_hours", hours)?;
            }
            FieldEdit::ActualMinutes(minutes) => {
                task.actual_minutes = Minutes::try_from(minutes)?;
            }
        }
        Ok(())
    }
}

fn check_hours(field: &'static str, hours: u8) -> std::result::Result<u8, Error> {
    if hours <= 23 {
        Ok(hours)
    } else {
        Err(Error::InvalidFieldValue {
            field,
            value: hours.to_string(),
        })
    }
}
