//! CSV rendering for the download collaborator
//!
//! Produces the text handed to the external export surface: one row per
//! task, or one row per summary statistic. Cells containing commas,
//! quotes, or line breaks are quoted with doubled-quote escapes.

use crate::models::Task;
use crate::summary::Summary;
use crate::utils::format_ts;

const TASK_HEADER: &str =
    "id,parameter,value,task_name,status,planned_hours,planned_minutes,actual_hours,actual_minutes,created";

/// Render the task collection as CSV, one row per task.
pub fn tasks_csv(tasks: &[Task]) -> String {
    let mut lines = vec![TASK_HEADER.to_string()];
    for task in tasks {
        let cells = [
            task.id.to_string(),
            task.parameter.clone(),
            task.value.clone(),
            task.task_name.clone(),
            task.status.as_str().to_string(),
            task.planned_hours.to_string(),
            task.planned_minutes.as_u8().to_string(),
            task.actual_hours.to_string(),
            task.actual_minutes.as_u8().to_string(),
            format_ts(task.created_ts),
        ];
        lines.push(join_row(&cells));
    }
    lines.join("\n") + "\n"
}

/// Render summary statistics as CSV, one `metric,value` row each.
/// Rates and hour totals are shown to one decimal, matching the form's
/// metric display.
pub fn summary_csv(summary: &Summary<'_>) -> String {
    let rows = [
        ("total_tasks", summary.total_count().to_string()),
        ("completed_tasks", summary.completed_count().to_string()),
        ("completion_rate", format!("{:.1}", summary.completion_rate())),
        (
            "planned_total_hours",
            format!("{:.1}", summary.planned_total_hours()),
        ),
        (
            "actual_total_hours",
            format!("{:.1}", summary.actual_total_hours()),
        ),
    ];
    let mut lines = vec!["metric,value".to_string()];
    for (metric, value) in rows {
        lines.push(format!("{},{}", metric, csv_escape(&value)));
    }
    lines.join("\n") + "\n"
}

fn join_row(cells: &[String]) -> String {
    cells
        .iter()
        .map(|c| csv_escape(c))
        .collect::<Vec<_>>()
        .join(",")
}

/// Quote a cell if it contains a delimiter, quote, or line break.
fn csv_escape(value: &str) -> String {
    if value.contains(',') || value.contains('"') || value.contains('\n') || value.contains('\r') {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}
