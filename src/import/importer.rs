//! Row-to-task import
//!
//! Turns selected dataset rows into tasks: one task per selected row,
//! named by the cell in the identification column, appended to the store
//! in the given row order.

use log::info;

use crate::error::{Error, Result};
use crate::import::Dataset;
use crate::store::TaskStore;

/// Imports selected dataset rows as tasks.
///
/// Binding to the identification column happens at construction, so a
/// bad column name surfaces before any task is created.
pub struct TaskImporter<'a> {
    dataset: &'a Dataset,
    column: String,
    col_idx: usize,
}

impl<'a> TaskImporter<'a> {
    /// Bind an importer to the identification column of a dataset.
    pub fn new(dataset: &'a Dataset, column: &str) -> Result<Self> {
        let col_idx = dataset.column_index(column)?;
        Ok(Self {
            dataset,
            column: column.to_string(),
            col_idx,
        })
    }

    /// The identification column name.
    pub fn column(&self) -> &str {
        &self.column
    }

    /// Distinct values of the identification column, first appearance
    /// first, for populating the task-name picker.
    pub fn task_names(&self) -> Vec<String> {
        self.dataset.distinct_at(self.col_idx)
    }

    /// Create one task per selected row, in the given order, and return
    /// the new ids.
    ///
    /// Every index is checked up front; an out-of-range selection
    /// imports nothing.
    pub fn import(&self, store: &mut TaskStore, rows: &[usize]) -> Result<Vec<u64>> {
        let row_count = self.dataset.row_count();
        if let Some(&bad) = rows.iter().find(|&&r| r >= row_count) {
            return Err(Error::RowOutOfRange {
                index: bad,
                rows: row_count,
            });
        }
        let mut ids = Vec::with_capacity(rows.len());
        for &row in rows {
            let cell = self.dataset.cell(row, self.col_idx);
            ids.push(store.add_from_cell(&self.column, cell)?);
        }
        info!("imported {} tasks from column '{}'", ids.len(), self.column);
        Ok(ids)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::TaskStatus;
    use tempfile::TempDir;

    fn sample() -> Dataset {
        Dataset::parse("Room,Floor\nKitchen,1\nBath,2\nHall,1\nKitchen,2\n")
    }

    fn temp_store() -> (TempDir, TaskStore) {
        let dir = TempDir::new().unwrap();
        let store = TaskStore::new(dir.path().join("tasks.json"));
        (dir, store)
    }

    #[test]
    fn test_one_task_per_selected_row() {
        let ds = sample();
        let (_dir, mut store) = temp_store();
        let importer = TaskImporter::new(&ds, "Room").unwrap();

        let ids = importer.import(&mut store, &[0, 2]).unwrap();
        assert_eq!(ids, vec![0, 1]);
        assert_eq!(store.len(), 2);

        let first = store.get(0).unwrap();
        assert_eq!(first.task_name, "Kitchen");
        assert_eq!(first.parameter, "Room");
        assert_eq!(first.value, "Kitchen");
        assert_eq!(first.status, TaskStatus::NotStarted);
        assert_eq!(first.planned_total(), 0.0);
        assert_eq!(store.get(1).unwrap().task_name, "Hall");
    }

    #[test]
    fn test_import_preserves_selection_order() {
        let ds = sample();
        let (_dir, mut store) = temp_store();
        let importer = TaskImporter::new(&ds, "Room").unwrap();

        importer.import(&mut store, &[2, 0, 1]).unwrap();
        let names: Vec<&str> = store.tasks().iter().map(|t| t.task_name.as_str()).collect();
        assert_eq!(names, ["Hall", "Kitchen", "Bath"]);
    }

    #[test]
    fn test_missing_column_creates_nothing() {
        let ds = sample();
        assert!(matches!(
            TaskImporter::new(&ds, "Zone"),
            Err(Error::InvalidColumn(c)) if c == "Zone"
        ));
    }

    #[test]
    fn test_out_of_range_row_creates_nothing() {
        let ds = sample();
        let (_dir, mut store) = temp_store();
        let importer = TaskImporter::new(&ds, "Room").unwrap();

        let err = importer.import(&mut store, &[1, 9]).unwrap_err();
        assert!(matches!(err, Error::RowOutOfRange { index: 9, rows: 4 }));
        assert!(store.is_empty());
        assert!(!store.path().exists());
    }

    #[test]
    fn test_task_names_for_picker() {
        let ds = sample();
        let importer = TaskImporter::new(&ds, "Room").unwrap();
        assert_eq!(importer.task_names(), ["Kitchen", "Bath", "Hall"]);
    }
}
