//! File-backed task store
//!
//! Owns the authoritative in-memory task list and mediates every read and
//! write of the durable task file. The whole collection is rewritten on
//! each mutation; no operation reports success before its effect is on
//! disk. Collections stay in the tens to low hundreds of tasks, so there
//! is no batching.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;
use log::{debug, warn};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::models::{FieldEdit, Task};

/// On-disk document: the task list plus the id allocator cursor.
///
/// Persisting `next_id` keeps ids unique across restarts no matter which
/// tasks were deleted in between.
#[derive(Debug, Default, Deserialize)]
struct StoreFile {
    #[serde(default)]
    next_id: u64,
    #[serde(default)]
    tasks: Vec<Task>,
}

/// Borrowed view of the on-disk document for saving.
#[derive(Serialize)]
struct StoreFileRef<'a> {
    next_id: u64,
    tasks: &'a [Task],
}

/// File-backed task store.
///
/// Ids come from a dedicated monotonic allocator, never from array
/// position; a deleted id is never handed out again.
pub struct TaskStore {
    path: PathBuf,
    tasks: Vec<Task>,
    next_id: u64,
}

impl TaskStore {
    /// Create an empty store backed by `path`. Nothing is read until
    /// `load`; nothing is written until the first mutation.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            tasks: Vec::new(),
            next_id: 0,
        }
    }

    /// Default task file location.
    pub fn default_path() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".punchlist")
            .join("tasks.json")
    }

    /// Path of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the collection from the backing file.
    ///
    /// A missing file leaves the store empty and is not an error. A file
    /// that cannot be read or parsed is reported as `StorageRead` and the
    /// store falls back to an empty collection.
    pub fn load(&mut self) -> Result<()> {
        self.tasks.clear();
        if !self.path.exists() {
            debug!("no task file at {}, starting empty", self.path.display());
            return Ok(());
        }
        match Self::read_file(&self.path) {
            Ok(file) => {
                // A hand-edited file may carry a stale cursor; ids present
                // in the list always win.
                let past_max = file.tasks.iter().map(|t| t.id + 1).max().unwrap_or(0);
                self.next_id = file.next_id.max(past_max);
                self.tasks = file.tasks;
                debug!("loaded {} tasks from {}", self.tasks.len(), self.path.display());
                Ok(())
            }
            Err(e) => {
                warn!("abandoning task file {}: {:#}", self.path.display(), e);
                Err(Error::storage_read(&self.path, &e))
            }
        }
    }

    fn read_file(path: &Path) -> anyhow::Result<StoreFile> {
        let text = fs::read_to_string(path).context("read failed")?;
        let file = serde_json::from_str(&text).context("parse failed")?;
        Ok(file)
    }

    /// Serialize the whole collection and replace the backing file.
    ///
    /// Writes a sibling temp file and renames it over the target so a
    /// crash mid-write cannot leave a truncated task file. On failure the
    /// in-memory collection is untouched.
    pub fn save(&self) -> Result<()> {
        self.write_file()
            .map_err(|e| Error::storage_write(&self.path, &e))?;
        debug!("saved {} tasks to {}", self.tasks.len(), self.path.display());
        Ok(())
    }

    fn write_file(&self) -> anyhow::Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)
                    .with_context(|| format!("failed to create directory {}", parent.display()))?;
            }
        }
        let doc = StoreFileRef {
            next_id: self.next_id,
            tasks: &self.tasks,
        };
        let text = serde_json::to_string_pretty(&doc).context("serialize failed")?;
        let tmp = self.path.with_extension("tmp");
        fs::write(&tmp, text).with_context(|| format!("failed to write {}", tmp.display()))?;
        fs::rename(&tmp, &self.path)
            .with_context(|| format!("failed to replace {}", self.path.display()))?;
        Ok(())
    }

    fn alloc_id(&mut self) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Append a manually entered task and persist. Returns the new id.
    ///
    /// Blank names are rejected before anything changes.
    pub fn add(&mut self, name: &str) -> Result<u64> {
        if name.trim().is_empty() {
            return Err(Error::InvalidFieldValue {
                field: "task_name",
                value: name.to_string(),
            });
        }
        let id = self.alloc_id();
        self.tasks.push(Task::new(id, name));
        self.save()?;
        Ok(id)
    }

    /// Append a task derived from one dataset cell and persist. Returns
    /// the new id.
    pub fn add_from_cell(&mut self, column: &str, cell: &str) -> Result<u64> {
        let id = self.alloc_id();
        self.tasks.push(Task::from_cell(id, column, cell));
        self.save()?;
        Ok(id)
    }

    /// Task by id.
    pub fn get(&self, id: u64) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }

    /// All tasks in creation order.
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Apply a single-field edit to the task with this id and persist.
    ///
    /// The value is validated before the task is touched; an out-of-range
    /// value leaves the collection unchanged.
    pub fn update(&mut self, id: u64, edit: FieldEdit) -> Result<()> {
        let task = self
            .tasks
            .iter_mut()
            .find(|t| t.id == id)
            .ok_or(Error::NotFound(id))?;
        edit.apply(task)?;
        self.save()
    }

    /// Remove the task with this id and persist.
    pub fn delete(&mut self, id: u64) -> Result<()> {
        let idx = self
            .tasks
            .iter()
            .position(|t| t.id == id)
            .ok_or(Error::NotFound(id))?;
        self.tasks.remove(idx);
        self.save()
    }

    /// Remove every task and persist. The id cursor is kept so cleared
    /// ids are never handed out again.
    pub fn clear(&mut self) -> Result<()> {
        self.tasks.clear();
        self.save()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::TaskStatus;
    use tempfile::TempDir;

    fn temp_store() -> (TempDir, TaskStore) {
        let dir = TempDir::new().unwrap();
        let store = TaskStore::new(dir.path().join("tasks.json"));
        (dir, store)
    }

    #[test]
    fn test_add_assigns_sequential_ids() {
        let (_dir, mut store) = temp_store();
        assert_eq!(store.add("Sand ceiling").unwrap(), 0);
        assert_eq!(store.add("Paint trim").unwrap(), 1);
        assert_eq!(store.len(), 2);
        assert_eq!(store.get(1).unwrap().task_name, "Paint trim");
    }

    #[test]
    fn test_blank_name_rejected() {
        let (_dir, mut store) = temp_store();
        assert!(matches!(
            store.add("   "),
            Err(Error::InvalidFieldValue { field: "task_name", .. })
        ));
        assert!(store.is_empty());
        assert!(!store.path().exists());
    }

    #[test]
    fn test_update_unknown_id() {
        let (_dir, mut store) = temp_store();
        store.add("Grout tile").unwrap();
        assert!(matches!(
            store.update(9, FieldEdit::Status(TaskStatus::Completed)),
            Err(Error::NotFound(9))
        ));
    }

    #[test]
    fn test_delete_is_by_id_not_position() {
        let (_dir, mut store) = temp_store();
        store.add("a").unwrap();
        store.add("b").unwrap();
        store.add("c").unwrap();

        store.delete(1).unwrap();
        let ids: Vec<u64> = store.tasks().iter().map(|t| t.id).collect();
        assert_eq!(ids, vec![0, 2]);
        assert!(store.get(1).is_none());
        assert!(matches!(store.delete(1), Err(Error::NotFound(1))));
    }

    #[test]
    fn test_ids_never_reused() {
        let (_dir, mut store) = temp_store();
        store.add("a").unwrap();
        store.add("b").unwrap();
        store.delete(1).unwrap();
        assert_eq!(store.add("c").unwrap(), 2);

        store.clear().unwrap();
        assert_eq!(store.add("d").unwrap(), 3);
    }

    #[test]
    fn test_load_missing_file_is_empty() {
        let (_dir, mut store) = temp_store();
        store.load().unwrap();
        assert!(store.is_empty());
    }

    #[test]
    fn test_load_corrupt_file_falls_back_empty() {
        let (_dir, mut store) = temp_store();
        fs::write(store.path(), "not json at all {").unwrap();
        assert!(matches!(store.load(), Err(Error::StorageRead { .. })));
        assert!(store.is_empty());
    }

    #[test]
    fn test_round_trip() {
        let (_dir, mut store) = temp_store();
        store.add("Hang cabinets").unwrap();
        store.add("Install sink").unwrap();
        store
            .update(0, FieldEdit::Status(TaskStatus::InProgress))
            .unwrap();
        store.update(0, FieldEdit::PlannedHours(3)).unwrap();
        store.update(0, FieldEdit::PlannedMinutes(30)).unwrap();

        let mut reloaded = TaskStore::new(store.path());
        reloaded.load().unwrap();
        assert_eq!(reloaded.tasks(), store.tasks());
    }

    #[test]
    fn test_cursor_survives_reload() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("tasks.json");
        {
            let mut store = TaskStore::new(&path);
            store.add("a").unwrap();
            store.add("b").unwrap();
            store.delete(1).unwrap();
        }
        let mut store = TaskStore::new(&path);
        store.load().unwrap();
        assert_eq!(store.add("c").unwrap(), 2);
    }

    #[test]
    fn test_write_failure_keeps_memory() {
        let dir = TempDir::new().unwrap();
        // Parent path is an existing file, so the save cannot succeed.
        let blocker = dir.path().join("blocker");
        fs::write(&blocker, "x").unwrap();
        let mut store = TaskStore::new(blocker.join("tasks.json"));

        assert!(matches!(
            store.add("Pull permits"),
            Err(Error::StorageWrite { .. })
        ));
        assert_eq!(store.len(), 1);
    }
}
