//! Punchlist - the task tracking core behind the punch list form apps
//!
//! This library provides the punch list functionality shared by the
//! contractor form applications, including:
//! - A task store with whole-file JSON persistence and stable ids
//! - Dataset (CSV) parsing and row-to-task import
//! - Summary statistics, status filtering, and sorted views
//! - CSV rendering of tasks and summaries for download
//!
//! There is no command surface: the crate is driven by an external
//! interactive-form collaborator that calls the store, importer, and
//! summary operations directly.
//!
//! # Example
//!
//! ```no_run
//! use punchlist::store::TaskStore;
//!
//! let mut store = TaskStore::new(TaskStore::default_path());
//! if let Err(e) = store.load() {
//!     eprintln!("starting with an empty punch list: {}", e);
//! }
//! let id = store.add("Patch drywall in hallway").unwrap();
//! assert!(store.get(id).is_some());
//! ```

pub mod error;
pub mod models;
pub mod store;
pub mod import;
pub mod summary;
pub mod export;
pub mod utils;

pub use error::{Error, Result};
