//! Database layer for taskflow.
//!
//! SQLite persistence for users, tasks, annotations and time entries. A
//! [`Db`](db::Db) owns the connection; each repository borrows it for the
//! duration of one unit of work:
//!
//! ```rust
//! use taskflow::db::{db::Db, tasks::Tasks, users::Users};
//! use taskflow::libs::task::TaskInput;
//! use taskflow::libs::user::UserInput;
//!
//! let db = Db::open_in_memory()?;
//! let user_id = Users::new(&db).create(&UserInput::new("Ana", None))?;
//! let created = Tasks::new(&db).create(&TaskInput::new("Write docs", user_id), "Pending")?;
//! assert_eq!(created.task_number, 1);
//! # Ok::<(), taskflow::libs::error::TaskflowError>(())
//! ```

/// Connection ownership and initialization.
pub mod db;

/// Versioned schema migrations.
pub mod migrations;

pub mod annotations;
pub mod tasks;
pub mod time_entries;
pub mod users;

use crate::libs::error::Result;
use crate::libs::report::ReportSource;
use crate::libs::task::{Task, TaskFilter};
use crate::libs::time_entry::{TimeEntry, TimeEntryFilter};

impl ReportSource for db::Db {
    fn list_tasks(&self, filter: &TaskFilter) -> Result<Vec<Task>> {
        tasks::Tasks::new(self).list(filter)
    }

    fn list_time_entries(&self, filter: &TimeEntryFilter) -> Result<Vec<TimeEntry>> {
        time_entries::TimeEntries::new(self).list(filter)
    }

    fn user_name(&self, user_id: i64) -> Result<Option<String>> {
        users::Users::new(self).name(user_id)
    }
}
