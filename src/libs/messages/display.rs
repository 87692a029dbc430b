//! Text for every [`Message`] variant.

use super::types::Message;
use std::fmt::{Display, Formatter, Result};

impl Display for Message {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        let text = match self {
            // === INIT MESSAGES ===
            Message::ConfigSaved(path) => format!("Configuration saved to {}", path),
            Message::DatabaseReady(path) => format!("Database ready at {}", path),

            // === USER MESSAGES ===
            Message::UserCreated(id) => format!("User {} created", id),
            Message::UserDeleted(id) => format!("User {} deleted; their tasks are kept", id),
            Message::UsersNotFound => "No users found".to_string(),
            Message::ConfirmDeleteUser(name) => format!("Delete user '{}'?", name),

            // === TASK MESSAGES ===
            Message::TaskCreated(number) => format!("Task #{} created", number),
            Message::TaskUpdated(number) => format!("Task #{} updated", number),
            Message::TaskStatusChanged(number, status) => format!("Task #{} is now '{}'", number, status),
            Message::TaskDeleted(number) => format!("Task #{} deleted with its notes and time entries", number),
            Message::TaskNotFound(number) => format!("Task #{} not found", number),
            Message::TasksNotFound => "No tasks found".to_string(),
            Message::TasksHeader => "Tasks:".to_string(),
            Message::ConfirmDeleteTask(number, name) => format!("Delete task #{} '{}' with all its notes and time entries?", number, name),

            // === NOTE MESSAGES ===
            Message::NoteCreated(id) => format!("Note {} added", id),
            Message::NoteUpdated(id) => format!("Note {} updated", id),
            Message::NoteDeleted(id) => format!("Note {} deleted", id),
            Message::NotesNotFound(number) => format!("Task #{} has no notes", number),
            Message::ConfirmDeleteNote(id) => format!("Delete note {}?", id),

            // === TIME ENTRY MESSAGES ===
            Message::TimeEntryCreated(id) => format!("Time entry {} recorded", id),
            Message::TimerStarted(id, number) => format!("Timer {} started on task #{}", id, number),
            Message::TimerStopped(id, duration) => format!("Timer {} stopped after {}", id, duration),
            Message::TimeEntryUpdated(id) => format!("Time entry {} updated", id),
            Message::TimeEntryDeleted(id) => format!("Time entry {} deleted", id),
            Message::TimeEntriesNotFound => "No time entries found".to_string(),
            Message::NothingToUpdate => "Nothing to update: pass at least one field".to_string(),
            Message::ConfirmDeleteTimeEntry(id) => format!("Delete time entry {}?", id),

            // === REPORT MESSAGES ===
            Message::ReportEmpty => "No records match the selected filters".to_string(),
            Message::ReportSaved(path) => format!("Report saved to {}", path),
            Message::InferredEndsNote(count, cutoff) => format!("{} open entries shown with an inferred end at {} (marked *)", count, cutoff),
            Message::EntriesExported(count, path) => format!("{} entries exported to {}", count, path),

            // === GENERAL MESSAGES ===
            Message::OperationCancelled => "Operation cancelled".to_string(),
            Message::DebugModeEnabled => "Debug mode enabled".to_string(),

            // === MIGRATION MESSAGES ===
            Message::MigrationsFound(count) => format!("Found {} pending database migrations", count),
            Message::RunningMigration(version, name) => format!("Running migration v{}: {}", version, name),
            Message::MigrationFailed(version, error) => format!("✗ Migration v{} failed: {}", version, error),
            Message::AllMigrationsCompleted => "All database migrations completed successfully".to_string(),
            Message::DatabaseUpToDate => "Database schema is up to date".to_string(),
        };

        write!(f, "{}", text)
    }
}
