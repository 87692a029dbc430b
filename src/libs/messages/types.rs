#[derive(Debug, Clone)]
pub enum Message {
    // === INIT MESSAGES ===
    ConfigSaved(String),
    DatabaseReady(String),

    // === USER MESSAGES ===
    UserCreated(i64),
    UserDeleted(i64),
    UsersNotFound,
    ConfirmDeleteUser(String),

    // === TASK MESSAGES ===
    TaskCreated(i64),
    TaskUpdated(i64),
    TaskStatusChanged(i64, String),
    TaskDeleted(i64),
    TaskNotFound(i64),
    TasksNotFound,
    TasksHeader,
    ConfirmDeleteTask(i64, String),

    // === NOTE MESSAGES ===
    NoteCreated(i64),
    NoteUpdated(i64),
    NoteDeleted(i64),
    NotesNotFound(i64),
    ConfirmDeleteNote(i64),

    // === TIME ENTRY MESSAGES ===
    TimeEntryCreated(i64),
    TimerStarted(i64, i64),
    TimerStopped(i64, String),
    TimeEntryUpdated(i64),
    TimeEntryDeleted(i64),
    TimeEntriesNotFound,
    NothingToUpdate,
    ConfirmDeleteTimeEntry(i64),

    // === REPORT MESSAGES ===
    ReportEmpty,
    ReportSaved(String),
    InferredEndsNote(usize, String),
    EntriesExported(usize, String),

    // === GENERAL MESSAGES ===
    OperationCancelled,
    DebugModeEnabled,

    // === MIGRATION MESSAGES ===
    MigrationsFound(usize),
    RunningMigration(u32, String),
    MigrationFailed(u32, String),
    AllMigrationsCompleted,
    DatabaseUpToDate,
}
