use super::confirm;
use crate::{
    db::{annotations::Annotations, db::Db, tasks::Tasks, time_entries::TimeEntries},
    libs::{
        config::Config,
        messages::Message,
        task::{Task, TaskFilter, TaskInput},
        view::View,
    },
    msg_bail_anyhow, msg_info, msg_print, msg_success,
};
use anyhow::Result;
use chrono::NaiveDate;
use clap::{Args, Subcommand};

#[derive(Debug, Args)]
pub struct TaskArgs {
    #[command(subcommand)]
    command: TaskCommand,
}

#[derive(Debug, Subcommand)]
enum TaskCommand {
    /// Create a task under the next free number
    Add {
        name: String,
        /// Owner user id
        #[arg(short, long)]
        user: i64,
        #[arg(short, long)]
        description: Option<String>,
        /// Maximum allowed time in minutes
        #[arg(short, long)]
        max_time: Option<i64>,
        /// Due date, YYYY-MM-DD
        #[arg(long)]
        due: Option<NaiveDate>,
        #[arg(short, long)]
        status: Option<String>,
    },
    /// List tasks by number
    List {
        #[arg(short, long)]
        user: Option<i64>,
        #[arg(short, long)]
        status: Option<String>,
        /// Only tasks that are not done
        #[arg(short, long)]
        pending: bool,
    },
    /// Show a task with its notes and time entries
    Show { number: i64 },
    /// Replace task fields; omitted fields keep their value
    Update {
        number: i64,
        #[arg(short, long)]
        name: Option<String>,
        #[arg(short, long)]
        user: Option<i64>,
        #[arg(short, long)]
        description: Option<String>,
        #[arg(short, long)]
        max_time: Option<i64>,
        #[arg(long)]
        due: Option<NaiveDate>,
        #[arg(short, long)]
        status: Option<String>,
    },
    /// Set the status of a task
    Status { number: i64, status: String },
    /// Delete a task with its notes and time entries
    Delete {
        number: i64,
        #[arg(short, long)]
        yes: bool,
    },
}

pub fn cmd(db: &Db, config: &Config, args: TaskArgs) -> Result<()> {
    let tasks = Tasks::new(db);

    match args.command {
        TaskCommand::Add {
            name,
            user,
            description,
            max_time,
            due,
            status,
        } => {
            let input = TaskInput {
                name,
                description,
                user_id: user,
                max_time_minutes: max_time,
                due_date: due,
                status,
            };
            let created = tasks.create(&input, &config.report.default_status)?;
            msg_success!(Message::TaskCreated(created.task_number));
        }
        TaskCommand::List { user, status, pending } => {
            let filter = TaskFilter {
                user_id: user,
                status,
                status_not: pending.then(|| config.report.done_status.clone()),
                ..TaskFilter::default()
            };
            let list = tasks.list(&filter)?;
            if list.is_empty() {
                msg_info!(Message::TasksNotFound);
                return Ok(());
            }
            msg_print!(Message::TasksHeader, true);
            View::tasks(&list)?;
        }
        TaskCommand::Show { number } => {
            let task = find_task(db, number)?;
            let annotations = Annotations::new(db).list_for_task(task.id)?;
            let entries = TimeEntries::new(db).list_for_task(task.id)?;
            View::task(&task, &annotations, &entries)?;
        }
        TaskCommand::Update {
            number,
            name,
            user,
            description,
            max_time,
            due,
            status,
        } => {
            let task = find_task(db, number)?;
            let input = TaskInput {
                name: name.unwrap_or(task.name),
                description: description.or(task.description),
                user_id: user.unwrap_or(task.user_id),
                max_time_minutes: max_time.or(task.max_time_minutes),
                due_date: due.or(task.due_date),
                status,
            };
            tasks.update(task.id, &input)?;
            msg_success!(Message::TaskUpdated(number));
        }
        TaskCommand::Status { number, status } => {
            let task = find_task(db, number)?;
            tasks.set_status(task.id, &status)?;
            msg_success!(Message::TaskStatusChanged(number, status.trim().to_string()));
        }
        TaskCommand::Delete { number, yes } => {
            let task = find_task(db, number)?;
            if confirm(Message::ConfirmDeleteTask(number, task.name), yes)? {
                tasks.delete(task.id)?;
                msg_success!(Message::TaskDeleted(number));
            }
        }
    }

    Ok(())
}

/// Looks a task up by its human-facing number.
pub(super) fn find_task(db: &Db, number: i64) -> Result<Task> {
    match Tasks::new(db).get_by_number(number)? {
        Some(task) => Ok(task),
        None => msg_bail_anyhow!(Message::TaskNotFound(number)),
    }
}
