use super::{confirm, task::find_task};
use crate::{
    db::{db::Db, time_entries::TimeEntries},
    libs::{
        duration::format_stored,
        error::TaskflowError,
        formatter::format_minutes,
        messages::Message,
        time_entry::{TimeEntryInput, TimeEntryPatch},
        view::View,
    },
    msg_bail_anyhow, msg_info, msg_success,
};
use anyhow::Result;
use chrono::Local;
use clap::{Args, Subcommand};

#[derive(Debug, Args)]
pub struct TimeArgs {
    #[command(subcommand)]
    command: TimeCommand,
}

#[derive(Debug, Subcommand)]
enum TimeCommand {
    /// Record an interval on a task
    Add {
        task: i64,
        /// Start, RFC 3339 or YYYY-MM-DD HH:MM (UTC)
        #[arg(short, long)]
        start: String,
        /// End; omit to leave the entry open
        #[arg(short, long)]
        end: Option<String>,
        #[arg(short, long)]
        comment: Option<String>,
    },
    /// Open an entry on a task starting now
    Start {
        task: i64,
        #[arg(short, long)]
        comment: Option<String>,
    },
    /// Close an open entry, now or at --end
    Stop {
        id: i64,
        #[arg(short, long)]
        end: Option<String>,
    },
    /// List the entries of a task, newest first
    List { task: i64 },
    /// Change an entry; the duration is recomputed
    Update {
        id: i64,
        #[arg(short, long)]
        start: Option<String>,
        #[arg(short, long, conflicts_with = "reopen")]
        end: Option<String>,
        /// Remove the end, making the entry open again
        #[arg(long)]
        reopen: bool,
        #[arg(short, long, conflicts_with = "clear_comment")]
        comment: Option<String>,
        #[arg(long)]
        clear_comment: bool,
    },
    /// Delete an entry
    Delete {
        id: i64,
        #[arg(short, long)]
        yes: bool,
    },
}

pub fn cmd(db: &Db, args: TimeArgs) -> Result<()> {
    let entries = TimeEntries::new(db);

    match args.command {
        TimeCommand::Add { task, start, end, comment } => {
            let task = find_task(db, task)?;
            let id = entries.create(task.id, &TimeEntryInput::new(&start, end.as_deref(), comment.as_deref()))?;
            msg_success!(Message::TimeEntryCreated(id));
        }
        TimeCommand::Start { task: number, comment } => {
            let task = find_task(db, number)?;
            let now = format_stored(&Local::now().fixed_offset());
            let id = entries.create(task.id, &TimeEntryInput::new(&now, None, comment.as_deref()))?;
            msg_success!(Message::TimerStarted(id, number));
        }
        TimeCommand::Stop { id, end } => {
            let end = end.unwrap_or_else(|| format_stored(&Local::now().fixed_offset()));
            let minutes = entries.stop(id, &end)?;
            msg_success!(Message::TimerStopped(id, format_minutes(minutes)));
        }
        TimeCommand::List { task: number } => {
            let task = find_task(db, number)?;
            let list = entries.list_for_task(task.id)?;
            if list.is_empty() {
                msg_info!(Message::TimeEntriesNotFound);
                return Ok(());
            }
            View::time_entries(&list)?;
        }
        TimeCommand::Update {
            id,
            start,
            end,
            reopen,
            comment,
            clear_comment,
        } => {
            let patch = TimeEntryPatch {
                start_time: start,
                end_time: if reopen { Some(None) } else { end.map(Some) },
                comment: if clear_comment { Some(None) } else { comment.map(Some) },
            };
            if patch.start_time.is_none() && patch.end_time.is_none() && patch.comment.is_none() {
                msg_bail_anyhow!(Message::NothingToUpdate);
            }
            entries.update(id, &patch)?;
            msg_success!(Message::TimeEntryUpdated(id));
        }
        TimeCommand::Delete { id, yes } => {
            if entries.get(id)?.is_none() {
                return Err(TaskflowError::not_found(format!("time entry {}", id)).into());
            }
            if confirm(Message::ConfirmDeleteTimeEntry(id), yes)? {
                entries.delete(id)?;
                msg_success!(Message::TimeEntryDeleted(id));
            }
        }
    }

    Ok(())
}
