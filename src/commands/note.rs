use super::{confirm, task::find_task};
use crate::{
    db::{annotations::Annotations, db::Db},
    libs::{annotation::AnnotationInput, error::TaskflowError, messages::Message, view::View},
    msg_info, msg_success,
};
use anyhow::Result;
use clap::{Args, Subcommand};

#[derive(Debug, Args)]
pub struct NoteArgs {
    #[command(subcommand)]
    command: NoteCommand,
}

#[derive(Debug, Subcommand)]
enum NoteCommand {
    /// Attach a note to a task
    Add { task: i64, text: String },
    /// List the notes of a task, newest first
    List { task: i64 },
    /// Replace the text of a note
    Update { id: i64, text: String },
    /// Delete a note
    Delete {
        id: i64,
        #[arg(short, long)]
        yes: bool,
    },
}

pub fn cmd(db: &Db, args: NoteArgs) -> Result<()> {
    let annotations = Annotations::new(db);

    match args.command {
        NoteCommand::Add { task, text } => {
            let task = find_task(db, task)?;
            let id = annotations.create(task.id, &AnnotationInput::new(&text))?;
            msg_success!(Message::NoteCreated(id));
        }
        NoteCommand::List { task: number } => {
            let task = find_task(db, number)?;
            let list = annotations.list_for_task(task.id)?;
            if list.is_empty() {
                msg_info!(Message::NotesNotFound(number));
                return Ok(());
            }
            View::annotations(&list)?;
        }
        NoteCommand::Update { id, text } => {
            annotations.update(id, &AnnotationInput::new(&text))?;
            msg_success!(Message::NoteUpdated(id));
        }
        NoteCommand::Delete { id, yes } => {
            if annotations.get(id)?.is_none() {
                return Err(TaskflowError::not_found(format!("annotation {}", id)).into());
            }
            if confirm(Message::ConfirmDeleteNote(id), yes)? {
                annotations.delete(id)?;
                msg_success!(Message::NoteDeleted(id));
            }
        }
    }

    Ok(())
}
