use super::confirm;
use crate::{
    db::{db::Db, users::Users},
    libs::{error::TaskflowError, messages::Message, user::UserInput, view::View},
    msg_info, msg_success,
};
use anyhow::Result;
use clap::{Args, Subcommand};

#[derive(Debug, Args)]
pub struct UserArgs {
    #[command(subcommand)]
    command: UserCommand,
}

#[derive(Debug, Subcommand)]
enum UserCommand {
    /// Create a user
    Add {
        name: String,
        #[arg(short, long)]
        email: Option<String>,
    },
    /// List users by name
    List,
    /// Delete a user; their tasks are kept
    Delete {
        id: i64,
        #[arg(short, long)]
        yes: bool,
    },
}

pub fn cmd(db: &Db, args: UserArgs) -> Result<()> {
    let users = Users::new(db);

    match args.command {
        UserCommand::Add { name, email } => {
            let id = users.create(&UserInput::new(&name, email.as_deref()))?;
            msg_success!(Message::UserCreated(id));
        }
        UserCommand::List => {
            let list = users.list()?;
            if list.is_empty() {
                msg_info!(Message::UsersNotFound);
                return Ok(());
            }
            View::users(&list)?;
        }
        UserCommand::Delete { id, yes } => {
            let user = users.get(id)?.ok_or_else(|| TaskflowError::not_found(format!("user {}", id)))?;
            if confirm(Message::ConfirmDeleteUser(user.name), yes)? {
                users.delete(id)?;
                msg_success!(Message::UserDeleted(id));
            }
        }
    }

    Ok(())
}
