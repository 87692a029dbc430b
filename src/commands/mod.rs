//! Command-line interface.
//!
//! Every subcommand except `init` runs against one [`Db`] opened from the
//! configured path, or from `--db` when given.

pub mod entries;
pub mod init;
pub mod note;
pub mod report;
pub mod task;
pub mod time;
pub mod user;

use crate::db::db::Db;
use crate::libs::config::Config;
use crate::libs::messages::Message;
use crate::msg_info;
use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use dialoguer::{theme::ColorfulTheme, Confirm};
use std::path::PathBuf;

#[derive(Debug, Subcommand)]
enum Commands {
    #[command(about = "Write the default configuration and create the database")]
    Init(init::InitArgs),
    #[command(about = "Manage users", arg_required_else_help = true)]
    User(user::UserArgs),
    #[command(about = "Manage tasks", arg_required_else_help = true)]
    Task(task::TaskArgs),
    #[command(about = "Manage task notes", arg_required_else_help = true)]
    Note(note::NoteArgs),
    #[command(about = "Record and edit time entries", arg_required_else_help = true)]
    Time(time::TimeArgs),
    #[command(about = "Build task reports", arg_required_else_help = true)]
    Report(report::ReportArgs),
    #[command(about = "List or export time entries by start date", arg_required_else_help = true)]
    Entries(entries::EntriesArgs),
}

#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
#[command(arg_required_else_help(true))]
pub struct Cli {
    /// Database file, overriding TASKFLOW_DB and the configuration
    #[arg(long, global = true)]
    db: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

impl Cli {
    pub fn menu() -> Result<()> {
        let cli = Self::parse();
        let config = Config::read()?;

        if let Commands::Init(args) = cli.command {
            return init::cmd(args, config, cli.db);
        }

        let path = match cli.db {
            Some(path) => path,
            None => config.db_path()?,
        };
        let db = Db::open(&path)?;

        match cli.command {
            Commands::Init(_) => Ok(()),
            Commands::User(args) => user::cmd(&db, args),
            Commands::Task(args) => task::cmd(&db, &config, args),
            Commands::Note(args) => note::cmd(&db, args),
            Commands::Time(args) => time::cmd(&db, args),
            Commands::Report(args) => report::cmd(&db, &config, args),
            Commands::Entries(args) => entries::cmd(&db, &config, args),
        }
    }
}

/// Narrowing shared by report and entry commands.
#[derive(Debug, Clone, Args)]
pub struct FilterArgs {
    /// Only tasks owned by this user id
    #[arg(short, long)]
    pub user: Option<i64>,

    /// Only tasks with exactly this status
    #[arg(short, long)]
    pub status: Option<String>,

    /// Only entries with a recorded end
    #[arg(long, conflicts_with = "open")]
    pub closed: bool,

    /// Only entries without a recorded end
    #[arg(long)]
    pub open: bool,
}

impl FilterArgs {
    pub fn has_end(&self) -> Option<bool> {
        match (self.closed, self.open) {
            (true, _) => Some(true),
            (_, true) => Some(false),
            _ => None,
        }
    }
}

/// Asks before a destructive action unless `yes` is set.
pub(crate) fn confirm(prompt: Message, yes: bool) -> Result<bool> {
    if yes {
        return Ok(true);
    }

    let confirmed = Confirm::with_theme(&ColorfulTheme::default())
        .with_prompt(prompt.to_string())
        .default(false)
        .interact()?;

    if !confirmed {
        msg_info!(Message::OperationCancelled);
    }
    Ok(confirmed)
}
