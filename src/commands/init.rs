use crate::{
    db::db::Db,
    libs::{config::Config, messages::Message},
    msg_success,
};
use anyhow::Result;
use clap::Args;
use std::path::PathBuf;

#[derive(Debug, Args)]
pub struct InitArgs {
    /// Inferred end of open entries in reports, HH:MM
    #[arg(long)]
    cutoff: Option<String>,

    /// Clamp negative inferred durations to zero
    #[arg(long)]
    clamp_negative: Option<bool>,

    /// Status that marks a task as finished
    #[arg(long)]
    done_status: Option<String>,

    /// Status given to new tasks
    #[arg(long)]
    default_status: Option<String>,
}

pub fn cmd(args: InitArgs, mut config: Config, database: Option<PathBuf>) -> Result<()> {
    if let Some(path) = database {
        config.database = Some(path);
    }
    if let Some(cutoff) = args.cutoff {
        config.report.cutoff = cutoff;
    }
    if let Some(clamp) = args.clamp_negative {
        config.report.clamp_negative = clamp;
    }
    if let Some(status) = args.done_status {
        config.report.done_status = status;
    }
    if let Some(status) = args.default_status {
        config.report.default_status = status;
    }

    config.report.open_interval_policy()?;
    let config_path = config.save()?;
    msg_success!(Message::ConfigSaved(config_path.display().to_string()));

    let db_path = config.db_path()?;
    Db::open(&db_path)?;
    msg_success!(Message::DatabaseReady(db_path.display().to_string()));
    Ok(())
}
