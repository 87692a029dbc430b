use super::FilterArgs;
use crate::{
    db::db::Db,
    libs::{
        config::Config,
        export::{ExportFormat, Exporter},
        messages::Message,
        report::{export_entries, list_entries},
        selection::Selection,
        view::View,
    },
    msg_info, msg_success,
};
use anyhow::Result;
use chrono::NaiveDate;
use clap::{Args, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Args)]
pub struct EntriesArgs {
    #[command(subcommand)]
    command: EntriesCommand,
}

#[derive(Debug, Subcommand)]
enum EntriesCommand {
    /// Print entries started between two dates, newest first
    List {
        from: NaiveDate,
        to: NaiveDate,
        #[command(flatten)]
        filters: FilterArgs,
    },
    /// Write entries started between two dates to a file
    Export {
        from: NaiveDate,
        to: NaiveDate,
        #[command(flatten)]
        filters: FilterArgs,
        #[arg(short, long, value_enum, default_value = "excel")]
        format: ExportFormat,
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

pub fn cmd(db: &Db, config: &Config, args: EntriesArgs) -> Result<()> {
    let options = config.report.report_options()?;

    match args.command {
        EntriesCommand::List { from, to, filters } => {
            let selection = selection(from, to, &filters);
            let rows = list_entries(db, &selection, &options)?;
            if rows.is_empty() {
                msg_info!(Message::TimeEntriesNotFound);
                return Ok(());
            }
            View::entry_rows(&rows)?;
        }
        EntriesCommand::Export {
            from,
            to,
            filters,
            format,
            output,
        } => {
            let selection = selection(from, to, &filters);
            let report = export_entries(db, &selection, &options)?;
            let path = Exporter::new(format, output, &report.file_stem).export(&report)?;
            msg_success!(Message::EntriesExported(report.rows().len(), path.display().to_string()));
        }
    }

    Ok(())
}

fn selection(from: NaiveDate, to: NaiveDate, filters: &FilterArgs) -> Selection {
    Selection::entries_between(from, to)
        .with_user(filters.user)
        .with_status(filters.status.clone())
        .with_has_end(filters.has_end())
}
