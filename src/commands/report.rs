use super::FilterArgs;
use crate::{
    db::db::Db,
    libs::{
        config::Config,
        export::{ExportFormat, Exporter},
        messages::Message,
        report::{generate_task_report, GroupBy, ReportModel, SortOrder},
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
pub struct ReportArgs {
    #[command(subcommand)]
    command: ReportCommand,
}

#[derive(Debug, Subcommand)]
enum ReportCommand {
    /// Tasks within an inclusive task-number range
    Range {
        from: i64,
        to: i64,
        #[command(flatten)]
        filters: FilterArgs,
        #[command(flatten)]
        output: OutputArgs,
    },
    /// Tasks created between two dates, inclusive
    Dates {
        from: NaiveDate,
        to: NaiveDate,
        #[command(flatten)]
        filters: FilterArgs,
        #[command(flatten)]
        output: OutputArgs,
    },
    /// Tasks that are not done
    Pending {
        #[command(flatten)]
        filters: FilterArgs,
        #[command(flatten)]
        output: OutputArgs,
    },
}

#[derive(Debug, Clone, Args)]
struct OutputArgs {
    /// One row per entry instead of one section per task
    #[arg(long)]
    flat: bool,

    /// Write a file instead of printing
    #[arg(short, long, value_enum)]
    format: Option<ExportFormat>,

    /// Output file; defaults to a name built from the filters
    #[arg(short, long, requires = "format")]
    output: Option<PathBuf>,
}

pub fn cmd(db: &Db, config: &Config, args: ReportArgs) -> Result<()> {
    let (selection, filters, output) = match args.command {
        ReportCommand::Range { from, to, filters, output } => (Selection::task_numbers(from, to), filters, output),
        ReportCommand::Dates { from, to, filters, output } => (Selection::created_between(from, to), filters, output),
        ReportCommand::Pending { filters, output } => (Selection::pending(), filters, output),
    };
    let selection = selection
        .with_user(filters.user)
        .with_status(filters.status.clone())
        .with_has_end(filters.has_end());

    let group_by = if output.flat { GroupBy::Flat(SortOrder::Ascending) } else { GroupBy::PerTask };
    let report = generate_task_report(db, &selection, group_by, &config.report.report_options()?)?;

    render(&report, config, &output)
}

fn render(report: &ReportModel, config: &Config, output: &OutputArgs) -> Result<()> {
    match output.format {
        Some(format) => {
            let path = Exporter::new(format, output.output.clone(), &report.file_stem).export(report)?;
            msg_success!(Message::ReportSaved(path.display().to_string()));
        }
        None => View::report(report)?,
    }

    let inferred = report.inferred_count();
    if inferred > 0 {
        msg_info!(Message::InferredEndsNote(inferred, config.report.cutoff.clone()));
    }
    Ok(())
}
