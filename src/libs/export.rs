//! Rendering of report models to files.
//!
//! ## Formats
//!
//! - **Excel**: per-task reports get a summary sheet plus one worksheet per
//!   task; flat listings get a single sheet. Inferred end cells are
//!   highlighted.
//! - **CSV**: one row per entry with an explicit `end_inferred` column and a
//!   closing total row.
//! - **JSON**: the serialized [`ReportModel`].
//! - **Text**: a plain-text document of tables, inferred ends marked `*`.
//!
//! ```rust,no_run
//! use taskflow::libs::export::{ExportFormat, Exporter};
//! # fn render(report: &taskflow::libs::report::ReportModel) -> anyhow::Result<()> {
//! let exporter = Exporter::new(ExportFormat::Excel, None, &report.file_stem);
//! let path = exporter.export(report)?;
//! # Ok(())
//! # }
//! ```

use crate::libs::duration::format_stored;
use crate::libs::formatter::{format_hours, format_instant, format_minutes, format_optional_minutes, format_resolved_end};
use crate::libs::report::{ReportBody, ReportModel, ReportRow, TaskSection};
use anyhow::Result;
use prettytable::{row, Table};
use rust_xlsxwriter::{Color, Format, Workbook, Worksheet, XlsxError};
use std::collections::HashSet;
use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

const SHEET_NAME_MAX: usize = 31;
const SHEET_NAME_FORBIDDEN: [char; 7] = ['[', ']', ':', '*', '?', '/', '\\'];

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum ExportFormat {
    /// Workbook with one sheet per task.
    Excel,
    Csv,
    Json,
    /// Plain-text document.
    Text,
}

impl ExportFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Excel => "xlsx",
            ExportFormat::Csv => "csv",
            ExportFormat::Json => "json",
            ExportFormat::Text => "txt",
        }
    }
}

pub struct Exporter {
    format: ExportFormat,
    output_path: PathBuf,
}

impl Exporter {
    /// Writes to `output_path`, or to `{default_stem}.{ext}` when none is given.
    pub fn new(format: ExportFormat, output_path: Option<PathBuf>, default_stem: &str) -> Self {
        let output_path = output_path.unwrap_or_else(|| PathBuf::from(format!("{}.{}", default_stem, format.extension())));
        Self { format, output_path }
    }

    pub fn output_path(&self) -> &Path {
        &self.output_path
    }

    pub fn export(&self, report: &ReportModel) -> Result<PathBuf> {
        match self.format {
            ExportFormat::Excel => self.export_excel(report)?,
            ExportFormat::Csv => self.export_csv(report)?,
            ExportFormat::Json => {
                let json = serde_json::to_string_pretty(report)?;
                File::create(&self.output_path)?.write_all(json.as_bytes())?;
            }
            ExportFormat::Text => {
                let text = render_text(report);
                File::create(&self.output_path)?.write_all(text.as_bytes())?;
            }
        }

        tracing::debug!(path = %self.output_path.display(), format = ?self.format, rows = report.rows().len(), "exported report");
        Ok(self.output_path.clone())
    }

    fn export_csv(&self, report: &ReportModel) -> Result<()> {
        let mut wtr = csv::Writer::from_path(&self.output_path)?;

        wtr.write_record([
            "entry_id",
            "task_number",
            "task_name",
            "task_status",
            "user",
            "start",
            "end",
            "end_inferred",
            "minutes",
            "duration",
            "comment",
        ])?;
        for r in report.rows() {
            wtr.write_record([
                r.entry_id.to_string(),
                r.task_number.to_string(),
                r.task_name.clone(),
                r.task_status.to_string(),
                r.user_name.clone().unwrap_or_default(),
                format_stored(&r.start),
                format_stored(&r.end),
                r.inferred.to_string(),
                r.minutes.to_string(),
                format_minutes(r.minutes),
                r.comment.clone().unwrap_or_default(),
            ])?;
        }
        wtr.write_record([
            "TOTAL".to_string(),
            String::new(),
            String::new(),
            String::new(),
            String::new(),
            String::new(),
            String::new(),
            String::new(),
            report.grand_total_minutes.to_string(),
            format_minutes(report.grand_total_minutes),
            String::new(),
        ])?;

        wtr.flush()?;
        Ok(())
    }

    fn export_excel(&self, report: &ReportModel) -> Result<()> {
        let formats = SheetFormats::new();
        let mut workbook = Workbook::new();
        let mut used = HashSet::new();

        match &report.body {
            ReportBody::PerTask(sections) => {
                let summary = workbook.add_worksheet();
                summary.set_name(unique_sheet_name("Summary", &mut used))?;
                write_summary_sheet(summary, report, sections, &formats)?;

                for section in sections {
                    let worksheet = workbook.add_worksheet();
                    worksheet.set_name(unique_sheet_name(&format!("#{} {}", section.task_number, section.name), &mut used))?;
                    write_section_sheet(worksheet, section, &formats)?;
                }
            }
            ReportBody::Flat(rows) => {
                let worksheet = workbook.add_worksheet();
                worksheet.set_name(unique_sheet_name("Entries", &mut used))?;
                write_flat_sheet(worksheet, &report.title, rows, report.grand_total_minutes, &formats)?;
            }
        }

        workbook.save(&self.output_path)?;
        Ok(())
    }
}

struct SheetFormats {
    title: Format,
    header: Format,
    label: Format,
    inferred: Format,
    total: Format,
}

impl SheetFormats {
    fn new() -> Self {
        SheetFormats {
            title: Format::new()
                .set_bold()
                .set_font_size(14.0)
                .set_background_color(Color::RGB(0x4F5D75))
                .set_font_color(Color::RGB(0xFFFFFF)),
            header: Format::new().set_bold().set_background_color(Color::RGB(0xBFC0C0)),
            label: Format::new().set_bold(),
            inferred: Format::new().set_italic().set_background_color(Color::RGB(0xEF8354)),
            total: Format::new().set_bold().set_background_color(Color::RGB(0xBFC0C0)),
        }
    }
}

fn write_summary_sheet(worksheet: &mut Worksheet, report: &ReportModel, sections: &[TaskSection], formats: &SheetFormats) -> Result<(), XlsxError> {
    worksheet.merge_range(0, 0, 0, 5, &report.title, &formats.title)?;

    let headers = ["Task", "Name", "User", "Status", "Entries", "Total"];
    for (col, header) in headers.iter().enumerate() {
        worksheet.write_string_with_format(2, col as u16, *header, &formats.header)?;
    }

    let mut row = 3;
    for section in sections {
        worksheet.write_number(row, 0, section.task_number as f64)?;
        worksheet.write_string(row, 1, &section.name)?;
        worksheet.write_string(row, 2, section.user_name.as_deref().unwrap_or(""))?;
        worksheet.write_string(row, 3, section.status.as_str())?;
        worksheet.write_number(row, 4, section.rows.len() as f64)?;
        worksheet.write_string(row, 5, format_minutes(section.total_minutes))?;
        row += 1;
    }
    worksheet.write_string_with_format(row, 4, "TOTAL", &formats.total)?;
    worksheet.write_string_with_format(row, 5, format_minutes(report.grand_total_minutes), &formats.total)?;

    worksheet.autofit();
    Ok(())
}

fn write_section_sheet(worksheet: &mut Worksheet, section: &TaskSection, formats: &SheetFormats) -> Result<(), XlsxError> {
    worksheet.merge_range(0, 0, 0, 5, &format!("Task #{}: {}", section.task_number, section.name), &formats.title)?;

    let details = [
        ("Description", section.description.clone().unwrap_or_default()),
        ("User", section.user_name.clone().unwrap_or_default()),
        ("Status", section.status.to_string()),
        ("Max time", format_optional_minutes(section.max_time_minutes)),
        ("Due date", section.due_date.map(|d| d.format("%d/%m/%Y").to_string()).unwrap_or_default()),
    ];
    let mut row = 2;
    for (label, value) in details.iter() {
        worksheet.write_string_with_format(row, 0, *label, &formats.label)?;
        worksheet.write_string(row, 1, value)?;
        row += 1;
    }

    row += 1;
    write_entry_header(worksheet, row, &["ID", "Start", "End", "Minutes", "Duration", "Comment"], formats)?;
    row += 1;
    for r in &section.rows {
        worksheet.write_number(row, 0, r.entry_id as f64)?;
        worksheet.write_string(row, 1, format_instant(&r.start))?;
        write_end_cell(worksheet, row, 2, r, formats)?;
        worksheet.write_number(row, 3, r.minutes as f64)?;
        worksheet.write_string(row, 4, format_minutes(r.minutes))?;
        worksheet.write_string(row, 5, r.comment.as_deref().unwrap_or(""))?;
        row += 1;
    }
    worksheet.write_string_with_format(row, 2, "TOTAL", &formats.total)?;
    worksheet.write_number_with_format(row, 3, section.total_minutes as f64, &formats.total)?;
    worksheet.write_string_with_format(row, 4, format_minutes(section.total_minutes), &formats.total)?;

    worksheet.autofit();
    worksheet.set_column_width(5, 40)?;
    Ok(())
}

fn write_flat_sheet(worksheet: &mut Worksheet, title: &str, rows: &[ReportRow], total: i64, formats: &SheetFormats) -> Result<(), XlsxError> {
    worksheet.merge_range(0, 0, 0, 9, title, &formats.title)?;

    write_entry_header(
        worksheet,
        2,
        &["ID", "Task", "Name", "Status", "User", "Start", "End", "Minutes", "Duration", "Comment"],
        formats,
    )?;
    let mut row = 3;
    for r in rows {
        worksheet.write_number(row, 0, r.entry_id as f64)?;
        worksheet.write_number(row, 1, r.task_number as f64)?;
        worksheet.write_string(row, 2, &r.task_name)?;
        worksheet.write_string(row, 3, r.task_status.as_str())?;
        worksheet.write_string(row, 4, r.user_name.as_deref().unwrap_or(""))?;
        worksheet.write_string(row, 5, format_instant(&r.start))?;
        write_end_cell(worksheet, row, 6, r, formats)?;
        worksheet.write_number(row, 7, r.minutes as f64)?;
        worksheet.write_string(row, 8, format_minutes(r.minutes))?;
        worksheet.write_string(row, 9, r.comment.as_deref().unwrap_or(""))?;
        row += 1;
    }
    worksheet.write_string_with_format(row, 6, "TOTAL", &formats.total)?;
    worksheet.write_number_with_format(row, 7, total as f64, &formats.total)?;
    worksheet.write_string_with_format(row, 8, format_minutes(total), &formats.total)?;

    worksheet.autofit();
    Ok(())
}

fn write_entry_header(worksheet: &mut Worksheet, row: u32, headers: &[&str], formats: &SheetFormats) -> Result<(), XlsxError> {
    for (col, header) in headers.iter().enumerate() {
        worksheet.write_string_with_format(row, col as u16, *header, &formats.header)?;
    }
    Ok(())
}

fn write_end_cell(worksheet: &mut Worksheet, row: u32, col: u16, r: &ReportRow, formats: &SheetFormats) -> Result<(), XlsxError> {
    if r.inferred {
        worksheet.write_string_with_format(row, col, format_resolved_end(&r.end, true), &formats.inferred)?;
    } else {
        worksheet.write_string(row, col, format_instant(&r.end))?;
    }
    Ok(())
}

/// Plain-text document: title, one table per task or one flat table, totals.
pub fn render_text(report: &ReportModel) -> String {
    let mut out = format!("{}\n{}\n", report.title, "=".repeat(report.title.chars().count()));

    match &report.body {
        ReportBody::PerTask(sections) => {
            for section in sections {
                out.push_str(&format!(
                    "\nTask #{}: {} [{}] {}\n",
                    section.task_number,
                    section.name,
                    section.status,
                    section.user_name.as_deref().unwrap_or("-")
                ));
                if let Some(description) = &section.description {
                    out.push_str(description);
                    out.push('\n');
                }

                let mut table = Table::new();
                table.add_row(row!["ID", "START", "END", "DURATION", "COMMENT"]);
                for r in &section.rows {
                    table.add_row(row![
                        r.entry_id,
                        format_instant(&r.start),
                        format_resolved_end(&r.end, r.inferred),
                        format_minutes(r.minutes),
                        r.comment.as_deref().unwrap_or("")
                    ]);
                }
                table.add_row(row!["", "", "TOTAL", format_minutes(section.total_minutes), ""]);
                out.push_str(&table.to_string());
            }
        }
        ReportBody::Flat(rows) => {
            let mut table = Table::new();
            table.add_row(row!["ID", "TASK", "USER", "START", "END", "DURATION", "COMMENT"]);
            for r in rows {
                table.add_row(row![
                    r.entry_id,
                    format!("#{} {}", r.task_number, r.task_name),
                    r.user_name.as_deref().unwrap_or("-"),
                    format_instant(&r.start),
                    format_resolved_end(&r.end, r.inferred),
                    format_minutes(r.minutes),
                    r.comment.as_deref().unwrap_or("")
                ]);
            }
            out.push_str(&table.to_string());
        }
    }

    out.push_str(&format!(
        "\nGrand total: {} ({} h)\n",
        format_minutes(report.grand_total_minutes),
        format_hours(report.grand_total_minutes)
    ));
    if report.inferred_count() > 0 {
        out.push_str("* end inferred for an open entry\n");
    }
    out
}

/// Valid, unique worksheet name derived from `raw`.
fn unique_sheet_name(raw: &str, used: &mut HashSet<String>) -> String {
    let base = sheet_name(raw);
    let mut name = base.clone();
    let mut n = 2;
    while used.contains(&name.to_lowercase()) {
        let suffix = format!(" ({})", n);
        let keep = SHEET_NAME_MAX - suffix.chars().count();
        name = format!("{}{}", base.chars().take(keep).collect::<String>(), suffix);
        n += 1;
    }
    used.insert(name.to_lowercase());
    name
}

/// Replaces characters Excel forbids in sheet names and truncates to 31.
fn sheet_name(raw: &str) -> String {
    let cleaned: String = raw
        .chars()
        .map(|c| if SHEET_NAME_FORBIDDEN.contains(&c) { '_' } else { c })
        .collect();
    let trimmed: String = cleaned.trim().trim_matches('\'').chars().take(SHEET_NAME_MAX).collect();
    let trimmed = trimmed.trim_end_matches('\'').trim_end().to_string();
    if trimmed.is_empty() {
        "Sheet".to_string()
    } else {
        trimmed
    }
}
