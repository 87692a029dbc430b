use super::annotation::Annotation;
use super::formatter::{format_hours, format_instant, format_minutes, format_optional_minutes, format_resolved_end};
use super::report::{ReportBody, ReportModel, ReportRow, TaskSection};
use super::task::Task;
use super::time_entry::TimeEntry;
use super::user::User;
use anyhow::Result;
use prettytable::{row, Table};

pub struct View {}

impl View {
    pub fn users(users: &[User]) -> Result<()> {
        let mut table = Table::new();

        table.add_row(row!["ID", "NAME", "EMAIL", "CREATED"]);
        for user in users {
            table.add_row(row![user.id, user.name, user.email.as_deref().unwrap_or(""), user.created_at]);
        }
        table.printstd();

        Ok(())
    }

    pub fn tasks(tasks: &[Task]) -> Result<()> {
        let mut table = Table::new();

        table.add_row(row!["#", "NAME", "USER", "STATUS", "MAX TIME", "DUE", "CREATED"]);
        for task in tasks {
            table.add_row(row![
                task.task_number,
                task.name,
                task.user_name.as_deref().unwrap_or("-"),
                task.status,
                format_optional_minutes(task.max_time_minutes),
                task.due_date.map(|d| d.to_string()).unwrap_or_default(),
                task.created_at
            ]);
        }
        table.printstd();

        Ok(())
    }

    /// Task header followed by its notes and time entries.
    pub fn task(task: &Task, annotations: &[Annotation], entries: &[TimeEntry]) -> Result<()> {
        let mut table = Table::new();

        table.add_row(row!["Task", format!("#{} {}", task.task_number, task.name)]);
        table.add_row(row!["User", task.user_name.as_deref().unwrap_or("-")]);
        table.add_row(row!["Status", task.status]);
        table.add_row(row!["Description", task.description.as_deref().unwrap_or("")]);
        table.add_row(row!["Max time", format_optional_minutes(task.max_time_minutes)]);
        table.add_row(row!["Due", task.due_date.map(|d| d.to_string()).unwrap_or_default()]);
        table.add_row(row!["Created", task.created_at]);
        table.printstd();

        if !annotations.is_empty() {
            Self::annotations(annotations)?;
        }
        if !entries.is_empty() {
            Self::time_entries(entries)?;
        }

        Ok(())
    }

    pub fn annotations(annotations: &[Annotation]) -> Result<()> {
        let mut table = Table::new();

        table.add_row(row!["ID", "NOTE", "CREATED"]);
        for annotation in annotations {
            table.add_row(row![annotation.id, annotation.text, annotation.created_at]);
        }
        table.printstd();

        Ok(())
    }

    /// Stored entries; open ones show no end or duration.
    pub fn time_entries(entries: &[TimeEntry]) -> Result<()> {
        let mut table = Table::new();

        table.add_row(row!["ID", "START", "END", "DURATION", "COMMENT"]);
        for entry in entries {
            table.add_row(row![
                entry.id,
                format_instant(&entry.start_time),
                entry.end_time.as_ref().map(format_instant).unwrap_or_else(|| "open".to_string()),
                format_optional_minutes(entry.duration_minutes),
                entry.comment.as_deref().unwrap_or("")
            ]);
        }
        table.printstd();

        Ok(())
    }

    /// Resolved rows across tasks. Inferred ends carry a `*`.
    pub fn entry_rows(rows: &[ReportRow]) -> Result<()> {
        let mut table = Table::new();

        table.add_row(row!["ID", "TASK", "USER", "STATUS", "START", "END", "DURATION", "COMMENT"]);
        for r in rows {
            table.add_row(row![
                r.entry_id,
                format!("#{} {}", r.task_number, r.task_name),
                r.user_name.as_deref().unwrap_or("-"),
                r.task_status,
                format_instant(&r.start),
                format_resolved_end(&r.end, r.inferred),
                format_minutes(r.minutes),
                r.comment.as_deref().unwrap_or("")
            ]);
        }
        let total: i64 = rows.iter().map(|r| r.minutes).sum();
        table.add_row(row!["", "", "", "", "", "TOTAL", format_minutes(total), format!("{} h", format_hours(total))]);
        table.printstd();

        Ok(())
    }

    pub fn report(report: &ReportModel) -> Result<()> {
        println!("{}", report.title);

        match &report.body {
            ReportBody::PerTask(sections) => {
                for section in sections {
                    Self::section(section)?;
                }
                println!("Grand total: {} ({} h)", format_minutes(report.grand_total_minutes), format_hours(report.grand_total_minutes));
            }
            ReportBody::Flat(rows) => Self::entry_rows(rows)?,
        }

        Ok(())
    }

    fn section(section: &TaskSection) -> Result<()> {
        println!(
            "\n#{} {} [{}] {}",
            section.task_number,
            section.name,
            section.status,
            section.user_name.as_deref().unwrap_or("-")
        );

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
        table.add_row(row!["", "", "TOTAL", format_minutes(section.total_minutes), format!("{} h", format_hours(section.total_minutes))]);
        table.printstd();

        Ok(())
    }
}
