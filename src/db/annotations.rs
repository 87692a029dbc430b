//! Free-text notes attached to tasks.

use super::db::Db;
use crate::libs::annotation::{Annotation, AnnotationInput};
use crate::libs::error::{Result, TaskflowError};
use rusqlite::{params, Connection, OptionalExtension, Row};

const TASK_EXISTS: &str = "SELECT 1 FROM tasks WHERE id = ?1";
const INSERT_ANNOTATION: &str = "INSERT INTO annotations (task_id, text) VALUES (?1, ?2)";
const SELECT_TASK_ANNOTATIONS: &str = "SELECT id, task_id, text, created_at FROM annotations
    WHERE task_id = ?1
    ORDER BY created_at DESC, id DESC";
const SELECT_ANNOTATION: &str = "SELECT id, task_id, text, created_at FROM annotations WHERE id = ?1";
const UPDATE_ANNOTATION: &str = "UPDATE annotations SET text = ?2 WHERE id = ?1";
const DELETE_ANNOTATION: &str = "DELETE FROM annotations WHERE id = ?1";

pub struct Annotations<'a> {
    conn: &'a Connection,
}

impl<'a> Annotations<'a> {
    pub fn new(db: &'a Db) -> Self {
        Annotations { conn: &db.conn }
    }

    pub fn create(&self, task_id: i64, input: &AnnotationInput) -> Result<i64> {
        input.validate()?;
        if self.conn.query_row(TASK_EXISTS, params![task_id], |_| Ok(())).optional()?.is_none() {
            return Err(TaskflowError::not_found(format!("task {}", task_id)));
        }
        self.conn.execute(INSERT_ANNOTATION, params![task_id, input.text.trim()])?;
        let id = self.conn.last_insert_rowid();
        tracing::debug!(task_id, annotation_id = id, "created annotation");
        Ok(id)
    }

    /// Annotations of one task, newest first.
    pub fn list_for_task(&self, task_id: i64) -> Result<Vec<Annotation>> {
        let mut stmt = self.conn.prepare(SELECT_TASK_ANNOTATIONS)?;
        let annotations = stmt.query_map(params![task_id], map_annotation)?.collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(annotations)
    }

    pub fn get(&self, id: i64) -> Result<Option<Annotation>> {
        Ok(self.conn.query_row(SELECT_ANNOTATION, params![id], map_annotation).optional()?)
    }

    pub fn update(&self, id: i64, input: &AnnotationInput) -> Result<()> {
        input.validate()?;
        if self.conn.execute(UPDATE_ANNOTATION, params![id, input.text.trim()])? == 0 {
            return Err(TaskflowError::not_found(format!("annotation {}", id)));
        }
        Ok(())
    }

    pub fn delete(&self, id: i64) -> Result<()> {
        if self.conn.execute(DELETE_ANNOTATION, params![id])? == 0 {
            return Err(TaskflowError::not_found(format!("annotation {}", id)));
        }
        Ok(())
    }
}

fn map_annotation(row: &Row) -> rusqlite::Result<Annotation> {
    Ok(Annotation {
        id: row.get(0)?,
        task_id: row.get(1)?,
        text: row.get(2)?,
        created_at: row.get(3)?,
    })
}
