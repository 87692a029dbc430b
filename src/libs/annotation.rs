//! Free-text notes attached to a task.

use crate::libs::error::{Result, TaskflowError};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize)]
pub struct Annotation {
    pub id: i64,
    pub task_id: i64,
    pub text: String,
    pub created_at: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AnnotationInput {
    pub text: String,
}

impl AnnotationInput {
    pub fn new(text: &str) -> Self {
        AnnotationInput { text: text.to_string() }
    }

    pub fn validate(&self) -> Result<()> {
        if self.text.trim().is_empty() {
            return Err(TaskflowError::validation("annotation text must not be empty"));
        }
        Ok(())
    }
}
