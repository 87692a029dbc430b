use crate::libs::error::{Result, TaskflowError};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize)]
pub struct User {
    pub id: i64,
    pub name: String,
    pub email: Option<String>,
    pub created_at: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UserInput {
    pub name: String,
    #[serde(default)]
    pub email: Option<String>,
}

impl UserInput {
    pub fn new(name: &str, email: Option<&str>) -> Self {
        UserInput {
            name: name.to_string(),
            email: email.map(str::to_string),
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(TaskflowError::validation("user name must not be empty"));
        }
        Ok(())
    }
}
