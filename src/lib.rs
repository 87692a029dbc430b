//! # Taskflow - task and time tracking
//!
//! Users own tasks; tasks carry notes and time entries. Reports group the
//! resolved time entries per task or list them flat, with open entries
//! given an inferred end.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use taskflow::commands::Cli;
//!
//! fn main() -> anyhow::Result<()> {
//!     Cli::menu()
//! }
//! ```

pub mod commands;
pub mod db;
pub mod libs;
