//! Core library modules for taskflow.
//!
//! - Domain types and validated inputs: [`user`], [`task`], [`annotation`], [`time_entry`]
//! - Duration arithmetic and open-interval resolution: [`duration`], [`interval`]
//! - Report selection, aggregation and rendering: [`selection`], [`report`], [`export`], [`view`]
//! - Infrastructure: [`config`], [`data_storage`], [`error`], [`messages`], [`formatter`]

pub mod annotation;
pub mod config;
pub mod data_storage;
pub mod duration;
pub mod error;
pub mod export;
pub mod formatter;
pub mod interval;
pub mod messages;
pub mod report;
pub mod selection;
pub mod task;
pub mod time_entry;
pub mod user;
pub mod view;
