//! User-facing messages.
//!
//! Every sentence the command layer prints is a [`Message`] variant; the
//! text lives in one `Display` impl and output goes through the macros in
//! [`macros`].

pub mod display;
pub mod macros;
pub mod types;

pub use types::Message;
