use std::process::ExitCode;
use taskflow::commands::Cli;
use taskflow::libs::messages::{macros::is_debug_mode, Message};
use taskflow::{msg_debug, msg_error};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

fn main() -> ExitCode {
    dotenv::dotenv().ok();

    if is_debug_mode() {
        tracing_subscriber::registry()
            .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "taskflow=debug".into()))
            .with(tracing_subscriber::fmt::layer())
            .init();
        msg_debug!(Message::DebugModeEnabled);
    }

    match Cli::menu() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::debug!(error = ?e, "command failed");
            msg_error!(e);
            ExitCode::FAILURE
        }
    }
}
