use anyhow::Result;

pub use args::{Arguments, Command};
pub use exit_status::ExitStatus;

pub mod args;
mod commands;
mod exit_status;
mod report;

pub fn run_cli(args: Arguments) -> Result<ExitStatus> {
    match args.with_command_or_help().and_then(|args| args.command) {
        Some(command) => commands::run(command),
        None => Ok(ExitStatus::Success),
    }
}
