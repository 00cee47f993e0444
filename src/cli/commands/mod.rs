pub mod check;
pub mod replace;
pub mod search;
pub mod stats;
pub mod translate;

mod helper;

use std::{fs, path::Path};

use anyhow::Result;

use super::ExitStatus;
use super::args::Command;
use crate::config::{CONFIG_FILE_NAME, default_config_json};

pub fn run(command: Command) -> Result<ExitStatus> {
    match command {
        Command::Check(cmd) => check::check(cmd),
        Command::Translate(cmd) => translate::translate(cmd),
        Command::Search(cmd) => search::search(cmd),
        Command::Replace(cmd) => replace::replace(cmd),
        Command::Stats(cmd) => stats::stats(cmd),
        Command::Init => init(),
    }
}

fn init() -> Result<ExitStatus> {
    let config_path = Path::new(CONFIG_FILE_NAME);
    if config_path.exists() {
        anyhow::bail!("{} already exists", CONFIG_FILE_NAME);
    }

    fs::write(config_path, default_config_json()?)?;
    println!("Created {}", CONFIG_FILE_NAME);
    Ok(ExitStatus::Success)
}
