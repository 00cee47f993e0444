use std::path::Path;

use anyhow::{Context, Result};

use super::search::{options_from, scope_from};
use crate::cancel::CancelToken;
use crate::cli::ExitStatus;
use crate::cli::args::ReplaceCommand;
use crate::cli::report;
use crate::config::load_config;
use crate::search::replace_all;
use crate::ts;

pub fn replace(cmd: ReplaceCommand) -> Result<ExitStatus> {
    let config = load_config(Path::new("."))?.config;
    let mut parsed = ts::load(&cmd.catalog)
        .with_context(|| format!("Failed to load catalog: {}", cmd.catalog.display()))?;

    let scope = scope_from(&cmd.matching);
    let options = options_from(&cmd.matching, &config);
    let report = replace_all(
        &mut parsed.catalog,
        &cmd.query,
        &cmd.replacement,
        scope,
        &options,
        &CancelToken::new(),
    )?;

    if cmd.apply {
        ts::save(&parsed.catalog, &cmd.catalog)
            .with_context(|| format!("Failed to save catalog: {}", cmd.catalog.display()))?;
    }
    report::print_replace_report(&report, cmd.apply);

    Ok(ExitStatus::Success)
}
