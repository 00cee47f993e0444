use std::path::Path;

use anyhow::{Context, Result, bail};

use super::helper;
use crate::cli::ExitStatus;
use crate::cli::args::StatsCommand;
use crate::cli::report;
use crate::config::load_config;
use crate::ts;

pub fn stats(cmd: StatsCommand) -> Result<ExitStatus> {
    let config = load_config(Path::new("."))?.config;
    let paths = helper::collect_catalog_paths(&cmd.paths, &config)?;
    if paths.is_empty() {
        bail!("No catalog files found");
    }

    let mut rows = Vec::with_capacity(paths.len());
    for path in &paths {
        let parsed = ts::load(path)
            .with_context(|| format!("Failed to load catalog: {}", path.display()))?;
        if cmd.common.verbose {
            for warning in &parsed.warnings {
                eprintln!("warning: {}: {warning}", path.display());
            }
        }
        rows.push((path.display().to_string(), parsed.catalog.stats()));
    }
    report::print_stats(&rows);

    Ok(ExitStatus::Success)
}
