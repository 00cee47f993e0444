use std::path::Path;

use anyhow::{Context, Result, bail};
use rayon::prelude::*;

use super::helper;
use crate::cancel::CancelToken;
use crate::checks::{CheckSet, validate_all};
use crate::cli::args::{CheckCommand, CheckRule};
use crate::cli::report;
use crate::cli::ExitStatus;
use crate::config::{Config, load_config};
use crate::findings::Finding;
use crate::phrasebook::PhraseBook;
use crate::ts;

pub fn check(cmd: CheckCommand) -> Result<ExitStatus> {
    let config = load_config(Path::new("."))?.config;
    let checks = check_set(&cmd.checks, &config);
    let books = helper::load_phrase_books(&cmd.common.phrasebooks, &config)?;
    let paths = helper::collect_catalog_paths(&cmd.paths, &config)?;
    if paths.is_empty() {
        bail!("No catalog files found");
    }

    let results: Vec<(String, Vec<Finding>)> = paths
        .par_iter()
        .map(|path| -> Result<(String, Vec<Finding>)> {
            let parsed = ts::load(path)
                .with_context(|| format!("Failed to load catalog: {}", path.display()))?;
            let mut findings = helper::warning_findings(path, &parsed.warnings);
            let book_refs: Vec<&PhraseBook> = books.iter().collect();
            findings.extend(validate_all(
                &parsed.catalog,
                &checks,
                &book_refs,
                &CancelToken::new(),
            ));
            Ok((path.display().to_string(), findings))
        })
        .collect::<Result<_>>()?;

    let mut total = 0;
    for (path, findings) in &results {
        if cmd.common.verbose {
            println!("Checked {path}");
        }
        report::report_findings(path, findings);
        total += findings.len();
    }
    report::print_check_summary(total, results.len());

    Ok(if total == 0 {
        ExitStatus::Success
    } else {
        ExitStatus::Failure
    })
}

fn check_set(rules: &[CheckRule], config: &Config) -> CheckSet {
    if rules.is_empty() {
        return config.check_set();
    }
    let mut checks = CheckSet::none();
    checks.accelerator_marker = config.accelerator_marker;
    for rule in rules {
        match rule {
            CheckRule::Accelerators => checks.accelerators = true,
            CheckRule::Punctuation => checks.punctuation = true,
            CheckRule::PlaceMarkers => checks.place_markers = true,
            CheckRule::PhraseSuggestions => checks.phrase_suggestions = true,
        }
    }
    checks
}
