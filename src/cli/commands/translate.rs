use std::path::Path;

use anyhow::{Context, Result, bail};

use super::helper;
use crate::batch::{BatchOptions, batch_translate};
use crate::cancel::CancelToken;
use crate::cli::ExitStatus;
use crate::cli::args::TranslateCommand;
use crate::cli::report;
use crate::config::load_config;
use crate::phrasebook::PhraseBook;
use crate::ts;

pub fn translate(cmd: TranslateCommand) -> Result<ExitStatus> {
    let config = load_config(Path::new("."))?.config;
    let books = helper::load_phrase_books(&cmd.common.phrasebooks, &config)?;
    if books.is_empty() {
        bail!("No phrase books given (use --phrasebook or add them to the config)");
    }

    let mut parsed = ts::load(&cmd.catalog)
        .with_context(|| format!("Failed to load catalog: {}", cmd.catalog.display()))?;
    if cmd.common.verbose {
        for warning in &parsed.warnings {
            eprintln!("warning: {warning}");
        }
    }

    let options = BatchOptions {
        retranslate_existing: cmd.retranslate,
        include_finished: cmd.include_finished,
        mark_finished_on_match: cmd.mark_finished,
    };
    let book_refs: Vec<&PhraseBook> = books.iter().collect();
    let report = batch_translate(
        &mut parsed.catalog,
        &book_refs,
        &options,
        &CancelToken::new(),
    );

    if cmd.apply {
        ts::save(&parsed.catalog, &cmd.catalog)
            .with_context(|| format!("Failed to save catalog: {}", cmd.catalog.display()))?;
    }
    report::print_batch_report(&report, cmd.apply);

    Ok(ExitStatus::Success)
}
