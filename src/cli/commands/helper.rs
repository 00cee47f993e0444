//! Shared plumbing for the command handlers.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use walkdir::WalkDir;

use crate::config::Config;
use crate::findings::{Finding, FormatFinding};
use crate::phrasebook::PhraseBook;
use crate::ts::ParseWarning;

/// Expand files and directories into the list of catalog files to process.
///
/// Directories are walked recursively for `*.ts` files, honoring the config
/// ignore patterns. The result is sorted for deterministic output.
pub fn collect_catalog_paths(paths: &[PathBuf], config: &Config) -> Result<Vec<PathBuf>> {
    let defaults = [PathBuf::from(".")];
    let roots: &[PathBuf] = if paths.is_empty() { &defaults } else { paths };

    let mut catalogs = Vec::new();
    for root in roots {
        if root.is_file() {
            catalogs.push(root.clone());
            continue;
        }
        if !root.is_dir() {
            bail!("No such file or directory: {}", root.display());
        }
        for entry in WalkDir::new(root).into_iter().filter_map(|entry| entry.ok()) {
            let path = entry.path();
            if !entry.file_type().is_file() {
                continue;
            }
            if path.extension().is_none_or(|ext| ext != "ts") {
                continue;
            }
            if config.is_ignored(path) {
                continue;
            }
            catalogs.push(path.to_path_buf());
        }
    }
    catalogs.sort();
    catalogs.dedup();
    Ok(catalogs)
}

/// Load phrase books from the command line list, falling back to the config.
///
/// A malformed book fails the whole command before anything is processed.
pub fn load_phrase_books(cli_books: &[PathBuf], config: &Config) -> Result<Vec<PhraseBook>> {
    let paths: Vec<PathBuf> = if cli_books.is_empty() {
        config.phrasebooks.iter().map(PathBuf::from).collect()
    } else {
        cli_books.to_vec()
    };

    paths
        .iter()
        .map(|path| {
            PhraseBook::load(path)
                .with_context(|| format!("Failed to load phrase book: {}", path.display()))
        })
        .collect()
}

/// Surface codec warnings through the findings pipeline.
pub fn warning_findings(path: &Path, warnings: &[ParseWarning]) -> Vec<Finding> {
    warnings
        .iter()
        .map(|warning| {
            FormatFinding {
                path: path.display().to_string(),
                message: warning.to_string(),
            }
            .into()
        })
        .collect()
}
