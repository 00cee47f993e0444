//! CLI argument definitions using clap.
//!
//! This module defines the command-line interface structure for all Lingo
//! commands. It uses clap's derive API for declarative argument parsing.
//!
//! ## Commands
//!
//! - `check`: Run translation checks (accelerators, punctuation, ...)
//! - `translate`: Batch-fill untranslated entries from phrase books
//! - `search`: Search catalog fields for a text
//! - `replace`: Replace text across translations
//! - `stats`: Show per-catalog status counts
//! - `init`: Initialize lingo configuration file

use std::path::PathBuf;

use clap::{Args, CommandFactory, Parser, Subcommand, ValueEnum};

#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
pub struct Arguments {
    #[command(subcommand)]
    pub command: Option<Command>,
}

impl Arguments {
    /// Check if a command was provided, otherwise print help and return None.
    pub fn with_command_or_help(self) -> Option<Self> {
        if self.command.is_none() {
            Self::command().print_help().ok();
            None
        } else {
            Some(self)
        }
    }
}

/// Common arguments shared by all commands.
#[derive(Debug, Clone, Args)]
pub struct CommonArgs {
    /// Phrase book file, in match-priority order; repeatable (overrides config)
    #[arg(long = "phrasebook", value_name = "FILE")]
    pub phrasebooks: Vec<PathBuf>,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Run translation checks on catalogs
    Check(CheckCommand),
    /// Fill untranslated entries from phrase books
    Translate(TranslateCommand),
    /// Search catalog fields for a text
    Search(SearchCommand),
    /// Replace text across translations
    Replace(ReplaceCommand),
    /// Show catalog statistics
    Stats(StatsCommand),
    /// Initialize lingo configuration file
    Init,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, ValueEnum)]
pub enum CheckRule {
    Accelerators,
    Punctuation,
    PlaceMarkers,
    PhraseSuggestions,
}

#[derive(Debug, Args)]
pub struct CheckCommand {
    /// Catalog files or directories to check (default: current directory)
    pub paths: Vec<PathBuf>,

    /// Checks to run (default: all enabled in config)
    /// Can be specified multiple times: --checks accelerators --checks punctuation
    #[arg(long, value_enum)]
    pub checks: Vec<CheckRule>,

    #[command(flatten)]
    pub common: CommonArgs,
}

#[derive(Debug, Args)]
pub struct TranslateCommand {
    /// Catalog file to translate
    pub catalog: PathBuf,

    /// Also retranslate entries that already have a translation
    #[arg(long)]
    pub retranslate: bool,

    /// Also touch entries already marked finished
    #[arg(long)]
    pub include_finished: bool,

    /// Mark translated entries as finished
    #[arg(long)]
    pub mark_finished: bool,

    /// Actually write the catalog (default is dry-run)
    #[arg(long)]
    pub apply: bool,

    #[command(flatten)]
    pub common: CommonArgs,
}

/// A searchable catalog field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, ValueEnum)]
pub enum ScopeField {
    Source,
    Translations,
    Comments,
}

/// Matching flags shared by `search` and `replace`.
#[derive(Debug, Clone, Args)]
pub struct MatchArgs {
    /// Fields to search (default: all)
    /// Comma separated: --in source,translations
    #[arg(long = "in", value_enum, value_delimiter = ',', value_name = "FIELDS")]
    pub fields: Vec<ScopeField>,

    /// Match case exactly
    #[arg(long)]
    pub match_case: bool,

    /// Match whole words only
    #[arg(long)]
    pub whole_word: bool,

    /// Do not strip accelerator markers before matching
    #[arg(long)]
    pub keep_accelerators: bool,

    /// Also search obsolete entries
    #[arg(long)]
    pub include_obsolete: bool,
}

#[derive(Debug, Args)]
pub struct SearchCommand {
    /// Catalog file to search
    pub catalog: PathBuf,

    /// Text to search for
    pub query: String,

    #[command(flatten)]
    pub matching: MatchArgs,

    #[command(flatten)]
    pub common: CommonArgs,
}

#[derive(Debug, Args)]
pub struct ReplaceCommand {
    /// Catalog file to edit
    pub catalog: PathBuf,

    /// Text to search for
    pub query: String,

    /// Replacement text
    pub replacement: String,

    #[command(flatten)]
    pub matching: MatchArgs,

    /// Actually write the catalog (default is dry-run)
    #[arg(long)]
    pub apply: bool,

    #[command(flatten)]
    pub common: CommonArgs,
}

#[derive(Debug, Args)]
pub struct StatsCommand {
    /// Catalog files or directories (default: current directory)
    pub paths: Vec<PathBuf>,

    #[command(flatten)]
    pub common: CommonArgs,
}
