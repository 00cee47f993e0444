//! Lingo - translation catalog engine and CLI for Qt Linguist `.ts` files
//!
//! Lingo is a CLI tool and library for working with Linguist-style
//! translation catalogs: it parses and writes the `.ts` XML format, runs
//! translation lint checks (accelerators, punctuation, place markers, phrase
//! suggestions), batch-translates from phrase books, and searches/replaces
//! across catalog fields.
//!
//! ## Module Structure
//!
//! - `batch`: Phrase-book-driven batch translation
//! - `cancel`: Cooperative cancellation for long engine loops
//! - `catalog`: In-memory catalog model (unit arena with stable handles)
//! - `checks`: Validation engine (per-unit lint checks)
//! - `cli`: Command-line interface layer (user-facing commands)
//! - `config`: Configuration file loading and parsing
//! - `findings`: Finding type definitions and reporting
//! - `phrasebook`: Read-only `.qph` phrase books
//! - `plurals`: Plural rule resolution per target language
//! - `search`: Scoped find and replace-all
//! - `ts`: The `.ts` catalog codec
//! - `utils`: Shared utility functions

pub mod batch;
pub mod cancel;
pub mod catalog;
pub mod checks;
pub mod cli;
pub mod config;
pub mod findings;
pub mod phrasebook;
pub mod plurals;
pub mod search;
pub mod ts;
pub mod utils;
