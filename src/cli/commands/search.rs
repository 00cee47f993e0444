use std::path::Path;

use anyhow::{Context, Result};

use crate::cli::ExitStatus;
use crate::cli::args::{MatchArgs, ScopeField, SearchCommand};
use crate::config::{Config, load_config};
use crate::search::{SearchOptions, SearchScope, find};
use crate::ts;

pub fn search(cmd: SearchCommand) -> Result<ExitStatus> {
    let config = load_config(Path::new("."))?.config;
    let parsed = ts::load(&cmd.catalog)
        .with_context(|| format!("Failed to load catalog: {}", cmd.catalog.display()))?;

    let scope = scope_from(&cmd.matching);
    let options = options_from(&cmd.matching, &config);
    let matches: Vec<_> = find(&parsed.catalog, &cmd.query, scope, &options)?.collect();

    for id in &matches {
        let unit = parsed.catalog.unit(*id);
        let translation = unit.translation(0).unwrap_or("");
        println!("{} ({}): {} -> {}", cmd.catalog.display(), unit.context, unit.source, translation);
    }
    println!(
        "{} {}",
        matches.len(),
        if matches.len() == 1 { "match" } else { "matches" }
    );

    Ok(if matches.is_empty() {
        ExitStatus::Failure
    } else {
        ExitStatus::Success
    })
}

/// Translate the CLI field list into an engine scope. No fields means all.
pub fn scope_from(matching: &MatchArgs) -> SearchScope {
    if matching.fields.is_empty() {
        return SearchScope::default();
    }
    let has = |field: ScopeField| matching.fields.contains(&field);
    SearchScope {
        source_text: has(ScopeField::Source),
        translations: has(ScopeField::Translations),
        comments: has(ScopeField::Comments),
    }
}

pub fn options_from(matching: &MatchArgs, config: &Config) -> SearchOptions {
    SearchOptions {
        match_case: matching.match_case,
        whole_word: matching.whole_word,
        ignore_accelerators: !matching.keep_accelerators,
        skip_obsolete: !matching.include_obsolete && config.skip_obsolete,
        accelerator_marker: config.accelerator_marker,
    }
}
