use anyhow::Result;
use insta_cmd::assert_cmd_snapshot;

use crate::{CliTest, DEMO_CATALOG};

#[test]
fn test_replace_dry_run() -> Result<()> {
    let test = CliTest::with_file("demo_da.ts", DEMO_CATALOG)?;

    assert_cmd_snapshot!(
        test.command().args(["replace", "demo_da.ts", "Åbn", "Vis"]),
        @r#"
    success: true
    exit_code: 0
    ----- stdout -----
    Replaced in 1 of 1 matched entry (0 without translation skipped)
    Dry run - use --apply to write the catalog

    ----- stderr -----
    "#);

    assert_eq!(test.read_file("demo_da.ts")?, DEMO_CATALOG);

    Ok(())
}

#[test]
fn test_replace_apply_rewrites_translations_only() -> Result<()> {
    let test = CliTest::with_file("demo_da.ts", DEMO_CATALOG)?;

    let output = test
        .command()
        .args(["replace", "demo_da.ts", "Åbn", "Vis", "--apply"])
        .output()?;
    assert_eq!(output.status.code(), Some(0));

    let written = test.read_file("demo_da.ts")?;
    assert!(written.contains("<translation>Vis</translation>"));
    // the source text is never rewritten
    assert!(written.contains("<source>&amp;Open</source>"));

    Ok(())
}

#[test]
fn test_replace_counts_units_without_translation() -> Result<()> {
    let test = CliTest::with_file("demo_da.ts", DEMO_CATALOG)?;

    // "Quit" only matches an untranslated entry
    assert_cmd_snapshot!(
        test.command().args(["replace", "demo_da.ts", "Quit", "Afslut"]),
        @r#"
    success: true
    exit_code: 0
    ----- stdout -----
    Replaced in 0 of 1 matched entry (1 without translation skipped)
    Dry run - use --apply to write the catalog

    ----- stderr -----
    "#);

    Ok(())
}
