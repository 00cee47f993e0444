use anyhow::Result;
use insta_cmd::assert_cmd_snapshot;

use crate::{CliTest, DEMO_CATALOG, DEMO_PHRASEBOOK};

#[test]
fn test_translate_dry_run() -> Result<()> {
    let test = CliTest::with_file("demo_da.ts", DEMO_CATALOG)?;
    test.write_file("common.qph", DEMO_PHRASEBOOK)?;

    assert_cmd_snapshot!(
        test.command()
            .args(["translate", "demo_da.ts", "--phrasebook", "common.qph"]),
        @r#"
    success: true
    exit_code: 0
    ----- stdout -----
    Translated 1 entry, 0 unmatched
    Dry run - use --apply to write the catalog

    ----- stderr -----
    "#);

    // dry run leaves the catalog untouched
    assert_eq!(test.read_file("demo_da.ts")?, DEMO_CATALOG);

    Ok(())
}

#[test]
fn test_translate_apply_writes_catalog() -> Result<()> {
    let test = CliTest::with_file("demo_da.ts", DEMO_CATALOG)?;
    test.write_file("common.qph", DEMO_PHRASEBOOK)?;

    let output = test
        .command()
        .args([
            "translate",
            "demo_da.ts",
            "--phrasebook",
            "common.qph",
            "--mark-finished",
            "--apply",
        ])
        .output()?;
    assert_eq!(output.status.code(), Some(0));

    let written = test.read_file("demo_da.ts")?;
    assert!(written.contains("<translation>Afslut</translation>"));

    Ok(())
}

#[test]
fn test_translate_without_phrasebook_fails() -> Result<()> {
    let test = CliTest::with_file("demo_da.ts", DEMO_CATALOG)?;

    assert_cmd_snapshot!(test.command().args(["translate", "demo_da.ts"]), @r#"
    success: false
    exit_code: 2
    ----- stdout -----

    ----- stderr -----
    Error: No phrase books given (use --phrasebook or add them to the config)
    "#);

    Ok(())
}

#[test]
fn test_translate_malformed_phrasebook_fails_fast() -> Result<()> {
    let test = CliTest::with_file("demo_da.ts", DEMO_CATALOG)?;
    test.write_file("broken.qph", "<QPH><phrase>")?;

    let output = test
        .command()
        .args(["translate", "demo_da.ts", "--phrasebook", "broken.qph", "--apply"])
        .output()?;
    assert_eq!(output.status.code(), Some(2));
    // nothing was applied
    assert_eq!(test.read_file("demo_da.ts")?, DEMO_CATALOG);

    Ok(())
}
