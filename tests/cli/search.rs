use anyhow::Result;
use insta_cmd::assert_cmd_snapshot;

use crate::{CliTest, DEMO_CATALOG};

#[test]
fn test_search_matches_sources_and_translations() -> Result<()> {
    let test = CliTest::with_file("demo_da.ts", DEMO_CATALOG)?;

    assert_cmd_snapshot!(test.command().args(["search", "demo_da.ts", "open"]), @r#"
    success: true
    exit_code: 0
    ----- stdout -----
    demo_da.ts (MainWindow): &Open -> Åbn
    1 match

    ----- stderr -----
    "#);

    Ok(())
}

#[test]
fn test_search_scope_restricts_fields() -> Result<()> {
    let test = CliTest::with_file("demo_da.ts", DEMO_CATALOG)?;

    assert_cmd_snapshot!(
        test.command()
            .args(["search", "demo_da.ts", "Åbn", "--in", "source"]),
        @r#"
    success: false
    exit_code: 1
    ----- stdout -----
    0 matches

    ----- stderr -----
    "#);

    Ok(())
}

#[test]
fn test_search_match_case() -> Result<()> {
    let test = CliTest::with_file("demo_da.ts", DEMO_CATALOG)?;

    assert_cmd_snapshot!(
        test.command()
            .args(["search", "demo_da.ts", "open", "--match-case"]),
        @r#"
    success: false
    exit_code: 1
    ----- stdout -----
    0 matches

    ----- stderr -----
    "#);

    Ok(())
}

#[test]
fn test_search_no_match_exits_nonzero() -> Result<()> {
    let test = CliTest::with_file("demo_da.ts", DEMO_CATALOG)?;

    let output = test
        .command()
        .args(["search", "demo_da.ts", "nonexistent"])
        .output()?;
    assert_eq!(output.status.code(), Some(1));

    Ok(())
}
