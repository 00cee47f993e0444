use anyhow::Result;
use insta_cmd::assert_cmd_snapshot;

use crate::{CliTest, DEMO_CATALOG, DEMO_PHRASEBOOK};

#[test]
fn test_check_reports_findings() -> Result<()> {
    let test = CliTest::with_file("demo_da.ts", DEMO_CATALOG)?;

    assert_cmd_snapshot!(test.command().args(["check", "demo_da.ts"]), @r#"
    success: false
    exit_code: 1
    ----- stdout -----
    warning: translation does not have the same accelerators as the source text  accelerators
      --> demo_da.ts (MainWindow)
       |
       | &Open
       |

    warning: translation does not use the same place markers as the source text  place-markers
      --> demo_da.ts (MainWindow)
       |
       | Line %1
       |
       = note: missing %1

    ✘ 2 warnings found in 1 catalog

    ----- stderr -----
    "#);

    Ok(())
}

#[test]
fn test_check_clean_catalog() -> Result<()> {
    let test = CliTest::with_file(
        "clean_da.ts",
        r#"<?xml version="1.0" encoding="utf-8"?>
<!DOCTYPE TS>
<TS version="2.0" language="da">
<context>
    <name>MainWindow</name>
    <message>
        <source>&amp;Open</source>
        <translation>&amp;Åbn</translation>
    </message>
</context>
</TS>
"#,
    )?;

    assert_cmd_snapshot!(test.command().args(["check", "clean_da.ts"]), @r#"
    success: true
    exit_code: 0
    ----- stdout -----
    ✓ Checked 1 catalog - no findings

    ----- stderr -----
    "#);

    Ok(())
}

#[test]
fn test_check_selected_rule_only() -> Result<()> {
    let test = CliTest::with_file("demo_da.ts", DEMO_CATALOG)?;

    assert_cmd_snapshot!(
        test.command()
            .args(["check", "demo_da.ts", "--checks", "accelerators"]),
        @r#"
    success: false
    exit_code: 1
    ----- stdout -----
    warning: translation does not have the same accelerators as the source text  accelerators
      --> demo_da.ts (MainWindow)
       |
       | &Open
       |

    ✘ 1 warning found in 1 catalog

    ----- stderr -----
    "#);

    Ok(())
}

#[test]
fn test_check_with_phrasebook_suggestions() -> Result<()> {
    let test = CliTest::with_file(
        "demo_da.ts",
        r#"<?xml version="1.0" encoding="utf-8"?>
<!DOCTYPE TS>
<TS version="2.0" language="da">
<context>
    <name>MainWindow</name>
    <message>
        <source>Quit</source>
        <translation>Luk</translation>
    </message>
</context>
</TS>
"#,
    )?;
    test.write_file("common.qph", DEMO_PHRASEBOOK)?;

    assert_cmd_snapshot!(
        test.command()
            .args(["check", "demo_da.ts", "--phrasebook", "common.qph"]),
        @r#"
    success: false
    exit_code: 1
    ----- stdout -----
    warning: translation does not use any phrase book suggestion for this source text  phrase-suggestions
      --> demo_da.ts (MainWindow)
       |
       | Quit
       |
       = note: suggested: Afslut

    ✘ 1 warning found in 1 catalog

    ----- stderr -----
    "#);

    Ok(())
}

#[test]
fn test_check_malformed_catalog_fails() -> Result<()> {
    let test = CliTest::with_file("broken.ts", "<TS version=\"2.0\">\n<context>\n")?;

    let output = test
        .command()
        .args(["check", "broken.ts"])
        .output()?;
    assert_eq!(output.status.code(), Some(2));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Failed to load catalog"));

    Ok(())
}

#[test]
fn test_check_directory_scan() -> Result<()> {
    let test = CliTest::with_file("translations/app_da.ts", DEMO_CATALOG)?;
    test.write_file("translations/notes.txt", "not a catalog")?;

    let output = test.command().args(["check"]).output()?;
    assert_eq!(output.status.code(), Some(1));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("translations/app_da.ts"));
    assert!(stdout.contains("2 warnings found in 1 catalog"));

    Ok(())
}
