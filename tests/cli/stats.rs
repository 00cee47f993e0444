use anyhow::Result;

use crate::{CliTest, DEMO_CATALOG};

#[test]
fn test_stats_counts_statuses() -> Result<()> {
    let test = CliTest::with_file("demo_da.ts", DEMO_CATALOG)?;

    let output = test.command().args(["stats", "demo_da.ts"]).output()?;
    assert_eq!(output.status.code(), Some(0));
    let stdout = String::from_utf8_lossy(&output.stdout);

    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(lines.len(), 2);
    assert!(lines[0].starts_with("Catalog"));
    assert!(lines[0].contains("Finished"));
    assert!(lines[1].starts_with("demo_da.ts"));
    // 2 finished, 1 unfinished, 0 obsolete, 3 total
    let counts: Vec<&str> = lines[1].split_whitespace().collect();
    assert_eq!(counts, vec!["demo_da.ts", "2", "1", "0", "3"]);

    Ok(())
}

#[test]
fn test_stats_scans_directories() -> Result<()> {
    let test = CliTest::with_file("translations/app_da.ts", DEMO_CATALOG)?;
    test.write_file("translations/app_pl.ts", DEMO_CATALOG)?;

    let output = test.command().args(["stats"]).output()?;
    assert_eq!(output.status.code(), Some(0));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("app_da.ts"));
    assert!(stdout.contains("app_pl.ts"));

    Ok(())
}
