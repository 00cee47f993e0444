use anyhow::Result;
use insta_cmd::assert_cmd_snapshot;

use crate::CliTest;

#[test]
fn test_init_creates_config() -> Result<()> {
    let test = CliTest::new()?;

    assert_cmd_snapshot!(test.command().arg("init"), @r#"
    success: true
    exit_code: 0
    ----- stdout -----
    Created .lingorc.json

    ----- stderr -----
    "#);

    assert!(test.root().join(".lingorc.json").exists());

    // the generated config round-trips through serde
    let content = test.read_file(".lingorc.json")?;
    let value: serde_json::Value = serde_json::from_str(&content)?;
    assert!(value.get("checks").is_some());
    assert!(value.get("acceleratorMarker").is_some());

    Ok(())
}

#[test]
fn test_init_fails_if_exists() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file(".lingorc.json", "{}")?;

    assert_cmd_snapshot!(test.command().arg("init"), @r#"
    success: false
    exit_code: 2
    ----- stdout -----

    ----- stderr -----
    Error: .lingorc.json already exists
    "#);

    Ok(())
}
