use anyhow::{Context, Result};
use insta_cmd::assert_cmd_snapshot;
use serde_json::Value;

use crate::CliTest;

/// Validates config file structure and default values.
fn assert_config_content(content: &str) -> Result<()> {
    let parsed: Value = serde_json::from_str(content).context("Config should be valid JSON")?;

    assert_eq!(parsed["locale"], "fr_FR");
    assert_eq!(parsed["translateService"], "$translate");
    assert_eq!(parsed["translateMethod"], "instant");
    assert_eq!(parsed["catalogDir"], "translations");
    assert!(
        parsed.get("ignores").is_some(),
        "Config should have 'ignores' field"
    );

    assert!(
        content.contains("\n  \""),
        "Config should use 2-space indentation"
    );

    Ok(())
}

#[test]
fn test_init_creates_config() -> Result<()> {
    let test = CliTest::new()?;

    assert_cmd_snapshot!(test.command().arg("init"), @r"
    success: true
    exit_code: 0
    ----- stdout -----
    ✓ Created .lingorc.json

    ----- stderr -----
    ");
    assert!(test.root().join(".lingorc.json").exists());
    assert_config_content(&test.read_file(".lingorc.json")?)?;

    Ok(())
}

#[test]
fn test_init_fails_if_exists() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file(".lingorc.json", "{}")?;

    assert_cmd_snapshot!(test.command().arg("init"), @r"
    success: false
    exit_code: 1
    ----- stdout -----

    ----- stderr -----
    Error: .lingorc.json already exists
    ");
    assert_eq!(test.read_file(".lingorc.json")?, "{}");

    Ok(())
}

#[test]
fn test_init_config_is_immediately_usable() -> Result<()> {
    let test = CliTest::new()?;

    test.command().arg("init").output()?;
    test.write_file("index.html", "<h1>{{ 'title' | translate }}</h1>\n")?;
    test.write_file("translations/Messages_fr_FR.json", r#"{"title": "Titre"}"#)?;

    assert_cmd_snapshot!(test.check_command(".").arg("--strict"), @r"
    success: true
    exit_code: 0
    ----- stdout -----
    ┌────────┬──────┬──────────┬─────────┐
    │ Module │ Used │ Missings │ Results │
    ├────────┼──────┼──────────┼─────────┤
    │ ./     │ 1    │ 0        │ 1       │
    └────────┴──────┴──────────┴─────────┘
    ✓ No missing keys in 1 module(s)

    ----- stderr -----
    ");

    Ok(())
}
