use anyhow::Result;
use insta_cmd::assert_cmd_snapshot;
use pretty_assertions::assert_eq;
use serde_json::{Value, json};

use crate::{CliTest, HOME_CATALOG, HOME_CONTROLLER, HOME_TEMPLATE};

fn projects() -> Result<CliTest> {
    CliTest::with_files(&[
        ("source/app/home.html", HOME_TEMPLATE),
        ("source/app/home.controller.js", HOME_CONTROLLER),
        ("source/app/translations/Messages_fr_FR.json", HOME_CATALOG),
        (
            "other/translations/Messages_fr_FR.json",
            r#"{"home_title": "Accueil", "hello_world": "Salut"}"#,
        ),
        (
            "other/legacy/Messages_fr_FR.xml",
            r#"<translations><translation id="link">Lien</translation></translations>"#,
        ),
    ])
}

fn search_json(test: &CliTest, extra: &[&str]) -> Result<Value> {
    let mut cmd = test.search_command("source", "other");
    cmd.args(["-o", "json"]).args(extra);
    let output = cmd.output()?;
    assert!(
        output.status.success(),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    Ok(serde_json::from_slice(&output.stdout)?)
}

#[test]
fn test_search_fills_missing_keys() -> Result<()> {
    let test = projects()?;

    let reports = search_json(&test, &[])?;

    assert_eq!(reports[0]["missing"], json!([]));
    assert_eq!(
        reports[0]["compatible"],
        json!({
            "hello_world": "Bonjour",
            "link_help": "Aide",
            "link": "Lien",
            "home_title": "Accueil"
        })
    );

    Ok(())
}

#[test]
fn test_search_merge_prefers_project_values() -> Result<()> {
    let test = projects()?;

    let reports = search_json(&test, &["--merge"])?;

    assert_eq!(reports[0]["compatible"]["hello_world"], "Salut");
    assert_eq!(reports[0]["compatible"]["link_help"], "Aide");

    Ok(())
}

#[test]
fn test_search_all_keeps_unused_source_keys() -> Result<()> {
    let test = projects()?;

    let reports = search_json(&test, &["-a"])?;
    assert_eq!(reports[0]["compatible"]["unused"], "Inutile");

    let reports = search_json(&test, &[])?;
    assert!(reports[0]["compatible"].get("unused").is_none());

    Ok(())
}

#[test]
fn test_search_summary() -> Result<()> {
    let test = projects()?;

    assert_cmd_snapshot!(test.command().args(["s", "source", "other", "--strict"]), @r"
    success: true
    exit_code: 0
    ----- stdout -----
    ┌────────┬──────┬──────────┬─────────┐
    │ Module │ Used │ Missings │ Results │
    ├────────┼──────┼──────────┼─────────┤
    │ ./     │ 4    │ 0        │ 4       │
    └────────┴──────┴──────────┴─────────┘
    ✓ No missing keys in 1 module(s)

    ----- stderr -----
    ");

    Ok(())
}

#[test]
fn test_search_missing_project_is_an_error() -> Result<()> {
    let test = projects()?;

    assert_cmd_snapshot!(test.search_command("source", "absent"), @r"
    success: false
    exit_code: 2
    ----- stdout -----

    ----- stderr -----
    Error: Project path is not a directory: absent
    ");

    Ok(())
}

#[test]
fn test_search_absolute_project_path() -> Result<()> {
    let test = projects()?;
    let absent = test.root().join("absent");
    let mut cmd = test.search_command("source", &absent.to_string_lossy());

    test.settings().bind(|| {
        assert_cmd_snapshot!(cmd, @r"
        success: false
        exit_code: 2
        ----- stdout -----

        ----- stderr -----
        Error: Project path is not a directory: [ROOT]/absent
        ");
    });

    Ok(())
}
