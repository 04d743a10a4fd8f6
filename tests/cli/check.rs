use anyhow::Result;
use insta_cmd::assert_cmd_snapshot;
use pretty_assertions::assert_eq;
use serde_json::Value;

use crate::{CliTest, HOME_CATALOG, HOME_CONTROLLER, HOME_TEMPLATE};

fn home_project() -> Result<CliTest> {
    CliTest::with_files(&[
        ("app/app.module.js", "angular.module('app', []);\n"),
        ("app/home.html", HOME_TEMPLATE),
        ("app/home.controller.js", HOME_CONTROLLER),
        ("app/translations/Messages_fr_FR.json", HOME_CATALOG),
    ])
}

fn json_reports(mut cmd: std::process::Command) -> Result<Value> {
    cmd.args(["-o", "json"]);
    let output = cmd.output()?;
    assert!(
        output.status.success(),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    Ok(serde_json::from_slice(&output.stdout)?)
}

#[test]
fn test_check_summary() -> Result<()> {
    let test = home_project()?;

    assert_cmd_snapshot!(test.check_command("."), @r"
    success: true
    exit_code: 0
    ----- stdout -----
    ┌────────┬──────┬──────────┬─────────┐
    │ Module │ Used │ Missings │ Results │
    ├────────┼──────┼──────────┼─────────┤
    │ ./     │ 4    │ 2        │ 2       │
    └────────┴──────┴──────────┴─────────┘
    ✘ 2 missing key(s) in 1 module(s)

    ----- stderr -----
    ");

    Ok(())
}

#[test]
fn test_check_strict_fails_on_missing_keys() -> Result<()> {
    let test = home_project()?;

    assert_cmd_snapshot!(test.check_command(".").arg("--strict"), @r"
    success: false
    exit_code: 1
    ----- stdout -----
    ┌────────┬──────┬──────────┬─────────┐
    │ Module │ Used │ Missings │ Results │
    ├────────┼──────┼──────────┼─────────┤
    │ ./     │ 4    │ 2        │ 2       │
    └────────┴──────┴──────────┴─────────┘
    ✘ 2 missing key(s) in 1 module(s)

    ----- stderr -----
    ");

    Ok(())
}

#[test]
fn test_check_strict_passes_when_complete() -> Result<()> {
    let test = CliTest::with_files(&[
        ("index.html", "<h1>{{ 'title' | translate }}</h1>\n"),
        ("Messages_fr_FR.json", r#"{"title": "Titre"}"#),
    ])?;

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

#[test]
fn test_check_json_output() -> Result<()> {
    let test = home_project()?;

    let reports = json_reports(test.check_command("."))?;
    let report = &reports[0];
    assert_eq!(
        report["used"],
        serde_json::json!(["hello_world", "home_title", "link", "link_*"])
    );
    assert_eq!(report["missing"], serde_json::json!(["home_title", "link"]));
    assert_eq!(
        report["compatible"],
        serde_json::json!({"hello_world": "Bonjour", "link_help": "Aide"})
    );
    assert_eq!(report["declared"]["unused"], "Inutile");

    Ok(())
}

#[test]
fn test_check_text_output() -> Result<()> {
    let test = home_project()?;

    assert_cmd_snapshot!(test.check_command(".").args(["--output", "text"]), @r#"
    success: true
    exit_code: 0
    ----- stdout -----
    ./
      used:
        hello_world
        home_title
        link
        link_*
      missing:
        home_title
        link
      compatible:
        hello_world: "Bonjour"
        link_help: "Aide"

    ----- stderr -----
    "#);

    Ok(())
}

#[test]
fn test_check_silent_output() -> Result<()> {
    let test = home_project()?;

    assert_cmd_snapshot!(test.check_command(".").args(["-o", "silent"]), @r"
    success: true
    exit_code: 0
    ----- stdout -----

    ----- stderr -----
    ");

    Ok(())
}

#[test]
fn test_check_by_module() -> Result<()> {
    let test = home_project()?;
    test.write_file(
        "app/admin/admin.module.js",
        "angular.module('app.admin', ['app']);\n",
    )?;
    test.write_file(
        "app/admin/admin.html",
        "<h2>{{ 'admin_title' | translate }}</h2>\n",
    )?;
    test.write_file(
        "app/admin/translations/Messages_fr_FR.xml",
        r#"<translations><translation id="admin_title">Administration</translation></translations>"#,
    )?;

    assert_cmd_snapshot!(test.check_command(".").arg("--module"), @r"
    success: true
    exit_code: 0
    ----- stdout -----
    ┌─────────────┬──────┬──────────┬─────────┐
    │ Module      │ Used │ Missings │ Results │
    ├─────────────┼──────┼──────────┼─────────┤
    │ ./app       │ 4    │ 2        │ 2       │
    │ ./app/admin │ 1    │ 0        │ 1       │
    └─────────────┴──────┴──────────┴─────────┘
    ✘ 2 missing key(s) in 1 module(s)

    ----- stderr -----
    ");

    Ok(())
}

#[test]
fn test_check_locale_override() -> Result<()> {
    let test = home_project()?;
    test.write_file(
        "app/translations/Messages_en_US.json",
        r#"{"hello_world": "Hello", "home_title": "Home", "link": "Link", "link_help": "Help"}"#,
    )?;

    let mut cmd = test.check_command(".");
    cmd.args(["--locale", "en_US", "--strict"]);
    assert_cmd_snapshot!(cmd, @r"
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
fn test_check_uses_config_vocabulary() -> Result<()> {
    let test = CliTest::with_files(&[
        (
            ".lingorc.json",
            r#"{ "translateFilter": "i18n", "directiveAttribute": "i18n", "locale": "de_DE" }"#,
        ),
        (
            "index.html",
            "<p i18n=\"greeting\"></p>\n<p>{{ 'title' | i18n }}</p>\n<p>{{ 'other' | translate }}</p>\n",
        ),
        ("Messages_de_DE.json", r#"{"greeting": "Hallo"}"#),
    ])?;

    let reports = json_reports(test.check_command("."))?;
    assert_eq!(reports[0]["used"], serde_json::json!(["greeting", "title"]));
    assert_eq!(reports[0]["missing"], serde_json::json!(["title"]));

    Ok(())
}

#[test]
fn test_check_reports_unparsable_files() -> Result<()> {
    let test = home_project()?;
    test.write_file("app/broken.html", "<p title=\"{{ 'x' | translate }}></p>")?;

    assert_cmd_snapshot!(test.check_command("."), @r"
    success: true
    exit_code: 0
    ----- stdout -----
    ┌────────┬──────┬──────────┬─────────┐
    │ Module │ Used │ Missings │ Results │
    ├────────┼──────┼──────────┼─────────┤
    │ ./     │ 4    │ 2        │ 2       │
    └────────┴──────┴──────────┴─────────┘
    ✘ 2 missing key(s) in 1 module(s)

    ----- stderr -----
    warning: 1 file(s) could not be parsed (use -v for details)
    ");

    assert_cmd_snapshot!(test.check_command(".").arg("-v"), @r"
    success: true
    exit_code: 0
    ----- stdout -----
    ┌────────┬──────┬──────────┬─────────┐
    │ Module │ Used │ Missings │ Results │
    ├────────┼──────┼──────────┼─────────┤
    │ ./     │ 4    │ 2        │ 2       │
    └────────┴──────┴──────────┴─────────┘
    ✘ 2 missing key(s) in 1 module(s)

    ----- stderr -----
    note: No .lingorc.json found, using default configuration
    warning: could not parse ./app/broken.html: Unterminated value for attribute 'title' at offset 9
    ");

    Ok(())
}

#[test]
fn test_check_reads_non_utf8_files() -> Result<()> {
    let test = CliTest::with_files(&[
        ("index.html", "<h1>{{ 'title' | translate }}</h1>\n"),
        ("Messages_fr_FR.json", r#"{"title": "Titre", "latin": "Latin"}"#),
    ])?;
    std::fs::write(
        test.root().join("latin1.html"),
        b"<p>Caf\xe9 {{ 'latin' | translate }}</p>\n",
    )?;

    assert_cmd_snapshot!(test.check_command(".").arg("--strict"), @r"
    success: true
    exit_code: 0
    ----- stdout -----
    ┌────────┬──────┬──────────┬─────────┐
    │ Module │ Used │ Missings │ Results │
    ├────────┼──────┼──────────┼─────────┤
    │ ./     │ 2    │ 0        │ 2       │
    └────────┴──────┴──────────┴─────────┘
    ✓ No missing keys in 1 module(s)

    ----- stderr -----
    ");

    Ok(())
}

#[test]
fn test_check_ignores_node_modules() -> Result<()> {
    let test = CliTest::with_files(&[
        ("index.html", "<h1>{{ 'title' | translate }}</h1>\n"),
        (
            "node_modules/lib/view.html",
            "<h1>{{ 'vendor' | translate }}</h1>\n",
        ),
    ])?;

    let reports = json_reports(test.check_command("."))?;
    assert_eq!(reports[0]["used"], serde_json::json!(["title"]));

    Ok(())
}

#[test]
fn test_check_missing_source_is_an_error() -> Result<()> {
    let test = CliTest::new()?;

    assert_cmd_snapshot!(test.check_command("absent"), @r"
    success: false
    exit_code: 2
    ----- stdout -----

    ----- stderr -----
    Error: Source path is not a directory: absent
    ");

    Ok(())
}

#[test]
fn test_check_absolute_source_path() -> Result<()> {
    let test = CliTest::new()?;
    let absent = test.root().join("absent");
    let mut cmd = test.check_command(&absent.to_string_lossy());

    test.settings().bind(|| {
        assert_cmd_snapshot!(cmd, @r"
        success: false
        exit_code: 2
        ----- stdout -----

        ----- stderr -----
        Error: Source path is not a directory: [ROOT]/absent
        ");
    });

    Ok(())
}

#[test]
fn test_check_malformed_catalog_is_an_error() -> Result<()> {
    let test = home_project()?;
    test.write_file("app/translations/Messages_fr_FR.json", "[]")?;

    assert_cmd_snapshot!(test.check_command("."), @r#"
    success: false
    exit_code: 2
    ----- stdout -----

    ----- stderr -----
    Error: Failed to parse JSON file: "./app/translations/Messages_fr_FR.json": Expected a JSON object at the root of the catalog
    "#);

    Ok(())
}

#[test]
fn test_check_alias() -> Result<()> {
    let test = home_project()?;

    assert_cmd_snapshot!(test.command().args(["c", ".", "-o", "silent"]), @r"
    success: true
    exit_code: 0
    ----- stdout -----

    ----- stderr -----
    ");

    Ok(())
}

#[test]
fn test_no_command_prints_help() -> Result<()> {
    let test = CliTest::new()?;

    let output = test.command().output()?;

    assert!(output.status.success());
    assert!(String::from_utf8_lossy(&output.stdout).contains("Usage:"));

    Ok(())
}
