use anyhow::Result;
use insta_cmd::assert_cmd_snapshot;
use pretty_assertions::assert_eq;
use serde_json::{Value, json};

use crate::{CliTest, HOME_CATALOG, HOME_CONTROLLER, HOME_TEMPLATE};

fn projects() -> Result<CliTest> {
    CliTest::with_files(&[
        ("source/app/app.module.js", "angular.module('app', []);\n"),
        ("source/app/home.html", HOME_TEMPLATE),
        ("source/app/home.controller.js", HOME_CONTROLLER),
        ("source/app/translations/Messages_fr_FR.json", HOME_CATALOG),
        ("source/empty/empty.module.js", "angular.module('empty', []);\n"),
        ("source/empty/view.html", "<p>{{ 'nowhere' | translate }}</p>\n"),
        (
            "other/Messages_fr_FR.json",
            r#"{"home_title": "Accueil", "link": "Lien"}"#,
        ),
    ])
}

#[test]
fn test_rewrite_with_prefix() -> Result<()> {
    let test = projects()?;

    let mut cmd = test.rewrite_command("source", "other");
    cmd.args(["--module", "-p", "home"]);
    assert_cmd_snapshot!(cmd, @r"
    success: true
    exit_code: 0
    ----- stdout -----
    ┌────────┬──────┬──────────┬─────────┐
    │ Module │ Used │ Missings │ Results │
    ├────────┼──────┼──────────┼─────────┤
    │ ./app  │ 4    │ 0        │ 4       │
    └────────┴──────┴──────────┴─────────┘
    ✓ Wrote ./app/translations/Messages_fr_FR.json (4 keys)
    ✓ No missing keys in 1 module(s)

    ----- stderr -----
    ");

    let catalog: Value = serde_json::from_str(
        &test.read_file("source/app/translations/Messages_fr_FR.json")?,
    )?;
    assert_eq!(
        catalog,
        json!({
            "home_hello_world": "Bonjour",
            "home_link_help": "Aide",
            "home_home_title": "Accueil",
            "home_link": "Lien"
        })
    );

    assert_eq!(
        test.read_file("source/app/home.html")?,
        r#"<p data-translate="home_hello_world"></p>
<a>{{ 'home_link' | translate }}</a>
<a>{{ ('home_link_' + ctrl.x) | translate }}</a>
"#
    );
    assert!(
        test.read_file("source/app/home.controller.js")?
            .contains("this.$translate.instant('home_home_title')")
    );

    let output = test
        .check_command("source")
        .args(["--module", "--strict", "-o", "json"])
        .output()?;
    assert!(output.status.success());
    let reports: Value = serde_json::from_slice(&output.stdout)?;
    assert_eq!(
        reports[0]["used"],
        json!(["home_hello_world", "home_home_title", "home_link", "home_link_*"])
    );
    assert_eq!(reports[0]["missing"], json!([]));

    Ok(())
}

#[test]
fn test_rewrite_without_prefix_keeps_sources() -> Result<()> {
    let test = projects()?;

    let output = test
        .rewrite_command("source", "other")
        .args(["-o", "json"])
        .output()?;

    assert!(
        output.status.success(),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    let reports: Value = serde_json::from_slice(&output.stdout)?;
    assert!(
        reports[0]["translation_file"]
            .as_str()
            .is_some_and(|path| path.ends_with("translations/Messages_fr_FR.json"))
    );
    assert_eq!(test.read_file("source/app/home.html")?, HOME_TEMPLATE);
    assert!(test.root().join("source/translations/Messages_fr_FR.json").exists());

    Ok(())
}

#[test]
fn test_rewrite_reports_and_skips_unparsable_files() -> Result<()> {
    let test = projects()?;
    let broken = "<p title=\"{{ 'link' | translate }}></p>";
    test.write_file("source/app/broken.html", broken)?;

    let mut cmd = test.rewrite_command("source", "other");
    cmd.args(["--module", "-p", "home_"]);
    assert_cmd_snapshot!(cmd, @r"
    success: true
    exit_code: 0
    ----- stdout -----
    ┌────────┬──────┬──────────┬─────────┐
    │ Module │ Used │ Missings │ Results │
    ├────────┼──────┼──────────┼─────────┤
    │ ./app  │ 4    │ 0        │ 4       │
    └────────┴──────┴──────────┴─────────┘
    ✓ Wrote ./app/translations/Messages_fr_FR.json (4 keys)
    ✓ No missing keys in 1 module(s)

    ----- stderr -----
    warning: 1 file(s) could not be parsed (use -v for details)
    ");
    assert_eq!(test.read_file("source/app/broken.html")?, broken);

    Ok(())
}

#[test]
fn test_rewrite_leaves_non_utf8_files_unchanged() -> Result<()> {
    let test = projects()?;
    let latin1 = b"<p>Caf\xe9 {{ 'link' | translate }}</p>\n";
    std::fs::write(test.root().join("source/app/latin1.html"), latin1)?;

    let mut cmd = test.rewrite_command("source", "other");
    cmd.args(["--module", "-p", "home"]);
    assert_cmd_snapshot!(cmd, @r"
    success: true
    exit_code: 0
    ----- stdout -----
    ┌────────┬──────┬──────────┬─────────┐
    │ Module │ Used │ Missings │ Results │
    ├────────┼──────┼──────────┼─────────┤
    │ ./app  │ 4    │ 0        │ 4       │
    └────────┴──────┴──────────┴─────────┘
    ✓ Wrote ./app/translations/Messages_fr_FR.json (4 keys)
    ✓ No missing keys in 1 module(s)

    ----- stderr -----
    warning: 1 file(s) could not be parsed (use -v for details)
    ");
    assert_eq!(std::fs::read(test.root().join("source/app/latin1.html"))?, latin1);
    assert!(
        test.read_file("source/app/home.html")?
            .contains("{{ 'home_link' | translate }}")
    );

    Ok(())
}
