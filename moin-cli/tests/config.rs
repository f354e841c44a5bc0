use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use std::fs;
use tempfile::tempdir;

#[test]
fn macros_lists_configured_site_macros() {
    let dir = tempdir().unwrap();
    let config_path = dir.path().join("moin.toml");
    fs::write(
        &config_path,
        r#"[macros]
extra = ["SiteMacro"]
"#,
    )
    .unwrap();

    let mut cmd = cargo_bin_cmd!("moinconv");
    cmd.arg("macros").arg("--config").arg(config_path.as_os_str());

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("SiteMacro\n"))
        .stdout(predicate::str::contains("TableOfContents\n"));
}

#[test]
fn convert_uses_site_macros_from_config() {
    let dir = tempdir().unwrap();
    let input_path = dir.path().join("Page.txt");
    fs::write(&input_path, "[[SiteMacro]] [[OtherThing]]\n").unwrap();
    let config_path = dir.path().join("moin.toml");
    fs::write(
        &config_path,
        r#"[macros]
extra = ["SiteMacro"]
"#,
    )
    .unwrap();

    let mut cmd = cargo_bin_cmd!("moinconv");
    cmd.arg(input_path.as_os_str())
        .arg("--config")
        .arg(config_path.as_os_str());

    cmd.assert()
        .success()
        .stdout("<<SiteMacro>> [[OtherThing]]\n");
}

#[test]
fn interwiki_name_override_makes_links_local() {
    let dir = tempdir().unwrap();
    let input_path = dir.path().join("CurrentPage.txt");
    fs::write(&input_path, "[wiki:MyWiki:OldPage the new page]\n").unwrap();
    let renames_path = dir.path().join("renames.txt");
    fs::write(&renames_path, "PAGE|OldPage|New Page\n").unwrap();

    let mut cmd = cargo_bin_cmd!("moinconv");
    cmd.arg(input_path.as_os_str())
        .arg("--renames")
        .arg(renames_path.as_os_str())
        .arg("--extra-interwiki-name")
        .arg("MyWiki");

    cmd.assert()
        .success()
        .stdout("[[New Page|the new page]]\n");
}

#[test]
fn invalid_config_file_is_reported() {
    let dir = tempdir().unwrap();
    let config_path = dir.path().join("moin.toml");
    fs::write(&config_path, "[convert]\nbang_meta = \"sometimes\"\n").unwrap();

    let mut cmd = cargo_bin_cmd!("moinconv");
    cmd.arg("macros").arg("--config").arg(config_path.as_os_str());

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("failed to load configuration"));
}
