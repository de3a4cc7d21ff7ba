use assert_cmd::{cargo, prelude::*};
use predicates::prelude::*;
use std::fs;
use std::process::Command;
use tempfile::TempDir;

fn setup_temp_workdir() -> TempDir {
    TempDir::new().expect("failed to create temp workdir")
}

fn tr_docs_cmd(workdir: &TempDir) -> Command {
    let mut cmd = Command::new(cargo::cargo_bin!("tr-docs"));
    // Isolate from any real .env and real credentials in the parent env
    cmd.current_dir(workdir.path());
    // Keep tracing output away from the stdout assertions
    cmd.env("RUST_LOG", "error");
    for key in [
        "TR_PHONE_NUMBER",
        "TR_PIN",
        "TR_DAYS_TO_DOWNLOAD",
        "TR_DOC_DOWNLOAD_PATH",
        "NC_URL",
        "NC_AUTH_USER",
        "NC_AUTH_PASS",
        "NC_TR_DOCUMENT_FOLDER",
    ] {
        cmd.env_remove(key);
    }
    cmd
}

#[test]
fn help_lists_all_skip_flags() {
    let workdir = setup_temp_workdir();
    let mut cmd = tr_docs_cmd(&workdir);
    cmd.arg("--help");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("--nodl"))
        .stdout(predicate::str::contains("--skipdel"))
        .stdout(predicate::str::contains("--nocsv"))
        .stdout(predicate::str::contains("--noupload"))
        .stdout(predicate::str::contains("--ffc"))
        .stdout(predicate::str::contains("skip-doc-download"));
}

#[test]
fn all_skip_run_succeeds_and_touches_nothing() {
    let workdir = setup_temp_workdir();
    let docs = workdir.path().join("docs");

    let mut cmd = tr_docs_cmd(&workdir);
    cmd.env("TR_DOC_DOWNLOAD_PATH", &docs)
        .arg("--no-color")
        .arg("--nodl")
        .arg("--skipdel")
        .arg("--noupload");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Skipping deletion"))
        .stdout(predicate::str::contains("Skipping document download"))
        .stdout(predicate::str::contains("Skipping CSV generation"))
        .stdout(predicate::str::contains("Skipping Nextcloud upload"))
        .stdout(predicate::str::contains("\u{001b}[").not());

    assert!(!docs.exists(), "all-skip run must not create anything");
}

#[test]
fn missing_download_path_fails_naming_the_key() {
    let workdir = setup_temp_workdir();

    let mut cmd = tr_docs_cmd(&workdir);
    cmd.arg("--nodl").arg("--skipdel").arg("--noupload");

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("TR_DOC_DOWNLOAD_PATH"));
}

#[test]
fn missing_credentials_only_fail_when_download_runs() {
    let workdir = setup_temp_workdir();
    let docs = workdir.path().join("docs");

    // Download planned but TR_PIN etc. absent: must fail before any stage.
    let mut cmd = tr_docs_cmd(&workdir);
    cmd.env("TR_DOC_DOWNLOAD_PATH", &docs)
        .arg("--noupload")
        .arg("--nocsv");

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("TR_DAYS_TO_DOWNLOAD"));
}

#[test]
fn reset_stage_deletes_previous_download_folder() {
    let workdir = setup_temp_workdir();
    let docs = workdir.path().join("docs");
    fs::create_dir_all(docs.join("2024")).unwrap();
    fs::write(docs.join("2024").join("old.pdf"), b"stale").unwrap();

    let mut cmd = tr_docs_cmd(&workdir);
    cmd.env("TR_DOC_DOWNLOAD_PATH", &docs)
        .arg("--no-color")
        .arg("--nodl")
        .arg("--nocsv")
        .arg("--noupload");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Deleted existing"));

    assert!(!docs.exists(), "reset stage should have deleted the folder");
}

#[test]
fn csv_guard_skips_generation_on_stale_data() {
    let workdir = setup_temp_workdir();
    let docs = workdir.path().join("docs");
    fs::create_dir_all(&docs).unwrap();
    fs::write(docs.join("all_events.json"), b"[]").unwrap();

    // Both download and deletion skipped: the guard must skip the CSV too.
    let mut cmd = tr_docs_cmd(&workdir);
    cmd.env("TR_DOC_DOWNLOAD_PATH", &docs)
        .arg("--no-color")
        .arg("--nodl")
        .arg("--skipdel")
        .arg("--noupload");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Skipping CSV generation"));

    let entries: Vec<_> = fs::read_dir(&docs).unwrap().collect();
    assert_eq!(entries.len(), 1, "no CSV should have been written");
}
