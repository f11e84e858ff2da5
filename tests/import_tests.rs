//! Integration tests for import command

#![allow(deprecated)]

use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

mod common;
use common::{moodjour_cmd, write_page, write_store};

const SCENARIO_HEADER: &str = "quinta-feira, 3 de março de 2024";
const SCENARIO_BODY: &str = "<p>Estou muito ansioso hoje.</p><p>Quero melhorar minha rotina.</p>";

#[test]
fn test_import_scenario() {
    let temp = TempDir::new().unwrap();
    let csv = write_store(temp.path(), &["2024 Sat Mar 2 12:00 PM,Anxious;Motivated"]);
    write_page(temp.path(), "a.html", SCENARIO_HEADER, SCENARIO_BODY);

    moodjour_cmd()
        .current_dir(temp.path())
        .arg("import")
        .assert()
        .success()
        .stdout(predicate::str::contains("Pages scanned: 1"))
        .stdout(predicate::str::contains("Rows added: 1"));

    let contents = fs::read_to_string(&csv).unwrap();
    let row = contents.lines().last().unwrap();
    assert_eq!(
        row,
        "2024 Sun Mar 3 12:00 PM,Anxious,,,,,,,,,,,,,,\
         Estou muito ansioso hoje.,\
         Estou muito ansioso hoje. Quero melhorar minha rotina.,\
         Quero melhorar minha rotina."
    );
}

#[test]
fn test_import_twice_adds_nothing() {
    let temp = TempDir::new().unwrap();
    let csv = write_store(temp.path(), &["2024 Sat Mar 2 12:00 PM,Anxious;Motivated"]);
    write_page(temp.path(), "a.html", SCENARIO_HEADER, SCENARIO_BODY);
    write_page(
        temp.path(),
        "b.html",
        "sexta-feira, 4 de março de 2024",
        "<p>Vou treinar amanhã.</p>",
    );

    moodjour_cmd()
        .current_dir(temp.path())
        .arg("import")
        .assert()
        .success()
        .stdout(predicate::str::contains("Rows added: 2"));
    let after_first = fs::read_to_string(&csv).unwrap();

    moodjour_cmd()
        .current_dir(temp.path())
        .arg("import")
        .assert()
        .success()
        .stdout(predicate::str::contains("Rows added: 0"))
        .stdout(predicate::str::contains("Skipped (duplicate): 2"));
    assert_eq!(fs::read_to_string(&csv).unwrap(), after_first);
}

#[test]
fn test_force_reimports() {
    let temp = TempDir::new().unwrap();
    let csv = write_store(temp.path(), &["2024 Sat Mar 2 12:00 PM,Anxious"]);
    write_page(temp.path(), "a.html", SCENARIO_HEADER, SCENARIO_BODY);

    moodjour_cmd()
        .current_dir(temp.path())
        .arg("import")
        .assert()
        .success();
    moodjour_cmd()
        .current_dir(temp.path())
        .args(["import", "--force"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Rows added: 1"));

    let contents = fs::read_to_string(&csv).unwrap();
    assert_eq!(contents.lines().count(), 4);
}

#[test]
fn test_dry_run_leaves_store_untouched() {
    let temp = TempDir::new().unwrap();
    let csv = write_store(temp.path(), &["2024 Sat Mar 2 12:00 PM,Anxious"]);
    write_page(temp.path(), "a.html", SCENARIO_HEADER, SCENARIO_BODY);
    let before = fs::read_to_string(&csv).unwrap();

    moodjour_cmd()
        .current_dir(temp.path())
        .args(["import", "--dry-run"])
        .assert()
        .success()
        .stdout(predicate::str::contains("New rows: 1"));

    assert_eq!(fs::read_to_string(&csv).unwrap(), before);
}

#[test]
fn test_dry_run_without_store() {
    let temp = TempDir::new().unwrap();
    fs::write(temp.path().join("moods.txt"), "Anxious\n").unwrap();
    write_page(temp.path(), "a.html", SCENARIO_HEADER, SCENARIO_BODY);

    moodjour_cmd()
        .current_dir(temp.path())
        .args(["import", "--dry-run"])
        .assert()
        .success()
        .stdout(predicate::str::contains("New rows: 1"));
}

#[test]
fn test_missing_store_is_fatal() {
    let temp = TempDir::new().unwrap();
    fs::write(temp.path().join("moods.txt"), "Calm\n").unwrap();
    write_page(temp.path(), "a.html", SCENARIO_HEADER, SCENARIO_BODY);

    moodjour_cmd()
        .current_dir(temp.path())
        .arg("import")
        .assert()
        .code(3)
        .stderr(predicate::str::contains("Record store not found"));
}

#[test]
fn test_empty_mood_pool_is_fatal() {
    let temp = TempDir::new().unwrap();
    write_store(temp.path(), &[]);
    write_page(temp.path(), "a.html", SCENARIO_HEADER, SCENARIO_BODY);

    moodjour_cmd()
        .current_dir(temp.path())
        .arg("import")
        .assert()
        .code(2)
        .stderr(predicate::str::contains("No mood labels found"));
}

#[test]
fn test_missing_entries_directory() {
    let temp = TempDir::new().unwrap();
    write_store(temp.path(), &["2024 Sat Mar 2 12:00 PM,Calm"]);

    moodjour_cmd()
        .current_dir(temp.path())
        .arg("import")
        .assert()
        .code(4)
        .stderr(predicate::str::contains("Entries directory not found"));
}

#[test]
fn test_invalid_time() {
    let temp = TempDir::new().unwrap();
    write_store(temp.path(), &["2024 Sat Mar 2 12:00 PM,Calm"]);

    moodjour_cmd()
        .current_dir(temp.path())
        .args(["import", "--time", "25:61"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("HH:MM AM/PM"));
}

#[test]
fn test_custom_time_of_day() {
    let temp = TempDir::new().unwrap();
    let csv = write_store(temp.path(), &["2024 Sat Mar 2 12:00 PM,Anxious"]);
    write_page(temp.path(), "a.html", SCENARIO_HEADER, SCENARIO_BODY);

    moodjour_cmd()
        .current_dir(temp.path())
        .args(["import", "--time", "08:30 PM"])
        .assert()
        .success();

    let contents = fs::read_to_string(&csv).unwrap();
    assert!(contents.contains("2024 Sun Mar 3 08:30 PM,Anxious,"));
}

#[test]
fn test_bullets_and_blank_lines_normalized() {
    let temp = TempDir::new().unwrap();
    let csv = write_store(temp.path(), &["2024 Sat Mar 2 12:00 PM,Calm"]);
    write_page(
        temp.path(),
        "a.html",
        "3 de maio de 2024",
        "<p>Lista:</p>\n\n\n<p>• um</p><p>•   dois</p>\n\n<p></p><p>Fim.</p>",
    );

    moodjour_cmd()
        .current_dir(temp.path())
        .arg("import")
        .assert()
        .success();

    let contents = fs::read_to_string(&csv).unwrap();
    assert!(contents.contains(",Lista: - um - dois Fim.,"));
    assert!(!contents.contains("  "));
}

#[test]
fn test_unresolved_pages_are_skipped() {
    let temp = TempDir::new().unwrap();
    write_store(temp.path(), &["2024 Sat Mar 2 12:00 PM,Calm"]);
    write_page(temp.path(), "a.html", "sem data", "<p>Texto.</p>");
    write_page(temp.path(), "b.html", "3 de maio de 2024", "<p>Texto.</p>");
    write_page(temp.path(), "c.html", "3 de brumário de 2024", "<p>Texto.</p>");

    moodjour_cmd()
        .current_dir(temp.path())
        .arg("import")
        .assert()
        .success()
        .stdout(predicate::str::contains("Pages scanned: 3"))
        .stdout(predicate::str::contains("Rows added: 1"))
        .stdout(predicate::str::contains("Skipped (unresolved date): 2"));
}

#[test]
fn test_remote_failure_degrades() {
    let temp = TempDir::new().unwrap();
    let csv = write_store(temp.path(), &["2024 Sat Mar 2 12:00 PM,Calm"]);
    write_page(temp.path(), "a.html", "3 de maio de 2024", "<p>Fui ao mercado.</p>");

    moodjour_cmd()
        .current_dir(temp.path())
        .env("OPENAI_API_KEY", "sk-test")
        .args(["import", "--llm-endpoint", "http://127.0.0.1:9/v1/responses"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Rows added: 1"))
        .stdout(predicate::str::contains("Moods (unassigned): 1"))
        .stderr(predicate::str::contains("remote mood classification failed"));

    let contents = fs::read_to_string(&csv).unwrap();
    assert!(contents.contains("2024 Fri May 3 12:00 PM,,"));
}

#[test]
fn test_missing_credential_warns_once() {
    let temp = TempDir::new().unwrap();
    write_store(temp.path(), &["2024 Sat Mar 2 12:00 PM,Calm"]);
    write_page(temp.path(), "a.html", "3 de maio de 2024", "<p>Fui ao mercado.</p>");
    write_page(temp.path(), "b.html", "4 de maio de 2024", "<p>Fui à praia.</p>");

    let output = moodjour_cmd()
        .current_dir(temp.path())
        .arg("import")
        .output()
        .unwrap();
    assert!(output.status.success());

    let stderr = String::from_utf8(output.stderr).unwrap();
    assert_eq!(stderr.matches("remote mood classifier disabled").count(), 1);
    assert!(stderr.contains("OPENAI_API_KEY"));

    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.contains("Moods (unassigned): 2"));
}

#[test]
fn test_llm_off_uses_neutral_fallback() {
    let temp = TempDir::new().unwrap();
    let csv = write_store(temp.path(), &["2024 Sat Mar 2 12:00 PM,Calm"]);
    write_page(temp.path(), "a.html", "3 de maio de 2024", "<p>Fui ao mercado.</p>");

    moodjour_cmd()
        .current_dir(temp.path())
        .args(["import", "--llm-off"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Moods (heuristic): 1"))
        .stderr(predicate::str::contains("remote mood classifier disabled").not());

    let contents = fs::read_to_string(&csv).unwrap();
    assert!(contents.contains("2024 Fri May 3 12:00 PM,Calm,"));
}

#[test]
fn test_dotenv_in_parent_directory_is_ignored() {
    let temp = TempDir::new().unwrap();
    fs::write(temp.path().join(".env"), "OPENAI_API_KEY=sk-parent\n").unwrap();
    let work = temp.path().join("work");
    fs::create_dir(&work).unwrap();
    write_store(&work, &["2024 Sat Mar 2 12:00 PM,Calm"]);
    write_page(&work, "a.html", "3 de maio de 2024", "<p>Fui ao mercado.</p>");

    moodjour_cmd()
        .current_dir(&work)
        .arg("import")
        .assert()
        .success()
        .stderr(predicate::str::contains("remote mood classifier disabled"));
}

#[test]
fn test_dotenv_in_working_directory_is_loaded() {
    let temp = TempDir::new().unwrap();
    fs::write(temp.path().join(".env"), "OPENAI_API_KEY=sk-local\n").unwrap();
    write_store(temp.path(), &["2024 Sat Mar 2 12:00 PM,Calm"]);
    write_page(temp.path(), "a.html", "3 de maio de 2024", "<p>Fui ao mercado.</p>");

    moodjour_cmd()
        .current_dir(temp.path())
        .args(["import", "--llm-endpoint", "http://127.0.0.1:9/v1/responses"])
        .assert()
        .success()
        .stderr(predicate::str::contains("remote mood classifier disabled").not())
        .stderr(predicate::str::contains("remote mood classification failed"));
}

#[test]
fn test_config_file_supplies_paths() {
    let temp = TempDir::new().unwrap();
    fs::write(
        temp.path().join("export.csv"),
        format!("{}2024 Sat Mar 2 12:00 PM,Anxious\n", common::HEADER),
    )
    .unwrap();
    write_page(temp.path(), "a.html", SCENARIO_HEADER, SCENARIO_BODY);
    fs::write(
        temp.path().join("settings.toml"),
        "csv = \"export.csv\"\ntime = \"07:00 AM\"\nllm_off = true\n",
    )
    .unwrap();

    moodjour_cmd()
        .current_dir(temp.path())
        .args(["--config", "settings.toml", "import"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Rows added: 1"));

    let contents = fs::read_to_string(temp.path().join("export.csv")).unwrap();
    assert!(contents.contains("2024 Sun Mar 3 07:00 AM,Anxious,"));
}
