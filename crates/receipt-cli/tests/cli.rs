use std::fs;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

const PIZZA: &str = r#"{
    "orderId": "1001",
    "items": [{"name": "Pizza", "quantity": 1, "price": 18.99}],
    "subtotal": 18.99,
    "tax": 1.52,
    "total": 20.51,
    "payment": {"method": "Cash", "amountPaid": 25, "change": 4.49}
}"#;

fn receipt() -> Command {
    Command::cargo_bin("receipt").unwrap()
}

/// Temp dir holding a store profile; passed via `--profile` so tests never
/// touch the user's config directory.
fn workspace() -> (TempDir, String) {
    let dir = tempfile::tempdir().unwrap();
    let profile = dir.path().join("store-profile.txt");
    fs::write(&profile, "StoreName=Corner Pizza\nEnableCashDrawer=true\n").unwrap();
    let profile = profile.to_string_lossy().into_owned();
    (dir, profile)
}

#[test]
fn print_rows_from_stdin() {
    let (_dir, profile) = workspace();

    receipt()
        .args(["--profile", profile.as_str(), "print", "--rows"])
        .write_stdin(PIZZA)
        .assert()
        .success()
        .stdout(predicate::str::contains("Corner Pizza"))
        .stdout(predicate::str::contains("Pizza | 1 | $18.99 | $18.99"))
        .stdout(predicate::str::contains("TOTAL: | $20.51"))
        .stdout(predicate::str::contains("Change: | $4.49"))
        .stderr(predicate::str::contains("Cash drawer opened"));
}

#[test]
fn print_preview_from_file() {
    let (dir, profile) = workspace();
    let input = dir.path().join("order.json");
    fs::write(&input, PIZZA).unwrap();

    receipt()
        .args(["--profile", profile.as_str(), "print"])
        .arg(&input)
        .assert()
        .success()
        .stdout(predicate::str::contains("-----"))
        .stdout(predicate::str::contains("Thank you for your business!"));
}

#[test]
fn print_without_drawer() {
    let (dir, _) = workspace();
    let profile = dir.path().join("no-drawer.txt");
    fs::write(&profile, "EnableCashDrawer=false\n").unwrap();

    receipt()
        .arg("--profile")
        .arg(&profile)
        .args(["print", "--rows"])
        .write_stdin(PIZZA)
        .assert()
        .success()
        .stderr(predicate::str::contains("Cash drawer").not());
}

#[test]
fn print_rejects_unterminated_payload() {
    let (_dir, profile) = workspace();

    receipt()
        .args(["--profile", profile.as_str(), "print"])
        .write_stdin(r#"{"orderId":"1001"#)
        .assert()
        .failure()
        .stderr(predicate::str::contains("unterminated string"));
}

#[test]
fn missing_explicit_profile_fails() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("nope.txt");

    receipt()
        .arg("--profile")
        .arg(&missing)
        .arg("print")
        .write_stdin(PIZZA)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Profile file not found"));
}

#[test]
fn rust_log_controls_library_logging() {
    let (_dir, profile) = workspace();

    receipt()
        .env("RUST_LOG", "receipt_core=debug")
        .args(["--profile", profile.as_str(), "print", "--rows"])
        .write_stdin(PIZZA)
        .assert()
        .success()
        .stderr(predicate::str::contains("Rendered"));

    receipt()
        .env_remove("RUST_LOG")
        .args(["--profile", profile.as_str(), "print", "--rows"])
        .write_stdin(PIZZA)
        .assert()
        .success()
        .stderr(predicate::str::contains("Rendered").not());
}

#[test]
fn parse_outputs_receipt_json() {
    receipt()
        .arg("parse")
        .write_stdin(r#"{"orderId":"A-7","customer.name":"Ann","total":"9.5"}"#)
        .assert()
        .success()
        .stdout(predicate::str::contains(r#""order_id": "A-7""#))
        .stdout(predicate::str::contains(r#""name": "Ann""#));
}

#[test]
fn parse_validate_reports_issues() {
    receipt()
        .args(["parse", "--validate"])
        .write_stdin(r#"{"items":[{"name":"Tea","price":"2"}],"total":"5"}"#)
        .assert()
        .success()
        .stderr(predicate::str::contains("Validation issues"));
}

#[test]
fn layout_outputs_draw_commands() {
    let (_dir, profile) = workspace();

    receipt()
        .args(["--profile", profile.as_str(), "layout", "--at", "2024-03-01 12:00:00"])
        .write_stdin(PIZZA)
        .assert()
        .success()
        .stdout(predicate::str::contains(r#""op": "text""#))
        .stdout(predicate::str::contains(r#""op": "line""#))
        .stdout(predicate::str::contains("03/01/2024 12:00:00"));
}

#[test]
fn layout_rejects_bad_timestamp() {
    let (_dir, profile) = workspace();

    receipt()
        .args(["--profile", profile.as_str(), "layout", "--at", "someday"])
        .write_stdin(PIZZA)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid timestamp"));
}

#[test]
fn config_init_set_get_show() {
    let dir = tempfile::tempdir().unwrap();
    let profile = dir.path().join("nested").join("store-profile.txt");

    receipt()
        .arg("--profile")
        .arg(&profile)
        .args(["config", "init"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Created profile file"));

    receipt()
        .arg("--profile")
        .arg(&profile)
        .args(["config", "init"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--force"));

    receipt()
        .arg("--profile")
        .arg(&profile)
        .args(["config", "set", "currency", "€"])
        .assert()
        .success();

    receipt()
        .arg("--profile")
        .arg(&profile)
        .args(["config", "get", "Currency"])
        .assert()
        .success()
        .stdout("€\n");

    receipt()
        .arg("--profile")
        .arg(&profile)
        .args(["config", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("StoreName=Your Store Name"))
        .stdout(predicate::str::contains("Currency=€"));
}

#[test]
fn config_rejects_unknown_key_and_bad_value() {
    let (_dir, profile) = workspace();

    receipt()
        .args(["--profile", profile.as_str(), "config", "set", "Colour", "red"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown profile key"));

    receipt()
        .args(["--profile", profile.as_str(), "config", "set", "PageWidth", "0"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid value"));
}

#[test]
fn config_update_applies_several_values() {
    let (_dir, profile) = workspace();

    receipt()
        .args([
            "--profile",
            profile.as_str(),
            "config",
            "update",
            "--currency",
            "£",
            "--page-width",
            "300",
            "--enable-cash-drawer",
            "false",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Updated profile"));

    receipt()
        .args(["--profile", profile.as_str(), "config", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("StoreName=Corner Pizza"))
        .stdout(predicate::str::contains("Currency=£"))
        .stdout(predicate::str::contains("PageWidth=300"))
        .stdout(predicate::str::contains("EnableCashDrawer=false"));
}

#[test]
fn config_rejects_multiline_values() {
    let (_dir, profile) = workspace();

    receipt()
        .args([
            "--profile",
            profile.as_str(),
            "config",
            "update",
            "--phone",
            "555-0100",
            "--store-name",
            "Corner\nPageWidth=1",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid value for StoreName"));

    receipt()
        .args(["--profile", profile.as_str(), "config", "set", "Address", "1 Main\rSt"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid value for Address"));

    // The failed update left the file untouched.
    let content = fs::read_to_string(&profile).unwrap();
    assert_eq!(content, "StoreName=Corner Pizza\nEnableCashDrawer=true\n");
}

#[test]
fn config_update_requires_a_setting() {
    let (_dir, profile) = workspace();

    receipt()
        .args(["--profile", profile.as_str(), "config", "update"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Nothing to update"));
}

#[test]
fn config_path_reports_status() {
    let dir = tempfile::tempdir().unwrap();
    let profile = dir.path().join("store-profile.txt");

    receipt()
        .arg("--profile")
        .arg(&profile)
        .args(["config", "path"])
        .assert()
        .success()
        .stdout(predicate::str::contains("not created"));
}
