mod common;

use assert_cmd::Command;
use common::temp_home;
use predicates::prelude::*;
use predicates::str::contains;

fn script(home: &std::path::Path, input: &str) -> assert_cmd::assert::Assert {
    Command::cargo_bin("pocket_ledger_cli")
        .unwrap()
        .env("POCKET_LEDGER_HOME", home)
        .env("POCKET_LEDGER_CLI_SCRIPT", "1")
        .env("RUST_LOG", "off")
        .write_stdin(input.to_string())
        .assert()
}

#[test]
fn script_mode_runs_basic_flow() {
    let home = temp_home();
    script(&home, "add Salary 1000 2024-01-01\nsummary\nexit\n")
        .success()
        .stdout(contains("Balance   : $1,000.00"))
        .stdout(contains("No expenses recorded yet."));

    let json = std::fs::read_to_string(home.join("transactions.json")).unwrap();
    assert!(json.contains("\"Salary\""));
}

#[test]
fn summary_lists_expense_share() {
    let home = temp_home();
    script(
        &home,
        "add Salary 1000 2024-01-01\nadd Groceries -50 2024-01-02 Food\nsummary\n",
    )
    .success()
    .stdout(contains("$950.00"))
    .stdout(contains("100.0%"));
}

#[test]
fn list_shows_newest_first() {
    let home = temp_home();
    let assert = script(
        &home,
        "add Salary 1000 2024-01-01\nadd Groceries -50 2024-01-02 Food\nlist\n",
    )
    .success();
    let stdout = String::from_utf8(assert.get_output().stdout.clone()).unwrap();
    let groceries = stdout.find("02/01/2024").unwrap();
    let salary = stdout.find("01/01/2024").unwrap();
    assert!(groceries < salary);
}

#[test]
fn rejected_add_is_reported_and_not_saved() {
    let home = temp_home();
    script(&home, "add Nothing 0 2024-01-01\n")
        .success()
        .stdout(contains("Transaction rejected"));
    assert!(!home.join("transactions.json").exists());
}

#[test]
fn unknown_command_suggests_alternative() {
    let home = temp_home();
    script(&home, "sumary\n")
        .success()
        .stdout(contains("Unknown command `sumary`"))
        .stdout(contains("Suggestion: `summary`?"));
}

#[test]
fn data_persists_between_runs() {
    let home = temp_home();
    script(&home, "add Rent -900 2024-05-01 Housing\n").success();
    script(&home, "list\ncategories\n")
        .success()
        .stdout(contains("Rent"))
        .stdout(contains("Housing"))
        .stdout(contains("-$900.00"));
}

#[test]
fn output_is_plain_in_script_mode() {
    let home = temp_home();
    script(&home, "help\n")
        .success()
        .stdout(contains("add <description>"))
        .stdout(contains("\u{1b}[").not());
}

#[test]
fn remembered_category_fills_omitted_field() {
    let home = temp_home();
    let assert = script(&home, "category Food\nadd Lunch -10 2024-01-01\nlist\n").success();
    let stdout = String::from_utf8(assert.get_output().stdout.clone()).unwrap();
    let row = stdout
        .lines()
        .find(|line| line.contains("Lunch") && line.contains("-$10.00"))
        .expect("lunch row listed");
    assert!(row.contains("Food"), "{row}");

    let json = std::fs::read_to_string(home.join("transactions.json")).unwrap();
    assert!(json.contains("\"category\": \"Food\""), "{json}");
}

#[test]
fn unseen_category_is_announced() {
    let home = temp_home();
    script(&home, "add Kite -20 2024-01-01 Hobbies\nadd Bread -2 2024-01-02 Hobbies\n")
        .success()
        .stdout(contains("New category `Hobbies` added to suggestions.").count(1));
}

#[test]
fn remove_names_the_deleted_entry() {
    let home = temp_home();
    script(&home, "add Rent -900 2024-05-01 Housing\nremove 1\nremove 1\n")
        .success()
        .stdout(contains("Removed #1 Rent"))
        .stdout(contains("No transaction #1; nothing to remove."));
}

#[test]
fn list_header_names_the_order() {
    let home = temp_home();
    script(&home, "list asc\n")
        .success()
        .stdout(contains("Transactions (oldest first)"))
        .stdout(contains("No transactions recorded yet."));
}
