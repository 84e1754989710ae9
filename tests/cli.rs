use assert_cmd::{cargo_bin_cmd, Command};
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

fn budgetiq(dir: &TempDir) -> Command {
    let mut cmd = cargo_bin_cmd!("budgetiq");
    cmd.env("BUDGETIQ_DATA_DIR", dir.path());
    cmd
}

/// Fresh data dir with `alice` registered and logged in
fn registered() -> TempDir {
    let dir = TempDir::new().unwrap();
    budgetiq(&dir)
        .args(["user", "register", "alice", "--password", "hunter22"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Registered user: alice"))
        .stdout(predicate::str::contains("Food"));
    dir
}

#[test]
fn test_init_creates_data_files() {
    let dir = TempDir::new().unwrap();

    budgetiq(&dir)
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("Initialization complete!"));

    assert!(dir.path().join("config.json").exists());
    assert!(dir.path().join("data").join("expenses.json").exists());
}

#[test]
fn test_commands_require_login() {
    let dir = TempDir::new().unwrap();

    budgetiq(&dir)
        .args(["expense", "list"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("No user logged in"));

    budgetiq(&dir)
        .args(["goal", "list"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("No user logged in"));
}

#[test]
fn test_login_logout_flow() {
    let dir = registered();

    budgetiq(&dir)
        .args(["user", "whoami"])
        .assert()
        .success()
        .stdout(predicate::str::contains("alice"));

    budgetiq(&dir)
        .args(["user", "logout"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Logged out alice"));

    budgetiq(&dir)
        .args(["user", "whoami"])
        .assert()
        .failure();

    budgetiq(&dir)
        .args(["user", "login", "alice", "--password", "wrong-one"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid username or password"));

    budgetiq(&dir)
        .args(["user", "login", "ALICE", "--password", "hunter22"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Logged in as alice"));
}

#[test]
fn test_duplicate_registration_fails() {
    let dir = registered();

    budgetiq(&dir)
        .args(["user", "register", "alice", "--password", "other-pass"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("already exists"));
}

#[test]
fn test_expense_list_with_category_totals() {
    let dir = registered();

    for (amount, description, category) in [
        ("30.00", "Groceries", "Food"),
        ("10.00", "Lunch", "Food"),
        ("20.00", "Bus pass", "Transport"),
    ] {
        budgetiq(&dir)
            .args([
                "expense",
                "add",
                amount,
                description,
                "--category",
                category,
                "--date",
                "2025-03-10",
            ])
            .assert()
            .success()
            .stdout(predicate::str::contains("Added expense"));
    }

    // Outside the listed range
    budgetiq(&dir)
        .args([
            "expense", "add", "99.00", "Concert", "--category", "Entertainment", "--date",
            "2025-04-02",
        ])
        .assert()
        .success();

    budgetiq(&dir)
        .args(["expense", "list", "--start", "2025-03-01", "--end", "2025-03-31"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Total spent: $60.00"))
        .stdout(predicate::str::contains("Bus pass"))
        .stdout(predicate::str::contains(" 67%"))
        .stdout(predicate::str::contains(" 33%"))
        .stdout(predicate::str::contains("Concert").not());
}

#[test]
fn test_expense_rejects_non_positive_amount() {
    let dir = registered();

    budgetiq(&dir)
        .args(["expense", "add", "-5.00", "Refund", "--category", "Food"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Validation error"));

    budgetiq(&dir)
        .args(["expense", "add", "5.00", "Snack", "--category", "Nope"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Category not found"));
}

#[test]
fn test_goal_progress_for_current_month() {
    let dir = registered();

    budgetiq(&dir)
        .args(["goal", "add", "Food", "--min", "100", "--max", "200"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Created goal for Food: $100.00 to $200.00"));

    budgetiq(&dir)
        .args(["expense", "add", "150.00", "Weekly shop", "--category", "Food"])
        .assert()
        .success();

    budgetiq(&dir)
        .args(["goal", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("$150.00"))
        .stdout(predicate::str::contains("75%"))
        .stdout(predicate::str::contains("On track"));

    budgetiq(&dir)
        .args(["goal", "add", "Food", "--min", "1", "--max", "2"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("already exists"));
}

#[test]
fn test_goal_with_inverted_range_fails() {
    let dir = registered();

    budgetiq(&dir)
        .args(["goal", "add", "Food", "--min", "200", "--max", "100"])
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "Maximum amount must be greater than minimum amount",
        ));
}

#[test]
fn test_category_create_and_delete_keeps_expenses() {
    let dir = registered();

    budgetiq(&dir)
        .args(["category", "create", "Pets", "--color", "#336699"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Color: #336699"));

    budgetiq(&dir)
        .args([
            "expense", "add", "25.00", "Vet", "--category", "Pets", "--date", "2025-05-05",
        ])
        .assert()
        .success();

    budgetiq(&dir)
        .args(["category", "delete", "Pets"])
        .assert()
        .success();

    budgetiq(&dir)
        .args(["expense", "list", "--period", "2025-05-01..2025-05-31"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Vet"))
        .stdout(predicate::str::contains("Unknown Category"));
}

#[test]
fn test_spending_report_csv_export() {
    let dir = registered();
    let out = dir.path().join("report.csv");

    budgetiq(&dir)
        .args([
            "expense", "add", "12.50", "Taxi", "--category", "Transport", "--date", "2025-06-01",
        ])
        .assert()
        .success();

    budgetiq(&dir)
        .args(["report", "spending", "--start", "2025-06-01", "--end", "2025-06-30", "--output"])
        .arg(&out)
        .assert()
        .success()
        .stdout(predicate::str::contains("Spending report exported to"));

    let csv = fs::read_to_string(&out).unwrap();
    assert!(csv.starts_with("Start Date,End Date,Category,Amount,Expense Count,Percentage"));
    assert!(csv.contains("2025-06-01,2025-06-30,Transport,12.50,1,100"));
    assert!(csv.contains("TOTAL,12.50,1,100"));
}

#[test]
fn test_audit_log_records_changes() {
    let dir = registered();

    budgetiq(&dir)
        .args(["category", "edit", "Food", "--name", "Groceries"])
        .assert()
        .success();

    budgetiq(&dir)
        .args(["audit", "--limit", "50"])
        .assert()
        .success()
        .stdout(predicate::str::contains("CREATE User"))
        .stdout(predicate::str::contains("LOGIN User"))
        .stdout(predicate::str::contains("UPDATE Category"))
        .stdout(predicate::str::contains("password_hash").not());
}
