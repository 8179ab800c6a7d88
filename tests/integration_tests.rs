use predicates::prelude::PredicateBooleanExt;
use predicates::str::contains;

mod common;
use common::Env;
use std::fs;

#[test]
fn test_init_creates_database() {
    let env = Env::new("init");

    env.wh()
        .args(["--test", "init"])
        .assert()
        .success()
        .stdout(contains("Database initialized"))
        .stdout(contains("20240301_0001_local_storage"));

    assert!(std::path::Path::new(&env.db).exists());
}

#[test]
fn test_register_and_whoami() {
    let env = Env::with_user("register", "alice");

    env.wh()
        .arg("whoami")
        .assert()
        .success()
        .stdout(contains("alice"))
        .stdout(contains("for this terminal session"));
}

#[test]
fn test_register_requires_password() {
    let env = Env::new("register_empty");
    env.init();

    env.wh()
        .args(["register", "alice", "--password", ""])
        .assert()
        .failure()
        .stderr(contains("Please enter both username and password"));
}

#[test]
fn test_duplicate_register_fails_and_keeps_data() {
    let env = Env::with_user("duplicate", "alice");
    env.add("2024-03-04", "09:00", "17:30");

    env.wh()
        .args(["register", "alice", "--password", "other"])
        .assert()
        .failure()
        .stderr(contains("Username already exists"));

    // Original password still works and the entry is still there.
    env.wh()
        .args(["login", "alice", "--password", "secret"])
        .assert()
        .success();
    env.wh()
        .arg("list")
        .assert()
        .success()
        .stdout(contains("2024-03-04"));
}

#[test]
fn test_login_with_wrong_password_fails() {
    let env = Env::with_user("bad_login", "alice");
    env.wh().arg("logout").assert().success();

    env.wh()
        .args(["login", "alice", "--password", "nope"])
        .assert()
        .failure()
        .stderr(contains("Invalid username or password"));

    env.wh()
        .arg("whoami")
        .assert()
        .success()
        .stdout(contains("Not logged in"));
}

#[test]
fn test_session_login_is_per_terminal() {
    let env = Env::with_user("session_scope", "alice");

    env.wh_in_session("another-terminal")
        .arg("list")
        .assert()
        .failure()
        .stderr(contains("Not logged in"));
}

#[test]
fn test_remembered_login_is_shared() {
    let env = Env::with_user("remember", "alice");
    env.wh().arg("logout").assert().success();

    env.wh()
        .args(["login", "alice", "--password", "secret", "--remember"])
        .assert()
        .success();

    env.wh_in_session("another-terminal")
        .arg("whoami")
        .assert()
        .success()
        .stdout(contains("alice"))
        .stdout(contains("remembered"));

    env.wh_in_session("another-terminal")
        .arg("logout")
        .assert()
        .success();
    env.wh()
        .arg("whoami")
        .assert()
        .success()
        .stdout(contains("Not logged in"));
}

#[test]
fn test_commands_need_login() {
    let env = Env::new("need_login");
    env.init();

    env.wh()
        .args(["add", "2024-03-04", "--in", "09:00", "--out", "10:00"])
        .assert()
        .failure()
        .stderr(contains("Not logged in"));
}

#[test]
fn test_add_computes_hours() {
    let env = Env::with_user("add_hours", "alice");

    env.wh()
        .args(["add", "2024-03-04", "--in", "09:00", "--out", "17:30"])
        .assert()
        .success()
        .stdout(contains("09:00 → 17:30 (8.50 h)"));

    env.wh()
        .arg("list")
        .assert()
        .success()
        .stdout(contains("2024-03-04"))
        .stdout(contains("8.50"));
}

#[test]
fn test_add_rejects_inverted_range() {
    let env = Env::with_user("add_inverted", "alice");

    env.wh()
        .args(["add", "2024-03-04", "--in", "17:00", "--out", "09:00"])
        .assert()
        .failure()
        .stderr(contains("Clock Out time must be after Clock In time"));

    env.wh()
        .arg("list")
        .assert()
        .success()
        .stdout(contains("No entries yet"));
}

#[test]
fn test_add_rejects_missing_fields() {
    let env = Env::with_user("add_missing", "alice");

    env.wh()
        .args(["add", "2024-03-04", "--in", "09:00"])
        .assert()
        .failure()
        .stderr(contains("Please fill in all fields"));
}

#[test]
fn test_list_is_newest_first() {
    let env = Env::with_user("list_order", "alice");
    env.add("2024-03-01", "09:00", "10:00");
    env.add("2024-03-20", "09:00", "10:00");
    env.add("2024-03-10", "09:00", "10:00");

    let out = env.wh().arg("list").output().expect("run list");
    let stdout = String::from_utf8_lossy(&out.stdout);
    let dates: Vec<&str> = stdout
        .lines()
        .skip(1)
        .filter_map(|l| l.split_whitespace().nth(1))
        .collect();
    assert_eq!(dates, vec!["2024-03-20", "2024-03-10", "2024-03-01"]);
}

#[test]
fn test_del_is_idempotent() {
    let env = Env::with_user("del", "alice");
    env.add("2024-03-01", "09:00", "10:00");
    env.add("2024-03-02", "09:00", "10:00");

    let ids = env.entry_ids();
    assert_eq!(ids.len(), 2);
    let victim = &ids[0];

    env.wh()
        .args(["del", victim, "--force"])
        .assert()
        .success()
        .stdout(contains("has been deleted"));

    env.wh()
        .args(["del", victim, "--force"])
        .assert()
        .success()
        .stdout(contains("nothing to delete"));

    assert_eq!(env.entry_ids(), vec![ids[1].clone()]);
}

#[test]
fn test_del_without_confirmation_is_cancelled() {
    let env = Env::with_user("del_cancel", "alice");
    env.add("2024-03-01", "09:00", "10:00");
    let ids = env.entry_ids();

    env.wh()
        .args(["del", &ids[0]])
        .write_stdin("n\n")
        .assert()
        .success()
        .stdout(contains("Operation cancelled"));

    assert_eq!(env.entry_ids(), ids);
}

#[test]
fn test_settings_recompute_target() {
    let env = Env::with_user("settings", "alice");

    env.wh()
        .arg("settings")
        .assert()
        .success()
        .stdout(contains("65.0 hours (6.5 hours × 10 days)"));

    env.wh()
        .args(["settings", "--daily-hours", "7"])
        .assert()
        .success()
        .stdout(contains("70.0 hours"));

    env.wh()
        .args(["settings", "--target", "50"])
        .assert()
        .success()
        .stdout(contains("50.0 hours"));

    // Persisted across invocations.
    env.wh()
        .arg("settings")
        .assert()
        .success()
        .stdout(contains("50.0 hours"));
}

#[test]
fn test_settings_reject_negative_rate() {
    let env = Env::with_user("settings_negative", "alice");

    env.wh()
        .args(["settings", "--rate=-5"])
        .assert()
        .failure()
        .stderr(contains("non-negative"));
}

#[test]
fn test_cycle_first_half() {
    let env = Env::with_user("cycle_first", "alice");
    env.wh().args(["settings", "--rate", "20"]).assert().success();
    env.add("2024-02-29", "09:00", "17:00");
    env.add("2024-03-01", "09:00", "17:00");
    env.add("2024-03-15", "09:00", "13:00");
    env.add("2024-03-16", "09:00", "17:00");

    env.wh()
        .args(["cycle", "--today", "2024-03-10"])
        .assert()
        .success()
        .stdout(contains("First half of March 2024"))
        .stdout(contains("2024-03-01 → 2024-03-15"))
        .stdout(contains("Hours worked    : 12.0 of 65 target hours"))
        .stdout(contains("Hours remaining : 53.0"))
        .stdout(contains("Earnings        : $240.00"));
}

#[test]
fn test_cycle_second_half_caps_remaining() {
    let env = Env::with_user("cycle_second", "alice");
    env.wh().args(["settings", "--target", "10"]).assert().success();
    env.add("2024-03-16", "08:00", "18:00");
    env.add("2024-03-31", "08:00", "12:00");
    env.add("2024-04-01", "08:00", "12:00");

    env.wh()
        .args(["cycle", "--today", "2024-03-20"])
        .assert()
        .success()
        .stdout(contains("Second half of March 2024"))
        .stdout(contains("2024-03-16 → 2024-03-31"))
        .stdout(contains("Hours worked    : 14.0"))
        .stdout(contains("Hours remaining : 0.0"));
}

#[test]
fn test_chart_groups_half_months() {
    let env = Env::with_user("chart", "alice");
    env.wh().args(["settings", "--rate", "10"]).assert().success();
    env.add("2024-01-05", "09:00", "12:00");
    env.add("2024-01-05", "13:00", "15:00");
    env.add("2024-01-20", "09:00", "10:00");

    env.wh()
        .arg("chart")
        .assert()
        .success()
        .stdout(contains("1st half of Jan"))
        .stdout(contains("5.0 h"))
        .stdout(contains("2nd half of Jan"))
        .stdout(contains("$50.00"))
        .stdout(contains("Feb").not());
}

#[test]
fn test_users_do_not_see_each_other() {
    let env = Env::with_user("two_users", "alice");
    env.add("2024-03-04", "09:00", "17:30");

    env.wh()
        .args(["register", "bob", "--password", "pw"])
        .assert()
        .success();

    env.wh()
        .arg("list")
        .assert()
        .success()
        .stdout(contains("No entries yet"));
}

#[test]
fn test_config_is_read_from_test_home_only() {
    let env = Env::with_user("home_config", "alice");
    env.wh().args(["settings", "--rate", "10"]).assert().success();
    env.add("2024-03-04", "09:00", "11:00");

    env.wh()
        .args(["cycle", "--today", "2024-03-10"])
        .assert()
        .success()
        .stdout(contains("Earnings        : $20.00"));

    env.write_config(&format!("database: {:?}\ncurrency: \"€\"\n", env.db));
    env.wh()
        .args(["cycle", "--today", "2024-03-10"])
        .assert()
        .success()
        .stdout(contains("Earnings        : €20.00"));
}

#[test]
fn test_unusable_database_warns_and_keeps_running() {
    let env = Env::new("db_is_dir");
    fs::remove_dir_all(&env.db).ok();
    fs::create_dir_all(&env.db).unwrap();

    env.wh()
        .args(["register", "alice", "--password", "secret"])
        .assert()
        .success()
        .stdout(contains("changes will not be saved"))
        .stdout(contains("alice"));

    env.wh()
        .arg("whoami")
        .assert()
        .success()
        .stdout(contains("Not logged in"));
}
