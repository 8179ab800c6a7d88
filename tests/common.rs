#![allow(dead_code)]
use assert_cmd::{Command, cargo_bin_cmd};
use std::env;
use std::fs;
use std::path::PathBuf;

/// A test database plus a session id and home directory of its own, so
/// parallel tests never share session markers and never read the user's
/// real config file.
pub struct Env {
    pub db: String,
    pub session: String,
    pub home: PathBuf,
}

impl Env {
    pub fn new(name: &str) -> Self {
        let mut path: PathBuf = env::temp_dir();
        path.push(format!("{}_workhours.sqlite", name));
        let db = path.to_string_lossy().to_string();
        fs::remove_file(&db).ok();

        let home = env::temp_dir().join(format!("{}_workhours_home", name));
        fs::remove_dir_all(&home).ok();
        fs::create_dir_all(&home).expect("create test home");

        Self {
            db,
            session: format!("test-{}", name),
            home,
        }
    }

    /// Command bound to this DB and session. Extra args follow `--db`.
    pub fn wh(&self) -> Command {
        self.wh_in_session(&self.session)
    }

    /// Same DB, different terminal session.
    pub fn wh_in_session(&self, session: &str) -> Command {
        let mut cmd = cargo_bin_cmd!("workhours");
        cmd.env("WORKHOURS_SESSION", session)
            .env("NO_COLOR", "1")
            .env("HOME", &self.home)
            .env("APPDATA", &self.home)
            .env("USERPROFILE", &self.home)
            .env_remove("WORKHOURS_LOG")
            .args(["--db", &self.db]);
        cmd
    }

    /// Write a config file into this test's home directory.
    pub fn write_config(&self, yaml: &str) {
        let dir = if cfg!(target_os = "windows") {
            self.home.join("workhours")
        } else {
            self.home.join(".workhours")
        };
        fs::create_dir_all(&dir).expect("create config dir");
        fs::write(dir.join("workhours.conf"), yaml).expect("write config");
    }

    pub fn init(&self) {
        self.wh().args(["--test", "init"]).assert().success();
    }

    /// Init plus a registered, logged-in user.
    pub fn with_user(name: &str, user: &str) -> Self {
        let env = Self::new(name);
        env.init();
        env.wh()
            .args(["register", user, "--password", "secret"])
            .assert()
            .success();
        env
    }

    pub fn add(&self, date: &str, clock_in: &str, clock_out: &str) {
        self.wh()
            .args(["add", date, "--in", clock_in, "--out", clock_out])
            .assert()
            .success();
    }

    /// Entry ids printed by `list`, newest date first.
    pub fn entry_ids(&self) -> Vec<String> {
        let out = self.wh().arg("list").output().expect("run list");
        assert!(out.status.success());
        String::from_utf8_lossy(&out.stdout)
            .lines()
            .skip(1)
            .filter_map(|l| l.split_whitespace().next().map(str::to_string))
            .filter(|id| id.chars().all(|c| c.is_ascii_digit()))
            .collect()
    }
}
