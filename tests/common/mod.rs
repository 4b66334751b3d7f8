#![allow(dead_code)]

use std::fs;
use std::path::PathBuf;
use std::process::{Command, Output};

use serde_json::Value;
use tempfile::TempDir;

/// Runs helpdesk commands against an isolated data directory
pub struct HelpdeskTest {
    pub temp_dir: TempDir,
    binary_path: String,
}

impl HelpdeskTest {
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let helpdesk = HelpdeskTest {
            temp_dir,
            binary_path: env!("CARGO_BIN_EXE_helpdesk").to_string(),
        };
        // Keep assistant commands fast.
        helpdesk.write_config("assistant_delay_ms: 0\n");
        helpdesk
    }

    pub fn root(&self) -> PathBuf {
        self.temp_dir.path().join(".helpdesk")
    }

    pub fn run(&self, args: &[&str]) -> Output {
        Command::new(&self.binary_path)
            .args(args)
            .current_dir(self.temp_dir.path())
            .env_remove("HELPDESK_ROOT")
            .env_remove("HELPDESK_LOG")
            .output()
            .expect("Failed to execute helpdesk command")
    }

    pub fn run_success(&self, args: &[&str]) -> String {
        let output = self.run(args);
        if !output.status.success() {
            panic!(
                "Command {:?} failed with status {:?}\nstdout: {}\nstderr: {}",
                args,
                output.status,
                String::from_utf8_lossy(&output.stdout),
                String::from_utf8_lossy(&output.stderr)
            );
        }
        String::from_utf8_lossy(&output.stdout).to_string()
    }

    pub fn run_failure(&self, args: &[&str]) -> String {
        let output = self.run(args);
        assert!(
            !output.status.success(),
            "Expected command {:?} to fail, but it succeeded",
            args
        );
        String::from_utf8_lossy(&output.stderr).to_string()
    }

    /// Run with `--json` appended and parse stdout.
    pub fn run_json(&self, args: &[&str]) -> Value {
        let mut args = args.to_vec();
        args.push("--json");
        let stdout = self.run_success(&args);
        serde_json::from_str(&stdout)
            .unwrap_or_else(|e| panic!("invalid JSON from {args:?}: {e}\n{stdout}"))
    }

    pub fn login(&self, user: &str) {
        self.run_success(&["login", user]);
    }

    /// Sign in as `user` and open a ticket; returns its id.
    pub fn create_ticket_as(&self, user: &str, title: &str, priority: &str) -> String {
        self.login(user);
        let json = self.run_json(&[
            "create",
            title,
            "-d",
            &format!("{title} details"),
            "-p",
            priority,
        ]);
        json["id"].as_str().expect("ticket id").to_string()
    }

    /// First user becomes admin through the bootstrap grant, then `agent`
    /// becomes an agent.
    pub fn setup_staff(&self) {
        self.login("admin");
        self.run_success(&["role", "grant", "admin", "admin"]);
        self.run_success(&["role", "grant", "agent", "agent"]);
    }

    pub fn read_ticket(&self, id: &str) -> String {
        let path = self.root().join("tickets").join(format!("{}.md", id));
        fs::read_to_string(path).expect("Failed to read ticket file")
    }

    pub fn write_ticket(&self, id: &str, content: &str) {
        let dir = self.root().join("tickets");
        fs::create_dir_all(&dir).expect("Failed to create tickets directory");
        fs::write(dir.join(format!("{}.md", id)), content).expect("Failed to write ticket file");
    }

    pub fn write_config(&self, content: &str) {
        let dir = self.root();
        fs::create_dir_all(&dir).expect("Failed to create .helpdesk directory");
        fs::write(dir.join("config.yaml"), content).expect("Failed to write config file");
    }
}
