#![allow(deprecated)] // Command::cargo_bin – macro replacement not yet stable

use std::fs;
use std::net::TcpListener;
use std::path::PathBuf;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

/// A scratch directory with an empty config file and a history path.
struct Sandbox {
    dir: TempDir,
}

impl Sandbox {
    fn new() -> Self {
        Self::with_config("")
    }

    fn with_config(config: &str) -> Self {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("tarot.toml"), config).unwrap();
        Self { dir }
    }

    fn history(&self) -> PathBuf {
        self.dir.path().join("readings.jsonl")
    }

    fn tarot(&self) -> Command {
        let mut cmd = Command::cargo_bin("tarot").unwrap();
        cmd.current_dir(self.dir.path())
            .env("TAROT_HISTORY", self.history())
            .env_remove("TAROT_PROVIDER")
            .env_remove("TAROT_DATA")
            .env_remove("TAROT_HISTORY_ENABLED")
            .env_remove("RUST_LOG")
            .env_remove("ANTHROPIC_API_KEY")
            .env_remove("OPENAI_API_KEY")
            .arg("--config")
            .arg(self.dir.path().join("tarot.toml"));
        cmd
    }
}

fn closed_port() -> u16 {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    listener.local_addr().unwrap().port()
}

// ---------------------------------------------------------------------------
// spreads / lookup / list
// ---------------------------------------------------------------------------

#[test]
fn spreads_lists_all_templates() {
    Sandbox::new()
        .tarot()
        .arg("spreads")
        .assert()
        .success()
        .stdout(predicate::str::contains("Single Card"))
        .stdout(predicate::str::contains("Three Card Spread"))
        .stdout(predicate::str::contains("Celtic Cross"))
        .stdout(predicate::str::contains("Challenge/Crossing"));
}

#[test]
fn lookup_single_card() {
    Sandbox::new()
        .tarot()
        .args(["lookup", "the magician"])
        .assert()
        .success()
        .stdout(predicate::str::contains("The Magician"))
        .stdout(predicate::str::contains("Upright:"))
        .stdout(predicate::str::contains("Reversed:"))
        .stdout(predicate::str::contains("Skill, diplomacy"));
}

#[test]
fn lookup_ambiguous_lists_candidates() {
    Sandbox::new()
        .tarot()
        .args(["lookup", "ace"])
        .assert()
        .success()
        .stdout(predicate::str::contains("matches 4 cards"))
        .stdout(predicate::str::contains("Ace of Wands"))
        .stdout(predicate::str::contains("Ace of Pentacles"));
}

#[test]
fn lookup_suit_alias() {
    Sandbox::new()
        .tarot()
        .args(["lookup", "queen of coins"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Queen of Pentacles"));
}

#[test]
fn lookup_not_found_suggests() {
    Sandbox::new()
        .tarot()
        .args(["lookup", "the magican"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("no card matches 'the magican'"))
        .stderr(predicate::str::contains("did you mean 'The Magician'"));
}

#[test]
fn list_major_arcana() {
    Sandbox::new()
        .tarot()
        .args(["list", "--arcana", "major"])
        .assert()
        .success()
        .stdout(predicate::str::contains("The World"))
        .stdout(predicate::str::contains("22 cards"));
}

#[test]
fn list_by_suit_alias() {
    Sandbox::new()
        .tarot()
        .args(["list", "--suit", "coins"])
        .assert()
        .success()
        .stdout(predicate::str::contains("King of Pentacles"))
        .stdout(predicate::str::contains("14 cards"));
}

#[test]
fn list_unknown_suit_fails() {
    Sandbox::new()
        .tarot()
        .args(["list", "--suit", "stars"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown suit 'stars'"));
}

// ---------------------------------------------------------------------------
// read
// ---------------------------------------------------------------------------

#[test]
fn read_json_is_reproducible_with_seed() {
    let sandbox = Sandbox::new();
    let run = || {
        let output = sandbox
            .tarot()
            .args(["read", "--spread", "celtic", "--seed", "42", "--no-ai", "--json"])
            .output()
            .unwrap();
        assert!(output.status.success());
        serde_json::from_slice::<serde_json::Value>(&output.stdout).unwrap()
    };

    let first = run();
    let second = run();
    assert_eq!(first["cards"], second["cards"]);
    assert_eq!(first["baseline"], second["baseline"]);
    assert_eq!(first["cards"].as_array().unwrap().len(), 10);
    assert_eq!(first["spread"], "celtic");
    assert!(first["ai_interpretation"].is_null());
    assert!(first["reason"].is_null());
}

#[test]
fn read_prints_baseline() {
    Sandbox::new()
        .tarot()
        .args(["read", "--seed", "1", "--no-ai", "-q", "What should I focus on?"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Three Card Spread"))
        .stdout(predicate::str::contains("What should I focus on?"))
        .stdout(predicate::str::contains("## Past:"))
        .stdout(predicate::str::contains("## Future:"));
}

#[test]
fn read_without_credential_falls_back() {
    Sandbox::new()
        .tarot()
        .args(["read", "--spread", "single", "--provider", "claude"])
        .assert()
        .success()
        .stdout(predicate::str::contains("## Present:"))
        .stderr(predicate::str::contains("AI interpretation unavailable"))
        .stderr(predicate::str::contains("no credential configured"));
}

#[test]
fn read_with_unreachable_provider_falls_back() {
    let config = format!(
        r#"
default_provider = "local"

[providers.local]
backend = "ollama"
model = "llama3"
base_url = "http://127.0.0.1:{}"
timeout_ms = 2000
"#,
        closed_port()
    );
    let sandbox = Sandbox::with_config(&config);

    let output = sandbox
        .tarot()
        .args(["read", "--spread", "single", "--json"])
        .output()
        .unwrap();
    assert!(output.status.success());
    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert!(value["ai_interpretation"].is_null());
    assert_eq!(value["reason"]["kind"], "transport");
    assert_eq!(value["reason"]["provider"], "local");
    assert!(
        value["baseline"]
            .as_str()
            .unwrap()
            .contains("## Present:")
    );
}

#[test]
fn read_unknown_spread_fails() {
    Sandbox::new()
        .tarot()
        .args(["read", "--spread", "horseshoe", "--no-ai"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown spread 'horseshoe'"));
}

#[test]
fn read_unknown_focus_fails() {
    Sandbox::new()
        .tarot()
        .args(["read", "--focus", "finance", "--no-ai"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown focus area 'finance'"));
}

#[test]
fn missing_config_file_fails() {
    let mut cmd = Command::cargo_bin("tarot").unwrap();
    cmd.args(["--config", "/nonexistent/tarot.toml", "spreads"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("config file not found"));
}

// ---------------------------------------------------------------------------
// history
// ---------------------------------------------------------------------------

#[test]
fn history_round_trip() {
    let sandbox = Sandbox::new();

    sandbox
        .tarot()
        .args(["history", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No saved readings."));

    for seed in ["1", "2"] {
        sandbox
            .tarot()
            .args(["read", "--seed", seed, "--no-ai", "-f", "career"])
            .assert()
            .success();
    }
    assert_eq!(fs::read_to_string(sandbox.history()).unwrap().lines().count(), 2);

    sandbox
        .tarot()
        .args(["history", "show", "-n", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Three Card Spread"))
        .stdout(predicate::str::contains("Career"));

    sandbox
        .tarot()
        .args(["history", "delete-last", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Deleted 1 reading."));
    assert_eq!(fs::read_to_string(sandbox.history()).unwrap().lines().count(), 1);

    sandbox
        .tarot()
        .args(["history", "clear"])
        .assert()
        .success()
        .stdout(predicate::str::contains("History cleared."));
    assert!(!sandbox.history().exists());
}

#[test]
fn history_can_be_disabled() {
    let sandbox = Sandbox::new();
    sandbox
        .tarot()
        .env("TAROT_HISTORY_ENABLED", "false")
        .args(["read", "--no-ai"])
        .assert()
        .success();
    assert!(!sandbox.history().exists());
}

#[test]
fn history_disabled_in_config_file() {
    let sandbox = Sandbox::with_config("[history]\nenabled = false\n");
    sandbox.tarot().args(["read", "--no-ai"]).assert().success();
    assert!(!sandbox.history().exists());
}
