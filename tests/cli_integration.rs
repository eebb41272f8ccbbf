//! Integration tests for the passkey CLI.
//!
//! These tests exercise the binary end-to-end using `assert_cmd`.  The
//! passkey is supplied through `PASSKEY_CLI_PASSKEY` so no interactive
//! prompt is needed, and the config directory is pointed at a temp dir
//! so the user's real configuration is never read.

use assert_cmd::Command;
use assert_fs::prelude::*;
use assert_fs::TempDir;
use predicates::prelude::*;

const PASSKEY: &str = "correct horse battery";

/// Helper: a Command for the passkey binary, isolated in `tmp`.
fn passkey(tmp: &TempDir) -> Command {
    #[allow(deprecated)]
    let mut cmd = Command::cargo_bin("passkey").expect("binary should exist");
    cmd.env("XDG_CONFIG_HOME", tmp.path().join("config"))
        .env("HOME", tmp.path())
        .env_remove("PASSKEY_VAULT")
        .env("PASSKEY_CLI_PASSKEY", PASSKEY)
        .current_dir(tmp.path());
    cmd
}

/// Helper: path of the vault file used by the tests.
fn vault_arg(tmp: &TempDir) -> String {
    tmp.path().join("vault.json").to_string_lossy().to_string()
}

/// Helper: create a vault inside `tmp`.
fn init(tmp: &TempDir) {
    passkey(tmp)
        .args(["--vault", &vault_arg(tmp), "init"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Vault created"));
}

#[test]
fn help_flag_shows_usage() {
    let tmp = TempDir::new().unwrap();
    passkey(&tmp)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("passkey-protected vault"))
        .stdout(predicate::str::contains("init"))
        .stdout(predicate::str::contains("add"))
        .stdout(predicate::str::contains("get"))
        .stdout(predicate::str::contains("list"))
        .stdout(predicate::str::contains("update"))
        .stdout(predicate::str::contains("delete"))
        .stdout(predicate::str::contains("copy"));
}

#[test]
fn version_flag_shows_version() {
    let tmp = TempDir::new().unwrap();
    passkey(&tmp)
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("passkey"));
}

#[test]
fn no_args_shows_help() {
    let tmp = TempDir::new().unwrap();
    passkey(&tmp)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Usage"));
}

#[test]
fn init_creates_vault_file() {
    let tmp = TempDir::new().unwrap();
    init(&tmp);
    tmp.child("vault.json").assert(predicate::path::exists());
    tmp.child("vault.json")
        .assert(predicate::str::contains("\"passkey_hash\""));
}

#[test]
fn init_refuses_to_overwrite() {
    let tmp = TempDir::new().unwrap();
    init(&tmp);
    passkey(&tmp)
        .args(["--vault", &vault_arg(&tmp), "init"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("already exists"));
}

#[test]
fn init_enforces_minimum_passkey_length() {
    let tmp = TempDir::new().unwrap();
    passkey(&tmp)
        .env("PASSKEY_CLI_PASSKEY", "short")
        .args(["--vault", &vault_arg(&tmp), "init"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("at least 8"));
}

#[cfg(target_os = "linux")]
#[test]
fn init_uses_default_location_under_config_dir() {
    let tmp = TempDir::new().unwrap();
    passkey(&tmp).arg("init").assert().success();
    tmp.child("config/passkey-cli/vault.json")
        .assert(predicate::path::exists());
}

#[test]
fn add_then_get_prints_password() {
    let tmp = TempDir::new().unwrap();
    init(&tmp);

    passkey(&tmp)
        .args(["--vault", &vault_arg(&tmp), "add", "github"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Service 'github' added (1 total)"));

    passkey(&tmp)
        .args(["--vault", &vault_arg(&tmp), "get", "github"])
        .assert()
        .success()
        .stdout(predicate::str::is_match(r"^[A-Za-z0-9!@#$%^&*]{18}\n$").unwrap());
}

#[test]
fn add_duplicate_fails() {
    let tmp = TempDir::new().unwrap();
    init(&tmp);
    let vault = vault_arg(&tmp);

    passkey(&tmp).args(["--vault", &vault, "add", "github"]).assert().success();
    passkey(&tmp)
        .args(["--vault", &vault, "add", "github"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("already exists"));
}

#[test]
fn wrong_passkey_is_rejected() {
    let tmp = TempDir::new().unwrap();
    init(&tmp);

    passkey(&tmp)
        .env("PASSKEY_CLI_PASSKEY", "not the passkey")
        .args(["--vault", &vault_arg(&tmp), "list"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Authentication failed"));
}

#[test]
fn passkey_flag_overrides_env_and_warns() {
    let tmp = TempDir::new().unwrap();
    init(&tmp);

    passkey(&tmp)
        .env("PASSKEY_CLI_PASSKEY", "not the passkey")
        .args(["--vault", &vault_arg(&tmp), "-p", PASSKEY, "list"])
        .assert()
        .success()
        .stderr(predicate::str::contains("shell history"));
}

#[test]
fn list_shows_names_but_not_passwords() {
    let tmp = TempDir::new().unwrap();
    init(&tmp);
    let vault = vault_arg(&tmp);

    passkey(&tmp).args(["--vault", &vault, "add", "github"]).assert().success();
    let password = String::from_utf8(
        passkey(&tmp)
            .args(["--vault", &vault, "get", "github"])
            .output()
            .unwrap()
            .stdout,
    )
    .unwrap();

    passkey(&tmp)
        .args(["--vault", &vault, "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("github"))
        .stdout(predicate::str::contains(password.trim()).not());
}

#[test]
fn list_empty_vault_succeeds() {
    let tmp = TempDir::new().unwrap();
    init(&tmp);

    passkey(&tmp)
        .args(["--vault", &vault_arg(&tmp), "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No services"));
}

#[test]
fn update_renames_service() {
    let tmp = TempDir::new().unwrap();
    init(&tmp);
    let vault = vault_arg(&tmp);

    passkey(&tmp).args(["--vault", &vault, "add", "github"]).assert().success();
    passkey(&tmp)
        .args(["--vault", &vault, "update", "github", "git-work", "--regen"])
        .assert()
        .success();

    passkey(&tmp)
        .args(["--vault", &vault, "get", "git-work"])
        .assert()
        .success();
    passkey(&tmp)
        .args(["--vault", &vault, "get", "github"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not found"));
}

#[test]
fn delete_with_force_removes_service() {
    let tmp = TempDir::new().unwrap();
    init(&tmp);
    let vault = vault_arg(&tmp);

    passkey(&tmp).args(["--vault", &vault, "add", "github"]).assert().success();
    passkey(&tmp)
        .args(["--vault", &vault, "delete", "github", "--force"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Deleted service 'github'"));

    let contents = std::fs::read_to_string(tmp.path().join("vault.json")).unwrap();
    assert!(!contents.contains("github"));
}

#[test]
fn delete_missing_service_fails() {
    let tmp = TempDir::new().unwrap();
    init(&tmp);

    passkey(&tmp)
        .args(["--vault", &vault_arg(&tmp), "delete", "nope", "--force"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not found"));
}

#[test]
fn commands_on_missing_vault_point_to_init() {
    let tmp = TempDir::new().unwrap();

    passkey(&tmp)
        .args(["--vault", &vault_arg(&tmp), "get", "github"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("passkey init"));
}

#[test]
fn add_rejects_empty_name() {
    let tmp = TempDir::new().unwrap();
    init(&tmp);

    passkey(&tmp)
        .args(["--vault", &vault_arg(&tmp), "add", ""])
        .assert()
        .failure()
        .stderr(predicate::str::contains("cannot be empty"));
}

#[test]
fn vault_env_var_selects_vault() {
    let tmp = TempDir::new().unwrap();
    let path = vault_arg(&tmp);

    passkey(&tmp).env("PASSKEY_VAULT", &path).arg("init").assert().success();
    tmp.child("vault.json").assert(predicate::path::exists());
}

#[cfg(target_os = "linux")]
#[test]
fn config_file_sets_vault_path() {
    let tmp = TempDir::new().unwrap();
    let custom = tmp.path().join("custom").join("secrets.json");
    tmp.child("config/passkey-cli").create_dir_all().unwrap();
    tmp.child("config/passkey-cli/config.toml")
        .write_str(&format!(
            "vault_path = {:?}\nmin_passkey_length = 4\n",
            custom.to_string_lossy()
        ))
        .unwrap();

    passkey(&tmp).arg("init").assert().success();
    tmp.child("custom/secrets.json").assert(predicate::path::exists());
}

#[test]
fn completions_bash_prints_script() {
    let tmp = TempDir::new().unwrap();
    passkey(&tmp)
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("passkey"));
}

// ---------------------------------------------------------------------------
// Access history
// ---------------------------------------------------------------------------

#[test]
fn history_file_sits_beside_the_vault() {
    let tmp = TempDir::new().unwrap();
    init(&tmp);
    tmp.child("vault.history.db").assert(predicate::path::exists());
}

#[test]
fn failed_unlock_is_reported_once_on_next_open() {
    let tmp = TempDir::new().unwrap();
    init(&tmp);
    passkey(&tmp)
        .args(["--vault", &vault_arg(&tmp), "add", "github"])
        .assert()
        .success();

    passkey(&tmp)
        .env("PASSKEY_CLI_PASSKEY", "not the passkey")
        .args(["--vault", &vault_arg(&tmp), "get", "github"])
        .assert()
        .failure();

    // The warning goes to stderr; stdout stays just the password.
    passkey(&tmp)
        .args(["--vault", &vault_arg(&tmp), "get", "github"])
        .assert()
        .success()
        .stdout(predicate::str::is_match(r"^[A-Za-z0-9!@#$%^&*]{18}\n$").unwrap())
        .stderr(predicate::str::contains("1 failed unlock attempt(s)"));

    passkey(&tmp)
        .args(["--vault", &vault_arg(&tmp), "get", "github"])
        .assert()
        .success()
        .stderr(predicate::str::contains("failed unlock").not());
}

#[test]
fn audit_failed_shows_only_unlock_failures() {
    let tmp = TempDir::new().unwrap();
    init(&tmp);
    passkey(&tmp)
        .args(["--vault", &vault_arg(&tmp), "add", "github"])
        .assert()
        .success();
    passkey(&tmp)
        .env("PASSKEY_CLI_PASSKEY", "not the passkey")
        .args(["--vault", &vault_arg(&tmp), "list"])
        .assert()
        .failure();

    passkey(&tmp)
        .args(["--vault", &vault_arg(&tmp), "audit", "--failed"])
        .assert()
        .success()
        .stdout(predicate::str::contains("unlock-failed"))
        .stdout(predicate::str::contains("1 failed unlock(s)"))
        .stdout(predicate::str::contains("added").not());
}

#[test]
fn audit_lists_service_events_newest_first() {
    let tmp = TempDir::new().unwrap();
    init(&tmp);
    passkey(&tmp)
        .args(["--vault", &vault_arg(&tmp), "add", "github"])
        .assert()
        .success();
    passkey(&tmp)
        .args(["--vault", &vault_arg(&tmp), "update", "github", "git-work"])
        .assert()
        .success();

    let output = passkey(&tmp)
        .args(["--vault", &vault_arg(&tmp), "audit"])
        .output()
        .unwrap();
    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();

    let updated = stdout.find("updated").expect("update event listed");
    let added = stdout.find("added").expect("add event listed");
    let created = stdout.find("created").expect("init event listed");
    assert!(updated < added && added < created, "{stdout}");
    assert!(stdout.contains("renamed from 'github'"));
}

#[test]
fn audit_requires_the_passkey() {
    let tmp = TempDir::new().unwrap();
    init(&tmp);
    passkey(&tmp)
        .env("PASSKEY_CLI_PASSKEY", "not the passkey")
        .args(["--vault", &vault_arg(&tmp), "audit"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Authentication failed"));
}

#[test]
fn audit_rejects_unreadable_since() {
    let tmp = TempDir::new().unwrap();
    init(&tmp);
    passkey(&tmp)
        .args(["--vault", &vault_arg(&tmp), "audit", "--since", "yesterday"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("cannot read --since"));
}

#[test]
fn disabled_history_writes_no_database() {
    let tmp = TempDir::new().unwrap();
    tmp.child("config/passkey-cli/config.toml")
        .write_str("audit_log = false\n")
        .unwrap();

    init(&tmp);
    passkey(&tmp)
        .env("PASSKEY_CLI_PASSKEY", "not the passkey")
        .args(["--vault", &vault_arg(&tmp), "list"])
        .assert()
        .failure();

    tmp.child("vault.history.db")
        .assert(predicate::path::missing());
}
