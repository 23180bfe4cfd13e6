#![allow(deprecated)] // TODO: cargo_bin → cargo_bin_cmd! へ移行

use assert_cmd::Command;
use predicates::prelude::*;

fn stackflow() -> Command {
    let mut cmd = Command::cargo_bin("stackflow").unwrap();
    cmd.env_remove("STACKFLOW_CONFIG_PATH")
        .env_remove("STACKFLOW_REGION")
        .env_remove("STACKFLOW_PROFILE");
    cmd
}

/// CLIヘルプが正しく表示されることを確認
#[test]
fn test_cli_help() {
    stackflow()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("change"))
        .stdout(predicate::str::contains("terminate"))
        .stdout(predicate::str::contains("--region"))
        .stdout(predicate::str::contains("--profile"));
}

/// バージョン表示が正しく動作することを確認
#[test]
fn test_cli_version() {
    stackflow()
        .arg("version")
        .assert()
        .success()
        .stdout(predicate::str::contains("stackflow"))
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn test_change_help_lists_requests() {
    stackflow()
        .args(["change", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("<REQUEST>"))
        .stdout(predicate::str::contains("create"))
        .stdout(predicate::str::contains("execute"))
        .stdout(predicate::str::contains("list"))
        .stdout(predicate::str::contains("rm"))
        .stdout(predicate::str::contains("desc"));
}

/// create はテンプレート無しでは AWS に接続せず失敗する
#[test]
fn test_create_requires_template() {
    let dir = tempfile::tempdir().unwrap();
    stackflow()
        .current_dir(dir.path())
        .args(["change", "create", "web", "cs1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--template"));
}

/// 未知の操作名は ChangeRequest の解析で弾かれる
#[test]
fn test_unknown_change_request() {
    stackflow()
        .args(["change", "apply", "web", "cs1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown change-set request: apply"));
}

#[test]
fn test_terminate_requires_stack() {
    stackflow()
        .arg("terminate")
        .assert()
        .failure()
        .stderr(predicate::str::contains("<STACK>"));
}

/// テンプレートが無ければ AWS に接続する前に失敗する
#[test]
fn test_create_with_missing_template() {
    let dir = tempfile::tempdir().unwrap();
    stackflow()
        .current_dir(dir.path())
        .args([
            "change",
            "create",
            "web",
            "cs1",
            "--template",
            "missing.template",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("missing.template"));
}

#[test]
fn test_invalid_config_is_reported() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("stackflow.yaml"), "poll_interval_secs: [1]").unwrap();

    stackflow()
        .current_dir(dir.path())
        .args(["change", "list", "web"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("stackflow.yaml"));
}
