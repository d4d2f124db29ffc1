// tests/cli_dispatch_test.rs

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use tempfile::tempdir;

// 辅助函数，避免重复
fn main_command() -> Command {
    let mut cmd = Command::cargo_bin(env!("CARGO_PKG_NAME")).unwrap();
    cmd.env("NO_COLOR", "1").arg("--no-banner");
    cmd
}

fn write_complete_config(dir: &Path) -> std::path::PathBuf {
    let links = dir.join("links.txt");
    fs::write(&links, "https://t.me/x/1\nhttps://t.me/x/2\n").unwrap();
    let config = serde_json::json!({
        "api_id": "123456",
        "api_hash": "0123456789abcdef0123456789abcdef",
        "bot_token": null,
        "links": links,
        "save_directory": dir,
        "max_download_task": 5,
        "download_type": ["video", "photo"],
        "is_shutdown": false,
        "enable_proxy": false,
        "proxy": {}
    });
    let path = dir.join("config.json");
    fs::write(&path, serde_json::to_string_pretty(&config).unwrap()).unwrap();
    path
}

// --- 测试基本 CLI 行为 ---

#[test]
fn test_help_flag() {
    let mut cmd = main_command();
    cmd.arg("--help");
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("显示此帮助信息并退出"));
}

#[test]
fn test_modes_conflict() {
    let mut cmd = main_command();
    cmd.arg("--show-config").arg("--bot-commands");
    cmd.assert().failure().stderr(predicate::str::contains("cannot be used with"));
}

#[test]
fn test_bot_commands() {
    let mut cmd = main_command();
    cmd.arg("--bot-commands");
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("/help - 展示可用命令。"))
        .stdout(predicate::str::contains("/listen_info"));
}

#[test]
fn test_config_help() {
    let mut cmd = main_command();
    cmd.arg("--config-help");
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("配置文件说明"))
        .stdout(predicate::str::contains("max_download_task"));
}

// --- 测试配置与统计 ---

#[test]
fn test_show_config() {
    let dir = tempdir().unwrap();
    let config = write_complete_config(dir.path());
    let mut cmd = main_command();
    cmd.arg("--show-config").arg("--config").arg(&config);
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("配置状态:完整"))
        .stdout(predicate::str::contains("当前没有使用代理!"))
        .stdout(predicate::str::contains("https://t.me/x/2"));
}

#[test]
fn test_show_config_rejects_broken_file() {
    let dir = tempdir().unwrap();
    let config = dir.path().join("config.json");
    fs::write(&config, "not json").unwrap();
    let mut cmd = main_command();
    cmd.arg("--show-config").arg("--config").arg(&config);
    cmd.assert()
        .code(1)
        .stderr(predicate::str::contains("无法解析配置文件"));
}

#[test]
fn test_stats_missing_file_fails() {
    let dir = tempdir().unwrap();
    let mut cmd = main_command();
    cmd.arg("--stats").arg(dir.path().join("missing.json"));
    cmd.assert()
        .code(1)
        .stderr(predicate::str::contains("程序执行出错"));
}

#[test]
fn test_stats_prints_link_table() {
    let dir = tempdir().unwrap();
    let stats = dir.path().join("stats.json");
    fs::write(
        &stats,
        r#"{
            "download_type": ["video", "photo"],
            "success_video": ["a.mp4", "b.mp4"],
            "failure_photo": ["c.jpg"],
            "links": [
                {"link": "https://t.me/x/1", "complete_num": 1, "member_num": 2,
                 "file_name": ["a.mp4"], "error_msg": {"all_member": "频道不存在"}}
            ]
        }"#,
    )
    .unwrap();
    let mut cmd = main_command();
    cmd.arg("--stats").arg(&stats);
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("https://t.me/x/1"))
        .stdout(predicate::str::contains("1/2[50.0%]"));
}

#[test]
fn test_configure_from_piped_input() {
    let dir = tempdir().unwrap();
    let links = dir.path().join("links.txt");
    fs::write(&links, "https://t.me/x/1\n").unwrap();
    let config = dir.path().join("config.json");
    let input = format!(
        "123456\n0123456789abcdef0123456789abcdef\nn\n{}\n{}\n3\n2\nn\nn\n",
        links.display(),
        dir.path().display()
    );

    let mut cmd = main_command();
    cmd.arg("--config")
        .arg(&config)
        .arg("--input-mode")
        .arg("readiness")
        .write_stdin(input);
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("已设置「api_id」为:「123456」"))
        .stdout(predicate::str::contains("配置完成"));

    let saved: serde_json::Value = serde_json::from_str(&fs::read_to_string(&config).unwrap()).unwrap();
    assert_eq!(saved["api_id"], "123456");
    assert_eq!(saved["max_download_task"], 3);
    assert_eq!(saved["download_type"], serde_json::json!(["photo"]));
    assert_eq!(saved["enable_proxy"], false);
}

#[test]
fn test_keep_existing_config() {
    let dir = tempdir().unwrap();
    let config = write_complete_config(dir.path());
    let before = fs::read_to_string(&config).unwrap();

    let mut cmd = main_command();
    cmd.arg("--config")
        .arg(&config)
        .arg("--input-mode")
        .arg("readiness")
        .arg("--re-config-timeout")
        .arg("2")
        .write_stdin("n\n");
    cmd.assert().success().stdout(predicate::str::contains("配置完成"));

    assert_eq!(fs::read_to_string(&config).unwrap(), before);
    assert!(!dir.path().join("backup").exists());
}

#[test]
fn test_end_of_input_is_interrupt() {
    let dir = tempdir().unwrap();
    let config = dir.path().join("config.json");
    let mut cmd = main_command();
    cmd.arg("--config")
        .arg(&config)
        .arg("--input-mode")
        .arg("readiness")
        .write_stdin("123456\n");
    cmd.assert()
        .code(130)
        .stdout(predicate::str::contains("用户强制中断程序"));
    assert!(!config.exists());
}
