use std::process::Command;

use serde_json::Value;
use tempfile::tempdir;

fn gosm(dir: &std::path::Path) -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_gosm"));
    cmd.current_dir(dir)
        .env_remove("RUST_LOG")
        .env_remove("GOSM_STRICT_INJECTION")
        .env("XDG_CONFIG_HOME", dir.join("xdg"));
    cmd
}

#[test]
fn test_render_prints_workflow_to_stdout() {
    let dir = tempdir().unwrap();

    let output = gosm(dir.path())
        .args(["render", "--secret", "TOKEN_A"])
        .output()
        .unwrap();

    assert!(output.status.success(), "{:?}", output);
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.starts_with("---\nname: Dump Secrets\non:\n"), "{stdout}");
    assert!(stdout
        .lines()
        .any(|line| line.trim_start() == "scdmp_TOKEN_A: \"${{secrets.TOKEN_A}}\""));
    assert!(!stdout.lines().any(|line| line.starts_with("PLACEHOLDER")));
}

#[test]
fn test_render_rejects_reserved_secret_names() {
    let dir = tempdir().unwrap();

    let output = gosm(dir.path())
        .args(["render", "--secret", "GITHUB_TOKEN"])
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("[ERROR]"), "{stderr}");
    assert!(stderr.contains("GITHUB_TOKEN"), "{stderr}");
    assert!(output.stdout.is_empty());
}

#[test]
fn test_render_json_format_prints_document_tree() {
    let dir = tempdir().unwrap();

    let output = gosm(dir.path())
        .args(["render", "-s", "FOO", "--format", "json"])
        .output()
        .unwrap();

    assert!(output.status.success(), "{:?}", output);
    let doc: Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(doc["on"], serde_json::json!({"workflow_dispatch": null}));
    assert_eq!(
        doc["jobs"]["run"]["steps"][2]["env"],
        serde_json::json!({"scdmp_FOO": "${{secrets.FOO}}"})
    );
}

#[test]
fn test_render_json_flag_emits_ndjson_events() {
    let dir = tempdir().unwrap();

    let output = gosm(dir.path())
        .args(["render", "--json", "-s", "FOO", "-s", "BAR"])
        .output()
        .unwrap();

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(lines.len(), 2, "{stdout}");

    let first: Value = serde_json::from_str(lines[0]).unwrap();
    assert_eq!(first["event"], "start");
    assert_eq!(first["command"], "render");

    let last: Value = serde_json::from_str(lines[1]).unwrap();
    assert_eq!(last["event"], "complete");
    assert_eq!(last["secrets"], serde_json::json!(["FOO", "BAR"]));
    assert_eq!(last["injected_steps"], 1);
    assert!(last["workflow"].as_str().unwrap().contains("scdmp_BAR"));
}

#[test]
fn test_render_uses_template_override_and_strict_config() {
    let dir = tempdir().unwrap();
    std::fs::write(dir.path().join("custom.yml"), "name: custom\non: push\n").unwrap();
    std::fs::write(
        dir.path().join("gosm.toml"),
        "[dump]\nstrict_injection = true\n",
    )
    .unwrap();

    let output = gosm(dir.path())
        .args(["render", "-s", "FOO", "--template", "custom.yml"])
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Generate Dump"), "{stderr}");
}

#[test]
fn test_unknown_config_key_is_a_warning() {
    let dir = tempdir().unwrap();
    std::fs::write(dir.path().join("gosm.toml"), "[dump]\nstrict_injektion = true\n").unwrap();

    let output = gosm(dir.path())
        .args(["render", "-s", "FOO"])
        .output()
        .unwrap();

    assert!(output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("unknown config key 'strict_injektion'"), "{stderr}");
    assert!(stderr.contains("did you mean 'strict_injection'?"), "{stderr}");
}
