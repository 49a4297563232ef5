use std::process::Command;

use serde_json::Value;

#[test]
fn test_classify_prints_type_per_token() {
    let output = Command::new(env!("CARGO_BIN_EXE_gosm"))
        .args(["classify", "on", "1:30", "3.2.0", "2001-12-14"])
        .env("XDG_CONFIG_HOME", env!("CARGO_TARGET_TMPDIR"))
        .output()
        .unwrap();

    assert!(output.status.success(), "{:?}", output);
    let stdout = String::from_utf8_lossy(&output.stdout);
    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(lines.len(), 4, "{stdout}");

    assert!(lines[0].starts_with("\"on\""));
    assert!(lines[0].contains("boolean") && lines[0].contains("true"));
    assert!(lines[1].contains("integer") && lines[1].contains("90"));
    assert!(lines[2].contains("string"));
    assert!(lines[3].contains("date") && lines[3].contains("2001-12-14"));
}

#[test]
fn test_classify_json_events() {
    let output = Command::new(env!("CARGO_BIN_EXE_gosm"))
        .args(["classify", "--json", "1:30.5", "", ":sym"])
        .env("XDG_CONFIG_HOME", env!("CARGO_TARGET_TMPDIR"))
        .output()
        .unwrap();

    assert!(output.status.success());
    let events: Vec<Value> = String::from_utf8_lossy(&output.stdout)
        .lines()
        .map(|line| serde_json::from_str(line).unwrap())
        .collect();
    assert_eq!(events.len(), 5);
    assert_eq!(events[0]["event"], "start");

    assert_eq!(events[1]["type"], "float");
    assert_eq!(events[1]["value"], "90.5");
    assert_eq!(events[1]["rule"], "sexagesimal-float");

    assert_eq!(events[2]["token"], "");
    assert_eq!(events[2]["type"], "null");

    assert_eq!(events[3]["type"], "atom");
    assert_eq!(events[4]["event"], "complete");
    assert_eq!(events[4]["count"], 3);
}
