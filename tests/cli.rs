use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn scribble_cmd(config_home: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("scribble").expect("binary exists");
    cmd.env("XDG_CONFIG_HOME", config_home.path());
    cmd
}

const SCRIPT: &str = r#"{
    "canvas": {"width": 120.0, "height": 80.0},
    "steps": [
        {"action": "style", "stroke_color": "red", "stroke_width": 4.0},
        {"action": "stroke", "points": [{"x": 10, "y": 10}, {"x": 60, "y": 40}, {"x": 110, "y": 70}]},
        {"action": "tool", "tool": "rect"},
        {"action": "stroke", "points": [{"x": 20, "y": 20}, {"x": 50, "y": 50}]},
        {"action": "undo"},
        {"action": "redo"},
        {"action": "redo"}
    ]
}"#;

#[test]
fn help_prints_usage() {
    let temp = TempDir::new().unwrap();
    scribble_cmd(&temp)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Touch-driven vector drawing engine"));
}

#[test]
fn subcommand_is_required() {
    let temp = TempDir::new().unwrap();
    scribble_cmd(&temp).assert().failure();
}

#[test]
fn replay_saves_renders_and_inspects() {
    let temp = TempDir::new().unwrap();
    let script = temp.path().join("script.json");
    let doc = temp.path().join("doc.json");
    let png = temp.path().join("out.png");
    std::fs::write(&script, SCRIPT).unwrap();

    scribble_cmd(&temp)
        .arg("replay")
        .arg(&script)
        .arg("--save")
        .arg(&doc)
        .arg("--out")
        .arg(&png)
        .assert()
        .success()
        .stdout(predicate::str::contains("Replayed 7 steps"))
        .stdout(predicate::str::contains("1 without effect"))
        .stdout(predicate::str::contains("drawing has 2 shapes"));
    assert!(doc.exists());
    assert!(png.exists());

    scribble_cmd(&temp)
        .arg("info")
        .arg(&doc)
        .assert()
        .success()
        .stdout(predicate::str::contains("Canvas: 120x80"))
        .stdout(predicate::str::contains("Pen: 1"))
        .stdout(predicate::str::contains("Rect: 1"));

    let rendered = temp.path().join("rendered.png");
    scribble_cmd(&temp)
        .args(["render"])
        .arg(&doc)
        .arg("--out")
        .arg(&rendered)
        .assert()
        .success()
        .stdout(predicate::str::contains("Rendered 2 shapes"));
    assert!(rendered.exists());
}

#[test]
fn render_reports_decode_failure() {
    let temp = TempDir::new().unwrap();
    let doc = temp.path().join("bad.json");
    std::fs::write(
        &doc,
        r#"{"version":1,"last_modified":"2024-01-01T00:00:00Z","size":{"width":10.0,"height":10.0},"shapes":[{"type":"Squiggle"}]}"#,
    )
    .unwrap();

    scribble_cmd(&temp)
        .arg("render")
        .arg(&doc)
        .arg("--out")
        .arg(temp.path().join("x.png"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown shape type `Squiggle`"));
}

#[test]
fn explicit_config_sets_canvas() {
    let temp = TempDir::new().unwrap();
    let config = temp.path().join("config.toml");
    let script = temp.path().join("script.json");
    let doc = temp.path().join("doc.json");
    std::fs::write(&config, "[canvas]\nwidth = 64\nheight = 32\n").unwrap();
    std::fs::write(&script, r#"{"steps": []}"#).unwrap();

    scribble_cmd(&temp)
        .arg("--config")
        .arg(&config)
        .arg("replay")
        .arg(&script)
        .arg("--save")
        .arg(&doc)
        .assert()
        .success();

    scribble_cmd(&temp)
        .arg("info")
        .arg(&doc)
        .assert()
        .success()
        .stdout(predicate::str::contains("Canvas: 64x32"));
}

#[test]
fn malformed_config_fails() {
    let temp = TempDir::new().unwrap();
    let config = temp.path().join("config.toml");
    std::fs::write(&config, "[canvas\n").unwrap();

    scribble_cmd(&temp)
        .arg("--config")
        .arg(&config)
        .arg("info")
        .arg(temp.path().join("missing.json"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to parse config"));
}
