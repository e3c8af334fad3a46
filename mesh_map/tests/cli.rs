use assert_cmd::Command;
use predicates::prelude::*;
use std::io::Write;
use tempfile::NamedTempFile;

const NETWORK: &str = r#"{
    "nodes": [
        {"id": "227", "coordinates": [-73.98, 40.71], "type": "hub", "status": "Installed", "connectedNodes": ["312"]},
        {"id": "312", "coordinates": [-73.96, 40.73], "type": "node", "status": "Installed", "connectedNodes": ["227"]}
    ],
    "links": [{"from": "227", "to": "312", "status": "active"}]
}"#;

fn network_file() -> NamedTempFile {
    let mut f = NamedTempFile::new().unwrap();
    write!(f, "{NETWORK}").unwrap();
    f
}

#[test]
fn reports_one_line_per_event() {
    let net = network_file();
    let mut cmd = Command::cargo_bin("mesh_map").unwrap();
    cmd.arg("--network")
        .arg(net.path())
        .write_stdin(r#"[{"event": "click_node", "id": "227"}, {"event": "key_down", "code": 27}]"#);
    let output = cmd.assert().success().get_output().stdout.clone();
    let text = String::from_utf8(output).unwrap();
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines.len(), 3);
    assert!(lines[1].contains(r#""route":"/nodes/227""#));
    assert!(lines[1].contains(r#""command":"pan_to""#));
    assert!(lines[2].contains(r#""transition":"reset""#));
}

#[test]
fn deep_link_fits_bounds_on_mount() {
    let net = network_file();
    let mut cmd = Command::cargo_bin("mesh_map").unwrap();
    cmd.arg("--network")
        .arg(net.path())
        .arg("--route")
        .arg("/nodes/227-312")
        .write_stdin("");
    cmd.assert()
        .success()
        .stdout(predicate::str::contains(r#""command":"fit_bounds""#))
        .stdout(predicate::str::contains(
            r#""initial_view":{"center":[-73.9595798,40.7031809],"zoom":13}"#,
        ))
        .stdout(predicate::str::contains("227, 312 - Map - NYC Mesh"));
}

#[test]
fn config_file_overrides_title() {
    let net = network_file();
    let mut cfg = tempfile::Builder::new().suffix(".yaml").tempfile().unwrap();
    writeln!(cfg, "title_suffix: Test Map").unwrap();
    let mut cmd = Command::cargo_bin("mesh_map").unwrap();
    cmd.arg("--network")
        .arg(net.path())
        .arg("--config-file")
        .arg(cfg.path())
        .arg("--route")
        .arg("/nodes/312")
        .write_stdin("[]");
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("312 - Test Map"));
}

#[test]
fn missing_network_fails() {
    let mut cmd = Command::cargo_bin("mesh_map").unwrap();
    cmd.arg("--network").arg("/nonexistent/network.json").write_stdin("[]");
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("failed to load network"));
}
