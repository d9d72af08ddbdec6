// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell
//! Integration tests for the socialscope CLI commands

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

const GRAPH_JSON: &str = r#"{
    "nodes": [
        {
            "id": "p1",
            "attributes": {
                "nome": "Ana",
                "grau_ponderado": "4.0",
                "intermediacao": 0.5,
                "ranking_grau": 1,
                "ranking_intermediacao": 1,
                "grupo": "G1",
                "Projetos": "Horta;Biblioteca",
                "Tipos": "Rede A",
                "Codigos_Projetos": "H1;B1"
            }
        },
        {
            "id": "p2",
            "attributes": {
                "nome": "Bia",
                "grau_ponderado": 2,
                "intermediacao": "0.25",
                "ranking_grau": "2",
                "ranking_intermediacao": 2,
                "Projetos": "Horta",
                "Tipos": "Rede A;Rede B"
            }
        },
        {
            "id": "p3",
            "attributes": {
                "nome": "Caio",
                "grau_ponderado": 1,
                "intermediacao": 0,
                "ranking_grau": 3,
                "ranking_intermediacao": 3,
                "Projetos": "",
                "Tipos": "Rede B"
            }
        }
    ],
    "edges": [
        { "source": "p1", "target": "p2", "weight": 2.0 },
        { "source": "p2", "target": "p3" }
    ],
    "positions": {
        "p1": [0.0, 0.0],
        "p2": [1.0, 0.5],
        "p3": [2.0, -0.5]
    }
}"#;

/// Create a data directory holding the sample graph
fn setup_data_dir() -> TempDir {
    let data_dir = TempDir::new().unwrap();
    fs::write(data_dir.path().join("graph.json"), GRAPH_JSON).unwrap();
    data_dir
}

/// Build a socialscope command bound to a data directory
fn socialscope(data_dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("socialscope").unwrap();
    cmd.env("SOCIALSCOPE_DATA_DIR", data_dir.path())
        .env_remove("SOCIALSCOPE_CONFIG")
        .env_remove("RUST_LOG");
    cmd
}

/// Parse stdout of a successful run as JSON
fn stdout_json(cmd: &mut Command) -> serde_json::Value {
    let output = cmd.output().unwrap();
    assert!(
        output.status.success(),
        "STDERR: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    serde_json::from_slice(&output.stdout).unwrap()
}

#[test]
fn test_render_single_selection() {
    let data_dir = setup_data_dir();

    let frame = stdout_json(socialscope(&data_dir).args(["render", "--name", "Ana"]));

    assert_eq!(frame["scene"]["nodes"].as_array().unwrap().len(), 3);
    assert_eq!(frame["scene"]["edges"].as_array().unwrap().len(), 2);
    assert_eq!(frame["scene"]["nodes"][0]["color"], "#FF7F0E");
    assert_eq!(frame["scene"]["nodes"][0]["size"], 30.0);
    assert_eq!(frame["panel"]["project_count"], 2);
    assert_eq!(frame["panel"]["within_one"], 1);
    assert_eq!(frame["panel"]["within_two"], 2);
}

#[test]
fn test_render_type_filter_and_project() {
    let data_dir = setup_data_dir();

    let frame = stdout_json(socialscope(&data_dir).args([
        "render", "--type", "Rede B", "--project", "Horta", "--logic", "or",
    ]));

    let nodes = frame["scene"]["nodes"].as_array().unwrap();
    assert_eq!(nodes.len(), 2);
    assert_eq!(nodes[0]["id"], "p2");
    assert_eq!(nodes[0]["color"], "orange");
    assert_eq!(nodes[1]["color"], "#73A5D5");
    assert_eq!(frame["scene"]["edges"].as_array().unwrap().len(), 1);
    assert!(frame["panel"].is_null());
}

#[test]
fn test_render_rejects_three_names() {
    let data_dir = setup_data_dir();

    socialscope(&data_dir)
        .args(["render", "--name", "Ana", "--name", "Bia", "--name", "Caio"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("at most 2"));
}

#[test]
fn test_panel_text() {
    let data_dir = setup_data_dir();

    socialscope(&data_dir)
        .args(["--no-color", "panel", "Caio"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Caio (p3)"))
        .stdout(predicate::str::contains("Projects:             1"))
        .stdout(predicate::str::contains("Within 2 hops:        2"));
}

#[test]
fn test_panel_unknown_name() {
    let data_dir = setup_data_dir();

    socialscope(&data_dir)
        .args(["panel", "Nobody"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("no node is named"));
}

#[test]
fn test_options_json() {
    let data_dir = setup_data_dir();

    let options = stdout_json(socialscope(&data_dir).args(["--json", "options"]));

    assert_eq!(options["names"], serde_json::json!(["Ana", "Bia", "Caio"]));
    assert_eq!(options["types"], serde_json::json!(["Rede A", "Rede B"]));
    assert_eq!(options["projects"], serde_json::json!(["Biblioteca", "Horta"]));
}

#[test]
fn test_click_respects_displayed_scene() {
    let data_dir = setup_data_dir();

    let names = stdout_json(socialscope(&data_dir).args(["click", "p2"]));
    assert_eq!(names, serde_json::json!(["Bia"]));

    socialscope(&data_dir)
        .args(["click", "p1", "--type", "Rede B"])
        .assert()
        .success()
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("not displayed"));
}

#[test]
fn test_export_dot() {
    let data_dir = setup_data_dir();

    socialscope(&data_dir)
        .args(["export", "--format", "dot"])
        .assert()
        .success()
        .stdout(predicate::str::contains("graph social {"))
        .stdout(predicate::str::contains("\"p1\" -- \"p2\" [weight=2];"));
}

#[test]
fn test_export_json_to_file() {
    let data_dir = setup_data_dir();
    let out = data_dir.path().join("export.json");

    socialscope(&data_dir)
        .args(["export", "--format", "json", "--output"])
        .arg(&out)
        .assert()
        .success();

    let json: serde_json::Value = serde_json::from_str(&fs::read_to_string(&out).unwrap()).unwrap();
    assert_eq!(json["nodes"][1]["title"], "Bia<br>Code: p2<br>Degree: 2.0 (Rank 2)<br>Betweenness: 0.2500 (Rank 2)");
    assert_eq!(json["edges"][1]["weight"], 1.0);
}

#[test]
fn test_session_round_trip() {
    let data_dir = setup_data_dir();

    let output = socialscope(&data_dir)
        .arg("session")
        .write_stdin("{\"recompute\": {\"selected_names\": [\"Ana\"]}}\n{\"click\": \"p3\"}\n")
        .output()
        .unwrap();

    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    let responses: Vec<serde_json::Value> = stdout
        .lines()
        .map(|l| serde_json::from_str(l).unwrap())
        .collect();

    assert_eq!(responses.len(), 2);
    assert_eq!(responses[0]["frame"]["panel"]["id"], "p1");
    assert_eq!(responses[1]["selected_names"], serde_json::json!(["Caio"]));
}

#[test]
fn test_missing_graph_fails() {
    let data_dir = TempDir::new().unwrap();

    socialscope(&data_dir)
        .args(["render"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to load graph"));
}

#[test]
fn test_dangling_edge_fails_load() {
    let data_dir = TempDir::new().unwrap();
    fs::write(
        data_dir.path().join("graph.json"),
        r#"{"nodes":[{"id":"a","position":[0,0]}],"edges":[{"source":"a","target":"b"}]}"#,
    )
    .unwrap();

    socialscope(&data_dir)
        .args(["render"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("malformed graph"));
}

#[test]
fn test_config_key() {
    let data_dir = setup_data_dir();

    socialscope(&data_dir)
        .args(["--graph-file", "rede.json", "config", "graph_file"])
        .assert()
        .success()
        .stdout("rede.json\n");
}
