//! End-to-end tests for the `strata` binary.

use std::fs;
use std::path::{Path, PathBuf};

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

// =============================================================================
// TEST FIXTURES
// =============================================================================

const TAXONOMY_CSV: &str = "\
Asset,Classification,Asset Class,Sub-Asset Class,Liquidity,Instrument/Manager
US Stock ETF,Traditional,Public,Equity,Highly Liquid,US Stock ETF
Aggregate Bond ETF,Traditional,Public,Fixed Income,Highly Liquid,Aggregate Bond ETF
Private Equity Fund,Alternative,Private,Equity,Illiquid,Private Equity Fund
Hedge Fund,Alternative,Private,Hedge Funds,Moderately Liquid,Multi-Strategy Manager
";

struct Workspace {
    dir: TempDir,
}

impl Workspace {
    fn new(holdings: &str) -> Self {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("taxonomy.csv"), TAXONOMY_CSV).unwrap();
        fs::write(dir.path().join("holdings.json"), holdings).unwrap();
        fs::write(dir.path().join("strata.toml"), "").unwrap();
        Self { dir }
    }

    fn path(&self, name: &str) -> PathBuf {
        self.dir.path().join(name)
    }

    /// Command with an isolated settings file and the fixture inputs.
    fn strata(&self) -> Command {
        let mut cmd = Command::cargo_bin("strata").unwrap();
        cmd.env_remove("RUST_LOG")
            .env_remove("STRATA_TAXONOMY")
            .env_remove("STRATA_HOLDINGS")
            .env_remove("STRATA_CONFIG")
            .arg("--config")
            .arg(self.path("strata.toml"));
        cmd
    }

    fn inputs(&self) -> Vec<String> {
        vec![
            "--taxonomy".into(),
            path_arg(&self.path("taxonomy.csv")),
            "--holdings".into(),
            path_arg(&self.path("holdings.json")),
        ]
    }
}

fn path_arg(path: &Path) -> String {
    path.display().to_string()
}

const TWO_ASSETS: &str = r#"{"US Stock ETF": 60, "Private Equity Fund": 40}"#;

// =============================================================================
// ROLLUP
// =============================================================================

#[test]
fn test_rollup_table() {
    let ws = Workspace::new(TWO_ASSETS);
    ws.strata()
        .arg("rollup")
        .args(ws.inputs())
        .args(["--total-value", "1000"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Traditional"))
        .stdout(predicate::str::contains("Alternative"))
        .stdout(predicate::str::contains("600.00"));
}

#[test]
fn test_rollup_json() {
    let ws = Workspace::new(TWO_ASSETS);
    let output = ws
        .strata()
        .args(["--format", "json", "rollup"])
        .args(ws.inputs())
        .args(["--total-value", "1000"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let rows: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let rows = rows.as_array().unwrap();
    // Two assets with disjoint paths: two rows per level.
    assert_eq!(rows.len(), 10);
    assert_eq!(rows[0]["Classification"], "Alternative");
    assert_eq!(rows[0]["Allocation (%)"].as_f64(), Some(40.0));
    assert!(rows[0]["Asset Class"].is_null());
}

#[test]
fn test_rollup_leaves_only_csv() {
    let ws = Workspace::new(TWO_ASSETS);
    ws.strata()
        .args(["--format", "csv", "rollup", "--leaves-only"])
        .args(ws.inputs())
        .args(["--total-value", "1000"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with(
            "Classification,Asset Class,Sub-Asset Class,Liquidity,Instrument/Manager,Allocation (%),Allocation ($)",
        ))
        .stdout(predicate::str::contains(
            "Alternative,Private,Equity,Illiquid,Private Equity Fund,40,400",
        ))
        .stdout(predicate::str::contains(
            "Traditional,Public,Equity,Highly Liquid,US Stock ETF,60,600",
        ));
}

#[test]
fn test_rollup_unknown_asset_uses_fallback() {
    let ws = Workspace::new(r#"{"Unknown Asset": 100}"#);
    ws.strata()
        .args(["--format", "csv", "rollup", "--leaves-only"])
        .args(ws.inputs())
        .args(["--total-value", "500"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Alternative,,,Illiquid,Unknown Asset,100,500"));
}

#[test]
fn test_rollup_warns_on_total() {
    let ws = Workspace::new(r#"{"US Stock ETF": 50, "Private Equity Fund": 40}"#);
    ws.strata()
        .arg("rollup")
        .args(ws.inputs())
        .args(["--total-value", "1000"])
        .assert()
        .success()
        .stderr(predicate::str::contains("not 100%"));
}

#[test]
fn test_rollup_total_value_from_settings() {
    let ws = Workspace::new(TWO_ASSETS);
    fs::write(ws.path("strata.toml"), "total_value = 2000\n").unwrap();
    ws.strata()
        .args(["--format", "csv", "rollup", "--leaves-only"])
        .args(ws.inputs())
        .assert()
        .success()
        .stdout(predicate::str::contains("US Stock ETF,60,1200"));
}

#[test]
fn test_rollup_missing_total_value() {
    let ws = Workspace::new(TWO_ASSETS);
    ws.strata()
        .arg("rollup")
        .args(ws.inputs())
        .assert()
        .failure()
        .stderr(predicate::str::contains("No total value"));
}

#[test]
fn test_rollup_rejects_oversized_total_value() {
    let ws = Workspace::new(r#"{"A": 100, "B": 100}"#);
    ws.strata()
        .arg("rollup")
        .args(ws.inputs())
        .args(["--total-value", "50000000000000000000000000000"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid total value"));
}

#[test]
fn test_rollup_missing_taxonomy_file() {
    let ws = Workspace::new(TWO_ASSETS);
    ws.strata()
        .args(["rollup", "--taxonomy"])
        .arg(ws.path("missing.csv"))
        .arg("--holdings")
        .arg(ws.path("holdings.json"))
        .args(["--total-value", "1000"])
        .assert()
        .failure();
}

// =============================================================================
// SUMMARY / SUNBURST
// =============================================================================

#[test]
fn test_summary_csv() {
    let ws = Workspace::new(r#"{"US Stock ETF": 60, "Private Equity Fund": 30, "Farmland": 10}"#);
    ws.strata()
        .args(["--format", "csv", "summary"])
        .args(ws.inputs())
        .assert()
        .success()
        .stdout(predicate::str::contains("Classification,Alternative,40"))
        .stdout(predicate::str::contains("Access,Private,40"))
        .stdout(predicate::str::contains("Liquidity,Illiquid,40"))
        .stdout(predicate::str::contains("Liquidity,Highly Liquid,60"));
}

#[test]
fn test_summary_table_headers() {
    let ws = Workspace::new(TWO_ASSETS);
    ws.strata()
        .arg("summary")
        .args(ws.inputs())
        .assert()
        .success()
        .stdout(predicate::str::contains("By Classification"))
        .stdout(predicate::str::contains("By Access"))
        .stdout(predicate::str::contains("By Liquidity"));
}

#[test]
fn test_sunburst_json() {
    let ws = Workspace::new(TWO_ASSETS);
    let output = ws
        .strata()
        .args(["--format", "json", "sunburst"])
        .args(ws.inputs())
        .args(["--total-value", "1000"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let nodes: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let nodes = nodes.as_array().unwrap();
    assert_eq!(nodes.len(), 10);
    assert!(nodes
        .iter()
        .any(|n| n["id"] == "Traditional / Public" && n["parent"] == "Traditional"));
}

// =============================================================================
// EXPORT
// =============================================================================

#[test]
fn test_export_writes_file() {
    let ws = Workspace::new(TWO_ASSETS);
    let out = ws.path("rollup.csv");
    ws.strata()
        .arg("export")
        .args(ws.inputs())
        .args(["--total-value", "1000", "--output"])
        .arg(&out)
        .assert()
        .success()
        .stdout(predicate::str::contains("Exported rollup"));

    let content = fs::read_to_string(&out).unwrap();
    assert_eq!(content.lines().count(), 11);
    assert!(content.contains("Traditional,,,,,60,600"));
}

#[test]
fn test_export_summary() {
    let ws = Workspace::new(TWO_ASSETS);
    let out = ws.path("summary.csv");
    ws.strata()
        .args(["--quiet", "export", "--summary"])
        .args(ws.inputs())
        .args(["--total-value", "1000", "--output"])
        .arg(&out)
        .assert()
        .success()
        .stdout(predicate::str::is_empty());

    let content = fs::read_to_string(&out).unwrap();
    assert!(content.starts_with("Dimension,Category,Allocation (%)"));
}

// =============================================================================
// HOLDINGS
// =============================================================================

#[test]
fn test_holdings_add_remove() {
    let ws = Workspace::new("{}");
    let holdings = ws.path("holdings.json");

    ws.strata()
        .args(["holdings", "--holdings"])
        .arg(&holdings)
        .args(["add", "US Stock ETF", "60"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Added US Stock ETF"));

    ws.strata()
        .args(["holdings", "--holdings"])
        .arg(&holdings)
        .args(["add", "US Stock ETF", "70"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Updated US Stock ETF"));

    let saved: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&holdings).unwrap()).unwrap();
    assert_eq!(saved["US Stock ETF"].as_f64(), Some(70.0));

    ws.strata()
        .args(["holdings", "--holdings"])
        .arg(&holdings)
        .args(["remove", "US Stock ETF"])
        .assert()
        .success();

    let saved: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&holdings).unwrap()).unwrap();
    assert_eq!(saved.as_object().unwrap().len(), 0);
}

#[test]
fn test_holdings_add_rejects_out_of_range() {
    let ws = Workspace::new("{}");
    ws.strata()
        .args(["holdings", "--holdings"])
        .arg(ws.path("holdings.json"))
        .args(["add", "US Stock ETF", "150"])
        .assert()
        .failure();
}

#[test]
fn test_holdings_remove_unknown() {
    let ws = Workspace::new(TWO_ASSETS);
    ws.strata()
        .args(["holdings", "--holdings"])
        .arg(ws.path("holdings.json"))
        .args(["remove", "Gold"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Asset not in holdings: Gold"));
}

#[test]
fn test_holdings_remove_trims_name() {
    let ws = Workspace::new("{}");
    let holdings = ws.path("holdings.json");

    ws.strata()
        .args(["holdings", "--holdings"])
        .arg(&holdings)
        .args(["add", " Gold ", "5"])
        .assert()
        .success();

    ws.strata()
        .args(["holdings", "--holdings"])
        .arg(&holdings)
        .args(["remove", " Gold "])
        .assert()
        .success()
        .stdout(predicate::str::contains("Removed Gold"));

    let saved: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&holdings).unwrap()).unwrap();
    assert!(saved.as_object().unwrap().is_empty());
}

#[test]
fn test_holdings_add_with_bad_taxonomy_leaves_file_unchanged() {
    let ws = Workspace::new("{}");
    let holdings = ws.path("holdings.json");

    ws.strata()
        .args(["holdings", "--holdings"])
        .arg(&holdings)
        .arg("--taxonomy")
        .arg(ws.path("missing.csv"))
        .args(["add", "Gold", "5"])
        .assert()
        .failure();

    assert_eq!(fs::read_to_string(&holdings).unwrap(), "{}");
}

#[test]
fn test_holdings_available() {
    let ws = Workspace::new(TWO_ASSETS);
    let output = ws
        .strata()
        .args(["--format", "json", "holdings"])
        .args(ws.inputs())
        .arg("available")
        .output()
        .unwrap();
    assert!(output.status.success());

    let available: Vec<String> = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(available, vec!["Aggregate Bond ETF", "Hedge Fund"]);
}

// =============================================================================
// CONFIG
// =============================================================================

#[test]
fn test_config_init_and_show() {
    let dir = tempfile::tempdir().unwrap();
    let settings = dir.path().join("conf").join("strata.toml");

    Command::cargo_bin("strata")
        .unwrap()
        .env_remove("STRATA_CONFIG")
        .arg("--config")
        .arg(&settings)
        .args(["config", "init"])
        .assert()
        .success();
    assert!(settings.exists());

    Command::cargo_bin("strata")
        .unwrap()
        .env_remove("STRATA_CONFIG")
        .arg("--config")
        .arg(&settings)
        .args(["config", "init"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("already exists"));

    Command::cargo_bin("strata")
        .unwrap()
        .env_remove("STRATA_CONFIG")
        .arg("--config")
        .arg(&settings)
        .args(["config", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Full Hierarchy"));
}
