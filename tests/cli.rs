use assert_cmd::Command;
use predicates::prelude::*;
use predicates::str::contains;
use serde_json::Value;
use std::fs;
use tempfile::TempDir;

fn cmd(dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("serptrack").unwrap();
    cmd.current_dir(dir.path()).env_remove("RUST_LOG");
    cmd
}

#[test]
fn dashboard_from_embedded_sample() {
    let dir = TempDir::new().unwrap();
    cmd(&dir)
        .assert()
        .success()
        .stdout(contains("Tracked sites: 2"))
        .stdout(contains("Average score: 79 (fair)"))
        .stdout(contains("Best ranking: #8"))
        .stdout(contains("Keyword movement: 4 up, 2 down, 1 unchanged, 1 without history"))
        .stdout(contains("software: #3 ↑ (2)"));
}

#[test]
fn json_output_is_parseable() {
    let dir = TempDir::new().unwrap();
    let output = cmd(&dir).args(["--json", "--top", "2"]).output().unwrap();
    assert!(output.status.success());

    let report: Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(report["stats"]["totalKeywords"], 8);
    assert_eq!(report["stats"]["topSitesByScore"].as_array().unwrap().len(), 2);
    assert_eq!(report["stats"]["topSitesByScore"][0]["url"], "https://example.com");
}

#[test]
fn keyword_view_for_one_site() {
    let dir = TempDir::new().unwrap();
    cmd(&dir)
        .args(["--url", "https://samplesite.com"])
        .assert()
        .success()
        .stdout(contains("Keyword rankings for https://samplesite.com"))
        .stdout(contains("strategy: #16 ↓ (4)"))
        .stdout(contains("analytics: #7 – (no previous data"));
}

#[test]
fn bare_host_matches_https_site() {
    let dir = TempDir::new().unwrap();
    cmd(&dir)
        .args(["--url", "example.com"])
        .assert()
        .success()
        .stdout(contains("Keyword rankings for https://example.com"))
        .stdout(contains("software: #3 ↑ (2)"));
}

#[test]
fn non_web_site_url_is_rejected() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("mail.json");
    fs::write(&path, r#"[{"id": 1, "url": "mailto:a@b.com", "score": 50}]"#).unwrap();

    cmd(&dir)
        .arg("--sites")
        .arg(&path)
        .assert()
        .failure()
        .stderr(contains("not an http(s) site address"));
}

#[test]
fn unknown_site_has_no_keywords() {
    let dir = TempDir::new().unwrap();
    cmd(&dir)
        .args(["--url", "https://unknown.example"])
        .assert()
        .success()
        .stdout(contains("No keywords tracked"));
}

#[test]
fn custom_sites_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("custom.json");
    fs::write(
        &path,
        r#"[{"id": 9, "url": "https://solo.example", "score": 41, "rankings": {"google": 3}}]"#,
    )
    .unwrap();

    cmd(&dir)
        .arg("--sites")
        .arg(&path)
        .assert()
        .success()
        .stdout(contains("Tracked sites: 1"))
        .stdout(contains("Average score: 41 (poor)"))
        .stdout(contains("Best ranking: #3"));
}

#[test]
fn invalid_sites_file_fails() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("bad.json");
    fs::write(&path, r#"[{"id": 1, "url": "https://a.example", "score": 120}]"#).unwrap();

    cmd(&dir)
        .arg("--sites")
        .arg(&path)
        .assert()
        .failure()
        .stderr(contains("outside 0-100"));
}

#[test]
fn zero_top_is_rejected() {
    let dir = TempDir::new().unwrap();
    cmd(&dir)
        .args(["--top", "0"])
        .assert()
        .failure()
        .stderr(contains("--top must be greater than 0"));
}

#[test]
fn writes_report_into_directory() {
    let dir = TempDir::new().unwrap();
    let out = dir.path().join("reports");

    cmd(&dir)
        .arg("--report")
        .arg(&out)
        .assert()
        .success()
        .stderr(contains("Report written to"));

    let entries: Vec<_> = fs::read_dir(&out).unwrap().collect();
    assert_eq!(entries.len(), 1);
    let name = entries[0].as_ref().unwrap().file_name();
    let name = name.to_string_lossy();
    assert!(name.starts_with("seo-report-all-sites-"));
    assert!(name.ends_with(".json"));
}

#[test]
fn keyword_report_named_after_site() {
    let dir = TempDir::new().unwrap();
    let out = dir.path().join("reports");

    cmd(&dir)
        .args(["--url", "samplesite.com", "--report"])
        .arg(&out)
        .assert()
        .success();

    let names: Vec<String> = fs::read_dir(&out)
        .unwrap()
        .map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    assert_eq!(names.len(), 1);
    assert!(names[0].starts_with("keyword-report-samplesite-com-"));

    let body: Value = serde_json::from_str(&fs::read_to_string(out.join(&names[0])).unwrap()).unwrap();
    assert_eq!(body["url"], "https://samplesite.com");
    assert_eq!(body["keywords"].as_array().unwrap().len(), 3);
}

#[test]
fn init_writes_sample_once() {
    let dir = TempDir::new().unwrap();
    cmd(&dir)
        .arg("--init")
        .assert()
        .success()
        .stdout(contains("Created sites.json"));
    assert!(dir.path().join("sites.json").exists());

    cmd(&dir)
        .arg("--init")
        .assert()
        .failure()
        .stderr(contains("already exists"));

    cmd(&dir)
        .assert()
        .success()
        .stdout(contains("Tracked sites: 2").and(contains("example.com")));
}

#[test]
fn redact_hides_hosts() {
    let dir = TempDir::new().unwrap();
    cmd(&dir)
        .arg("--redact")
        .assert()
        .success()
        .stdout(contains("**********.com"))
        .stdout(contains("samplesite").not());
}
