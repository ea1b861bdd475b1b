// Tests for `taglint tags`.
use std::process::Command;

use crate::common::{create_project, taglint_bin};

#[test]
fn test_tags_lists_registry() {
    let (_dir, root) = create_project(&[]);
    let out = Command::new(taglint_bin())
        .arg("tags")
        .current_dir(&root)
        .output()
        .unwrap();
    assert!(out.status.success());
    let stdout = String::from_utf8_lossy(&out.stdout);
    let forbidden = stdout
        .lines()
        .find(|l| l.starts_with("k8s:forbidden "))
        .unwrap();
    assert!(forbidden.ends_with("Alpha"));
    assert!(!stdout.contains("k8s:alpha"));
}

#[test]
fn test_tags_json_applies_overrides() {
    let (_dir, root) = create_project(&[(
        "taglint.json",
        r#"{"stability_overrides": {"k8s:forbidden": "beta", "acme:sized": "alpha"}}"#,
    )]);
    let out = Command::new(taglint_bin())
        .args(["tags", "--json"])
        .current_dir(&root)
        .output()
        .unwrap();
    let value: serde_json::Value = serde_json::from_slice(&out.stdout).unwrap();
    let tags = value["tags"].as_array().unwrap();
    let level = |name: &str| {
        tags.iter()
            .find(|t| t["name"] == name)
            .map(|t| t["stability"].clone())
    };
    assert_eq!(level("k8s:forbidden"), Some(serde_json::json!("beta")));
    assert_eq!(level("acme:sized"), Some(serde_json::json!("alpha")));
}
