use std::fs;

use regadmin::{evaluate_rule_file, load_product_manifests};
use serde_json::json;
use tempfile::tempdir;

fn write_product(dir: &std::path::Path, slug: &str, version: &str) {
    let product_dir = dir.join(slug);
    fs::create_dir(&product_dir).expect("create product dir");
    let manifest = json!({
        "name": slug,
        "version": version,
        "kind": "plugin"
    });
    fs::write(product_dir.join("product.json"), manifest.to_string()).expect("write manifest");
}

#[test]
fn load_product_manifests_from_directory() {
    let dir = tempdir().expect("temp dir");
    write_product(dir.path(), "registration-pro", "1.3.0");

    let manifests = load_product_manifests(dir.path()).expect("load manifests");
    assert_eq!(manifests.len(), 1);
    assert_eq!(manifests[0].name, "registration-pro");
}

#[test]
fn rule_file_evaluates_against_product_directory() {
    let products = tempdir().expect("temp dir");
    write_product(products.path(), "registration-pro", "1.3.0");

    let rules_dir = tempdir().expect("temp dir");
    let rule_path = rules_dir.path().join("rules.json");
    let rules = json!({
        "product_conditions": {
            "plugins": { "registration-pro": ">=1.2.0" }
        }
    });
    fs::write(&rule_path, rules.to_string()).expect("write rules");

    let verdict =
        evaluate_rule_file(&rule_path, Some(products.path())).expect("evaluate rule file");
    assert!(verdict);
}

#[test]
fn rule_file_with_unmet_constraint_is_false() {
    let products = tempdir().expect("temp dir");
    write_product(products.path(), "registration-pro", "1.1.0");

    let rules_dir = tempdir().expect("temp dir");
    let rule_path = rules_dir.path().join("rules.json");
    let rules = json!({
        "product_conditions": {
            "plugins": { "registration-pro": ">=1.2.0" }
        }
    });
    fs::write(&rule_path, rules.to_string()).expect("write rules");

    let verdict =
        evaluate_rule_file(&rule_path, Some(products.path())).expect("evaluate rule file");
    assert!(!verdict);
}

#[test]
fn missing_rule_file_is_an_error() {
    let dir = tempdir().expect("temp dir");
    let result = evaluate_rule_file(&dir.path().join("absent.json"), None);
    assert!(result.is_err());
}
