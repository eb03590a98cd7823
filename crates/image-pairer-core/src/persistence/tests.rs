use tempfile::tempdir;

use super::*;

fn sample_results() -> Vec<MatchResult> {
    vec![
        MatchResult {
            equality: 0.0,
            file_name_from_b: "cat_v2.jpg".to_string(),
            file_name_from_a: "cat.jpg".to_string(),
        },
        MatchResult {
            equality: 0.013,
            file_name_from_b: "leaf_x.jpg".to_string(),
            file_name_from_a: "leaf.jpg".to_string(),
        },
    ]
}

#[test]
fn test_save_and_load_roundtrip() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("results.json");

    let results = sample_results();
    save_results(&path, &results).unwrap();

    let loaded = load_results(&path).unwrap();
    assert_eq!(loaded, results);
}

#[test]
fn test_serialized_field_names_are_camel_case() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("results.json");

    save_results(&path, &sample_results()).unwrap();
    let json = std::fs::read_to_string(&path).unwrap();

    assert!(json.contains("\"fileNameFromA\""));
    assert!(json.contains("\"fileNameFromB\""));
    assert!(json.contains("\"equality\""));
    // Pretty-printed for human inspection
    assert!(json.contains("\n  "));
}

#[test]
fn test_order_is_preserved() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("results.json");

    save_results(&path, &sample_results()).unwrap();
    let loaded = load_results(&path).unwrap();

    assert!(loaded[0].equality <= loaded[1].equality);
    assert_eq!(loaded[0].file_name_from_a, "cat.jpg");
}

#[test]
fn test_load_missing_file() {
    let dir = tempdir().unwrap();
    let result = load_results(&dir.path().join("absent.json"));
    assert!(matches!(result, Err(Error::FileNotFound(_))));
}

#[test]
fn test_load_rejects_malformed_json() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("results.json");
    std::fs::write(&path, b"{ not json").unwrap();

    assert!(matches!(load_results(&path), Err(Error::Persistence(_))));
}

#[test]
fn test_empty_result_set_roundtrips() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("results.json");

    save_results(&path, &[]).unwrap();
    assert!(load_results(&path).unwrap().is_empty());
}
