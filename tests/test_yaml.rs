use std::io::Write;

use serde::Deserialize;
use task_forever::config::{
    yaml::{load_yaml, load_yaml_into},
    ConfigError,
};
use tempfile::NamedTempFile;

#[derive(Debug, Default, Deserialize, PartialEq)]
struct WorkerConfig {
    name: String,
    workers: u32,
    #[serde(default)]
    endpoints: Vec<String>,
}

fn yaml_file(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}

#[test]
fn test_load_yaml_into_struct() {
    let file = yaml_file("name: ingest\nworkers: 4\nendpoints:\n  - a:1\n  - b:2\n");

    let config: WorkerConfig = load_yaml(file.path()).unwrap();
    assert_eq!(
        config,
        WorkerConfig {
            name: "ingest".into(),
            workers: 4,
            endpoints: vec!["a:1".into(), "b:2".into()],
        }
    );
}

#[test]
fn test_load_yaml_missing_file_is_read_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("absent.yaml");

    let err = load_yaml::<WorkerConfig>(&path).unwrap_err();
    assert!(matches!(err, ConfigError::Read { path: ref p, .. } if p == &path));
}

#[test]
fn test_load_yaml_malformed_is_parse_error() {
    let file = yaml_file("name: [unterminated\n");

    let err = load_yaml::<WorkerConfig>(file.path()).unwrap_err();
    assert!(matches!(err, ConfigError::Parse { .. }));
}

#[test]
fn test_load_yaml_wrong_shape_is_parse_error() {
    let file = yaml_file("name: ingest\nworkers: many\n");

    let err = load_yaml::<WorkerConfig>(file.path()).unwrap_err();
    assert!(matches!(err, ConfigError::Parse { .. }));
}

#[test]
fn test_load_yaml_into_leaves_target_untouched_on_failure() {
    let mut config = WorkerConfig {
        name: "previous".into(),
        workers: 1,
        endpoints: vec![],
    };

    let bad = yaml_file("workers: -1\n");
    assert!(load_yaml_into(bad.path(), &mut config).is_err());
    assert_eq!(config.name, "previous");
    assert_eq!(config.workers, 1);

    let good = yaml_file("name: next\nworkers: 2\n");
    load_yaml_into(good.path(), &mut config).unwrap();
    assert_eq!(config.name, "next");
    assert_eq!(config.workers, 2);
    assert!(config.endpoints.is_empty());
}

#[test]
fn test_load_yaml_into_replaces_instead_of_merging() {
    let mut config = WorkerConfig {
        name: "previous".into(),
        workers: 1,
        endpoints: vec!["old:1".into()],
    };

    let file = yaml_file("name: next\nworkers: 3\n");
    load_yaml_into(file.path(), &mut config).unwrap();
    assert_eq!(config.workers, 3);
    assert!(config.endpoints.is_empty());

    let partial = yaml_file("workers: 5\n");
    let err = load_yaml_into(partial.path(), &mut config).unwrap_err();
    assert!(matches!(err, ConfigError::Parse { .. }));
    assert_eq!(config.name, "next");
}
