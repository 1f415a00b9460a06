use std::fs;

use specgen_input::{Config, Document, Error, SpecVersion};
use tempfile::TempDir;

#[test]
fn test_open_yaml_document() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("petstore.yml");
    fs::write(
        &path,
        "swagger: '2.0'\ninfo:\n  title: Petstore\n  version: 1.0.0\npaths: {}\n",
    )
    .unwrap();

    let doc = Document::open(&path).unwrap();
    assert_eq!(doc.version(), SpecVersion::V2);
    assert_eq!(doc.root()["info"]["title"], "Petstore");
}

#[test]
fn test_open_missing_document() {
    let dir = TempDir::new().unwrap();
    let err = Document::open(dir.path().join("missing.json")).unwrap_err();
    assert!(matches!(*err, Error::Io { .. }));
}

#[test]
fn test_config_from_file_then_resolve() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("specgen.toml");
    fs::write(&path, "input = \"openapi.json\"\noutput = \"out\"\n").unwrap();

    let mut config = Config::from_file(&path).unwrap();
    config.resolve_paths(dir.path());

    assert_eq!(config.input, dir.path().join("openapi.json"));
    assert_eq!(config.output, dir.path().join("out"));
}
