//! Loading and saving scheme files.

use std::fs;

use tempfile::TempDir;
use tincture_scheme::prelude::*;
use tincture_scheme::Error;

fn sample() -> SchemeDocument {
    let mut document = SchemeDocument::new();
    document.set_id("paper");
    document.set_name("Paper");
    document.add_color(Color::with_rgba("ink", Rgba::from_rgb8(0x22, 0x22, 0x22)));
    document
        .get_or_create_style("text")
        .set_foreground(Rgba::from_rgb8(0x22, 0x22, 0x22));
    document
}

#[test]
fn save_then_load_records_origin() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("paper.xml");

    let mut document = sample();
    assert!(!document.is_pristine());
    document.save_to_file(&path).unwrap();
    assert_eq!(document.origin(), Some(path.as_path()));

    let written = fs::read_to_string(&path).unwrap();
    assert_eq!(written, document.to_text());
    assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 1);

    let mut loaded = SchemeDocument::new();
    assert!(loaded.is_pristine());
    loaded.load_from_file(&path).unwrap();
    assert_eq!(loaded.origin(), Some(path.as_path()));
    assert!(!loaded.is_pristine());
    assert_eq!(loaded.id(), "paper");
    assert_eq!(
        loaded.style("text").unwrap().foreground(),
        StyleValue::Set(Rgba::from_rgb8(0x22, 0x22, 0x22))
    );
}

#[test]
fn save_overwrites_existing_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("paper.xml");
    fs::write(&path, "stale").unwrap();

    let config = WriterConfig::from_toml_str("license_header = false\n").unwrap();
    let mut document = sample();
    document.save_to_file_with(&path, &config).unwrap();

    let written = fs::read_to_string(&path).unwrap();
    assert!(written.starts_with("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n<style-scheme"));
}

#[test]
fn missing_file_is_io_error() {
    let dir = TempDir::new().unwrap();
    let mut document = SchemeDocument::new();
    let err = document
        .load_from_file(dir.path().join("absent.xml"))
        .unwrap_err();
    assert!(matches!(err, Error::Io { .. }));
    assert!(document.origin().is_none());
}

#[test]
fn failed_parse_does_not_record_origin() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("broken.xml");
    fs::write(&path, "<style-scheme id=\"x\"><nope/></style-scheme>").unwrap();

    let mut document = SchemeDocument::new();
    let err = document.load_from_file(&path).unwrap_err();
    assert!(matches!(err, Error::Parse { .. }));
    assert!(document.origin().is_none());
    assert_eq!(document.id(), "x");
}

#[test]
fn writer_config_from_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("tincture.toml");
    fs::write(
        &path,
        "license_header = true\ncopyright_year = 2019\nfallback_author = \"Team\"\n",
    )
    .unwrap();

    let config = WriterConfig::from_file(&path).unwrap();
    let output = SchemeDocument::new().to_text_with(&config, None);
    assert!(output.contains("Copyright 2019 Team"));

    fs::write(&path, "license_header = \"yes\"\n").unwrap();
    assert!(matches!(
        WriterConfig::from_file(&path),
        Err(Error::Config { .. })
    ));
}
