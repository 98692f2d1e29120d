use super::*;
use base64::Engine as _;
use crate::envelope::EntryKind;
use crate::error::GatewayError;
use std::path::Path;
use tempfile::tempdir;

fn s(p: &Path) -> String { p.to_string_lossy().to_string() }

#[test]
fn list_reports_files_and_dirs() {
    let tmp = tempdir().unwrap();
    fs::write(tmp.path().join("a.txt"), b"0123456789").unwrap();
    fs::create_dir(tmp.path().join("b")).unwrap();

    let mut recs = list(&s(tmp.path())).unwrap();
    recs.sort_by(|x, y| x.name.cmp(&y.name));
    assert_eq!(recs.len(), 2);

    assert_eq!(recs[0].kind, EntryKind::File);
    assert_eq!(recs[0].name, "a.txt");
    assert_eq!(recs[0].size, 10);
    assert_eq!(recs[0].full_identifier, s(&tmp.path().join("a.txt")));

    assert_eq!(recs[1].kind, EntryKind::Dir);
    assert_eq!(recs[1].name, "b");
    assert_eq!(recs[1].size, 0);
}

#[test]
fn list_missing_directory_fails() {
    let tmp = tempdir().unwrap();
    let err = list(&s(&tmp.path().join("nope"))).unwrap_err();
    assert!(matches!(err, GatewayError::Io { .. }));
}

#[test]
fn read_text_splits_lines_without_terminators() {
    let tmp = tempdir().unwrap();
    let p = tmp.path().join("three.txt");
    fs::write(&p, "first\r\nsecond\nthird\n").unwrap();
    assert_eq!(read(&s(&p)).unwrap(), vec!["first", "second", "third"]);
}

#[test]
fn read_text_splits_on_lone_carriage_returns() {
    let tmp = tempdir().unwrap();
    let p = tmp.path().join("classic_mac.txt");
    fs::write(&p, "a\rb\rc").unwrap();
    assert_eq!(read(&s(&p)).unwrap(), vec!["a", "b", "c"]);

    fs::write(&p, "x\r\ny\rz\n\nlast\r").unwrap();
    assert_eq!(read(&s(&p)).unwrap(), vec!["x", "y", "z", "", "last"]);
}

#[test]
fn read_empty_text_file_has_no_lines() {
    let tmp = tempdir().unwrap();
    let p = tmp.path().join("empty.txt");
    fs::write(&p, "").unwrap();
    assert!(read(&s(&p)).unwrap().is_empty());
}

#[test]
fn read_binary_is_single_base64_element() {
    let tmp = tempdir().unwrap();
    let p = tmp.path().join("pixel.png");
    let bytes: Vec<u8> = vec![0x89, b'P', b'N', b'G', 0x00, 0xff, 0x10];
    fs::write(&p, &bytes).unwrap();
    let out = read(&s(&p)).unwrap();
    assert_eq!(out.len(), 1);
    assert_eq!(STANDARD.decode(&out[0]).unwrap(), bytes);
}

#[test]
fn read_invalid_utf8_text_fails() {
    let tmp = tempdir().unwrap();
    let p = tmp.path().join("bad.txt");
    fs::write(&p, [0xffu8, 0xfe, 0x00]).unwrap();
    assert!(read(&s(&p)).is_err());
}

#[test]
fn write_text_creates_file() {
    let tmp = tempdir().unwrap();
    let p = tmp.path().join("hello.txt");
    let rec = write(&s(&p), "hello", false).unwrap();
    assert_eq!(fs::read(&p).unwrap(), b"hello");
    assert_eq!(rec.kind, EntryKind::File);
    assert_eq!(rec.name, "hello.txt");
    assert_eq!(rec.size, 5);
}

#[test]
fn write_binary_decodes_base64_and_overwrites() {
    let tmp = tempdir().unwrap();
    let p = tmp.path().join("blob.bin");
    fs::write(&p, b"old contents that are longer").unwrap();
    let rec = write(&s(&p), &STANDARD.encode([1u8, 2, 3]), true).unwrap();
    assert_eq!(fs::read(&p).unwrap(), vec![1u8, 2, 3]);
    assert_eq!(rec.size, 3);
}

#[test]
fn write_bad_base64_leaves_file_untouched() {
    let tmp = tempdir().unwrap();
    let p = tmp.path().join("keep.bin");
    fs::write(&p, b"keep").unwrap();
    assert!(write(&s(&p), "***not base64***", true).is_err());
    assert_eq!(fs::read(&p).unwrap(), b"keep");
}

#[test]
fn write_into_missing_parent_fails() {
    let tmp = tempdir().unwrap();
    let p = tmp.path().join("missing").join("x.txt");
    assert!(write(&s(&p), "x", false).is_err());
}

#[test]
fn mkdir_creates_ancestors_and_is_idempotent() {
    let tmp = tempdir().unwrap();
    let p = tmp.path().join("a").join("b").join("c");
    let rec = mkdir(&s(&p)).unwrap();
    assert!(p.is_dir());
    assert_eq!(rec.kind, EntryKind::Dir);
    assert_eq!(rec.name, "c");
    assert_eq!(mkdir(&s(&p)).unwrap(), rec);
}

#[test]
fn mkdir_over_existing_file_fails() {
    let tmp = tempdir().unwrap();
    let p = tmp.path().join("file");
    fs::write(&p, b"x").unwrap();
    assert!(mkdir(&s(&p)).is_err());
}

#[test]
fn delete_non_empty_dir_requires_recursive() {
    let tmp = tempdir().unwrap();
    let d = tmp.path().join("full");
    fs::create_dir_all(d.join("inner")).unwrap();
    fs::write(d.join("inner").join("f.txt"), b"x").unwrap();

    assert!(delete(&s(&d), false).is_err());
    assert!(d.exists());

    let rec = delete(&s(&d), true).unwrap();
    assert!(!d.exists());
    assert_eq!(rec.kind, EntryKind::Dir);
    assert_eq!(rec.name, "Deleted");
    assert_eq!(rec.full_identifier, s(&d));
}

#[test]
fn delete_file_and_empty_dir() {
    let tmp = tempdir().unwrap();
    let f = tmp.path().join("f.txt");
    fs::write(&f, b"x").unwrap();
    let rec = delete(&s(&f), false).unwrap();
    assert_eq!(rec.kind, EntryKind::File);
    assert!(!f.exists());

    let d = tmp.path().join("empty");
    fs::create_dir(&d).unwrap();
    assert_eq!(delete(&s(&d), false).unwrap().kind, EntryKind::Dir);
    assert!(!d.exists());
}

#[test]
fn delete_missing_path_fails() {
    let tmp = tempdir().unwrap();
    assert!(delete(&s(&tmp.path().join("ghost")), true).is_err());
}
