use rmx_fs::{Error, NormalizedPath, io};
use std::fs;
use tempfile::TempDir;

#[test]
fn test_read_bytes_keeps_non_utf8_content() {
    let temp = TempDir::new().unwrap();
    let file_path = temp.path().join("latin1.xml");
    fs::write(&file_path, b"<a n=\"M\xfcller\"/>").unwrap();
    let path = NormalizedPath::new(&file_path);

    assert_eq!(io::read_bytes(&path).unwrap(), b"<a n=\"M\xfcller\"/>");
    assert!(matches!(io::read_text(&path), Err(Error::Io { .. })));
}

#[test]
fn test_read_bytes_missing_file_is_io_error() {
    let temp = TempDir::new().unwrap();
    let path = NormalizedPath::new(temp.path().join("absent.xml"));

    assert!(matches!(io::read_bytes(&path), Err(Error::Io { .. })));
}
