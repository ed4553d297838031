use rmx_fs::NormalizedPath;
use rstest::rstest;

#[test]
fn test_normalize_forward_slashes() {
    let path = NormalizedPath::new("foo/bar/baz");
    assert_eq!(path.as_str(), "foo/bar/baz");
}

#[test]
fn test_normalize_backslashes_to_forward() {
    let path = NormalizedPath::new("com\\rapidminer\\resources");
    assert_eq!(path.as_str(), "com/rapidminer/resources");
}

#[test]
fn test_normalize_mixed_slashes() {
    let path = NormalizedPath::new("com/rapidminer\\resources");
    assert_eq!(path.as_str(), "com/rapidminer/resources");
}

#[test]
fn test_join_paths() {
    let base = NormalizedPath::new("src/main");
    let joined = base.join("resources");
    assert_eq!(joined.as_str(), "src/main/resources");
}

#[test]
fn test_join_normalizes_segment() {
    let base = NormalizedPath::new("src/main/resources");
    let joined = base.join("com\\rapidminer\\OperatorsX.xml");
    assert_eq!(joined.as_str(), "src/main/resources/com/rapidminer/OperatorsX.xml");
}

#[test]
fn test_parent() {
    let path = NormalizedPath::new("foo/bar/baz");
    let parent = path.parent().unwrap();
    assert_eq!(parent.as_str(), "foo/bar");
}

#[test]
fn test_file_name_and_extension() {
    let path = NormalizedPath::new("i18n/ErrorsWebMining.properties");
    assert_eq!(path.file_name(), Some("ErrorsWebMining.properties"));
    assert_eq!(path.extension(), Some("properties"));
}

#[test]
fn test_hidden_file_has_no_extension() {
    let path = NormalizedPath::new("resources/.gitkeep");
    assert_eq!(path.extension(), None);
}

#[test]
fn test_exists_false_for_nonexistent() {
    let path = NormalizedPath::new("/nonexistent/path/that/does/not/exist");
    assert!(!path.exists());
}

#[rstest]
#[case("/p/src/main/resources/a/Ops.xml", "/p/src/main/resources", Some("a/Ops.xml"))]
#[case("/p/src/main/resources/Ops.xml", "/p/src/main/resources/", Some("Ops.xml"))]
#[case("/p/src/main/resources", "/p/src/main/resources", None)]
#[case("/p/src/main/resourcesX/Ops.xml", "/p/src/main/resources", None)]
#[case("/q/Ops.xml", "/p", None)]
fn test_relative_to_cases(#[case] path: &str, #[case] base: &str, #[case] expected: Option<&str>) {
    let relative = NormalizedPath::new(path).relative_to(&NormalizedPath::new(base));
    assert_eq!(relative.as_ref().map(NormalizedPath::as_str), expected);
}
