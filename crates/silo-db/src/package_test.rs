use super::*;

#[test]
fn test_dir_packager_stages_files() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("f_quotes.csv"), "1,2\n").unwrap();
    std::fs::write(dir.path().join("lk.csv"), "1,a\n").unwrap();

    let target = DirPackager.package(dir.path(), "quotes.pkg").unwrap();

    assert_eq!(target, dir.path().join("quotes.pkg"));
    assert!(target.join("f_quotes.csv").exists());
    assert!(target.join("lk.csv").exists());
    // originals were moved, not copied
    assert!(!dir.path().join("f_quotes.csv").exists());
}

#[test]
fn test_dir_packager_empty_dir() {
    let dir = tempfile::tempdir().unwrap();
    let target = DirPackager.package(dir.path(), "empty.pkg").unwrap();
    assert!(target.is_dir());
}
