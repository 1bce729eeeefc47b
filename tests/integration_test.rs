use assert_cmd::Command;
use assert_cmd::cargo;
use std::path::Path;
use tempfile::tempdir;

fn write_package(root: &Path, name: &str, version: &str, deps: &[&str]) {
    let dir = root.join(format!("{name}-{version}"));
    std::fs::create_dir_all(&dir).unwrap();

    let mut desc = format!("%NAME%\n{name}\n\n%VERSION%\n{version}\n\n");
    if !deps.is_empty() {
        desc.push_str("%DEPENDS%\n");
        for dep in deps {
            desc.push_str(dep);
            desc.push('\n');
        }
        desc.push('\n');
    }
    std::fs::write(dir.join("desc"), desc).unwrap();
    std::fs::write(dir.join("files"), "%FILES%\nusr/\n\n").unwrap();
}

fn create_db(root: &Path) {
    std::fs::write(root.join("ALPM_DB_VERSION"), "9\n").unwrap();
    write_package(root, "glibc", "2.39-1", &[]);
    write_package(root, "ncurses", "6.4-2", &["glibc", "gcc-libs"]);
    write_package(root, "gcc-libs", "13.2.1-5", &["glibc>=2.27"]);
    write_package(root, "readline", "8.2.010-1", &["glibc", "ncurses", "libncursesw.so=6-64"]);
    write_package(root, "bash", "5.2.026-2", &["readline", "libreadline.so=8-64", "glibc", "ncurses"]);
    write_package(root, "vim", "9.1.0-1", &["vim-runtime=9.1.0-1", "gpm", "acl", "glibc"]);
}

fn pacroots() -> Command {
    let mut cmd = Command::new(cargo::cargo_bin!("pacroots"));
    cmd.env_remove("PACROOTS_DB").env_remove("PACROOTS_OUTPUT");
    cmd
}

fn parse_roots(stdout: &[u8]) -> Vec<String> {
    let mut roots: Vec<String> = serde_json::from_slice(stdout).unwrap();
    roots.sort();
    roots
}

#[test]
fn test_roots_end_to_end() {
    let db = tempdir().unwrap();
    create_db(db.path());

    let output = pacroots()
        .arg("--db")
        .arg(db.path())
        .arg("roots")
        .output()
        .unwrap();

    assert!(output.status.success());
    assert_eq!(parse_roots(&output.stdout), vec!["bash", "vim"]);
}

#[test]
fn test_roots_is_idempotent() {
    let db = tempdir().unwrap();
    create_db(db.path());

    let first = pacroots().arg("--db").arg(db.path()).arg("roots").output().unwrap();
    let second = pacroots().arg("--db").arg(db.path()).arg("roots").output().unwrap();

    assert!(first.status.success());
    assert_eq!(parse_roots(&first.stdout), parse_roots(&second.stdout));
}

#[test]
fn test_db_from_environment() {
    let db = tempdir().unwrap();
    create_db(db.path());

    let output = pacroots()
        .env("PACROOTS_DB", db.path())
        .arg("roots")
        .output()
        .unwrap();

    assert!(output.status.success());
    assert_eq!(parse_roots(&output.stdout), vec!["bash", "vim"]);
}

#[test]
fn test_records_end_to_end() {
    let db = tempdir().unwrap();
    write_package(db.path(), "gcc-libs", "13.2.1-5", &["glibc>=2.27"]);

    pacroots()
        .arg("--db")
        .arg(db.path())
        .arg("records")
        .assert()
        .success()
        .stdout("[{\"package_name\":\"gcc-libs\",\"dependencies\":[\"glibc\"]}]\n");
}

#[test]
fn test_records_limit() {
    let db = tempdir().unwrap();
    create_db(db.path());

    let output = pacroots()
        .arg("--db")
        .arg(db.path())
        .args(["records", "--limit", "2"])
        .output()
        .unwrap();

    assert!(output.status.success());
    let records: Vec<serde_json::Value> = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(records.len(), 2);
}

#[test]
fn test_records_zero_limit_prints_all() {
    let db = tempdir().unwrap();
    create_db(db.path());

    let output = pacroots()
        .arg("--db")
        .arg(db.path())
        .args(["records", "--limit", "0"])
        .output()
        .unwrap();

    assert!(output.status.success());
    let records: Vec<serde_json::Value> = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(records.len(), 6);
}

#[test]
fn test_playbook_end_to_end() {
    let db = tempdir().unwrap();
    create_db(db.path());
    let out_dir = tempdir().unwrap();
    let playbook = out_dir.path().join("site.yml");

    pacroots()
        .arg("--db")
        .arg(db.path())
        .arg("--output")
        .arg(&playbook)
        .arg("playbook")
        .assert()
        .success();

    let content = std::fs::read_to_string(&playbook).unwrap();
    assert!(content.starts_with("---\n"));
    assert!(content.contains("name: \"bash\""));
    assert!(content.contains("name: \"vim\""));
    assert!(!content.contains("name: \"glibc\""));
    assert_eq!(content.matches("state: present").count(), 2);
    assert!(!out_dir.path().join("site.yml.tmp").exists());
}

#[test]
fn test_missing_db_is_configuration_error() {
    pacroots()
        .arg("roots")
        .assert()
        .failure()
        .stderr(predicates::str::contains("metadata root not set"));
}

#[test]
fn test_playbook_missing_output_is_configuration_error() {
    let db = tempdir().unwrap();
    create_db(db.path());

    pacroots()
        .arg("--db")
        .arg(db.path())
        .arg("playbook")
        .assert()
        .failure()
        .stderr(predicates::str::contains("output file not set"));
}

#[test]
fn test_watch_missing_output_is_configuration_error() {
    let db = tempdir().unwrap();

    pacroots()
        .arg("--db")
        .arg(db.path())
        .arg("watch")
        .assert()
        .failure()
        .stderr(predicates::str::contains("output file not set"));
}

#[test]
fn test_malformed_record_fails_whole_scan() {
    let db = tempdir().unwrap();
    create_db(db.path());
    let broken = db.path().join("broken-1.0-1");
    std::fs::create_dir_all(&broken).unwrap();
    std::fs::write(broken.join("desc"), "%VERSION%\n1.0-1\n\n").unwrap();

    pacroots()
        .arg("--db")
        .arg(db.path())
        .arg("roots")
        .assert()
        .failure()
        .stdout("")
        .stderr(predicates::str::contains("missing name section"));
}

#[test]
fn test_missing_db_directory_fails() {
    let dir = tempdir().unwrap();

    pacroots()
        .arg("--db")
        .arg(dir.path().join("nope"))
        .arg("roots")
        .assert()
        .failure()
        .stderr(predicates::str::contains("I/O error"));
}
