use std::process::Command;

fn storyrush(dir: &std::path::Path, args: &[&str]) -> std::process::Output {
    Command::new(env!("CARGO_BIN_EXE_storyrush"))
        .args(args)
        .current_dir(dir)
        .env_remove("CONFIG_PATH")
        .env_remove("API_URL")
        .output()
        .unwrap()
}

#[test]
fn color_prints_each_id_once_without_touching_config() {
    let dir = tempfile::tempdir().unwrap();

    let output = storyrush(dir.path(), &["color", "alice", "bob", "alice"]);
    assert!(output.status.success());

    let stdout = String::from_utf8(output.stdout).unwrap();
    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(lines, ["#809689 alice", "#b57d01 bob"]);
    assert!(!dir.path().join("config").exists());
}

#[test]
fn guest_resumes_stored_id_after_logout() {
    let dir = tempfile::tempdir().unwrap();

    assert!(storyrush(dir.path(), &["guest", "g1"]).status.success());
    assert!(storyrush(dir.path(), &["logout"]).status.success());

    let whoami = storyrush(dir.path(), &["whoami"]);
    let stdout = String::from_utf8(whoami.stdout).unwrap();
    assert!(stdout.contains("identity: anonymous"), "{stdout}");
    assert!(stdout.contains("access:   denied"), "{stdout}");

    let resumed = storyrush(dir.path(), &["guest"]);
    let stdout = String::from_utf8(resumed.stdout).unwrap();
    assert!(stdout.contains("Acting as guest g1"), "{stdout}");
}
