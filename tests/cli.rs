use std::process::Command;

#[test]
fn empty_selection_is_reported_once_with_failure_status() {
    let src = tempfile::tempdir().unwrap();
    let out = tempfile::tempdir().unwrap();
    let target = out.path().join("out");

    let result = Command::new(env!("CARGO_BIN_EXE_image_convert"))
        .arg(src.path())
        .arg("-o")
        .arg(&target)
        .output()
        .unwrap();

    assert!(!result.status.success());
    let stderr = String::from_utf8_lossy(&result.stderr);
    assert_eq!(stderr.matches("Please select an image.").count(), 1);
    assert!(!stderr.contains("Error: Please select"));
    assert!(!target.exists());
}
