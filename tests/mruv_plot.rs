use assert_cmd::Command;
use std::fs;

#[test]
fn mruv_plot_renders_worked_problem() {
    let dir = tempfile::tempdir().expect("tempdir");
    let png_path = dir.path().join("plots").join("problem.png");

    Command::cargo_bin("mruv_plot")
        .expect("mruv_plot bin")
        .args([
            "--problem",
            "2",
            "--output",
            png_path.to_str().unwrap(),
            "--width",
            "400",
            "--height",
            "300",
            "--plain",
        ])
        .assert()
        .success();

    let metadata = fs::metadata(png_path).expect("png metadata");
    assert!(metadata.len() > 0, "PNG output should not be empty");
}

#[test]
fn mruv_plot_renders_sample_csv() {
    let dir = tempfile::tempdir().expect("tempdir");
    let csv_path = dir.path().join("motion.csv");
    let png_path = dir.path().join("motion.png");

    Command::cargo_bin("mruv")
        .expect("mruv bin")
        .args(["sample", "--x0", "10", "--v0", "30", "-a", "-9.8"])
        .args(["--output", csv_path.to_str().unwrap()])
        .assert()
        .success();

    Command::cargo_bin("mruv_plot")
        .expect("mruv_plot bin")
        .args([
            "--input",
            csv_path.to_str().unwrap(),
            "--highlight",
            "3.1",
            "--output",
            png_path.to_str().unwrap(),
            "--width",
            "400",
            "--height",
            "300",
            "--plain",
        ])
        .assert()
        .success();

    let metadata = fs::metadata(png_path).expect("png metadata");
    assert!(metadata.len() > 0, "PNG output should not be empty");
}

#[test]
fn mruv_plot_needs_a_source() {
    Command::cargo_bin("mruv_plot")
        .expect("mruv_plot bin")
        .args(["--plain"])
        .assert()
        .failure();
}
