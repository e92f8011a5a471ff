use std::fs;
use std::path::Path;
use std::process::Command;

fn write_grid_csv(path: &Path, skip_last: bool) {
    let mut csv = String::from("label,g,t,latents\n");
    for label in ["riot", "fuzz", "kingoftone"] {
        for g in (0..=10).step_by(2) {
            for t in (0..=10).step_by(2) {
                if skip_last && label == "kingoftone" && g == 10 && t == 10 {
                    continue;
                }
                let values: Vec<String> = (0..8).map(|i| format!("{}.{}", g + t, i)).collect();
                csv.push_str(&format!("{label},{g},{t},\"[{}]\"\n", values.join(", ")));
            }
        }
    }
    fs::write(path, csv).unwrap();
}

#[test]
fn compiles_header_and_reruns_identically() {
    let exe = env!("CARGO_BIN_EXE_latent_compiler");
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("latents.csv");
    let output = dir.path().join("VAEdataframe.h");
    write_grid_csv(&input, false);

    let run = || {
        Command::new(exe)
            .args([
                "--input",
                input.to_str().unwrap(),
                "--output",
                output.to_str().unwrap(),
                "--strict",
            ])
            .status()
            .expect("compile failed")
    };

    assert!(run().success());
    let first = fs::read(&output).unwrap();
    assert!(run().success());
    let second = fs::read(&output).unwrap();
    assert_eq!(first, second);

    let text = String::from_utf8(first).unwrap();
    assert!(text.contains("class VAELatentDataFrame"));
    assert!(text.contains("{20.0f,20.1f,20.2f,20.3f,20.4f,20.5f,20.6f,20.7f}, // Tone 10"));
}

#[test]
fn strict_mode_reports_missing_cells() {
    let exe = env!("CARGO_BIN_EXE_latent_compiler");
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("latents.csv");
    let output = dir.path().join("out.h");
    write_grid_csv(&input, true);

    let out = Command::new(exe)
        .args([
            "--input",
            input.to_str().unwrap(),
            "--output",
            output.to_str().unwrap(),
            "--strict",
        ])
        .output()
        .expect("run failed");
    assert!(!out.status.success());
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(stderr.contains("kingoftone gain=10 tone=10"));
    assert!(!output.exists());

    let out = Command::new(exe)
        .args([
            "--input",
            input.to_str().unwrap(),
            "--output",
            output.to_str().unwrap(),
            "--json",
        ])
        .output()
        .expect("run failed");
    assert!(out.status.success());
    let summary: serde_json::Value = serde_json::from_slice(&out.stdout).unwrap();
    assert_eq!(summary["missing_cells"], 1);
    assert_eq!(summary["populated_cells"], 107);
}

#[test]
fn short_vector_is_fatal() {
    let exe = env!("CARGO_BIN_EXE_latent_compiler");
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("latents.csv");
    let output = dir.path().join("out.h");
    fs::write(&input, "label,g,t,latents\nriot,0,0,\"[1,2,3,4,5,6,7]\"\n").unwrap();

    let out = Command::new(exe)
        .args(["--input", input.to_str().unwrap(), "--output", output.to_str().unwrap()])
        .output()
        .expect("run failed");
    assert!(!out.status.success());
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(stderr.contains("latent vector must have 8 elements, found 7"));
    assert!(!output.exists());
}

#[test]
fn missing_input_names_the_file() {
    let exe = env!("CARGO_BIN_EXE_latent_compiler");
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("nope.csv");
    let output = dir.path().join("out.h");

    let out = Command::new(exe)
        .args(["--input", input.to_str().unwrap(), "--output", output.to_str().unwrap()])
        .output()
        .expect("run failed");
    assert!(!out.status.success());
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(stderr.contains("nope.csv"));
    assert!(stderr.contains("does not exist"));
}

#[test]
fn rust_log_debug_shows_overwritten_cells() {
    let exe = env!("CARGO_BIN_EXE_latent_compiler");
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("latents.csv");
    let output = dir.path().join("out.h");
    fs::write(
        &input,
        "label,g,t,latents\n\
         riot,0,0,\"[1,1,1,1,1,1,1,1]\"\n\
         riot,0,0,\"[2,2,2,2,2,2,2,2]\"\n",
    )
    .unwrap();

    let run = |rust_log: Option<&str>| {
        let mut cmd = Command::new(exe);
        cmd.args(["--input", input.to_str().unwrap(), "--output", output.to_str().unwrap()]);
        match rust_log {
            Some(level) => cmd.env("RUST_LOG", level),
            None => cmd.env_remove("RUST_LOG"),
        };
        let out = cmd.output().expect("run failed");
        assert!(out.status.success());
        String::from_utf8_lossy(&out.stderr).into_owned()
    };

    assert!(run(Some("debug")).contains("overwriting latent cell"));
    let default = run(None);
    assert!(!default.contains("overwriting latent cell"));
    assert!(default.contains("latent table incomplete"));
}
