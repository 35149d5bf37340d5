use std::{fs, path::PathBuf};

use tempfile::tempdir;

use breadboard_cli::{Args, run};

/// Collects all .json files from a directory
fn collect_json_files(dir: PathBuf) -> Vec<PathBuf> {
    let mut files = if let Ok(entries) = fs::read_dir(&dir) {
        entries
            .flatten()
            .map(|entry| entry.path())
            .filter(|path| {
                path.is_file() && path.extension().and_then(|s| s.to_str()) == Some("json")
            })
            .collect()
    } else {
        Vec::new()
    };

    // Sort for consistent test output
    files.sort();
    files
}

fn demos_dir() -> PathBuf {
    // Demos are at the workspace root, relative to the workspace not the crate
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .parent()
        .unwrap()
        .parent()
        .unwrap()
        .join("demos")
}

#[tokio::test]
async fn e2e_smoke_test_demo_netlists() {
    // Create a temporary directory for test outputs
    let temp_dir = tempdir().expect("Failed to create temp directory");

    let demo_netlists = collect_json_files(demos_dir());
    assert!(
        !demo_netlists.is_empty(),
        "No demo netlists found in demos/"
    );

    let mut failed_netlists = Vec::new();

    for netlist_path in &demo_netlists {
        let output_filename = format!(
            "{}.svg",
            netlist_path.file_stem().unwrap().to_string_lossy()
        );
        let output_path = temp_dir.path().join(output_filename);

        let args = Args {
            input: netlist_path.to_string_lossy().to_string(),
            output: output_path.to_string_lossy().to_string(),
            config: None,
            log_level: "off".to_string(),
        };

        if let Err(e) = run(&args).await {
            failed_netlists.push((netlist_path.clone(), e));
            continue;
        }

        let svg = fs::read_to_string(&output_path).expect("output file should exist");
        assert!(
            svg.starts_with("<svg"),
            "{} did not produce an SVG document",
            netlist_path.display()
        );
    }

    if !failed_netlists.is_empty() {
        eprintln!("\nDemo netlists that failed:");
        for (path, err) in &failed_netlists {
            eprintln!("  - {}: {}", path.display(), err);
        }
        panic!(
            "{} demo netlist(s) failed unexpectedly",
            failed_netlists.len()
        );
    }
}

#[tokio::test]
async fn e2e_missing_input_file_is_an_error() {
    let temp_dir = tempdir().expect("Failed to create temp directory");

    let args = Args {
        input: temp_dir
            .path()
            .join("does_not_exist.json")
            .to_string_lossy()
            .to_string(),
        output: temp_dir.path().join("out.svg").to_string_lossy().to_string(),
        config: None,
        log_level: "off".to_string(),
    };

    assert!(run(&args).await.is_err());
}

#[tokio::test]
async fn e2e_malformed_netlist_is_an_error() {
    let temp_dir = tempdir().expect("Failed to create temp directory");

    let input_path = temp_dir.path().join("broken.json");
    fs::write(&input_path, "{ \"components\": [] }").expect("write input");

    let args = Args {
        input: input_path.to_string_lossy().to_string(),
        output: temp_dir.path().join("out.svg").to_string_lossy().to_string(),
        config: None,
        log_level: "off".to_string(),
    };

    // Missing "nets" is malformed input; the build must fail, not render a
    // partial schematic.
    assert!(run(&args).await.is_err());
}
