use std::{fs, path::PathBuf};

use tempfile::tempdir;

use infograph_cli::{Args, CliError, run};

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

/// Demos live at the workspace root, not in the crate
fn demos_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .parent()
        .unwrap()
        .parent()
        .unwrap()
        .join("demos")
}

fn args(input: &PathBuf, output: &PathBuf) -> Args {
    Args {
        input: Some(input.to_string_lossy().to_string()),
        output: output.to_string_lossy().to_string(),
        config: None,
        template: None,
        list_templates: false,
        log_level: "off".to_string(),
    }
}

#[test]
fn e2e_smoke_test_valid_demos() {
    let temp_dir = tempdir().expect("Failed to create temp directory");

    let demos = collect_json_files(demos_path());
    assert!(!demos.is_empty(), "No demos found in demos/");

    let mut failed = Vec::new();
    for demo in &demos {
        let output_path = temp_dir
            .path()
            .join(format!("{}.svg", demo.file_stem().unwrap().to_string_lossy()));

        match run(&args(demo, &output_path)) {
            Ok(()) => {
                let svg = fs::read_to_string(&output_path).expect("Failed to read output");
                assert!(svg.contains("<svg"), "{}: output is not SVG", demo.display());
                assert!(svg.contains("viewBox"), "{}: missing viewBox", demo.display());
            }
            Err(err) => failed.push((demo.clone(), err)),
        }
    }

    if !failed.is_empty() {
        eprintln!("\nDemos that failed:");
        for (path, err) in &failed {
            eprintln!("  - {}: {}", path.display(), err);
        }
        panic!("{} demo(s) failed unexpectedly", failed.len());
    }
}

#[test]
fn e2e_smoke_test_error_demos() {
    let temp_dir = tempdir().expect("Failed to create temp directory");

    let demos = collect_json_files(demos_path().join("errors"));
    assert!(!demos.is_empty(), "No error demos found in demos/errors/");

    for demo in &demos {
        let output_path = temp_dir.path().join("out.svg");
        let result = run(&args(demo, &output_path));
        assert!(result.is_err(), "{} should fail", demo.display());
        assert!(!output_path.exists(), "{} wrote output", demo.display());
    }
}

#[test]
fn e2e_syntax_error_keeps_source() {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    let input = demos_path().join("errors").join("trailing_comma.json");
    let output = temp_dir.path().join("out.svg");

    let err = run(&args(&input, &output)).unwrap_err();
    match err {
        CliError::Document { src, .. } => assert!(src.contains("\"One\" },]")),
        other => panic!("Expected a document error, got {other}"),
    }
}

#[test]
fn e2e_template_flag_fills_missing_template() {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    let input = temp_dir.path().join("bare.json");
    fs::write(&input, r#"{ "data": { "items": [{ "label": "Solo" }] } }"#).unwrap();
    let output = temp_dir.path().join("bare.svg");

    let mut cli_args = args(&input, &output);
    assert!(run(&cli_args).is_err(), "a bare document has no design");

    cli_args.template = Some("list-row-plain-text".to_string());
    run(&cli_args).expect("Failed to render with --template");
    let svg = fs::read_to_string(&output).unwrap();
    assert!(svg.contains("Solo"));
}
