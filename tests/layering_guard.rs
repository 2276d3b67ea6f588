//! Layering guardrails to keep `dashcheck_core` free of I/O and engine dependencies.
//!
//! The core crate holds the pure text transforms. The JavaScript engine, serde and the CLI stack belong to the
//! `dashcheck` crate. This test scans `crates/dashcheck_core/Cargo.toml` and fails if any of them shows up in
//! its `[dependencies]`.

const FORBIDDEN_IN_CORE: &[&str] = &[
    "boa_engine",
    "serde",
    "serde_json",
    "clap",
    "miette",
    "tracing",
    "tracing-subscriber",
];

fn dependency_names(manifest: &str) -> Vec<String> {
    let mut in_dependencies = false;
    let mut names = Vec::new();

    for raw_line in manifest.lines() {
        let line = raw_line.trim();
        // Track when we enter/exit the `[dependencies]` table.
        if line.starts_with('[') {
            in_dependencies = line == "[dependencies]";
            continue;
        }

        if !in_dependencies || line.is_empty() || line.starts_with('#') {
            continue;
        }

        // Strip inline comments for robustness.
        let line_no_comment = line.split('#').next().unwrap_or("").trim();
        if let Some((name, _)) = line_no_comment.split_once('=') {
            names.push(name.trim().to_string());
        }
    }
    names
}

#[test]
fn core_does_not_depend_on_engine_or_cli_stack() {
    let manifest = include_str!("../crates/dashcheck_core/Cargo.toml");
    let names = dependency_names(manifest);
    assert!(!names.is_empty(), "expected core to declare its dependencies");

    for name in names {
        if FORBIDDEN_IN_CORE.contains(&name.as_str()) {
            panic!("`{name}` must not appear in dashcheck_core [dependencies]; keep it in the dashcheck crate");
        }
    }
}

#[test]
fn core_is_a_path_dependency_of_the_cli() {
    let manifest = include_str!("../Cargo.toml");
    assert!(
        dependency_names(manifest).iter().any(|n| n == "dashcheck_core"),
        "dashcheck must depend on dashcheck_core"
    );
}
