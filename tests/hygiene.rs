//! Hygiene — enforces coding standards at test time
//!
//! These tests scan the production sources of `portfolio-chat` and the
//! `responder` crate for antipatterns. Each has a budget of zero; test files
//! (`*_test.rs`) are exempt.

use std::fs;
use std::path::Path;

const SOURCE_ROOTS: [&str; 2] = ["src", "responder/src"];

struct SourceFile {
    path: String,
    content: String,
}

fn source_files() -> Vec<SourceFile> {
    let mut files = Vec::new();
    for root in SOURCE_ROOTS {
        collect_rs_files(Path::new(root), &mut files);
    }
    files
}

fn collect_rs_files(dir: &Path, out: &mut Vec<SourceFile>) {
    let Ok(entries) = fs::read_dir(dir) else {
        return;
    };
    for entry in entries.flatten() {
        let path = entry.path();
        if path.is_dir() {
            collect_rs_files(&path, out);
        } else if path.extension().is_some_and(|e| e == "rs") {
            let path_str = path.to_string_lossy().to_string();
            if path_str.ends_with("_test.rs") {
                continue;
            }
            if let Ok(content) = fs::read_to_string(&path) {
                out.push(SourceFile { path: path_str, content });
            }
        }
    }
}

fn hits(pattern: &str) -> Vec<(String, usize)> {
    source_files()
        .iter()
        .filter_map(|file| {
            let count = file
                .content
                .lines()
                .filter(|line| line.contains(pattern))
                .count();
            (count > 0).then(|| (file.path.clone(), count))
        })
        .collect()
}

fn assert_absent(pattern: &str) {
    let found = hits(pattern);
    let listing = found
        .iter()
        .map(|(path, count)| format!("  {path}: {count}"))
        .collect::<Vec<_>>()
        .join("\n");
    assert!(found.is_empty(), "{pattern} is not allowed in production code:\n{listing}");
}

#[test]
fn sources_are_found() {
    let files = source_files();
    assert!(files.iter().any(|f| f.path.ends_with("session.rs")));
    assert!(files.iter().any(|f| f.path.ends_with("lib.rs") && f.path.contains("responder")));
}

// Panics — these crash the process.

#[test]
fn no_unwrap() {
    assert_absent(".unwrap()");
}

#[test]
fn no_expect() {
    assert_absent(".expect(");
}

#[test]
fn no_panic() {
    assert_absent("panic!(");
}

#[test]
fn no_todo_or_unimplemented() {
    assert_absent("todo!(");
    assert_absent("unimplemented!(");
}

#[test]
fn no_unreachable() {
    assert_absent("unreachable!(");
}

// Silent loss — discards errors without inspecting.

#[test]
fn no_silent_discard() {
    assert_absent("let _ =");
}

#[test]
fn no_dot_ok() {
    assert_absent(".ok()");
}

// Latency goes through `Delay` so tests can control the clock.

#[test]
fn no_wall_clock_sleeps() {
    assert_absent("thread::sleep");
}

#[test]
fn no_allow_dead_code() {
    assert_absent("#[allow(dead_code)]");
}
