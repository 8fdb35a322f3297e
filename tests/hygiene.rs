//! Hygiene: enforces coding standards at test time
//!
//! Scans `src/` for antipatterns. Every check has a budget; when a budget is
//! above zero the overage message lists where the current hits live. Lower
//! a budget when you remove a hit, never raise it to fit new code.
#![allow(clippy::absurd_extreme_comparisons)]

use std::fs;
use std::path::Path;

struct SourceFile {
    path: String,
    content: String,
}

impl SourceFile {
    fn name(&self) -> &str {
        Path::new(&self.path)
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or_default()
    }

    fn is_test(&self) -> bool {
        self.path.ends_with("_test.rs")
    }

    fn hits(&self, pattern: &str) -> usize {
        self.content.lines().filter(|line| line.contains(pattern)).count()
    }
}

fn all_files() -> Vec<SourceFile> {
    let mut files = Vec::new();
    let Ok(entries) = fs::read_dir("src") else {
        return files;
    };
    for entry in entries.flatten() {
        let path = entry.path();
        if path.extension().is_some_and(|e| e == "rs") {
            if let Ok(content) = fs::read_to_string(&path) {
                files.push(SourceFile { path: path.to_string_lossy().to_string(), content });
            }
        }
    }
    files.sort_by(|a, b| a.path.cmp(&b.path));
    files
}

fn production_files() -> Vec<SourceFile> {
    all_files().into_iter().filter(|f| !f.is_test()).collect()
}

/// Count `pattern` across `files`, skipping any file named in `exempt`.
fn scan(files: &[SourceFile], pattern: &str, exempt: &[&str]) -> Vec<(String, usize)> {
    files
        .iter()
        .filter(|f| !exempt.contains(&f.name()))
        .filter_map(|f| {
            let count = f.hits(pattern);
            (count > 0).then(|| (f.path.clone(), count))
        })
        .collect()
}

fn enforce(label: &str, hits: &[(String, usize)], max: usize) {
    let count: usize = hits.iter().map(|(_, c)| c).sum();
    let listing = hits
        .iter()
        .map(|(path, c)| format!("  {path}: {c}"))
        .collect::<Vec<_>>()
        .join("\n");
    assert!(count <= max, "{label} budget exceeded: found {count}, max {max}.\n{listing}");
}

// =============================================================
// Panics
// =============================================================

#[test]
fn no_panicking_calls_in_production_code() {
    let files = production_files();
    for pattern in [".unwrap()", ".expect(", "panic!(", "unreachable!(", "todo!(", "unimplemented!("] {
        enforce(pattern, &scan(&files, pattern, &[]), 0);
    }
}

// =============================================================
// Silent loss
// =============================================================

#[test]
fn silent_discard_budget() {
    enforce("let _ =", &scan(&production_files(), "let _ =", &[]), 0);
}

#[test]
fn dot_ok_budget() {
    // Optional DOM/storage lookups only; every other JS error is logged.
    enforce(".ok()", &scan(&production_files(), ".ok()", &[]), MAX_DOT_OK);
}

const MAX_DOT_OK: usize = 14;

#[test]
fn allow_dead_code_budget() {
    enforce("#[allow(dead_code)]", &scan(&production_files(), "#[allow(dead_code)]", &[]), 0);
}

// =============================================================
// Browser glue
// =============================================================

#[test]
fn leaked_closures_budget() {
    // One per listener helper, the observer callback, and the frame callback.
    enforce(".forget()", &scan(&production_files(), ".forget()", &[]), 4);
}

#[test]
fn window_lookups_go_through_dom_helpers() {
    enforce("web_sys::window()", &scan(&production_files(), "web_sys::window()", &["dom.rs"]), 0);
}

#[test]
fn presentation_classes_live_in_consts() {
    let files = production_files();
    for class in ["dark-mode", "scrolled", "nav-active", "no-scroll", "fade-in", "flipped", "parallax-layer"] {
        let quoted = format!("\"{class}\"");
        enforce(&quoted, &scan(&files, &quoted, &["consts.rs"]), 0);
    }
}

// =============================================================
// Test wiring
// =============================================================

#[test]
fn every_test_file_is_wired_into_its_module() {
    let files = all_files();
    for test_file in files.iter().filter(|f| f.is_test()) {
        let module = test_file.name().trim_end_matches("_test.rs");
        let owner = files.iter().find(|f| f.name() == format!("{module}.rs"));
        let wired = owner.is_some_and(|f| f.content.contains(&format!("#[path = \"{}\"]", test_file.name())));
        assert!(wired, "{} is not included by {module}.rs", test_file.path);
    }
}
