//! Blocking calls must never reach the event loop
//!
//! The browser dispatches every key, resize and fetch result on one task.
//! A blocking sleep or a blocking HTTP call there freezes the whole UI.

use architectural_enforcement::{scan_dir, workspace_root, BLOCKING_PATTERNS, SOURCE_DIRS};

#[test]
fn test_no_blocking_calls_in_production_code() {
    let root = workspace_root();
    let mut violations = Vec::new();

    for dir in SOURCE_DIRS {
        let path = root.join(dir);
        assert!(path.is_dir(), "missing source dir {}", path.display());
        violations.extend(scan_dir(&path, BLOCKING_PATTERNS).expect("source tree readable"));
    }

    let report: Vec<String> = violations
        .iter()
        .map(|v| format!("{}:{}: `{}` in `{}`", v.path.display(), v.line, v.pattern, v.text))
        .collect();
    assert!(report.is_empty(), "blocking calls found:\n{}", report.join("\n"));
}
