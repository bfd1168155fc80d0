//! Shared fixtures for integration tests.
//!
//! The fake compiler is written once per test binary, before any test spawns
//! a process, so no child can inherit a write handle to it.

#![allow(dead_code)]

use std::path::{Path, PathBuf};
use std::sync::OnceLock;

/// Prints its arguments, working directory and `FAKE_MARKER`, writes one line
/// to stderr and exits with `FAKE_EXIT` (default 0).
const FAKE_COMPILER: &str = r#"#!/bin/sh
for arg in "$@"; do
  echo "arg:$arg"
done
echo "cwd:$(pwd)"
echo "marker:${FAKE_MARKER}"
echo "warning from stderr" >&2
exit "${FAKE_EXIT:-0}"
"#;

/// Directory holding the fake compiler as both `makensis` and `makensis.exe`.
pub fn fixture_dir() -> &'static Path {
    static DIR: OnceLock<PathBuf> = OnceLock::new();
    DIR.get_or_init(|| {
        let dir = tempfile::Builder::new()
            .prefix("nsis-step-fixture")
            .tempdir()
            .expect("create fixture dir")
            .keep();
        for name in ["makensis", "makensis.exe"] {
            write_executable(&dir.join(name), FAKE_COMPILER);
        }
        dir
    })
}

/// Path of the fake compiler.
pub fn fake_compiler() -> PathBuf {
    fixture_dir().join("makensis")
}

#[cfg(unix)]
fn write_executable(path: &Path, contents: &str) {
    use std::os::unix::fs::PermissionsExt;

    std::fs::write(path, contents).expect("write fake compiler");
    let mut perms = std::fs::metadata(path).expect("stat fake compiler").permissions();
    perms.set_mode(0o755);
    std::fs::set_permissions(path, perms).expect("chmod fake compiler");
}

#[cfg(not(unix))]
fn write_executable(path: &Path, contents: &str) {
    std::fs::write(path, contents).expect("write fake compiler");
}
