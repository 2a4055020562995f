//! `quiet` silences `@warn` output from stylesheets.
//!
//! The compiler writes `@warn` messages straight to stderr, so each case
//! re-runs this test binary and inspects the child's stderr.

use std::process::Command;

use sass_stream::{FileInfo, Options, SassStreamer, Streamer};

const CHILD_ENV: &str = "SASS_STREAM_WARN_CHILD";
const MARKER: &str = "stylesheet-warning-7f3a";

/// Compiles a stylesheet containing `@warn`. Does nothing unless spawned by
/// [`stderr_of_child`].
#[test]
fn warn_output_child() {
    let Ok(mode) = std::env::var(CHILD_ENV) else {
        return;
    };
    let options = Options {
        quiet: mode == "quiet",
        ..Options::default()
    };
    let mut stage = SassStreamer::new(options);
    let fi = FileInfo::new("warn.scss");

    let source = format!("@warn \"{MARKER}\";\na {{ b: c; }}\n");
    stage.stream(Some(&fi), Some(source.into_bytes())).unwrap();
    let out = stage.stream(Some(&fi), None).unwrap();
    assert_eq!(out.chunk(), Some(&b"a {\n  b: c; }\n"[..]));
}

fn stderr_of_child(mode: &str) -> String {
    let output = Command::new(std::env::current_exe().unwrap())
        .args(["warn_output_child", "--exact", "--nocapture", "--test-threads=1"])
        .env(CHILD_ENV, mode)
        .output()
        .unwrap();
    assert!(
        output.status.success(),
        "child failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    String::from_utf8_lossy(&output.stderr).into_owned()
}

#[test]
fn warnings_are_printed_by_default() {
    let stderr = stderr_of_child("loud");
    assert!(stderr.contains(MARKER), "expected the @warn message in: {stderr}");
}

#[test]
fn quiet_suppresses_warnings() {
    let stderr = stderr_of_child("quiet");
    assert!(!stderr.contains(MARKER), "@warn leaked through quiet: {stderr}");
}
