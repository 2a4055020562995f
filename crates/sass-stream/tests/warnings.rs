//! Warnings the SCSS stage logs, captured with a counting tracing layer

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use sass_stream::{Emit, FileInfo, Options, SassStreamer, Streamer};
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::Layer;
use tracing_subscriber::layer::{Context, SubscriberExt};

/// Counts WARN events whose `stage` field is present.
#[derive(Clone, Default)]
struct WarnCounter {
    warnings: Arc<AtomicUsize>,
}

impl WarnCounter {
    fn count(&self) -> usize {
        self.warnings.load(Ordering::SeqCst)
    }
}

impl<S: Subscriber> Layer<S> for WarnCounter {
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let has_stage = event.metadata().fields().field("stage").is_some();
        if *event.metadata().level() == Level::WARN && has_stage {
            self.warnings.fetch_add(1, Ordering::SeqCst);
        }
    }
}

fn with_counter(f: impl FnOnce()) -> usize {
    let counter = WarnCounter::default();
    let subscriber = tracing_subscriber::registry().with(counter.clone());
    tracing::subscriber::with_default(subscriber, f);
    counter.count()
}

#[test]
fn one_warning_per_sass_file() {
    let warnings = with_counter(|| {
        let mut stage = SassStreamer::new(Options::named("styles"));
        let fi = FileInfo::new("theme.sass");

        for chunk in ["a\n", "  color: red\n"] {
            let out = stage.stream(Some(&fi), Some(chunk.as_bytes().to_vec())).unwrap();
            assert_eq!(out, Emit::forward(fi.clone(), Some(chunk.as_bytes().to_vec())));
        }
        stage.stream(Some(&fi), None).unwrap();
    });
    assert_eq!(warnings, 1);
}

#[test]
fn each_sass_file_warns_once() {
    let warnings = with_counter(|| {
        let mut stage = SassStreamer::new(Options::default());
        for name in ["a.sass", "b.sass", "c.sass"] {
            let fi = FileInfo::new(name);
            stage.stream(Some(&fi), Some(b"x".to_vec())).unwrap();
            stage.stream(Some(&fi), None).unwrap();
        }
    });
    assert_eq!(warnings, 3);
}

#[test]
fn other_files_do_not_warn() {
    let warnings = with_counter(|| {
        let mut stage = SassStreamer::new(Options::default());
        for name in ["a.txt", "b.css", "c.scss"] {
            let fi = FileInfo::new(name);
            stage.stream(Some(&fi), Some(b"a { b: c; }".to_vec())).unwrap();
            stage.stream(Some(&fi), None).unwrap();
        }
    });
    assert_eq!(warnings, 0);
}

#[test]
fn discarded_buffer_warns() {
    let warnings = with_counter(|| {
        let mut stage = SassStreamer::new(Options::default());
        let first = FileInfo::new("first.scss");
        let second = FileInfo::new("second.scss");

        stage.stream(Some(&first), Some(b"a { b: c; }".to_vec())).unwrap();
        stage.stream(Some(&second), Some(b"d { e: f; }".to_vec())).unwrap();
        stage.stream(Some(&second), None).unwrap();
    });
    assert_eq!(warnings, 1);
}
