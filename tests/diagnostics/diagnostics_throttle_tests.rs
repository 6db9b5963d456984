//! The error-limit throttle: once the limit is reached, further diagnostics
//! (including the throttle notice itself) must not panic the orphan-Note
//! assertion, and `error_limit = 0` must disable throttling entirely (spec
//! §4.2 "Error limit").

use choir::diagnostics::{Diagnostic, Engine, SourceLookup};
use choir::location::Location;

struct FakeSource;
impl SourceLookup for FakeSource {
    fn file_display_name(&self, _: u16) -> Option<String> {
        Some("a.laye".into())
    }
    fn file_text(&self, _: u16) -> Option<String> {
        Some("import foo;\nimport bar;\nimport baz;\n".into())
    }
}

#[test]
fn reporting_past_the_limit_does_not_panic() {
    let engine = Engine::new(2, false);
    for i in 0..5 {
        engine.report(&Diagnostic::error(Location::new(0, 1, 0), format!("error {i}")), &FakeSource);
    }
    assert!(engine.errored());
}

#[test]
fn a_note_reported_after_throttling_begins_does_not_panic() {
    let engine = Engine::new(1, false);
    engine.report(&Diagnostic::error(Location::new(0, 1, 0), "first"), &FakeSource);
    engine.report(&Diagnostic::error(Location::new(6, 1, 0), "second, throttled"), &FakeSource);
    // The throttle notice itself counts as non-Note, so a Note here still has
    // a non-Note antecedent and must not trip the orphan-Note assertion.
    engine.report(&Diagnostic::note(Location::new(6, 1, 0), "still attached"), &FakeSource);
    assert!(engine.errored());
}

#[test]
fn error_limit_zero_never_throttles() {
    let engine = Engine::new(0, false);
    for i in 0..50 {
        engine.report(&Diagnostic::error(Location::new(0, 1, 0), format!("error {i}")), &FakeSource);
    }
    assert!(engine.errored());
}

#[test]
fn warnings_count_toward_the_same_throttle_as_errors() {
    let engine = Engine::new(1, false);
    engine.report(&Diagnostic::warning(Location::new(0, 1, 0), "first"), &FakeSource);
    engine.report(&Diagnostic::warning(Location::new(6, 1, 0), "second"), &FakeSource);
    assert!(!engine.errored());
}
