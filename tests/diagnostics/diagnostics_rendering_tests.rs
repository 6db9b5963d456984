//! Black-box `Engine` behavior: the monotone error flag, the orphan-Note
//! contract, and colors toggling (spec §4.2).

use choir::diagnostics::{Diagnostic, Engine, SourceLookup};
use choir::location::Location;

struct FakeSource;
impl SourceLookup for FakeSource {
    fn file_display_name(&self, _: u16) -> Option<String> {
        Some("a.laye".into())
    }
    fn file_text(&self, _: u16) -> Option<String> {
        Some("import foo;\n".into())
    }
}

#[test]
fn fresh_engine_has_not_errored() {
    let engine = Engine::new(10, false);
    assert!(!engine.errored());
}

#[test]
fn warnings_and_notes_do_not_set_the_error_flag_on_their_own() {
    let engine = Engine::new(10, false);
    engine.report(&Diagnostic::warning(Location::new(0, 1, 0), "heads up"), &FakeSource);
    assert!(!engine.errored());
}

#[test]
fn an_error_sets_the_flag_and_it_never_clears() {
    let engine = Engine::new(10, false);
    engine.report(&Diagnostic::error(Location::new(0, 1, 0), "bad"), &FakeSource);
    assert!(engine.errored());
    engine.report(&Diagnostic::note(Location::new(0, 1, 0), "see also"), &FakeSource);
    assert!(engine.errored());
}

#[test]
fn ice_also_sets_the_error_flag() {
    let engine = Engine::new(10, false);
    engine.report(&Diagnostic::ice(Location::new(0, 1, 0), "unreachable state"), &FakeSource);
    assert!(engine.errored());
}

#[test]
#[should_panic(expected = "orphan Note")]
fn a_note_with_no_preceding_diagnostic_is_a_programming_error() {
    let engine = Engine::new(10, false);
    engine.report(&Diagnostic::note(Location::new(0, 1, 0), "dangling"), &FakeSource);
}

#[test]
fn invalid_location_diagnostics_still_render_without_source_text() {
    let engine = Engine::new(10, false);
    engine.report(&Diagnostic::error(Location::INVALID, "whole-file problem"), &FakeSource);
    assert!(engine.errored());
}

#[test]
fn missing_source_text_falls_back_to_a_bare_message() {
    struct NameOnly;
    impl SourceLookup for NameOnly {
        fn file_display_name(&self, _: u16) -> Option<String> {
            Some("a.laye".into())
        }
        fn file_text(&self, _: u16) -> Option<String> {
            None
        }
    }
    let engine = Engine::new(10, false);
    engine.report(&Diagnostic::error(Location::new(0, 1, 0), "bad"), &NameOnly);
    assert!(engine.errored());
}
