//! Thread-safe diagnostics engine.
//!
//! Grounded in `original_source/choir/lib/core/Diagnostics.cc`
//! (`StreamingDiagnosticsEngine::report_impl`) for the rendering algorithm —
//! tab-expand-then-measure, the error-limit throttle, the blank-line
//! separation between non-Note diagnostics — and in the donor's
//! `src/syntax/diagnostics/diagnostic.rs` builder-style `make_error` /
//! `make_warning` / `make_note` constructors and `src/syntax/diagnostics/
//! rendering/colors.rs` for the `Colors` shape (extended in [`colors`]).
//!
//! The engine deliberately does not depend on [`crate::context::Context`] —
//! `Context` depends on `Engine` (it stores one), so the dependency runs the
//! other way: callers resolve a file's name/text through [`SourceLookup`] and
//! hand it to [`Engine::report`]. `Context` implements `SourceLookup`.

pub mod colors;

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

use unicode_width::UnicodeWidthChar;

use crate::location::{self, Location};
use colors::Colors;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    Note,
    Warning,
    Error,
    Ice,
}

impl Level {
    fn name(self) -> &'static str {
        match self {
            Level::Note => "note",
            Level::Warning => "warning",
            Level::Error => "error",
            Level::Ice => "internal compiler error",
        }
    }
}

#[derive(Debug, Clone)]
pub struct Diagnostic {
    pub level: Level,
    pub location: Location,
    pub message: String,
}

impl Diagnostic {
    pub fn note(location: Location, message: impl Into<String>) -> Self {
        Diagnostic {
            level: Level::Note,
            location,
            message: message.into(),
        }
    }

    pub fn warning(location: Location, message: impl Into<String>) -> Self {
        Diagnostic {
            level: Level::Warning,
            location,
            message: message.into(),
        }
    }

    pub fn error(location: Location, message: impl Into<String>) -> Self {
        Diagnostic {
            level: Level::Error,
            location,
            message: message.into(),
        }
    }

    pub fn ice(location: Location, message: impl Into<String>) -> Self {
        Diagnostic {
            level: Level::Ice,
            location,
            message: message.into(),
        }
    }
}

/// Resolves a `file_id` to the information the engine needs to render a
/// source-anchored diagnostic, without the engine depending on
/// [`crate::context::Context`] directly.
pub trait SourceLookup {
    fn file_display_name(&self, file_id: u16) -> Option<String>;
    fn file_text(&self, file_id: u16) -> Option<String>;
}

/// One-way throttle state machine (spec §4.2): `Open -> Throttled`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ThrottleState {
    Open,
    Throttled,
}

struct EngineState {
    printed: u32,
    throttle: ThrottleState,
    /// Whether the most recently rendered diagnostic was a Note, used to
    /// assert the "a Note always attaches to its antecedent" invariant.
    last_was_non_note: bool,
}

pub struct Engine {
    state: Mutex<EngineState>,
    errored: AtomicBool,
    error_limit: u32,
    use_colors: bool,
}

impl Engine {
    pub fn new(error_limit: u32, use_colors: bool) -> Self {
        Engine {
            state: Mutex::new(EngineState {
                printed: 0,
                throttle: ThrottleState::Open,
                last_was_non_note: false,
            }),
            errored: AtomicBool::new(false),
            error_limit,
            use_colors,
        }
    }

    /// True once any `Error` or `Ice` diagnostic has ever been reported
    /// (Invariant I5: monotone, never clears).
    pub fn errored(&self) -> bool {
        self.errored.load(Ordering::Acquire)
    }

    /// Renders and accounts for one diagnostic. A `Note` reported with no
    /// preceding non-Note diagnostic in this engine's lifetime is a
    /// programming error (spec: "the engine must never emit an orphan
    /// Note").
    pub fn report(&self, diag: &Diagnostic, lookup: &dyn SourceLookup) {
        if matches!(diag.level, Level::Error | Level::Ice) {
            self.errored.store(true, Ordering::Release);
        }

        let mut state = self.state.lock().expect("diagnostics engine lock poisoned");

        if diag.level == Level::Note {
            assert!(
                state.last_was_non_note,
                "orphan Note: no preceding non-Note diagnostic"
            );
        }

        if state.throttle == ThrottleState::Throttled {
            return;
        }

        if self.error_limit > 0 && state.printed >= self.error_limit {
            self.render_throttle_notice(state.printed);
            state.throttle = ThrottleState::Throttled;
            return;
        }

        if state.printed != 0 && diag.level != Level::Note {
            println!();
        }

        self.render(diag, lookup);
        state.printed += 1;
        state.last_was_non_note = diag.level != Level::Note;
    }

    fn render_throttle_notice(&self, printed: u32) {
        let colors = Colors::new(self.use_colors);
        println!();
        println!(
            "{bold}{red}error:{reset} too many errors emitted ({printed} so far); stopping.",
            bold = colors.bold,
            red = colors.red,
            reset = colors.reset,
            printed = printed,
        );
        println!(
            "{bold}{green}note:{reset} use --error-limit=0 to disable this limit",
            bold = colors.bold,
            green = colors.green,
            reset = colors.reset,
        );
    }

    fn render(&self, diag: &Diagnostic, lookup: &dyn SourceLookup) {
        let colors = Colors::new(self.use_colors);

        if !diag.location.is_valid() {
            let prefix = lookup
                .file_display_name(diag.location.file_id)
                .map(|name| format!("{name}: "))
                .unwrap_or_default();
            println!("{prefix}{}: {}", diag.level.name(), diag.message);
            return;
        }

        let Some(file_name) = lookup.file_display_name(diag.location.file_id) else {
            println!("{}: {}", diag.level.name(), diag.message);
            return;
        };
        let Some(file_text) = lookup.file_text(diag.location.file_id) else {
            println!("{file_name}: {}: {}", diag.level.name(), diag.message);
            return;
        };

        let info = location::seek(&file_text, diag.location.pos);
        let line_text = &file_text[info.line_start as usize..info.line_end as usize];

        let split_at = (diag.location.pos - info.line_start) as usize;
        let range_end = ((diag.location.end()).min(info.line_end) - info.line_start) as usize;

        let before_raw = &line_text[..split_at.min(line_text.len())];
        let range_raw = &line_text[split_at.min(line_text.len())..range_end.min(line_text.len())];
        let after_raw = &line_text[range_end.min(line_text.len())..];

        // Expand tabs before measuring, never the other way around (spec
        // §4.2: "do not offset positions by tab expansion after the fact").
        let before = before_raw.replace('\t', "    ");
        let range = range_raw.replace('\t', "    ");
        let after = after_raw.replace('\t', "    ");

        let color = colors.for_level(diag.level);

        println!(
            "{bold}{file}:{line}:{col}: {color}{level}:{reset} {bold}{msg}{reset}",
            bold = colors.bold,
            file = file_name,
            line = info.line,
            col = info.col,
            color = color,
            level = diag.level.name(),
            reset = colors.reset,
            msg = diag.message,
        );

        println!(
            " {line} | {before}{bold}{color}{range}{reset}{after}",
            line = info.line,
            before = before,
            bold = colors.bold,
            color = color,
            range = range,
            reset = colors.reset,
            after = after,
        );

        let digits = digit_count(info.line);
        let leading = digits + column_width(&before) + "  | ".len();
        let underline_len = column_width(&range).max(1);

        println!("{}{}", " ".repeat(leading), "~".repeat(underline_len));
    }
}

fn digit_count(mut n: u32) -> usize {
    if n == 0 {
        return 1;
    }
    let mut count = 0;
    while n > 0 {
        count += 1;
        n /= 10;
    }
    count
}

/// Unicode column width, clamping non-printable characters to width 0 (spec
/// §4.2 point 4), mirroring the clamp the original engine applies around
/// LLVM's `columnWidthUTF8` (which itself returns -1 for such characters).
pub fn column_width(s: &str) -> usize {
    s.chars().map(|c| UnicodeWidthChar::width(c).unwrap_or(0)).sum()
}
