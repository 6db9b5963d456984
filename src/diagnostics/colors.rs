//! ANSI color codes for diagnostic rendering, respecting `NO_COLOR`.
//!
//! Kept close to the donor's `src/syntax/diagnostics/rendering/colors.rs`;
//! extended with the Magenta/Bold variants the ICE and header-wrapping rules
//! in spec §4.2 require (the donor's `Colors` only had five named colors with
//! no bold wrapper), plus Cyan/Blue for the tree printer's attribute/keyword
//! colors (spec §4.6), shared from the same struct rather than duplicated.

use std::env;

use crate::diagnostics::Level;

#[derive(Debug, Clone, Copy)]
pub struct Colors {
    pub red: &'static str,
    pub yellow: &'static str,
    pub green: &'static str,
    pub magenta: &'static str,
    pub cyan: &'static str,
    pub blue: &'static str,
    pub bold: &'static str,
    pub reset: &'static str,
}

impl Colors {
    pub fn new(enabled: bool) -> Self {
        if enabled && !colors_disabled_by_env() {
            Self::with_color()
        } else {
            Self::no_color()
        }
    }

    pub fn with_color() -> Self {
        Colors {
            red: "\u{1b}[31m",
            yellow: "\u{1b}[33m",
            green: "\u{1b}[32m",
            magenta: "\u{1b}[35m",
            cyan: "\u{1b}[36m",
            blue: "\u{1b}[34m",
            bold: "\u{1b}[1m",
            reset: "\u{1b}[0m",
        }
    }

    pub fn no_color() -> Self {
        Colors {
            red: "",
            yellow: "",
            green: "",
            magenta: "",
            cyan: "",
            blue: "",
            bold: "",
            reset: "",
        }
    }

    /// Level→color mapping from spec §4.2: Note=Green, Warning=Yellow,
    /// Error=Red, ICE=Magenta.
    pub fn for_level(&self, level: Level) -> &'static str {
        match level {
            Level::Note => self.green,
            Level::Warning => self.yellow,
            Level::Error => self.red,
            Level::Ice => self.magenta,
        }
    }
}

pub fn colors_disabled_by_env() -> bool {
    env::var("NO_COLOR").is_ok()
}
