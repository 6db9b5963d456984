//! Driver-facing configuration schema (spec §9), kept independent of the CLI
//! parsing layer so tools other than `bin/choir.rs` can build one directly
//! (e.g. a test harness wanting `verify` mode without going through `clap`).

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorMode {
    Auto,
    Always,
    Never,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Action {
    Lex,
    Parse,
    Sema,
    Compile,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FileKind {
    Laye,
    C,
    #[serde(rename = "c++")]
    Cpp,
}

impl FileKind {
    /// Looks a file kind up by its extension table entry (spec §6). Returns
    /// `None` for unknown extensions, which the CLI layer treats as an error.
    pub fn from_extension(extension: &str) -> Option<FileKind> {
        match extension {
            "laye" => Some(FileKind::Laye),
            "c" | "h" => Some(FileKind::C),
            "cpp" | "ixx" | "cc" | "ccm" => Some(FileKind::Cpp),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct Config {
    pub colors: ColorMode,
    pub error_limit: u32,
    pub verify: bool,
    pub action: Action,
    pub file_kind_override: Option<FileKind>,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            colors: ColorMode::Auto,
            error_limit: 10,
            verify: false,
            action: Action::Lex,
            file_kind_override: None,
        }
    }
}
