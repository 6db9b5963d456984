//! Fatal, non-recoverable error conditions surfaced at API boundaries.
//!
//! `CoreError` is distinct from [`crate::diagnostics::Diagnostic`]: a
//! `Diagnostic` is compiler *output* (what the user's program did wrong), a
//! `CoreError` is a condition the driver cannot work around (disk I/O failed,
//! the file table is full). Lexing and parsing never return `CoreError`; they
//! report diagnostics and keep going.

use std::path::PathBuf;

use thiserror::Error;

/// Fatal conditions reported by [`crate::context::Context`].
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("too many files registered (limit is {limit})")]
    TooManyFiles { limit: u32 },

    #[error("failed to read '{path}': {source}")]
    IoError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
