//! Process-wide file registry and color/diagnostics anchor.
//!
//! Grounded in `original_source/choir/src/core/Context.cpp`: an `Impl` with a
//! recursive mutex guarding the file vector and path map, a `files_by_path`
//! map for dedup-by-canonical-path, dense `file_id` assignment equal to the
//! vector's length at insertion time, and atomics for the color flag. Rust's
//! `Mutex` is re-entrant-free (unlike the donor's `recursive_mutex`), so
//! `get_file` here takes the lock once per call rather than recursively;
//! nothing in this module needs re-entrant locking since file insertion does
//! not call back into other locking context methods.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, OnceLock};

use crate::diagnostics::{Engine, SourceLookup};
use crate::error::CoreError;

/// The maximum number of files a single [`Context`] may register (spec §3,
/// §4.1): `file_id` is a 16-bit dense index.
pub const MAX_FILES: usize = u16::MAX as usize;

/// An immovable, context-owned record for one loaded source file.
///
/// Created only by [`Context::get_file`]; never constructed directly.
#[derive(Debug)]
pub struct File {
    path: PathBuf,
    name: String,
    contents: String,
    file_id: u16,
}

impl File {
    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn contents(&self) -> &str {
        &self.contents
    }

    pub fn file_id(&self) -> u16 {
        self.file_id
    }

    pub fn size(&self) -> usize {
        self.contents.len()
    }
}

struct Registry {
    files: Vec<File>,
    files_by_path: HashMap<PathBuf, u16>,
}

/// The native-target once-init hook the donor's `Context::Impl` constructor
/// performs via `std::call_once`. There is no real backend here, but the
/// construction-time at-most-once hook is part of the contract (spec §4.1).
static NATIVE_INIT: OnceLock<()> = OnceLock::new();

pub struct Context {
    registry: Mutex<Registry>,
    diags: OnceLock<Engine>,
    enable_colours: AtomicBool,
}

impl Default for Context {
    fn default() -> Self {
        Self::new()
    }
}

impl Context {
    pub fn new() -> Self {
        NATIVE_INIT.get_or_init(|| ());
        Context {
            registry: Mutex::new(Registry {
                files: Vec::new(),
                files_by_path: HashMap::new(),
            }),
            diags: OnceLock::new(),
            enable_colours: AtomicBool::new(true),
        }
    }

    /// Loads (or returns the already-registered) file at `path`. The path is
    /// canonicalized before lookup/insertion so the same file reached by two
    /// different relative paths dedupes to one `File` (Invariant I4).
    pub fn get_file(&self, path: impl AsRef<Path>) -> Result<u16, CoreError> {
        let path = path.as_ref();
        let canonical = fs::canonicalize(path).map_err(|source| CoreError::IoError {
            path: path.to_path_buf(),
            source,
        })?;

        let mut registry = self.registry.lock().expect("context registry poisoned");

        if let Some(&id) = registry.files_by_path.get(&canonical) {
            return Ok(id);
        }

        if registry.files.len() >= MAX_FILES {
            return Err(CoreError::TooManyFiles {
                limit: MAX_FILES as u32,
            });
        }

        let contents = fs::read_to_string(&canonical).map_err(|source| CoreError::IoError {
            path: canonical.clone(),
            source,
        })?;

        let file_id = registry.files.len() as u16;
        let name = canonical
            .file_name()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| canonical.to_string_lossy().into_owned());

        tracing::debug!(file_id, path = %canonical.display(), "loaded file");

        registry.files.push(File {
            path: canonical.clone(),
            name,
            contents,
            file_id,
        });
        registry.files_by_path.insert(canonical, file_id);

        Ok(file_id)
    }

    /// Loads a batch of independent paths concurrently. Each individual load
    /// still funnels through the same registry lock for its insertion step;
    /// this parallelizes I/O wait time across files, not lexing or parsing
    /// (those remain single-threaded per module — see Non-goal (b)).
    pub fn get_files_parallel(&self, paths: &[PathBuf]) -> Vec<Result<u16, CoreError>> {
        use rayon::prelude::*;
        paths.par_iter().map(|p| self.get_file(p)).collect()
    }

    /// Dense lookup by `file_id`. Returns `None` for an id past the current
    /// file count; callers must not hold `&File` across a later `get_file`
    /// call that could, in principle, reallocate the backing vector (Rust's
    /// borrow checker enforces this via the guard's lifetime instead of the
    /// donor's raw-pointer stability argument).
    pub fn with_file<R>(&self, id: u16, f: impl FnOnce(&File) -> R) -> Option<R> {
        let registry = self.registry.lock().expect("context registry poisoned");
        registry.files.get(id as usize).map(f)
    }

    pub fn file_count(&self) -> usize {
        self.registry.lock().expect("context registry poisoned").files.len()
    }

    /// Installs the diagnostics engine. May only be called once per
    /// `Context`; a second call is a programming error and is ignored other
    /// than being observable as a no-op, since `OnceLock` gives us "install
    /// once" for free without an extra lock.
    pub fn set_diags(&self, engine: Engine) {
        let _ = self.diags.set(engine);
    }

    /// Retrieves the installed diagnostics engine. It is a programming error
    /// to call this before [`Context::set_diags`] — matching the spec's "ICE,
    /// printed through the engine, then the process aborts" taxonomy is
    /// impossible here (there is no engine yet to print through), so this
    /// documents the contract with a panic instead.
    pub fn diags(&self) -> &Engine {
        self.diags
            .get()
            .expect("Context::diags() called before Context::set_diags()")
    }

    pub fn enable_colours(&self, enabled: bool) {
        self.enable_colours.store(enabled, Ordering::Release);
    }

    pub fn use_colours(&self) -> bool {
        self.enable_colours.load(Ordering::Acquire)
    }
}

impl SourceLookup for Context {
    fn file_display_name(&self, file_id: u16) -> Option<String> {
        self.with_file(file_id, |f| f.name().to_string())
    }

    fn file_text(&self, file_id: u16) -> Option<String> {
        self.with_file(file_id, |f| f.contents().to_string())
    }
}
