//! Environment loading helpers

use std::path::PathBuf;

/// Load a `.env` file from the current directory or its parents
///
/// Returns the path that was loaded, or `None` when no file was found. A
/// file that exists but cannot be read or parsed is an error. Variables
/// already present in the process environment win.
pub fn load_dotenv() -> Result<Option<PathBuf>, dotenvy::Error> {
    found(dotenvy::dotenv())
}

fn found(result: Result<PathBuf, dotenvy::Error>) -> Result<Option<PathBuf>, dotenvy::Error> {
    match result {
        Ok(path) => Ok(Some(path)),
        Err(e) if e.not_found() => Ok(None),
        Err(e) => Err(e),
    }
}

/// Source of configuration values keyed by variable name
///
/// The process environment is the usual source; tests pass a closure or a
/// map instead so they never mutate global state.
pub trait EnvSource {
    /// Look up a variable, treating empty values as unset
    fn var(&self, key: &str) -> Option<String>;
}

/// Reads from `std::env`
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessEnv;

impl EnvSource for ProcessEnv {
    fn var(&self, key: &str) -> Option<String> {
        std::env::var(key).ok().filter(|v| !v.trim().is_empty())
    }
}

impl<F> EnvSource for F
where
    F: Fn(&str) -> Option<String>,
{
    fn var(&self, key: &str) -> Option<String> {
        self(key).filter(|v| !v.trim().is_empty())
    }
}
