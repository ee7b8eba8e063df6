use std::ffi::OsString;
use std::path::PathBuf;

/// Environment variable overriding the default storage directory.
pub const STORE_PATH_ENV: &str = "RAGQ_STORE_PATH";

/// Fixed relative default used when neither the flag nor the environment
/// variable names a storage directory.
pub const DEFAULT_STORE_PATH: &str = "./store";

/// Default number of results retrieved per query.
pub const DEFAULT_K: usize = 5;

/// Default Ollama model used for generation.
pub const DEFAULT_MODEL: &str = "mistral";

/// Resolve the storage directory: explicit flag, then `RAGQ_STORE_PATH`,
/// then the fixed relative default.
pub fn resolve_store_path(flag: Option<PathBuf>) -> PathBuf {
    resolve_from(flag, std::env::var_os(STORE_PATH_ENV))
}

fn resolve_from(flag: Option<PathBuf>, env: Option<OsString>) -> PathBuf {
    if let Some(path) = flag {
        return path;
    }
    if let Some(path) = env {
        if !path.is_empty() {
            return PathBuf::from(path);
        }
    }
    PathBuf::from(DEFAULT_STORE_PATH)
}
