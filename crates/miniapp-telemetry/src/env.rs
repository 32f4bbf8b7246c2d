//! `.env` loading shared by the binaries.
//!
//! Runs once at the top of `main`, before telemetry and config are read,
//! so log settings can live in the same file as the bot token.

use std::path::{Path, PathBuf};

/// Search depth above the working directory
const PARENT_LAYERS: usize = 2;

/// Load `.env` files from the working directory and its parents.
///
/// Returns the files that were read. Variables already set in the process
/// environment win over file values.
pub fn load_dotenv_layers() -> Vec<PathBuf> {
    load_dotenv_from(Path::new("."))
}

/// Same as [`load_dotenv_layers`], starting at `base`.
pub fn load_dotenv_from(base: &Path) -> Vec<PathBuf> {
    let mut dir = base.to_path_buf();
    let mut loaded = Vec::new();

    for _ in 0..=PARENT_LAYERS {
        let candidate = dir.join(".env");
        if dotenvy::from_path(&candidate).is_ok() {
            loaded.push(candidate);
        }
        dir.push("..");
    }

    loaded
}
