mod schema;
mod settings;
mod storage;

use std::env;
use std::io;
use std::path::{Path, PathBuf};

pub use schema::SchemaManager;
pub use settings::{Database, Logger, Pagination, Settings};
pub use storage::Storage;

/// Resolves a relative path against the current working directory.
pub fn normalize_path(path: impl AsRef<Path>) -> io::Result<PathBuf> {
    let path = path.as_ref();

    Ok(if path.is_absolute() {
        path.to_path_buf()
    } else {
        env::current_dir()?.join(path)
    })
}
