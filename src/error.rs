use std::path::PathBuf;

use thiserror::Error;

/// Configuration-load failures: these abort whatever triggered the load and
/// are never retried. Gameplay itself never produces errors.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("{}:{line}: {message}", path.display())]
    Parse {
        path: PathBuf,
        line: usize,
        message: String,
    },
}
