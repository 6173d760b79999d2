use std::path::PathBuf;

/// Error surfaced to the host when a response cannot be produced.
///
/// Missing pages are not errors; they go through the not-found flow.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    /// An existing file could not be read.
    #[error("Failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// A template exists but failed to load or render.
    #[error("Failed to render template {}: {source}", path.display())]
    Template {
        path: PathBuf,
        #[source]
        source: minijinja::Error,
    },
}

impl EngineError {
    /// Path of the file involved.
    pub fn path(&self) -> &std::path::Path {
        match self {
            Self::Io { path, .. } | Self::Template { path, .. } => path,
        }
    }
}
