//! Error types for the SCSS stage

use thiserror::Error;

use crate::file_info::FileInfo;

/// Failure reported by a stylesheet compiler.
///
/// Carries the compiler's own message unchanged.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{message}")]
pub struct CompileError {
    pub message: String,
}

impl CompileError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl From<Box<grass::Error>> for CompileError {
    fn from(e: Box<grass::Error>) -> Self {
        CompileError::new(e.to_string())
    }
}

/// Errors surfaced by [`crate::Streamer::stream`]
#[derive(Error, Debug)]
pub enum StreamError {
    /// The buffered stylesheet did not compile. `file` is the descriptor the
    /// compiled output would have been emitted under.
    #[error("{}: SASS compilation failed: {source}", .file.display_path())]
    Compile {
        file: FileInfo,
        #[source]
        source: CompileError,
    },
}

impl StreamError {
    /// The file whose compilation failed.
    pub fn file(&self) -> &FileInfo {
        match self {
            StreamError::Compile { file, .. } => file,
        }
    }
}
