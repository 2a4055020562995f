//! SCSS transform stage for chunked build pipelines.
//!
//! A pipeline runner feeds the stage one `(file, chunk)` pair at a time. Every
//! file is terminated by a `(file, None)` call, and the pipeline as a whole is
//! terminated by a `(None, None)` call. The stage:
//!
//! - passes files that are not SCSS straight through, without buffering,
//! - buffers `.scss` files until their end-of-file call, then compiles the
//!   whole source once and hands back CSS under a `.css` name,
//! - warns about and passes through `.sass` (indented syntax) files, which
//!   are not supported.
//!
//! ```
//! use sass_stream::{Emit, FileInfo, Streamer, sass};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let mut stage = sass();
//! let file = FileInfo::new("assets/main.scss");
//!
//! assert_eq!(stage.stream(Some(&file), Some(b"a { b: c; }".to_vec()))?, Emit::Nothing);
//! let out = stage.stream(Some(&file), None)?;
//! assert_eq!(out.file().map(|f| f.name.as_str()), Some("main.css"));
//! assert_eq!(out.chunk(), Some(&b"a {\n  b: c; }\n"[..]));
//! # Ok(())
//! # }
//! ```
//!
//! # Caller discipline
//!
//! One stage instance handles one file at a time: every chunk of a file must
//! be delivered, followed by its end-of-file call, before the next file
//! starts. If a new file begins while another is still buffered, the partial
//! buffer is discarded and a warning is logged.

mod compiler;
mod error;
mod file_info;
mod memory_fs;
mod nested;
mod options;
mod stage;

pub use compiler::{Compiler, GrassCompiler};
pub use error::{CompileError, StreamError};
pub use file_info::{FileInfo, FileToken};
pub use memory_fs::MemoryFs;
pub use options::{DEFAULT_NAME, Options, OutputStyle, SassConfig};
pub use stage::SassStreamer;

/// What a stage hands back downstream for one call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Emit {
    /// Nothing to pass on: the chunk was buffered, or the pipeline ended.
    Nothing,
    /// A chunk for `file`. `None` marks the end of that file.
    Forward {
        file: FileInfo,
        chunk: Option<Vec<u8>>,
    },
}

impl Emit {
    pub fn forward(file: FileInfo, chunk: Option<Vec<u8>>) -> Self {
        Emit::Forward { file, chunk }
    }

    pub fn is_nothing(&self) -> bool {
        matches!(self, Emit::Nothing)
    }

    /// The file this output belongs to, if any.
    pub fn file(&self) -> Option<&FileInfo> {
        match self {
            Emit::Nothing => None,
            Emit::Forward { file, .. } => Some(file),
        }
    }

    /// The payload, if any.
    pub fn chunk(&self) -> Option<&[u8]> {
        match self {
            Emit::Nothing => None,
            Emit::Forward { chunk, .. } => chunk.as_deref(),
        }
    }
}

/// A transform stage driven by a pipeline runner.
pub trait Streamer {
    /// Name of this stage, used as the `stage` field of its log events.
    fn name(&self) -> &str;

    /// Feed one chunk of `file` through the stage.
    ///
    /// `file == None` ends the pipeline; `chunk == None` ends `file`.
    fn stream(
        &mut self,
        file: Option<&FileInfo>,
        chunk: Option<Vec<u8>>,
    ) -> Result<Emit, StreamError>;
}

/// A stage with default options, compiling through `grass`.
pub fn sass() -> SassStreamer {
    SassStreamer::new(Options::default())
}
