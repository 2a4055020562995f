//! The SCSS buffering stage.

use tracing::{debug, warn};

use crate::compiler::{Compiler, GrassCompiler};
use crate::error::{CompileError, StreamError};
use crate::file_info::{FileInfo, FileToken};
use crate::options::Options;
use crate::{Emit, Streamer};

/// Where the stage is in its per-file lifecycle.
#[derive(Debug, Default)]
enum State {
    /// No file in flight
    #[default]
    Idle,
    /// Collecting the chunks of an SCSS file. `file` already carries its
    /// `.css` name.
    Buffering { file: FileInfo, buffer: Vec<u8> },
    /// Passing the chunks of this file through untouched
    Ignoring(FileToken),
}

/// Buffers `.scss` files and compiles each one once its last chunk arrived.
///
/// Every other file passes through unchanged. See the crate docs for the
/// calling protocol.
#[derive(Debug)]
pub struct SassStreamer<C = GrassCompiler> {
    options: Options,
    state: State,
    compiler: C,
}

impl SassStreamer<GrassCompiler> {
    /// A stage compiling through `grass` with the style settings of `options`.
    pub fn new(options: Options) -> Self {
        let compiler = GrassCompiler::from_options(&options);
        Self::with_compiler(options, compiler)
    }
}

impl<C: Compiler> SassStreamer<C> {
    pub fn with_compiler(options: Options, compiler: C) -> Self {
        Self {
            options,
            state: State::Idle,
            compiler,
        }
    }

    pub fn compiler(&self) -> &C {
        &self.compiler
    }

    /// The SCSS file being buffered, under its `.css` name.
    pub fn current_file(&self) -> Option<&FileInfo> {
        match &self.state {
            State::Buffering { file, .. } => Some(file),
            _ => None,
        }
    }

    /// Whether chunks of `file` are currently passed through untouched.
    pub fn is_ignored(&self, file: &FileInfo) -> bool {
        matches!(self.state, State::Ignoring(token) if token == file.token())
    }

    /// Number of bytes buffered for the current file.
    pub fn buffered_len(&self) -> usize {
        match &self.state {
            State::Buffering { buffer, .. } => buffer.len(),
            _ => 0,
        }
    }

    /// Decide what to do with a file seen for the first time.
    fn classify(&self, previous: State, file: &FileInfo) -> State {
        if let State::Buffering {
            file: abandoned,
            buffer,
        } = &previous
            && !buffer.is_empty()
        {
            warn!(
                stage = %self.options.name,
                file = %abandoned.display_path(),
                bytes = buffer.len(),
                "File never reached end of file before the next one started; discarding its buffered content"
            );
        }

        match file.extension() {
            // Indented syntax is not supported; only SCSS gets compiled.
            Some("sass") => {
                warn!(
                    stage = %self.options.name,
                    file = %file.display_path(),
                    "File is being ignored. .sass syntax is not currently supported"
                );
                State::Ignoring(file.token())
            }
            Some("scss") => {
                let stem = file.name.strip_suffix(".scss").unwrap_or(&file.name);
                let file = file.renamed(format!("{stem}.css"));
                debug!(stage = %self.options.name, file = %file.display_path(), "buffering SCSS file");
                State::Buffering {
                    file,
                    buffer: Vec::new(),
                }
            }
            _ => State::Ignoring(file.token()),
        }
    }

    /// Compile a fully buffered file.
    fn compile(&self, file: FileInfo, buffer: Vec<u8>) -> Result<Emit, StreamError> {
        if buffer.is_empty() {
            return Ok(Emit::forward(file, None));
        }

        let source = match String::from_utf8(buffer) {
            Ok(source) => source,
            Err(e) => {
                return Err(StreamError::Compile {
                    file,
                    source: CompileError::new(format!("stylesheet is not valid UTF-8: {e}")),
                });
            }
        };

        // Imports resolve next to the file itself, not the working directory
        let include_paths = [file.original_path.clone()];

        debug!(
            stage = %self.options.name,
            file = %file.display_path(),
            bytes = source.len(),
            "compiling SCSS"
        );
        match self.compiler.compile(&source, &include_paths) {
            Ok(css) => Ok(Emit::forward(file, Some(css.into_bytes()))),
            Err(source) => Err(StreamError::Compile { file, source }),
        }
    }
}

impl<C: Compiler> Streamer for SassStreamer<C> {
    fn name(&self) -> &str {
        &self.options.name
    }

    fn stream(
        &mut self,
        file: Option<&FileInfo>,
        chunk: Option<Vec<u8>>,
    ) -> Result<Emit, StreamError> {
        let Some(file) = file else {
            return Ok(Emit::Nothing);
        };

        let (next, out) = match std::mem::take(&mut self.state) {
            State::Ignoring(token) if token == file.token() => {
                (State::Ignoring(token), Ok(Emit::forward(file.clone(), chunk)))
            }
            State::Buffering {
                file: current,
                mut buffer,
            } if current.is_same_file(file) => match chunk {
                Some(bytes) => {
                    buffer.extend_from_slice(&bytes);
                    (
                        State::Buffering {
                            file: current,
                            buffer,
                        },
                        Ok(Emit::Nothing),
                    )
                }
                None => (State::Idle, self.compile(current, buffer)),
            },
            previous => {
                // New file: classify it, then handle the chunk in the new state
                self.state = self.classify(previous, file);
                return self.stream(Some(file), chunk);
            }
        };

        self.state = next;
        out
    }
}
