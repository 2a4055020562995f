//! Stylesheet compilers the stage can hand buffered sources to.

use std::sync::Arc;

use camino::Utf8PathBuf;

use crate::error::CompileError;
use crate::nested;
use crate::options::{Options, OutputStyle};

/// Turns a complete stylesheet source into CSS.
pub trait Compiler {
    /// Compile `source`, resolving `@import`s against `include_paths`.
    fn compile(&self, source: &str, include_paths: &[Utf8PathBuf]) -> Result<String, CompileError>;
}

/// SCSS compiler backed by [`grass`].
#[derive(Debug, Clone, Default)]
pub struct GrassCompiler {
    style: OutputStyle,
    quiet: bool,
    /// Filesystem imports are read from. `None` reads from disk.
    fs: Option<Arc<dyn grass::Fs + Send + Sync>>,
}

impl GrassCompiler {
    pub fn new() -> Self {
        Self::default()
    }

    /// A compiler honoring the style settings of `options`.
    pub fn from_options(options: &Options) -> Self {
        Self {
            style: options.style,
            quiet: options.quiet,
            fs: None,
        }
    }

    pub fn style(mut self, style: OutputStyle) -> Self {
        self.style = style;
        self
    }

    pub fn quiet(mut self, quiet: bool) -> Self {
        self.quiet = quiet;
        self
    }

    /// Read imports from `fs` instead of disk.
    pub fn fs(mut self, fs: impl grass::Fs + Send + Sync + 'static) -> Self {
        self.fs = Some(Arc::new(fs));
        self
    }
}

impl Compiler for GrassCompiler {
    fn compile(&self, source: &str, include_paths: &[Utf8PathBuf]) -> Result<String, CompileError> {
        let mut options = grass::Options::default()
            .style(self.style.grass_style())
            .quiet(self.quiet);
        for path in include_paths {
            options = options.load_path(path.as_std_path());
        }
        if let Some(fs) = &self.fs {
            options = options.fs(&**fs);
        }

        let css = grass::from_string(source.to_owned(), &options)?;
        Ok(match self.style {
            OutputStyle::Nested => nested::nest(&css),
            OutputStyle::Expanded | OutputStyle::Compressed => css,
        })
    }
}
