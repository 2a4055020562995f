//! Stage configuration
//!
//! The stage is configured from a small YAML document:
//!
//! ```yaml
//! name: site-styles
//! style: compressed
//! quiet: true
//! ```
//!
//! Every key is optional. [`SassConfig`] is the document as written,
//! [`Options`] is the resolved form the stage runs with.

use camino::Utf8Path;
use eyre::{Result, WrapErr, eyre};
use facet::Facet;

/// Name a stage logs under when none is configured
pub const DEFAULT_NAME: &str = "sass::SassStreamer";

/// Stage configuration as written in YAML
#[derive(Debug, Clone, Default, Facet)]
#[facet(rename_all = "snake_case")]
pub struct SassConfig {
    /// Name of the stage, used in log events
    #[facet(default)]
    pub name: Option<String>,

    /// CSS output style: "nested" (default), "expanded" or "compressed"
    #[facet(default)]
    pub style: Option<String>,

    /// Silence `@warn` and `@debug` output from stylesheets
    #[facet(default)]
    pub quiet: Option<bool>,
}

/// How compiled CSS is laid out
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputStyle {
    /// One declaration per line, closing braces on the last declaration's
    /// line, short hex colors written out in full
    #[default]
    Nested,
    /// One declaration per line, closing braces on their own line
    Expanded,
    /// All unnecessary whitespace removed
    Compressed,
}

impl OutputStyle {
    fn parse(s: &str) -> Result<Self> {
        match s {
            "nested" => Ok(OutputStyle::Nested),
            "expanded" => Ok(OutputStyle::Expanded),
            "compressed" => Ok(OutputStyle::Compressed),
            other => Err(eyre!(
                "Unknown output style '{}' (expected 'nested', 'expanded' or 'compressed')",
                other
            )),
        }
    }

    /// The style grass renders in. Nested output is laid out from grass's
    /// expanded output.
    pub(crate) fn grass_style(self) -> grass::OutputStyle {
        match self {
            OutputStyle::Nested | OutputStyle::Expanded => grass::OutputStyle::Expanded,
            OutputStyle::Compressed => grass::OutputStyle::Compressed,
        }
    }
}

/// Resolved stage options
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Options {
    /// Name of the stage. Only used for logging.
    pub name: String,
    pub style: OutputStyle,
    pub quiet: bool,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            name: DEFAULT_NAME.to_string(),
            style: OutputStyle::default(),
            quiet: false,
        }
    }
}

impl Options {
    /// Options with everything defaulted except the stage name.
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Resolve a parsed config, filling in defaults.
    pub fn resolve(config: SassConfig) -> Result<Self> {
        let name = config
            .name
            .filter(|n| !n.is_empty())
            .unwrap_or_else(|| DEFAULT_NAME.to_string());
        let style = match config.style.as_deref() {
            Some(s) => OutputStyle::parse(s)?,
            None => OutputStyle::default(),
        };

        Ok(Self {
            name,
            style,
            quiet: config.quiet.unwrap_or(false),
        })
    }

    /// Parse and resolve a YAML config document.
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let config: SassConfig =
            facet_yaml::from_str(yaml).map_err(|e| eyre!("Failed to parse SASS config: {}", e))?;
        Self::resolve(config)
    }

    /// Load options from a YAML config file.
    pub fn load(path: &Utf8Path) -> Result<Self> {
        let content =
            std::fs::read_to_string(path).wrap_err_with(|| format!("Failed to read {path}"))?;
        let options = Self::from_yaml(&content).wrap_err_with(|| format!("Failed to load {path}"))?;
        tracing::debug!(%path, ?options, "loaded SASS stage config");
        Ok(options)
    }
}
