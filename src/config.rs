//! Parser options and command-line configuration
//!
//! [`ParseOptions`] is the only knob the library itself exposes. [`Config`] is
//! what the `microml` binary builds from its argument list.

use log::LevelFilter;
use std::path::PathBuf;
use thiserror::Error;

/// Environment variable consulted for the default log level.
pub const LOG_ENV_VAR: &str = "MICROML_LOG";

/// What to do with tokens left over after the top-level expression.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TrailingTokens {
    /// Stop after one expression; leftovers are not looked at
    #[default]
    Ignore,
    /// Leftovers are a parse error expecting end of input
    Reject,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ParseOptions {
    pub trailing: TrailingTokens,
}

impl ParseOptions {
    pub fn strict() -> Self {
        Self {
            trailing: TrailingTokens::Reject,
        }
    }
}

/// Where the binary reads source text from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Input {
    File(PathBuf),
    Inline(String),
    Stdin,
}

/// How the binary presents a parse result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// Compact JSON on one line
    Json,
    /// Indented JSON
    #[default]
    Pretty,
    /// Text outline of the tree
    Tree,
    /// Interactive terminal viewer
    Tui,
}

impl OutputFormat {
    fn from_name(name: &str) -> Option<Self> {
        match name {
            "json" => Some(OutputFormat::Json),
            "pretty" => Some(OutputFormat::Pretty),
            "tree" => Some(OutputFormat::Tree),
            "tui" => Some(OutputFormat::Tui),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("Option '{0}' requires a value")]
    MissingValue(String),

    #[error("Unknown output format '{0}' (expected json, pretty, tree or tui)")]
    UnknownFormat(String),

    #[error("Unknown option '{0}'")]
    UnknownOption(String),

    #[error("Only one input may be given, found '{0}' as well")]
    ExtraInput(String),

    #[error("Invalid log level '{0}'")]
    InvalidLogLevel(String),
}

/// Command-line configuration for the `microml` binary
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub input: Input,
    pub format: OutputFormat,
    pub options: ParseOptions,
    pub log_level: LevelFilter,
    pub show_help: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            input: Input::Stdin,
            format: OutputFormat::default(),
            options: ParseOptions::default(),
            log_level: LevelFilter::Warn,
            show_help: false,
        }
    }
}

impl Config {
    /// Build a configuration from arguments (without the program name).
    ///
    /// `env_level` is the value of [`LOG_ENV_VAR`], if set; each `-v` raises
    /// the resulting level by one step.
    pub fn from_args<I>(args: I, env_level: Option<&str>) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = String>,
    {
        let mut config = Config::default();
        if let Some(level) = env_level {
            config.log_level = parse_level(level)?;
        }

        let mut input: Option<Input> = None;
        let mut args = args.into_iter();

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "-h" | "--help" => config.show_help = true,
                "--strict" => config.options = ParseOptions::strict(),
                "-v" | "--verbose" => config.log_level = raise_level(config.log_level),
                "-e" | "--expr" => {
                    let source = args.next().ok_or(ConfigError::MissingValue(arg))?;
                    set_input(&mut input, Input::Inline(source))?;
                }
                "-f" | "--format" => {
                    let name = args.next().ok_or(ConfigError::MissingValue(arg))?;
                    config.format =
                        OutputFormat::from_name(&name).ok_or(ConfigError::UnknownFormat(name))?;
                }
                "-" => set_input(&mut input, Input::Stdin)?,
                _ if arg.starts_with('-') => return Err(ConfigError::UnknownOption(arg)),
                _ => set_input(&mut input, Input::File(PathBuf::from(arg)))?,
            }
        }

        config.input = input.unwrap_or(Input::Stdin);
        Ok(config)
    }
}

fn set_input(slot: &mut Option<Input>, input: Input) -> Result<(), ConfigError> {
    if slot.is_some() {
        let shown = match input {
            Input::File(path) => path.display().to_string(),
            Input::Inline(source) => source,
            Input::Stdin => "-".to_string(),
        };
        return Err(ConfigError::ExtraInput(shown));
    }
    *slot = Some(input);
    Ok(())
}

fn parse_level(name: &str) -> Result<LevelFilter, ConfigError> {
    name.trim()
        .parse::<LevelFilter>()
        .map_err(|_| ConfigError::InvalidLogLevel(name.to_string()))
}

fn raise_level(level: LevelFilter) -> LevelFilter {
    match level {
        LevelFilter::Off => LevelFilter::Error,
        LevelFilter::Error => LevelFilter::Warn,
        LevelFilter::Warn => LevelFilter::Info,
        LevelFilter::Info => LevelFilter::Debug,
        LevelFilter::Debug | LevelFilter::Trace => LevelFilter::Trace,
    }
}
