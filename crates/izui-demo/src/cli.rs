#![forbid(unsafe_code)]

//! Command-line argument parsing for the demo.
//!
//! Parses args manually (no external dependencies) to keep the binary lean.
//! Supports environment variable overrides via the `IZUI_DEMO_*` prefix.

use std::env;
use std::fmt;
use std::path::PathBuf;
use std::process;

const VERSION: &str = env!("CARGO_PKG_VERSION");

const HELP_TEXT: &str = "\
IzenDoc call-log filters: multi-select dropdown demo

USAGE:
    izui-demo [OPTIONS]

OPTIONS:
    --searchable         Also make the call-status filter searchable
    --max-chips=N        Chips shown before \"N selected\" (default: 3)
    --locale=TAG         UI locale: en, es, ru (default: en)
    --strings=PATH       Load extra strings for --locale from a catalog file
    --log-file=PATH      Write tracing output to PATH (filtered by RUST_LOG)
    --no-mouse           Disable mouse event capture
    --help, -h           Show this help message
    --version, -V        Show version

KEYBINDINGS:
    Tab / Shift-Tab      Move focus between the two filters
    Enter / Space / Down Open the focused filter
    Up / Down            Move through options
    Enter / Space        Toggle the focused option
    Escape               Close the panel
    q / Ctrl+C           Quit (q only while no panel is open)

ENVIRONMENT VARIABLES:
    IZUI_DEMO_SEARCHABLE      Override --searchable (1|true)
    IZUI_DEMO_MAX_CHIPS       Override --max-chips
    IZUI_DEMO_LOCALE          Override --locale
    IZUI_DEMO_LOG_FILE        Override --log-file
    IZUI_DEMO_NO_MOUSE        Disable mouse capture (1|true)";

/// Parsed command-line options.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Opts {
    /// Whether the call-status filter gets a search row too.
    pub searchable: bool,
    /// Chips shown before the trigger switches to a count.
    pub max_chips: usize,
    /// UI locale tag.
    pub locale: String,
    /// Extra catalog file for `locale`.
    pub strings: Option<PathBuf>,
    /// Tracing output file; no subscriber is installed without one.
    pub log_file: Option<PathBuf>,
    /// Whether mouse events are enabled.
    pub mouse: bool,
}

impl Default for Opts {
    fn default() -> Self {
        Self {
            searchable: false,
            max_chips: 3,
            locale: "en".into(),
            strings: None,
            log_file: None,
            mouse: true,
        }
    }
}

/// What the command line asked for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Run(Opts),
    Help,
    Version,
}

/// A command-line value that could not be used.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CliError {
    InvalidValue { flag: &'static str, value: String },
    UnknownArgument(String),
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidValue { flag, value } => write!(f, "Invalid {flag} value: {value}"),
            Self::UnknownArgument(arg) => write!(f, "Unknown argument: {arg}"),
        }
    }
}

impl std::error::Error for CliError {}

fn truthy(value: &str) -> bool {
    matches!(value.trim().to_ascii_lowercase().as_str(), "1" | "true" | "yes" | "on")
}

fn parse_max_chips(value: &str) -> Result<usize, CliError> {
    value.parse().map_err(|_| CliError::InvalidValue {
        flag: "--max-chips",
        value: value.to_string(),
    })
}

impl Opts {
    /// Parse command-line arguments and environment variables, exiting on
    /// `--help`, `--version`, or bad input.
    ///
    /// Environment variables take precedence over defaults but are overridden
    /// by explicit command-line flags.
    pub fn parse() -> Self {
        match Self::from_sources(env::args().skip(1), |key| env::var(key).ok()) {
            Ok(Command::Run(opts)) => opts,
            Ok(Command::Help) => {
                println!("{HELP_TEXT}");
                process::exit(0);
            }
            Ok(Command::Version) => {
                println!("izui-demo {VERSION}");
                process::exit(0);
            }
            Err(err) => {
                eprintln!("{err}");
                eprintln!("Run with --help for usage information.");
                process::exit(1);
            }
        }
    }

    /// Parse from explicit sources.
    pub fn from_sources<I, E>(args: I, env_var: E) -> Result<Command, CliError>
    where
        I: IntoIterator<Item = String>,
        E: Fn(&str) -> Option<String>,
    {
        let mut opts = Self::default();

        // Apply environment variable defaults first
        if let Some(val) = env_var("IZUI_DEMO_SEARCHABLE") {
            opts.searchable = truthy(&val);
        }
        if let Some(val) = env_var("IZUI_DEMO_MAX_CHIPS") {
            opts.max_chips = parse_max_chips(&val)?;
        }
        if let Some(val) = env_var("IZUI_DEMO_LOCALE") {
            opts.locale = val;
        }
        if let Some(val) = env_var("IZUI_DEMO_LOG_FILE") {
            opts.log_file = Some(PathBuf::from(val));
        }
        if let Some(val) = env_var("IZUI_DEMO_NO_MOUSE") {
            opts.mouse = !truthy(&val);
        }

        // Parse command-line args (override env vars)
        for arg in args {
            match arg.as_str() {
                "--help" | "-h" => return Ok(Command::Help),
                "--version" | "-V" => return Ok(Command::Version),
                "--no-mouse" => opts.mouse = false,
                "--searchable" => opts.searchable = true,
                other => {
                    if let Some(val) = other.strip_prefix("--max-chips=") {
                        opts.max_chips = parse_max_chips(val)?;
                    } else if let Some(val) = other.strip_prefix("--locale=") {
                        if val.is_empty() {
                            return Err(CliError::InvalidValue {
                                flag: "--locale",
                                value: val.to_string(),
                            });
                        }
                        opts.locale = val.to_string();
                    } else if let Some(val) = other.strip_prefix("--strings=") {
                        opts.strings = Some(PathBuf::from(val));
                    } else if let Some(val) = other.strip_prefix("--log-file=") {
                        opts.log_file = Some(PathBuf::from(val));
                    } else {
                        return Err(CliError::UnknownArgument(other.to_string()));
                    }
                }
            }
        }

        Ok(Command::Run(opts))
    }
}
