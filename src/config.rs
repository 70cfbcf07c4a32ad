use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Base URL of the OMDb API.
pub const OMDB_ENDPOINT: &str = "http://www.omdbapi.com/";

/// Where a free OMDb API key can be requested.
pub const API_KEY_URL: &str = "http://www.omdbapi.com/apikey.aspx";

pub const USAGE: &str = "Available args:
 /key            <string>  - (REQUIRED) OMDb API key (You can request a key here http://www.omdbapi.com/apikey.aspx)
 /path           <string>  - Path to films file (one film on each line)
 /seperatefiles            - Save some film stats to seperate CSV files
 /help                     - Displays this help text";

/// Settings for one lookup run.
pub struct Config {
    /// OMDb API key. Empty when none was given.
    pub api_key: String,
    /// Text file with one film title per line.
    pub path: PathBuf,
    /// Also write single-column CSV files for a few fields.
    pub separate_files: bool,
    /// Titles read from `path`, in file order. Filled once by `films::load_into`.
    pub films: Vec<String>,
    /// API base URL.
    pub endpoint: String,
    /// Pause after every lookup, so the free API isn't hit too hard.
    pub pause: Duration,
    /// Directory the CSV files land in.
    pub output_dir: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            path: PathBuf::from("films.txt"),
            separate_files: false,
            films: Vec::new(),
            endpoint: OMDB_ENDPOINT.into(),
            pause: Duration::from_millis(500),
            output_dir: executable_dir(),
        }
    }
}

impl Config {
    /// Build a config from command-line arguments (program name excluded).
    ///
    /// Parsing never fails: unknown arguments are ignored and a flag missing
    /// its value is recorded as a warning while the rest is still parsed.
    /// A flag's value is not skipped, so it is also checked as a flag itself.
    pub fn from_args(args: &[String]) -> ParsedArgs {
        let mut config = Config::default();
        let mut warnings = Vec::new();
        let mut help_requested = false;

        for (i, arg) in args.iter().enumerate() {
            match parse_flag(arg) {
                Some(Flag::Key) => {
                    if let Some(value) = value_after(args, i, &mut warnings) {
                        config.api_key = value;
                    }
                }
                Some(Flag::Path) => {
                    if let Some(value) = value_after(args, i, &mut warnings) {
                        config.path = PathBuf::from(value);
                    }
                }
                Some(Flag::SeparateFiles) => config.separate_files = true,
                Some(Flag::Help) => help_requested = true,
                None => {}
            }
        }

        ParsedArgs {
            config,
            warnings,
            help_requested,
        }
    }

    pub fn has_key(&self) -> bool {
        !self.api_key.is_empty()
    }

    /// Path of an output file inside `output_dir`.
    pub fn output_path(&self, file_name: &str) -> PathBuf {
        self.output_dir.join(file_name)
    }
}

/// Result of argument parsing.
pub struct ParsedArgs {
    pub config: Config,
    pub warnings: Vec<ArgWarning>,
    pub help_requested: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ArgWarning {
    /// `flag` at 1-based `position` was the last argument, so it has no value.
    MissingValue { position: usize, flag: String },
}

impl fmt::Display for ArgWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgWarning::MissingValue { position, flag } => write!(
                f,
                "Problem reading argument {} ({} expects a value)",
                position, flag
            ),
        }
    }
}

#[derive(Debug, PartialEq, Eq)]
enum Flag {
    Key,
    Path,
    SeparateFiles,
    Help,
}

/// Flags may be written `--name`, `-name` or `/name`.
fn parse_flag(arg: &str) -> Option<Flag> {
    let name = arg
        .strip_prefix("--")
        .or_else(|| arg.strip_prefix('-'))
        .or_else(|| arg.strip_prefix('/'))?;

    match name {
        "key" => Some(Flag::Key),
        "path" => Some(Flag::Path),
        "seperate_files" | "seperatefiles" | "separate_files" | "separatefiles" => {
            Some(Flag::SeparateFiles)
        }
        "help" | "h" | "?" => Some(Flag::Help),
        _ => None,
    }
}

/// The argument after `args[i]`, read as that flag's value.
fn value_after(args: &[String], i: usize, warnings: &mut Vec<ArgWarning>) -> Option<String> {
    match args.get(i + 1) {
        Some(value) => Some(value.clone()),
        None => {
            warnings.push(ArgWarning::MissingValue {
                position: i + 1,
                flag: args[i].clone(),
            });
            None
        }
    }
}

/// Directory containing the running executable, falling back to the
/// working directory when it can't be determined.
fn executable_dir() -> PathBuf {
    std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(Path::to_path_buf))
        .unwrap_or_else(|| PathBuf::from("."))
}
