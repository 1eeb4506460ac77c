//! Lexkit Config - Pure configuration data structures
//!
//! This crate contains only data structures, no logic or global state.
//! It serves as the shared configuration vocabulary across all Lexkit crates.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Log verbosity, ordered from least to most verbose
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    /// Get the string name of the level
    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Error => "error",
            LogLevel::Warn => "warn",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
            LogLevel::Trace => "trace",
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a level or format name is not recognized
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownName(pub String);

impl fmt::Display for UnknownName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown name '{}'", self.0)
    }
}

impl std::error::Error for UnknownName {}

impl FromStr for LogLevel {
    type Err = UnknownName;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            // silent = only errors
            "silent" | "error" => Ok(LogLevel::Error),
            "warn" => Ok(LogLevel::Warn),
            "info" => Ok(LogLevel::Info),
            "debug" => Ok(LogLevel::Debug),
            "trace" => Ok(LogLevel::Trace),
            _ => Err(UnknownName(s.to_string())),
        }
    }
}

/// Log output format
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Colored multi-line output for development
    #[default]
    Pretty,
    /// Single-line output
    Compact,
    /// JSON lines for tool integration
    Json,
}

impl FromStr for LogFormat {
    type Err = UnknownName;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "pretty" => Ok(LogFormat::Pretty),
            "compact" => Ok(LogFormat::Compact),
            "json" => Ok(LogFormat::Json),
            _ => Err(UnknownName(s.to_string())),
        }
    }
}

/// Execution phase enum for phase-specific configuration
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    /// The scanning loop that stitches tokens and fillers
    Driver,
    /// Leaf recognizers and combinators
    Recognizer,
    Cli,
}

impl Phase {
    /// Get the string name of the phase
    pub fn as_str(&self) -> &'static str {
        match self {
            Phase::Driver => "driver",
            Phase::Recognizer => "recognizer",
            Phase::Cli => "cli",
        }
    }

    /// Get the log target name for this phase
    pub fn target(&self) -> &'static str {
        match self {
            Phase::Driver => "lexkit::driver",
            Phase::Recognizer => "lexkit::recognizer",
            Phase::Cli => "lexkit::cli",
        }
    }
}

/// Log configuration: a global level with optional per-phase overrides
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    pub global: LogLevel,
    pub driver: Option<LogLevel>,
    pub recognizer: Option<LogLevel>,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            global: LogLevel::Warn,
            driver: None,
            recognizer: None,
        }
    }
}

impl LogConfig {
    /// Get log level for a specific phase
    pub fn level_for(&self, phase: Phase) -> LogLevel {
        match phase {
            Phase::Driver => self.driver.unwrap_or(self.global),
            Phase::Recognizer => self.recognizer.unwrap_or(self.global),
            Phase::Cli => self.global,
        }
    }
}

/// Built-in grammars offered by the command line tool
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GrammarKind {
    /// Words only, everything else becomes filler
    Words,
    /// Words, numbers, whitespace and commas
    #[default]
    Plain,
    /// Like `Plain`, plus bracketed groups
    Brackets,
}

impl FromStr for GrammarKind {
    type Err = UnknownName;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "words" => Ok(GrammarKind::Words),
            "plain" => Ok(GrammarKind::Plain),
            "brackets" => Ok(GrammarKind::Brackets),
            _ => Err(UnknownName(s.to_string())),
        }
    }
}

/// Settings file for the command line tool (`lexkit.json`)
///
/// Every field is optional; command line flags take precedence.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CliSettings {
    pub grammar: Option<GrammarKind>,
    /// Whether unmatched regions become filler tokens
    pub filler: Option<bool>,
    /// Print tokens as JSON instead of the pretty tree
    pub json: Option<bool>,
    pub log: Option<LogConfig>,
    pub log_format: Option<LogFormat>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_log_config() {
        let cfg = LogConfig::default();
        assert_eq!(cfg.global, LogLevel::Warn);
        assert_eq!(cfg.level_for(Phase::Driver), LogLevel::Warn);
    }

    #[test]
    fn test_level_override() {
        let cfg = LogConfig {
            global: LogLevel::Info,
            driver: Some(LogLevel::Trace),
            recognizer: None,
        };
        assert_eq!(cfg.level_for(Phase::Driver), LogLevel::Trace);
        assert_eq!(cfg.level_for(Phase::Recognizer), LogLevel::Info);
        assert_eq!(cfg.level_for(Phase::Cli), LogLevel::Info);
    }

    #[test]
    fn test_phase_as_str() {
        assert_eq!(Phase::Driver.as_str(), "driver");
        assert_eq!(Phase::Recognizer.target(), "lexkit::recognizer");
    }

    #[test]
    fn test_parse_log_level() {
        assert_eq!("DEBUG".parse::<LogLevel>(), Ok(LogLevel::Debug));
        assert_eq!("silent".parse::<LogLevel>(), Ok(LogLevel::Error));
        assert!("loud".parse::<LogLevel>().is_err());
    }

    #[test]
    fn test_settings_from_json() {
        let json = r#"{
            "grammar": "brackets",
            "filler": true,
            "log": { "global": "info", "driver": "trace" }
        }"#;
        let settings: CliSettings = serde_json::from_str(json).unwrap();
        assert_eq!(settings.grammar, Some(GrammarKind::Brackets));
        assert_eq!(settings.filler, Some(true));
        assert_eq!(settings.json, None);
        let log = settings.log.unwrap();
        assert_eq!(log.level_for(Phase::Driver), LogLevel::Trace);
        assert_eq!(log.recognizer, None);
    }
}
