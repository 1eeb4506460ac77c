//! CLI 配置
//!
//! 配置文件（JSON，结构见 [`CliSettings`]）与命令行参数合并，命令行优先。

use std::path::Path;

use lexkit_config::{CliSettings, GrammarKind, LogConfig, LogFormat, LogLevel};
use thiserror::Error;

/// CLI 错误
#[derive(Error, Debug)]
pub enum CliError {
    #[error("Cannot read '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid settings file '{path}': {source}")]
    Settings {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Invalid grammar: {0}")]
    Grammar(#[from] lexkit_core::BuildError),

    #[error(transparent)]
    Scan(#[from] lexkit_core::ScanError),

    #[error("Cannot serialize tokens: {0}")]
    Output(#[source] serde_json::Error),
}

/// 合并后的运行配置
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub grammar: GrammarKind,
    pub filler: bool,
    pub json: bool,
    pub log: LogConfig,
    pub log_format: LogFormat,
}

/// 命令行给出的覆盖项，未给出的为 `None`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Overrides {
    pub grammar: Option<GrammarKind>,
    pub no_filler: bool,
    pub json: bool,
    pub log_level: Option<LogLevel>,
    pub log_format: Option<LogFormat>,
}

/// 读取待扫描的源文件
pub fn read_source(path: &Path) -> Result<String, CliError> {
    std::fs::read_to_string(path).map_err(|source| CliError::Io {
        path: path.display().to_string(),
        source,
    })
}

/// 读取配置文件
pub fn read_settings(path: &Path) -> Result<CliSettings, CliError> {
    let text = read_source(path)?;
    serde_json::from_str(&text).map_err(|source| CliError::Settings {
        path: path.display().to_string(),
        source,
    })
}

impl Settings {
    pub fn resolve(file: CliSettings, overrides: &Overrides) -> Self {
        let mut log = file.log.unwrap_or_default();
        if let Some(level) = overrides.log_level {
            log.global = level;
        }
        Self {
            grammar: overrides.grammar.or(file.grammar).unwrap_or_default(),
            filler: !overrides.no_filler && file.filler.unwrap_or(true),
            json: overrides.json || file.json.unwrap_or(false),
            log,
            log_format: overrides.log_format.or(file.log_format).unwrap_or_default(),
        }
    }
}
