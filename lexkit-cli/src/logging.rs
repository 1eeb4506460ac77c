//! CLI 日志系统初始化
//!
//! 基于 `tracing-subscriber` 实现分阶段日志控制。日志写到 stderr，stdout 只留给 token 输出。

use std::io;

use lexkit_config::{LogConfig, LogFormat, LogLevel, Phase};
use tracing::level_filters::LevelFilter;
use tracing_subscriber::{
    filter::Targets, fmt, layer::SubscriberExt, util::SubscriberInitExt, Layer, Registry,
};

/// 使用指定格式和日志配置初始化日志系统
pub fn init(log_config: &LogConfig, format: LogFormat) {
    let layer = create_format_layer(format, io::stderr).with_filter(targets(log_config));
    // 重复初始化（例如测试中）直接忽略
    let _ = tracing_subscriber::registry().with(layer).try_init();
}

/// 每个阶段一个 target，未覆盖的阶段使用全局级别
pub fn targets(log_config: &LogConfig) -> Targets {
    [Phase::Driver, Phase::Recognizer, Phase::Cli]
        .into_iter()
        .fold(
            Targets::new().with_default(level_filter(log_config.global)),
            |targets, phase| {
                targets.with_target(phase.target(), level_filter(log_config.level_for(phase)))
            },
        )
}

pub fn level_filter(level: LogLevel) -> LevelFilter {
    match level {
        LogLevel::Error => LevelFilter::ERROR,
        LogLevel::Warn => LevelFilter::WARN,
        LogLevel::Info => LevelFilter::INFO,
        LogLevel::Debug => LevelFilter::DEBUG,
        LogLevel::Trace => LevelFilter::TRACE,
    }
}

/// Create formatter layer based on format
fn create_format_layer<W, F>(
    format: LogFormat,
    make_writer: F,
) -> Box<dyn Layer<Registry> + Send + Sync>
where
    W: io::Write + Send + Sync + 'static,
    F: Fn() -> W + Send + Sync + 'static,
{
    match format {
        LogFormat::Pretty => fmt::layer()
            .pretty()
            .with_target(true)
            .with_writer(make_writer)
            .boxed(),
        LogFormat::Compact => fmt::layer()
            .compact()
            .with_target(true)
            .without_time()
            .with_writer(make_writer)
            .boxed(),
        LogFormat::Json => fmt::layer()
            .json()
            .with_target(true)
            .with_writer(make_writer)
            .boxed(),
    }
}
