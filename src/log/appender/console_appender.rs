use crate::log::appender::LogAppender;
use crate::log::error::LogError;
use anyhow::Result;
use serde::Deserialize;
use smart_default::SmartDefault;
use std::io::{self, Write};

/// 输出目标
#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq, SmartDefault)]
#[serde(rename_all = "lowercase")]
pub enum Target {
    #[default]
    Stdout,
    Stderr,
}

/// ConsoleAppender 配置
#[derive(Debug, Clone, Deserialize, PartialEq, SmartDefault)]
#[serde(default)]
pub struct ConsoleAppenderConfig {
    /// 输出到标准输出还是标准错误
    pub target: Target,
}

/// 终端输出器
///
/// 每行日志写入后立即刷新
pub struct ConsoleAppender {
    config: ConsoleAppenderConfig,
}

impl ConsoleAppender {
    pub fn new(config: ConsoleAppenderConfig) -> Self {
        Self { config }
    }
}

/// 写入一行并立即刷新
fn write_line<W: Write>(mut writer: W, line: &str) -> std::result::Result<(), LogError> {
    writeln!(writer, "{}", line)?;
    writer.flush()?;
    Ok(())
}

impl LogAppender for ConsoleAppender {
    fn append(&self, line: &str) -> Result<()> {
        match self.config.target {
            Target::Stdout => write_line(io::stdout().lock(), line)?,
            Target::Stderr => write_line(io::stderr().lock(), line)?,
        }
        Ok(())
    }

    fn flush(&self) -> Result<()> {
        match self.config.target {
            Target::Stdout => io::stdout().flush().map_err(LogError::Io)?,
            Target::Stderr => io::stderr().flush().map_err(LogError::Io)?,
        }
        Ok(())
    }
}

crate::impl_from!(ConsoleAppenderConfig => ConsoleAppender);
