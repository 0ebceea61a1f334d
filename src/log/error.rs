use thiserror::Error;

/// 日志模块相关错误类型
#[derive(Error, Debug)]
pub enum LogError {
    #[error("Appender type '{0}' not registered")]
    AppenderNotRegistered(String),
    #[error("Invalid options: {0}")]
    InvalidOptions(#[from] serde_json::Error),
    #[error("Write failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("Registry lock poisoned")]
    LockPoisoned,
}
