mod console_appender;
mod registry;
mod trait_;

pub use console_appender::{ConsoleAppender, ConsoleAppenderConfig, Target};
pub use registry::{create_appender_from_options, register_appender};
pub use trait_::LogAppender;
