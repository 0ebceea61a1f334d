/// 记录一条应用日志
///
/// 第一个参数为 logger，第二个参数为标签（单个或多个），其余参数为消息，
/// 多个消息参数按 printf 规则合并
///
/// # 示例
///
/// ```ignore
/// use service_log::log;
///
/// log!(logger, "info", "server started")?;
/// log!(logger, ["db", "warn"], "slow query %s (%dms)", sql, 1500)?;
/// log!(logger, "error", &err)?;
/// ```
#[macro_export]
macro_rules! log {
    ($logger:expr, $tags:expr $(,)?) => {
        $logger.log($tags, ::std::vec::Vec::new())
    };
    ($logger:expr, $tags:expr, $($arg:expr),+ $(,)?) => {
        $logger.log($tags, ::std::vec![$($crate::log::LogArg::from($arg)),+])
    };
}
