//! 配置管理相关的宏定义
//!
//! 提供简化 From trait 实现的宏

/// 为配置类型自动实现 From trait
///
/// 支持两种模式：
/// 1. `impl_from!(ConfigType => Type)` - 调用 Type::new(config)
/// 2. `impl_from!(ConfigType => Type, field: config)` - 使用 Self { config }
#[macro_export]
macro_rules! impl_from {
    // 模式1: 直接调用 new 方法
    ($config_type:ty => $target_type:ty) => {
        impl From<$config_type> for $target_type {
            fn from(config: $config_type) -> Self {
                <$target_type>::new(config)
            }
        }
    };

    // 模式2: 直接使用配置字段构造
    ($config_type:ty => $target_type:ty, field: $field:ident) => {
        impl From<$config_type> for $target_type {
            fn from(config: $config_type) -> Self {
                Self { $field: config }
            }
        }
    };
}

#[cfg(test)]
mod tests {
    #[derive(Debug, Clone)]
    struct TargetConfig {
        target: String,
    }

    #[derive(Debug)]
    struct Writer {
        target: String,
    }

    impl Writer {
        fn new(config: TargetConfig) -> Self {
            Self { target: config.target }
        }
    }

    #[derive(Debug)]
    struct WriterWithConfig {
        config: TargetConfig,
    }

    impl_from!(TargetConfig => Writer);
    impl_from!(TargetConfig => WriterWithConfig, field: config);

    #[test]
    fn test_impl_from_new() {
        let writer = Writer::from(TargetConfig { target: "stdout".to_string() });
        assert_eq!(writer.target, "stdout");
    }

    #[test]
    fn test_impl_from_field() {
        let writer = WriterWithConfig::from(TargetConfig { target: "stderr".to_string() });
        assert_eq!(writer.config.target, "stderr");
    }
}
