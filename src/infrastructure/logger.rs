//! 日志基础设施
//!
//! 日志同时输出到控制台和按日期分割的文件。

use std::io;

use anyhow::Result;
use tracing_appender::{non_blocking, rolling};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::LoggingConfig;

pub struct Logger;

impl Logger {
    /// 初始化日志系统
    ///
    /// 1. 创建日志目录
    /// 2. 设置按日期分割的文件日志
    /// 3. 根据配置决定是否同时输出到控制台
    pub fn init(config: &LoggingConfig) -> Result<()> {
        // 创建日志目录
        std::fs::create_dir_all(&config.log_path)?;

        // 创建文件日志 appender（按日期分割）
        let file_appender = rolling::daily(&config.log_path, &config.file_prefix);
        let (non_blocking, _guard) = non_blocking(file_appender);

        let registry = tracing_subscriber::registry()
            .with(EnvFilter::new(&config.level))
            .with(
                // 文件日志层
                fmt::layer()
                    .with_writer(non_blocking)
                    .with_ansi(false) // 文件中不使用颜色
                    .with_target(false), // 不显示目标模块
            );

        if config.console_output {
            registry
                .with(
                    // 控制台日志层
                    fmt::layer().with_writer(io::stdout).with_ansi(true),
                )
                .init();
        } else {
            registry.init();
        }

        // _guard 控制着日志写入器的生命周期，这里故意"泄露"它，
        // 保证进程退出前日志持续可写
        std::mem::forget(_guard);

        Ok(())
    }
}
