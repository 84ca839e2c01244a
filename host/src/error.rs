//! # Error 模块
//!
//! 宿主层错误类型。

use counter_runtime::CounterError;
use thiserror::Error;

use crate::config::ConfigError;

/// 宿主层统一错误类型
#[derive(Error, Debug, Clone, PartialEq)]
pub enum HostError {
    /// 计数动画配置错误
    #[error("计数动画错误: {0}")]
    Counter(#[from] CounterError),

    /// 配置错误
    #[error("{0}")]
    Config(#[from] ConfigError),

    /// 输出写入失败
    #[error("输出写入失败: {0}")]
    Io(String),
}

/// Result 类型别名
pub type HostResult<T> = Result<T, HostError>;
