//! # Error 模块
//!
//! 定义 counter-runtime 中使用的错误类型。

use thiserror::Error;

/// 计数动画配置错误
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CounterError {
    /// 目标值不是有限数
    #[error("目标值无效：{value}（必须是有限数）")]
    InvalidTarget { value: f64 },

    /// 起始值不是有限数
    #[error("起始值无效：{value}（必须是有限数）")]
    InvalidStartValue { value: f64 },

    /// 时长为负数或非有限数
    #[error("动画时长无效：{value} ms（必须 >= 0）")]
    InvalidDuration { value: f64 },

    /// 延迟为负数或非有限数
    #[error("启动延迟无效：{value} ms（必须 >= 0）")]
    InvalidDelay { value: f64 },
}

/// Result 类型别名
pub type CounterResult<T> = Result<T, CounterError>;
