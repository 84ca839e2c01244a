//! # Config 模块
//!
//! 运行时配置管理，集中管理所有配置项。
//!
//! ## 配置优先级
//!
//! 1. 命令行参数（最高）
//! 2. 配置文件 (config.json)
//! 3. 默认值（最低）

use std::fs;
use std::path::Path;

use counter_runtime::{EasingFunction, MetricSpec, Rounding, landing_metrics};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{info, warn};

/// 帧率上限
pub const MAX_FRAME_RATE: u32 = 240;

/// 应用配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// 目标帧率（帧/秒）
    #[serde(default = "default_frame_rate")]
    pub frame_rate: u32,

    /// 计数动画缓动函数
    #[serde(default)]
    pub easing: EasingFunction,

    /// 显示值取整策略
    #[serde(default)]
    pub rounding: Rounding,

    /// 装饰性抖动配置
    #[serde(default)]
    pub jitter: JitterConfig,

    /// 统计卡片列表
    #[serde(default = "landing_metrics")]
    pub metrics: Vec<MetricSpec>,
}

/// 抖动配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JitterConfig {
    /// 是否启用在线率末位随机数字
    #[serde(default = "default_jitter_enabled")]
    pub enabled: bool,

    /// 随机种子；未配置时使用系统熵
    #[serde(default)]
    pub seed: Option<u64>,
}

fn default_frame_rate() -> u32 {
    60
}

fn default_jitter_enabled() -> bool {
    true
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            frame_rate: default_frame_rate(),
            easing: EasingFunction::default(),
            rounding: Rounding::default(),
            jitter: JitterConfig::default(),
            metrics: landing_metrics(),
        }
    }
}

impl Default for JitterConfig {
    fn default() -> Self {
        Self {
            enabled: default_jitter_enabled(),
            seed: None,
        }
    }
}

impl AppConfig {
    /// 加载配置文件
    ///
    /// 如果文件不存在或解析失败，返回默认配置并记录警告。
    pub fn load(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();

        if !path.exists() {
            warn!(path = %path.display(), "配置文件不存在，使用默认配置");
            return Self::default();
        }

        match fs::read_to_string(path) {
            Ok(content) => match serde_json::from_str(&content) {
                Ok(config) => {
                    info!(path = %path.display(), "配置文件加载成功");
                    config
                }
                Err(e) => {
                    warn!(error = %e, "配置文件解析失败，使用默认配置");
                    Self::default()
                }
            },
            Err(e) => {
                warn!(error = %e, "配置文件读取失败，使用默认配置");
                Self::default()
            }
        }
    }

    /// 保存配置到文件
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let json = serde_json::to_string_pretty(self)
            .map_err(|e| ConfigError::SerializationFailed(e.to_string()))?;

        fs::write(path, json).map_err(|e| ConfigError::IoError(e.to_string()))?;

        Ok(())
    }

    /// 每帧间隔（毫秒）
    pub fn frame_interval_ms(&self) -> f64 {
        1000.0 / f64::from(self.frame_rate.max(1))
    }

    /// 验证配置有效性
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.frame_rate == 0 || self.frame_rate > MAX_FRAME_RATE {
            return Err(ConfigError::ValidationFailed(format!(
                "帧率必须在 1 - {} 之间，实际为 {}",
                MAX_FRAME_RATE, self.frame_rate
            )));
        }

        if self.metrics.is_empty() {
            return Err(ConfigError::ValidationFailed(
                "至少需要配置一张统计卡片".to_string(),
            ));
        }

        for spec in &self.metrics {
            spec.counter_config(self.easing, self.rounding)
                .validate()
                .map_err(|e| {
                    ConfigError::ValidationFailed(format!("卡片 '{}'：{}", spec.display_label(), e))
                })?;
        }

        Ok(())
    }
}

/// 配置错误
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// 序列化失败
    #[error("配置序列化失败: {0}")]
    SerializationFailed(String),
    /// IO 错误
    #[error("配置 IO 错误: {0}")]
    IoError(String),
    /// 验证失败
    #[error("配置验证失败: {0}")]
    ValidationFailed(String),
}
