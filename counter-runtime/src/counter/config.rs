//! 计数动画配置与显示取整策略。

use serde::{Deserialize, Serialize};

use crate::easing::EasingFunction;
use crate::error::{CounterError, CounterResult};
use crate::scheduler::Millis;

/// 显示值取整策略
///
/// 负目标值时 `Floor` 与 `Truncate` 结果不同：
/// `-43.75` 在 `Floor` 下为 `-44`，在 `Truncate` 下为 `-43`。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Rounding {
    /// 向负无穷取整（整数计数器默认）
    #[default]
    Floor,
    /// 向零取整
    Truncate,
    /// 不取整，保留小数
    Exact,
}

impl Rounding {
    pub fn apply(&self, value: f64) -> f64 {
        match self {
            Rounding::Floor => value.floor(),
            Rounding::Truncate => value.trunc(),
            Rounding::Exact => value,
        }
    }
}

/// 计数动画配置
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CounterConfig {
    /// 目标值
    pub target: f64,

    /// 动画时长（毫秒）；0 表示首个 tick 直接到达目标值
    #[serde(default = "default_duration_ms")]
    pub duration_ms: Millis,

    /// 启动延迟（毫秒）
    #[serde(default)]
    pub delay_ms: Millis,

    /// 起始显示值
    #[serde(default)]
    pub start_value: f64,

    /// 缓动函数
    #[serde(default)]
    pub easing: EasingFunction,

    /// 取整策略
    #[serde(default)]
    pub rounding: Rounding,
}

fn default_duration_ms() -> Millis {
    1600.0
}

impl CounterConfig {
    /// 创建配置（无延迟、从 0 开始、三次缓出、向下取整）
    pub fn new(target: f64, duration_ms: Millis) -> Self {
        Self {
            target,
            duration_ms,
            delay_ms: 0.0,
            start_value: 0.0,
            easing: EasingFunction::default(),
            rounding: Rounding::default(),
        }
    }

    /// 设置延迟
    pub fn with_delay(mut self, delay_ms: Millis) -> Self {
        self.delay_ms = delay_ms;
        self
    }

    /// 设置起始值
    pub fn with_start_value(mut self, start_value: f64) -> Self {
        self.start_value = start_value;
        self
    }

    /// 设置缓动函数
    pub fn with_easing(mut self, easing: EasingFunction) -> Self {
        self.easing = easing;
        self
    }

    /// 设置取整策略
    pub fn with_rounding(mut self, rounding: Rounding) -> Self {
        self.rounding = rounding;
        self
    }

    /// 验证配置有效性
    ///
    /// 非法配置一律拒绝，不做归一化。
    pub fn validate(&self) -> CounterResult<()> {
        if !self.target.is_finite() {
            return Err(CounterError::InvalidTarget { value: self.target });
        }
        if !self.start_value.is_finite() {
            return Err(CounterError::InvalidStartValue {
                value: self.start_value,
            });
        }
        if !self.duration_ms.is_finite() || self.duration_ms < 0.0 {
            return Err(CounterError::InvalidDuration {
                value: self.duration_ms,
            });
        }
        if !self.delay_ms.is_finite() || self.delay_ms < 0.0 {
            return Err(CounterError::InvalidDelay {
                value: self.delay_ms,
            });
        }
        Ok(())
    }
}
