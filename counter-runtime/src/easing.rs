//! # Easing 模块
//!
//! 缓动函数库，用于计数动画的时间插值。
//!
//! 所有曲线在 `[0, 1]` 上单调不减，且满足 `f(0) = 0`、`f(1) = 1`，
//! 这是计数器单调性保证的前提。会回弹或越界的曲线（elastic、bounce）不在此列。

use std::f64::consts::PI;

use serde::{Deserialize, Serialize};

/// 缓动函数类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EasingFunction {
    /// 线性（匀速）
    Linear,
    /// 二次缓出
    EaseOutQuad,
    /// 三次缓出（计数器默认曲线）
    #[default]
    EaseOutCubic,
    /// 四次缓出
    EaseOutQuart,
    /// 三次缓入缓出
    EaseInOutCubic,
    /// 正弦缓出
    EaseOutSine,
}

impl EasingFunction {
    /// 计算缓动值
    ///
    /// # 参数
    /// - `t`: 时间进度 (0.0 - 1.0)，超出范围会被截断
    ///
    /// # 返回
    /// - 缓动后的进度值 (0.0 - 1.0)
    pub fn apply(&self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);

        match self {
            EasingFunction::Linear => t,
            EasingFunction::EaseOutQuad => 1.0 - (1.0 - t) * (1.0 - t),
            EasingFunction::EaseOutCubic => ease_out_cubic(t),
            EasingFunction::EaseOutQuart => 1.0 - (1.0 - t).powi(4),
            EasingFunction::EaseInOutCubic => {
                if t < 0.5 {
                    4.0 * t * t * t
                } else {
                    1.0 - (-2.0 * t + 2.0).powi(3) / 2.0
                }
            }
            EasingFunction::EaseOutSine => (t * PI / 2.0).sin(),
        }
    }
}

/// 三次缓出：`1 - (1 - t)^3`
fn ease_out_cubic(t: f64) -> f64 {
    1.0 - (1.0 - t).powi(3)
}
