//! # Run 模块
//!
//! 单次计数动画的状态机，不涉及调度。
//!
//! 核心设计：给定绝对时间戳推进状态，同一时间戳重复调用结果不变，
//! 因此可以脱离调度器单独测试。

use serde::Serialize;

use super::config::CounterConfig;
use crate::error::CounterResult;
use crate::scheduler::Millis;

/// 运行状态
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum RunStatus {
    /// 等待开始（尚未到达 start_time）
    #[default]
    Pending,
    /// 正在插值
    Running,
    /// 已到达目标值
    Completed,
    /// 被所有者撤销
    Cancelled,
}

impl RunStatus {
    /// 是否为活跃状态（需要继续 tick）
    pub fn is_active(&self) -> bool {
        matches!(self, Self::Pending | Self::Running)
    }

    /// 是否已结束
    pub fn is_finished(&self) -> bool {
        matches!(self, Self::Completed | Self::Cancelled)
    }
}

/// 一次显示值输出
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Emission {
    /// 产生输出的 tick 时间戳
    pub at: Millis,
    /// 显示值
    pub value: f64,
    /// 是否为终止输出（值恰好等于目标值）
    pub terminal: bool,
}

/// 单次计数动画
///
/// 非终止输出只在显示值沿运动方向前进时产生，
/// 因此目标值等于起始值时（例如 `target = 0`）只有一次终止输出。
#[derive(Debug, Clone)]
pub struct AnimationRun {
    config: CounterConfig,
    start_time: Millis,
    end_time: Millis,
    current_value: f64,
    progress: f64,
    status: RunStatus,
}

impl AnimationRun {
    /// 在 `scheduled_at` 时刻创建动画
    ///
    /// `start_time = scheduled_at + delay`，`end_time = start_time + duration`。
    pub fn new(config: CounterConfig, scheduled_at: Millis) -> CounterResult<Self> {
        config.validate()?;

        let start_time = scheduled_at + config.delay_ms;
        Ok(Self {
            start_time,
            end_time: start_time + config.duration_ms,
            current_value: config.start_value,
            progress: 0.0,
            status: RunStatus::Pending,
            config,
        })
    }

    /// 在时间 `now` 推进动画
    ///
    /// # 返回
    /// - `Some(emission)`: 显示值发生变化
    /// - `None`: 仍在延迟期、显示值未变，或动画已结束
    pub fn tick(&mut self, now: Millis) -> Option<Emission> {
        if !self.status.is_active() || now < self.start_time {
            return None;
        }
        self.status = RunStatus::Running;

        let duration = self.config.duration_ms;
        let progress = if duration <= 0.0 {
            1.0
        } else {
            ((now - self.start_time) / duration).clamp(0.0, 1.0)
        };
        self.progress = progress;

        if progress >= 1.0 {
            self.current_value = self.config.target;
            self.status = RunStatus::Completed;
            return Some(Emission {
                at: now,
                value: self.config.target,
                terminal: true,
            });
        }

        let display = self.config.rounding.apply(self.interpolate(progress));
        let direction = self.config.target - self.config.start_value;
        if (display - self.current_value) * direction.signum() <= 0.0 || direction == 0.0 {
            return None;
        }

        self.current_value = display;
        Some(Emission {
            at: now,
            value: display,
            terminal: false,
        })
    }

    /// 未取整的插值结果
    ///
    /// 写成 `a(1-e) + b·e` 而非 `a + (b-a)·e`，有限输入下不会溢出。
    fn interpolate(&self, progress: f64) -> f64 {
        let eased = self.config.easing.apply(progress);
        self.config.start_value * (1.0 - eased) + self.config.target * eased
    }

    /// 撤销动画
    ///
    /// # 返回
    /// - `true`: 动画由活跃变为撤销
    /// - `false`: 动画已结束（完成后撤销无操作）
    pub fn cancel(&mut self) -> bool {
        if self.status.is_active() {
            self.status = RunStatus::Cancelled;
            true
        } else {
            false
        }
    }

    /// 当前显示值
    pub fn current_value(&self) -> f64 {
        self.current_value
    }

    /// 当前进度（0.0 - 1.0，未应用缓动）
    pub fn progress(&self) -> f64 {
        self.progress
    }

    pub fn status(&self) -> RunStatus {
        self.status
    }

    pub fn start_time(&self) -> Millis {
        self.start_time
    }

    pub fn end_time(&self) -> Millis {
        self.end_time
    }

    pub fn config(&self) -> &CounterConfig {
        &self.config
    }
}
