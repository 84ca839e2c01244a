//! # Counter Runtime
//!
//! 落地页数字计数动画的核心库。
//!
//! ## 架构概述
//!
//! `counter-runtime` 是纯逻辑核心，不依赖任何 IO、渲染或真实时钟。
//! 它通过 **逐帧回调** 与宿主层（Host）协作：
//!
//! ```text
//! Host                              Runtime
//!   │                                  │
//!   │──── start_counter(config) ─────►│ 登记首个 tick
//!   │                                  │
//!   │──── tick(now) ─────────────────►│ 计算进度，输出显示值
//!   │◄─── request_tick ───────────────│ 未完成时登记下一次 tick
//!   │                                  │
//!   │──── cancel / drop ─────────────►│ 撤销待执行的 tick
//! ```
//!
//! ## 核心类型
//!
//! - [`CounterConfig`]：计数动画配置（目标值、时长、延迟）
//! - [`CounterHandle`]：运行中动画的句柄，drop 时自动撤销
//! - [`AnimationRun`]：不含调度的纯状态机
//! - [`TickScheduler`]：逐帧调度接口；[`ManualScheduler`] 为确定性实现
//!
//! ## 模块结构
//!
//! - [`counter`]：计数动画
//! - [`scheduler`]：调度边界
//! - [`easing`]：缓动函数
//! - [`transform`]：区间映射（滚动/指针联动样式）
//! - [`metrics`]：统计卡片定义与格式化
//! - [`error`]：错误类型定义

pub mod counter;
pub mod easing;
pub mod error;
pub mod metrics;
pub mod scheduler;
pub mod transform;

// 重导出核心类型
pub use counter::{
    AnimationRun, CounterConfig, CounterHandle, Emission, Rounding, RunStatus, start_counter,
};
pub use easing::EasingFunction;
pub use error::{CounterError, CounterResult};
pub use metrics::{JitterSource, MetricKind, MetricSpec, NoJitter, landing_metrics};
pub use scheduler::{ManualScheduler, Millis, TickCallback, TickHandle, TickQueue, TickScheduler};
pub use transform::{HeroTilt, NavbarStyle, RangeMap};
