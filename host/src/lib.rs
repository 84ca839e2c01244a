//! # Host
//!
//! 落地页统计面板的终端宿主：加载配置、按帧率驱动计数动画并输出到终端。
//!
//! ## 模块结构
//!
//! - [`config`]：配置加载与验证
//! - [`frame_scheduler`]：实时逐帧调度器
//! - [`panel`]：统计卡片面板（持有并撤销计数动画）
//! - [`jitter`]：装饰性随机数字来源
//! - [`app`]：实时 / 无头运行入口

pub mod app;
pub mod config;
pub mod error;
pub mod frame_scheduler;
pub mod jitter;
pub mod panel;

pub use app::{jitter_from_config, realtime_timeout, run_headless, run_realtime};
pub use config::{AppConfig, ConfigError, JitterConfig};
pub use error::{HostError, HostResult};
pub use frame_scheduler::FrameScheduler;
pub use jitter::SeededJitter;
pub use panel::{MetricCard, MetricsPanel};
