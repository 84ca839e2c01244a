//! # Counter 模块
//!
//! 基于时间的数字计数动画。
//!
//! ## 行为
//!
//! 1. 调度时记录 `start_time = now + delay`、`end_time = start_time + duration`
//! 2. 每次 tick：
//!    - `t < start_time`：保持起始值，继续等待
//!    - 否则 `progress = clamp((t - start_time) / duration, 0, 1)`，
//!      显示值为 `round(lerp(start, target, ease(progress)))`
//!    - `progress < 1` 继续 tick；否则输出**恰好等于** `target` 的终止值并停止
//! 3. `cancel()` 后不再产生输出
//!
//! ## 使用示例
//!
//! ```rust,ignore
//! let scheduler = Rc::new(ManualScheduler::new());
//! let handle = start_counter(
//!     scheduler.clone(),
//!     CounterConfig::new(842.0, 1600.0).with_delay(200.0),
//! )?;
//!
//! scheduler.advance_to(1000.0);
//! assert_eq!(handle.value(), 736.0);
//! ```

mod config;
mod handle;
mod run;

pub use config::{CounterConfig, Rounding};
pub use handle::{CounterHandle, Listener, start_counter};
pub use run::{AnimationRun, Emission, RunStatus};
