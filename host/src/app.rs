//! # App 模块
//!
//! 驱动统计面板：实时模式按帧率刷新终端，无头模式用手动时钟快速跑完。

use std::io::{self, Write};
use std::ops::ControlFlow;
use std::rc::Rc;
use std::time::Duration;

use counter_runtime::{JitterSource, ManualScheduler, NoJitter};
use tracing::{debug, info, warn};

use crate::config::AppConfig;
use crate::error::{HostError, HostResult};
use crate::frame_scheduler::FrameScheduler;
use crate::jitter::SeededJitter;
use crate::panel::MetricsPanel;

/// 无头模式的帧数上限
const MAX_HEADLESS_FRAMES: usize = 100_000;

/// 实时模式的额外等待时间
const REALTIME_SLACK: Duration = Duration::from_secs(1);

/// 根据配置创建抖动源
pub fn jitter_from_config(config: &AppConfig) -> Box<dyn JitterSource> {
    if !config.jitter.enabled {
        return Box::new(NoJitter);
    }
    match config.jitter.seed {
        Some(seed) => Box::new(SeededJitter::from_seed(seed)),
        None => Box::new(SeededJitter::from_entropy()),
    }
}

/// 所有卡片中最晚的结束时间（毫秒，相对挂载时刻）
fn longest_run_ms(config: &AppConfig) -> f64 {
    config
        .metrics
        .iter()
        .map(|spec| spec.delay_ms + spec.duration_ms)
        .fold(0.0, f64::max)
}

/// 实时模式的帧循环时限
///
/// 超出 `Duration` 可表示范围时取 `Duration::MAX`。
pub fn realtime_timeout(config: &AppConfig) -> Duration {
    Duration::try_from_secs_f64(longest_run_ms(config) / 1000.0)
        .unwrap_or(Duration::MAX)
        .saturating_add(REALTIME_SLACK)
}

/// 无头模式：以配置帧率推进手动时钟，返回每帧渲染结果
pub fn run_headless(config: &AppConfig, jitter: &mut dyn JitterSource) -> HostResult<Vec<String>> {
    config.validate()?;

    let scheduler = Rc::new(ManualScheduler::new());
    let panel = MetricsPanel::mount(scheduler.clone(), &config.metrics, config.easing, config.rounding)?;

    let frame_ms = config.frame_interval_ms();
    let mut frames = Vec::new();
    while scheduler.pending_ticks() > 0 && frames.len() < MAX_HEADLESS_FRAMES {
        scheduler.advance_by(frame_ms);
        frames.push(panel.render(jitter));
    }

    debug!(frames = frames.len(), settled = panel.is_settled(), "无头模式结束");
    Ok(frames)
}

/// 实时模式：按帧率把面板刷新到 `out`
///
/// 同一行原地刷新，结束后换行。返回执行的帧数。
/// 写入失败时立即停止帧循环，撤销剩余动画并返回 [`HostError::Io`]。
pub fn run_realtime(
    config: &AppConfig,
    jitter: &mut dyn JitterSource,
    out: &mut dyn Write,
) -> HostResult<usize> {
    config.validate()?;

    let scheduler = Rc::new(FrameScheduler::new(config.frame_rate));
    let panel = MetricsPanel::mount(scheduler.clone(), &config.metrics, config.easing, config.rounding)?;
    info!(
        cards = panel.cards().len(),
        frame_rate = config.frame_rate,
        "统计面板已挂载"
    );

    let mut write_error: Option<io::Error> = None;
    let frames = scheduler.run_until_idle(realtime_timeout(config), |_| {
        let line = panel.render(jitter);
        match write!(out, "\r{line}").and_then(|()| out.flush()) {
            Ok(()) => ControlFlow::Continue(()),
            Err(e) => {
                write_error = Some(e);
                ControlFlow::Break(())
            }
        }
    });
    let result = match write_error {
        Some(e) => Err(e),
        None => writeln!(out),
    };
    if let Err(e) = result {
        let cancelled = panel.cancel_all();
        warn!(error = %e, cancelled, "输出写入失败，帧循环已停止");
        return Err(HostError::Io(e.to_string()));
    }

    if !panel.is_settled() {
        let cancelled = panel.cancel_all();
        info!(cancelled, "帧循环超时，剩余动画已撤销");
    }
    info!(frames, "统计面板动画结束");
    Ok(frames)
}
