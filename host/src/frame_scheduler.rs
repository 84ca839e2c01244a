//! # Frame Scheduler 模块
//!
//! 基于真实时钟的逐帧调度器，按固定帧率执行登记的 tick 回调。

use std::ops::ControlFlow;
use std::thread;
use std::time::{Duration, Instant};

use counter_runtime::{Millis, TickCallback, TickHandle, TickQueue, TickScheduler};
use tracing::debug;

/// 实时帧调度器
///
/// 时间从创建时刻开始计算。`run_frame` 执行一帧，
/// `run_until_idle` 以固定帧率循环直到没有待执行的 tick。
#[derive(Debug)]
pub struct FrameScheduler {
    origin: Instant,
    frame_interval: Duration,
    queue: TickQueue,
}

impl FrameScheduler {
    /// 创建调度器
    ///
    /// `frame_rate` 为 0 时按 1 帧/秒处理。
    pub fn new(frame_rate: u32) -> Self {
        Self {
            origin: Instant::now(),
            frame_interval: Duration::from_secs_f64(1.0 / f64::from(frame_rate.max(1))),
            queue: TickQueue::new(),
        }
    }

    pub fn frame_interval(&self) -> Duration {
        self.frame_interval
    }

    /// 立即执行一帧，返回执行的回调数量
    pub fn run_frame(&self) -> usize {
        self.queue.run_frame(self.now())
    }

    /// 等待执行的 tick 数量
    pub fn pending_ticks(&self) -> usize {
        self.queue.len()
    }

    /// 按帧率循环执行，直到队列为空、超过 `timeout` 或 `on_frame` 返回 `Break`
    ///
    /// 每帧结束后调用 `on_frame(now)`。`timeout` 超出 `Instant` 可表示范围时视为没有截止时间。
    /// 返回执行的帧数。
    pub fn run_until_idle(
        &self,
        timeout: Duration,
        mut on_frame: impl FnMut(Millis) -> ControlFlow<()>,
    ) -> usize {
        let deadline = Instant::now().checked_add(timeout);
        let mut next_frame = Instant::now();
        let mut frames = 0;

        while !self.queue.is_empty() {
            let now = Instant::now();
            if deadline.is_some_and(|deadline| now >= deadline) {
                debug!(frames, pending = self.queue.len(), "帧循环超时");
                break;
            }
            if next_frame > now {
                thread::sleep(next_frame - now);
            }
            next_frame += self.frame_interval;

            self.run_frame();
            frames += 1;
            if on_frame(self.now()).is_break() {
                debug!(frames, pending = self.queue.len(), "帧循环被中止");
                break;
            }
        }

        frames
    }
}

impl TickScheduler for FrameScheduler {
    fn now(&self) -> Millis {
        self.origin.elapsed().as_secs_f64() * 1000.0
    }

    fn request_tick(&self, callback: TickCallback) -> TickHandle {
        self.queue.push(callback)
    }

    fn cancel_tick(&self, handle: TickHandle) {
        self.queue.cancel(handle);
    }
}
