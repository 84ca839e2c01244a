//! # Scheduler 模块
//!
//! 逐帧回调调度的抽象边界。
//!
//! 计数动画不直接依赖宿主的帧回调设施，而是通过 [`TickScheduler`] 请求下一次 tick：
//!
//! - `request_tick(callback)`：登记一个在下一帧执行的回调，返回句柄
//! - `cancel_tick(handle)`：撤销尚未执行的回调
//!
//! 在一帧内登记的回调总是在**下一帧**执行，与浏览器的逐帧回调语义一致。
//!
//! [`ManualScheduler`] 是确定性的手动时钟，用于测试和无头模式；
//! 宿主层的实时调度器复用 [`TickQueue`] 管理回调队列。

use std::cell::{Cell, RefCell};
use std::collections::VecDeque;

/// 时间戳（毫秒）
pub type Millis = f64;

/// tick 回调，参数为本帧时间戳
pub type TickCallback = Box<dyn FnOnce(Millis)>;

/// 已登记回调的句柄
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TickHandle(u64);

impl TickHandle {
    /// 获取内部 ID 值
    pub fn value(&self) -> u64 {
        self.0
    }
}

/// 逐帧调度器接口
///
/// 所有方法都取 `&self`：回调执行期间会重新登记下一次 tick，
/// 实现必须在调用回调前释放内部借用。
pub trait TickScheduler {
    /// 当前时间（毫秒）
    fn now(&self) -> Millis;

    /// 登记在下一帧执行的回调
    fn request_tick(&self, callback: TickCallback) -> TickHandle;

    /// 撤销回调；句柄已执行或已撤销时无操作
    fn cancel_tick(&self, handle: TickHandle);
}

/// 回调队列
///
/// 分为 `pending`（下一帧）与 `current`（本帧正在执行）两段，
/// 撤销操作对两段都生效，因此本帧中尚未轮到的回调也能被撤销。
#[derive(Default)]
pub struct TickQueue {
    next_id: Cell<u64>,
    pending: RefCell<Vec<(TickHandle, TickCallback)>>,
    current: RefCell<VecDeque<(TickHandle, TickCallback)>>,
}

impl std::fmt::Debug for TickQueue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TickQueue")
            .field("pending", &self.pending.borrow().len())
            .field("current", &self.current.borrow().len())
            .finish()
    }
}

impl TickQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// 登记回调
    pub fn push(&self, callback: TickCallback) -> TickHandle {
        let id = self.next_id.get() + 1;
        self.next_id.set(id);
        let handle = TickHandle(id);
        self.pending.borrow_mut().push((handle, callback));
        handle
    }

    /// 撤销回调
    ///
    /// # 返回
    /// - `true`: 回调仍在队列中并已移除
    /// - `false`: 回调已执行或不存在
    pub fn cancel(&self, handle: TickHandle) -> bool {
        let mut pending = self.pending.borrow_mut();
        if let Some(index) = pending.iter().position(|(h, _)| *h == handle) {
            pending.remove(index);
            return true;
        }
        drop(pending);

        let mut current = self.current.borrow_mut();
        if let Some(index) = current.iter().position(|(h, _)| *h == handle) {
            current.remove(index);
            return true;
        }
        false
    }

    /// 执行一帧：运行帧开始前登记的所有回调
    ///
    /// 回调中新登记的回调留到下一帧。返回本帧实际执行的回调数量。
    pub fn run_frame(&self, now: Millis) -> usize {
        let frame = std::mem::take(&mut *self.pending.borrow_mut());
        self.current.borrow_mut().extend(frame);

        let mut executed = 0;
        loop {
            let next = self.current.borrow_mut().pop_front();
            match next {
                Some((_, callback)) => {
                    callback(now);
                    executed += 1;
                }
                None => break,
            }
        }
        executed
    }

    /// 等待执行的回调数量
    pub fn len(&self) -> usize {
        self.pending.borrow().len() + self.current.borrow().len()
    }

    /// 队列是否为空
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// 确定性手动时钟调度器
///
/// 时间只在调用 `advance_*` 时前进，每次前进执行一帧。
#[derive(Debug, Default)]
pub struct ManualScheduler {
    now: Cell<Millis>,
    queue: TickQueue,
}

impl ManualScheduler {
    /// 创建从 0 ms 开始的调度器
    pub fn new() -> Self {
        Self::default()
    }

    /// 创建从指定时间开始的调度器
    pub fn starting_at(now: Millis) -> Self {
        Self {
            now: Cell::new(now),
            queue: TickQueue::new(),
        }
    }

    /// 将时间推进到 `t` 并执行一帧
    ///
    /// 时间不会倒退：`t` 早于当前时间时按当前时间执行。
    pub fn advance_to(&self, t: Millis) -> usize {
        let t = t.max(self.now.get());
        self.now.set(t);
        self.queue.run_frame(t)
    }

    /// 将时间推进 `dt` 毫秒并执行一帧
    pub fn advance_by(&self, dt: Millis) -> usize {
        self.advance_to(self.now.get() + dt.max(0.0))
    }

    /// 以固定帧间隔推进，直到队列为空或达到帧数上限
    ///
    /// 返回实际推进的帧数。
    pub fn run_until_idle(&self, frame_ms: Millis, max_frames: usize) -> usize {
        let mut frames = 0;
        while !self.queue.is_empty() && frames < max_frames {
            self.advance_by(frame_ms);
            frames += 1;
        }
        frames
    }

    /// 等待执行的 tick 数量
    pub fn pending_ticks(&self) -> usize {
        self.queue.len()
    }
}

impl TickScheduler for ManualScheduler {
    fn now(&self) -> Millis {
        self.now.get()
    }

    fn request_tick(&self, callback: TickCallback) -> TickHandle {
        self.queue.push(callback)
    }

    fn cancel_tick(&self, handle: TickHandle) {
        self.queue.cancel(handle);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::rc::Rc;

    #[test]
    fn test_callback_runs_on_next_frame() {
        let scheduler = ManualScheduler::new();
        let seen = Rc::new(Cell::new(None));

        let seen_clone = seen.clone();
        scheduler.request_tick(Box::new(move |t| seen_clone.set(Some(t))));
        assert_eq!(scheduler.pending_ticks(), 1);
        assert_eq!(seen.get(), None);

        assert_eq!(scheduler.advance_to(16.0), 1);
        assert_eq!(seen.get(), Some(16.0));
        assert_eq!(scheduler.pending_ticks(), 0);
    }

    #[test]
    fn test_cancel_removes_callback() {
        let scheduler = ManualScheduler::new();
        let fired = Rc::new(Cell::new(false));

        let fired_clone = fired.clone();
        let handle = scheduler.request_tick(Box::new(move |_| fired_clone.set(true)));
        scheduler.cancel_tick(handle);
        // 重复撤销无操作
        scheduler.cancel_tick(handle);

        assert_eq!(scheduler.advance_by(16.0), 0);
        assert!(!fired.get());
    }

    #[test]
    fn test_reregistered_callback_waits_for_next_frame() {
        let scheduler = Rc::new(ManualScheduler::new());
        let count = Rc::new(Cell::new(0));

        let inner_scheduler = scheduler.clone();
        let inner_count = count.clone();
        scheduler.request_tick(Box::new(move |_| {
            inner_count.set(inner_count.get() + 1);
            let again = inner_count.clone();
            inner_scheduler.request_tick(Box::new(move |_| again.set(again.get() + 1)));
        }));

        scheduler.advance_by(16.0);
        assert_eq!(count.get(), 1);
        scheduler.advance_by(16.0);
        assert_eq!(count.get(), 2);
    }

    #[test]
    fn test_cancel_within_same_frame() {
        let scheduler = Rc::new(ManualScheduler::new());
        let fired = Rc::new(Cell::new(false));

        // 第二个回调在第一个回调执行时被撤销
        let victim = Rc::new(Cell::new(None));
        let victim_clone = victim.clone();
        let canceller = scheduler.clone();
        scheduler.request_tick(Box::new(move |_| {
            if let Some(handle) = victim_clone.get() {
                canceller.cancel_tick(handle);
            }
        }));
        let fired_clone = fired.clone();
        let handle = scheduler.request_tick(Box::new(move |_| fired_clone.set(true)));
        victim.set(Some(handle));

        assert_eq!(scheduler.advance_by(16.0), 1);
        assert!(!fired.get());
    }

    #[test]
    fn test_time_never_goes_back() {
        let scheduler = ManualScheduler::starting_at(100.0);
        scheduler.advance_to(50.0);
        assert_eq!(scheduler.now(), 100.0);
        scheduler.advance_by(-10.0);
        assert_eq!(scheduler.now(), 100.0);
    }

    #[test]
    fn test_run_until_idle_respects_limit() {
        let scheduler = Rc::new(ManualScheduler::new());

        fn forever(scheduler: Rc<ManualScheduler>) {
            let next = scheduler.clone();
            scheduler.request_tick(Box::new(move |_| forever(next)));
        }
        forever(scheduler.clone());

        assert_eq!(scheduler.run_until_idle(16.0, 10), 10);
        assert_eq!(scheduler.now(), 160.0);
    }
}
