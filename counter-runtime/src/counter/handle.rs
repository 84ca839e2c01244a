//! # Handle 模块
//!
//! 把 [`AnimationRun`] 接到 [`TickScheduler`] 上。
//!
//! 每次 tick 后动画仍活跃时重新登记下一次 tick；调度器只通过弱引用持有动画，
//! 句柄被 drop 时自动撤销，动画的所有者消失后不会再有任何输出。

use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};

use super::config::CounterConfig;
use super::run::{AnimationRun, Emission, RunStatus};
use crate::error::CounterResult;
use crate::scheduler::{Millis, TickHandle, TickScheduler};

/// 输出监听器
pub type Listener = Box<dyn FnMut(&Emission)>;

struct RunCell {
    run: RefCell<AnimationRun>,
    pending_tick: Cell<Option<TickHandle>>,
    listeners: RefCell<Vec<Listener>>,
    emissions: RefCell<Vec<Emission>>,
    scheduler: Rc<dyn TickScheduler>,
}

impl RunCell {
    fn schedule(self: &Rc<Self>) {
        let weak: Weak<RunCell> = Rc::downgrade(self);
        let handle = self.scheduler.request_tick(Box::new(move |now| {
            if let Some(cell) = weak.upgrade() {
                cell.on_tick(now);
            }
        }));
        self.pending_tick.set(Some(handle));
    }

    fn on_tick(self: &Rc<Self>, now: Millis) {
        self.pending_tick.set(None);

        let emission = self.run.borrow_mut().tick(now);
        if let Some(emission) = emission {
            self.emissions.borrow_mut().push(emission);
            self.notify(&emission);
        }

        // 监听器可能已在回调中撤销动画
        if self.run.borrow().status().is_active() {
            self.schedule();
        }
    }

    fn notify(&self, emission: &Emission) {
        let mut listeners = std::mem::take(&mut *self.listeners.borrow_mut());
        for listener in listeners.iter_mut() {
            // 前一个监听器撤销了动画，后续监听器不再收到输出
            if self.run.borrow().status() == RunStatus::Cancelled {
                break;
            }
            listener(emission);
        }

        // 通知期间新增的监听器排在后面
        let mut slot = self.listeners.borrow_mut();
        listeners.append(&mut slot);
        *slot = listeners;
    }

    fn cancel(&self) -> bool {
        let cancelled = self.run.borrow_mut().cancel();
        if let Some(handle) = self.pending_tick.take() {
            self.scheduler.cancel_tick(handle);
        }
        cancelled
    }
}

/// 计数动画句柄
///
/// 持有句柄即持有动画：`cancel()` 或 drop 都会撤销尚未完成的动画。
pub struct CounterHandle {
    cell: Rc<RunCell>,
}

impl std::fmt::Debug for CounterHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let run = self.cell.run.borrow();
        f.debug_struct("CounterHandle")
            .field("target", &run.config().target)
            .field("value", &run.current_value())
            .field("status", &run.status())
            .finish()
    }
}

/// 创建并调度一次计数动画
///
/// `start_time` 取调度器当前时间加延迟；首个 tick 在下一帧执行。
/// 每次调用都是独立的动画，互不影响。
pub fn start_counter(
    scheduler: Rc<dyn TickScheduler>,
    config: CounterConfig,
) -> CounterResult<CounterHandle> {
    let run = AnimationRun::new(config, scheduler.now())?;
    let cell = Rc::new(RunCell {
        run: RefCell::new(run),
        pending_tick: Cell::new(None),
        listeners: RefCell::new(Vec::new()),
        emissions: RefCell::new(Vec::new()),
        scheduler,
    });
    cell.schedule();
    Ok(CounterHandle { cell })
}

impl CounterHandle {
    /// 当前显示值
    pub fn value(&self) -> f64 {
        self.cell.run.borrow().current_value()
    }

    pub fn status(&self) -> RunStatus {
        self.cell.run.borrow().status()
    }

    /// 当前进度（0.0 - 1.0）
    pub fn progress(&self) -> f64 {
        self.cell.run.borrow().progress()
    }

    pub fn start_time(&self) -> Millis {
        self.cell.run.borrow().start_time()
    }

    pub fn end_time(&self) -> Millis {
        self.cell.run.borrow().end_time()
    }

    pub fn target(&self) -> f64 {
        self.cell.run.borrow().config().target
    }

    /// 是否已结束（完成或撤销）
    pub fn is_finished(&self) -> bool {
        self.status().is_finished()
    }

    /// 至今为止的全部输出
    pub fn emissions(&self) -> Vec<Emission> {
        self.cell.emissions.borrow().clone()
    }

    /// 订阅后续输出
    pub fn subscribe(&self, listener: impl FnMut(&Emission) + 'static) {
        self.cell.listeners.borrow_mut().push(Box::new(listener));
    }

    /// 撤销动画
    ///
    /// 返回后不会再产生任何输出。可重复调用；完成后调用无操作。
    ///
    /// # 返回
    /// - `true`: 本次调用撤销了活跃的动画
    /// - `false`: 动画已结束
    pub fn cancel(&self) -> bool {
        self.cell.cancel()
    }
}

impl Drop for CounterHandle {
    fn drop(&mut self) {
        self.cell.cancel();
    }
}
