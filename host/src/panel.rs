//! # Panel 模块
//!
//! 统计卡片面板：挂载时为每张卡片启动一次计数动画，卸载时全部撤销。
//!
//! 面板持有所有 [`CounterHandle`]，因此无论是正常结束、提前退出
//! 还是面板被 drop，未完成的动画都会被撤销。

use std::rc::Rc;

use counter_runtime::{
    CounterHandle, EasingFunction, JitterSource, MetricSpec, Rounding, TickScheduler,
    start_counter,
};
use tracing::debug;

use crate::error::HostResult;

/// 单张统计卡片
#[derive(Debug)]
pub struct MetricCard {
    spec: MetricSpec,
    handle: CounterHandle,
}

impl MetricCard {
    pub fn spec(&self) -> &MetricSpec {
        &self.spec
    }

    pub fn handle(&self) -> &CounterHandle {
        &self.handle
    }

    /// 当前显示文本
    pub fn display(&self, jitter: &mut dyn JitterSource) -> String {
        self.spec.kind.format(self.handle.value(), jitter)
    }
}

/// 统计卡片面板
#[derive(Debug)]
pub struct MetricsPanel {
    cards: Vec<MetricCard>,
}

impl MetricsPanel {
    /// 挂载面板，为每张卡片启动计数动画
    ///
    /// 任一卡片配置无效时返回错误，已启动的动画随之撤销。
    pub fn mount(
        scheduler: Rc<dyn TickScheduler>,
        specs: &[MetricSpec],
        easing: EasingFunction,
        rounding: Rounding,
    ) -> HostResult<Self> {
        let mut cards = Vec::with_capacity(specs.len());
        for spec in specs {
            let handle = start_counter(scheduler.clone(), spec.counter_config(easing, rounding))?;
            debug!(
                label = spec.display_label(),
                target = spec.target,
                start = handle.start_time(),
                end = handle.end_time(),
                "计数动画已启动"
            );
            cards.push(MetricCard {
                spec: spec.clone(),
                handle,
            });
        }
        Ok(Self { cards })
    }

    pub fn cards(&self) -> &[MetricCard] {
        &self.cards
    }

    /// 所有动画都已结束
    pub fn is_settled(&self) -> bool {
        self.cards.iter().all(|card| card.handle.is_finished())
    }

    /// 渲染为单行文本
    pub fn render(&self, jitter: &mut dyn JitterSource) -> String {
        self.cards
            .iter()
            .map(|card| format!("{}: {}", card.spec.display_label(), card.display(jitter)))
            .collect::<Vec<_>>()
            .join(" | ")
    }

    /// 撤销所有未完成的动画，返回实际撤销的数量
    pub fn cancel_all(&self) -> usize {
        let cancelled = self
            .cards
            .iter()
            .filter(|card| card.handle.cancel())
            .count();
        if cancelled > 0 {
            debug!(cancelled, "计数动画已撤销");
        }
        cancelled
    }
}

impl Drop for MetricsPanel {
    fn drop(&mut self) {
        self.cancel_all();
    }
}
