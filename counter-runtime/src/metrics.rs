//! # Metrics 模块
//!
//! 落地页统计卡片：总成交量、运行中策略数、最大月回撤、30 天在线率。
//!
//! 每张卡片对应一次计数动画；这里只负责卡片定义和显示格式，
//! 调度由调用方完成。在线率末尾的随机小数位是纯装饰，
//! 通过 [`JitterSource`] 注入，不影响计数值本身。

use serde::{Deserialize, Serialize};

use crate::counter::{CounterConfig, Rounding};
use crate::easing::EasingFunction;
use crate::scheduler::Millis;

/// 统计卡片类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MetricKind {
    /// 总成交量，显示为 `$128.4M`
    Volume,
    /// 运行中策略数，显示为整数
    Strategies,
    /// 最大月回撤，显示为 `-9%`
    Drawdown,
    /// 在线率，显示为 `99.d%`（整数部分 + 一位抖动小数）
    Uptime,
}

impl MetricKind {
    /// 默认标题
    pub fn label(&self) -> &'static str {
        match self {
            MetricKind::Volume => "Total Volume",
            MetricKind::Strategies => "Strategies Running",
            MetricKind::Drawdown => "Max Monthly Drawdown",
            MetricKind::Uptime => "Uptime (30d)",
        }
    }

    /// 格式化显示值
    pub fn format(&self, value: f64, jitter: &mut dyn JitterSource) -> String {
        match self {
            MetricKind::Volume => format!("${:.1}M", value / 1_000_000.0),
            MetricKind::Strategies => format!("{value}"),
            MetricKind::Drawdown => format!("-{value}%"),
            // 末位小数由抖动提供，显示值只取整数部分
            MetricKind::Uptime => format!("{}.{}%", value.trunc(), jitter.next_digit()),
        }
    }
}

/// 统计卡片定义
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricSpec {
    pub kind: MetricKind,

    /// 自定义标题；为空时使用默认标题
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,

    pub target: f64,

    pub duration_ms: Millis,

    #[serde(default)]
    pub delay_ms: Millis,
}

impl MetricSpec {
    pub fn new(kind: MetricKind, target: f64, duration_ms: Millis, delay_ms: Millis) -> Self {
        Self {
            kind,
            label: None,
            target,
            duration_ms,
            delay_ms,
        }
    }

    /// 显示标题
    pub fn display_label(&self) -> &str {
        self.label.as_deref().unwrap_or_else(|| self.kind.label())
    }

    /// 转换为计数动画配置
    pub fn counter_config(&self, easing: EasingFunction, rounding: Rounding) -> CounterConfig {
        CounterConfig::new(self.target, self.duration_ms)
            .with_delay(self.delay_ms)
            .with_easing(easing)
            .with_rounding(rounding)
    }
}

/// 落地页的四张默认统计卡片
pub fn landing_metrics() -> Vec<MetricSpec> {
    vec![
        MetricSpec::new(MetricKind::Volume, 128_400_000.0, 1800.0, 0.0),
        MetricSpec::new(MetricKind::Strategies, 842.0, 1600.0, 200.0),
        MetricSpec::new(MetricKind::Drawdown, 9.0, 1400.0, 400.0),
        MetricSpec::new(MetricKind::Uptime, 99.0, 1400.0, 600.0),
    ]
}

/// 装饰性随机数字来源
pub trait JitterSource {
    /// 返回 0..=8 之间的数字
    fn next_digit(&mut self) -> u8;
}

/// 关闭抖动：总是返回 0
#[derive(Debug, Clone, Copy, Default)]
pub struct NoJitter;

impl JitterSource for NoJitter {
    fn next_digit(&mut self) -> u8 {
        0
    }
}
