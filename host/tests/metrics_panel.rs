//! # 统计面板集成测试
//!
//! 测试 MetricsPanel → start_counter → 调度器 的执行链路。
//! 除实时模式外都使用手动时钟，不依赖真实时间。

use std::io::{self, Write};
use std::rc::Rc;
use std::time::Duration;

use counter_runtime::{
    CounterError, EasingFunction, ManualScheduler, MetricKind, MetricSpec, NoJitter, Rounding,
    RunStatus, landing_metrics,
};
use host::{
    AppConfig, HostError, MetricsPanel, SeededJitter, realtime_timeout, run_headless, run_realtime,
};

fn mount_landing(scheduler: &Rc<ManualScheduler>) -> MetricsPanel {
    MetricsPanel::mount(
        scheduler.clone(),
        &landing_metrics(),
        EasingFunction::EaseOutCubic,
        Rounding::Floor,
    )
    .unwrap()
}

/// 测试面板在延迟期、中途和结束时的显示
#[test]
fn test_landing_panel_frames() {
    let scheduler = Rc::new(ManualScheduler::new());
    let panel = mount_landing(&scheduler);

    insta::assert_snapshot!(
        panel.render(&mut NoJitter),
        @"Total Volume: $0.0M | Strategies Running: 0 | Max Monthly Drawdown: -0% | Uptime (30d): 0.0%"
    );

    scheduler.advance_to(1000.0);
    insta::assert_snapshot!(
        panel.render(&mut NoJitter),
        @"Total Volume: $117.1M | Strategies Running: 736 | Max Monthly Drawdown: -7% | Uptime (30d): 62.0%"
    );
    assert!(!panel.is_settled());

    scheduler.advance_to(2000.0);
    insta::assert_snapshot!(
        panel.render(&mut NoJitter),
        @"Total Volume: $128.4M | Strategies Running: 842 | Max Monthly Drawdown: -9% | Uptime (30d): 99.0%"
    );
    assert!(panel.is_settled());
    assert_eq!(scheduler.pending_ticks(), 0);
}

/// 测试各卡片在自己的延迟结束前保持初始值
#[test]
fn test_delays_are_per_card() {
    let scheduler = Rc::new(ManualScheduler::new());
    let panel = mount_landing(&scheduler);

    scheduler.advance_to(300.0);
    let cards = panel.cards();
    assert!(cards[0].handle().value() > 0.0);
    assert!(cards[1].handle().value() > 0.0);
    assert_eq!(cards[2].handle().value(), 0.0);
    assert_eq!(cards[2].handle().status(), RunStatus::Pending);
    assert_eq!(cards[3].handle().value(), 0.0);
}

/// 测试卸载面板时撤销所有未完成的动画
#[test]
fn test_drop_panel_cancels_runs() {
    let scheduler = Rc::new(ManualScheduler::new());
    let panel = mount_landing(&scheduler);

    scheduler.advance_to(500.0);
    assert_eq!(scheduler.pending_ticks(), 4);

    drop(panel);
    assert_eq!(scheduler.pending_ticks(), 0);
    assert_eq!(scheduler.advance_to(2000.0), 0);
}

/// 测试显式撤销与重复撤销
#[test]
fn test_cancel_all_is_idempotent() {
    let scheduler = Rc::new(ManualScheduler::new());
    let panel = mount_landing(&scheduler);

    scheduler.advance_to(1000.0);
    assert_eq!(panel.cancel_all(), 4);
    assert_eq!(panel.cancel_all(), 0);

    let frozen = panel.render(&mut NoJitter);
    scheduler.advance_to(2000.0);
    assert_eq!(panel.render(&mut NoJitter), frozen);
    assert!(panel.is_settled());
}

/// 测试无效卡片配置导致挂载失败且不残留 tick
#[test]
fn test_invalid_spec_rejected() {
    let scheduler = Rc::new(ManualScheduler::new());
    let specs = vec![
        MetricSpec::new(MetricKind::Volume, 1_000_000.0, 1000.0, 0.0),
        MetricSpec::new(MetricKind::Strategies, 10.0, 1000.0, -50.0),
    ];

    let result = MetricsPanel::mount(
        scheduler.clone(),
        &specs,
        EasingFunction::EaseOutCubic,
        Rounding::Floor,
    );
    assert_eq!(
        result.unwrap_err(),
        HostError::Counter(CounterError::InvalidDelay { value: -50.0 })
    );
    assert_eq!(scheduler.pending_ticks(), 0);
}

/// 测试无头模式跑完全部动画
#[test]
fn test_headless_run() {
    let mut config = AppConfig::default();
    config.jitter.enabled = false;

    let frames = run_headless(&config, &mut NoJitter).unwrap();
    assert!(frames.len() >= 120);
    insta::assert_snapshot!(
        frames.last().unwrap(),
        @"Total Volume: $128.4M | Strategies Running: 842 | Max Monthly Drawdown: -9% | Uptime (30d): 99.0%"
    );
}

/// 测试负目标值在截断策略下的显示
#[test]
fn test_headless_truncate_negative() {
    let mut config = AppConfig::default();
    config.rounding = Rounding::Truncate;
    config.frame_rate = 2;
    config.metrics = vec![MetricSpec::new(MetricKind::Strategies, -50.0, 1000.0, 0.0)];

    let frames = run_headless(&config, &mut NoJitter).unwrap();
    assert_eq!(frames, vec!["Strategies Running: -43", "Strategies Running: -50"]);
}

/// 测试无头模式拒绝无效配置
#[test]
fn test_headless_rejects_invalid_config() {
    let mut config = AppConfig::default();
    config.frame_rate = 0;
    assert!(matches!(
        run_headless(&config, &mut NoJitter),
        Err(HostError::Config(_))
    ));
}

/// 测试实时模式输出最终一帧
#[test]
fn test_realtime_run_writes_final_frame() {
    let mut config = AppConfig::default();
    config.frame_rate = 240;
    config.metrics = vec![
        MetricSpec::new(MetricKind::Strategies, 842.0, 40.0, 0.0),
        MetricSpec::new(MetricKind::Uptime, 99.0, 30.0, 10.0),
    ];

    let mut out = Vec::new();
    let mut jitter = SeededJitter::from_seed(1);
    let frames = run_realtime(&config, &mut jitter, &mut out).unwrap();
    assert!(frames > 0);

    let text = String::from_utf8(out).unwrap();
    assert!(text.ends_with('\n'));
    let last = text.trim_end().rsplit('\r').next().unwrap();
    assert!(last.starts_with("Strategies Running: 842 | Uptime (30d): 99."));
}

/// 始终写入失败的输出（模拟已关闭的管道）
struct BrokenPipe {
    attempts: usize,
}

impl Write for BrokenPipe {
    fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
        self.attempts += 1;
        Err(io::Error::new(io::ErrorKind::BrokenPipe, "管道已关闭"))
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// 测试超长时长的配置不会让时限计算溢出
#[test]
fn test_realtime_timeout_saturates() {
    let mut config = AppConfig::default();
    config.metrics = vec![MetricSpec::new(MetricKind::Strategies, 842.0, 1e30, 0.0)];
    assert!(config.validate().is_ok());
    assert_eq!(realtime_timeout(&config), Duration::MAX);

    config.metrics = vec![MetricSpec::new(MetricKind::Strategies, 842.0, 1000.0, 500.0)];
    assert_eq!(realtime_timeout(&config), Duration::from_millis(2500));
}

/// 测试输出写入失败时停止帧循环并返回错误
#[test]
fn test_realtime_stops_on_write_error() {
    let mut config = AppConfig::default();
    config.frame_rate = 240;
    config.metrics = vec![MetricSpec::new(MetricKind::Strategies, 842.0, 1e30, 0.0)];

    let mut out = BrokenPipe { attempts: 0 };
    let result = run_realtime(&config, &mut NoJitter, &mut out);
    assert!(matches!(result, Err(HostError::Io(_))));
    assert_eq!(out.attempts, 1);
}
