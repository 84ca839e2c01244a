//! # Host
//!
//! 落地页统计面板的终端宿主。
//!
//! ## 用法
//!
//! ```bash
//! cargo run -p host
//! cargo run -p host -- --config config.json --fps 30
//! cargo run -p host -- --headless --seed 42
//! cargo run -p host -- --print-config > config.json
//! ```

use std::io;
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use host::{AppConfig, jitter_from_config, run_headless, run_realtime};
use tracing::Level;

#[derive(Parser)]
#[command(name = "host")]
#[command(about = "落地页统计面板 - 在终端中播放计数动画")]
#[command(version)]
struct Cli {
    /// 配置文件路径（默认：config.json）
    #[arg(short, long, default_value = "config.json")]
    config: PathBuf,

    /// 覆盖配置中的帧率
    #[arg(long)]
    fps: Option<u32>,

    /// 无头模式：使用手动时钟，只输出最终一帧
    #[arg(long)]
    headless: bool,

    /// 抖动随机种子
    #[arg(long)]
    seed: Option<u64>,

    /// 关闭在线率末位随机数字
    #[arg(long)]
    no_jitter: bool,

    /// 打印生效配置（JSON）后退出
    #[arg(long)]
    print_config: bool,

    /// 输出调试日志
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_max_level(if cli.verbose { Level::DEBUG } else { Level::INFO })
        .with_writer(io::stderr)
        .init();

    let mut config = AppConfig::load(&cli.config);
    if let Some(fps) = cli.fps {
        config.frame_rate = fps;
    }
    if let Some(seed) = cli.seed {
        config.jitter.seed = Some(seed);
    }
    if cli.no_jitter {
        config.jitter.enabled = false;
    }
    config.validate().context("配置无效")?;

    if cli.print_config {
        println!("{}", serde_json::to_string_pretty(&config)?);
        return Ok(());
    }

    let mut jitter = jitter_from_config(&config);
    if cli.headless {
        let frames = run_headless(&config, jitter.as_mut())?;
        if let Some(last) = frames.last() {
            println!("{last}");
        }
    } else {
        let mut stdout = io::stdout().lock();
        run_realtime(&config, jitter.as_mut(), &mut stdout)?;
    }

    Ok(())
}
