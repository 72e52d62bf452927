//! M/M/1/K 排队仿真
//!
//! 以帧循环驱动控制面，把引擎消息以 JSON 行写到 stdout。

use clap::Parser;
use mm1k_rs::driver::{Controller, DriverOptions, Message, MessageSink, StepStatus};
use mm1k_rs::error::SimError;
use mm1k_rs::model::RawQueueConfig;
use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;

#[derive(Debug, Parser)]
#[command(name = "mm1k-sim", about = "M/M/1/K 单服务台有限容量排队的离散事件仿真")]
struct Args {
    /// JSON 配置文件（字段：arrivalRate, serviceRate, queueCapacity, duration）
    #[arg(long)]
    config: Option<PathBuf>,
    /// 到达率（每秒）
    #[arg(long)]
    arrival_rate: Option<f64>,
    /// 服务率（每秒）
    #[arg(long)]
    service_rate: Option<f64>,
    /// 等待区容量，0 表示没有等待区
    #[arg(long, allow_negative_numbers = true)]
    queue_capacity: Option<f64>,
    /// 仿真时长（秒）
    #[arg(long)]
    duration: Option<f64>,
    /// 随机种子；不指定则每次运行结果不同
    #[arg(long)]
    seed: Option<u64>,
    /// 每帧最多分派的事件数
    #[arg(long, default_value_t = 4)]
    batch_size: usize,
    /// 统计快照的最短间隔（毫秒）
    #[arg(long, default_value_t = 120)]
    stats_interval_ms: u64,
    /// 帧间隔（毫秒）
    #[arg(long, default_value_t = 16)]
    frame_ms: u64,
    /// 按帧间隔真实休眠；默认只推进虚拟墙钟
    #[arg(long)]
    realtime: bool,
    /// 在第 N 帧之后取消运行
    #[arg(long)]
    cancel_after_frames: Option<u64>,
}

/// 把消息逐行写成 JSON。
struct JsonLines<W: Write> {
    out: W,
}

impl<W: Write> MessageSink for JsonLines<W> {
    fn send(&mut self, msg: Message) {
        let line = match serde_json::to_string(&msg) {
            Ok(line) => line,
            Err(err) => {
                tracing::error!(%err, "消息序列化失败");
                return;
            }
        };
        if let Err(err) = writeln!(self.out, "{line}") {
            tracing::error!(%err, "写出消息失败");
        }
    }
}

fn load_config(args: &Args) -> Result<RawQueueConfig, SimError> {
    let mut raw = match &args.config {
        Some(path) => {
            let text = fs::read_to_string(path)
                .map_err(|e| SimError::Init(format!("read {}: {e}", path.display())))?;
            serde_json::from_str::<RawQueueConfig>(&text)
                .map_err(|e| SimError::Init(format!("parse {}: {e}", path.display())))?
        }
        None => RawQueueConfig::default(),
    };
    raw.arrival_rate = args.arrival_rate.or(raw.arrival_rate);
    raw.service_rate = args.service_rate.or(raw.service_rate);
    raw.queue_capacity = args.queue_capacity.or(raw.queue_capacity);
    raw.duration = args.duration.or(raw.duration);
    Ok(raw)
}

fn main() -> ExitCode {
    // 初始化 tracing（stderr，stdout 只留给 JSON 消息）
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(io::stderr)
        .with_file(true)
        .with_line_number(true)
        .with_target(true)
        .init();

    let args = Args::parse();

    let opts = DriverOptions {
        batch_size: args.batch_size,
        stats_interval: Duration::from_millis(args.stats_interval_ms),
        seed: args.seed,
        ..DriverOptions::default()
    };
    let sink = JsonLines {
        out: io::stdout().lock(),
    };
    let mut ctl = Controller::new(sink, opts);

    match load_config(&args) {
        Ok(raw) => ctl.start(&raw),
        Err(err) => {
            ctl.fail_init(&err);
            return ExitCode::FAILURE;
        }
    }

    let frame = Duration::from_millis(args.frame_ms);
    let mut wall = Duration::ZERO;
    let mut frames = 0_u64;
    loop {
        if args.cancel_after_frames == Some(frames) {
            ctl.cancel();
        }
        wall += frame;
        frames += 1;
        match ctl.frame(wall) {
            Ok(StepStatus::Continue) => {}
            Ok(StepStatus::Finished(_)) => return ExitCode::SUCCESS,
            Ok(StepStatus::Failed) => return ExitCode::FAILURE,
            Err(err) => {
                tracing::error!(%err, "驱动失败");
                return ExitCode::FAILURE;
            }
        }
        if args.realtime {
            std::thread::sleep(frame);
        }
    }
}
